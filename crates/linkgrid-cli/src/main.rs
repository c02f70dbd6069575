//! linkgrid CLI - view, edit and solve linked-cell meshes

mod shell;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use linkgrid::prelude::*;
use linkgrid::MeshReadOptions;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "linkgrid")]
#[command(
    author,
    version,
    about = "View, edit and solve integer meshes stored as linked cells"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a mesh file
    Show {
        /// Input mesh file
        input: PathBuf,

        /// Field delimiter (default: semicolon)
        #[arg(short, long, default_value = ";")]
        delimiter: char,
    },

    /// Show the dimensions of a mesh file
    Info {
        /// Input mesh file
        input: PathBuf,
    },

    /// Maximum sum picking one value per row and per column
    #[command(alias = "max")]
    MaxSum {
        /// Input mesh file
        input: PathBuf,

        /// Search strategy (exhaustive, branch-and-bound, hungarian)
        #[arg(short, long, default_value = "exhaustive")]
        strategy: Strategy,

        /// Also print the selected cell of each row
        #[arg(short, long)]
        assignment: bool,
    },

    /// Edit a mesh interactively
    Shell {
        /// Mesh file to load (starts with an empty mesh if omitted)
        input: Option<PathBuf>,

        /// File written by 'save' (default: the input file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Show { input, delimiter } => show(&input, delimiter),
        Commands::Info { input } => show_info(&input),
        Commands::MaxSum {
            input,
            strategy,
            assignment,
        } => max_sum(&input, strategy, assignment),
        Commands::Shell { input, output } => run_shell(input.as_deref(), output),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn open(input: &Path) -> Result<Mesh> {
    Mesh::open(input).with_context(|| format!("Failed to open '{}'", input.display()))
}

fn show(input: &Path, delimiter: char) -> Result<()> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character");
    }
    let delimiter = delimiter as u8;
    let options = MeshReadOptions {
        delimiter,
        ..Default::default()
    };
    let mesh = MeshReader::read_file(input, &options)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    if mesh.is_empty() {
        eprintln!("Warning: the mesh is empty");
        return Ok(());
    }
    print!("{mesh}");
    Ok(())
}

fn show_info(input: &Path) -> Result<()> {
    let mesh = open(input)?;

    println!("File: {}", input.display());
    println!("Rows: {}", mesh.rows());
    println!("Columns: {}", mesh.cols());
    println!("Cells: {}", mesh.cell_count());
    if let (Some(min), Some(max)) = (
        mesh.iter().map(|(_, _, v)| v).min(),
        mesh.iter().map(|(_, _, v)| v).max(),
    ) {
        println!("Values: {min} to {max}");
    }
    Ok(())
}

fn max_sum(input: &Path, strategy: Strategy, assignment: bool) -> Result<()> {
    let mesh = open(input)?;

    let options = SolverOptions { strategy };
    let Some(best) = AssignmentSolver::new(&mesh).with_options(options).solve() else {
        bail!(
            "No selection possible: the mesh has more rows ({}) than columns ({})",
            mesh.rows(),
            mesh.cols()
        );
    };

    println!("{}", best.total);
    if assignment {
        for (row, col) in best.columns.iter().enumerate() {
            println!("row {} -> column {}", row + 1, col + 1);
        }
    }
    Ok(())
}

fn run_shell(input: Option<&Path>, output: Option<PathBuf>) -> Result<()> {
    let mesh = match input {
        Some(path) => open(path)?,
        None => Mesh::new(),
    };
    let save_path = output.or_else(|| input.map(Path::to_path_buf));

    let stdin = io::stdin();
    let mut session = shell::Session::new(mesh, save_path, io::stdout());
    session.run(stdin.lock())?;

    let mesh = session.mesh();
    log::info!("session ended with a {}x{} mesh", mesh.rows(), mesh.cols());
    Ok(())
}

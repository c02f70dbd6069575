//! Interactive menu loop
//!
//! Users type commands with 1-based row and column numbers; they are
//! converted to 0-based indices before the mesh is touched. Any error is
//! reported and the loop re-prompts.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use linkgrid::prelude::*;
use log::info;
use thiserror::Error;

/// One menu command, indices already 0-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    View,
    Set { row: usize, col: usize, value: Value },
    InsertRow(usize),
    InsertColumn(usize),
    RemoveRow(usize),
    RemoveColumn(usize),
    Max(Strategy),
    Save(Option<PathBuf>),
    Help,
    Quit,
}

/// Reasons a command line cannot be parsed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    Arity {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{0}' is not a row or column number (numbers start at 1)")]
    BadNumber(String),

    #[error("'{0}' is not an integer value")]
    BadValue(String),

    #[error(transparent)]
    BadStrategy(#[from] linkgrid::ParseStrategyError),
}

pub const HELP: &str = "\
Commands (rows and columns are numbered from 1):
  view                 show the mesh
  set ROW COL VALUE    change one value
  insert-row N         insert an empty row so that it becomes row N
  insert-col N         insert an empty column so that it becomes column N
  remove-row N         remove row N
  remove-col N         remove column N
  max [STRATEGY]       maximum sum picking one value per row and column
                       (exhaustive, branch-and-bound, hungarian)
  save [PATH]          save the mesh
  help                 show this list
  quit                 leave";

/// Parse a 1-based row or column number into a 0-based index
fn parse_number(arg: &str) -> Result<usize, CommandError> {
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::BadNumber(arg.to_string())),
    }
}

fn parse_value(arg: &str) -> Result<Value, CommandError> {
    arg.parse::<Value>()
        .map_err(|_| CommandError::BadValue(arg.to_string()))
}

/// Parse one input line; blank lines yield `None`
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = words.split_first() else {
        return Ok(None);
    };

    let single = |command: &'static str| -> Result<usize, CommandError> {
        match args {
            [n] => parse_number(n),
            _ => Err(CommandError::Arity {
                command,
                expected: "one number",
            }),
        }
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "view" | "show" | "v" => Command::View,
        "set" => match args {
            [row, col, value] => Command::Set {
                row: parse_number(row)?,
                col: parse_number(col)?,
                value: parse_value(value)?,
            },
            _ => {
                return Err(CommandError::Arity {
                    command: "set",
                    expected: "ROW COL VALUE",
                })
            }
        },
        "insert-row" | "ir" => Command::InsertRow(single("insert-row")?),
        "insert-col" | "insert-column" | "ic" => Command::InsertColumn(single("insert-col")?),
        "remove-row" | "rr" => Command::RemoveRow(single("remove-row")?),
        "remove-col" | "remove-column" | "rc" => Command::RemoveColumn(single("remove-col")?),
        "max" | "m" => match args {
            [] => Command::Max(Strategy::default()),
            [strategy] => Command::Max(strategy.parse()?),
            _ => {
                return Err(CommandError::Arity {
                    command: "max",
                    expected: "at most one strategy",
                })
            }
        },
        "save" => match args {
            [] => Command::Save(None),
            [path] => Command::Save(Some(PathBuf::from(path))),
            _ => {
                return Err(CommandError::Arity {
                    command: "save",
                    expected: "at most one path",
                })
            }
        },
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Turn a core error into a message using 1-based numbers
///
/// `inserting` widens the accepted range of an index error by one, since a
/// strip may also be appended after the last one.
pub fn describe(err: &Error, inserting: bool) -> String {
    match err {
        Error::InvalidIndex { axis, count, .. } => {
            let last = if inserting { count + 1 } else { *count };
            if last == 0 {
                format!("Invalid {axis} number: the mesh has no {axis}s")
            } else {
                format!("Invalid {axis} number: expected 1 to {last}")
            }
        }
        Error::InvalidCoordinate { rows, cols, .. } => {
            format!("Invalid position: the mesh has {rows} rows and {cols} columns")
        }
        other => other.to_string(),
    }
}

/// State of one interactive session
pub struct Session<W: Write> {
    mesh: Mesh,
    path: Option<PathBuf>,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(mesh: Mesh, path: Option<PathBuf>, out: W) -> Self {
        Self { mesh, path, out }
    }

    /// The mesh being edited
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Read commands until `quit` or end of input
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        writeln!(self.out, "{HELP}")?;
        self.prompt()?;
        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            match parse_command(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.execute(command)?,
                Ok(None) => {}
                Err(e) => writeln!(self.out, "{e}")?,
            }
            self.prompt()?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }

    /// Apply one command, reporting failures to the output
    pub fn execute(&mut self, command: Command) -> Result<()> {
        let inserting = matches!(command, Command::InsertRow(_) | Command::InsertColumn(_));
        let result = match command {
            Command::View => {
                self.view()?;
                Ok(())
            }
            Command::Set { row, col, value } => self.mesh.set(row, col, value),
            Command::InsertRow(index) => self.mesh.insert_row(index),
            Command::InsertColumn(index) => self.mesh.insert_column(index),
            Command::RemoveRow(index) => self.mesh.remove_row(index),
            Command::RemoveColumn(index) => self.mesh.remove_column(index),
            Command::Max(strategy) => {
                self.max(strategy)?;
                Ok(())
            }
            Command::Save(path) => {
                self.save(path)?;
                Ok(())
            }
            Command::Help => {
                writeln!(self.out, "{HELP}")?;
                Ok(())
            }
            Command::Quit => Ok(()),
        };

        if let Err(e) = result {
            writeln!(self.out, "{}", describe(&e, inserting))?;
        }
        Ok(())
    }

    fn view(&mut self) -> Result<()> {
        if self.mesh.is_empty() {
            writeln!(self.out, "The mesh is empty.")?;
        } else {
            write!(self.out, "{}", self.mesh)?;
        }
        Ok(())
    }

    fn max(&mut self, strategy: Strategy) -> Result<()> {
        match AssignmentSolver::new(&self.mesh)
            .with_strategy(strategy)
            .solve()
        {
            Some(best) => {
                writeln!(self.out, "Maximum sum: {}", best.total)?;
                let picks: Vec<String> = best
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(row, col)| format!("({}, {})", row + 1, col + 1))
                    .collect();
                if !picks.is_empty() {
                    writeln!(self.out, "Selected cells: {}", picks.join(" "))?;
                }
            }
            None => writeln!(
                self.out,
                "No selection possible: the mesh has more rows ({}) than columns ({}).",
                self.mesh.rows(),
                self.mesh.cols()
            )?,
        }
        Ok(())
    }

    fn save(&mut self, path: Option<PathBuf>) -> Result<()> {
        let Some(path) = path.or_else(|| self.path.clone()) else {
            writeln!(self.out, "No file to save to; use 'save PATH'.")?;
            return Ok(());
        };
        match self.mesh.save(&path) {
            Ok(()) => {
                info!("saved mesh to {}", path.display());
                writeln!(self.out, "Saved to '{}'.", path.display())?;
                self.path = Some(path);
            }
            Err(e) => writeln!(self.out, "Failed to save '{}': {e}", path.display())?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkgrid::Axis;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("  "), Ok(None));
        assert_eq!(parse_command("view"), Ok(Some(Command::View)));
        assert_eq!(
            parse_command("set 1 2 -7"),
            Ok(Some(Command::Set {
                row: 0,
                col: 1,
                value: -7
            }))
        );
        assert_eq!(parse_command("insert-row 1"), Ok(Some(Command::InsertRow(0))));
        assert_eq!(parse_command("IC 4"), Ok(Some(Command::InsertColumn(3))));
        assert_eq!(parse_command("rr 2"), Ok(Some(Command::RemoveRow(1))));
        assert_eq!(parse_command("remove-col 3"), Ok(Some(Command::RemoveColumn(2))));
        assert_eq!(
            parse_command("max hungarian"),
            Ok(Some(Command::Max(Strategy::Hungarian)))
        );
        assert_eq!(
            parse_command("save out.txt"),
            Ok(Some(Command::Save(Some(PathBuf::from("out.txt")))))
        );
        assert_eq!(parse_command("q"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_command("insert-row 0"),
            Err(CommandError::BadNumber("0".into()))
        );
        assert_eq!(
            parse_command("remove-row -1"),
            Err(CommandError::BadNumber("-1".into()))
        );
        assert!(matches!(
            parse_command("set 1 2"),
            Err(CommandError::Arity { command: "set", .. })
        ));
        assert_eq!(
            parse_command("set 1 1 abc"),
            Err(CommandError::BadValue("abc".into()))
        );
        assert!(matches!(
            parse_command("max greedy"),
            Err(CommandError::BadStrategy(_))
        ));
        assert_eq!(
            parse_command("frobnicate"),
            Err(CommandError::Unknown("frobnicate".into()))
        );
    }

    #[test]
    fn test_describe_uses_one_based_numbers() {
        let err = Error::InvalidIndex {
            axis: Axis::Row,
            index: 5,
            count: 3,
        };
        assert_eq!(describe(&err, false), "Invalid row number: expected 1 to 3");
        assert_eq!(describe(&err, true), "Invalid row number: expected 1 to 4");

        let err = Error::InvalidIndex {
            axis: Axis::Column,
            index: 0,
            count: 0,
        };
        assert_eq!(
            describe(&err, false),
            "Invalid column number: the mesh has no columns"
        );
    }

    #[test]
    fn test_remove_out_of_range_reports_existing_range() {
        let mut out = Vec::new();
        let mut session = Session::new(Mesh::create(2, 2).unwrap(), None, &mut out);
        session.execute(Command::RemoveRow(4)).unwrap();
        session.execute(Command::InsertColumn(7)).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Invalid row number: expected 1 to 2\nInvalid column number: expected 1 to 3\n"
        );
    }

    #[test]
    fn test_session_script() {
        let mesh = Mesh::from_rows(&[vec![3, 1, 1], vec![2, 5, 1], vec![1, 1, 6]]).unwrap();
        let script = "view\nmax\nset 9 9 1\ninsert-row 2\nremove-col 1\nmax bnb\nquit\nview\n";

        let mut out = Vec::new();
        let mut session = Session::new(mesh, None, &mut out);
        session.run(Cursor::new(script)).unwrap();

        assert_eq!(
            session.mesh().to_rows(),
            vec![vec![1, 1], vec![0, 0], vec![5, 1], vec![1, 6]]
        );

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(" 3  1  1 \n"));
        assert!(text.contains("Maximum sum: 14\nSelected cells: (1, 1) (2, 2) (3, 3)\n"));
        assert!(text.contains("Invalid position: the mesh has 3 rows and 3 columns"));
        assert!(text.contains("No selection possible: the mesh has more rows (4) than columns (2)."));
        // Nothing after quit is executed
        assert_eq!(text.matches(" 3  1  1 ").count(), 1);
    }

    #[test]
    fn test_session_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.txt");

        let mut out = Vec::new();
        let mut session = Session::new(Mesh::create(1, 2).unwrap(), Some(path.clone()), &mut out);
        session.execute(Command::Set { row: 0, col: 1, value: 8 }).unwrap();
        session.execute(Command::Save(None)).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0;8\n");
    }
}

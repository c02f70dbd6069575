//! # linkgrid
//!
//! A Rust library for integer grids stored as meshes of linked cells.
//!
//! ## Features
//!
//! - Insert and remove rows and columns anywhere without rebuilding the grid
//! - Mechanical invariant checking ([`Mesh::verify`])
//! - Maximum-sum assignment search (exhaustive, branch-and-bound or Hungarian)
//! - Load and save the flat `;`-delimited mesh format
//!
//! ## Example
//!
//! ```rust
//! use linkgrid::prelude::*;
//!
//! let mut mesh = Mesh::from_rows(&[vec![3, 1, 1], vec![2, 5, 1], vec![1, 1, 6]]).unwrap();
//! mesh.insert_column(3).unwrap();
//!
//! let best = AssignmentSolver::new(&mesh).solve().unwrap();
//! assert_eq!(best.total, 14);
//!
//! // Save to file
//! // mesh.save("mesh.txt").unwrap();
//! ```

pub mod prelude;

// Re-export core types
pub use linkgrid_core::{
    max_assignment_sum, max_value_width, value_width, Assignment, AssignmentSolver, Axis, Error,
    Mesh, ParseStrategyError, Result, SolverOptions, Strategy, Value, MAX_CELLS,
};

// Re-export I/O types
pub use linkgrid_csv::{
    CsvError, LineTerminator, MeshReadOptions, MeshReader, MeshWriteOptions, MeshWriter,
};

use std::path::Path;

/// Extension trait for Mesh to add file I/O
pub trait MeshFileExt: Sized {
    /// Open a mesh from a file
    fn open<P: AsRef<Path>>(path: P) -> std::result::Result<Self, CsvError>;

    /// Replace the mesh contents with a file's contents
    fn load<P: AsRef<Path>>(&mut self, path: P) -> std::result::Result<(), CsvError>;

    /// Save the mesh to a file
    fn save<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), CsvError>;
}

impl MeshFileExt for Mesh {
    fn open<P: AsRef<Path>>(path: P) -> std::result::Result<Mesh, CsvError> {
        MeshReader::read_file(path, &MeshReadOptions::default())
    }

    fn load<P: AsRef<Path>>(&mut self, path: P) -> std::result::Result<(), CsvError> {
        let file = std::fs::File::open(path)?;
        MeshReader::read_into(self, file, &MeshReadOptions::default())
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), CsvError> {
        MeshWriter::write_file(self, path, &MeshWriteOptions::default())
    }
}

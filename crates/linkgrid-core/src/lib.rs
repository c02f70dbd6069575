//! # linkgrid-core
//!
//! Core data structures for the linkgrid library.
//!
//! This crate provides:
//! - [`Mesh`] - A dense grid of integers stored as linked cells, with row and
//!   column insertion and removal
//! - [`AssignmentSolver`] - Maximum-sum selection of one value per row and per column
//! - [`display`] - Value formatting helpers used to print a mesh
//!
//! ## Example
//!
//! ```rust
//! use linkgrid_core::{max_assignment_sum, Mesh};
//!
//! let mut mesh = Mesh::create(3, 3).unwrap();
//! mesh.set(0, 0, 3).unwrap();
//! mesh.set(1, 1, 5).unwrap();
//! mesh.set(2, 2, 6).unwrap();
//!
//! mesh.insert_row(1).unwrap();
//! mesh.remove_row(1).unwrap();
//!
//! assert_eq!(max_assignment_sum(&mesh), Some(14));
//! ```

pub mod assignment;
pub mod cell;
pub mod display;
pub mod error;
pub mod mesh;

// Re-exports for convenience
pub use assignment::{
    max_assignment_sum, Assignment, AssignmentSolver, ParseStrategyError, SolverOptions, Strategy,
};
pub use cell::Value;
pub use display::{max_value_width, value_width};
pub use error::{Axis, Error, Result};
pub use mesh::Mesh;

/// Maximum number of cells a mesh may hold
pub const MAX_CELLS: usize = 1 << 28;

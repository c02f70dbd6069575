//! Prelude module - common imports for linkgrid users
//!
//! ```rust
//! use linkgrid::prelude::*;
//! ```

pub use crate::{
    // Solver types
    Assignment,
    AssignmentSolver,
    // I/O types
    CsvError,
    // Error types
    Error,
    // Main types
    Mesh,
    // Extension traits
    MeshFileExt,
    MeshReader,
    MeshWriter,
    Result,
    SolverOptions,
    Strategy,
    Value,
};

//! Cell-related types
//!
//! This module contains:
//! - [`Value`] - The integer stored in a cell
//! - [`Cell`] - One node of the mesh with its row and column successors
//! - [`CellArena`] - Index-addressed storage that owns every cell

mod arena;

pub use arena::{Cell, CellArena, CellId, Link};

/// The value held by a single cell
pub type Value = i32;

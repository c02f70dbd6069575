//! Value formatting helpers
//!
//! A mesh is displayed with every value right-aligned to one character more
//! than the widest value, each followed by a space, one line per row.

use std::fmt;

use crate::cell::Value;
use crate::mesh::Mesh;

/// Number of characters in the decimal form of `value`, sign included
pub fn value_width(value: Value) -> usize {
    let digits = value.unsigned_abs().checked_ilog10().map_or(1, |d| d as usize + 1);
    if value < 0 {
        digits + 1
    } else {
        digits
    }
}

/// Width of the widest value in the mesh (0 for a mesh without cells)
pub fn max_value_width(mesh: &Mesh) -> usize {
    mesh.iter()
        .map(|(_, _, value)| value_width(value))
        .max()
        .unwrap_or(0)
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = max_value_width(self) + 1;
        let mut current_row = None;
        for (row, _, value) in self.iter() {
            if current_row.is_some_and(|r| r != row) {
                writeln!(f)?;
            }
            current_row = Some(row);
            write!(f, "{value:>width$} ")?;
        }
        if current_row.is_some() {
            writeln!(f)?;
        }
        Ok(())
    }
}

//! Mesh type
//!
//! A [`Mesh`] is a dense `rows x cols` grid whose cells are linked to their
//! right and lower neighbours instead of being laid out contiguously. All
//! cells live in a [`CellArena`] owned by the mesh; the grid shape is carried
//! entirely by the links starting at the origin (top-left) cell.
//!
//! Every structural edit re-splices the links of the *whole* orthogonal
//! dimension: inserting a row rewires the column link of every column, not
//! just the leftmost one.

use std::collections::HashSet;

use log::{debug, trace};

use crate::cell::{CellArena, CellId, Link, Value};
use crate::error::{Axis, Error, Result};
use crate::MAX_CELLS;

/// A grid of integers stored as linked cells
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Owner of every reachable cell
    cells: CellArena,
    /// Top-left cell, `None` when the mesh holds no cells
    origin: Option<CellId>,
    /// Number of rows
    rows: usize,
    /// Number of columns
    cols: usize,
}

/// Links used by a structural edit along `axis`: the link followed inside one
/// strip and the link connecting a strip to the next one.
fn strip_links(axis: Axis) -> (Link, Link) {
    match axis {
        Axis::Row => (Link::Right, Link::Down),
        Axis::Column => (Link::Down, Link::Right),
    }
}

/// Iterator over a chain of cells following one kind of link
struct Chain<'a> {
    cells: &'a CellArena,
    next: Option<CellId>,
    link: Link,
}

impl Iterator for Chain<'_> {
    type Item = CellId;

    fn next(&mut self) -> Option<CellId> {
        let id = self.next?;
        self.next = self.cells.get(id).and_then(|cell| cell.next(self.link));
        Some(id)
    }
}

impl Mesh {
    /// Create an empty 0x0 mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `rows x cols` mesh of zeros
    ///
    /// A zero in either dimension yields a mesh without cells; the other
    /// count is kept so that a later insert restores a proper grid.
    pub fn create(rows: usize, cols: usize) -> Result<Self> {
        let (cells, origin) = Self::build(rows, cols)?;
        debug!("created {rows}x{cols} mesh");
        Ok(Self {
            cells,
            origin,
            rows,
            cols,
        })
    }

    /// Create a mesh from signed dimensions, rejecting negative counts
    pub fn try_create_signed(rows: i64, cols: i64) -> Result<Self> {
        match (usize::try_from(rows), usize::try_from(cols)) {
            (Ok(r), Ok(c)) => Self::create(r, c),
            _ => Err(Error::InvalidDimensions { rows, cols }),
        }
    }

    /// Create a mesh holding the given rows of values
    ///
    /// All rows must have the same length.
    pub fn from_rows<R: AsRef<[Value]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        if let Some((row, bad)) = rows
            .iter()
            .enumerate()
            .find(|(_, values)| values.as_ref().len() != cols)
        {
            return Err(Error::RaggedRow {
                row,
                expected: cols,
                found: bad.as_ref().len(),
            });
        }

        let mut mesh = Self::create(rows.len(), cols)?;
        let ids: Vec<CellId> = mesh.iter_ids().collect();
        for (id, &value) in ids.into_iter().zip(rows.iter().flat_map(|row| row.as_ref())) {
            mesh.cells[id].value = value;
        }
        Ok(mesh)
    }

    /// Replace the mesh with a fresh `rows x cols` grid of zeros
    ///
    /// Every cell of the previous grid is released. Values are not preserved.
    /// On error the mesh is left unchanged.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        let (cells, origin) = Self::build(rows, cols)?;
        debug!(
            "resizing mesh {}x{} -> {rows}x{cols}, releasing {} cells",
            self.rows,
            self.cols,
            self.cells.live()
        );
        self.cells = cells;
        self.origin = origin;
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells in the grid (`rows * cols`)
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Check if the mesh holds no cells
    pub fn is_empty(&self) -> bool {
        self.origin.is_none()
    }

    /// Number of cells currently allocated by the arena
    ///
    /// Equal to [`cell_count`](Self::cell_count) unless cells have leaked.
    pub fn live_cells(&self) -> usize {
        self.cells.live()
    }

    /// Get the value at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Result<Value> {
        let id = self.cell_id(row, col)?;
        Ok(self.cells[id].value)
    }

    /// Set the value at `(row, col)`
    pub fn set(&mut self, row: usize, col: usize, value: Value) -> Result<()> {
        let id = self.cell_id(row, col)?;
        self.cells[id].value = value;
        Ok(())
    }

    /// Insert a row of zeros so that it becomes row `index` (`0..=rows`)
    pub fn insert_row(&mut self, index: usize) -> Result<()> {
        self.insert_strip(Axis::Row, index)
    }

    /// Remove row `index` (`0..rows`) and release its cells
    pub fn remove_row(&mut self, index: usize) -> Result<()> {
        self.remove_strip(Axis::Row, index)
    }

    /// Insert a column of zeros so that it becomes column `index` (`0..=cols`)
    pub fn insert_column(&mut self, index: usize) -> Result<()> {
        self.insert_strip(Axis::Column, index)
    }

    /// Remove column `index` (`0..cols`) and release its cells
    pub fn remove_column(&mut self, index: usize) -> Result<()> {
        self.remove_strip(Axis::Column, index)
    }

    /// Iterate over all cells in row-major order as `(row, col, value)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Value)> + '_ {
        self.chain(self.origin, Link::Down)
            .enumerate()
            .flat_map(move |(row, start)| {
                self.chain(Some(start), Link::Right)
                    .enumerate()
                    .map(move |(col, id)| (row, col, self.cells[id].value))
            })
    }

    /// Values of one row, left to right
    pub fn row_values(&self, row: usize) -> Result<Vec<Value>> {
        if row >= self.rows {
            return Err(Error::invalid_index(Axis::Row, row, self.rows));
        }
        Ok(self.values_of(self.strip(Axis::Row, row)))
    }

    /// Values of one column, top to bottom
    pub fn column_values(&self, col: usize) -> Result<Vec<Value>> {
        if col >= self.cols {
            return Err(Error::invalid_index(Axis::Column, col, self.cols));
        }
        Ok(self.values_of(self.strip(Axis::Column, col)))
    }

    /// Copy the grid into nested vectors, one per row
    pub fn to_rows(&self) -> Vec<Vec<Value>> {
        if self.origin.is_none() {
            return vec![Vec::new(); if self.cols == 0 { self.rows } else { 0 }];
        }
        self.chain(self.origin, Link::Down)
            .map(|start| {
                self.chain(Some(start), Link::Right)
                    .map(|id| self.cells[id].value)
                    .collect()
            })
            .collect()
    }

    /// Check that the links form a perfect `rows x cols` rectangle
    ///
    /// Verifies that every row and column chain has exactly the expected
    /// length, that each column link points at the cell directly below, that
    /// no cell is reachable from two coordinates and that every allocated
    /// cell is reachable.
    pub fn verify(&self) -> Result<()> {
        let expected = self.rows * self.cols;
        if (expected == 0) != self.origin.is_none() {
            return Err(Error::topology(format!(
                "origin presence does not match a {}x{} mesh",
                self.rows, self.cols
            )));
        }

        let mut seen = HashSet::with_capacity(expected);
        let mut above: Vec<CellId> = Vec::new();
        let mut row_start = self.origin;
        let rows = if expected == 0 { 0 } else { self.rows };

        for r in 0..rows {
            let mut current = row_start;
            let mut row = Vec::with_capacity(self.cols);

            for c in 0..self.cols {
                let id = current.ok_or_else(|| {
                    Error::topology(format!("row {r} ends after {c} cells"))
                })?;
                let cell = self.cells.get(id).ok_or_else(|| {
                    Error::topology(format!("cell ({r}, {c}) was released"))
                })?;
                if !seen.insert(id) {
                    return Err(Error::topology(format!(
                        "cell ({r}, {c}) is reachable from another coordinate"
                    )));
                }
                if let Some(&up) = above.get(c) {
                    if self.cells[up].down != Some(id) {
                        return Err(Error::topology(format!(
                            "cell ({}, {c}) does not link down to ({r}, {c})",
                            r - 1
                        )));
                    }
                }
                if c + 1 == self.cols && cell.right.is_some() {
                    return Err(Error::topology(format!("row {r} is longer than {}", self.cols)));
                }
                if r + 1 == self.rows && cell.down.is_some() {
                    return Err(Error::topology(format!(
                        "column {c} is longer than {}",
                        self.rows
                    )));
                }
                row.push(id);
                current = cell.right;
            }

            row_start = row.first().and_then(|&id| self.cells[id].down);
            above = row;
        }

        if seen.len() != self.cells.live() {
            return Err(Error::topology(format!(
                "{} cells allocated but {} reachable",
                self.cells.live(),
                seen.len()
            )));
        }
        Ok(())
    }

    // === Internal helpers ===

    /// Validate dimensions and return the cell count
    ///
    /// Each count is capped on its own as well, so an `R x 0` mesh cannot
    /// claim more rows than a populated one could hold.
    fn check_dimensions(rows: usize, cols: usize) -> Result<usize> {
        rows.checked_mul(cols)
            .filter(|&total| total <= MAX_CELLS && rows.max(cols) <= MAX_CELLS)
            .ok_or_else(|| Error::invalid_dimensions(rows, cols))
    }

    /// Allocate and link a fresh grid of zeros
    fn build(rows: usize, cols: usize) -> Result<(CellArena, Option<CellId>)> {
        let total = Self::check_dimensions(rows, cols)?;
        let mut cells = CellArena::with_capacity(total)?;
        if total == 0 {
            return Ok((cells, None));
        }

        let mut origin = None;
        let mut above: Vec<CellId> = Vec::new();
        for _ in 0..rows {
            let row = cells.alloc_chain(cols, Link::Right);
            if above.is_empty() {
                origin = row.first().copied();
            }
            for (&up, &id) in above.iter().zip(&row) {
                cells[up].down = Some(id);
            }
            above = row;
        }
        Ok((cells, origin))
    }

    fn chain(&self, start: Option<CellId>, link: Link) -> Chain<'_> {
        Chain {
            cells: &self.cells,
            next: start,
            link,
        }
    }

    /// Follow `link` from `start` exactly `steps` times
    fn walk(&self, start: Option<CellId>, link: Link, steps: usize) -> Option<CellId> {
        self.chain(start, link).nth(steps)
    }

    /// Ids of all cells in row-major order
    fn iter_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.chain(self.origin, Link::Down)
            .flat_map(move |start| self.chain(Some(start), Link::Right))
    }

    /// Ids of row or column `index`, in order
    fn strip(&self, axis: Axis, index: usize) -> Vec<CellId> {
        let (along, across) = strip_links(axis);
        let start = self.walk(self.origin, across, index);
        self.chain(start, along).collect()
    }

    fn values_of(&self, ids: Vec<CellId>) -> Vec<Value> {
        ids.into_iter().map(|id| self.cells[id].value).collect()
    }

    fn count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.rows,
            Axis::Column => self.cols,
        }
    }

    fn count_mut(&mut self, axis: Axis) -> &mut usize {
        match axis {
            Axis::Row => &mut self.rows,
            Axis::Column => &mut self.cols,
        }
    }

    /// Locate the cell at `(row, col)`: `row` steps down, then `col` steps right
    fn cell_id(&self, row: usize, col: usize) -> Result<CellId> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::InvalidCoordinate {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let start = self.walk(self.origin, Link::Down, row);
        self.walk(start, Link::Right, col)
            .ok_or_else(|| Error::topology(format!("no cell at ({row}, {col})")))
    }

    /// Splice a new strip of zeros in at `index` along `axis`
    ///
    /// For every position across the strip, the predecessor strip (or the
    /// origin when `index == 0`) is pointed at the new cell and the new cell
    /// is pointed at the cell that used to sit at `index`.
    fn insert_strip(&mut self, axis: Axis, index: usize) -> Result<()> {
        let count = self.count(axis);
        if index > count {
            return Err(Error::invalid_index(axis, index, count));
        }

        let grown = count
            .checked_add(1)
            .ok_or_else(|| Error::invalid_dimensions(self.rows, self.cols))?;
        let (rows, cols) = match axis {
            Axis::Row => (grown, self.cols),
            Axis::Column => (self.rows, grown),
        };
        Self::check_dimensions(rows, cols)?;

        let span = match axis {
            Axis::Row => self.cols,
            Axis::Column => self.rows,
        };
        self.cells.reserve(span)?;

        let (along, across) = strip_links(axis);
        let displaced = if index < count {
            self.strip(axis, index)
        } else {
            Vec::new()
        };
        let before = if index > 0 {
            self.strip(axis, index - 1)
        } else {
            Vec::new()
        };

        let fresh = self.cells.alloc_chain(span, along);
        for (i, &id) in fresh.iter().enumerate() {
            self.cells[id].set_next(across, displaced.get(i).copied());
            if let Some(&prev) = before.get(i) {
                self.cells[prev].set_next(across, Some(id));
            }
        }
        if index == 0 {
            self.origin = fresh.first().copied();
        }

        *self.count_mut(axis) += 1;
        trace!(
            "inserted {axis} {index} ({span} cells), mesh is now {}x{}",
            self.rows,
            self.cols
        );
        Ok(())
    }

    /// Unlink the strip at `index` along `axis` and release its cells
    fn remove_strip(&mut self, axis: Axis, index: usize) -> Result<()> {
        let count = self.count(axis);
        if index >= count {
            return Err(Error::invalid_index(axis, index, count));
        }

        let (_, across) = strip_links(axis);
        let victims = self.strip(axis, index);
        let before = if index > 0 {
            self.strip(axis, index - 1)
        } else {
            Vec::new()
        };

        for (i, &victim) in victims.iter().enumerate() {
            let after = self.cells[victim].next(across);
            match before.get(i) {
                Some(&prev) => self.cells[prev].set_next(across, after),
                None if i == 0 => self.origin = after,
                None => {}
            }
        }
        let released = victims.len();
        for victim in victims {
            self.cells.release(victim);
        }

        *self.count_mut(axis) -= 1;
        if self.rows == 0 || self.cols == 0 {
            self.origin = None;
        }
        trace!(
            "removed {axis} {index} ({released} cells), mesh is now {}x{}",
            self.rows,
            self.cols
        );
        Ok(())
    }
}

impl PartialEq for Mesh {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.iter().eq(other.iter())
    }
}

impl Eq for Mesh {}

//! Cell arena implementation
//!
//! Cells live in a slot vector and refer to each other by [`CellId`]. A
//! released slot is emptied (dropping its links) and recycled through a free
//! list, so the arena never holds a cell that the mesh cannot reach.

use std::fmt;
use std::ops::{Index, IndexMut};

use super::Value;
use crate::error::{Error, Result};

/// Handle of a cell inside a [`CellArena`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(usize);

impl fmt::Debug for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Direction of a successor link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// Next cell in the same row
    Right,
    /// Next cell in the same column
    Down,
}

/// One node of the mesh
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// The cell's value
    pub value: Value,
    /// Row-successor
    pub right: Option<CellId>,
    /// Column-successor
    pub down: Option<CellId>,
}

impl Cell {
    /// Create an unlinked cell
    pub fn new(value: Value) -> Self {
        Self {
            value,
            right: None,
            down: None,
        }
    }

    /// Get the successor in the given direction
    pub fn next(&self, link: Link) -> Option<CellId> {
        match link {
            Link::Right => self.right,
            Link::Down => self.down,
        }
    }

    /// Set the successor in the given direction
    pub fn set_next(&mut self, link: Link, next: Option<CellId>) {
        match link {
            Link::Right => self.right = next,
            Link::Down => self.down = next,
        }
    }
}

/// Slot storage owning every cell of a mesh
#[derive(Debug, Clone, Default)]
pub struct CellArena {
    slots: Vec<Option<Cell>>,
    free: Vec<CellId>,
    live: usize,
}

impl CellArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena able to hold `cells` cells without growing
    pub fn with_capacity(cells: usize) -> Result<Self> {
        let mut arena = Self::new();
        arena.reserve(cells)?;
        Ok(arena)
    }

    /// Make sure the next `additional` allocations cannot fail
    ///
    /// Structural edits call this before changing any link, which is what
    /// keeps an allocation failure from leaving a half-spliced mesh.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let needed = additional.saturating_sub(self.free.len());
        self.slots
            .try_reserve(needed)
            .map_err(|_| Error::AllocationFailure { cells: additional })
    }

    /// Allocate a single unlinked cell
    pub fn alloc(&mut self, value: Value) -> CellId {
        self.live += 1;
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Some(Cell::new(value));
                id
            }
            None => {
                self.slots.push(Some(Cell::new(value)));
                CellId(self.slots.len() - 1)
            }
        }
    }

    /// Allocate `len` zeroed cells chained along `link`
    ///
    /// Returns the ids in chain order; the last cell's successor is `None`.
    pub fn alloc_chain(&mut self, len: usize, link: Link) -> Vec<CellId> {
        let ids: Vec<CellId> = (0..len).map(|_| self.alloc(0)).collect();
        for pair in ids.windows(2) {
            self[pair[0]].set_next(link, Some(pair[1]));
        }
        ids
    }

    /// Release a cell, returning it with both links cleared
    pub fn release(&mut self, id: CellId) -> Option<Cell> {
        let mut cell = self.slots.get_mut(id.0)?.take()?;
        cell.right = None;
        cell.down = None;
        self.live -= 1;
        self.free.push(id);
        Some(cell)
    }

    /// Get a cell
    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    /// Get a mutable cell
    pub fn get_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    /// Check whether `id` refers to a live cell
    pub fn contains(&self, id: CellId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live cells
    pub fn live(&self) -> usize {
        self.live
    }

    /// Iterate over the ids of all live cells
    pub fn ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| CellId(index))
    }
}

impl Index<CellId> for CellArena {
    type Output = Cell;

    fn index(&self, id: CellId) -> &Cell {
        match self.get(id) {
            Some(cell) => cell,
            None => panic!("cell {id:?} is not live"),
        }
    }
}

impl IndexMut<CellId> for CellArena {
    fn index_mut(&mut self, id: CellId) -> &mut Cell {
        match self.get_mut(id) {
            Some(cell) => cell,
            None => panic!("cell {id:?} is not live"),
        }
    }
}

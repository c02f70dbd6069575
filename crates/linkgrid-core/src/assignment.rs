//! Maximum-sum assignment search
//!
//! Picks one cell per row so that no two picked cells share a column (a
//! system of distinct representatives) and the sum of the picked values is
//! as large as possible.
//!
//! ## Degenerate meshes
//!
//! - A mesh with no rows has exactly one selection, the empty one, whose sum
//!   is 0.
//! - A mesh with more rows than columns (including `R x 0`) has no complete
//!   selection; [`AssignmentSolver::solve`] returns `None`.

use std::fmt;
use std::str::FromStr;

use log::debug;
use pathfinding::kuhn_munkres::{kuhn_munkres, Weights};
use thiserror::Error;

use crate::mesh::Mesh;

/// Search algorithm used by [`AssignmentSolver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Depth-first enumeration of every injective row-to-column selection
    #[default]
    Exhaustive,
    /// Exhaustive search that skips subtrees whose best possible completion
    /// (sum of the remaining row maxima) cannot beat the best found so far
    BranchAndBound,
    /// Polynomial-time optimal matching (Kuhn-Munkres)
    Hungarian,
}

impl Strategy {
    /// All strategies, in declaration order
    pub const ALL: [Strategy; 3] = [
        Strategy::Exhaustive,
        Strategy::BranchAndBound,
        Strategy::Hungarian,
    ];

    /// Name accepted by [`FromStr`]
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Exhaustive => "exhaustive",
            Strategy::BranchAndBound => "branch-and-bound",
            Strategy::Hungarian => "hungarian",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown strategy name
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown strategy '{0}' (expected exhaustive, branch-and-bound or hungarian)")]
pub struct ParseStrategyError(String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exhaustive" | "dfs" => Ok(Strategy::Exhaustive),
            "branch-and-bound" | "bnb" => Ok(Strategy::BranchAndBound),
            "hungarian" | "kuhn-munkres" => Ok(Strategy::Hungarian),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Options for [`AssignmentSolver`]
#[derive(Debug, Clone, Default)]
pub struct SolverOptions {
    /// Search algorithm (default: exhaustive)
    pub strategy: Strategy,
}

/// Best selection found by the solver
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    /// Sum of the selected values
    pub total: i64,
    /// Selected column for each row
    pub columns: Vec<usize>,
}

/// Finds the maximum-sum selection of one value per row and per column
///
/// The solver only reads the mesh; all search state is owned by a single
/// call to [`solve`](Self::solve).
pub struct AssignmentSolver<'a> {
    mesh: &'a Mesh,
    options: SolverOptions,
}

impl<'a> AssignmentSolver<'a> {
    /// Create a solver with default options
    pub fn new(mesh: &'a Mesh) -> Self {
        Self {
            mesh,
            options: SolverOptions::default(),
        }
    }

    /// Replace the solver options
    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Use the given strategy
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.options.strategy = strategy;
        self
    }

    /// Run the search
    ///
    /// Returns `None` when no complete selection exists (more rows than
    /// columns).
    pub fn solve(&self) -> Option<Assignment> {
        let (rows, cols) = (self.mesh.rows(), self.mesh.cols());
        if rows == 0 {
            return Some(Assignment {
                total: 0,
                columns: Vec::new(),
            });
        }
        if rows > cols {
            debug!("no complete assignment for a {rows}x{cols} mesh");
            return None;
        }

        let table = ValueTable::from_mesh(self.mesh);
        let result = match self.options.strategy {
            Strategy::Exhaustive => Search::new(&table, false).run(),
            Strategy::BranchAndBound => Search::new(&table, true).run(),
            Strategy::Hungarian => Some(hungarian(&table)),
        };
        debug!(
            "{} search over {rows}x{cols} mesh: {:?}",
            self.options.strategy,
            result.as_ref().map(|a| a.total)
        );
        result
    }
}

/// Maximum assignment sum using the exhaustive search
pub fn max_assignment_sum(mesh: &Mesh) -> Option<i64> {
    AssignmentSolver::new(mesh).solve().map(|a| a.total)
}

/// Mesh values copied out once so the search does not re-walk links
#[derive(Debug, Clone)]
struct ValueTable {
    values: Vec<Vec<i64>>,
    cols: usize,
}

impl ValueTable {
    fn from_mesh(mesh: &Mesh) -> Self {
        let mut values = vec![Vec::with_capacity(mesh.cols()); mesh.rows()];
        for (row, _, value) in mesh.iter() {
            values[row].push(i64::from(value));
        }
        Self {
            values,
            cols: mesh.cols(),
        }
    }
}

impl Weights<i64> for ValueTable {
    fn rows(&self) -> usize {
        self.values.len()
    }

    fn columns(&self) -> usize {
        self.cols
    }

    fn at(&self, row: usize, col: usize) -> i64 {
        self.values[row][col]
    }

    fn neg(&self) -> Self
    where
        Self: Sized,
        i64: pathfinding::num_traits::Signed,
    {
        Self {
            values: self
                .values
                .iter()
                .map(|row| row.iter().map(|v| -v).collect())
                .collect(),
            cols: self.cols,
        }
    }
}

fn hungarian(table: &ValueTable) -> Assignment {
    let (total, columns) = kuhn_munkres(table);
    Assignment { total, columns }
}

/// Backtracking state for one search
struct Search<'t> {
    table: &'t ValueTable,
    /// Column-usage markers for the current path
    used: Vec<bool>,
    /// Columns chosen for rows `0..path.len()`
    path: Vec<usize>,
    best: Option<Assignment>,
    /// `bound[i]` is the sum of the row maxima of rows `i..`
    bound: Option<Vec<i64>>,
    leaves: u64,
}

impl<'t> Search<'t> {
    fn new(table: &'t ValueTable, prune: bool) -> Self {
        let bound = prune.then(|| {
            let mut bound = vec![0; table.values.len() + 1];
            for (i, row) in table.values.iter().enumerate().rev() {
                let best = row.iter().copied().max().unwrap_or(0);
                bound[i] = bound[i + 1] + best;
            }
            bound
        });
        Self {
            table,
            used: vec![false; table.cols],
            path: Vec::with_capacity(table.values.len()),
            best: None,
            bound,
            leaves: 0,
        }
    }

    fn run(mut self) -> Option<Assignment> {
        self.descend(0, 0);
        debug!("visited {} complete assignments", self.leaves);
        self.best
    }

    fn descend(&mut self, row: usize, sum: i64) {
        if row == self.table.values.len() {
            self.leaves += 1;
            if self.best.as_ref().map_or(true, |best| sum > best.total) {
                self.best = Some(Assignment {
                    total: sum,
                    columns: self.path.clone(),
                });
            }
            return;
        }

        if let (Some(bound), Some(best)) = (&self.bound, &self.best) {
            if sum + bound[row] <= best.total {
                return;
            }
        }

        for col in 0..self.table.cols {
            if self.used[col] {
                continue;
            }
            self.used[col] = true;
            self.path.push(col);
            let value = self.table.values[row][col];
            self.descend(row + 1, sum + value);
            self.path.pop();
            self.used[col] = false;
        }
    }
}

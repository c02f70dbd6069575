//! Property tests: random edit sequences against a nested-vector model, and
//! agreement between the assignment strategies.

use linkgrid_core::{AssignmentSolver, Error, Mesh, Strategy as SearchStrategy, Value};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Set(usize, usize, Value),
    InsertRow(usize),
    RemoveRow(usize),
    InsertColumn(usize),
    RemoveColumn(usize),
    Resize(usize, usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..6usize, 0..6usize, -50..50i32).prop_map(|(r, c, v)| Op::Set(r, c, v)),
        2 => (0..6usize).prop_map(Op::InsertRow),
        2 => (0..6usize).prop_map(Op::RemoveRow),
        2 => (0..6usize).prop_map(Op::InsertColumn),
        2 => (0..6usize).prop_map(Op::RemoveColumn),
        1 => (0..4usize, 0..4usize).prop_map(|(r, c)| Op::Resize(r, c)),
    ]
}

/// Reference model: explicit dimensions plus row vectors
#[derive(Debug, Clone, PartialEq)]
struct Model {
    rows: usize,
    cols: usize,
    values: Vec<Vec<Value>>,
}

impl Model {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![vec![0; cols]; rows],
        }
    }

    /// Apply an op; returns whether the model considers it valid
    fn apply(&mut self, op: &Op) -> bool {
        match *op {
            Op::Set(r, c, v) => {
                if r < self.rows && c < self.cols {
                    self.values[r][c] = v;
                    true
                } else {
                    false
                }
            }
            Op::InsertRow(i) if i <= self.rows => {
                self.values.insert(i, vec![0; self.cols]);
                self.rows += 1;
                true
            }
            Op::RemoveRow(i) if i < self.rows => {
                self.values.remove(i);
                self.rows -= 1;
                true
            }
            Op::InsertColumn(i) if i <= self.cols => {
                for row in &mut self.values {
                    row.insert(i, 0);
                }
                self.cols += 1;
                true
            }
            Op::RemoveColumn(i) if i < self.cols => {
                for row in &mut self.values {
                    row.remove(i);
                }
                self.cols -= 1;
                true
            }
            Op::Resize(r, c) => {
                *self = Model::new(r, c);
                true
            }
            _ => false,
        }
    }
}

fn apply(mesh: &mut Mesh, op: &Op) -> Result<(), Error> {
    match *op {
        Op::Set(r, c, v) => mesh.set(r, c, v),
        Op::InsertRow(i) => mesh.insert_row(i),
        Op::RemoveRow(i) => mesh.remove_row(i),
        Op::InsertColumn(i) => mesh.insert_column(i),
        Op::RemoveColumn(i) => mesh.remove_column(i),
        Op::Resize(r, c) => mesh.resize(r, c),
    }
}

proptest! {
    #[test]
    fn edits_match_model(
        rows in 0..4usize,
        cols in 0..4usize,
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut mesh = Mesh::create(rows, cols).unwrap();
        let mut model = Model::new(rows, cols);

        for op in &ops {
            let before = mesh.clone();
            let valid = model.apply(op);
            let result = apply(&mut mesh, op);

            prop_assert_eq!(result.is_ok(), valid, "{:?}", op);
            if let Err(err) = result {
                prop_assert!(err.is_validation());
                prop_assert_eq!(&mesh, &before);
            }

            prop_assert!(mesh.verify().is_ok(), "{:?}: {:?}", op, mesh.verify());
            prop_assert_eq!(mesh.rows(), model.rows);
            prop_assert_eq!(mesh.cols(), model.cols);
            prop_assert_eq!(mesh.live_cells(), model.rows * model.cols);
            prop_assert_eq!(mesh.to_rows(), model.values.clone());
        }
    }

    #[test]
    fn insert_then_remove_row_round_trips(
        values in prop::collection::vec(prop::collection::vec(-9..9i32, 3), 1..5),
        index in 0..6usize,
    ) {
        let original = Mesh::from_rows(&values).unwrap();
        let index = index % (original.rows() + 1);

        let mut mesh = original.clone();
        mesh.insert_row(index).unwrap();
        prop_assert_eq!(mesh.row_values(index).unwrap(), vec![0; 3]);
        mesh.remove_row(index).unwrap();

        prop_assert_eq!(&mesh, &original);
        prop_assert!(mesh.verify().is_ok());
    }

    #[test]
    fn strategies_agree(
        values in (1..5usize, 0..3usize).prop_flat_map(|(rows, extra)| {
            prop::collection::vec(prop::collection::vec(-20..20i32, rows + extra), rows)
        }),
    ) {
        let mesh = Mesh::from_rows(&values).unwrap();
        let results: Vec<_> = SearchStrategy::ALL
            .iter()
            .map(|&s| AssignmentSolver::new(&mesh).with_strategy(s).solve())
            .collect();

        let exhaustive = results[0].clone().unwrap();
        for result in &results {
            let result = result.clone().unwrap();
            prop_assert_eq!(result.total, exhaustive.total);

            // The reported selection is injective and sums to the total
            let mut seen = result.columns.clone();
            seen.sort_unstable();
            seen.dedup();
            prop_assert_eq!(seen.len(), result.columns.len());
            let sum: i64 = result
                .columns
                .iter()
                .enumerate()
                .map(|(r, &c)| i64::from(values[r][c]))
                .sum();
            prop_assert_eq!(sum, result.total);
        }
    }
}

#[test]
fn test_every_row_of_inserted_column_is_aligned() {
    let mut mesh = Mesh::from_rows(&[vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]).unwrap();
    mesh.insert_column(2).unwrap();

    assert_eq!(mesh.column_values(2).unwrap(), vec![0, 0, 0]);
    assert_eq!(mesh.column_values(3).unwrap(), vec![3, 6, 9]);
    assert_eq!(mesh.row_values(2).unwrap(), vec![7, 8, 0, 9]);
    mesh.verify().unwrap();
}

#[test]
fn test_scripted_session() {
    // Load, edit a value, add a row and a column, then drop a row and a column.
    let mut mesh = Mesh::from_rows(&[
        vec![7, 53, 183, 439],
        vec![497, 383, 563, 79],
        vec![627, 343, 773, 959],
        vec![447, 283, 463, 29],
    ])
    .unwrap();

    mesh.set(2, 2, 100).unwrap();
    mesh.insert_row(4).unwrap();
    mesh.insert_column(3).unwrap();
    mesh.remove_row(2).unwrap();
    mesh.remove_column(1).unwrap();

    assert_eq!(
        mesh.to_rows(),
        vec![
            vec![7, 183, 0, 439],
            vec![497, 563, 0, 79],
            vec![447, 463, 0, 29],
            vec![0, 0, 0, 0],
        ]
    );
    mesh.verify().unwrap();
}

//! End-to-end tests: open -> edit -> save -> reopen -> solve

use linkgrid::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_open_edit_save() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    std::fs::write(&input, "3;1;1;\n2;5;1;\n1;1;6;\n").unwrap();

    let mut mesh = Mesh::open(&input).unwrap();
    assert_eq!(AssignmentSolver::new(&mesh).solve().unwrap().total, 14);

    mesh.insert_row(0).unwrap();
    mesh.set(0, 2, 10).unwrap();
    mesh.insert_column(3).unwrap();

    let output = dir.path().join("output.txt");
    mesh.save(&output).unwrap();

    let reopened = Mesh::open(&output).unwrap();
    assert_eq!(reopened, mesh);
    assert_eq!(reopened.rows(), 4);
    assert_eq!(reopened.cols(), 4);

    // Row 0 takes the 10 in column 2, so row 3 falls back to the zero column
    let best = AssignmentSolver::new(&reopened).solve().unwrap();
    assert_eq!(best.total, 10 + 3 + 5);
    assert_eq!(best.columns, vec![2, 0, 1, 3]);
}

#[test]
fn test_load_resizes_existing_mesh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.txt");
    std::fs::write(&path, "1;2\n3;4\n").unwrap();

    let mut mesh = Mesh::create(5, 5).unwrap();
    mesh.load(&path).unwrap();

    assert_eq!(mesh.to_rows(), vec![vec![1, 2], vec![3, 4]]);
    assert_eq!(mesh.live_cells(), 4);
}

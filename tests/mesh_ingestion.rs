//! End-to-end mesh ingestion tests against a known fixture mesh.
//!
//! The fixture is a 10-vertex unit square meshed with 6 triangles around a
//! refined interior vertex and 2 quadrilaterals along the bottom, plus one
//! boundary-edge section and one named boundary condition per side.

use std::io::Write;
use std::path::Path;

use approx::assert_relative_eq;
use tempfile::NamedTempFile;

use flowmesh::{Axis, BoundaryKind, ComputationalMesh, Dimension, MeshError, MeshReader};

const FIXTURE_MESH: &str = r#"# unit square, mixed tri/quad, one boundary condition per side
$MeshFormat
1.0
$EndMeshFormat
$Base
base 2 2
$EndBase
$Zone
zone 10 8
$EndZone
$Coordinates
1.0 1.0 0.0
0.5 1.0 0.0
0.0 1.0 0.0
0.0 0.1 0.0
0.0 0.0 0.0
0.5 0.0 0.0
1.0 0.0 0.0
1.0 0.1 0.0
0.5 0.40577137 0.0
0.5 0.1 0.0
$EndCoordinates
$Section
interior_tri TRI_3
9 3 4
9 1 2
9 2 3
9 10 8
9 8 1
4 10 9
$EndSection
$Section
interior_quad QUAD_4
5 6 10 4
6 7 8 10
$EndSection
$Section
bottom_edges BAR_2
5 6 6 7
$EndSection
$Section
left_edges BAR_2
3 4 4 5
$EndSection
$Section
right_edges BAR_2
7 8 8 1
$EndSection
$Section
top_edges BAR_2
1 2 2 3
$EndSection
$BoundaryCondition
bottom FamilySpecified bottom
2
9 10
$EndBoundaryCondition
$BoundaryCondition
left FamilySpecified left
2
11 12
$EndBoundaryCondition
$BoundaryCondition
right FamilySpecified right
2
13 14
$EndBoundaryCondition
$BoundaryCondition
top FamilySpecified top
2
15 16
$EndBoundaryCondition
$Family
bottom BCWall
left BCInflow
right BCOutflow
top BCSymmetryPlane
$EndFamily
"#;

fn write_fixture() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", FIXTURE_MESH).unwrap();
    file
}

#[test]
fn test_coordinates_match_fixture() {
    let file = write_fixture();
    let mesh = ComputationalMesh::from_file(file.path(), Dimension::Two).unwrap();

    assert_eq!(mesh.coordinate_x().len(), 10);
    assert_eq!(mesh.coordinate_y().len(), 10);
    assert_eq!(mesh.coordinate_x().len(), mesh.coordinate_y().len());

    let expected_x = [1.0, 0.5, 0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 0.5, 0.5];
    let expected_y = [1.0, 1.0, 1.0, 0.1, 0.0, 0.0, 0.0, 0.1, 0.40577137, 0.1];
    for (vertex, (&x, &y)) in expected_x.iter().zip(&expected_y).enumerate() {
        assert_relative_eq!(mesh.coordinate_x()[vertex], x);
        assert_relative_eq!(mesh.coordinate_y()[vertex], y, epsilon = 1e-4);
    }
}

#[test]
fn test_connectivity_table_matches_fixture() {
    let file = write_fixture();
    let mesh = ComputationalMesh::from_file(file.path(), Dimension::Two).unwrap();

    let table = mesh.connectivity_table();
    assert_eq!(table.len(), 8);

    // triangle section first, in storage order
    assert_eq!(table[0], vec![9, 3, 4]);
    assert_eq!(table[1], vec![9, 1, 2]);
    assert_eq!(table[2], vec![9, 2, 3]);
    assert_eq!(table[3], vec![9, 10, 8]);
    assert_eq!(table[4], vec![9, 8, 1]);
    assert_eq!(table[5], vec![4, 10, 9]);
    // then the quadrilateral section
    assert_eq!(table[6], vec![5, 6, 10, 4]);
    assert_eq!(table[7], vec![6, 7, 8, 10]);

    // arity follows the declaring section
    for row in &table[..6] {
        assert_eq!(row.len(), 3);
    }
    for row in &table[6..] {
        assert_eq!(row.len(), 4);
    }
}

#[test]
fn test_boundary_conditions_match_fixture() {
    let file = write_fixture();
    let mesh = ComputationalMesh::from_file(file.path(), Dimension::Two).unwrap();

    let info = mesh.boundary_condition_info();
    let attached = mesh.boundary_condition_connectivity();
    assert_eq!(info.len(), 4);
    assert_eq!(info.len(), attached.len());

    let expected = [
        (BoundaryKind::Wall, "bottom"),
        (BoundaryKind::Inlet, "left"),
        (BoundaryKind::Outlet, "right"),
        (BoundaryKind::Symmetry, "top"),
    ];
    for (descriptor, &(kind, name)) in info.iter().zip(&expected) {
        assert_eq!(descriptor.kind, kind);
        assert_eq!(descriptor.name, name);
    }

    assert_eq!(attached[0], vec![9, 10]);
    assert_eq!(attached[1], vec![11, 12]);
    assert_eq!(attached[2], vec![13, 14]);
    assert_eq!(attached[3], vec![15, 16]);
}

#[test]
fn test_boundary_edge_sections_contribute_no_elements() {
    // the four BAR_2 sections hold 8 edges, none of which may appear in the
    // connectivity table
    let file = write_fixture();
    let mesh = ComputationalMesh::from_file(file.path(), Dimension::Two).unwrap();
    assert_eq!(mesh.n_elements(), 8);
}

#[test]
fn test_loading_twice_yields_identical_tables() {
    let file = write_fixture();
    let first = ComputationalMesh::from_file(file.path(), Dimension::Two).unwrap();
    let second = ComputationalMesh::from_file(file.path(), Dimension::Two).unwrap();

    assert_eq!(first.coordinate_x(), second.coordinate_x());
    assert_eq!(first.coordinate_y(), second.coordinate_y());
    assert_eq!(first.connectivity_table(), second.connectivity_table());
    assert_eq!(
        first.boundary_condition_info(),
        second.boundary_condition_info()
    );
    assert_eq!(
        first.boundary_condition_connectivity(),
        second.boundary_condition_connectivity()
    );
}

#[test]
fn test_three_dimensional_ingestion_is_unimplemented() {
    let file = write_fixture();

    let reader = MeshReader::open(file.path(), Dimension::Three).unwrap();
    assert!(matches!(
        reader.read_coordinate(Axis::X),
        Err(MeshError::NotImplemented(_))
    ));
    assert!(matches!(
        reader.read_connectivity_table(),
        Err(MeshError::NotImplemented(_))
    ));

    let result = ComputationalMesh::from_file(file.path(), Dimension::Three);
    assert!(matches!(result, Err(MeshError::NotImplemented(_))));
}

#[test]
fn test_missing_mesh_file_reports_path() {
    let result = MeshReader::open(Path::new("input/absent.fms"), Dimension::Two);
    match result {
        Err(MeshError::MissingFile(path)) => {
            assert_eq!(path, Path::new("input/absent.fms"));
        }
        other => panic!("expected MissingFile, got {:?}", other.map(|_| ())),
    }
}

//! Mesh reading and normalization.
//!
//! [`MeshReader`] wraps one open mesh-interchange file and offers four
//! independent extraction operations: per-axis coordinate arrays, the
//! flattened connectivity table, the boundary-condition descriptor list and
//! the boundary-to-element connectivity. No extracted data is stored here; the
//! caller ([`ComputationalMesh`](super::ComputationalMesh)) caches what it
//! needs.
//!
//! Connectivity rows keep the file's 1-based vertex ids verbatim and follow
//! section-then-within-section file order. Downstream boundary connectivity
//! indices reference elements by this same sequential numbering, so the order
//! must match literal file content.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use flowmesh::mesh::{Axis, Dimension, MeshReader};
//!
//! let reader = MeshReader::open(Path::new("mesh/channel.fms"), Dimension::Two)?;
//! let x = reader.read_coordinate(Axis::X)?;
//! let y = reader.read_coordinate(Axis::Y)?;
//! let connectivity = reader.read_connectivity_table()?;
//! let info = reader.read_boundary_conditions()?;
//! let attached = reader.read_boundary_condition_connectivity()?;
//! assert_eq!(info.len(), attached.len());
//! # Ok::<(), flowmesh::mesh::MeshError>(())
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::boundary::{BoundaryConditionInfo, BoundaryKind};
use super::file::{Axis, BocoClassification, ElementKind, MeshFile, MeshFileError};

/// Spatial dimension of the mesh to ingest.
///
/// `Three` is accepted at construction for forward compatibility, but every
/// 3D read path currently fails with [`MeshError::NotImplemented`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    Two = 2,
    Three = 3,
}

/// Per-axis vertex coordinates; index `i` holds the file's vertex id `i + 1`.
pub type CoordinateArray = Vec<f64>;

/// One row per element, each row the element's 1-based vertex ids kept
/// verbatim from the file (3 ids for triangles, 4 for quadrilaterals).
pub type ConnectivityTable = Vec<Vec<u32>>;

/// One row per surfaced boundary condition, parallel to the descriptor list.
pub type BoundaryConnectivity = Vec<Vec<u32>>;

/// Error type for mesh ingestion.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Mesh file does not exist.
    #[error("can't find the following file: {0}")]
    MissingFile(PathBuf),

    /// Underlying file-access failure.
    #[error(transparent)]
    File(#[from] MeshFileError),

    /// Multi-base files are unsupported.
    #[error("only single-base meshes are supported, file has {0} bases")]
    MultipleBases(usize),

    /// Multi-zone files are unsupported.
    #[error("only single-zone meshes are supported, file has {0} zones")]
    MultipleZones(usize),

    /// The zone declares no vertices.
    #[error("zone declares no vertices")]
    EmptyZone,

    /// Element block size does not match the declared element kind.
    #[error(
        "corrupt section {section}: data size {data_len} not divisible by {arity} vertices per element"
    )]
    MalformedSection {
        section: String,
        data_len: usize,
        arity: usize,
    },

    /// Requested path exists in the API but is not implemented yet.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}

/// Reader for one mesh-interchange file.
///
/// Owns the file handle for its lifetime; the handle is released when the
/// reader is dropped, on every exit path. Construction validates the
/// single-base/single-zone precondition and caches the scalar counts every
/// later operation reuses.
#[derive(Debug)]
pub struct MeshReader {
    file: MeshFile,
    dimension: Dimension,
    n_vertices: usize,
    n_cells: usize,
    n_boundary_conditions: usize,
    n_families: usize,
}

impl MeshReader {
    /// Open a mesh file for the requested spatial dimension.
    ///
    /// Fails if the file is missing, cannot be parsed, or contains more than
    /// one base or zone.
    pub fn open(path: &Path, dimension: Dimension) -> Result<Self, MeshError> {
        if !path.exists() {
            return Err(MeshError::MissingFile(path.to_path_buf()));
        }
        let file = MeshFile::open(path)?;
        if file.n_bases() != 1 {
            return Err(MeshError::MultipleBases(file.n_bases()));
        }
        if file.n_zones() != 1 {
            return Err(MeshError::MultipleZones(file.n_zones()));
        }
        let (n_vertices, n_cells) = file.zone_size(0)?;
        let n_boundary_conditions = file.n_boundary_conditions();
        let n_families = file.n_families();
        Ok(Self {
            file,
            dimension,
            n_vertices,
            n_cells,
            n_boundary_conditions,
            n_families,
        })
    }

    /// Spatial dimension requested at construction.
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Vertex count declared by the zone.
    pub fn n_vertices(&self) -> usize {
        self.n_vertices
    }

    /// Cell count declared by the zone.
    pub fn n_cells(&self) -> usize {
        self.n_cells
    }

    /// Number of boundary-condition records in the file, before filtering.
    pub fn n_boundary_conditions(&self) -> usize {
        self.n_boundary_conditions
    }

    /// Number of family definitions in the file.
    pub fn n_families(&self) -> usize {
        self.n_families
    }

    /// Read one axis of the vertex coordinates over the 1-based id range
    /// `[1, n_vertices]`.
    pub fn read_coordinate(&self, axis: Axis) -> Result<CoordinateArray, MeshError> {
        if self.dimension == Dimension::Three {
            return Err(MeshError::NotImplemented("3D coordinate reading"));
        }
        if self.n_vertices == 0 {
            return Err(MeshError::EmptyZone);
        }
        Ok(self.file.coordinates(axis, 1, self.n_vertices)?.to_vec())
    }

    /// Flatten every recognized topological section into one connectivity
    /// table.
    ///
    /// Only triangle and quadrilateral sections are processed; sections of any
    /// other element kind (boundary edges, point sets) contribute zero rows.
    /// Row order is section order, then within-section storage order.
    pub fn read_connectivity_table(&self) -> Result<ConnectivityTable, MeshError> {
        if self.dimension == Dimension::Three {
            return Err(MeshError::NotImplemented("3D connectivity reading"));
        }
        let mut connectivity = ConnectivityTable::with_capacity(self.n_cells);
        for section in 0..self.file.n_sections() {
            let kind = self.file.section_kind(section)?;
            match kind {
                ElementKind::Tri3 | ElementKind::Quad4 => {
                    self.append_section(section, kind.vertex_count(), &mut connectivity)?;
                }
                _ => {}
            }
        }
        Ok(connectivity)
    }

    /// Kind and name of every surfaced boundary condition, in file order.
    pub fn read_boundary_conditions(&self) -> Result<Vec<BoundaryConditionInfo>, MeshError> {
        Ok(self
            .scan_boundaries()?
            .into_iter()
            .map(|(info, _)| info)
            .collect())
    }

    /// Point/element ids attached to every surfaced boundary condition, in
    /// file order and index-parallel to [`MeshReader::read_boundary_conditions`].
    pub fn read_boundary_condition_connectivity(&self) -> Result<BoundaryConnectivity, MeshError> {
        Ok(self
            .scan_boundaries()?
            .into_iter()
            .map(|(_, points)| points)
            .collect())
    }

    fn append_section(
        &self,
        section: usize,
        arity: usize,
        connectivity: &mut ConnectivityTable,
    ) -> Result<(), MeshError> {
        let data_len = self.file.element_data_size(section)?;
        if data_len % arity != 0 {
            return Err(MeshError::MalformedSection {
                section: self.file.section_name(section)?.to_string(),
                data_len,
                arity,
            });
        }
        let data = self.file.element_data(section)?;
        for element in data.chunks_exact(arity) {
            connectivity.push(element.to_vec());
        }
        Ok(())
    }

    /// Visit every boundary record in file order and keep the resolvable
    /// family-specified ones.
    ///
    /// Descriptor and point list are emitted together, so the two public
    /// boundary outputs always stay index-parallel, also for files that mix
    /// family-specified records with directly typed ones.
    fn scan_boundaries(&self) -> Result<Vec<(BoundaryConditionInfo, Vec<u32>)>, MeshError> {
        let mut kept = Vec::with_capacity(self.n_boundary_conditions);
        for boundary in 0..self.n_boundary_conditions {
            let (name, classification, _) = self.file.boco_info(boundary)?;
            if classification != BocoClassification::FamilySpecified {
                continue;
            }
            let Some(family) = self.file.boco_family(boundary)? else {
                continue;
            };
            let Some(bc_type) = self.file.family_bc_type(family) else {
                continue;
            };
            let Some(kind) = BoundaryKind::from_family_bc(bc_type) else {
                continue;
            };
            let info = BoundaryConditionInfo {
                kind,
                name: name.to_string(),
            };
            let points = self.file.boco_points(boundary)?.to_vec();
            kept.push((info, points));
        }
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_mesh(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const MIXED_MESH: &str = r#"$MeshFormat
1.0
$EndMeshFormat
$Base
base 2 2
$EndBase
$Zone
zone 6 3
$EndZone
$Coordinates
0.0 0.0
1.0 0.0
2.0 0.0
0.0 1.0
1.0 1.0
2.0 1.0
$EndCoordinates
$Section
tris TRI_3
1 2 5
1 5 4
$EndSection
$Section
edges BAR_2
1 2 2 3
$EndSection
$Section
quads QUAD_4
2 3 6 5
$EndSection
$BoundaryCondition
bottom FamilySpecified bottom
2
4 5
$EndBoundaryCondition
$BoundaryCondition
top BCWall
1
6
$EndBoundaryCondition
$BoundaryCondition
outflow FamilySpecified outflow
1
7
$EndBoundaryCondition
$Family
bottom BCWall
outflow BCOutflow
$EndFamily
"#;

    #[test]
    fn test_missing_file() {
        let result = MeshReader::open(Path::new("does/not/exist.fms"), Dimension::Two);
        assert!(matches!(result, Err(MeshError::MissingFile(_))));
    }

    #[test]
    fn test_multiple_bases_rejected() {
        let file = write_mesh("$Base\na 2 2\nb 2 2\n$EndBase\n$Zone\nzone 3 1\n$EndZone\n");
        let result = MeshReader::open(file.path(), Dimension::Two);
        assert!(matches!(result, Err(MeshError::MultipleBases(2))));
    }

    #[test]
    fn test_multiple_zones_rejected() {
        let file = write_mesh("$Base\na 2 2\n$EndBase\n$Zone\nzone 3 1\nother 3 1\n$EndZone\n");
        let result = MeshReader::open(file.path(), Dimension::Two);
        assert!(matches!(result, Err(MeshError::MultipleZones(2))));
    }

    #[test]
    fn test_cached_counts() {
        let file = write_mesh(MIXED_MESH);
        let reader = MeshReader::open(file.path(), Dimension::Two).unwrap();
        assert_eq!(reader.n_vertices(), 6);
        assert_eq!(reader.n_cells(), 3);
        assert_eq!(reader.n_boundary_conditions(), 3);
        assert_eq!(reader.n_families(), 2);
    }

    #[test]
    fn test_read_coordinates() {
        let file = write_mesh(MIXED_MESH);
        let reader = MeshReader::open(file.path(), Dimension::Two).unwrap();

        let x = reader.read_coordinate(Axis::X).unwrap();
        let y = reader.read_coordinate(Axis::Y).unwrap();
        assert_eq!(x, vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
        assert_eq!(y, vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_connectivity_preserves_order_and_arity() {
        let file = write_mesh(MIXED_MESH);
        let reader = MeshReader::open(file.path(), Dimension::Two).unwrap();

        let connectivity = reader.read_connectivity_table().unwrap();
        // the BAR_2 section between the two primitive sections contributes
        // zero rows
        assert_eq!(connectivity.len(), 3);
        assert_eq!(connectivity[0], vec![1, 2, 5]);
        assert_eq!(connectivity[1], vec![1, 5, 4]);
        assert_eq!(connectivity[2], vec![2, 3, 6, 5]);
    }

    #[test]
    fn test_malformed_section() {
        let file = write_mesh(
            "$Base\nbase 2 2\n$EndBase\n$Zone\nzone 4 1\n$EndZone\n$Section\nbroken TRI_3\n1 2 3 4 1 2 3\n$EndSection\n",
        );
        let reader = MeshReader::open(file.path(), Dimension::Two).unwrap();
        let result = reader.read_connectivity_table();
        assert!(matches!(
            result,
            Err(MeshError::MalformedSection { data_len: 7, arity: 3, .. })
        ));
    }

    #[test]
    fn test_three_dimensional_paths_unimplemented() {
        let file = write_mesh(MIXED_MESH);
        let reader = MeshReader::open(file.path(), Dimension::Three).unwrap();

        assert!(matches!(
            reader.read_coordinate(Axis::X),
            Err(MeshError::NotImplemented(_))
        ));
        assert!(matches!(
            reader.read_connectivity_table(),
            Err(MeshError::NotImplemented(_))
        ));
    }

    #[test]
    fn test_boundary_outputs_stay_parallel() {
        // MIXED_MESH has three boundary records: one family-specified wall,
        // one directly typed record and one family-specified outflow. The
        // direct record must be dropped from both outputs.
        let file = write_mesh(MIXED_MESH);
        let reader = MeshReader::open(file.path(), Dimension::Two).unwrap();

        let info = reader.read_boundary_conditions().unwrap();
        let attached = reader.read_boundary_condition_connectivity().unwrap();
        assert_eq!(info.len(), attached.len());
        assert_eq!(info.len(), 2);

        assert_eq!(info[0].kind, BoundaryKind::Wall);
        assert_eq!(info[0].name, "bottom");
        assert_eq!(attached[0], vec![4, 5]);

        assert_eq!(info[1].kind, BoundaryKind::Outlet);
        assert_eq!(info[1].name, "outflow");
        assert_eq!(attached[1], vec![7]);
    }

    #[test]
    fn test_unresolvable_family_dropped_from_both_outputs() {
        let file = write_mesh(
            r#"$Base
base 2 2
$EndBase
$Zone
zone 3 1
$EndZone
$BoundaryCondition
farfield FamilySpecified farfield
1
1
$EndBoundaryCondition
$BoundaryCondition
wall FamilySpecified wall
1
2
$EndBoundaryCondition
$Family
farfield BCFarfield
wall BCWall
$EndFamily
"#,
        );
        let reader = MeshReader::open(file.path(), Dimension::Two).unwrap();

        let info = reader.read_boundary_conditions().unwrap();
        let attached = reader.read_boundary_condition_connectivity().unwrap();
        assert_eq!(info.len(), 1);
        assert_eq!(attached.len(), 1);
        assert_eq!(info[0].kind, BoundaryKind::Wall);
        assert_eq!(attached[0], vec![2]);
    }

    #[test]
    fn test_empty_zone_coordinate_read_fails() {
        let file = write_mesh("$Base\nbase 2 2\n$EndBase\n$Zone\nzone 0 0\n$EndZone\n");
        let reader = MeshReader::open(file.path(), Dimension::Two).unwrap();
        assert!(matches!(
            reader.read_coordinate(Axis::X),
            Err(MeshError::EmptyZone)
        ));
    }

    #[test]
    fn test_loading_twice_is_deterministic() {
        let file = write_mesh(MIXED_MESH);
        let first = MeshReader::open(file.path(), Dimension::Two).unwrap();
        let second = MeshReader::open(file.path(), Dimension::Two).unwrap();

        assert_eq!(
            first.read_coordinate(Axis::X).unwrap(),
            second.read_coordinate(Axis::X).unwrap()
        );
        assert_eq!(
            first.read_connectivity_table().unwrap(),
            second.read_connectivity_table().unwrap()
        );
        assert_eq!(
            first.read_boundary_conditions().unwrap(),
            second.read_boundary_conditions().unwrap()
        );
        assert_eq!(
            first.read_boundary_condition_connectivity().unwrap(),
            second.read_boundary_condition_connectivity().unwrap()
        );
    }
}

//! Cached computational mesh snapshot.
//!
//! [`ComputationalMesh`] is the composition root of the ingestion layer: it
//! drives the four [`MeshReader`] extraction operations exactly once at
//! construction, caches the results as immutable tables and hands them to the
//! solver through read-only accessors. No accessor triggers I/O, there is no
//! lazy loading and no re-reading; a failed extraction fails construction
//! before any snapshot exists.

use std::path::Path;

use super::boundary::BoundaryConditionInfo;
use super::file::Axis;
use super::reader::{
    BoundaryConnectivity, ConnectivityTable, CoordinateArray, Dimension, MeshError, MeshReader,
};

/// Immutable in-memory mesh snapshot for the solver.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use flowmesh::mesh::{ComputationalMesh, Dimension};
///
/// let mesh = ComputationalMesh::from_file(Path::new("mesh/channel.fms"), Dimension::Two)?;
/// for (info, elements) in mesh
///     .boundary_condition_info()
///     .iter()
///     .zip(mesh.boundary_condition_connectivity())
/// {
///     println!("{:?} boundary {} touches elements {:?}", info.kind, info.name, elements);
/// }
/// # Ok::<(), flowmesh::mesh::MeshError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ComputationalMesh {
    dimension: Dimension,
    coordinate_x: CoordinateArray,
    coordinate_y: CoordinateArray,
    coordinate_z: CoordinateArray,
    connectivity_table: ConnectivityTable,
    boundary_condition_info: Vec<BoundaryConditionInfo>,
    boundary_condition_connectivity: BoundaryConnectivity,
}

impl ComputationalMesh {
    /// Open a mesh file and materialize the full snapshot.
    pub fn from_file(path: &Path, dimension: Dimension) -> Result<Self, MeshError> {
        let reader = MeshReader::open(path, dimension)?;
        Self::from_reader(&reader)
    }

    /// Materialize the snapshot from an already opened reader.
    ///
    /// All reads complete before the value is constructed, so no
    /// half-populated mesh is ever observable.
    pub fn from_reader(reader: &MeshReader) -> Result<Self, MeshError> {
        let coordinate_x = reader.read_coordinate(Axis::X)?;
        let coordinate_y = reader.read_coordinate(Axis::Y)?;
        let coordinate_z = match reader.dimension() {
            Dimension::Two => CoordinateArray::new(),
            Dimension::Three => reader.read_coordinate(Axis::Z)?,
        };
        let connectivity_table = reader.read_connectivity_table()?;
        let boundary_condition_info = reader.read_boundary_conditions()?;
        let boundary_condition_connectivity = reader.read_boundary_condition_connectivity()?;

        Ok(Self {
            dimension: reader.dimension(),
            coordinate_x,
            coordinate_y,
            coordinate_z,
            connectivity_table,
            boundary_condition_info,
            boundary_condition_connectivity,
        })
    }

    /// Spatial dimension the mesh was ingested for.
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Number of vertices.
    pub fn n_vertices(&self) -> usize {
        self.coordinate_x.len()
    }

    /// Number of elements in the connectivity table.
    pub fn n_elements(&self) -> usize {
        self.connectivity_table.len()
    }

    /// Vertex x coordinates.
    pub fn coordinate_x(&self) -> &[f64] {
        &self.coordinate_x
    }

    /// Vertex y coordinates.
    pub fn coordinate_y(&self) -> &[f64] {
        &self.coordinate_y
    }

    /// Vertex z coordinates; empty for 2D meshes.
    pub fn coordinate_z(&self) -> &[f64] {
        &self.coordinate_z
    }

    /// Flattened element connectivity, 1-based vertex ids kept verbatim.
    pub fn connectivity_table(&self) -> &[Vec<u32>] {
        &self.connectivity_table
    }

    /// Kind and name of every surfaced boundary condition.
    pub fn boundary_condition_info(&self) -> &[BoundaryConditionInfo] {
        &self.boundary_condition_info
    }

    /// Element ids attached to each surfaced boundary condition, parallel to
    /// [`ComputationalMesh::boundary_condition_info`].
    pub fn boundary_condition_connectivity(&self) -> &[Vec<u32>] {
        &self.boundary_condition_connectivity
    }
}

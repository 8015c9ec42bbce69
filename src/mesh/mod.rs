//! Mesh ingestion and normalization.
//!
//! Provides the mesh loading pipeline for the solver:
//! - Sectioned mesh-interchange file access primitives
//! - Boundary-condition kinds and descriptors
//! - Mesh reading: coordinates, flattened connectivity, boundary recovery
//! - The cached, read-only computational mesh snapshot

mod boundary;
mod computational;
pub mod file;
mod reader;

pub use boundary::{BoundaryConditionInfo, BoundaryKind};
pub use computational::ComputationalMesh;
pub use file::{Axis, BocoClassification, ElementKind, MeshFile, MeshFileError};
pub use reader::{
    BoundaryConnectivity, ConnectivityTable, CoordinateArray, Dimension, MeshError, MeshReader,
};

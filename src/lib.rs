//! # flowmesh
//!
//! Mesh ingestion and run-time configuration for 2D finite-volume CFD solvers.
//!
//! This crate provides the preprocessing building blocks a solver runs once
//! before its time-stepping loop:
//! - Mesh-interchange file access primitives (`mesh::file`)
//! - Mesh reading and normalization: coordinates, flattened tri/quad
//!   connectivity, named boundary conditions (`mesh::MeshReader`)
//! - A cached, immutable computational mesh snapshot (`mesh::ComputationalMesh`)
//! - A typed parameter registry with JSON file loading (`config`)
//!
//! Loading is synchronous, single-threaded and all-or-nothing: a malformed
//! mesh or configuration fails fast with a typed error instead of producing a
//! partially correct simulation setup.

pub mod config;
pub mod mesh;

// Re-export main types for convenience
pub use config::{ConfigError, ParameterRegistry, ParameterValue};
pub use mesh::{
    Axis, BoundaryConditionInfo, BoundaryConnectivity, BoundaryKind, ComputationalMesh,
    ConnectivityTable, CoordinateArray, Dimension, MeshError, MeshFile, MeshFileError, MeshReader,
};

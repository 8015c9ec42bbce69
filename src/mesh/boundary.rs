//! Boundary-condition kinds and descriptors.
//!
//! Each surfaced boundary record is described by a closed kind enumeration and
//! the user-assigned name from the meshing stage. Kinds are resolved from the
//! interchange-format family tokens through a fixed mapping table; families
//! with any other type are dropped by the reader.

/// Kind of a named boundary condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    /// Solid wall (no-slip/no-flux boundary)
    Wall,

    /// Inflow boundary (prescribed inflow state)
    Inlet,

    /// Outflow boundary
    Outlet,

    /// Symmetry plane
    Symmetry,
}

impl BoundaryKind {
    /// Resolve an interchange-format family BC token into a kind.
    ///
    /// Returns `None` for every token outside the fixed mapping table; the
    /// caller drops such records.
    pub fn from_family_bc(token: &str) -> Option<Self> {
        match token {
            "BCWall" => Some(BoundaryKind::Wall),
            "BCInflow" => Some(BoundaryKind::Inlet),
            "BCOutflow" => Some(BoundaryKind::Outlet),
            "BCSymmetryPlane" => Some(BoundaryKind::Symmetry),
            _ => None,
        }
    }

    /// Check if this is a solid wall.
    pub fn is_wall(&self) -> bool {
        matches!(self, BoundaryKind::Wall)
    }

    /// Check if flow crosses this boundary (inlet or outlet).
    pub fn is_open(&self) -> bool {
        matches!(self, BoundaryKind::Inlet | BoundaryKind::Outlet)
    }
}

/// Descriptor of one surfaced boundary condition: its kind and the name
/// assigned at the meshing stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundaryConditionInfo {
    /// Resolved boundary-condition kind.
    pub kind: BoundaryKind,
    /// User-assigned boundary name.
    pub name: String,
}

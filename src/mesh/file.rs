//! Mesh-interchange file access.
//!
//! Provides low-level access to sectioned ASCII mesh-interchange files: a
//! [`MeshFile`] is opened from a path, parsed and validated once, and then
//! queried by base, zone, section and boundary-condition index. Higher layers
//! ([`MeshReader`](super::MeshReader)) build normalized mesh tables on top of
//! these primitives and never touch the raw file themselves.
//!
//! # File Format
//!
//! Lines starting with `#` are comments, blank lines are ignored. A file is a
//! sequence of `$Name`/`$EndName` blocks:
//!
//! ```text
//! $MeshFormat
//! 1.0
//! $EndMeshFormat
//! $Base
//! base 2 2
//! $EndBase
//! $Zone
//! zone 10 8
//! $EndZone
//! $Coordinates
//! 0.0 0.0 0.0
//! 1.0 0.0 0.0
//! $EndCoordinates
//! $Section
//! interior TRI_3
//! 1 2 3
//! $EndSection
//! $BoundaryCondition
//! bottom FamilySpecified bottom
//! 2
//! 9 10
//! $EndBoundaryCondition
//! $Family
//! bottom BCWall
//! $EndFamily
//! ```
//!
//! - `$Base` and `$Zone` carry one record per line: a name followed by the
//!   cell/physical dimensions (base) or the vertex and cell counts (zone).
//! - `$Coordinates` holds one `x y z` line per vertex; vertex ids are implicit
//!   and 1-based, in storage order.
//! - `$Section` declares a name and an element kind on its first line, followed
//!   by the flat 1-based vertex id buffer in free whitespace layout.
//! - `$BoundaryCondition` declares a name, a classification and (for
//!   family-specified records) a family name, then the point count and the flat
//!   1-based point/element id list.
//! - `$Family` carries one `name bc_type` record per line, e.g. `inlet BCInflow`.

use std::path::Path;

use thiserror::Error;

/// Error type for mesh-interchange file access.
#[derive(Debug, Error)]
pub enum MeshFileError {
    /// File could not be read.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid file content, with the offending line number.
    #[error("parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Element kind token not known to the format.
    #[error("unknown element kind at line {line}: {kind}")]
    UnknownElementKind { line: usize, kind: String },

    /// Unsupported mesh-format version.
    #[error("unsupported mesh format version: {0}")]
    UnsupportedVersion(String),

    /// A required block is missing from the file.
    #[error("missing block: {0}")]
    MissingBlock(&'static str),

    /// A query referenced an entity the file does not contain.
    #[error("{entity} index {index} out of range")]
    OutOfRange { entity: &'static str, index: usize },
}

/// Coordinate axis selector for per-axis coordinate blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

/// Element kinds stored in topological sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// Single point (1 vertex).
    Node,
    /// Boundary edge (2 vertices).
    Bar2,
    /// Triangle (3 vertices).
    Tri3,
    /// Quadrilateral (4 vertices).
    Quad4,
}

impl ElementKind {
    /// Number of vertices per element of this kind.
    pub fn vertex_count(&self) -> usize {
        match self {
            ElementKind::Node => 1,
            ElementKind::Bar2 => 2,
            ElementKind::Tri3 => 3,
            ElementKind::Quad4 => 4,
        }
    }

    fn parse(token: &str, line: usize) -> Result<Self, MeshFileError> {
        match token {
            "NODE" => Ok(ElementKind::Node),
            "BAR_2" => Ok(ElementKind::Bar2),
            "TRI_3" => Ok(ElementKind::Tri3),
            "QUAD_4" => Ok(ElementKind::Quad4),
            _ => Err(MeshFileError::UnknownElementKind {
                line,
                kind: token.to_string(),
            }),
        }
    }
}

/// Classification of a boundary-condition record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BocoClassification {
    /// The record's type is resolved through a named family.
    FamilySpecified,
    /// The record carries a direct boundary-condition type token.
    Direct,
}

impl BocoClassification {
    fn parse(token: &str, line: usize) -> Result<Self, MeshFileError> {
        if token == "FamilySpecified" {
            Ok(BocoClassification::FamilySpecified)
        } else if token.starts_with("BC") {
            Ok(BocoClassification::Direct)
        } else {
            Err(MeshFileError::ParseError {
                line,
                message: format!("unknown boundary classification: {}", token),
            })
        }
    }
}

#[derive(Debug)]
struct Base {
    name: String,
    cell_dimension: usize,
    physical_dimension: usize,
}

#[derive(Debug)]
struct Zone {
    name: String,
    n_vertices: usize,
    n_cells: usize,
}

#[derive(Debug)]
struct Section {
    name: String,
    kind: ElementKind,
    data: Vec<u32>,
}

#[derive(Debug)]
struct BoundaryRecord {
    name: String,
    classification: BocoClassification,
    family: Option<String>,
    points: Vec<u32>,
}

#[derive(Debug)]
struct Family {
    name: String,
    bc_type: String,
}

/// One open mesh-interchange file.
///
/// The whole document is parsed on [`MeshFile::open`]; queries never fail on
/// I/O afterwards, only on out-of-range indices. The underlying resources are
/// released when the value is dropped.
#[derive(Debug)]
pub struct MeshFile {
    bases: Vec<Base>,
    zones: Vec<Zone>,
    coordinates: [Vec<f64>; 3],
    sections: Vec<Section>,
    boundary_conditions: Vec<BoundaryRecord>,
    families: Vec<Family>,
}

impl MeshFile {
    /// Open and parse a mesh-interchange file.
    pub fn open(path: &Path) -> Result<Self, MeshFileError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self, MeshFileError> {
        let mut bases = Vec::new();
        let mut zones = Vec::new();
        let mut coordinates: [Vec<f64>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        let mut sections = Vec::new();
        let mut boundary_conditions = Vec::new();
        let mut families = Vec::new();

        let mut lines = content.lines().enumerate();
        while let Some((index, raw)) = lines.next() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line {
                "$MeshFormat" => {
                    for (_, entry) in block_body(&mut lines, "$EndMeshFormat")? {
                        let version = entry.split_whitespace().next().unwrap_or(entry);
                        if !version.starts_with("1.") {
                            return Err(MeshFileError::UnsupportedVersion(version.to_string()));
                        }
                    }
                }
                "$Base" => {
                    for (no, entry) in block_body(&mut lines, "$EndBase")? {
                        bases.push(parse_base(entry, no)?);
                    }
                }
                "$Zone" => {
                    for (no, entry) in block_body(&mut lines, "$EndZone")? {
                        zones.push(parse_zone(entry, no)?);
                    }
                }
                "$Coordinates" => {
                    for (no, entry) in block_body(&mut lines, "$EndCoordinates")? {
                        let vertex = parse_vertex(entry, no)?;
                        coordinates[0].push(vertex[0]);
                        coordinates[1].push(vertex[1]);
                        coordinates[2].push(vertex[2]);
                    }
                }
                "$Section" => {
                    sections.push(parse_section(block_body(&mut lines, "$EndSection")?)?);
                }
                "$BoundaryCondition" => {
                    boundary_conditions.push(parse_boundary_condition(block_body(
                        &mut lines,
                        "$EndBoundaryCondition",
                    )?)?);
                }
                "$Family" => {
                    for (no, entry) in block_body(&mut lines, "$EndFamily")? {
                        families.push(parse_family(entry, no)?);
                    }
                }
                _ => {
                    return Err(MeshFileError::ParseError {
                        line: index + 1,
                        message: format!("unexpected content outside block: {}", line),
                    });
                }
            }
        }

        if zones.is_empty() {
            return Err(MeshFileError::MissingBlock("Zone"));
        }

        Ok(Self {
            bases,
            zones,
            coordinates,
            sections,
            boundary_conditions,
            families,
        })
    }

    /// Number of bases stored in the file.
    pub fn n_bases(&self) -> usize {
        self.bases.len()
    }

    /// Name and cell/physical dimensions declared by a base.
    pub fn base_info(&self, base: usize) -> Result<(&str, usize, usize), MeshFileError> {
        let base = self.bases.get(base).ok_or(MeshFileError::OutOfRange {
            entity: "base",
            index: base,
        })?;
        Ok((&base.name, base.cell_dimension, base.physical_dimension))
    }

    /// Number of zones stored in the file.
    pub fn n_zones(&self) -> usize {
        self.zones.len()
    }

    /// Name of a zone.
    pub fn zone_name(&self, zone: usize) -> Result<&str, MeshFileError> {
        let zone = self.zones.get(zone).ok_or(MeshFileError::OutOfRange {
            entity: "zone",
            index: zone,
        })?;
        Ok(&zone.name)
    }

    /// Vertex and cell counts declared by a zone.
    pub fn zone_size(&self, zone: usize) -> Result<(usize, usize), MeshFileError> {
        let zone = self
            .zones
            .get(zone)
            .ok_or(MeshFileError::OutOfRange {
                entity: "zone",
                index: zone,
            })?;
        Ok((zone.n_vertices, zone.n_cells))
    }

    /// Number of topological sections.
    pub fn n_sections(&self) -> usize {
        self.sections.len()
    }

    /// Name of a section.
    pub fn section_name(&self, section: usize) -> Result<&str, MeshFileError> {
        Ok(&self.section(section)?.name)
    }

    /// Element kind stored by a section.
    pub fn section_kind(&self, section: usize) -> Result<ElementKind, MeshFileError> {
        Ok(self.section(section)?.kind)
    }

    /// Total length of a section's flat element-data buffer.
    pub fn element_data_size(&self, section: usize) -> Result<usize, MeshFileError> {
        Ok(self.section(section)?.data.len())
    }

    /// A section's flat element-data buffer (1-based vertex ids, verbatim).
    pub fn element_data(&self, section: usize) -> Result<&[u32], MeshFileError> {
        Ok(&self.section(section)?.data)
    }

    /// Read one axis of the coordinate block over the 1-based inclusive vertex
    /// id range `[first, last]`.
    pub fn coordinates(
        &self,
        axis: Axis,
        first: usize,
        last: usize,
    ) -> Result<&[f64], MeshFileError> {
        let block = &self.coordinates[axis as usize];
        if first == 0 || last < first || last > block.len() {
            return Err(MeshFileError::OutOfRange {
                entity: "coordinate",
                index: last,
            });
        }
        Ok(&block[first - 1..last])
    }

    /// Number of boundary-condition records.
    pub fn n_boundary_conditions(&self) -> usize {
        self.boundary_conditions.len()
    }

    /// Name, classification and point count of a boundary-condition record.
    pub fn boco_info(
        &self,
        boundary: usize,
    ) -> Result<(&str, BocoClassification, usize), MeshFileError> {
        let record = self.boundary_condition(boundary)?;
        Ok((&record.name, record.classification, record.points.len()))
    }

    /// Family a boundary-condition record resolves through, if any.
    pub fn boco_family(&self, boundary: usize) -> Result<Option<&str>, MeshFileError> {
        Ok(self.boundary_condition(boundary)?.family.as_deref())
    }

    /// Point/element ids attached to a boundary-condition record.
    pub fn boco_points(&self, boundary: usize) -> Result<&[u32], MeshFileError> {
        Ok(&self.boundary_condition(boundary)?.points)
    }

    /// Number of family definitions.
    pub fn n_families(&self) -> usize {
        self.families.len()
    }

    /// Boundary-condition type token of a named family, if the family exists.
    pub fn family_bc_type(&self, family: &str) -> Option<&str> {
        self.families
            .iter()
            .find(|f| f.name == family)
            .map(|f| f.bc_type.as_str())
    }

    fn section(&self, section: usize) -> Result<&Section, MeshFileError> {
        self.sections.get(section).ok_or(MeshFileError::OutOfRange {
            entity: "section",
            index: section,
        })
    }

    fn boundary_condition(&self, boundary: usize) -> Result<&BoundaryRecord, MeshFileError> {
        self.boundary_conditions
            .get(boundary)
            .ok_or(MeshFileError::OutOfRange {
                entity: "boundary condition",
                index: boundary,
            })
    }
}

/// Collect the non-comment lines of a block up to its end marker.
///
/// Returned line numbers are 1-based for error reporting.
fn block_body<'a, I>(lines: &mut I, end: &'static str) -> Result<Vec<(usize, &'a str)>, MeshFileError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut body = Vec::new();
    for (index, raw) in lines.by_ref() {
        let line = raw.trim();
        if line == end {
            return Ok(body);
        }
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        body.push((index + 1, line));
    }
    Err(MeshFileError::ParseError {
        line: 0,
        message: format!("unterminated block, expected {}", end),
    })
}

fn parse_base(entry: &str, line: usize) -> Result<Base, MeshFileError> {
    let tokens: Vec<&str> = entry.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(MeshFileError::ParseError {
            line,
            message: format!("expected 'name cell_dim phys_dim', got: {}", entry),
        });
    }
    Ok(Base {
        name: tokens[0].to_string(),
        cell_dimension: parse_number(tokens[1], line, "cell dimension")?,
        physical_dimension: parse_number(tokens[2], line, "physical dimension")?,
    })
}

fn parse_zone(entry: &str, line: usize) -> Result<Zone, MeshFileError> {
    let tokens: Vec<&str> = entry.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(MeshFileError::ParseError {
            line,
            message: format!("expected 'name n_vertices n_cells', got: {}", entry),
        });
    }
    Ok(Zone {
        name: tokens[0].to_string(),
        n_vertices: parse_number(tokens[1], line, "vertex count")?,
        n_cells: parse_number(tokens[2], line, "cell count")?,
    })
}

fn parse_vertex(entry: &str, line: usize) -> Result<[f64; 3], MeshFileError> {
    let tokens: Vec<&str> = entry.split_whitespace().collect();
    if tokens.len() < 2 || tokens.len() > 3 {
        return Err(MeshFileError::ParseError {
            line,
            message: format!("expected 'x y [z]', got: {}", entry),
        });
    }
    let mut vertex = [0.0; 3];
    for (component, token) in vertex.iter_mut().zip(&tokens) {
        *component = token.parse().map_err(|_| MeshFileError::ParseError {
            line,
            message: format!("invalid coordinate: {}", token),
        })?;
    }
    Ok(vertex)
}

fn parse_section(body: Vec<(usize, &str)>) -> Result<Section, MeshFileError> {
    let Some(((line, header), data_lines)) = body.split_first() else {
        return Err(MeshFileError::ParseError {
            line: 0,
            message: "empty section block".to_string(),
        });
    };
    let tokens: Vec<&str> = header.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(MeshFileError::ParseError {
            line: *line,
            message: format!("expected 'name element_kind', got: {}", header),
        });
    }
    let kind = ElementKind::parse(tokens[1], *line)?;

    let mut data = Vec::new();
    for (no, entry) in data_lines {
        for token in entry.split_whitespace() {
            data.push(parse_number(token, *no, "vertex id")? as u32);
        }
    }
    Ok(Section {
        name: tokens[0].to_string(),
        kind,
        data,
    })
}

fn parse_boundary_condition(body: Vec<(usize, &str)>) -> Result<BoundaryRecord, MeshFileError> {
    if body.len() < 2 {
        return Err(MeshFileError::ParseError {
            line: body.first().map(|(no, _)| *no).unwrap_or(0),
            message: "boundary condition block needs a header and a point count".to_string(),
        });
    }
    let (header_line, header) = body[0];
    let tokens: Vec<&str> = header.split_whitespace().collect();
    if tokens.len() < 2 || tokens.len() > 3 {
        return Err(MeshFileError::ParseError {
            line: header_line,
            message: format!("expected 'name classification [family]', got: {}", header),
        });
    }
    let classification = BocoClassification::parse(tokens[1], header_line)?;

    let (count_line, count_entry) = body[1];
    let declared: usize = parse_number(count_entry.trim(), count_line, "point count")?;

    let mut points = Vec::with_capacity(declared);
    for (no, entry) in &body[2..] {
        for token in entry.split_whitespace() {
            points.push(parse_number(token, *no, "point id")? as u32);
        }
    }
    if points.len() != declared {
        return Err(MeshFileError::ParseError {
            line: count_line,
            message: format!(
                "boundary condition declares {} points but stores {}",
                declared,
                points.len()
            ),
        });
    }

    Ok(BoundaryRecord {
        name: tokens[0].to_string(),
        classification,
        family: tokens.get(2).map(|s| s.to_string()),
        points,
    })
}

fn parse_family(entry: &str, line: usize) -> Result<Family, MeshFileError> {
    let tokens: Vec<&str> = entry.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(MeshFileError::ParseError {
            line,
            message: format!("expected 'name bc_type', got: {}", entry),
        });
    }
    Ok(Family {
        name: tokens[0].to_string(),
        bc_type: tokens[1].to_string(),
    })
}

fn parse_number(token: &str, line: usize, what: &str) -> Result<usize, MeshFileError> {
    token.parse().map_err(|_| MeshFileError::ParseError {
        line,
        message: format!("invalid {}: {}", what, token),
    })
}

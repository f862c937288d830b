//! # odre-core: Transmission Line Geometry Reconstruction
//!
//! Rebuilds the ground path of every electrical line of a transmission grid from the
//! unordered line segments published by the open-data portal, and anchors each path
//! to the substations at its two ends.
//!
//! ## Design Philosophy
//!
//! Each line is modeled as an **undirected multigraph** where:
//! - **Nodes**: coordinates (exact `f64` identity, no tolerance)
//! - **Edges**: reported segments (duplicates are kept and raise the degree)
//!
//! A line whose graph is a simple chain becomes one ordered polyline. A line split
//! into several chains is stitched from its two most significant pieces. Anything
//! with branches or loops is treated as malformed and discarded with a diagnostic.
//!
//! ## Quick Start
//!
//! ```rust
//! use odre_core::{columns, parse_lines, parse_substations, RowSet};
//!
//! let mut substations = RowSet::new(vec![
//!     columns::SUBSTATION_ID.to_string(),
//!     columns::SUBSTATION_LON.to_string(),
//!     columns::SUBSTATION_LAT.to_string(),
//! ]);
//! substations.push(vec!["CAIN".into(), "1.0".into(), "0.0".into()]);
//!
//! let mut aerial = RowSet::new(vec![
//!     columns::LINE_IDS[0].to_string(),
//!     columns::SEGMENT_START_LON.to_string(),
//!     columns::SEGMENT_START_LAT.to_string(),
//!     columns::SEGMENT_END_LON.to_string(),
//!     columns::SEGMENT_END_LAT.to_string(),
//! ]);
//! aerial.push(vec!["CAIN  L1RAMBO".into(), "1".into(), "1".into(), "5".into(), "1".into()]);
//!
//! let lookup = parse_substations(&substations).unwrap();
//! let import = parse_lines(&aerial, &RowSet::default(), &lookup).unwrap();
//! assert_eq!(import.lines.len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`distance`] - Spherical great-circle distance in meters
//! - [`rows`] - Header-aware decoded rows and segment extraction
//! - [`line_graph`] - Per-line multigraph, components, endpoints, path order
//! - [`stitching`] - Fragment selection and concatenation
//! - [`association`] - Substation-to-path-end matching
//! - [`parser`] - Batch orchestration of the above
//! - [`diagnostics`] - Per-line issues and batch statistics

use serde::{Deserialize, Serialize};

pub mod association;
pub mod diagnostics;
pub mod distance;
pub mod error;
pub mod line_graph;
pub mod parser;
pub mod rows;
pub mod stitching;

pub use association::{associate_substations, SubstationPair};
pub use diagnostics::{DiagnosticIssue, Diagnostics, IssueCategory, ReconstructionStats, Severity};
pub use distance::{distance, distance_between, EARTH_RADIUS_M};
pub use error::{OdreError, OdreResult};
pub use line_graph::{ComponentShape, LineGraph};
pub use parser::{
    parse_lines, parse_lines_with, parse_substations, parse_substations_with, LineImport,
    ParserOptions,
};
pub use rows::{columns, Row, RowSet, SegmentRow};
pub use stitching::{aggregate_fragments, chord_length, STUB_THRESHOLD_PERCENT};

/// Country code applied when no other is configured.
pub const DEFAULT_COUNTRY: &str = "FR";

/// A geographic position in decimal degrees.
///
/// Equality is exact on both fields. Two positions that differ only by rounding
/// are different vertices of a line graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Coordinate { lat, lon }
    }
}

/// A substation as published by the open-data portal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstationGeoData {
    pub id: String,
    pub country: String,
    pub coordinate: Coordinate,
}

impl SubstationGeoData {
    pub fn new(id: impl Into<String>, country: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            country: country.into(),
            coordinate,
        }
    }
}

/// A reconstructed line path with its (possibly undetermined) end substations.
///
/// `substation_start` and `substation_end` are empty strings when the end could not
/// be attributed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineGeoData {
    pub id: String,
    pub country1: String,
    pub country2: String,
    pub substation_start: String,
    pub substation_end: String,
    pub coordinates: Vec<Coordinate>,
}

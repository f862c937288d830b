//! Batch orchestration: substations first, then every line of the aerial and
//! underground extracts.
//!
//! Graphs are built per call from the complete batch and dropped at the end; no
//! state survives between calls.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::association::{associate_substations, AssociationOutcome};
use crate::diagnostics::{Diagnostics, IssueCategory, ReconstructionStats};
use crate::error::{OdreError, OdreResult};
use crate::line_graph::{add_segments, LineGraph};
use crate::rows::{columns, RowSet};
use crate::stitching::aggregate_fragments;
use crate::{Coordinate, LineGeoData, SubstationGeoData, DEFAULT_COUNTRY};

/// Knobs of the parser that are policy rather than data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Country code written on every substation and on both ends of every line
    pub country: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

/// Result of [`parse_lines`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct LineImport {
    pub lines: BTreeMap<String, LineGeoData>,
    pub stats: ReconstructionStats,
    pub diagnostics: Diagnostics,
}

pub fn parse_substations(rows: &RowSet) -> OdreResult<BTreeMap<String, SubstationGeoData>> {
    parse_substations_with(rows, &ParserOptions::default())
}

/// Build the substation lookup. The first row of a duplicated id wins.
pub fn parse_substations_with(
    rows: &RowSet,
    options: &ParserOptions,
) -> OdreResult<BTreeMap<String, SubstationGeoData>> {
    let start = Instant::now();
    let mut substations = BTreeMap::new();
    let mut count = 0;

    for (i, row) in rows.iter().enumerate() {
        let row_number = i + 1;
        if !row.has_column(columns::SUBSTATION_ID) {
            return Err(OdreError::MissingColumn {
                column: columns::SUBSTATION_ID.to_string(),
            });
        }
        // a row shorter than the header has no id cell
        let id = row.get(columns::SUBSTATION_ID).unwrap_or_default();
        let lon = row.parse_f64(columns::SUBSTATION_LON, row_number)?;
        let lat = row.parse_f64(columns::SUBSTATION_LAT, row_number)?;
        count += 1;
        if id.trim().is_empty() {
            warn!("substation without id at row {}, skipped", row_number);
            continue;
        }
        substations.entry(id.to_string()).or_insert_with(|| {
            SubstationGeoData::new(id, options.country.clone(), Coordinate::new(lat, lon))
        });
    }

    info!(
        "{} substations read in {} ms",
        count,
        start.elapsed().as_millis()
    );
    Ok(substations)
}

pub fn parse_lines(
    aerial: &RowSet,
    underground: &RowSet,
    substations: &BTreeMap<String, SubstationGeoData>,
) -> OdreResult<LineImport> {
    parse_lines_with(aerial, underground, substations, &ParserOptions::default())
}

/// Reconstruct every line named in the aerial and underground segment rows.
///
/// Aborts only on malformed numeric data. Lines with unsupported topology or an
/// unusable id are left out of the result and counted in the returned stats.
pub fn parse_lines_with(
    aerial: &RowSet,
    underground: &RowSet,
    substations: &BTreeMap<String, SubstationGeoData>,
    options: &ParserOptions,
) -> OdreResult<LineImport> {
    let start = Instant::now();

    let mut graphs: BTreeMap<String, LineGraph> = BTreeMap::new();
    let aerial_segments = add_segments(&mut graphs, aerial)?;
    let underground_segments = add_segments(&mut graphs, underground)?;
    debug!(
        "{} aerial and {} underground segments spread over {} lines",
        aerial_segments,
        underground_segments,
        graphs.len()
    );

    let mut import = LineImport::default();
    import.stats.total_lines = graphs.len();

    for (line_id, graph) in &graphs {
        let Some(coordinates) =
            reconstruct_path(line_id, graph, &mut import.stats, &mut import.diagnostics)
        else {
            continue;
        };

        let pair = match associate_substations(substations, line_id, &coordinates) {
            Ok(pair) => pair,
            Err(OdreError::ShortIdentifier(_)) => {
                import.stats.short_identifier_discarded += 1;
                import.diagnostics.add_error(
                    IssueCategory::ShortIdentifier,
                    "identifier too short to carry substation codes",
                    line_id,
                );
                continue;
            }
            Err(other) => return Err(other),
        };

        match &pair.outcome {
            AssociationOutcome::Resolved => {}
            AssociationOutcome::Ambiguous { nearest } => {
                import.stats.ambiguous_associations += 1;
                import.diagnostics.add_error(
                    IssueCategory::AmbiguousAssociation,
                    &format!("both ends are nearest to {nearest}"),
                    line_id,
                );
            }
            AssociationOutcome::Partial { missing } => {
                import.stats.missing_substations += 1;
                import.diagnostics.add_warning(
                    IssueCategory::MissingSubstation,
                    &format!("substation '{missing}' not found"),
                    line_id,
                );
            }
            AssociationOutcome::NoneFound => {
                import.stats.missing_substations += 1;
                import.diagnostics.add_warning(
                    IssueCategory::MissingSubstation,
                    "no substation found",
                    line_id,
                );
            }
        }

        import.lines.insert(
            line_id.clone(),
            LineGeoData {
                id: line_id.clone(),
                country1: options.country.clone(),
                country2: options.country.clone(),
                substation_start: pair.start,
                substation_end: pair.end,
                coordinates,
            },
        );
    }
    import.stats.reconstructed = import.lines.len();

    let stats = &import.stats;
    info!(
        "{} lines read in {} ms",
        stats.reconstructed,
        start.elapsed().as_millis()
    );
    info!(
        "{} lines have one connected set, {} of them were discarded",
        stats.single_component, stats.single_component_discarded
    );
    info!(
        "{} lines have two or more connected sets, {} of them were discarded",
        stats.multi_component, stats.multi_component_discarded
    );
    if stats.discarded() > 0 {
        warn!(
            "Total discarded lines : {}/{}",
            stats.discarded(),
            stats.total_lines
        );
    }

    Ok(import)
}

/// Ordered path of one line, or `None` when its topology is unsupported.
fn reconstruct_path(
    line_id: &str,
    graph: &LineGraph,
    stats: &mut ReconstructionStats,
    diagnostics: &mut Diagnostics,
) -> Option<Vec<Coordinate>> {
    let components = graph.components();

    if let [component] = components.as_slice() {
        stats.single_component += 1;
        let path = graph.linearize(component);
        if path.is_none() {
            stats.single_component_discarded += 1;
            diagnostics.add_error(
                IssueCategory::MalformedComponent,
                &format!(
                    "single component with {} endpoints",
                    graph.endpoints(component).len()
                ),
                line_id,
            );
        }
        return path;
    }

    stats.multi_component += 1;
    let mut fragments = Vec::with_capacity(components.len());
    for (i, component) in components.iter().enumerate() {
        let Some(fragment) = graph.linearize(component) else {
            stats.multi_component_discarded += 1;
            diagnostics.add_error(
                IssueCategory::MalformedComponent,
                &format!(
                    "component {} of {} has {} endpoints",
                    i + 1,
                    components.len(),
                    graph.endpoints(component).len()
                ),
                line_id,
            );
            return None;
        };
        fragments.push(fragment);
    }
    Some(aggregate_fragments(fragments))
}

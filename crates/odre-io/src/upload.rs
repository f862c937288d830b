//! Validation of uploaded CSV tables before anything is pushed.

use odre_core::{
    parse_lines_with, parse_substations_with, LineGeoData, LineImport, OdreResult,
    ParserOptions, RowSet, SubstationGeoData,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dataset::{classify_tables, detect_kind, ClassifiedTables, DatasetKind};

pub const SUBSTATIONS_INVALID: &str = "File validation failed!";
pub const LINES_INVALID: &str = "File(s) validation failed!";
pub const SUBSTATIONS_UPDATED: &str = "List of substations updated successfully";
pub const LINES_UPDATED: &str = "List of lines updated successfully";

/// Outcome reported for an upload, with an HTTP-style status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: u16,
    pub message: String,
}

impl UploadResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            status: 200,
            message: message.to_string(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self {
            status: 400,
            message: message.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Substations of an uploaded table, `None` when the table is not a substation
/// extract or yields nothing.
pub fn substations_from_upload(
    table: &RowSet,
    options: &ParserOptions,
) -> OdreResult<Option<Vec<SubstationGeoData>>> {
    if detect_kind(table) != Some(DatasetKind::Substations) {
        warn!("uploaded file is not a substation extract");
        return Ok(None);
    }
    let substations = parse_substations_with(table, options)?;
    if substations.is_empty() {
        return Ok(None);
    }
    Ok(Some(substations.into_values().collect()))
}

/// Lines reconstructed from a batch of uploaded tables.
///
/// All three extracts must be present; `None` otherwise or when no line survives.
pub fn lines_from_upload<I>(tables: I, options: &ParserOptions) -> OdreResult<Option<LineImport>>
where
    I: IntoIterator<Item = RowSet>,
{
    let classified = classify_tables(tables);
    if !classified.is_complete() {
        warn!(
            "uploaded files cover {} of the {} extracts",
            classified.len(),
            DatasetKind::ALL.len()
        );
        return Ok(None);
    }
    let ClassifiedTables {
        substations: Some(substations),
        aerial: Some(aerial),
        underground: Some(underground),
        ..
    } = classified
    else {
        return Ok(None);
    };

    let lookup = parse_substations_with(&substations, options)?;
    let import = parse_lines_with(&aerial, &underground, &lookup, options)?;
    if import.lines.is_empty() {
        return Ok(None);
    }
    Ok(Some(import))
}

/// Owned line list in output order.
pub fn line_list(import: LineImport) -> Vec<LineGeoData> {
    import.lines.into_values().collect()
}

//! Header-aware decoded rows and segment extraction.
//!
//! Decoding files is someone else's job; this module only sees rows that already
//! went through a CSV reader, addressed by the column labels of the source dataset.

use crate::error::{OdreError, OdreResult};
use crate::Coordinate;

/// Column labels of the published extracts.
pub mod columns {
    pub const SUBSTATION_ID: &str = "Code poste";
    pub const SUBSTATION_LON: &str = "Longitude poste (DD)";
    pub const SUBSTATION_LAT: &str = "Latitude poste (DD)";

    pub const LINE_IDS: [&str; 5] = [
        "Code ligne 1",
        "Code ligne 2",
        "Code ligne 3",
        "Code ligne 4",
        "Code ligne 5",
    ];

    pub const SEGMENT_START_LON: &str = "Longitude début segment (DD)";
    pub const SEGMENT_START_LAT: &str = "Latitude début segment (DD)";
    pub const SEGMENT_END_LON: &str = "Longitude arrivée segment (DD)";
    pub const SEGMENT_END_LAT: &str = "Latitude arrivée segment (DD)";

    /// Present in line extracts only (`AERIEN` / `SOUTERRAIN`)
    pub const STRUCTURE_TYPE: &str = "Type ouvrage";

    pub const SUBSTATION_HEADERS: [&str; 3] = [SUBSTATION_ID, SUBSTATION_LON, SUBSTATION_LAT];

    pub const SEGMENT_HEADERS: [&str; 4] = [
        SEGMENT_START_LON,
        SEGMENT_START_LAT,
        SEGMENT_END_LON,
        SEGMENT_END_LAT,
    ];
}

/// A batch of decoded rows sharing one header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    headers: Vec<String>,
    records: Vec<Vec<String>>,
}

impl RowSet {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            records: Vec::new(),
        }
    }

    pub fn from_records(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        Self { headers, records }
    }

    pub fn push(&mut self, values: Vec<String>) {
        self.records.push(values);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether every one of `columns` appears in the header.
    pub fn has_columns(&self, columns: &[&str]) -> bool {
        columns
            .iter()
            .all(|column| self.headers.iter().any(|h| h == column))
    }

    pub fn first(&self) -> Option<Row<'_>> {
        self.iter().next()
    }

    pub fn iter(&self) -> impl Iterator<Item = Row<'_>> {
        self.records.iter().map(move |values| Row {
            headers: &self.headers,
            values,
        })
    }
}

/// One decoded row, addressed by column label.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    headers: &'a [String],
    values: &'a [String],
}

impl<'a> Row<'a> {
    /// Cell under `column`; `None` if the header lacks it or the row is short.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let index = self.headers.iter().position(|h| h == column)?;
        self.values.get(index).map(String::as_str)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// Parse a decimal cell. `row` is the 1-based data row used in the error.
    pub fn parse_f64(&self, column: &str, row: usize) -> OdreResult<f64> {
        if !self.has_column(column) {
            return Err(OdreError::MissingColumn {
                column: column.to_string(),
            });
        }
        let raw = self.get(column).unwrap_or_default();
        raw.trim()
            .parse::<f64>()
            .map_err(|_| OdreError::UnparsableCoordinate {
                column: column.to_string(),
                value: raw.to_string(),
                row,
            })
    }
}

/// One reported segment with the line ids it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRow {
    pub line_ids: Vec<String>,
    pub start: Coordinate,
    pub end: Coordinate,
}

impl SegmentRow {
    /// Extract a segment from a row.
    ///
    /// Returns `Ok(None)` when the row carries no line id; coordinates of such rows
    /// are never parsed.
    pub fn from_row(row: &Row<'_>, row_number: usize) -> OdreResult<Option<SegmentRow>> {
        let line_ids: Vec<String> = columns::LINE_IDS
            .iter()
            .filter_map(|column| row.get(column))
            .filter(|id| !id.trim().is_empty())
            .map(str::to_string)
            .collect();
        if line_ids.is_empty() {
            return Ok(None);
        }

        let start = Coordinate::new(
            row.parse_f64(columns::SEGMENT_START_LAT, row_number)?,
            row.parse_f64(columns::SEGMENT_START_LON, row_number)?,
        );
        let end = Coordinate::new(
            row.parse_f64(columns::SEGMENT_END_LAT, row_number)?,
            row.parse_f64(columns::SEGMENT_END_LON, row_number)?,
        );
        Ok(Some(SegmentRow {
            line_ids,
            start,
            end,
        }))
    }
}

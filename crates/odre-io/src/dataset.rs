//! Dataset kinds of the open-data portal and detection of uploaded tables.
//!
//! The portal publishes three extracts. Uploaded files carry no reliable name, so
//! their kind is recovered from the header and from the `Type ouvrage` cell of the
//! first record.

use odre_core::{columns, OdreError, OdreResult, RowSet};

/// One of the three published extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DatasetKind {
    /// Substation positions
    Substations,
    /// Segments of overhead lines
    AerialLines,
    /// Segments of underground cables
    UndergroundLines,
}

/// Dataset tags as used in the portal URLs.
pub const DATASETS: &[(&str, DatasetKind)] = &[
    ("postes-electriques", DatasetKind::Substations),
    ("lignes-aeriennes", DatasetKind::AerialLines),
    ("lignes-souterraines", DatasetKind::UndergroundLines),
];

/// `Type ouvrage` value of aerial segments.
pub const AERIAL_STRUCTURE: &str = "AERIEN";
/// `Type ouvrage` value of underground segments.
pub const UNDERGROUND_STRUCTURE: &str = "SOUTERRAIN";

const CSV_CONTENT_TYPE: &str = "text/csv";

impl DatasetKind {
    pub const ALL: &'static [DatasetKind] = &[
        DatasetKind::Substations,
        DatasetKind::AerialLines,
        DatasetKind::UndergroundLines,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            DatasetKind::Substations => "postes-electriques",
            DatasetKind::AerialLines => "lignes-aeriennes",
            DatasetKind::UndergroundLines => "lignes-souterraines",
        }
    }

    pub fn from_tag(tag: &str) -> OdreResult<Self> {
        DATASETS
            .iter()
            .find(|(known, _)| *known == tag)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| OdreError::UnknownDataset(tag.to_string()))
    }

    /// Human-readable name.
    pub fn friendly_name(&self) -> &'static str {
        match self {
            DatasetKind::Substations => "substations",
            DatasetKind::AerialLines => "aerial lines",
            DatasetKind::UndergroundLines => "underground lines",
        }
    }

    /// Path of the CSV export on the portal, relative to its base URL.
    pub fn download_path(&self) -> String {
        format!("/explore/dataset/{}-rte/download/", self.tag())
    }

    fn required_headers(&self) -> &'static [&'static str] {
        match self {
            DatasetKind::Substations => &columns::SUBSTATION_HEADERS,
            DatasetKind::AerialLines | DatasetKind::UndergroundLines => &columns::SEGMENT_HEADERS,
        }
    }
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for DatasetKind {
    type Err = OdreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

/// Recognize an uploaded table, `None` if it matches no extract.
///
/// An empty `Type ouvrage` cell counts as absent.
pub fn detect_kind(rows: &RowSet) -> Option<DatasetKind> {
    let first = rows.first()?;
    let structure = first
        .get(columns::STRUCTURE_TYPE)
        .map(str::trim)
        .filter(|value| !value.is_empty());
    let kind = match structure {
        None => DatasetKind::Substations,
        Some(AERIAL_STRUCTURE) => DatasetKind::AerialLines,
        Some(UNDERGROUND_STRUCTURE) => DatasetKind::UndergroundLines,
        Some(_) => return None,
    };
    rows.has_columns(kind.required_headers()).then_some(kind)
}

/// Uploaded tables sorted by kind.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedTables {
    pub substations: Option<RowSet>,
    pub aerial: Option<RowSet>,
    pub underground: Option<RowSet>,
    /// Tables that matched no extract
    pub unrecognized: usize,
}

impl ClassifiedTables {
    /// Number of kinds found
    pub fn len(&self) -> usize {
        [
            self.substations.is_some(),
            self.aerial.is_some(),
            self.underground.is_some(),
        ]
        .iter()
        .filter(|found| **found)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_complete(&self) -> bool {
        self.len() == DatasetKind::ALL.len()
    }
}

/// Sort a batch of uploaded tables by kind.
///
/// The first substation table is kept; a later line table of the same kind replaces
/// an earlier one.
pub fn classify_tables<I>(tables: I) -> ClassifiedTables
where
    I: IntoIterator<Item = RowSet>,
{
    let mut classified = ClassifiedTables::default();
    for table in tables {
        match detect_kind(&table) {
            Some(DatasetKind::Substations) => {
                if classified.substations.is_none() {
                    classified.substations = Some(table);
                }
            }
            Some(DatasetKind::AerialLines) => classified.aerial = Some(table),
            Some(DatasetKind::UndergroundLines) => classified.underground = Some(table),
            None => classified.unrecognized += 1,
        }
    }
    classified
}

/// Whether a MIME content type designates CSV. Parameters such as `charset` are ignored.
pub fn is_csv_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(CSV_CONTENT_TYPE))
        .unwrap_or(false)
}

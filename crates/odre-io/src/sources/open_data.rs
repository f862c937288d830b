use std::collections::BTreeMap;

use anyhow::{anyhow, Context, Result};
use odre_core::{
    parse_lines_with, parse_substations_with, LineImport, ParserOptions, RowSet,
    SubstationGeoData,
};
use tracing::{info, warn};

use crate::csv_reader::read_rows;
use crate::dataset::{is_csv_content_type, DatasetKind};

/// Public portal the extracts are published on.
pub const DEFAULT_OPEN_DATA_URL: &str = "https://opendata.reseaux-energies.fr";

/// Open-data portal client - downloads the published CSV extracts
pub struct OpenDataClient {
    /// Base URL of the portal, without trailing slash
    base_url: String,
}

impl OpenDataClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the CSV export of `kind`.
    pub fn download_url(&self, kind: DatasetKind) -> String {
        format!("{}{}?format=csv", self.base_url, kind.download_path())
    }

    /// Download and decode one extract.
    pub fn download(&self, kind: DatasetKind) -> Result<RowSet> {
        let url = self.download_url(kind);
        let response = ureq::get(&url)
            .call()
            .with_context(|| format!("Failed to download {} from {}", kind.friendly_name(), url))?;

        if response.status() != 200 {
            return Err(anyhow!(
                "open data portal returned status {} for {}",
                response.status(),
                kind
            ));
        }
        if !is_csv_content_type(response.content_type()) {
            warn!(
                "{} served as '{}', decoding as CSV anyway",
                kind,
                response.content_type()
            );
        }

        let rows = read_rows(response.into_reader())
            .with_context(|| format!("Failed to decode {}", kind.friendly_name()))?;
        info!(
            "{} were downloaded from the open data server ({} rows)",
            kind.friendly_name(),
            rows.len()
        );
        Ok(rows)
    }

    /// Download the substation extract and build the lookup.
    pub fn substations(&self, options: &ParserOptions) -> Result<BTreeMap<String, SubstationGeoData>> {
        let rows = self.download(DatasetKind::Substations)?;
        Ok(parse_substations_with(&rows, options)?)
    }

    /// Download all three extracts and reconstruct every line.
    pub fn lines(&self, options: &ParserOptions) -> Result<LineImport> {
        let underground = self.download(DatasetKind::UndergroundLines)?;
        let aerial = self.download(DatasetKind::AerialLines)?;
        let substations = self.substations(options)?;
        Ok(parse_lines_with(&aerial, &underground, &substations, options)?)
    }
}

impl Default for OpenDataClient {
    fn default() -> Self {
        Self::new(DEFAULT_OPEN_DATA_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_data_client_init() {
        let client = OpenDataClient::new("https://example.org/");
        assert_eq!(client.base_url(), "https://example.org");
        assert_eq!(OpenDataClient::default().base_url(), DEFAULT_OPEN_DATA_URL);
    }

    #[test]
    fn test_download_url() {
        let client = OpenDataClient::default();
        assert_eq!(
            client.download_url(DatasetKind::Substations),
            "https://opendata.reseaux-energies.fr/explore/dataset/postes-electriques-rte/download/?format=csv"
        );
    }

    #[test]
    fn test_unreachable_portal_is_an_error() {
        let client = OpenDataClient::new("http://127.0.0.1:9");
        let err = client.download(DatasetKind::AerialLines).unwrap_err();
        assert!(err.to_string().contains("aerial lines"));
    }
}

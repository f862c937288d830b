//! Geo-data server client.
//!
//! The server stores substation and line geometry. It takes the whole list of each in
//! one JSON `POST` and answers with an empty body.

use anyhow::{Context, Result};
use odre_core::{LineGeoData, ParserOptions, RowSet, SubstationGeoData};
use serde::Serialize;
use tracing::info;

use crate::upload::{
    line_list, lines_from_upload, substations_from_upload, UploadResponse, LINES_INVALID,
    LINES_UPDATED, SUBSTATIONS_INVALID, SUBSTATIONS_UPDATED,
};

pub const DEFAULT_GEO_DATA_URL: &str = "http://geo-data-server/";
pub const DEFAULT_API_VERSION: &str = "v1";

pub struct GeoDataClient {
    base_url: String,
    api_version: String,
}

impl GeoDataClient {
    pub fn new(base_url: impl Into<String>, api_version: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_version: api_version.into(),
        }
    }

    /// URL of `resource`, with exactly one slash between each part.
    pub fn endpoint(&self, resource: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version.trim_matches('/'),
            resource.trim_start_matches('/')
        )
    }

    fn post_json<T: Serialize + ?Sized>(&self, resource: &str, body: &T) -> Result<()> {
        let url = self.endpoint(resource);
        ureq::post(&url)
            .send_json(body)
            .with_context(|| format!("Failed to push {} to {}", resource, url))?;
        Ok(())
    }

    pub fn push_substations(&self, substations: &[SubstationGeoData]) -> Result<()> {
        self.post_json("substations", substations)?;
        info!("{} substations pushed to the geo data server", substations.len());
        Ok(())
    }

    pub fn push_lines(&self, lines: &[LineGeoData]) -> Result<()> {
        self.post_json("lines", lines)?;
        info!("{} lines pushed to the geo data server", lines.len());
        Ok(())
    }

    /// Validate an uploaded substation table and push it.
    ///
    /// An unrecognized or empty table gets a 400 response without contacting the
    /// server.
    pub fn upload_substations(
        &self,
        table: &RowSet,
        options: &ParserOptions,
    ) -> Result<UploadResponse> {
        let Some(substations) = substations_from_upload(table, options)? else {
            return Ok(UploadResponse::bad_request(SUBSTATIONS_INVALID));
        };
        self.push_substations(&substations)?;
        Ok(UploadResponse::ok(SUBSTATIONS_UPDATED))
    }

    /// Validate a batch of uploaded tables, reconstruct the lines and push them.
    pub fn upload_lines(&self, tables: Vec<RowSet>, options: &ParserOptions) -> Result<UploadResponse> {
        let Some(import) = lines_from_upload(tables, options)? else {
            return Ok(UploadResponse::bad_request(LINES_INVALID));
        };
        self.push_lines(&line_list(import))?;
        Ok(UploadResponse::ok(LINES_UPDATED))
    }
}

impl Default for GeoDataClient {
    fn default() -> Self {
        Self::new(DEFAULT_GEO_DATA_URL, DEFAULT_API_VERSION)
    }
}

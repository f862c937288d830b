//! Upload of local CSV files to the geo-data server.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use odre_core::RowSet;
use odre_io::{read_rows_from_path, UploadResponse};
use tracing::{info, warn};

use crate::commands::output::write_json;
use odre_cli::OdreConfig;

pub fn substations(config: &OdreConfig, csv: &Path) -> Result<()> {
    let table = read_rows_from_path(csv)?;
    let response = config
        .geo_data_client()
        .upload_substations(&table, &config.parser)?;
    report(response)
}

pub fn lines(config: &OdreConfig, files: &[PathBuf]) -> Result<()> {
    let tables = files
        .iter()
        .map(|path| read_rows_from_path(path))
        .collect::<Result<Vec<RowSet>>>()?;
    info!("validating {} uploaded files", tables.len());
    let response = config
        .geo_data_client()
        .upload_lines(tables, &config.parser)?;
    report(response)
}

/// Print the response; a rejected upload makes the command fail.
fn report(response: UploadResponse) -> Result<()> {
    write_json(&response, None)?;
    if !response.is_success() {
        warn!("upload rejected: {}", response.message);
        bail!("{} ({})", response.message, response.status);
    }
    Ok(())
}

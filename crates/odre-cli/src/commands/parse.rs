//! Reconstruction from local extracts.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use odre_core::{parse_lines_with, parse_substations_with, LineGeoData, SubstationGeoData};
use odre_io::read_rows_from_path;
use tracing::info;

use crate::commands::output::{print_stats, write_json};
use odre_cli::OdreConfig;

pub fn substations(config: &OdreConfig, csv: &Path, out: Option<&Path>) -> Result<()> {
    let rows = read_rows_from_path(csv)?;
    let substations = parse_substations_with(&rows, &config.parser)?;
    let list: Vec<&SubstationGeoData> = substations.values().collect();
    write_json(&list, out)
}

pub fn lines(
    config: &OdreConfig,
    aerial: &Path,
    underground: &Path,
    substations: &Path,
    out: Option<&Path>,
    stats: bool,
) -> Result<()> {
    let start = Instant::now();
    let substation_rows = read_rows_from_path(substations)?;
    let aerial_rows = read_rows_from_path(aerial)?;
    let underground_rows = read_rows_from_path(underground)?;
    info!(
        "read {} substation, {} aerial and {} underground rows",
        substation_rows.len(),
        aerial_rows.len(),
        underground_rows.len()
    );

    let lookup = parse_substations_with(&substation_rows, &config.parser)?;
    let import = parse_lines_with(&aerial_rows, &underground_rows, &lookup, &config.parser)?;
    let list: Vec<&LineGeoData> = import.lines.values().collect();
    write_json(&list, out)?;
    if stats {
        print_stats(&import);
    }
    info!("lines command finished in {:.2?}", start.elapsed());
    Ok(())
}

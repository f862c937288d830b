//! Download from the open-data portal, optionally pushing to the geo-data server.

use std::path::Path;

use anyhow::Result;
use odre_core::{LineGeoData, SubstationGeoData};

use crate::commands::output::{print_stats, write_json};
use odre_cli::OdreConfig;

pub fn substations(config: &OdreConfig, push: bool, out: Option<&Path>) -> Result<()> {
    let substations = config.open_data_client().substations(&config.parser)?;
    let list: Vec<SubstationGeoData> = substations.into_values().collect();
    if push {
        config.geo_data_client().push_substations(&list)
    } else {
        write_json(&list, out)
    }
}

pub fn lines(config: &OdreConfig, push: bool, out: Option<&Path>, stats: bool) -> Result<()> {
    let import = config.open_data_client().lines(&config.parser)?;
    if stats {
        print_stats(&import);
    }
    let list: Vec<LineGeoData> = import.lines.into_values().collect();
    if push {
        config.geo_data_client().push_lines(&list)
    } else {
        write_json(&list, out)
    }
}

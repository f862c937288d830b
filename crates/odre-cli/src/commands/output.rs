use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use odre_core::LineImport;
use serde::Serialize;

/// Pretty JSON to `out`, or to stdout when no path is given.
pub fn write_json<T: Serialize + ?Sized>(value: &T, out: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serializing output")?;
    match out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{text}")?;
        }
    }
    Ok(())
}

/// Batch counters and diagnostics, on stderr so stdout stays valid JSON.
pub fn print_stats(import: &LineImport) {
    let stats = &import.stats;
    eprintln!("Reconstruction statistics:");
    eprintln!("  Lines seen            : {}", stats.total_lines);
    eprintln!("  Reconstructed         : {}", stats.reconstructed);
    eprintln!(
        "  One connected set     : {} ({} discarded)",
        stats.single_component, stats.single_component_discarded
    );
    eprintln!(
        "  Several connected sets: {} ({} discarded)",
        stats.multi_component, stats.multi_component_discarded
    );
    eprintln!("  Short identifiers     : {}", stats.short_identifier_discarded);
    eprintln!("  Ambiguous ends        : {}", stats.ambiguous_associations);
    eprintln!("  Missing substations   : {}", stats.missing_substations);
    eprintln!("  Discarded             : {}", stats.discarded());
    for issue in &import.diagnostics.issues {
        eprintln!("  {issue}");
    }
}

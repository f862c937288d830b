//! Decoding of the semicolon-separated extracts into [`RowSet`]s.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use odre_core::RowSet;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(b';')
        .quote(b'"')
        .flexible(true)
        .has_headers(true);
    builder
}

/// Decode a whole CSV document. The first record is the header.
pub fn read_rows<R: Read>(mut reader: R) -> Result<RowSet> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .context("reading CSV input")?;
    read_rows_from_bytes(&bytes)
}

/// Decode an in-memory CSV document, dropping a leading UTF-8 byte order mark.
pub fn read_rows_from_bytes(bytes: &[u8]) -> Result<RowSet> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut rdr = reader_builder().from_reader(body);

    let headers: Vec<String> = rdr
        .headers()
        .context("reading CSV header")?
        .iter()
        .map(str::to_string)
        .collect();
    let mut rows = RowSet::new(headers);
    for (i, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("parsing CSV record {}", i + 1))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

pub fn read_rows_from_path(path: &Path) -> Result<RowSet> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_rows(BufReader::new(file)).with_context(|| format!("decoding {}", path.display()))
}

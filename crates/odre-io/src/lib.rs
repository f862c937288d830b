//! # odre-io: Open-Data Extract I/O
//!
//! Everything around the reconstruction engine that touches bytes or the network:
//! decoding the semicolon-separated extracts, recognizing which extract an uploaded
//! table is, downloading from the open-data portal and pushing results to the
//! geo-data server.
//!
//! ## Quick Start: Reconstruct From Local Extracts
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use odre_core::{parse_lines, parse_substations};
//! use odre_io::csv_reader::read_rows_from_path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let substations = read_rows_from_path(Path::new("postes-electriques-rte.csv"))?;
//!     let aerial = read_rows_from_path(Path::new("lignes-aeriennes-rte.csv"))?;
//!     let underground = read_rows_from_path(Path::new("lignes-souterraines-rte.csv"))?;
//!
//!     let lookup = parse_substations(&substations)?;
//!     let import = parse_lines(&aerial, &underground, &lookup)?;
//!     println!("Lines: {}", import.lines.len());
//!     println!("Discarded: {}", import.stats.discarded());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`csv_reader`] - `;`-delimited decoding into header-aware row tables
//! - [`dataset`] - Extract kinds, portal paths, upload detection
//! - [`upload`] - Validation of uploaded tables and upload responses
//! - [`sources`] - Open-data portal download client (feature `native-io`)
//! - [`sink`] - Geo-data server push client (feature `native-io`)

pub mod csv_reader;
pub mod dataset;
pub mod upload;

#[cfg(feature = "native-io")]
pub mod sink;
#[cfg(feature = "native-io")]
pub mod sources;

pub use csv_reader::{read_rows, read_rows_from_bytes, read_rows_from_path};
pub use dataset::{classify_tables, detect_kind, is_csv_content_type, DatasetKind, DATASETS};
pub use upload::UploadResponse;

#[cfg(feature = "native-io")]
pub use sink::GeoDataClient;
#[cfg(feature = "native-io")]
pub use sources::OpenDataClient;

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "odre", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: tracing::Level,

    /// Configuration file (defaults to ~/.odre/config.toml when present)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a substation extract and print it as JSON
    Substations {
        /// Substation CSV extract
        #[arg(value_hint = ValueHint::FilePath)]
        csv: PathBuf,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Reconstruct line paths from local extracts and print them as JSON
    Lines {
        /// Aerial line segments CSV
        #[arg(long, value_hint = ValueHint::FilePath)]
        aerial: PathBuf,
        /// Underground line segments CSV
        #[arg(long, value_hint = ValueHint::FilePath)]
        underground: PathBuf,
        /// Substation CSV extract
        #[arg(long, value_hint = ValueHint::FilePath)]
        substations: PathBuf,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Print reconstruction statistics and diagnostics to stderr
        #[arg(long)]
        stats: bool,
    },
    /// Validate uploaded CSV files and push them to the geo-data server
    PushCsv {
        #[command(subcommand)]
        command: PushCsvCommands,
    },
    /// Download the public extracts from the open-data portal
    Fetch {
        #[command(subcommand)]
        command: FetchCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum PushCsvCommands {
    /// Push a substation extract
    Substations {
        #[arg(value_hint = ValueHint::FilePath)]
        csv: PathBuf,
    },
    /// Push lines rebuilt from the substation, aerial and underground extracts, in any order
    Lines {
        #[arg(required = true, num_args = 1.., value_hint = ValueHint::FilePath)]
        files: Vec<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FetchCommands {
    /// Download substations
    Substations {
        /// Push to the geo-data server instead of printing
        #[arg(long)]
        push: bool,
        /// Write output to a file instead of stdout
        #[arg(short, long, conflicts_with = "push")]
        out: Option<PathBuf>,
    },
    /// Download all three extracts and reconstruct the lines
    Lines {
        /// Push to the geo-data server instead of printing
        #[arg(long)]
        push: bool,
        /// Write output to a file instead of stdout
        #[arg(short, long, conflicts_with = "push")]
        out: Option<PathBuf>,
        /// Print reconstruction statistics and diagnostics to stderr
        #[arg(long)]
        stats: bool,
    },
}

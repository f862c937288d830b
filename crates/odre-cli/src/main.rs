use anyhow::Context;
use clap::Parser;
use odre_cli::{Cli, Commands, FetchCommands, OdreConfig, PushCsvCommands};
use tracing::debug;
use tracing_subscriber::FmtSubscriber;

mod commands;

use crate::commands::{fetch, parse, push};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let config = OdreConfig::load(cli.config.as_deref())?;
    debug!("configuration: {:?}", config);

    match &cli.command {
        Commands::Substations { csv, out } => parse::substations(&config, csv, out.as_deref()),
        Commands::Lines {
            aerial,
            underground,
            substations,
            out,
            stats,
        } => parse::lines(
            &config,
            aerial,
            underground,
            substations,
            out.as_deref(),
            *stats,
        ),
        Commands::PushCsv { command } => match command {
            PushCsvCommands::Substations { csv } => push::substations(&config, csv),
            PushCsvCommands::Lines { files } => push::lines(&config, files),
        },
        Commands::Fetch { command } => match command {
            FetchCommands::Substations { push, out } => {
                fetch::substations(&config, *push, out.as_deref())
            }
            FetchCommands::Lines { push, out, stats } => {
                fetch::lines(&config, *push, out.as_deref(), *stats)
            }
        },
    }
}

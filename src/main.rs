//! Command line front-end for the isoroute engine

mod config;
mod error;
mod isochrone;
mod model;
mod routing;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(name = "isoroute", version, about = "Routing and isochrones over a regional road network")]
struct Cli {
    /// TOML configuration file with a `[network]` table
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Network snapshot (GeoJSON or CSV), overrides the configured path
    #[arg(long, global = true)]
    network: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `isoroute_core=trace`
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the available travel modes as JSON
    Modes,
    /// Shortest path between two points
    Route(routing::RouteArgs),
    /// Isochrone polygons around a point
    Isochrone(isochrone::IsochroneArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let app_config = match cli.config.as_deref().map(AppConfig::from_file).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(cli.log_level.as_deref(), app_config.log_level.as_deref());

    match run(&cli, &app_config) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// `--log-level` wins over `RUST_LOG`, which wins over the config file
fn init_logging(cli_level: Option<&str>, config_level: Option<&str>) {
    let filter = cli_level
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(config_level.unwrap_or("info")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli, app_config: &AppConfig) -> Result<String, CliError> {
    match &cli.command {
        Command::Modes => model::modes_json(),
        Command::Route(args) => {
            let network = model::load_network(app_config, cli.network.as_deref())?;
            routing::run(&network, args)
        }
        Command::Isochrone(args) => {
            let network = model::load_network(app_config, cli.network.as_deref())?;
            isochrone::run(&network, args)
        }
    }
}

//! Air-quality point extraction CLI.
//!
//! Extracts a pollutant value at a point from local satellite granules and
//! maps it onto the air-quality index:
//! - `point`: try granules in order, report the first valid value
//! - `inspect`: print a granule's group/variable tree and resolved layout
//! - `index`: compute the index for a value directly

mod credential;
mod opener;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use aq_common::PollutantKind;
use point_extractor::{Extractor, ExtractorConfig, GranuleRef};
use tempo_parser::{describe, resolve, NetCdfGranule, VariableCatalog};

use credential::EnvCredential;
use opener::LocalFileOpener;

#[derive(Parser, Debug)]
#[command(name = "aq-extract")]
#[command(about = "Point extraction and air-quality index lookup for satellite granules")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the value nearest a point from candidate granules, in order
    Point {
        /// Candidate granule files, most preferred first
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Target latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Target longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Pollutant (NO2, O3, HCHO or a product name)
        #[arg(short, long, default_value = "NO2")]
        pollutant: String,

        /// YAML file extending the built-in variable catalog
        #[arg(long, env = "AQ_CATALOG")]
        catalog: Option<PathBuf>,

        /// Override the attempt cap
        #[arg(long)]
        max_attempts: Option<usize>,

        /// Require valid Earthdata credentials before extracting
        #[arg(
            long,
            env = "AQ_REQUIRE_AUTH",
            value_parser = clap::builder::BoolishValueParser::new()
        )]
        require_auth: bool,
    },

    /// Print a granule's structure and resolved layout
    Inspect {
        /// Granule file
        file: PathBuf,
    },

    /// Compute the air-quality index for a value
    Index {
        /// Pollutant (NO2, O3, HCHO or a product name)
        #[arg(short, long, default_value = "NO2")]
        pollutant: String,

        /// Value in the pollutant's reporting unit
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.json_logs)?;

    tempo_parser::silence_hdf5_errors();

    match args.command {
        Command::Point {
            files,
            lat,
            lon,
            pollutant,
            catalog,
            max_attempts,
            require_auth,
        } => {
            let mut config = ExtractorConfig::from_env();
            config.require_credentials = require_auth;
            if let Some(n) = max_attempts {
                config.max_attempts = n;
            }

            let catalog = match catalog {
                Some(path) => VariableCatalog::from_yaml_file(&path)
                    .with_context(|| format!("loading catalog {}", path.display()))?,
                None => VariableCatalog::builtin(),
            };

            let extractor = Extractor::new(
                LocalFileOpener,
                Arc::new(EnvCredential::from_env()),
                config,
            )?
            .with_catalog(catalog);

            let pollutant = PollutantKind::from(pollutant);
            let candidates: Vec<GranuleRef> = files
                .iter()
                .map(|p| GranuleRef::local(p.display().to_string()))
                .collect();

            info!(
                pollutant = %pollutant,
                lat,
                lon,
                candidates = candidates.len(),
                "Starting point extraction"
            );

            let result = extractor.extract_at(lat, lon, &candidates, &pollutant)?;
            let index = aqi::index_for(&pollutant, result.value().map(|v| v.value));

            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "pollutant": pollutant,
                    "latitude": lat,
                    "longitude": lon,
                    "result": result,
                    "index": index,
                }))?
            );
        }

        Command::Inspect { file } => {
            let granule = NetCdfGranule::open(&file)
                .with_context(|| format!("opening {}", file.display()))?;
            print!("{}", describe(&granule)?);
            match resolve(&granule) {
                Ok(layout) => println!(
                    "layout: {} (measurements in {}, coordinates {}/{} in {})",
                    layout.kind,
                    layout.measurement,
                    layout.coordinates.latitude,
                    layout.coordinates.longitude,
                    layout.coordinates.container
                ),
                Err(e) => println!("layout: unresolved ({})", e),
            }
        }

        Command::Index { pollutant, value } => {
            let pollutant = PollutantKind::from(pollutant);
            let index = aqi::index_for(&pollutant, Some(value));
            println!("{}", serde_json::to_string_pretty(&index)?);
        }
    }

    Ok(())
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Logs go to stderr so stdout stays parseable.
fn init_tracing(level: &str, json: bool) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_max_level(parse_level(level))
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

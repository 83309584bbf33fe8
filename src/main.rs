use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, warn};

use maritime_lte::api::{DatasetLoader, LoadedDataset};
use maritime_lte::config::{DatasetConfig, FileConfig};
use maritime_lte::domain::GeoPoint;
use maritime_lte::geojson::boundaries_to_geojson;
use maritime_lte::logging::init_logging;
use maritime_lte::reception::{DistanceMode, ReceptionOptions, evaluate_reception_with};
use maritime_lte::service::{ReceptionRequest, check_reception, handle_request};

/// Check maritime LTE coverage by distance from the coastline
///
/// Examples:
///   # Check a position in the Norwegian Sea against the built-in coastline
///   maritime-lte check --lat 65.0 --lon 0.0
///
///   # Use the Natural Earth land dataset (downloaded) with land detection
///   maritime-lte --fetch check --lat 59.9139 --lon 10.7522
///
///   # Write the 12 km offshore boundary as GeoJSON
///   maritime-lte boundary -o boundary.geojson
///
///   # Run the HTTP-style contract on a request body
///   maritime-lte request '{"latitude": 62.0, "longitude": 4.0}'
#[derive(Parser, Debug)]
#[command(name = "maritime-lte")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches maritime-lte.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Land-mass GeoJSON file (Polygon/MultiPolygon features)
    #[arg(long, global = true)]
    land: Option<PathBuf>,

    /// Download the land-mass dataset when no file is given
    #[arg(long, global = true)]
    fetch: bool,

    /// Minimum distance from the coast for reception, in meters
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// Distance measurement: vertex or segment
    #[arg(long, global = true, value_enum)]
    distance_mode: Option<DistanceMode>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check reception at a position
    Check {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Print the service JSON response instead of text
        #[arg(long)]
        json: bool,
    },

    /// Write offshore boundary lines as GeoJSON
    Boundary {
        /// Offset from the coastline in meters
        #[arg(long)]
        distance: Option<f64>,

        /// Output file (defaults to stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Handle a raw JSON request body `{"latitude": .., "longitude": ..}`
    Request { body: String },
}

struct Settings {
    options: ReceptionOptions,
    boundary_distance_m: f64,
    dataset: DatasetConfig,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => FileConfig::load_from(path)?,
        None => FileConfig::load().unwrap_or_default(),
    };

    init_logging(args.verbose || file_config.verbose);
    let settings = resolve_settings(&args, file_config)?;

    let loaded = load_dataset(settings.dataset.clone());

    match &args.command {
        Command::Check { lat, lon, json } => run_check(*lat, *lon, *json, &loaded, &settings),
        Command::Boundary { distance, output } => run_boundary(
            distance.unwrap_or(settings.boundary_distance_m),
            output.as_ref(),
            &loaded,
        ),
        Command::Request { body } => {
            let reply = handle_request(body, &loaded.dataset, &settings.options);
            debug!(status = reply.status, "Handled request");
            println!("{}", reply.body);
            Ok(())
        }
    }
}

fn resolve_settings(args: &Args, file_config: FileConfig) -> Result<Settings> {
    let threshold_m = args.threshold.unwrap_or(file_config.threshold_m);
    if !threshold_m.is_finite() || threshold_m < 0.0 {
        bail!("--threshold must be a non-negative number of meters");
    }
    let mode = args.distance_mode.unwrap_or(file_config.distance_mode);

    let mut dataset = file_config.dataset.unwrap_or_default();
    if let Some(land) = &args.land {
        dataset.path = Some(land.clone());
    }
    dataset.fetch = dataset.fetch || args.fetch;

    Ok(Settings {
        options: ReceptionOptions::default()
            .with_threshold(threshold_m)
            .with_mode(mode),
        boundary_distance_m: file_config.boundary_distance_m,
        dataset,
    })
}

fn load_dataset(config: DatasetConfig) -> LoadedDataset {
    let spinner = create_spinner("Loading coastline data...");
    let start = Instant::now();
    let loaded = DatasetLoader::spawn(config).wait();
    spinner.finish_with_message(format!(
        "Coastline: {} ({} reference points, {} land rings) [{:.1}s]",
        loaded.source,
        loaded.dataset.coastline().len(),
        loaded.dataset.land().len(),
        start.elapsed().as_secs_f32()
    ));
    loaded
}

fn run_check(
    lat: f64,
    lon: f64,
    json: bool,
    loaded: &LoadedDataset,
    settings: &Settings,
) -> Result<()> {
    if json {
        let request = ReceptionRequest {
            latitude: Some(lat.into()),
            longitude: Some(lon.into()),
        };
        let body = match check_reception(&request, &loaded.dataset, &settings.options) {
            Ok(response) => serde_json::to_string_pretty(&response)?,
            Err(error) => serde_json::to_string_pretty(&error)?,
        };
        println!("{}", body);
        return Ok(());
    }

    let query = GeoPoint::new(lat, lon).context("Invalid position")?;
    println!("Position: {:.6}, {:.6}", query.latitude(), query.longitude());

    match evaluate_reception_with(&query, &loaded.dataset, &settings.options) {
        Ok(verdict) => {
            println!("Distance to coast: {:.2}km", verdict.distance_km());
            let status = if verdict.on_land {
                "On land - no LTE coverage"
            } else if verdict.in_zone {
                "LTE reception available"
            } else {
                "Outside reception zone"
            };
            println!("Status: {}", status);
            println!("{}", verdict.message);
        }
        Err(e) => {
            warn!(code = e.code() as u32, "Reception check failed: {}", e);
            println!("Status: Unable to determine reception status");
        }
    }

    Ok(())
}

fn run_boundary(distance_m: f64, output: Option<&PathBuf>, loaded: &LoadedDataset) -> Result<()> {
    if !distance_m.is_finite() || distance_m < 0.0 {
        bail!("--distance must be a non-negative number of meters");
    }

    let boundaries = loaded
        .dataset
        .offshore_boundaries(distance_m)
        .context("Failed to generate offshore boundary")?;
    let geojson = serde_json::to_string_pretty(&boundaries_to_geojson(&boundaries, distance_m))?;

    match output {
        Some(path) => {
            std::fs::write(path, geojson)
                .with_context(|| format!("Failed to write boundary to {:?}", path))?;
            println!(
                "Wrote {} boundary line(s) at {:.0}m to {}",
                boundaries.len(),
                distance_m,
                path.display()
            );
        }
        None => println!("{}", geojson),
    }

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

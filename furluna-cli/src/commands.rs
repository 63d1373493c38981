//! CLI command implementations

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};
use furluna_core::config::MissingRegionPolicy;
use furluna_core::geo::{Coordinate, SearchRadius};
use furluna_core::{FurlunaConfig, RuntimeMode};
use furluna_search::HospitalFinder;
use furluna_web::{ListingRefresher, run_server};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Server {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
        /// Directory holding the site's pages and assets
        #[arg(long)]
        public_dir: Option<PathBuf>,
        /// Do not refresh the hospital listing
        #[arg(long)]
        no_refresh: bool,
    },
    /// Refresh the hospital listing once and exit
    Refresh {
        #[command(flatten)]
        location: LocationArgs,
        /// Page to patch
        #[arg(long)]
        target: Option<PathBuf>,
        /// Insert the listing region when the page lacks one
        #[arg(long)]
        append_missing: bool,
    },
    /// Search for nearby hospitals and print them
    Search {
        #[command(flatten)]
        location: LocationArgs,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Search location overrides
#[derive(Args)]
pub struct LocationArgs {
    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lng: Option<f64>,
    /// Search radius in meters
    #[arg(long)]
    radius: Option<u32>,
}

impl LocationArgs {
    fn apply(&self, config: &mut FurlunaConfig) -> anyhow::Result<()> {
        let current = config.listing.coordinate;
        config.listing.coordinate = Coordinate::new(
            self.lat.unwrap_or(current.latitude()),
            self.lng.unwrap_or(current.longitude()),
        )?;
        if let Some(meters) = self.radius {
            config.listing.radius = SearchRadius::new(meters)?;
        }
        Ok(())
    }
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands, demo: bool) -> anyhow::Result<()> {
    let mut config = FurlunaConfig::from_env().context("invalid configuration")?;
    if demo {
        config.runtime_mode = RuntimeMode::Development;
    }

    match command {
        Commands::Server {
            host,
            port,
            public_dir,
            no_refresh,
        } => start_server(config, host, port, public_dir, no_refresh).await,
        Commands::Refresh {
            location,
            target,
            append_missing,
        } => {
            location.apply(&mut config)?;
            if let Some(target) = target {
                config.listing.target_file = target;
            }
            if append_missing {
                config.listing.missing_region = MissingRegionPolicy::Append;
            }
            refresh_listing(config).await
        }
        Commands::Search { location, json } => {
            location.apply(&mut config)?;
            search_hospitals(config, json).await
        }
    }
}

/// Start the web server
///
/// # Errors
/// - `ServerError` - Setup, bind or serve failure
pub async fn start_server(
    mut config: FurlunaConfig,
    host: Option<String>,
    port: Option<u16>,
    public_dir: Option<PathBuf>,
    no_refresh: bool,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(public_dir) = public_dir {
        // The listing page lives in the public directory unless set explicitly
        if config.listing.target_file == config.server.public_dir.join("schedule_appt.html") {
            config.listing.target_file = public_dir.join("schedule_appt.html");
        }
        config.server.public_dir = public_dir;
    }

    println!(
        "Furluna running on http://{} ({} mode)",
        config.bind_address(),
        config.runtime_mode
    );
    run_server(config, !no_refresh).await?;
    Ok(())
}

/// Refresh the hospital listing once
///
/// # Errors
/// - `RefreshError::Search` - Places client setup failed
/// - `RefreshError::Patch` - Target page missing or without listing region
pub async fn refresh_listing(config: FurlunaConfig) -> anyhow::Result<()> {
    let target = config.listing.target_file.clone();
    let refresher = ListingRefresher::from_config(&config)?;
    let report = refresher
        .refresh()
        .await
        .with_context(|| format!("failed to refresh {}", target.display()))?;

    if let Some(error) = &report.search_error {
        println!("Hospital search failed: {error}");
    }
    match report.patch {
        Some(outcome) => println!(
            "{}: {:?} with {} hospitals ({} bytes)",
            target.display(),
            outcome.action,
            report.places,
            outcome.bytes
        ),
        None => println!("{}: left unchanged", target.display()),
    }
    Ok(())
}

/// Search for hospitals and print them
///
/// # Errors
/// - `PlaceSearchError` - Search request failed
pub async fn search_hospitals(config: FurlunaConfig, json: bool) -> anyhow::Result<()> {
    let finder = HospitalFinder::from_config(&config)?;
    let coordinate = config.listing.coordinate;
    let radius = config.listing.radius;
    let places = finder.try_find(coordinate, radius).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&places)?);
        return Ok(());
    }

    println!("Veterinary hospitals within {radius} of {coordinate}");
    println!("{:-<60}", "");
    if places.is_empty() {
        println!("No hospitals found.");
    }
    for (index, place) in places.iter().enumerate() {
        let photo = if place.has_photo() { "photo" } else { "no photo" };
        println!("{:>2}. {} ({photo})", index + 1, place.name);
    }
    Ok(())
}

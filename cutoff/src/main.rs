//! Shipping cutoff board CLI.
//!
//! Thin host around the `cutoff` library: it injects the clock and the
//! geolocation answer, then prints the computed board. Rendering here is
//! plain text or JSON; styling belongs to richer hosts.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use cutoff::board::{BoardView, Suggestion, evaluate, suggestion};
use cutoff::core::catalog::Catalog;
use cutoff::core::geo::Coordinate;
use cutoff::io::clock::{Clock, SystemClock};
use cutoff::io::config::{load_catalog, write_catalog};
use cutoff::io::location::{GeoOutcome, location_request};
use cutoff::io::ticker::{REFRESH_INTERVAL, RefreshTicker};

#[derive(Parser)]
#[command(name = "cutoff", version, about = "Warehouse shipping cutoff board")]
struct Cli {
    /// Catalog TOML override; the compiled-in catalog is used when the
    /// file is missing.
    #[arg(long, global = true, default_value = "catalog.toml")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print cutoff statuses, clocks, and notes for one warehouse.
    Board {
        /// Warehouse code to show.
        #[arg(long, default_value = "NY")]
        region: String,

        #[command(flatten)]
        device: DeviceArgs,

        /// Evaluate at a fixed RFC 3339 instant instead of the system clock.
        #[arg(long)]
        at: Option<String>,

        /// Emit the view model as JSON on stdout.
        #[arg(long)]
        json: bool,
    },
    /// Resolve the warehouse nearest to a device coordinate.
    Nearest {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Check the catalog against its semantic invariants.
    Validate,
    /// Write the compiled-in catalog as an editable TOML file.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// Re-render the board at a fixed interval until killed.
    Watch {
        /// Warehouse code to show.
        #[arg(long, default_value = "NY")]
        region: String,

        /// Seconds between refreshes.
        #[arg(long, default_value_t = REFRESH_INTERVAL.as_secs())]
        interval_secs: u64,

        /// Stop after this many renders.
        #[arg(long)]
        count: Option<u64>,
    },
}

/// Stand-in for the host platform's one-shot location callback.
#[derive(Args)]
struct DeviceArgs {
    /// Device latitude for the nearest-warehouse suggestion.
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Device longitude for the nearest-warehouse suggestion.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Simulate a denied geolocation request.
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    denied: bool,
}

impl DeviceArgs {
    /// The answer the simulated host would deliver, if any.
    fn outcome(&self) -> Result<Option<GeoOutcome>> {
        if self.denied {
            return Ok(Some(GeoOutcome::Denied));
        }
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(Some(GeoOutcome::Fix(Coordinate::new(lat, lon)?))),
            _ => Ok(None),
        }
    }
}

/// JSON envelope for `board --json`.
#[derive(Serialize)]
struct BoardReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<Suggestion>,
    board: BoardView,
}

fn main() {
    cutoff::logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Board {
            region,
            device,
            at,
            json,
        } => cmd_board(&cli.catalog, &region, &device, at.as_deref(), json),
        Command::Nearest { lat, lon } => cmd_nearest(&cli.catalog, lat, lon),
        Command::Validate => cmd_validate(&cli.catalog),
        Command::Init { force } => cmd_init(&cli.catalog, force),
        Command::Watch {
            region,
            interval_secs,
            count,
        } => cmd_watch(&cli.catalog, &region, interval_secs, count),
    }
}

fn cmd_board(
    catalog_path: &Path,
    region: &str,
    device: &DeviceArgs,
    at: Option<&str>,
    json: bool,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let now = resolve_now(at)?;
    let view = evaluate(&catalog, region, now)?;

    // One-shot location callback: answered from CLI flags, or dropped when
    // the device offers nothing. Either way the request resolves exactly
    // once.
    let (reply, request) = location_request();
    match device.outcome()? {
        Some(outcome) => reply.fulfill(outcome),
        None => drop(reply),
    }
    let suggested = suggestion(&catalog, request.wait())?;

    if json {
        let report = BoardReport {
            suggestion: suggested,
            board: view,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    render_text(&view, suggested.as_ref());
    Ok(())
}

fn cmd_nearest(catalog_path: &Path, lat: f64, lon: f64) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let point = Coordinate::new(lat, lon)?;
    let Some(nearest) = suggestion(&catalog, GeoOutcome::Fix(point))? else {
        bail!("no suggestion for an acquired fix");
    };
    println!(
        "Closest warehouse: {} ({}), {} miles away",
        nearest.name, nearest.code, nearest.miles
    );
    Ok(())
}

fn cmd_validate(catalog_path: &Path) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    println!(
        "catalog ok: {} warehouses, {} schedules",
        catalog.warehouses.len(),
        catalog.schedules.len()
    );
    Ok(())
}

fn cmd_init(catalog_path: &Path, force: bool) -> Result<()> {
    if catalog_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            catalog_path.display()
        );
    }
    write_catalog(catalog_path, &Catalog::builtin())?;
    println!("wrote {}", catalog_path.display());
    Ok(())
}

fn cmd_watch(catalog_path: &Path, region: &str, interval_secs: u64, count: Option<u64>) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let clock = SystemClock;

    render_text(&evaluate(&catalog, region, clock.now())?, None);
    let mut rendered: u64 = 1;

    let ticker = RefreshTicker::start(Duration::from_secs(interval_secs))?;
    loop {
        if count.is_some_and(|count| rendered >= count) {
            return Ok(());
        }
        ticker
            .ticks()
            .recv()
            .context("refresh ticker stopped unexpectedly")?;
        println!();
        render_text(&evaluate(&catalog, region, clock.now())?, None);
        rendered += 1;
    }
}

/// Fixed instant from `--at`, otherwise the system clock.
fn resolve_now(at: Option<&str>) -> Result<DateTime<Utc>> {
    match at {
        Some(raw) => {
            let parsed = DateTime::parse_from_rfc3339(raw)
                .with_context(|| format!("parse instant '{raw}' (expected RFC 3339)"))?;
            Ok(parsed.with_timezone(&Utc))
        }
        None => Ok(SystemClock.now()),
    }
}

fn render_text(view: &BoardView, suggested: Option<&Suggestion>) {
    println!("{} [{}]", view.warehouse, view.region);
    println!("Local time: {}", view.clock);
    if let Some(nearest) = suggested {
        println!(
            "Closest warehouse detected: {} ({} miles away)",
            nearest.name, nearest.miles
        );
    }
    for method in &view.methods {
        println!();
        println!("{}", method.title);
        for detail in &method.details {
            println!("    {detail}");
        }
        for reading in &method.readings {
            match reading.status {
                Some(status) => println!(
                    "  {}  {}  {}",
                    reading.cutoff,
                    status.label(),
                    status.css_color()
                ),
                None => println!("  {}  unavailable", reading.cutoff),
            }
        }
        for note in &method.notes {
            println!("  - {note}");
        }
    }
}

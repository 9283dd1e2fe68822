//! Phase viewer
//!
//! Draws the phase of a body as seen from a city at a given date, using
//! positions from an ephemeris snapshot. Without arguments it shows the
//! Moon over Paris on 2013/3/16 21:00:00 UTC from the bundled snapshot.
//!
//! Usage:
//!   cargo run --bin phase_view -- [--city Paris] [--date "2013/3/16 21:00:00"]
//!       [--body Moon] [--snapshot positions.json] [--output phase.svg] [--preview]

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::{info, warn};
use nalgebra::Point2;
use phaseview::constants::{ARCSEC_PER_DISPLAY_UNIT, DEFAULT_SILHOUETTE_STEPS};
use phaseview::ephemeris::{CoordinateMode, Ephemeris, SnapshotEphemeris};
use phaseview::phase::{draw_object_phase, PhaseStyle};
use phaseview::render::{self, raster, svg, Figure};
use phaseview::{Body, Observer, Time};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Phase viewer
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Draws the illuminated phase of a solar system body seen from Earth",
    long_about = None
)]
struct Args {
    /// Built-in observing site (an unknown name lists the available ones)
    #[arg(long, default_value = "Paris")]
    city: String,

    /// Observer latitude in degrees (overrides --city, needs --longitude)
    #[arg(long, requires = "longitude", allow_hyphen_values = true)]
    latitude: Option<f64>,

    /// Observer longitude in degrees, east positive
    #[arg(long, requires = "latitude", allow_hyphen_values = true)]
    longitude: Option<f64>,

    /// Observer elevation in metres (defaults to the site's, or 0 with --latitude)
    #[arg(long, allow_hyphen_values = true)]
    elevation: Option<f64>,

    /// Observation date (UTC), e.g. "2013/3/16 21:00:00"
    #[arg(long, default_value = "2013/3/16 21:00:00")]
    date: String,

    /// Body to draw
    #[arg(long, default_value = "Moon")]
    body: Body,

    /// Coordinates for the terminator angle: astrometric, apparent or topocentric
    #[arg(long, default_value = "topocentric")]
    mode: CoordinateMode,

    /// JSON ephemeris snapshot (defaults to the bundled Paris 2013/3/16 snapshot)
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// SVG file to write
    #[arg(short, long, default_value = "phase.svg")]
    output: PathBuf,

    /// SVG width in pixels
    #[arg(long, default_value_t = 800)]
    width: usize,

    /// SVG height in pixels
    #[arg(long, default_value_t = 800)]
    height: usize,

    /// Print an ASCII preview to the terminal
    #[arg(short, long, action = ArgAction::SetTrue)]
    preview: bool,

    /// Sampling steps per half disk
    #[arg(long, default_value_t = DEFAULT_SILHOUETTE_STEPS)]
    resolution: usize,

    /// Colour of the unlit disk (grey level, #rrggbb or name)
    #[arg(long, default_value = "0.2")]
    unlit_color: String,

    /// Colour of the lit region
    #[arg(long, default_value = "0.85")]
    lit_color: String,

    /// Plot background colour
    #[arg(long, default_value = "0.1")]
    background: String,
}

fn observer_from_args(args: &Args, date: Time) -> Result<Observer> {
    let mut observer = match (args.latitude, args.longitude) {
        (Some(lat), Some(lon)) => Observer::new("Custom", lat, lon, 0.0, date),
        _ => Observer::at_site(&args.city, date)?,
    };
    if let Some(elevation) = args.elevation {
        observer.elevation = elevation;
    }
    Ok(observer)
}

fn load_ephemeris(args: &Args) -> Result<SnapshotEphemeris> {
    let snapshot = match &args.snapshot {
        Some(path) => {
            info!("Loading ephemeris snapshot {}", path.display());
            SnapshotEphemeris::from_file(path)?
        }
        None => {
            info!("Using bundled ephemeris snapshot");
            SnapshotEphemeris::bundled()?
        }
    };
    if let Some(source) = snapshot.source() {
        info!("Snapshot source: {}", source);
    }
    Ok(snapshot)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("phase_view=info,phaseview=info"),
    )
    .init();

    let args = Args::parse();

    let date = Time::parse(&args.date)?;
    let observer = observer_from_args(&args, date)?;
    let ephemeris = load_ephemeris(&args)?;

    let state = ephemeris.observe(args.body, &observer)?;
    info!(
        "{} from {} at {}: alt {:.3}°, az {:.3}°, phase {:.2}%",
        args.body,
        observer.name,
        observer.date,
        state.horizontal.alt_degrees(),
        state.horizontal.az_degrees(),
        state.phase_percent
    );
    if !state.horizontal.is_above_horizon() {
        warn!("{} is below the horizon", args.body);
    }

    let style = PhaseStyle {
        unlit: render::parse_color(&args.unlit_color)?,
        lit: render::parse_color(&args.lit_color)?,
        steps: args.resolution,
        ..PhaseStyle::default()
    };

    let mut figure = Figure::new()
        .with_title(&format!(
            "{} Phase ({}) - {}",
            args.body, state.phase_percent, observer.date
        ))
        .with_labels("alt", "az")
        .with_background(render::parse_color(&args.background)?);

    // Disk placed at (altitude, azimuth) in degrees, sized from the apparent diameter
    let center = Point2::new(
        state.horizontal.alt_degrees(),
        state.horizontal.az_degrees(),
    );
    let diameter = state.size_arcsec / ARCSEC_PER_DISPLAY_UNIT;

    let (khi, k) = draw_object_phase(
        &mut figure,
        &ephemeris,
        &observer,
        args.mode,
        args.body,
        center,
        diameter,
        &style,
    )?;
    info!(
        "Terminator angle {:.4} rad ({} mode), illuminated fraction {:.4}",
        khi, args.mode, k
    );

    let options = svg::SvgOptions {
        width: args.width,
        height: args.height,
        ..svg::SvgOptions::default()
    };
    svg::write_svg(&figure, &args.output, &options)?;
    info!("Wrote {}", args.output.display());

    if args.preview {
        println!("{}", raster::terminal_preview(&figure)?);
    }

    Ok(())
}

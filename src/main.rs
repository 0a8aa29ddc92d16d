use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rocket_telemetry::*;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "rocket-telemetry")]
#[command(about = "Compare live altitude telemetry against a simulated ascent")]
#[command(version)]
struct Args {
    /// Telemetry CSV written by the flight computer
    #[arg(short, long, default_value = TELEMETRY_SOURCE)]
    source: PathBuf,

    // ── Rocket parameters ─────────────────────────────────────
    #[arg(long, default_value_t = INITIAL_MASS)]
    initial_mass: f64,

    #[arg(long, default_value_t = FUEL_MASS)]
    fuel_mass: f64,

    #[arg(long, default_value_t = ROCKET_THRUST)]
    thrust: f64,

    #[arg(long, default_value_t = BURN_TIME)]
    burn_time: f64,

    #[arg(long, default_value_t = EXHAUST_VELOCITY)]
    exhaust_velocity: f64,

    #[arg(long, default_value_t = GRAVITY)]
    gravity: f64,

    #[arg(long, default_value_t = DRAG_COEFFICIENT)]
    drag_coeff: f64,

    // ── Integration ───────────────────────────────────────────
    #[arg(long, default_value_t = TIME_STEP)]
    dt: f64,

    #[arg(long, default_value_t = MAX_SIMULATION_TIME)]
    t_max: f64,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = TICK_INTERVAL.as_millis() as u64)]
    interval_ms: u64,

    // ── Sensor emulation ──────────────────────────────────────
    /// Append noisy readings of the reference trajectory to the source
    #[arg(long)]
    emulate_sensor: bool,

    /// Noise amplitude of emulated readings (m)
    #[arg(long, default_value_t = 5.0)]
    noise: f64,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = SimulationConfig::new(
        args.initial_mass,
        args.fuel_mass,
        args.thrust,
        args.burn_time,
        args.exhaust_velocity,
        args.gravity,
        args.drag_coeff,
        args.dt,
        args.t_max,
    )?;

    if !args.emulate_sensor {
        bootstrap_source(&args.source)?;
    }

    let mut session = TrackingSession::new(&config, IngestConfig::new(&args.source));
    let reference = session.trajectory().clone();
    let mut feed = args
        .emulate_sensor
        .then(|| SensorFeed::new(&args.source, args.noise, args.seed));

    println!("--- Tracking Telemetry ---");
    println!("Source: {}", args.source.display());
    if let Some(apogee) = reference.apogee() {
        println!(
            "Predicted apogee: {:.2} m at {:.2}s",
            apogee.altitude, apogee.time
        );
    }

    let frames = session.frame_count();
    let mut last_errors = ErrorSeries::default();
    session.run(Duration::from_millis(args.interval_ms), |frame| {
        if frame.index % 10 == 0 || frame.index + 1 == frames {
            println!("\n[frame {}/{}]", frame.index + 1, frames);
            println!("{}", frame.status);
        }
        last_errors = frame.errors.clone();

        if let Some(feed) = feed.as_mut() {
            if let Some(sample) = reference.sample(frame.index) {
                if let Err(e) = feed.emit(sample) {
                    warn!("Sensor emulation failed: {}", e);
                }
            }
        }
    });

    println!("\n--- Tracking Summary ---");
    println!("Aligned readings: {}", last_errors.len());
    if let (Some(mean), Some(max)) = (last_errors.mean_abs(), last_errors.max_abs()) {
        println!("Mean |error|: {:.2} m", mean);
        println!("Max |error|: {:.2} m", max);
    }

    Ok(())
}

use std::time::Duration;

// Rocket Constants
pub const INITIAL_MASS: f64 = 0.5; // kg
pub const FUEL_MASS: f64 = 0.1; // kg
pub const ROCKET_THRUST: f64 = 100.0; // N
pub const BURN_TIME: f64 = 2.0; // s
pub const EXHAUST_VELOCITY: f64 = 300.0; // m/s
pub const DRAG_COEFFICIENT: f64 = 0.01; // kg/m

// Physical Constants
pub const GRAVITY: f64 = 9.81; // m/s²

// Simulation Parameters
pub const TIME_STEP: f64 = 0.1; // s
pub const MAX_SIMULATION_TIME: f64 = 10.0; // s

// Telemetry validation bounds (inclusive)
pub const MAX_TELEMETRY_TIME: f64 = 60.0; // s
pub const MAX_TELEMETRY_ALTITUDE: f64 = 10_000.0; // m

// Ingestion cadence
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(100);
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

pub const TELEMETRY_SOURCE: &str = "telemetry.csv";
pub const TELEMETRY_HEADER: [&str; 2] = ["time", "altitude"];

// Placeholder flight written when no telemetry source exists yet
pub const BOOTSTRAP_TELEMETRY: [(f64, f64); 10] = [
    (0.0, 0.0),
    (0.5, 10.2),
    (1.0, 40.5),
    (1.5, 90.3),
    (2.0, 150.1),
    (3.0, 200.8),
    (4.0, 220.5),
    (5.0, 210.2),
    (6.0, 150.7),
    (7.0, 50.3),
];

pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;

pub use constants::*;
pub use control::config::SimulationConfig;
pub use control::session::{Frame, TrackingSession};
pub use errors::{SimulationError, TelemetryError};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::alignment::{Aligner, ErrorSample, ErrorSeries};
pub use trajectory_system::kinematics::{SimulationSample, Trajectory, TrajectorySimulator};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::ingest::{
    bootstrap_source, IngestConfig, IngestStats, PollOutcome, PollState, TelemetryIngester,
};
pub use telemetry_system::sensor_feed::SensorFeed;
pub use telemetry_system::status::{StatusReport, StatusReporter};
pub use telemetry_system::telemetry::{TelemetryBounds, TelemetryRecord, TelemetryStream};

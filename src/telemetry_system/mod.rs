pub mod ingest;
pub mod sensor_feed;
pub mod status;
pub mod telemetry;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Telemetry source error: {0}")]
    SourceError(#[from] std::io::Error),

    #[error("Telemetry format error: {0}")]
    FormatError(#[from] csv::Error),

    #[error("Telemetry source has no header row")]
    MissingHeader,
}

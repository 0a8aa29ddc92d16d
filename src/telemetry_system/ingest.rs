use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use crate::constants::{
    BOOTSTRAP_TELEMETRY, DEBOUNCE_INTERVAL, TELEMETRY_HEADER, TELEMETRY_SOURCE,
};
use crate::errors::TelemetryError;

use super::telemetry::{parse_row, RowRejection, TelemetryBounds, TelemetryStream};

#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub source: PathBuf,
    pub debounce: Duration,
    pub bounds: TelemetryBounds,
}

impl IngestConfig {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        IngestConfig {
            source: source.into(),
            ..Default::default()
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            source: PathBuf::from(TELEMETRY_SOURCE),
            debounce: DEBOUNCE_INTERVAL,
            bounds: TelemetryBounds::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PollState {
    pub last_size: u64,
    pub last_poll: Option<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Skipped,
    Refreshed { accepted: usize, rejected: usize },
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub polls: u64,
    pub refreshes: u64,
    pub failures: u64,
    pub missing_columns: u64,
    pub unparsable: u64,
    pub out_of_bounds: u64,
}

impl IngestStats {
    fn record_rejection(&mut self, reason: RowRejection) {
        match reason {
            RowRejection::MissingColumns => self.missing_columns += 1,
            RowRejection::Unparsable => self.unparsable += 1,
            RowRejection::OutOfBounds => self.out_of_bounds += 1,
        }
    }

    pub fn rejected(&self) -> u64 {
        self.missing_columns + self.unparsable + self.out_of_bounds
    }
}

// Each triggered poll re-reads the whole source and replaces the stream
pub struct TelemetryIngester {
    config: IngestConfig,
    state: PollState,
    stream: TelemetryStream,
    stats: IngestStats,
}

impl TelemetryIngester {
    pub fn new(config: IngestConfig) -> Self {
        TelemetryIngester {
            config,
            state: PollState::default(),
            stream: TelemetryStream::default(),
            stats: IngestStats::default(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.config.source
    }

    pub fn stream(&self) -> &TelemetryStream {
        &self.stream
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    pub fn poll(&mut self) -> &TelemetryStream {
        self.poll_at(Instant::now());
        &self.stream
    }

    // Failures are logged and leave the current stream untouched
    pub fn poll_at(&mut self, now: Instant) -> PollOutcome {
        match self.try_poll_at(now) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.stats.failures += 1;
                warn!(
                    source = %self.config.source.display(),
                    "Telemetry poll skipped: {}",
                    err
                );
                PollOutcome::Failed
            }
        }
    }

    pub fn try_poll_at(&mut self, now: Instant) -> Result<PollOutcome, TelemetryError> {
        self.stats.polls += 1;

        let size = fs::metadata(&self.config.source)?.len();
        if !self.is_due(size, now) {
            trace!(size, "Telemetry source unchanged");
            return Ok(PollOutcome::Skipped);
        }

        let (stream, rejections) = self.read_source()?;
        let accepted = stream.len();
        let rejected = rejections.rejected() as usize;
        self.stream = stream;
        self.stats.missing_columns += rejections.missing_columns;
        self.stats.unparsable += rejections.unparsable;
        self.stats.out_of_bounds += rejections.out_of_bounds;
        self.state = PollState {
            last_size: size,
            last_poll: Some(now),
        };
        self.stats.refreshes += 1;

        debug!(accepted, rejected, size, "Telemetry stream refreshed");
        Ok(PollOutcome::Refreshed { accepted, rejected })
    }

    fn is_due(&self, size: u64, now: Instant) -> bool {
        match self.state.last_poll {
            None => true,
            Some(last_poll) => {
                size != self.state.last_size
                    || now.saturating_duration_since(last_poll) > self.config.debounce
            }
        }
    }

    fn read_source(&self) -> Result<(TelemetryStream, IngestStats), TelemetryError> {
        let file = File::open(&self.config.source)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        // A writer that truncated the file has not put the header back yet
        if reader.headers()?.is_empty() {
            return Err(TelemetryError::MissingHeader);
        }

        let mut stream = TelemetryStream::default();
        let mut rejections = IngestStats::default();
        // Header is row 1, so data rows start at 2
        for (index, result) in reader.records().enumerate() {
            let row = index + 2;
            let record = match result {
                Ok(record) => record,
                Err(err) if err.is_io_error() => return Err(err.into()),
                Err(err) => {
                    debug!(row, "Discarding telemetry row: {}", err);
                    rejections.record_rejection(RowRejection::Unparsable);
                    continue;
                }
            };

            match parse_row(record.iter(), &self.config.bounds) {
                Ok(reading) => stream.push(reading),
                Err(reason) => {
                    debug!(row, fields = ?record, "Discarding telemetry row: {}", reason);
                    rejections.record_rejection(reason);
                }
            }
        }

        Ok((stream, rejections))
    }
}

pub fn bootstrap_source(path: &Path) -> Result<bool, TelemetryError> {
    if path.exists() {
        return Ok(false);
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(TELEMETRY_HEADER)?;
    for (time, altitude) in BOOTSTRAP_TELEMETRY {
        writer.write_record(&[format!("{:.1}", time), format!("{:.1}", altitude)])?;
    }
    writer.flush()?;

    info!(
        source = %path.display(),
        rows = BOOTSTRAP_TELEMETRY.len(),
        "No telemetry source found, wrote placeholder telemetry"
    );
    Ok(true)
}

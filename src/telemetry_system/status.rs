use std::fmt;

use chrono::{DateTime, Local};

use super::telemetry::{TelemetryRecord, TelemetryStream};

#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub generated_at: DateTime<Local>,
    pub latest: Option<TelemetryRecord>,
    pub velocity: Option<f64>,
    pub data_points: usize,
}

impl StatusReport {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Current Time: {}",
            self.generated_at.format("%H:%M:%S")
        )];
        if let Some(latest) = self.latest {
            lines.push(format!(
                "Latest Telemetry: {:.1}s, {:.1}m",
                latest.time, latest.altitude
            ));
        }
        if let Some(velocity) = self.velocity {
            lines.push(format!("Current Velocity: {:.1} m/s", velocity));
        }
        lines.push(format!("Data Points: {}", self.data_points));
        lines
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

pub struct StatusReporter;

impl StatusReporter {
    pub fn summarize(stream: &TelemetryStream) -> StatusReport {
        Self::summarize_at(stream, Local::now())
    }

    pub fn summarize_at(stream: &TelemetryStream, now: DateTime<Local>) -> StatusReport {
        StatusReport {
            generated_at: now,
            latest: stream.latest().copied(),
            velocity: Self::rate_of_climb(stream.records()),
            data_points: stream.len(),
        }
    }

    // Finite difference of the last two readings; undefined for repeated timestamps
    fn rate_of_climb(records: &[TelemetryRecord]) -> Option<f64> {
        match records {
            [.., previous, latest] => {
                let dt = latest.time - previous.time;
                if dt > 0.0 {
                    Some((latest.altitude - previous.altitude) / dt)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

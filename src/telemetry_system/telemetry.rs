use std::fmt;
use std::ops::RangeInclusive;

use crate::constants::{MAX_TELEMETRY_ALTITUDE, MAX_TELEMETRY_TIME};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryRecord {
    pub time: f64,
    pub altitude: f64,
}

impl TelemetryRecord {
    pub fn new(time: f64, altitude: f64) -> Self {
        TelemetryRecord { time, altitude }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryBounds {
    pub time: RangeInclusive<f64>,
    pub altitude: RangeInclusive<f64>,
}

impl TelemetryBounds {
    pub fn contains(&self, record: &TelemetryRecord) -> bool {
        // NaN fails both range checks
        self.time.contains(&record.time) && self.altitude.contains(&record.altitude)
    }
}

impl Default for TelemetryBounds {
    fn default() -> Self {
        TelemetryBounds {
            time: 0.0..=MAX_TELEMETRY_TIME,
            altitude: 0.0..=MAX_TELEMETRY_ALTITUDE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRejection {
    MissingColumns,
    Unparsable,
    OutOfBounds,
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            RowRejection::MissingColumns => "fewer than two columns",
            RowRejection::Unparsable => "non-numeric field",
            RowRejection::OutOfBounds => "reading out of bounds",
        };
        f.write_str(reason)
    }
}

// Extra columns past (time, altitude) are ignored
pub fn parse_row<'a, I>(
    fields: I,
    bounds: &TelemetryBounds,
) -> Result<TelemetryRecord, RowRejection>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut fields = fields.into_iter();
    let (time, altitude) = match (fields.next(), fields.next()) {
        (Some(time), Some(altitude)) => (time, altitude),
        _ => return Err(RowRejection::MissingColumns),
    };

    let time: f64 = time.trim().parse().map_err(|_| RowRejection::Unparsable)?;
    let altitude: f64 = altitude
        .trim()
        .parse()
        .map_err(|_| RowRejection::Unparsable)?;

    let record = TelemetryRecord::new(time, altitude);
    if bounds.contains(&record) {
        Ok(record)
    } else {
        Err(RowRejection::OutOfBounds)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetryStream {
    records: Vec<TelemetryRecord>,
}

impl TelemetryStream {
    pub fn records(&self) -> &[TelemetryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&TelemetryRecord> {
        self.records.last()
    }

    pub fn times(&self) -> Vec<f64> {
        self.records.iter().map(|record| record.time).collect()
    }

    pub fn altitudes(&self) -> Vec<f64> {
        self.records.iter().map(|record| record.altitude).collect()
    }

    pub fn max_altitude(&self) -> Option<f64> {
        self.records
            .iter()
            .map(|record| record.altitude)
            .max_by(f64::total_cmp)
    }

    pub(crate) fn push(&mut self, record: TelemetryRecord) {
        self.records.push(record);
    }
}

impl FromIterator<TelemetryRecord> for TelemetryStream {
    fn from_iter<T: IntoIterator<Item = TelemetryRecord>>(iter: T) -> Self {
        TelemetryStream {
            records: iter.into_iter().collect(),
        }
    }
}

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::TELEMETRY_HEADER;
use crate::errors::TelemetryError;
use crate::trajectory_system::kinematics::SimulationSample;

// Stand-in for the flight computer's logger
pub struct SensorFeed {
    path: PathBuf,
    noise: f64,
    rng: StdRng,
    written: usize,
}

impl SensorFeed {
    pub fn new(path: impl Into<PathBuf>, noise: f64, seed: u64) -> Self {
        SensorFeed {
            path: path.into(),
            // gen_range cannot sample an unbounded range
            noise: if noise.is_finite() { noise.abs() } else { 0.0 },
            rng: StdRng::seed_from_u64(seed),
            written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn emit(&mut self, sample: &SimulationSample) -> Result<(), TelemetryError> {
        let needs_header = std::fs::metadata(&self.path)
            .map(|meta| meta.len() == 0)
            .unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);
        if needs_header {
            writer.write_record(TELEMETRY_HEADER)?;
        }

        let offset = if self.noise > 0.0 {
            self.rng.gen_range(-self.noise..=self.noise)
        } else {
            0.0
        };
        let altitude = (sample.altitude + offset).max(0.0);
        writer.write_record(&[format!("{:.2}", sample.time), format!("{:.2}", altitude)])?;
        writer.flush()?;

        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry_system::ingest::{IngestConfig, TelemetryIngester};
    use std::fs;
    use std::time::Instant;
    use tempfile::tempdir;

    #[test]
    fn test_first_emit_writes_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("telemetry.csv");
        let mut feed = SensorFeed::new(&path, 0.0, 7);

        feed.emit(&SimulationSample::new(0.5, 12.346, 20.0)).unwrap();
        feed.emit(&SimulationSample::new(0.6, 14.0, 20.0)).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "time,altitude\n0.50,12.35\n0.60,14.00\n"
        );
        assert_eq!(feed.written(), 2);
    }

    #[test]
    fn test_appends_without_rewriting_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("telemetry.csv");
        fs::write(&path, "time,altitude\n0.0,0.0\n").unwrap();
        let mut feed = SensorFeed::new(&path, 0.0, 7);

        feed.emit(&SimulationSample::new(1.0, 5.0, 0.0)).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "time,altitude\n0.0,0.0\n1.00,5.00\n"
        );
    }

    #[test]
    fn test_noise_stays_within_amplitude_and_ground() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("telemetry.csv");
        let mut feed = SensorFeed::new(&path, 2.0, 42);

        for i in 0..50 {
            feed.emit(&SimulationSample::new(i as f64 * 0.1, 1.0, 0.0))
                .unwrap();
        }

        let mut ingester = TelemetryIngester::new(IngestConfig::new(&path));
        ingester.poll_at(Instant::now());
        let stream = ingester.stream();

        assert_eq!(stream.len(), 50);
        for record in stream.records() {
            assert!(record.altitude >= 0.0 && record.altitude <= 3.0 + 1e-9);
        }
    }

    #[test]
    fn test_non_finite_noise_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("telemetry.csv");
        let mut feed = SensorFeed::new(&path, f64::INFINITY, 3);

        feed.emit(&SimulationSample::new(1.0, 5.0, 0.0)).unwrap();
        SensorFeed::new(&path, f64::NAN, 3)
            .emit(&SimulationSample::new(2.0, 6.0, 0.0))
            .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "time,altitude\n1.00,5.00\n2.00,6.00\n"
        );
    }

    #[test]
    fn test_same_seed_same_readings() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("a.csv");
        let second = dir.path().join("b.csv");
        let mut a = SensorFeed::new(&first, 5.0, 99);
        let mut b = SensorFeed::new(&second, 5.0, 99);

        for i in 0..10 {
            let sample = SimulationSample::new(i as f64, 100.0, 0.0);
            a.emit(&sample).unwrap();
            b.emit(&sample).unwrap();
        }

        assert_eq!(
            fs::read_to_string(&first).unwrap(),
            fs::read_to_string(&second).unwrap()
        );
    }
}

use std::thread;
use std::time::Duration;

use tracing::info;

use crate::control::config::SimulationConfig;
use crate::telemetry_system::ingest::{IngestConfig, TelemetryIngester};
use crate::telemetry_system::status::{StatusReport, StatusReporter};
use crate::telemetry_system::telemetry::TelemetryStream;
use crate::trajectory_system::alignment::{Aligner, ErrorSeries};
use crate::trajectory_system::kinematics::{SimulationSample, Trajectory, TrajectorySimulator};

#[derive(Debug)]
pub struct Frame<'a> {
    pub index: usize,
    pub simulated: &'a [SimulationSample],
    pub telemetry: &'a TelemetryStream,
    pub errors: ErrorSeries,
    pub status: StatusReport,
    pub max_altitude: f64,
}

impl Frame<'_> {
    pub fn simulated_times(&self) -> Vec<f64> {
        self.simulated.iter().map(|sample| sample.time).collect()
    }

    pub fn simulated_altitudes(&self) -> Vec<f64> {
        self.simulated.iter().map(|sample| sample.altitude).collect()
    }
}

pub struct TrackingSession {
    trajectory: Trajectory,
    ingester: TelemetryIngester,
}

impl TrackingSession {
    pub fn new(config: &SimulationConfig, ingest: IngestConfig) -> Self {
        let trajectory = TrajectorySimulator::compute(config);
        info!(
            samples = trajectory.len(),
            apogee = trajectory.max_altitude(),
            "Reference trajectory computed"
        );
        TrackingSession {
            trajectory,
            ingester: TelemetryIngester::new(ingest),
        }
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn ingester(&self) -> &TelemetryIngester {
        &self.ingester
    }

    pub fn frame_count(&self) -> usize {
        self.trajectory.len()
    }

    pub fn step(&mut self, frame_index: usize) -> Frame<'_> {
        self.ingester.poll();

        let telemetry = self.ingester.stream();
        let errors = Aligner::compute(&self.trajectory, telemetry);
        let status = StatusReporter::summarize(telemetry);
        let max_altitude = telemetry
            .max_altitude()
            .map_or(self.trajectory.max_altitude(), |measured| {
                measured.max(self.trajectory.max_altitude())
            });

        Frame {
            index: frame_index,
            simulated: self.trajectory.up_to(frame_index),
            telemetry,
            errors,
            status,
            max_altitude,
        }
    }

    pub fn run<F>(&mut self, interval: Duration, mut on_frame: F)
    where
        F: FnMut(&Frame<'_>),
    {
        let frames = self.frame_count();
        info!(
            frames,
            interval_ms = interval.as_millis() as u64,
            "Tracking started"
        );

        for frame_index in 0..frames {
            let frame = self.step(frame_index);
            on_frame(&frame);
            if frame_index + 1 < frames && !interval.is_zero() {
                thread::sleep(interval);
            }
        }

        let stats = self.ingester.stats();
        info!(
            polls = stats.polls,
            refreshes = stats.refreshes,
            failures = stats.failures,
            rejected = stats.rejected(),
            "Tracking finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry_system::ingest::bootstrap_source;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_step_produces_frame() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("telemetry.csv");
        bootstrap_source(&path).unwrap();
        let mut session =
            TrackingSession::new(&SimulationConfig::default(), IngestConfig::new(&path));

        let frame = session.step(25);

        assert_eq!(frame.index, 25);
        assert_eq!(frame.simulated.len(), 25);
        assert_eq!(frame.simulated_times().len(), frame.simulated_altitudes().len());
        assert_eq!(frame.telemetry.len(), 10);
        assert_eq!(frame.errors.len(), 10);
        assert_eq!(frame.status.data_points, 10);
        // Simulated apogee (~222 m) tops the placeholder peak of 220.5 m
        assert!(frame.max_altitude > 220.5);
    }

    #[test]
    fn test_max_altitude_follows_measurements() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("telemetry.csv");
        fs::write(&path, "time,altitude\n1.0,900.0\n").unwrap();
        let mut session =
            TrackingSession::new(&SimulationConfig::default(), IngestConfig::new(&path));

        let frame = session.step(0);

        assert_eq!(frame.max_altitude, 900.0);
    }

    #[test]
    fn test_missing_source_does_not_stop_ticks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("telemetry.csv");
        let mut session =
            TrackingSession::new(&SimulationConfig::default(), IngestConfig::new(&path));

        let frame = session.step(3);
        assert!(frame.telemetry.is_empty());
        assert!(frame.errors.is_empty());
        assert_eq!(frame.max_altitude, session.trajectory().max_altitude());

        bootstrap_source(&path).unwrap();
        let frame = session.step(4);
        assert_eq!(frame.telemetry.len(), 10);
        assert_eq!(session.ingester().stats().failures, 1);
    }

    #[test]
    fn test_run_stops_after_frame_count() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("telemetry.csv");
        bootstrap_source(&path).unwrap();
        let config =
            SimulationConfig::new(0.5, 0.1, 100.0, 2.0, 300.0, 9.81, 0.01, 0.1, 1.0).unwrap();
        let mut session = TrackingSession::new(&config, IngestConfig::new(&path));

        let mut seen = Vec::new();
        session.run(Duration::ZERO, |frame| seen.push(frame.index));

        assert_eq!(seen, (0..10).collect::<Vec<_>>());
        assert_eq!(session.ingester().stats().polls, 10);
    }
}

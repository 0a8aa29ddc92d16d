use crate::telemetry_system::telemetry::TelemetryStream;

use super::kinematics::Trajectory;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorSample {
    pub time: f64,
    pub altitude_error: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorSeries {
    samples: Vec<ErrorSample>,
}

impl ErrorSeries {
    pub fn samples(&self) -> &[ErrorSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|sample| sample.time).collect()
    }

    pub fn errors(&self) -> Vec<f64> {
        self.samples
            .iter()
            .map(|sample| sample.altitude_error)
            .collect()
    }

    pub fn mean_abs(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let total: f64 = self
            .samples
            .iter()
            .map(|sample| sample.altitude_error.abs())
            .sum();
        Some(total / self.samples.len() as f64)
    }

    pub fn max_abs(&self) -> Option<f64> {
        self.samples
            .iter()
            .map(|sample| sample.altitude_error.abs())
            .max_by(f64::total_cmp)
    }
}

pub struct Aligner;

impl Aligner {
    // Readings past the simulated window are dropped, never extrapolated
    pub fn compute(trajectory: &Trajectory, stream: &TelemetryStream) -> ErrorSeries {
        let samples = stream
            .records()
            .iter()
            .filter(|record| record.time <= trajectory.duration())
            .filter_map(|record| {
                let index = trajectory.alignment_index(record.time)?;
                let simulated = trajectory.sample(index)?;
                Some(ErrorSample {
                    time: record.time,
                    altitude_error: record.altitude - simulated.altitude,
                })
            })
            .collect();

        ErrorSeries { samples }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::config::SimulationConfig;
    use crate::telemetry_system::telemetry::TelemetryRecord;
    use crate::trajectory_system::kinematics::TrajectorySimulator;
    use approx::assert_relative_eq;

    fn stream_of(rows: &[(f64, f64)]) -> TelemetryStream {
        rows.iter()
            .map(|&(time, altitude)| TelemetryRecord::new(time, altitude))
            .collect()
    }

    #[test]
    fn test_error_uses_sample_at_or_before() {
        let trajectory = TrajectorySimulator::compute(&SimulationConfig::default());
        let stream = stream_of(&[(0.17, 10.0), (1.0, 40.5)]);

        let errors = Aligner::compute(&trajectory, &stream);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.samples()[0].time, 0.17);
        assert_relative_eq!(
            errors.samples()[0].altitude_error,
            10.0 - trajectory.samples()[1].altitude,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            errors.samples()[1].altitude_error,
            40.5 - trajectory.samples()[10].altitude,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_records_past_duration_are_excluded() {
        let trajectory = TrajectorySimulator::compute(&SimulationConfig::default());
        let stream = stream_of(&[(5.0, 200.0), (10.0, 100.0), (10.5, 90.0), (30.0, 0.0)]);

        let errors = Aligner::compute(&trajectory, &stream);

        assert_eq!(errors.times(), vec![5.0, 10.0]);
        // t = 10.0 is inside the window and clamps to the last sample
        assert_relative_eq!(
            errors.errors()[1],
            100.0 - trajectory.samples()[99].altitude,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_output_mirrors_stream_order() {
        let trajectory = TrajectorySimulator::compute(&SimulationConfig::default());
        let stream = stream_of(&[(3.0, 1.0), (1.0, 2.0), (2.0, 3.0)]);

        let errors = Aligner::compute(&trajectory, &stream);

        assert_eq!(errors.times(), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_empty_stream_yields_no_errors() {
        let trajectory = TrajectorySimulator::compute(&SimulationConfig::default());
        let errors = Aligner::compute(&trajectory, &TelemetryStream::default());
        assert!(errors.is_empty());
        assert_eq!(errors.mean_abs(), None);
        assert_eq!(errors.max_abs(), None);
    }

    #[test]
    fn test_error_statistics() {
        let trajectory = TrajectorySimulator::compute(&SimulationConfig::default());
        // Sample 0 sits at zero altitude, so the errors equal the readings
        let stream = stream_of(&[(0.0, 3.0), (0.05, 1.0)]);

        let errors = Aligner::compute(&trajectory, &stream);

        assert_relative_eq!(errors.mean_abs().unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(errors.max_abs().unwrap(), 3.0, epsilon = 1e-12);
    }
}

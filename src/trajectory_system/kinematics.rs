use crate::control::config::SimulationConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSample {
    pub time: f64,
    pub altitude: f64,
    pub velocity: f64,
}

impl SimulationSample {
    pub fn new(time: f64, altitude: f64, velocity: f64) -> Self {
        SimulationSample {
            time,
            altitude,
            velocity,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Trajectory {
    samples: Vec<SimulationSample>,
    time_step: f64,
    duration: f64,
}

impl Trajectory {
    pub fn samples(&self) -> &[SimulationSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn sample(&self, index: usize) -> Option<&SimulationSample> {
        self.samples.get(index)
    }

    pub fn up_to(&self, frame: usize) -> &[SimulationSample] {
        let end = frame.min(self.samples.len().saturating_sub(1));
        &self.samples[..end]
    }

    // Sample at or before `time`, clamped to the last one
    pub fn alignment_index(&self, time: f64) -> Option<usize> {
        let last = self.samples.len().checked_sub(1)?;
        let index = (time / self.time_step).floor().max(0.0) as usize;
        Some(index.min(last))
    }

    pub fn apogee(&self) -> Option<&SimulationSample> {
        self.samples
            .iter()
            .max_by(|a, b| a.altitude.total_cmp(&b.altitude))
    }

    pub fn max_altitude(&self) -> f64 {
        self.apogee().map_or(0.0, |sample| sample.altitude)
    }
}

pub struct TrajectorySimulator;

impl TrajectorySimulator {
    pub fn compute(config: &SimulationConfig) -> Trajectory {
        let dt = config.time_step();
        let n = config.step_count();

        let mut samples = Vec::with_capacity(n);
        if n > 0 {
            samples.push(SimulationSample::new(0.0, 0.0, 0.0));
        }

        for i in 1..n {
            let previous = samples[i - 1];
            let t = i as f64 * dt;

            let mass = config.mass_at(t);
            let thrust_force = config.thrust_at(t);
            let drag = config.drag_coefficient() * previous.velocity.powi(2);
            let acceleration = (thrust_force - drag - mass * config.gravity()) / mass;

            let mut velocity = previous.velocity + acceleration * dt;
            let mut altitude = previous.altitude + velocity * dt;

            // Ground clamp
            if altitude < 0.0 {
                altitude = 0.0;
                velocity = 0.0;
            }

            samples.push(SimulationSample::new(t, altitude, velocity));
        }

        Trajectory {
            samples,
            time_step: dt,
            duration: config.duration(),
        }
    }
}

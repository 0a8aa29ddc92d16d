use crate::constants::{
    BURN_TIME, DRAG_COEFFICIENT, EXHAUST_VELOCITY, FUEL_MASS, GRAVITY, INITIAL_MASS,
    MAX_SIMULATION_TIME, ROCKET_THRUST, TIME_STEP,
};
use crate::errors::SimulationError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    initial_mass: f64,
    fuel_mass: f64,
    dry_mass: f64,
    thrust: f64,
    burn_time: f64,
    exhaust_velocity: f64,
    gravity: f64,
    drag_coefficient: f64,
    time_step: f64,
    duration: f64,
}

impl SimulationConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        initial_mass: f64,
        fuel_mass: f64,
        thrust: f64,
        burn_time: f64,
        exhaust_velocity: f64,
        gravity: f64,
        drag_coefficient: f64,
        time_step: f64,
        duration: f64,
    ) -> Result<Self, SimulationError> {
        let values = [
            ("initial mass", initial_mass),
            ("fuel mass", fuel_mass),
            ("thrust", thrust),
            ("burn time", burn_time),
            ("exhaust velocity", exhaust_velocity),
            ("gravity", gravity),
            ("drag coefficient", drag_coefficient),
            ("time step", time_step),
            ("duration", duration),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(SimulationError::ConfigError(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        if initial_mass <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "initial mass must be positive, got {} kg",
                initial_mass
            )));
        }
        // Dry mass must stay positive or the acceleration is undefined after burnout
        if fuel_mass < 0.0 || fuel_mass >= initial_mass {
            return Err(SimulationError::ConfigError(format!(
                "fuel mass must lie in [0, {}) kg, got {} kg",
                initial_mass, fuel_mass
            )));
        }
        for (name, value) in [
            ("thrust", thrust),
            ("burn time", burn_time),
            ("gravity", gravity),
            ("drag coefficient", drag_coefficient),
        ] {
            if value < 0.0 {
                return Err(SimulationError::ConfigError(format!(
                    "{} cannot be negative, got {}",
                    name, value
                )));
            }
        }
        if time_step <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "time step must be positive, got {} s",
                time_step
            )));
        }
        if duration <= time_step {
            return Err(SimulationError::ConfigError(format!(
                "duration ({} s) must exceed the time step ({} s)",
                duration, time_step
            )));
        }

        Ok(SimulationConfig {
            initial_mass,
            fuel_mass,
            dry_mass: initial_mass - fuel_mass,
            thrust,
            burn_time,
            exhaust_velocity,
            gravity,
            drag_coefficient,
            time_step,
            duration,
        })
    }

    pub fn initial_mass(&self) -> f64 {
        self.initial_mass
    }

    pub fn fuel_mass(&self) -> f64 {
        self.fuel_mass
    }

    pub fn dry_mass(&self) -> f64 {
        self.dry_mass
    }

    pub fn thrust(&self) -> f64 {
        self.thrust
    }

    pub fn burn_time(&self) -> f64 {
        self.burn_time
    }

    pub fn exhaust_velocity(&self) -> f64 {
        self.exhaust_velocity
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn drag_coefficient(&self) -> f64 {
        self.drag_coefficient
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn step_count(&self) -> usize {
        // Absorb rounding so that e.g. 0.3 / 0.1 yields 3 steps, not 2
        (self.duration / self.time_step + 1e-9).floor() as usize
    }

    pub fn mass_at(&self, t: f64) -> f64 {
        if t <= self.burn_time {
            self.initial_mass - (self.fuel_mass / self.burn_time) * t
        } else {
            self.dry_mass
        }
    }

    pub fn thrust_at(&self, t: f64) -> f64 {
        if t <= self.burn_time {
            self.thrust
        } else {
            0.0
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            initial_mass: INITIAL_MASS,
            fuel_mass: FUEL_MASS,
            dry_mass: INITIAL_MASS - FUEL_MASS,
            thrust: ROCKET_THRUST,
            burn_time: BURN_TIME,
            exhaust_velocity: EXHAUST_VELOCITY,
            gravity: GRAVITY,
            drag_coefficient: DRAG_COEFFICIENT,
            time_step: TIME_STEP,
            duration: MAX_SIMULATION_TIME,
        }
    }
}

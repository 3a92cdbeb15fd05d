//! Simulation configuration loaded from TOML.
//!
//! ```toml
//! setpoint = 75.0
//! kp = 1.0
//! ki = 0.1
//! kd = 0.05
//! num_steps = 50
//! dt = 1.0
//! ```
//!
//! Missing keys take their default. Values are checked against
//! [`SimulationConfig::validate`] but never clamped.

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::controller::ControllerParameters;
use crate::error::{Result, SimError};
use crate::simulation::{self, Trajectory};

pub const SETPOINT_RANGE: RangeInclusive<f64> = 50.0..=100.0;
pub const KP_RANGE: RangeInclusive<f64> = 0.0..=10.0;
pub const KI_RANGE: RangeInclusive<f64> = 0.0..=1.0;
pub const KD_RANGE: RangeInclusive<f64> = 0.0..=1.0;
pub const NUM_STEPS_RANGE: RangeInclusive<usize> = 10..=200;

/// Inputs of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Target temperature
    pub setpoint: f64,
    /// Proportional gain
    pub kp: f64,
    /// Integral gain
    pub ki: f64,
    /// Derivative gain
    pub kd: f64,
    /// Simulation horizon
    pub num_steps: usize,
    /// Step duration
    pub dt: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            setpoint: 75.0,
            kp: 1.0,
            ki: 0.1,
            kd: 0.05,
            num_steps: 50,
            dt: 1.0,
        }
    }
}

impl SimulationConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded simulation config");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Save as a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Check every option against its allowed range.
    ///
    /// Ranges are inclusive. `dt` only has to be finite and positive.
    pub fn validate(&self) -> Result<()> {
        check_range("setpoint", self.setpoint, &SETPOINT_RANGE)?;
        check_range("kp", self.kp, &KP_RANGE)?;
        check_range("ki", self.ki, &KI_RANGE)?;
        check_range("kd", self.kd, &KD_RANGE)?;

        if !NUM_STEPS_RANGE.contains(&self.num_steps) {
            return Err(SimError::OutOfRange {
                name: "num_steps",
                value: self.num_steps as f64,
                min: *NUM_STEPS_RANGE.start() as f64,
                max: *NUM_STEPS_RANGE.end() as f64,
            });
        }

        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::InvalidTimeStep { dt: self.dt });
        }

        Ok(())
    }

    pub fn parameters(&self) -> ControllerParameters<f64> {
        ControllerParameters::new(self.setpoint, self.kp, self.ki, self.kd)
    }

    /// Validate, then run a fresh simulation
    pub fn simulate(&self) -> Result<Trajectory<f64>> {
        self.validate()?;
        simulation::run(self.parameters(), self.num_steps, self.dt)
    }
}

fn check_range(name: &'static str, value: f64, range: &RangeInclusive<f64>) -> Result<()> {
    // NaN fails `contains`, so it is reported as out of range too
    if range.contains(&value) {
        Ok(())
    } else {
        Err(SimError::OutOfRange {
            name,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.parameters(), ControllerParameters::new(75.0, 1.0, 0.1, 0.05));
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let config = SimulationConfig::from_toml_str("setpoint = 90.0\nkp = 2.5\n").unwrap();
        assert_eq!(config.setpoint, 90.0);
        assert_eq!(config.kp, 2.5);
        assert_eq!(config.ki, 0.1);
        assert_eq!(config.num_steps, 50);
        assert_eq!(config.dt, 1.0);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = SimulationConfig::from_toml_str("kq = 1.0\n");
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let result = SimulationConfig::from_toml_str("num_steps = \"many\"\n");
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let config = SimulationConfig {
            setpoint: 100.0,
            kp: 10.0,
            ki: 1.0,
            kd: 1.0,
            num_steps: 200,
            dt: 1.0,
        };
        assert!(config.validate().is_ok());

        let config = SimulationConfig {
            setpoint: 50.0,
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
            num_steps: 10,
            dt: 1.0,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_reported_not_clamped() {
        let config = SimulationConfig {
            kp: 10.5,
            ..Default::default()
        };
        match config.validate() {
            Err(SimError::OutOfRange { name, value, .. }) => {
                assert_eq!(name, "kp");
                assert_eq!(value, 10.5);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(config.kp, 10.5);

        let config = SimulationConfig {
            num_steps: 5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::OutOfRange { name: "num_steps", .. })
        ));

        let config = SimulationConfig {
            setpoint: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SimulationConfig {
            dt: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidTimeStep { .. })));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = SimulationConfig {
            setpoint: 82.5,
            num_steps: 120,
            ..Default::default()
        };
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("setpoint = 82.5"));
        assert_eq!(SimulationConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_simulate_validates_first() {
        let config = SimulationConfig {
            ki: 2.0,
            ..Default::default()
        };
        assert!(config.simulate().is_err());

        let traj = SimulationConfig::default().simulate().unwrap();
        assert_eq!(traj.num_steps(), 50);
    }

    #[test]
    fn test_load_missing_file() {
        let result = SimulationConfig::load("/nonexistent/thermo-pid.toml");
        assert!(matches!(result, Err(SimError::Io(_))));
    }
}

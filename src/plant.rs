//! First-order heating/cooling model.
//!
//! Not a thermal model: each step adds a fixed fraction of the controller
//! output and subtracts a constant passive loss.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use num_traits::Float;

use crate::lit;

/// Temperature every run starts from
pub const START_TEMPERATURE: f64 = 50.0;
/// Temperature change per unit of controller output
pub const HEATING_GAIN: f64 = 0.1;
/// Temperature lost per step regardless of output
pub const COOLING_LOSS: f64 = 0.1;

/// Measured plant value
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct PlantState<T: Float> {
    pub temperature: T,
}

impl<T: Float> PlantState<T> {
    /// Plant at [`START_TEMPERATURE`]
    pub fn initial() -> Self {
        Self {
            temperature: lit(START_TEMPERATURE),
        }
    }

    /// Apply one step of controller output and return the new temperature.
    ///
    /// `temperature <- temperature + (output * 0.1 - 0.1)`; the net change
    /// is formed before it is added.
    pub fn advance(&mut self, output: T) -> T {
        let delta = output * lit(HEATING_GAIN) - lit(COOLING_LOSS);
        self.temperature = self.temperature + delta;
        self.temperature
    }
}

impl<T: Float> Default for PlantState<T> {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_temperature() {
        let plant = PlantState::<f64>::initial();
        assert_eq!(plant.temperature, 50.0);
        assert_eq!(PlantState::<f32>::default().temperature, 50.0f32);
    }

    #[test]
    fn test_advance() {
        let mut plant = PlantState::<f64>::initial();
        let t = plant.advance(28.75);
        assert!((t - 52.775).abs() < 1e-12);
        assert_eq!(plant.temperature, t);
    }

    #[test]
    fn test_passive_cooling() {
        let mut plant = PlantState::<f64>::initial();
        for _ in 0..10 {
            plant.advance(0.0);
        }
        assert!((plant.temperature - 49.0).abs() < 1e-9);
    }
}

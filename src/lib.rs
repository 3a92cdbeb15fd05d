//! # Thermo PID
//!
//! A closed-loop temperature simulator driven by a discrete PID controller.
//! The plant is a toy first-order model: each step the temperature rises by a
//! tenth of the controller output and loses a constant 0.1 to passive
//! cooling. Runs start at 50 degrees with a zeroed controller.
//!
//! ## Key Features
//! - **Pure control law** with the controller state passed in and out explicitly
//! - **Fixed-step simulation loop** producing temperature and output traces
//! - **Resettable sessions** that reproduce a fresh run bit for bit
//! - **Run summaries** (overshoot, final error, peak output)
//! - **TOML configuration** with range validation (`serde` feature)
//! - **Generic scalar type** through [`num_traits::Float`]
//!
//! ## Example
//! ```
//! use thermo_pid::{pid_step, simulate};
//!
//! let (output, previous_error, integral) =
//!     pid_step(75.0, 50.0, 1.0, 0.1, 0.05, 0.0, 0.0, 1.0).unwrap();
//! assert_eq!(output, 28.75);
//! assert_eq!(previous_error, 25.0);
//! assert_eq!(integral, 2.5);
//!
//! let (temperatures, outputs) = simulate(75.0, 1.0, 0.1, 0.05, 50, 1.0).unwrap();
//! assert_eq!(temperatures.len(), outputs.len() + 1);
//! ```

use num_traits::Float;

pub mod controller;
pub mod error;
pub mod plant;
pub mod simulation;

#[cfg(feature = "serde")]
pub mod config;

pub use controller::{pid_step, step, ControlOutput, ControllerParameters, ControllerState};
pub use error::{Result, SimError};
pub use plant::{PlantState, COOLING_LOSS, HEATING_GAIN, START_TEMPERATURE};
pub use simulation::{run, Sample, Simulation, StepRecord, Trajectory, TrajectorySummary};

#[cfg(feature = "serde")]
pub use config::SimulationConfig;

/// Run a fresh simulation and return `(temperature_trace, output_trace)`.
///
/// The temperature trace holds `num_steps + 1` samples (the first is the
/// starting temperature), the output trace `num_steps`.
pub fn simulate<T: Float>(
    setpoint: T,
    kp: T,
    ki: T,
    kd: T,
    num_steps: usize,
    dt: T,
) -> Result<(Vec<T>, Vec<T>)> {
    let params = ControllerParameters::new(setpoint, kp, ki, kd);
    Ok(run(params, num_steps, dt)?.into_parts())
}

// ============================================================================
// Scalar conversions
// ============================================================================

/// Convert an `f64` constant into the simulation scalar.
///
/// The plant constants convert (possibly rounded) into both `f32` and
/// `f64`, so the NaN fallback is unreachable for them.
pub(crate) fn lit<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Widen a scalar for logging and error reporting
pub(crate) fn as_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

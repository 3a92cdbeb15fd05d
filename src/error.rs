//! Error types for the controller, the simulation loop and configuration.

use thiserror::Error;

/// Crate result alias.
pub type Result<T> = core::result::Result<T, SimError>;

/// Errors raised by the simulator.
///
/// None of these are recovered internally: the caller is expected to reject
/// bad inputs before a run, and the core never clamps or corrects values.
#[derive(Debug, Error)]
pub enum SimError {
    /// Controller step invoked with `dt == 0` (derivative term divides by dt)
    #[error("division by zero: controller step requires a nonzero dt")]
    DivisionByZero,

    /// Time step rejected at the simulation boundary
    #[error("invalid time step {dt}: dt must be finite and greater than zero")]
    InvalidTimeStep {
        /// Offending time step
        dt: f64,
    },

    /// Step count rejected at the simulation boundary
    #[error("invalid step count {num_steps}: at least one step is required")]
    InvalidStepCount {
        /// Offending step count
        num_steps: usize,
    },

    /// Configuration option outside its recognized range
    #[error("{name} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        /// Option name
        name: &'static str,
        /// Supplied value
        value: f64,
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
    },

    /// Configuration file could not be read or written
    #[cfg(feature = "serde")]
    #[error("configuration file error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[cfg(feature = "serde")]
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration could not be rendered as TOML
    #[cfg(feature = "serde")]
    #[error("could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

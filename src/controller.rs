//! Discrete PID control law.
//!
//! The controller holds no state of its own: the previous error and the
//! integral accumulator travel in a [`ControllerState`] that the caller passes
//! in and gets back updated. The law is textbook and deliberately bare:
//!
//! ```text
//! error     = setpoint - measured
//! integral' = integral + Ki * error * dt
//! output    = Kp * error + integral' + Kd * (error - previous_error) / dt
//! ```
//!
//! No output clamping, no anti-windup. Both the output and the accumulator
//! are unbounded.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use num_traits::Float;

use crate::error::{Result, SimError};

/// Setpoint and gains for one run
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ControllerParameters<T: Float> {
    /// Target temperature
    pub setpoint: T,
    /// Proportional gain
    pub kp: T,
    /// Integral gain
    pub ki: T,
    /// Derivative gain
    pub kd: T,
}

impl<T: Float> ControllerParameters<T> {
    pub fn new(setpoint: T, kp: T, ki: T, kd: T) -> Self {
        Self {
            setpoint,
            kp,
            ki,
            kd,
        }
    }

    pub fn with_gains(mut self, kp: T, ki: T, kd: T) -> Self {
        self.kp = kp;
        self.ki = ki;
        self.kd = kd;
        self
    }
}

/// Memory carried from one controller step to the next
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ControllerState<T: Float> {
    /// Error seen by the previous step (zero before the first step)
    pub previous_error: T,
    /// Running sum of `Ki * error * dt`
    pub integral_accumulator: T,
}

impl<T: Float> ControllerState<T> {
    /// State at the start of a run
    pub fn zero() -> Self {
        Self {
            previous_error: T::zero(),
            integral_accumulator: T::zero(),
        }
    }
}

impl<T: Float> Default for ControllerState<T> {
    fn default() -> Self {
        Self::zero()
    }
}

/// Result of a single controller step with the individual term contributions
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ControlOutput<T: Float> {
    /// Final control output
    pub output: T,
    /// Proportional term contribution
    pub p: T,
    /// Integral term contribution (the updated accumulator)
    pub i: T,
    /// Derivative term contribution
    pub d: T,
    /// `setpoint - measured`
    pub error: T,
}

/// Advance the controller by one time step.
///
/// Returns the output together with the state to feed into the next call.
/// Fails with [`SimError::DivisionByZero`] when `dt` is zero; any other
/// value of `dt` is accepted as is.
pub fn step<T: Float>(
    params: &ControllerParameters<T>,
    measured: T,
    state: ControllerState<T>,
    dt: T,
) -> Result<(ControlOutput<T>, ControllerState<T>)> {
    if dt == T::zero() {
        return Err(SimError::DivisionByZero);
    }

    let error = params.setpoint - measured;

    let p = params.kp * error;
    let integral = state.integral_accumulator + params.ki * error * dt;
    let d = params.kd * (error - state.previous_error) / dt;

    let output = p + integral + d;

    Ok((
        ControlOutput {
            output,
            p,
            i: integral,
            d,
            error,
        },
        ControllerState {
            previous_error: error,
            integral_accumulator: integral,
        },
    ))
}

/// Flat form of [`step`] for callers that keep the state as two scalars.
///
/// Returns `(output, previous_error', integral_accumulator')`.
#[allow(clippy::too_many_arguments)]
pub fn pid_step<T: Float>(
    setpoint: T,
    measured: T,
    kp: T,
    ki: T,
    kd: T,
    previous_error: T,
    integral_accumulator: T,
    dt: T,
) -> Result<(T, T, T)> {
    let params = ControllerParameters::new(setpoint, kp, ki, kd);
    let state = ControllerState {
        previous_error,
        integral_accumulator,
    };
    let (out, next) = step(&params, measured, state, dt)?;
    Ok((out.output, next.previous_error, next.integral_accumulator))
}

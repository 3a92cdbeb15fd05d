//! Closed-loop simulation: controller output drives the plant, the plant
//! temperature feeds the next controller step.

use core::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use num_traits::Float;

use crate::as_f64;
use crate::controller::{self, ControlOutput, ControllerParameters, ControllerState};
use crate::error::{Result, SimError};
use crate::plant::PlantState;

/// Temperature and output traces of one run.
///
/// `temperatures` starts with the initial plant temperature, so it always
/// holds exactly one more sample than `outputs`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Trajectory<T: Float> {
    temperatures: Vec<T>,
    outputs: Vec<T>,
}

/// One row of a trajectory on the shared time axis
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Sample<T: Float> {
    pub step: usize,
    pub temperature: T,
    /// Output computed from `temperature`; `None` for the final sample
    pub output: Option<T>,
}

impl<T: Float> Trajectory<T> {
    fn new(initial_temperature: T) -> Self {
        Self {
            temperatures: vec![initial_temperature],
            outputs: Vec::new(),
        }
    }

    fn with_capacity(initial_temperature: T, num_steps: usize) -> Self {
        let mut temperatures = Vec::with_capacity(num_steps + 1);
        temperatures.push(initial_temperature);
        Self {
            temperatures,
            outputs: Vec::with_capacity(num_steps),
        }
    }

    fn push(&mut self, temperature: T, output: T) {
        self.temperatures.push(temperature);
        self.outputs.push(output);
    }

    /// Temperature per step, including the initial value
    pub fn temperatures(&self) -> &[T] {
        &self.temperatures
    }

    /// Controller output per step
    pub fn outputs(&self) -> &[T] {
        &self.outputs
    }

    /// Number of completed steps
    pub fn num_steps(&self) -> usize {
        self.outputs.len()
    }

    pub fn final_temperature(&self) -> T {
        self.temperatures[self.temperatures.len() - 1]
    }

    /// Rows of `(step, temperature, output)` in time order
    pub fn samples(&self) -> impl Iterator<Item = Sample<T>> + '_ {
        self.temperatures
            .iter()
            .enumerate()
            .map(move |(step, &temperature)| Sample {
                step,
                temperature,
                output: self.outputs.get(step).copied(),
            })
    }

    /// Split into `(temperature_trace, output_trace)`
    pub fn into_parts(self) -> (Vec<T>, Vec<T>) {
        (self.temperatures, self.outputs)
    }

    /// Condense the run relative to the setpoint it was tracking
    pub fn summary(&self, setpoint: T) -> TrajectorySummary<T> {
        let (min_temperature, max_temperature) = self.temperatures.iter().fold(
            (T::infinity(), T::neg_infinity()),
            |(lo, hi), &t| (lo.min(t), hi.max(t)),
        );
        let peak_output = self
            .outputs
            .iter()
            .fold(T::zero(), |peak, &o| peak.max(o.abs()));
        let final_temperature = self.final_temperature();

        TrajectorySummary {
            steps: self.num_steps(),
            setpoint,
            final_temperature,
            final_error: setpoint - final_temperature,
            min_temperature,
            max_temperature,
            overshoot: (max_temperature - setpoint).max(T::zero()),
            peak_output,
        }
    }
}

/// Key figures of a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TrajectorySummary<T: Float> {
    pub steps: usize,
    pub setpoint: T,
    pub final_temperature: T,
    /// `setpoint - final_temperature`
    pub final_error: T,
    pub min_temperature: T,
    pub max_temperature: T,
    /// How far the temperature rose above the setpoint (zero if it never did)
    pub overshoot: T,
    /// Largest absolute controller output
    pub peak_output: T,
}

impl<T: Float + fmt::Display> fmt::Display for TrajectorySummary<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Simulation Summary:\n\
             Steps: {}\n\
             Setpoint: {:.3}\n\
             Final Temperature: {:.3}\n\
             Final Error: {:.3}\n\
             Temperature Range: {:.3} .. {:.3}\n\
             Overshoot: {:.3}\n\
             Peak Output: {:.3}",
            self.steps,
            self.setpoint,
            self.final_temperature,
            self.final_error,
            self.min_temperature,
            self.max_temperature,
            self.overshoot,
            self.peak_output
        )
    }
}

/// Everything that happened during one loop iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord<T: Float> {
    /// Zero-based step index
    pub step: usize,
    pub control: ControlOutput<T>,
    /// Plant temperature after applying the output
    pub temperature: T,
}

/// A simulation run that owns its controller state, plant and trajectory.
///
/// Every instance is independent; concurrent runs need one `Simulation`
/// each.
#[derive(Debug, Clone)]
pub struct Simulation<T: Float> {
    params: ControllerParameters<T>,
    /// Parameters supplied mid-run, applied when the next run starts
    pending: Option<ControllerParameters<T>>,
    dt: T,
    plant: PlantState<T>,
    state: ControllerState<T>,
    trajectory: Trajectory<T>,
    diverged: bool,
}

impl<T: Float> Simulation<T> {
    /// Create a simulation at its initial conditions.
    ///
    /// Fails with [`SimError::InvalidTimeStep`] unless `dt` is finite and
    /// positive.
    pub fn new(params: ControllerParameters<T>, dt: T) -> Result<Self> {
        validate_dt(dt)?;
        let plant = PlantState::initial();
        Ok(Self {
            params,
            pending: None,
            dt,
            plant,
            state: ControllerState::zero(),
            trajectory: Trajectory::new(plant.temperature),
            diverged: false,
        })
    }

    /// Discard controller state and trajectory and return to the initial
    /// conditions. Parameters passed to [`set_parameters`](Self::set_parameters)
    /// take effect here; `dt` is kept.
    pub fn reset(&mut self) {
        self.reset_with_capacity(0);
    }

    fn reset_with_capacity(&mut self, num_steps: usize) {
        if let Some(params) = self.pending.take() {
            self.params = params;
        }
        self.plant = PlantState::initial();
        self.state = ControllerState::zero();
        self.trajectory = Trajectory::with_capacity(self.plant.temperature, num_steps);
        self.diverged = false;
    }

    /// Supply the setpoint and gains for the next run.
    ///
    /// Parameters stay fixed for the duration of a run: a run in progress
    /// keeps its gains, and the new ones apply from the next
    /// [`reset`](Self::reset) or [`run`](Self::run).
    pub fn set_parameters(&mut self, params: ControllerParameters<T>) {
        self.pending = Some(params);
    }

    /// Parameters driving the current run
    pub fn parameters(&self) -> &ControllerParameters<T> {
        &self.params
    }

    pub fn controller_state(&self) -> ControllerState<T> {
        self.state
    }

    pub fn plant(&self) -> PlantState<T> {
        self.plant
    }

    pub fn trajectory(&self) -> &Trajectory<T> {
        &self.trajectory
    }

    pub fn into_trajectory(self) -> Trajectory<T> {
        self.trajectory
    }

    /// Advance the closed loop by one step
    pub fn step(&mut self) -> Result<StepRecord<T>> {
        let step = self.trajectory.num_steps();
        let (control, next_state) =
            controller::step(&self.params, self.plant.temperature, self.state, self.dt)?;

        let temperature = self.plant.advance(control.output);
        self.trajectory.push(temperature, control.output);
        self.state = next_state;

        tracing::trace!(
            step,
            error = as_f64(control.error),
            output = as_f64(control.output),
            temperature = as_f64(temperature),
            "simulation step"
        );

        if !self.diverged && !temperature.is_finite() {
            self.diverged = true;
            tracing::warn!(
                step,
                temperature = as_f64(temperature),
                "plant temperature is no longer finite"
            );
        }

        Ok(StepRecord {
            step,
            control,
            temperature,
        })
    }

    /// Start a fresh run from the initial conditions and execute `num_steps`
    /// steps.
    ///
    /// Repeated calls with the same parameters produce identical
    /// trajectories; nothing carries over from an earlier run.
    pub fn run(&mut self, num_steps: usize) -> Result<&Trajectory<T>> {
        if num_steps == 0 {
            return Err(SimError::InvalidStepCount { num_steps });
        }

        self.reset_with_capacity(num_steps);
        tracing::debug!(
            setpoint = as_f64(self.params.setpoint),
            kp = as_f64(self.params.kp),
            ki = as_f64(self.params.ki),
            kd = as_f64(self.params.kd),
            dt = as_f64(self.dt),
            num_steps,
            "starting simulation run"
        );

        for _ in 0..num_steps {
            self.step()?;
        }

        tracing::debug!(
            final_temperature = as_f64(self.trajectory.final_temperature()),
            "simulation run finished"
        );
        Ok(&self.trajectory)
    }
}

/// Run a fresh simulation and return its trajectory
pub fn run<T: Float>(
    params: ControllerParameters<T>,
    num_steps: usize,
    dt: T,
) -> Result<Trajectory<T>> {
    if num_steps == 0 {
        return Err(SimError::InvalidStepCount { num_steps });
    }
    let mut sim = Simulation::new(params, dt)?;
    sim.run(num_steps)?;
    Ok(sim.into_trajectory())
}

fn validate_dt<T: Float>(dt: T) -> Result<()> {
    if dt.is_finite() && dt > T::zero() {
        Ok(())
    } else {
        Err(SimError::InvalidTimeStep { dt: as_f64(dt) })
    }
}

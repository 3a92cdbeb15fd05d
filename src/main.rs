//! # thermo-pid
//!
//! Command-line front end for the PID temperature simulator.
//!
//! ```bash
//! # defaults: setpoint 75, Kp 1.0, Ki 0.1, Kd 0.05, 50 steps
//! thermo-pid
//!
//! # file first, then flags on top
//! thermo-pid --config tuning.toml --kp 2.0 --steps 120 --format csv
//!
//! # summary only
//! thermo-pid --summary --format none
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use thermo_pid::{SimulationConfig, Trajectory, TrajectorySummary};

/// PID-controlled temperature simulation
#[derive(Parser, Debug)]
#[command(name = "thermo-pid")]
#[command(about = "Simulate a PID-controlled heating loop", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML file with simulation settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target temperature (50-100)
    #[arg(long)]
    setpoint: Option<f64>,

    /// Proportional gain (0-10)
    #[arg(long)]
    kp: Option<f64>,

    /// Integral gain (0-1)
    #[arg(long)]
    ki: Option<f64>,

    /// Derivative gain (0-1)
    #[arg(long)]
    kd: Option<f64>,

    /// Number of time steps (10-200)
    #[arg(short = 'n', long)]
    steps: Option<usize>,

    /// Step duration
    #[arg(long)]
    dt: Option<f64>,

    /// Trajectory output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Print a summary of the run after the trajectory
    #[arg(short, long)]
    summary: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
    /// Trajectory is not printed
    None,
}

impl Cli {
    fn resolve_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(setpoint) = self.setpoint {
            config.setpoint = setpoint;
        }
        if let Some(kp) = self.kp {
            config.kp = kp;
        }
        if let Some(ki) = self.ki {
            config.ki = ki;
        }
        if let Some(kd) = self.kd {
            config.kd = kd;
        }
        if let Some(steps) = self.steps {
            config.num_steps = steps;
        }
        if let Some(dt) = self.dt {
            config.dt = dt;
        }

        Ok(config)
    }
}

#[derive(Serialize)]
struct Report<'a> {
    config: &'a SimulationConfig,
    trajectory: &'a Trajectory<f64>,
    summary: &'a TrajectorySummary<f64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("thermo_pid=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    config.validate().context("invalid simulation settings")?;
    tracing::info!(
        setpoint = config.setpoint,
        kp = config.kp,
        ki = config.ki,
        kd = config.kd,
        num_steps = config.num_steps,
        "running simulation"
    );

    let trajectory = config.simulate()?;
    let summary = trajectory.summary(config.setpoint);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Table => write_table(&mut out, &trajectory)?,
        OutputFormat::Csv => write_csv(&mut out, &trajectory)?,
        OutputFormat::Json => {
            let report = Report {
                config: &config,
                trajectory: &trajectory,
                summary: &summary,
            };
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        },
        OutputFormat::None => {},
    }

    if cli.summary && cli.format != OutputFormat::Json {
        writeln!(out, "\n{}", summary)?;
    }

    tracing::info!(
        final_temperature = summary.final_temperature,
        final_error = summary.final_error,
        "simulation complete"
    );
    Ok(())
}

fn write_table<W: Write>(out: &mut W, trajectory: &Trajectory<f64>) -> io::Result<()> {
    writeln!(out, "Step | Temp(°C) | Output")?;
    writeln!(out, "-----|----------|----------")?;
    for sample in trajectory.samples() {
        match sample.output {
            Some(output) => writeln!(
                out,
                "{:4} | {:8.3} | {:9.3}",
                sample.step, sample.temperature, output
            )?,
            None => writeln!(out, "{:4} | {:8.3} |", sample.step, sample.temperature)?,
        }
    }
    Ok(())
}

fn write_csv<W: Write>(out: &mut W, trajectory: &Trajectory<f64>) -> io::Result<()> {
    writeln!(out, "step,temperature,output")?;
    for sample in trajectory.samples() {
        match sample.output {
            Some(output) => writeln!(out, "{},{},{}", sample.step, sample.temperature, output)?,
            None => writeln!(out, "{},{},", sample.step, sample.temperature)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["thermo-pid", "--kp", "2.5", "--steps", "120"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.kp, 2.5);
        assert_eq!(config.num_steps, 120);
        assert_eq!(config.setpoint, 75.0);
    }

    #[test]
    fn test_csv_layout() {
        let trajectory = SimulationConfig {
            num_steps: 10,
            ..Default::default()
        }
        .simulate()
        .unwrap();

        let mut buf = Vec::new();
        write_csv(&mut buf, &trajectory).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "step,temperature,output");
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[1], "0,50,28.75");
        assert!(lines[11].ends_with(','));
    }

    #[test]
    fn test_table_has_row_per_sample() {
        let trajectory = SimulationConfig::default().simulate().unwrap();
        let mut buf = Vec::new();
        write_table(&mut buf, &trajectory).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 2 + 51);
    }
}

//! Simple temperature control example
//! Run with: cargo run --example basic_temperature

use thermo_pid::{ControllerParameters, Simulation};

fn main() {
    println!("=== Basic Temperature Control ===\n");

    // Target temperature: 75°C
    let params = ControllerParameters::<f64>::new(75.0, 1.0, 0.1, 0.05);
    let dt = 1.0;

    let mut sim = match Simulation::new(params, dt) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("cannot start simulation: {e}");
            return;
        }
    };

    // Temperature and error are read after the step; output and its terms
    // are what the controller applied during it.
    println!("Step | Temp(°C) | Error(°C) | Output |   P    |   I    |   D");
    println!("-----|----------|-----------|--------|--------|--------|-------");

    for _ in 0..100 {
        let record = match sim.step() {
            Ok(record) => record,
            Err(e) => {
                eprintln!("step failed: {e}");
                return;
            }
        };
        let c = record.control;
        let error = params.setpoint - record.temperature;

        // Print every fifth step
        if record.step % 5 == 0 {
            println!(
                "{:4} | {:8.2} | {:9.2} | {:6.2} | {:6.2} | {:6.2} | {:6.2}",
                record.step, record.temperature, error, c.output, c.p, c.i, c.d
            );
        }

        // Check if we've reached steady state
        if record.step > 20 && error.abs() < 0.05 {
            println!("\n✓ Steady state reached at step {}", record.step);
            break;
        }
    }

    println!("\n{}", sim.trajectory().summary(params.setpoint));
}

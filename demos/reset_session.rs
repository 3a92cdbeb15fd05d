//! Re-running and resetting a simulation session
//! Run with: cargo run --example reset_session

use thermo_pid::{ControllerParameters, Simulation};

fn main() {
    println!("=== Reset Session ===\n");

    let params = ControllerParameters::<f64>::new(90.0, 2.0, 0.2, 0.1);
    let mut sim = match Simulation::new(params, 1.0) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("cannot start simulation: {e}");
            return;
        }
    };

    let first = match sim.run(60) {
        Ok(traj) => traj.clone(),
        Err(e) => {
            eprintln!("run failed: {e}");
            return;
        }
    };
    println!(
        "First run:  final {:.4}°C, integral {:.4}",
        first.final_temperature(),
        sim.controller_state().integral_accumulator
    );

    // Retune, then go back to the first gains
    sim.set_parameters(params.with_gains(6.0, 0.6, 0.6));
    if let Ok(traj) = sim.run(60) {
        println!("Retuned:    final {:.4}°C", traj.final_temperature());
    }

    sim.reset();
    sim.set_parameters(params);
    println!(
        "After reset: {} sample(s), integral {}",
        sim.trajectory().temperatures().len(),
        sim.controller_state().integral_accumulator
    );

    match sim.run(60) {
        Ok(second) => {
            println!("Second run: final {:.4}°C", second.final_temperature());
            println!("\nIdentical to first run: {}", *second == first);
        }
        Err(e) => eprintln!("run failed: {e}"),
    }
}

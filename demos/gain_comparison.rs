//! P, PI and PID side by side on the same plant
//! Run with: cargo run --example gain_comparison

use thermo_pid::{run, ControllerParameters};

fn main() {
    println!("=== Gain Comparison (setpoint 75°C, 100 steps) ===\n");

    let cases = [
        ("P", ControllerParameters::<f64>::new(75.0, 1.0, 0.0, 0.0)),
        ("PI", ControllerParameters::<f64>::new(75.0, 1.0, 0.1, 0.0)),
        ("PID", ControllerParameters::<f64>::new(75.0, 1.0, 0.1, 0.05)),
        ("hot PID", ControllerParameters::<f64>::new(75.0, 8.0, 0.8, 0.5)),
    ];

    println!("Mode    | Final(°C) | Error  | Overshoot | Peak Output");
    println!("--------|-----------|--------|-----------|------------");

    for (name, params) in cases {
        match run(params, 100, 1.0) {
            Ok(traj) => {
                let s = traj.summary(params.setpoint);
                println!(
                    "{:7} | {:9.3} | {:6.3} | {:9.3} | {:11.2}",
                    name, s.final_temperature, s.final_error, s.overshoot, s.peak_output
                );
            }
            Err(e) => println!("{:7} | failed: {e}", name),
        }
    }

    // Proportional control alone settles one degree short: Kp * e * 0.1 must
    // cancel the 0.1 passive loss, so e = 1 / Kp.
    println!("\nP-only steady-state error = 1 / Kp");
}

//! Run a circuit over a fully symbolic initial state, then ground it

use kronq_sim::{Complex64, Scalar, SymbolicSimulator};
use std::collections::HashMap;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut sim = SymbolicSimulator::symbolic(2)?;

    sim.h(1)?;
    sim.cx(1, 2)?;

    let record = sim.measure(&[1, 2])?;
    println!("symbolic probabilities:");
    for (label, p) in record.labels().iter().zip(record.probabilities()) {
        println!("  {label}  {p}");
    }

    // ground the initial state at |00⟩ and recover the Bell statistics
    let mut bindings = HashMap::new();
    for i in 1..=2 {
        bindings.insert(format!("a{i}"), Complex64::new(1.0, 0.0));
        bindings.insert(format!("b{i}"), Complex64::new(0.0, 0.0));
    }

    println!("grounded at |00⟩:");
    for (label, p) in record.labels().iter().zip(record.probabilities()) {
        let value = p
            .substitute(&bindings)
            .eval()
            .expect("all symbols are bound");
        println!("  {label}  {:.4}", value.re);
    }
    Ok(())
}

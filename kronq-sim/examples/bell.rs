//! Entangle two of three qubits and inspect the resulting statistics

use kronq_sim::NumericSimulator;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut sim = NumericSimulator::new(3)?;

    sim.h(1)?;
    sim.cnot(1, 3)?;

    let record = sim.measure(&[1, 3])?;
    for (label, p) in record.labels().iter().zip(record.evaluated()?) {
        println!("{label}  {p:.4}");
    }

    println!("purity: {}", sim.purity());
    println!("state:  {}", sim);
    println!("ops:\n{}", sim.format_history());
    Ok(())
}

use beamx::{AnalysisError, Beam, Restraint};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut beam = Beam::new();
    beam.add_support(5.0, Restraint::roller())?;
    beam.add_point_load(-1_000.0, 2.0, 90.0)?;

    match beam.solve() {
        Err(AnalysisError::UnstableBeam(reason)) => println!("cannot solve: {reason}"),
        Ok(_) => println!("unexpectedly stable"),
    }
    println!("status = {:?}", beam.status());

    Ok(())
}

use beamx::{Beam, Restraint};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut beam = Beam::with_properties(10.0, 2.0e11, 1.0e-5, 51)?;
    beam.add_support(0.0, Restraint::fixed())?;
    beam.add_support(10.0, Restraint::roller())?;
    beam.add_point_load(-1_000.0, 5.0, 90.0)?;
    beam.add_distributed_load(6.0, 10.0, -250.0)?;

    let solution = beam.solve()?;

    let (x, w) = solution.max_abs_deflection();
    println!("max deflection = {w:.3e} m at x = {x:.2} m");
    let (x, m) = solution.max_abs_moment();
    println!("max moment = {m:.3e} N m at x = {x:.2} m");

    Ok(())
}

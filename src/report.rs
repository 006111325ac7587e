use beamx::{Beam, Solution};
use serde::Serialize;
use std::fmt::Write;

/// Result arrays in the shape written by `--json`.
#[derive(Debug, Serialize)]
pub struct SolutionReport {
    /// Node positions in metres.
    pub node_positions: Vec<f64>,
    /// Deflection per node in metres.
    pub deflections: Vec<f64>,
    /// Slope per node in radians.
    pub slopes: Vec<f64>,
    /// Positions of the trimmed moment and shear arrays.
    pub moment_positions: Vec<f64>,
    /// Bending moments in newton metres.
    pub moments: Vec<f64>,
    /// Shear forces in newtons.
    pub shears: Vec<f64>,
}

impl From<&Solution> for SolutionReport {
    fn from(solution: &Solution) -> Self {
        Self {
            node_positions: solution.node_positions().to_vec(),
            deflections: solution.deflections().to_vec(),
            slopes: solution.slopes().to_vec(),
            moment_positions: solution.moment_positions().to_vec(),
            moments: solution.moments().to_vec(),
            shears: solution.shears().to_vec(),
        }
    }
}

/// Render a textual summary of a solved beam.
///
/// Sign convention: upward loads and deflections are positive, sagging moments
/// are negative. See <https://en.wikipedia.org/wiki/Euler%E2%80%93Bernoulli_beam_theory>.
#[must_use]
pub fn render_summary(beam: &Beam, solution: &Solution) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Beam analysis (L = {:.3} m, EI = {:.3e} N m^2, {} nodes)",
        beam.length(),
        beam.material().flexural_rigidity(),
        beam.node_count()
    )
    .expect("writing to string cannot fail");

    for support in beam.supports() {
        writeln!(
            &mut output,
            "Support at {:.3} m: {}",
            support.position, support.restraint
        )
        .expect("writing to string cannot fail");
    }

    let (position, deflection) = solution.max_abs_deflection();
    writeln!(
        &mut output,
        "Max deflection: {deflection:+.4e} m at x = {position:.3} m"
    )
    .expect("writing to string cannot fail");
    let (position, moment) = solution.max_abs_moment();
    writeln!(
        &mut output,
        "Max moment: {moment:+.4e} N m at x = {position:.3} m"
    )
    .expect("writing to string cannot fail");
    let (position, shear) = solution.max_abs_shear();
    writeln!(
        &mut output,
        "Max shear: {shear:+.4e} N at x = {position:.3} m"
    )
    .expect("writing to string cannot fail");

    // Moments and shears are not reported for the trimmed end nodes.
    output.push_str("\n     x [m]      w [m]    theta [rad]      M [N m]        V [N]\n");
    let moment_positions = solution.moment_positions();
    for (index, (x, w)) in solution
        .node_positions()
        .iter()
        .zip(solution.deflections())
        .enumerate()
    {
        let theta = solution.slopes()[index];
        write!(&mut output, "{x:10.3} {w:+10.3e} {theta:+14.3e}")
            .expect("writing to string cannot fail");
        let row = match moment_positions.iter().position(|&m| m == *x) {
            Some(trimmed) => writeln!(
                &mut output,
                " {:+12.3e} {:+12.3e}",
                solution.moments()[trimmed],
                solution.shears()[trimmed]
            ),
            None => writeln!(&mut output, " {:>12} {:>12}", "-", "-"),
        };
        row.expect("writing to string cannot fail");
    }

    output
}

/// Serialise the result arrays as pretty-printed JSON.
///
/// # Errors
///
/// Propagates serialisation failures from `serde_json`.
pub fn render_json(solution: &Solution) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&SolutionReport::from(solution))
}

#[cfg(test)]
mod tests {
    use super::*;
    use beamx::Restraint;

    fn solved_beam() -> Beam {
        let mut beam = Beam::with_properties(10.0, 2.0e11, 1.0e-5, 11).expect("valid beam");
        beam.add_support(0.0, Restraint::fixed()).expect("support fits");
        beam.add_support(10.0, Restraint::roller()).expect("support fits");
        beam.add_point_load(-1_000.0, 5.0, 90.0).expect("load fits");
        beam.solve().expect("stable beam");
        beam
    }

    #[test]
    fn formats_human_readable_report() {
        let beam = solved_beam();
        let solution = beam.solution().expect("solved");
        let report = render_summary(&beam, solution);
        assert!(report.contains("Beam analysis (L = 10.000 m"));
        assert!(report.contains("Support at 0.000 m: xyz"));
        assert!(report.contains("Support at 10.000 m: y"));
        assert!(report.contains("Max deflection: -"));
        // header, five summary lines, blank line, table header, one row per node
        assert_eq!(report.lines().count(), 6 + 2 + 11);
    }

    #[test]
    fn json_carries_every_array() {
        let beam = solved_beam();
        let solution = beam.solution().expect("solved");
        let json = render_json(solution).expect("serialisable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["node_positions"].as_array().map(Vec::len), Some(11));
        assert_eq!(value["moments"].as_array().map(Vec::len), Some(6));
        assert_eq!(value["moment_positions"].as_array().map(Vec::len), Some(6));
    }
}

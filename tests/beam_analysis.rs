#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use beamx::{
    point_load, run_analysis, AnalysisError, AnalysisInput, Beam, Grid, Instability, Material,
    Restraint, SolveStatus, SolverSettings, Support,
};

const LENGTH: f64 = 10.0;
const ELASTIC_MODULUS: f64 = 2.0e11;
const MOMENT_OF_INERTIA: f64 = 1.0e-5;
const FLEXURAL_RIGIDITY: f64 = ELASTIC_MODULUS * MOMENT_OF_INERTIA;

fn beam(node_count: usize, left: &str, right: &str) -> Beam {
    let mut beam = Beam::with_properties(LENGTH, ELASTIC_MODULUS, MOMENT_OF_INERTIA, node_count)
        .expect("valid beam");
    beam.add_support(0.0, left.parse::<Restraint>().expect("valid label"))
        .expect("left support fits");
    beam.add_support(LENGTH, right.parse::<Restraint>().expect("valid label"))
        .expect("right support fits");
    beam
}

fn sign_changes(values: &[f64]) -> usize {
    let scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let signs: Vec<bool> = values
        .iter()
        .filter(|v| v.abs() > 1.0e-9 * scale)
        .map(|v| *v > 0.0)
        .collect();
    signs.windows(2).filter(|pair| pair[0] != pair[1]).count()
}

#[test]
fn propped_cantilever_with_midspan_load() {
    let mut beam = beam(11, "yz", "y");
    beam.add_point_load(-1_000.0, 5.0, 90.0).expect("load fits");
    let solution = beam.solve().expect("propped cantilever is stable");

    assert_eq!(solution.deflections().len(), 11);
    for deflection in solution.deflections() {
        assert!(*deflection <= 1.0e-12, "upward deflection {deflection}");
    }
    assert!(solution.deflections()[0].abs() < 1.0e-12);
    assert!(solution.deflections()[10].abs() < 1.0e-12);

    let lowest = solution
        .deflections()
        .iter()
        .enumerate()
        .fold((0, f64::INFINITY), |best, (index, &w)| {
            if w < best.1 {
                (index, w)
            } else {
                best
            }
        })
        .0;
    assert!((4..=6).contains(&lowest), "lowest node {lowest}");

    let moments = solution.moments().to_vec();
    assert_eq!(moments.len(), 6);
    assert_eq!(solution.shears().len(), 6);
    assert!(sign_changes(&moments) <= 1);
}

#[test]
fn symmetric_beam_deflects_symmetrically() {
    let mut beam = beam(11, "y", "y");
    beam.add_point_load(-1_000.0, 5.0, 90.0).expect("load fits");
    let solution = beam.solve().expect("simply supported beam is stable");

    let deflections = solution.deflections().to_vec();
    let scale = deflections.iter().fold(0.0_f64, |acc, w| acc.max(w.abs()));
    for (left, right) in deflections.iter().zip(deflections.iter().rev()) {
        assert_relative_eq!(*left, *right, epsilon = 1.0e-9 * scale);
    }
    let (position, _) = solution.max_abs_deflection();
    assert_relative_eq!(position, 5.0, epsilon = 1.0e-9);
}

#[test]
fn repeated_solve_reuses_the_cached_result() {
    let mut beam = beam(21, "xyz", "y");
    beam.add_distributed_load(0.0, LENGTH, -500.0)
        .expect("load fits");

    let first = beam.solve().expect("stable").clone();
    let second = beam.solve().expect("stable").clone();
    assert_eq!(first, second);
    assert_eq!(beam.evaluations(), 1);
    assert_eq!(beam.status(), SolveStatus::Solved);
}

#[test]
fn unsupported_system_is_reported_as_unstable() {
    let error = run_analysis(&AnalysisInput {
        grid: Grid::new(LENGTH, 11).expect("valid grid"),
        material: Material::new(ELASTIC_MODULUS, MOMENT_OF_INERTIA),
        supports: &[],
        point_loads: &[point_load(-1_000.0, 5.0)],
        distributed_loads: &[],
        settings: SolverSettings::default(),
    })
    .expect_err("free-free beam is singular");
    assert!(matches!(
        error,
        AnalysisError::UnstableBeam(Instability::Singular { .. })
    ));

    let mut beam = Beam::new();
    beam.add_point_load(-1_000.0, 5.0, 90.0).expect("load fits");
    assert_eq!(
        beam.solve().expect_err("no supports"),
        AnalysisError::UnstableBeam(Instability::NoSupports)
    );
}

#[test]
fn single_roller_is_unstable() {
    let supports = [Support::new(5.0, Restraint::roller())];
    let result = run_analysis(&AnalysisInput {
        grid: Grid::new(LENGTH, 21).expect("valid grid"),
        material: Material::new(ELASTIC_MODULUS, MOMENT_OF_INERTIA),
        supports: &supports,
        point_loads: &[point_load(-1_000.0, 2.0)],
        distributed_loads: &[],
        settings: SolverSettings::default(),
    });
    assert!(result.is_err());
}

#[test]
fn editing_supports_invalidates_the_solution() {
    let mut beam = beam(11, "xyz", "y");
    beam.add_point_load(-1_000.0, 5.0, 90.0).expect("load fits");
    let propped = beam.solve().expect("stable").clone();

    beam.remove_last_support().expect("support present");
    assert_eq!(beam.status(), SolveStatus::Dirty);
    assert!(beam.solution().is_none());

    let cantilever = beam.solve().expect("cantilever is stable").clone();
    assert_ne!(propped, cantilever);
    assert!(cantilever.deflections()[10] < propped.deflections()[10]);
    assert_eq!(beam.evaluations(), 2);
}

#[test]
fn node_positions_are_uniform() {
    let mut beam = beam(31, "y", "y");
    beam.add_point_load(-1_000.0, 3.0, 90.0).expect("load fits");
    let solution = beam.solve().expect("stable");

    let positions = solution.node_positions().to_vec();
    assert_eq!(positions.len(), 31);
    assert_relative_eq!(positions[0], 0.0);
    assert_relative_eq!(positions[30], LENGTH, epsilon = 1.0e-12);
    for pair in positions.windows(2) {
        assert_relative_eq!(pair[1] - pair[0], LENGTH / 30.0, epsilon = 1.0e-12);
    }
}

#[test]
fn uniform_load_matches_closed_form_deflections() {
    let intensity = -1_000.0;
    let reference = intensity * LENGTH.powi(4) / FLEXURAL_RIGIDITY;
    for (left, right, coefficient) in [
        ("y", "y", 5.0 / 384.0),
        ("xyz", "xyz", 1.0 / 384.0),
        ("xyz", "y", 1.0 / 185.0),
    ] {
        let mut beam = beam(101, left, right);
        beam.add_distributed_load(0.0, LENGTH, intensity)
            .expect("load fits");
        let (_, deflection) = beam.solve().expect("stable").max_abs_deflection();
        assert_relative_eq!(
            deflection,
            coefficient * reference,
            max_relative = 1.0e-2
        );
    }
}

#[test]
fn guided_end_deflection_is_pinned() {
    // closed form is 5 q L^4 / (24 EI) ~ -1.042; the rotation stencil gives a fifth of that
    let mut beam = beam(101, "xz", "y");
    beam.add_distributed_load(0.0, LENGTH, -1_000.0)
        .expect("load fits");
    let solution = beam.solve().expect("guided-pinned beam is stable");

    let (position, deflection) = solution.max_abs_deflection();
    assert_relative_eq!(position, 0.0);
    assert_relative_eq!(deflection, -0.208_437_5, max_relative = 1.0e-6);
    assert_relative_eq!(
        solution.deflections()[50],
        -0.169_328_125,
        max_relative = 1.0e-6
    );
}

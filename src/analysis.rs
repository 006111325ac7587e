//! The assemble, restrain, solve and post-process pipeline.

use log::debug;

use crate::assembly::{build_load_vector, build_stiffness_matrix};
use crate::boundary::apply_supports;
use crate::errors::AnalysisError;
use crate::grid::Grid;
use crate::loads::{DistributedLoad, PointLoad};
use crate::post::Solution;
use crate::settings::SolverSettings;
use crate::solver::{solve_deflections, Material};
use crate::supports::Support;

/// Borrowed description of everything the pipeline needs.
#[derive(Clone, Copy, Debug)]
pub struct AnalysisInput<'a> {
    /// Node grid along the beam.
    pub grid: Grid,
    /// Section rigidity.
    pub material: Material,
    /// Supports in insertion order.
    pub supports: &'a [Support],
    /// Point loads.
    pub point_loads: &'a [PointLoad],
    /// Distributed loads.
    pub distributed_loads: &'a [DistributedLoad],
    /// Solver tolerances.
    pub settings: SolverSettings,
}

/// Run the full analysis without any caching or precondition checks.
///
/// # Errors
///
/// Returns [`AnalysisError::UnstableBeam`] when the restrained system is singular.
///
/// # Examples
/// ```
/// use beamx::{point_load, run_analysis, AnalysisInput, Grid, Material, Restraint, SolverSettings, Support};
///
/// let supports = [
///     Support::new(0.0, Restraint::pinned()),
///     Support::new(10.0, Restraint::roller()),
/// ];
/// let solution = run_analysis(&AnalysisInput {
///     grid: Grid::new(10.0, 21).expect("valid grid"),
///     material: Material::new(2.0e11, 1.0e-5),
///     supports: &supports,
///     point_loads: &[point_load(-1_000.0, 5.0)],
///     distributed_loads: &[],
///     settings: SolverSettings::default(),
/// })
/// .expect("simply supported beam is stable");
/// assert_eq!(solution.deflections().len(), 21);
/// ```
pub fn run_analysis(input: &AnalysisInput<'_>) -> Result<Solution, AnalysisError> {
    let grid = &input.grid;
    let mut load = build_load_vector(grid, input.point_loads, input.distributed_loads);
    let mut stiffness = build_stiffness_matrix(grid);
    debug!(
        "assembled {n}x{n} system from {} point and {} distributed loads",
        input.point_loads.len(),
        input.distributed_loads.len(),
        n = grid.node_count(),
    );
    apply_supports(grid, input.supports, &mut stiffness, &mut load);
    let deflections =
        solve_deflections(grid, &input.material, stiffness, &load, &input.settings)?;
    Ok(Solution::from_deflections(
        grid,
        &input.material,
        deflections.iter().copied().collect(),
    ))
}

//! Dense direct solve of the restrained system.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::errors::{AnalysisError, Instability};
use crate::grid::Grid;
use crate::settings::SolverSettings;

/// Flexural rigidity of a beam section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Elastic modulus in pascals.
    pub elastic_modulus: f64,
    /// Second moment of area in metres to the fourth.
    pub moment_of_inertia: f64,
}

impl Material {
    /// Create a [`Material`].
    #[must_use]
    pub const fn new(elastic_modulus: f64, moment_of_inertia: f64) -> Self {
        Self {
            elastic_modulus,
            moment_of_inertia,
        }
    }

    /// Product `E * I`.
    #[must_use]
    pub fn flexural_rigidity(&self) -> f64 {
        self.elastic_modulus * self.moment_of_inertia
    }
}

/// Solve `K v = F h^4 / (E I)` for the nodal deflections.
///
/// # Errors
///
/// Returns [`AnalysisError::UnstableBeam`] when the smallest LU pivot is negligible relative to
/// the largest, when the factorisation cannot be inverted, or when the result is not finite.
pub fn solve_deflections(
    grid: &Grid,
    material: &Material,
    stiffness: DMatrix<f64>,
    load: &DVector<f64>,
    settings: &SolverSettings,
) -> Result<DVector<f64>, AnalysisError> {
    let scale = grid.spacing().powi(4) / material.flexural_rigidity();
    let scaled_load = load.scale(scale);

    let lu = stiffness.lu();
    let pivot_ratio = pivot_ratio(&lu.u());
    debug!("stiffness factorised, pivot ratio {pivot_ratio:e}");
    if pivot_ratio.is_nan() || pivot_ratio <= settings.singularity_tolerance {
        return Err(AnalysisError::UnstableBeam(Instability::Singular {
            pivot_ratio,
        }));
    }
    let deflections = lu
        .solve(&scaled_load)
        .ok_or(AnalysisError::UnstableBeam(Instability::Singular {
            pivot_ratio,
        }))?;
    if deflections.iter().any(|value| !value.is_finite()) {
        return Err(AnalysisError::UnstableBeam(Instability::NonFiniteSolution));
    }
    Ok(deflections)
}

/// Ratio of the smallest to the largest absolute diagonal entry of `upper`.
fn pivot_ratio(upper: &DMatrix<f64>) -> f64 {
    let diagonal = upper.diagonal();
    let largest = diagonal.iter().fold(0.0_f64, |acc, value| acc.max(value.abs()));
    if largest == 0.0 {
        return 0.0;
    }
    let smallest = diagonal
        .iter()
        .fold(f64::INFINITY, |acc, value| acc.min(value.abs()));
    smallest / largest
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::assembly::build_stiffness_matrix;

    #[test]
    fn identity_system_is_scaled_by_rigidity() {
        let grid = Grid::new(18.0, 10).expect("valid grid");
        let material = Material::new(4.0, 0.25);
        let load = DVector::from_element(10, 3.0);
        let deflections = solve_deflections(
            &grid,
            &material,
            DMatrix::identity(10, 10),
            &load,
            &SolverSettings::default(),
        )
        .expect("identity is regular");
        // spacing 2: 3 * 2^4 / (4 * 0.25)
        for value in deflections.iter() {
            assert_relative_eq!(*value, 48.0, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn free_free_operator_is_unstable() {
        let grid = Grid::new(10.0, 11).expect("valid grid");
        let error = solve_deflections(
            &grid,
            &Material::new(2.0e11, 1.0e-5),
            build_stiffness_matrix(&grid),
            &DVector::from_element(11, -1.0),
            &SolverSettings::default(),
        )
        .expect_err("rigid body modes remain");
        assert!(matches!(
            error,
            AnalysisError::UnstableBeam(Instability::Singular { .. })
        ));
    }

    #[test]
    fn zero_matrix_reports_zero_pivot_ratio() {
        assert_eq!(pivot_ratio(&DMatrix::zeros(3, 3)), 0.0);
    }
}

//! Derived fields computed from the nodal deflections.
//!
//! Slopes are taken over the whole grid. Moments skip the rows that use free-end stencils,
//! because differentiating there picks up the stencil artefacts, and shears follow the moments.

use ndarray::{s, Array1, ArrayView1};

use crate::assembly::FREE_END_ROWS;
use crate::grid::Grid;
use crate::solver::Material;

/// Slope samples dropped before the moment derivative at the left end.
pub const MOMENT_TRIM_START: usize = FREE_END_ROWS;
/// Slope samples dropped before the moment derivative at the right end.
pub const MOMENT_TRIM_END: usize = FREE_END_ROWS + 1;

/// Result of a successful beam analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// Node positions in metres.
    node_positions: Array1<f64>,
    /// Transverse deflection at each node in metres.
    deflections: Array1<f64>,
    /// Rotation at each node in radians.
    slopes: Array1<f64>,
    /// Bending moment over the trimmed window in newton metres.
    moments: Array1<f64>,
    /// Shear force over the trimmed window in newtons.
    shears: Array1<f64>,
}

impl Solution {
    /// Derive slopes, moments and shears from `deflections`.
    #[must_use]
    pub fn from_deflections(grid: &Grid, material: &Material, deflections: Array1<f64>) -> Self {
        let spacing = grid.spacing();
        let slopes = gradient(deflections.view(), spacing);
        let trimmed = slopes.slice(s![MOMENT_TRIM_START..slopes.len() - MOMENT_TRIM_END]);
        let moments = gradient(trimmed, spacing) * material.flexural_rigidity();
        let mut shears = gradient(moments.view(), spacing);
        let last = shears.len() - 1;
        shears[0] = shears[1];
        shears[last] = shears[last - 1];
        Self {
            node_positions: grid.positions(),
            deflections,
            slopes,
            moments,
            shears,
        }
    }

    /// Node positions from `0` to the beam length.
    #[must_use]
    pub fn node_positions(&self) -> &Array1<f64> {
        &self.node_positions
    }

    /// Deflection at each node.
    #[must_use]
    pub fn deflections(&self) -> &Array1<f64> {
        &self.deflections
    }

    /// Rotation at each node.
    #[must_use]
    pub fn slopes(&self) -> &Array1<f64> {
        &self.slopes
    }

    /// Bending moment, `M = E I w''`, over the trimmed window.
    #[must_use]
    pub fn moments(&self) -> &Array1<f64> {
        &self.moments
    }

    /// Shear force, `V = dM/dx`, over the trimmed window.
    #[must_use]
    pub fn shears(&self) -> &Array1<f64> {
        &self.shears
    }

    /// Node positions matching [`moments`](Self::moments) and [`shears`](Self::shears).
    #[must_use]
    pub fn moment_positions(&self) -> ArrayView1<'_, f64> {
        let end = self.node_positions.len() - MOMENT_TRIM_END;
        self.node_positions.slice(s![MOMENT_TRIM_START..end])
    }

    /// Largest deflection magnitude and the position where it occurs.
    #[must_use]
    pub fn max_abs_deflection(&self) -> (f64, f64) {
        let (index, value) = arg_max_abs(self.deflections.view());
        (self.node_positions[index], value)
    }

    /// Largest bending moment magnitude and the position where it occurs.
    #[must_use]
    pub fn max_abs_moment(&self) -> (f64, f64) {
        let (index, value) = arg_max_abs(self.moments.view());
        (self.moment_positions()[index], value)
    }

    /// Largest shear magnitude and the position where it occurs.
    #[must_use]
    pub fn max_abs_shear(&self) -> (f64, f64) {
        let (index, value) = arg_max_abs(self.shears.view());
        (self.moment_positions()[index], value)
    }
}

/// Derivative with central differences inside and one-sided differences at both ends.
fn gradient(values: ArrayView1<'_, f64>, spacing: f64) -> Array1<f64> {
    let n = values.len();
    let mut derivative = Array1::zeros(n);
    derivative[0] = (values[1] - values[0]) / spacing;
    derivative[n - 1] = (values[n - 1] - values[n - 2]) / spacing;
    for i in 1..n - 1 {
        derivative[i] = (values[i + 1] - values[i - 1]) / (2.0 * spacing);
    }
    derivative
}

/// Index and signed value of the entry with the largest magnitude.
fn arg_max_abs(values: ArrayView1<'_, f64>) -> (usize, f64) {
    values
        .iter()
        .copied()
        .enumerate()
        .fold((0, 0.0), |best, (index, value)| {
            if value.abs() > best.1.abs() {
                (index, value)
            } else {
                best
            }
        })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn gradient_is_exact_for_quadratics() {
        let values = Array1::from_iter((0..6_i32).map(|i| f64::from(i * i)));
        let derivative = gradient(values.view(), 1.0);
        assert_relative_eq!(derivative[0], 1.0);
        assert_relative_eq!(derivative[3], 6.0);
        assert_relative_eq!(derivative[5], 9.0);
    }

    #[test]
    fn trimmed_fields_have_expected_lengths() {
        let grid = Grid::new(10.0, 11).expect("valid grid");
        let deflections = Array1::from_iter((0..11_i32).map(|i| 1.0e-3 * f64::from(i * i)));
        let solution = Solution::from_deflections(&grid, &Material::new(2.0, 3.0), deflections);
        assert_eq!(solution.slopes().len(), 11);
        assert_eq!(solution.moments().len(), 6);
        assert_eq!(solution.shears().len(), 6);
        assert_eq!(solution.moment_positions().len(), 6);
        assert_relative_eq!(solution.moment_positions()[0], 2.0);
    }

    #[test]
    fn curvature_of_a_parabola_gives_constant_moment() {
        let grid = Grid::new(10.0, 11).expect("valid grid");
        // w = x^2 / 2 has w'' = 1
        let deflections = grid.positions().mapv(|x| 0.5 * x * x);
        let solution = Solution::from_deflections(&grid, &Material::new(2.0, 3.0), deflections);
        for moment in solution.moments().iter() {
            assert_relative_eq!(*moment, 6.0, epsilon = 1.0e-9);
        }
        for shear in solution.shears().iter() {
            assert_relative_eq!(*shear, 0.0, epsilon = 1.0e-9);
        }
    }

    #[test]
    fn edge_shears_copy_their_neighbours() {
        let grid = Grid::new(10.0, 11).expect("valid grid");
        let deflections = grid.positions().mapv(|x| x.powi(4) / 24.0);
        let solution = Solution::from_deflections(&grid, &Material::new(1.0, 1.0), deflections);
        let shears = solution.shears();
        let last = shears.len() - 1;
        assert_eq!(shears[0], shears[1]);
        assert_eq!(shears[last], shears[last - 1]);
    }

    #[test]
    fn extrema_report_signed_values() {
        let grid = Grid::new(10.0, 11).expect("valid grid");
        let deflections = grid.positions().mapv(|x| -x * (10.0 - x));
        let solution = Solution::from_deflections(&grid, &Material::new(1.0, 1.0), deflections);
        let (position, value) = solution.max_abs_deflection();
        assert_relative_eq!(position, 5.0);
        assert_relative_eq!(value, -25.0);
    }
}

//! Assembly of the finite-difference load vector and stiffness stencil.

use nalgebra::{DMatrix, DVector};

use crate::grid::Grid;
use crate::loads::{DistributedLoad, PointLoad};

/// Centred fourth-derivative stencil applied to interior rows.
pub(crate) const INTERIOR_STENCIL: [f64; 5] = [1.0, -4.0, 6.0, -4.0, 1.0];

/// Number of rows at each end that use a free-end stencil instead of the interior one.
pub(crate) const FREE_END_ROWS: usize = 2;

/// Free-end stencil for the first row, starting at column 0.
const LEFT_END_ROW: [f64; 3] = [2.0, -4.0, 2.0];
/// Free-end stencil for the second row, starting at column 0.
const LEFT_NEAR_END_ROW: [f64; 4] = [-2.0, 5.0, -4.0, 1.0];
/// Free-end stencil for the second-to-last row, ending at the last column.
const RIGHT_NEAR_END_ROW: [f64; 4] = [1.0, -4.0, 5.0, -2.0];
/// Free-end stencil for the last row, ending at the last column.
const RIGHT_END_ROW: [f64; 3] = [2.0, -4.0, 2.0];

/// Assemble the nodal load vector.
///
/// Point loads are projected onto the transverse axis and divided by the grid spacing so they
/// share units with the distributed loads, which are added to every node they cover.
#[must_use]
pub fn build_load_vector(
    grid: &Grid,
    point_loads: &[PointLoad],
    distributed_loads: &[DistributedLoad],
) -> DVector<f64> {
    let spacing = grid.spacing();
    let mut load = DVector::zeros(grid.node_count());
    for point in point_loads {
        load[grid.node_index(point.position)] += point.transverse_component() / spacing;
    }
    for distributed in distributed_loads {
        let first = grid.node_index(distributed.start);
        let last = grid.node_index(distributed.end);
        for node in first..=last {
            load[node] += distributed.magnitude;
        }
    }
    load
}

/// Assemble the dimensionless fourth-derivative operator with free ends.
#[must_use]
pub fn build_stiffness_matrix(grid: &Grid) -> DMatrix<f64> {
    let n = grid.node_count();
    let mut matrix = DMatrix::zeros(n, n);
    for row in FREE_END_ROWS..n - FREE_END_ROWS {
        write_row(&mut matrix, row, row - 2, &INTERIOR_STENCIL);
    }
    write_row(&mut matrix, 0, 0, &LEFT_END_ROW);
    write_row(&mut matrix, 1, 0, &LEFT_NEAR_END_ROW);
    write_row(&mut matrix, n - 2, n - 4, &RIGHT_NEAR_END_ROW);
    write_row(&mut matrix, n - 1, n - 3, &RIGHT_END_ROW);
    matrix
}

/// Zero `row` and write `coefficients` starting at `first_column`.
pub(crate) fn write_row(
    matrix: &mut DMatrix<f64>,
    row: usize,
    first_column: usize,
    coefficients: &[f64],
) {
    matrix.row_mut(row).fill(0.0);
    for (offset, coefficient) in coefficients.iter().enumerate() {
        matrix[(row, first_column + offset)] = *coefficient;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::loads::{distributed_load, point_load};

    fn grid() -> Grid {
        Grid::new(10.0, 11).expect("valid grid")
    }

    #[test]
    fn no_loads_give_zero_vector() {
        let load = build_load_vector(&grid(), &[], &[]);
        assert_eq!(load.len(), 11);
        assert!(load.iter().all(|value| *value == 0.0));
    }

    #[test]
    fn loads_accumulate_at_shared_nodes() {
        let grid = Grid::new(5.0, 11).expect("valid grid");
        let load = build_load_vector(
            &grid,
            &[point_load(-10.0, 2.5), PointLoad::new(4.0, 2.6, 30.0)],
            &[distributed_load(2.0, 3.0, 7.0)],
        );
        // spacing 0.5: both point loads land on node 5, the line load covers nodes 4..=6
        assert_relative_eq!(load[5], -10.0 / 0.5 + 2.0 / 0.5 + 7.0, epsilon = 1.0e-9);
        assert_relative_eq!(load[4], 7.0);
        assert_relative_eq!(load[6], 7.0);
        assert_relative_eq!(load[3], 0.0);
        assert_relative_eq!(load[7], 0.0);
    }

    #[test]
    fn stiffness_rows_use_expected_stencils() {
        let matrix = build_stiffness_matrix(&grid());
        assert_eq!(matrix.shape(), (11, 11));
        assert_eq!(
            matrix.row(0).iter().copied().collect::<Vec<_>>()[..4],
            [2.0, -4.0, 2.0, 0.0]
        );
        assert_eq!(
            matrix.row(1).iter().copied().collect::<Vec<_>>()[..5],
            [-2.0, 5.0, -4.0, 1.0, 0.0]
        );
        assert_eq!(
            matrix.row(5).iter().copied().collect::<Vec<_>>()[3..8],
            INTERIOR_STENCIL
        );
        assert_eq!(
            matrix.row(9).iter().copied().collect::<Vec<_>>()[6..],
            [0.0, 1.0, -4.0, 5.0, -2.0]
        );
        assert_eq!(
            matrix.row(10).iter().copied().collect::<Vec<_>>()[7..],
            [0.0, 2.0, -4.0, 2.0]
        );
    }

    #[test]
    fn every_row_sums_to_zero() {
        let matrix = build_stiffness_matrix(&grid());
        for row in matrix.row_iter() {
            assert_relative_eq!(row.sum(), 0.0);
        }
    }
}

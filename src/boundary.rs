//! Support restraints written into the assembled system.
//!
//! Every restraint overwrites whole rows of the stiffness matrix. Rows near a support that
//! would otherwise reference nodes beyond the beam are replaced by one-sided stencils, chosen
//! by which half of the beam the support lies in.

use nalgebra::{DMatrix, DVector};

use crate::assembly::write_row;
use crate::grid::Grid;
use crate::supports::{RestraintKind, Support};

/// Zero-rotation stencil for a support in the left half, starting at the support node.
const ROTATION_LEFT: [f64; 3] = [6.0, -8.0, 2.0];
/// Zero-rotation stencil for a support in the right half, ending at the support node.
const ROTATION_RIGHT: [f64; 3] = [2.0, -8.0, 6.0];
/// Clamped-neighbour stencil for a support in the left half, starting at the support node.
///
/// Mirror image of [`CLAMP_RIGHT`] over the same columns relative to the support. Shifting it one
/// column further right produces upward deflections under downward loads.
const CLAMP_LEFT: [f64; 4] = [0.0, 7.0, -4.0, 1.0];
/// Clamped-neighbour stencil for a support in the right half, ending at the support node.
const CLAMP_RIGHT: [f64; 4] = [1.0, -4.0, 7.0, 0.0];

/// Apply every support to the stiffness matrix and load vector in insertion order.
pub fn apply_supports(
    grid: &Grid,
    supports: &[Support],
    stiffness: &mut DMatrix<f64>,
    load: &mut DVector<f64>,
) {
    for support in supports {
        let node = grid.node_index(support.position);
        match support.restraint.kind {
            RestraintKind::None => {}
            RestraintKind::Deflection => fix_deflection(node, stiffness, load),
            RestraintKind::RotationOnly => {
                if grid.in_left_half(node) {
                    patch_near_left_end(stiffness, node, node, &ROTATION_LEFT);
                } else {
                    patch_near_right_end(stiffness, node, node, &ROTATION_RIGHT);
                }
            }
            RestraintKind::DeflectionAndRotation => {
                fix_deflection(node, stiffness, load);
                if grid.in_left_half(node) {
                    patch_near_left_end(stiffness, node + 1, node, &CLAMP_LEFT);
                } else {
                    patch_near_right_end(stiffness, node - 1, node, &CLAMP_RIGHT);
                }
            }
        }
    }
}

/// Replace row `node` with `w[node] = 0`.
fn fix_deflection(node: usize, stiffness: &mut DMatrix<f64>, load: &mut DVector<f64>) {
    write_row(stiffness, node, node, &[1.0]);
    load[node] = 0.0;
}

/// Overwrite `row` with a stencil that starts at the support node and looks rightwards.
fn patch_near_left_end(stiffness: &mut DMatrix<f64>, row: usize, node: usize, stencil: &[f64]) {
    write_row(stiffness, row, node, stencil);
}

/// Overwrite `row` with a stencil that ends at the support node and looks leftwards.
fn patch_near_right_end(stiffness: &mut DMatrix<f64>, row: usize, node: usize, stencil: &[f64]) {
    write_row(stiffness, row, node + 1 - stencil.len(), stencil);
}

//! Tunable parameters of the linear solve.

use serde::{Deserialize, Serialize};

/// Settings used by [`run_analysis`](crate::run_analysis).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Pivot ratio `min |u_ii| / max |u_ii|` at or below which the stiffness matrix is treated
    /// as singular.
    pub singularity_tolerance: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            singularity_tolerance: 1.0e-12,
        }
    }
}

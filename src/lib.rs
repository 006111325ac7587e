#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod analysis;
mod assembly;
mod beam;
mod boundary;
mod cache;
mod errors;
mod grid;
mod loads;
mod post;
mod settings;
mod solver;
mod supports;

pub use analysis::{run_analysis, AnalysisInput};
pub use assembly::{build_load_vector, build_stiffness_matrix};
pub use beam::{Beam, SolveStatus};
pub use boundary::apply_supports;
pub use errors::{
    AnalysisError, BeamEditError, GeometryError, Instability, ParseRestraintError, PropertyError,
};
pub use grid::{Grid, MIN_NODE_COUNT};
pub use loads::{distributed_load, point_load, DistributedLoad, Effort, EffortKind, PointLoad};
pub use post::{Solution, MOMENT_TRIM_END, MOMENT_TRIM_START};
pub use settings::SolverSettings;
pub use solver::{solve_deflections, Material};
pub use supports::{Restraint, RestraintKind, Support};

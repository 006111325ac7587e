//! Error types produced while editing or analysing beams.

use thiserror::Error;

/// Error returned when the beam analysis fails.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Returned when the supports leave a rigid-body mode or the system is numerically singular.
    #[error("beam is unstable: {0}")]
    UnstableBeam(Instability),
}

/// Reason a beam could not be solved.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum Instability {
    /// Returned when no support has been placed on the beam.
    #[error("no supports are defined")]
    NoSupports,
    /// Returned when the factorised stiffness matrix has a vanishing pivot.
    #[error("stiffness matrix is singular (pivot ratio {pivot_ratio:e}); check supports")]
    Singular {
        /// Ratio of the smallest to the largest absolute LU pivot.
        pivot_ratio: f64,
    },
    /// Returned when the solve produced NaN or infinite deflections.
    #[error("solution contains non-finite deflections")]
    NonFiniteSolution,
}

/// Error returned when a beam property or the node count is rejected.
///
/// The variants carry the rejected value so callers can present actionable feedback.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum PropertyError {
    /// Returned when the beam length is zero, negative or not finite.
    #[error("length must be positive (received {length})")]
    NonPositiveLength {
        /// Rejected length in metres.
        length: f64,
    },
    /// Returned when the elastic modulus is zero, negative or not finite.
    #[error("elastic modulus must be positive (received {elastic_modulus})")]
    NonPositiveElasticModulus {
        /// Rejected elastic modulus in pascals.
        elastic_modulus: f64,
    },
    /// Returned when the second moment of area is zero, negative or not finite.
    #[error("moment of inertia must be positive (received {moment_of_inertia})")]
    NonPositiveMomentOfInertia {
        /// Rejected second moment of area in metres to the fourth.
        moment_of_inertia: f64,
    },
    /// Returned when the grid would have fewer nodes than the stencils need.
    #[error("node count must be at least {minimum} (received {node_count})")]
    TooFewNodes {
        /// Rejected node count.
        node_count: usize,
        /// Smallest accepted node count.
        minimum: usize,
    },
}

/// Error returned when a support or load is placed incorrectly.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Returned when a position lies outside `[0, length]`.
    #[error("position {position} is outside the beam [0, {length}]")]
    OutsideBeam {
        /// Rejected position in metres.
        position: f64,
        /// Current beam length in metres.
        length: f64,
    },
    /// Returned when a position is NaN or infinite.
    #[error("position must be finite (received {position})")]
    NonFinitePosition {
        /// Rejected position.
        position: f64,
    },
    /// Returned when a point load angle lies outside `[0, 180]` degrees.
    #[error("angle must lie within [0, 180] degrees (received {angle})")]
    AngleOutOfRange {
        /// Rejected angle in degrees.
        angle: f64,
    },
    /// Returned when a load magnitude is zero or not finite.
    #[error("load magnitude must be non-zero and finite (received {magnitude})")]
    InvalidMagnitude {
        /// Rejected magnitude.
        magnitude: f64,
    },
}

/// Error returned when editing a [`Beam`](crate::Beam) with invalid input.
///
/// Validation happens before any mutation, so the beam is unchanged when one of these is
/// returned.
///
/// # Examples
///
/// ```
/// use beamx::{Beam, BeamEditError, PropertyError};
///
/// let mut beam = Beam::new();
/// let error = beam.set_node_count(4).expect_err("too few nodes are rejected");
/// assert_eq!(
///     error,
///     BeamEditError::InvalidConfiguration(PropertyError::TooFewNodes {
///         node_count: 4,
///         minimum: 10,
///     })
/// );
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum BeamEditError {
    /// Returned when the length, material or node count is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] PropertyError),
    /// Returned when a support or load is positioned or oriented incorrectly.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),
    /// Returned when a new support is within one grid spacing of an existing one.
    #[error("support at {position} is too close to the support at {existing}")]
    ConflictingSupport {
        /// Position of the rejected support in metres.
        position: f64,
        /// Position of the support it conflicts with in metres.
        existing: f64,
    },
}

/// Error returned when a restraint label contains an unknown character.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown restraint '{found}' in label \"{label}\"; expected a combination of x, y and z")]
pub struct ParseRestraintError {
    /// The label that failed to parse.
    pub label: String,
    /// The offending character.
    pub found: char,
}

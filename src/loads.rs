//! Transverse loads applied to the beam.

use crate::errors::GeometryError;

/// Concentrated force acting at a single position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLoad {
    /// Signed magnitude in newtons.
    pub magnitude: f64,
    /// Distance from the left end in metres.
    pub position: f64,
    /// Angle from the beam axis in degrees; `90` acts fully transverse.
    pub angle: f64,
}

impl PointLoad {
    /// Create a [`PointLoad`] with an explicit angle.
    #[must_use]
    pub const fn new(magnitude: f64, position: f64, angle: f64) -> Self {
        Self {
            magnitude,
            position,
            angle,
        }
    }

    /// Component of the load acting transverse to the beam.
    #[must_use]
    pub fn transverse_component(&self) -> f64 {
        self.magnitude * self.angle.to_radians().sin()
    }

    /// Check the load against a beam of the given length.
    pub(crate) fn validate(&self, length: f64) -> Result<(), GeometryError> {
        check_magnitude(self.magnitude)?;
        if !(0.0..=180.0).contains(&self.angle) {
            return Err(GeometryError::AngleOutOfRange { angle: self.angle });
        }
        check_position(self.position, length)
    }
}

/// Uniform line load acting over an interval of the beam.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistributedLoad {
    /// Start of the loaded interval in metres.
    pub start: f64,
    /// End of the loaded interval in metres.
    pub end: f64,
    /// Signed intensity in newtons per metre.
    pub magnitude: f64,
}

impl DistributedLoad {
    /// Create a [`DistributedLoad`], ordering the endpoints so that `start <= end`.
    #[must_use]
    pub fn new(start: f64, end: f64, magnitude: f64) -> Self {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        Self {
            start,
            end,
            magnitude,
        }
    }

    /// Check the load against a beam of the given length.
    pub(crate) fn validate(&self, length: f64) -> Result<(), GeometryError> {
        check_magnitude(self.magnitude)?;
        check_position(self.start, length)?;
        check_position(self.end, length)
    }
}

/// Kind of load recorded in the effort log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffortKind {
    /// A [`PointLoad`].
    Point,
    /// A [`DistributedLoad`].
    Distributed,
}

/// A load removed from the beam, returned by [`Beam::remove_last_effort`](crate::Beam::remove_last_effort).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effort {
    /// A removed point load.
    Point(PointLoad),
    /// A removed distributed load.
    Distributed(DistributedLoad),
}

impl Effort {
    /// The kind of the wrapped load.
    #[must_use]
    pub fn kind(&self) -> EffortKind {
        match self {
            Effort::Point(_) => EffortKind::Point,
            Effort::Distributed(_) => EffortKind::Distributed,
        }
    }
}

/// Convenience helper for a transverse [`PointLoad`].
///
/// # Examples
/// ```
/// use beamx::point_load;
///
/// let load = point_load(-1_000.0, 5.0);
/// assert_eq!(load.angle, 90.0);
/// ```
#[must_use]
pub const fn point_load(magnitude: f64, position: f64) -> PointLoad {
    PointLoad::new(magnitude, position, 90.0)
}

/// Convenience helper for a [`DistributedLoad`].
///
/// # Examples
/// ```
/// use beamx::distributed_load;
///
/// let load = distributed_load(8.0, 2.0, -500.0);
/// assert_eq!((load.start, load.end), (2.0, 8.0));
/// ```
#[must_use]
pub fn distributed_load(start: f64, end: f64, magnitude: f64) -> DistributedLoad {
    DistributedLoad::new(start, end, magnitude)
}

/// Reject zero and non-finite magnitudes.
fn check_magnitude(magnitude: f64) -> Result<(), GeometryError> {
    if magnitude == 0.0 || !magnitude.is_finite() {
        return Err(GeometryError::InvalidMagnitude { magnitude });
    }
    Ok(())
}

/// Reject positions that are not finite or lie outside `[0, length]`.
pub(crate) fn check_position(position: f64, length: f64) -> Result<(), GeometryError> {
    if !position.is_finite() {
        return Err(GeometryError::NonFinitePosition { position });
    }
    if !(0.0..=length).contains(&position) {
        return Err(GeometryError::OutsideBeam { position, length });
    }
    Ok(())
}

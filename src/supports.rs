//! Supports and the restraints they impose.

use std::fmt;
use std::str::FromStr;

use crate::errors::ParseRestraintError;

/// Bending restraint imposed at a support node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RestraintKind {
    /// No bending restraint.
    None,
    /// Zero deflection (`y`).
    Deflection,
    /// Zero rotation with free deflection (`z`).
    RotationOnly,
    /// Zero deflection and zero rotation (`yz`).
    DeflectionAndRotation,
}

impl RestraintKind {
    /// Combine the deflection and rotation flags into a canonical kind.
    #[must_use]
    pub const fn from_flags(deflection: bool, rotation: bool) -> Self {
        match (deflection, rotation) {
            (false, false) => RestraintKind::None,
            (true, false) => RestraintKind::Deflection,
            (false, true) => RestraintKind::RotationOnly,
            (true, true) => RestraintKind::DeflectionAndRotation,
        }
    }

    /// Whether this restraint fixes the deflection.
    #[must_use]
    pub const fn fixes_deflection(self) -> bool {
        matches!(
            self,
            RestraintKind::Deflection | RestraintKind::DeflectionAndRotation
        )
    }

    /// Whether this restraint fixes the rotation.
    #[must_use]
    pub const fn fixes_rotation(self) -> bool {
        matches!(
            self,
            RestraintKind::RotationOnly | RestraintKind::DeflectionAndRotation
        )
    }
}

/// Restraint set of a support.
///
/// The axial flag is recorded but has no effect on the bending solve.
///
/// # Examples
/// ```
/// use beamx::{Restraint, RestraintKind};
///
/// let fixed: Restraint = "zyx".parse().expect("valid label");
/// assert_eq!(fixed.kind, RestraintKind::DeflectionAndRotation);
/// assert!(fixed.axial);
/// assert_eq!(fixed.to_string(), "xyz");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Restraint {
    /// Bending restraint.
    pub kind: RestraintKind,
    /// Axial restraint, accepted and ignored.
    pub axial: bool,
}

impl Restraint {
    /// Create a restraint from its parts.
    #[must_use]
    pub const fn new(kind: RestraintKind, axial: bool) -> Self {
        Self { kind, axial }
    }

    /// Zero deflection only, e.g. a roller.
    #[must_use]
    pub const fn roller() -> Self {
        Self::new(RestraintKind::Deflection, false)
    }

    /// Zero deflection with axial restraint, e.g. a pin.
    #[must_use]
    pub const fn pinned() -> Self {
        Self::new(RestraintKind::Deflection, true)
    }

    /// Zero deflection and rotation with axial restraint, e.g. a clamp.
    #[must_use]
    pub const fn fixed() -> Self {
        Self::new(RestraintKind::DeflectionAndRotation, true)
    }

    /// Zero rotation with free deflection, e.g. a sliding clamp.
    #[must_use]
    pub const fn guided() -> Self {
        Self::new(RestraintKind::RotationOnly, true)
    }
}

impl From<RestraintKind> for Restraint {
    fn from(kind: RestraintKind) -> Self {
        Self::new(kind, false)
    }
}

impl FromStr for Restraint {
    type Err = ParseRestraintError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let (mut axial, mut deflection, mut rotation) = (false, false, false);
        for found in label.trim().chars() {
            match found.to_ascii_lowercase() {
                'x' => axial = true,
                'y' => deflection = true,
                'z' => rotation = true,
                _ => {
                    return Err(ParseRestraintError {
                        label: label.to_owned(),
                        found,
                    })
                }
            }
        }
        Ok(Self::new(RestraintKind::from_flags(deflection, rotation), axial))
    }
}

impl fmt::Display for Restraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.axial {
            f.write_str("x")?;
        }
        if self.kind.fixes_deflection() {
            f.write_str("y")?;
        }
        if self.kind.fixes_rotation() {
            f.write_str("z")?;
        }
        Ok(())
    }
}

/// A support placed along the beam.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Support {
    /// Distance from the left end in metres.
    pub position: f64,
    /// Restraints imposed at the support.
    pub restraint: Restraint,
}

impl Support {
    /// Create a [`Support`].
    #[must_use]
    pub const fn new(position: f64, restraint: Restraint) -> Self {
        Self {
            position,
            restraint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_regardless_of_order() {
        for label in ["yz", "zy", "xyz", "zxy", "YZ"] {
            let restraint: Restraint = label.parse().expect("valid label");
            assert_eq!(restraint.kind, RestraintKind::DeflectionAndRotation);
        }
        let pin: Restraint = "yx".parse().expect("valid label");
        assert_eq!(pin, Restraint::pinned());
        let guided: Restraint = "xz".parse().expect("valid label");
        assert_eq!(guided, Restraint::guided());
        let axial_only: Restraint = "x".parse().expect("valid label");
        assert_eq!(axial_only.kind, RestraintKind::None);
    }

    #[test]
    fn unknown_characters_are_rejected() {
        let error = "xw".parse::<Restraint>().expect_err("unknown restraint");
        assert_eq!(error.found, 'w');
        assert_eq!(error.label, "xw");
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(Restraint::roller().to_string(), "y");
        assert_eq!(Restraint::fixed().to_string(), "xyz");
        assert_eq!(Restraint::from(RestraintKind::RotationOnly).to_string(), "z");
    }
}

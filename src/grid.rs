//! Uniform node grid along the beam axis.

use ndarray::Array1;

use crate::errors::PropertyError;

/// Smallest node count accepted by the finite-difference stencils.
pub const MIN_NODE_COUNT: usize = 10;

/// Uniform discretisation of `[0, length]` into `node_count` nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    /// Beam length in metres.
    length: f64,
    /// Number of nodes, including both ends.
    node_count: usize,
    /// Distance between neighbouring nodes in metres.
    spacing: f64,
}

impl Grid {
    /// Create a grid over `[0, length]`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NonPositiveLength`] when `length` is not strictly positive and
    /// [`PropertyError::TooFewNodes`] when `node_count` is below [`MIN_NODE_COUNT`].
    ///
    /// # Examples
    /// ```
    /// use beamx::Grid;
    ///
    /// let grid = Grid::new(10.0, 11).expect("valid grid");
    /// assert_eq!(grid.spacing(), 1.0);
    /// assert_eq!(grid.node_index(4.6), 5);
    /// ```
    pub fn new(length: f64, node_count: usize) -> Result<Self, PropertyError> {
        if !(length.is_finite() && length > 0.0) {
            return Err(PropertyError::NonPositiveLength { length });
        }
        if node_count < MIN_NODE_COUNT {
            return Err(PropertyError::TooFewNodes {
                node_count,
                minimum: MIN_NODE_COUNT,
            });
        }
        Ok(Self {
            length,
            node_count,
            spacing: length / (node_count - 1) as f64,
        })
    }

    /// Beam length in metres.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Distance between neighbouring nodes.
    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Index of the last node.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.node_count - 1
    }

    /// Nearest node to `position`, clamped to the grid.
    #[must_use]
    pub fn node_index(&self, position: f64) -> usize {
        let nearest = (position / self.spacing).round();
        if nearest <= 0.0 {
            0
        } else {
            (nearest as usize).min(self.last_index())
        }
    }

    /// Whether `index` lies in the left half of the grid, midpoint included.
    #[must_use]
    pub fn in_left_half(&self, index: usize) -> bool {
        index <= self.node_count / 2
    }

    /// Node positions from `0` to `length` inclusive.
    #[must_use]
    pub fn positions(&self) -> Array1<f64> {
        Array1::linspace(0.0, self.length, self.node_count)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn positions_span_the_beam_uniformly() {
        let grid = Grid::new(7.5, 16).expect("valid grid");
        let positions = grid.positions();
        assert_eq!(positions.len(), 16);
        assert_relative_eq!(positions[0], 0.0);
        assert_relative_eq!(positions[15], 7.5, epsilon = 1.0e-12);
        for pair in positions.windows(2) {
            assert_relative_eq!(pair[1] - pair[0], 0.5, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn node_index_rounds_and_clamps() {
        let grid = Grid::new(10.0, 11).expect("valid grid");
        assert_eq!(grid.node_index(0.0), 0);
        assert_eq!(grid.node_index(0.49), 0);
        assert_eq!(grid.node_index(0.51), 1);
        assert_eq!(grid.node_index(10.0), 10);
        assert_eq!(grid.node_index(-3.0), 0);
        assert_eq!(grid.node_index(42.0), 10);
    }

    #[test]
    fn rejects_invalid_configuration() {
        assert_eq!(
            Grid::new(0.0, 20),
            Err(PropertyError::NonPositiveLength { length: 0.0 })
        );
        assert_eq!(
            Grid::new(5.0, 9),
            Err(PropertyError::TooFewNodes {
                node_count: 9,
                minimum: MIN_NODE_COUNT,
            })
        );
        assert!(Grid::new(f64::NAN, 20).is_err());
    }

    #[test]
    fn midpoint_belongs_to_left_half() {
        let grid = Grid::new(10.0, 11).expect("valid grid");
        assert!(grid.in_left_half(5));
        assert!(!grid.in_left_half(6));
    }
}

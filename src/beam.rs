//! The editable beam model and its cached analysis.

use log::{debug, info, warn};

use crate::analysis::{run_analysis, AnalysisInput};
use crate::cache::{Configuration, SolutionCache};
use crate::errors::{AnalysisError, BeamEditError, Instability, PropertyError};
use crate::grid::Grid;
use crate::loads::{check_position, DistributedLoad, Effort, EffortKind, PointLoad};
use crate::post::Solution;
use crate::settings::SolverSettings;
use crate::solver::Material;
use crate::supports::{Restraint, Support};

/// Freshness of the cached solution relative to the current configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// The configuration has not been solved since it last changed.
    Dirty,
    /// A solution for the current configuration is cached.
    Solved,
    /// The last solve of the current configuration found the beam unstable.
    Failed,
}

/// Container for a straight beam, its supports and its loads.
#[derive(Clone, Debug)]
pub struct Beam {
    /// Length and node grid.
    grid: Grid,
    /// Section rigidity.
    material: Material,
    /// Supports in insertion order.
    supports: Vec<Support>,
    /// Point loads in insertion order.
    point_loads: Vec<PointLoad>,
    /// Distributed loads in insertion order.
    distributed_loads: Vec<DistributedLoad>,
    /// Kind of every load in insertion order, across both load lists.
    effort_log: Vec<EffortKind>,
    /// Solver tolerances.
    settings: SolverSettings,
    /// Last solution and the configuration it belongs to.
    cache: SolutionCache,
    /// Number of times the analysis pipeline has run.
    evaluations: usize,
}

impl Default for Beam {
    fn default() -> Self {
        Self::new()
    }
}

impl Beam {
    /// Default beam length in metres.
    pub const DEFAULT_LENGTH: f64 = 10.0;
    /// Default elastic modulus in pascals (structural steel).
    pub const DEFAULT_ELASTIC_MODULUS: f64 = 2.0e11;
    /// Default second moment of area in metres to the fourth.
    pub const DEFAULT_MOMENT_OF_INERTIA: f64 = 1.0e-5;
    /// Default number of grid nodes.
    pub const DEFAULT_NODE_COUNT: usize = 30;

    /// Create a 10 m steel beam with no supports or loads.
    ///
    /// # Examples
    /// ```
    /// use beamx::{Beam, SolveStatus};
    ///
    /// let beam = Beam::new();
    /// assert_eq!(beam.length(), 10.0);
    /// assert_eq!(beam.node_count(), 30);
    /// assert_eq!(beam.status(), SolveStatus::Dirty);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            grid: Grid::new(Self::DEFAULT_LENGTH, Self::DEFAULT_NODE_COUNT)
                .expect("default grid is valid"),
            material: Material::new(Self::DEFAULT_ELASTIC_MODULUS, Self::DEFAULT_MOMENT_OF_INERTIA),
            supports: Vec::new(),
            point_loads: Vec::new(),
            distributed_loads: Vec::new(),
            effort_log: Vec::new(),
            settings: SolverSettings::default(),
            cache: SolutionCache::default(),
            evaluations: 0,
        }
    }

    /// Create a beam with explicit properties and node count.
    ///
    /// # Errors
    ///
    /// Returns [`BeamEditError::InvalidConfiguration`] when any value is rejected by
    /// [`set_properties`](Self::set_properties) or [`set_node_count`](Self::set_node_count).
    pub fn with_properties(
        length: f64,
        elastic_modulus: f64,
        moment_of_inertia: f64,
        node_count: usize,
    ) -> Result<Self, BeamEditError> {
        let mut beam = Self::new();
        beam.set_node_count(node_count)?;
        beam.set_properties(length, elastic_modulus, moment_of_inertia)?;
        Ok(beam)
    }

    /// Beam length in metres.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.grid.length()
    }

    /// Section rigidity.
    #[must_use]
    pub fn material(&self) -> Material {
        self.material
    }

    /// Number of grid nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.grid.node_count()
    }

    /// Node grid used by the analysis.
    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Supports in insertion order.
    #[must_use]
    pub fn supports(&self) -> &[Support] {
        &self.supports
    }

    /// Point loads in insertion order.
    #[must_use]
    pub fn point_loads(&self) -> &[PointLoad] {
        &self.point_loads
    }

    /// Distributed loads in insertion order.
    #[must_use]
    pub fn distributed_loads(&self) -> &[DistributedLoad] {
        &self.distributed_loads
    }

    /// Kind of every load in insertion order.
    #[must_use]
    pub fn effort_log(&self) -> &[EffortKind] {
        &self.effort_log
    }

    /// Solver tolerances.
    #[must_use]
    pub fn settings(&self) -> SolverSettings {
        self.settings
    }

    /// Replace the solver tolerances.
    pub fn set_settings(&mut self, settings: SolverSettings) {
        self.settings = settings;
    }

    /// Number of times the analysis pipeline has actually run.
    #[must_use]
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Set the length and section properties.
    ///
    /// Supports and loads that no longer fit on the beam are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`BeamEditError::InvalidConfiguration`] when any value is not strictly positive.
    pub fn set_properties(
        &mut self,
        length: f64,
        elastic_modulus: f64,
        moment_of_inertia: f64,
    ) -> Result<(), BeamEditError> {
        let grid = Grid::new(length, self.node_count())?;
        if !(elastic_modulus.is_finite() && elastic_modulus > 0.0) {
            return Err(PropertyError::NonPositiveElasticModulus { elastic_modulus }.into());
        }
        if !(moment_of_inertia.is_finite() && moment_of_inertia > 0.0) {
            return Err(PropertyError::NonPositiveMomentOfInertia { moment_of_inertia }.into());
        }
        self.grid = grid;
        self.material = Material::new(elastic_modulus, moment_of_inertia);
        self.drop_elements_outside_beam();
        self.warn_crowded_supports();
        Ok(())
    }

    /// Set the number of grid nodes.
    ///
    /// # Errors
    ///
    /// Returns [`BeamEditError::InvalidConfiguration`] when `node_count` is below
    /// [`MIN_NODE_COUNT`](crate::MIN_NODE_COUNT).
    pub fn set_node_count(&mut self, node_count: usize) -> Result<(), BeamEditError> {
        self.grid = Grid::new(self.length(), node_count)?;
        self.warn_crowded_supports();
        Ok(())
    }

    /// Place a support on the beam.
    ///
    /// # Errors
    ///
    /// Returns [`BeamEditError::InvalidGeometry`] when `position` is outside the beam and
    /// [`BeamEditError::ConflictingSupport`] when it is within `length / node_count` of an
    /// existing support.
    ///
    /// # Examples
    /// ```
    /// use beamx::{Beam, BeamEditError, Restraint};
    ///
    /// let mut beam = Beam::new();
    /// beam.add_support(0.0, Restraint::fixed()).expect("support fits");
    /// let error = beam
    ///     .add_support(0.2, Restraint::roller())
    ///     .expect_err("too close to the clamp");
    /// assert!(matches!(error, BeamEditError::ConflictingSupport { .. }));
    /// ```
    pub fn add_support(
        &mut self,
        position: f64,
        restraint: impl Into<Restraint>,
    ) -> Result<(), BeamEditError> {
        self.add_supports(&[position], restraint)
    }

    /// Place several supports with the same restraint, all or none.
    ///
    /// # Errors
    ///
    /// Returns the first error [`add_support`](Self::add_support) would report for any of the
    /// positions, including conflicts between the new positions themselves.
    pub fn add_supports(
        &mut self,
        positions: &[f64],
        restraint: impl Into<Restraint>,
    ) -> Result<(), BeamEditError> {
        let restraint = restraint.into();
        let clearance = self.length() / self.node_count() as f64;
        for (index, &position) in positions.iter().enumerate() {
            check_position(position, self.length())?;
            let placed = self
                .supports
                .iter()
                .map(|support| support.position)
                .chain(positions[..index].iter().copied());
            for existing in placed {
                if (position - existing).abs() <= clearance {
                    return Err(BeamEditError::ConflictingSupport { position, existing });
                }
            }
        }
        self.supports.extend(
            positions
                .iter()
                .map(|&position| Support::new(position, restraint)),
        );
        Ok(())
    }

    /// Remove the most recently added support.
    pub fn remove_last_support(&mut self) -> Option<Support> {
        self.supports.pop()
    }

    /// Apply a point load.
    ///
    /// `angle` is measured in degrees from the beam axis; only the transverse component
    /// `magnitude * sin(angle)` bends the beam.
    ///
    /// # Errors
    ///
    /// Returns [`BeamEditError::InvalidGeometry`] when the magnitude is zero, the angle lies
    /// outside `[0, 180]` or the position is outside the beam.
    pub fn add_point_load(
        &mut self,
        magnitude: f64,
        position: f64,
        angle: f64,
    ) -> Result<(), BeamEditError> {
        let load = PointLoad::new(magnitude, position, angle);
        load.validate(self.length())?;
        self.point_loads.push(load);
        self.effort_log.push(EffortKind::Point);
        Ok(())
    }

    /// Apply a uniform load between two positions, given in either order.
    ///
    /// # Errors
    ///
    /// Returns [`BeamEditError::InvalidGeometry`] when the magnitude is zero or either end lies
    /// outside the beam.
    pub fn add_distributed_load(
        &mut self,
        start: f64,
        end: f64,
        magnitude: f64,
    ) -> Result<(), BeamEditError> {
        let load = DistributedLoad::new(start, end, magnitude);
        load.validate(self.length())?;
        self.distributed_loads.push(load);
        self.effort_log.push(EffortKind::Distributed);
        Ok(())
    }

    /// Remove the most recently added load of either kind.
    ///
    /// # Examples
    /// ```
    /// use beamx::{Beam, Effort, EffortKind};
    ///
    /// let mut beam = Beam::new();
    /// beam.add_distributed_load(0.0, 10.0, -200.0).expect("load fits");
    /// beam.add_point_load(-1_000.0, 5.0, 90.0).expect("load fits");
    ///
    /// let removed = beam.remove_last_effort().expect("a load was present");
    /// assert_eq!(removed.kind(), EffortKind::Point);
    /// assert_eq!(beam.effort_log(), &[EffortKind::Distributed]);
    /// ```
    pub fn remove_last_effort(&mut self) -> Option<Effort> {
        match self.effort_log.pop()? {
            EffortKind::Point => self.point_loads.pop().map(Effort::Point),
            EffortKind::Distributed => self.distributed_loads.pop().map(Effort::Distributed),
        }
    }

    /// Largest absolute load magnitude of either kind, or `0` without loads.
    #[must_use]
    pub fn max_abs_load_magnitude(&self) -> f64 {
        self.point_loads
            .iter()
            .map(|load| load.magnitude.abs())
            .chain(self.distributed_loads.iter().map(|load| load.magnitude.abs()))
            .fold(0.0, f64::max)
    }

    /// Freshness of the cached solution.
    #[must_use]
    pub fn status(&self) -> SolveStatus {
        let key = self.configuration().fingerprint();
        if self.cache.get(key).is_some() {
            SolveStatus::Solved
        } else if self.cache.failed(key) {
            SolveStatus::Failed
        } else {
            SolveStatus::Dirty
        }
    }

    /// Cached solution for the current configuration, if one exists.
    #[must_use]
    pub fn solution(&self) -> Option<&Solution> {
        self.cache.get(self.configuration().fingerprint())
    }

    /// Analyse the beam, reusing the cached solution when nothing has changed.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::UnstableBeam`] when the beam has no supports or the supports
    /// leave it free to move as a rigid body.
    ///
    /// # Examples
    /// ```
    /// use beamx::{Beam, Restraint, SolveStatus};
    ///
    /// let mut beam = Beam::with_properties(10.0, 2.0e11, 1.0e-5, 11).expect("valid beam");
    /// beam.add_support(0.0, Restraint::fixed()).expect("support fits");
    /// beam.add_support(10.0, Restraint::roller()).expect("support fits");
    /// beam.add_point_load(-1_000.0, 5.0, 90.0).expect("load fits");
    ///
    /// let solution = beam.solve().expect("propped cantilever is stable");
    /// assert_eq!(solution.moments().len(), 6);
    /// assert_eq!(beam.status(), SolveStatus::Solved);
    /// ```
    pub fn solve(&mut self) -> Result<&Solution, AnalysisError> {
        let key = self.configuration().fingerprint();
        let input = AnalysisInput {
            grid: self.grid,
            material: self.material,
            supports: &self.supports,
            point_loads: &self.point_loads,
            distributed_loads: &self.distributed_loads,
            settings: self.settings,
        };
        let evaluations = &mut self.evaluations;
        let result = self.cache.get_or_try_insert_with(key, || {
            if input.supports.is_empty() {
                return Err(AnalysisError::UnstableBeam(Instability::NoSupports));
            }
            *evaluations += 1;
            let solution = run_analysis(&input)?;
            info!(
                "solved beam of length {} m on {} nodes",
                input.grid.length(),
                input.grid.node_count()
            );
            Ok(solution)
        });
        match &result {
            Ok(_) => debug!("solution available for configuration {key:?}"),
            Err(error) => warn!("{error}"),
        }
        result
    }

    /// Borrow the inputs that determine a solution.
    fn configuration(&self) -> Configuration<'_> {
        Configuration {
            length: self.grid.length(),
            node_count: self.grid.node_count(),
            material: self.material,
            supports: &self.supports,
            point_loads: &self.point_loads,
            distributed_loads: &self.distributed_loads,
            settings: self.settings,
        }
    }

    /// Pairs of supports that sit within the current clearance `length / node_count`.
    ///
    /// Placement keeps supports apart, but a longer beam or a coarser grid widens the
    /// clearance afterwards.
    fn crowded_supports(&self) -> Vec<(f64, f64)> {
        let clearance = self.length() / self.node_count() as f64;
        let mut pairs = Vec::new();
        for (index, first) in self.supports.iter().enumerate() {
            for second in &self.supports[index + 1..] {
                if (first.position - second.position).abs() <= clearance {
                    pairs.push((first.position, second.position));
                }
            }
        }
        pairs
    }

    /// Log every pair reported by [`crowded_supports`](Self::crowded_supports).
    fn warn_crowded_supports(&self) {
        for (first, second) in self.crowded_supports() {
            warn!("supports at {first} m and {second} m are now within one grid spacing");
        }
    }

    /// Drop supports and loads outside `[0, length]`, keeping the load order intact.
    fn drop_elements_outside_beam(&mut self) {
        let length = self.length();
        let inside = |position: f64| (0.0..=length).contains(&position);

        let supports_before = self.supports.len();
        self.supports.retain(|support| inside(support.position));
        let dropped_supports = supports_before - self.supports.len();

        let mut point_loads = std::mem::take(&mut self.point_loads).into_iter();
        let mut distributed_loads = std::mem::take(&mut self.distributed_loads).into_iter();
        let mut dropped_loads = 0;
        for kind in std::mem::take(&mut self.effort_log) {
            let kept = match kind {
                EffortKind::Point => match point_loads.next() {
                    Some(load) if inside(load.position) => {
                        self.point_loads.push(load);
                        true
                    }
                    _ => false,
                },
                EffortKind::Distributed => match distributed_loads.next() {
                    Some(load) if inside(load.start) && inside(load.end) => {
                        self.distributed_loads.push(load);
                        true
                    }
                    _ => false,
                },
            };
            if kept {
                self.effort_log.push(kind);
            } else {
                dropped_loads += 1;
            }
        }

        if dropped_supports + dropped_loads > 0 {
            warn!(
                "beam shortened to {length} m: dropped {dropped_supports} supports and \
                 {dropped_loads} loads"
            );
        }
    }
}

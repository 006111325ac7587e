//! Single-slot memo of the last solution.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::loads::{DistributedLoad, PointLoad};
use crate::post::Solution;
use crate::settings::SolverSettings;
use crate::solver::Material;
use crate::supports::Support;

/// Hash of every input that influences a solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Fingerprint(u64);

/// Inputs hashed into a [`Fingerprint`].
pub(crate) struct Configuration<'a> {
    /// Beam length in metres.
    pub length: f64,
    /// Number of grid nodes.
    pub node_count: usize,
    /// Section rigidity.
    pub material: Material,
    /// Supports in insertion order.
    pub supports: &'a [Support],
    /// Point loads in insertion order.
    pub point_loads: &'a [PointLoad],
    /// Distributed loads in insertion order.
    pub distributed_loads: &'a [DistributedLoad],
    /// Solver tolerances.
    pub settings: SolverSettings,
}

impl Configuration<'_> {
    /// Hash the configuration. Floats are hashed by their bit patterns.
    pub(crate) fn fingerprint(&self) -> Fingerprint {
        let mut hasher = DefaultHasher::new();
        self.length.to_bits().hash(&mut hasher);
        self.node_count.hash(&mut hasher);
        self.material.elastic_modulus.to_bits().hash(&mut hasher);
        self.material.moment_of_inertia.to_bits().hash(&mut hasher);
        self.settings.singularity_tolerance.to_bits().hash(&mut hasher);
        self.supports.len().hash(&mut hasher);
        for support in self.supports {
            support.position.to_bits().hash(&mut hasher);
            support.restraint.hash(&mut hasher);
        }
        self.point_loads.len().hash(&mut hasher);
        for load in self.point_loads {
            load.magnitude.to_bits().hash(&mut hasher);
            load.position.to_bits().hash(&mut hasher);
            load.angle.to_bits().hash(&mut hasher);
        }
        self.distributed_loads.len().hash(&mut hasher);
        for load in self.distributed_loads {
            load.start.to_bits().hash(&mut hasher);
            load.end.to_bits().hash(&mut hasher);
            load.magnitude.to_bits().hash(&mut hasher);
        }
        Fingerprint(hasher.finish())
    }
}

/// Remembers the most recent solution and the configuration it belongs to.
#[derive(Clone, Debug, Default)]
pub(crate) struct SolutionCache {
    /// Fingerprint and solution of the last successful solve.
    solved: Option<(Fingerprint, Solution)>,
    /// Fingerprint of the configuration whose last solve attempt failed.
    failed: Option<Fingerprint>,
}

impl SolutionCache {
    /// Cached solution for `key`, if the last successful solve was for exactly this
    /// configuration.
    pub(crate) fn get(&self, key: Fingerprint) -> Option<&Solution> {
        match &self.solved {
            Some((stored, solution)) if *stored == key => Some(solution),
            _ => None,
        }
    }

    /// Whether the last solve attempt for `key` failed.
    pub(crate) fn failed(&self, key: Fingerprint) -> bool {
        self.failed == Some(key)
    }

    /// Return the cached solution for `key` or compute and store a new one.
    ///
    /// A failed computation leaves the stored solution untouched and marks `key` as failed.
    pub(crate) fn get_or_try_insert_with<E>(
        &mut self,
        key: Fingerprint,
        solve: impl FnOnce() -> Result<Solution, E>,
    ) -> Result<&Solution, E> {
        let entry = match self.solved.take() {
            Some((stored, solution)) if stored == key => (stored, solution),
            previous => match solve() {
                Ok(solution) => (key, solution),
                Err(error) => {
                    self.solved = previous;
                    self.failed = Some(key);
                    return Err(error);
                }
            },
        };
        self.failed = None;
        let (_, solution) = self.solved.insert(entry);
        Ok(solution)
    }
}

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use beamx::{Beam, Restraint, SolverSettings};
use serde::{Deserialize, Serialize};

/// Beam description read by the command line tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Beam length in metres.
    #[serde(default = "default_length")]
    pub length: f64,
    /// Elastic modulus in pascals.
    #[serde(default = "default_elastic_modulus")]
    pub elastic_modulus: f64,
    /// Second moment of area in metres to the fourth.
    #[serde(default = "default_moment_of_inertia")]
    pub moment_of_inertia: f64,
    /// Number of grid nodes.
    #[serde(default = "default_node_count")]
    pub node_count: usize,
    /// Supports, added in order.
    #[serde(default)]
    pub supports: Vec<SupportEntry>,
    /// Loads, added in order.
    #[serde(default)]
    pub loads: Vec<LoadEntry>,
    /// Solver tolerances.
    #[serde(default)]
    pub settings: SolverSettings,
}

/// One or more supports sharing a restraint label such as `"xy"` or `"xyz"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupportEntry {
    /// Positions in metres.
    pub positions: Vec<f64>,
    /// Restraint label.
    pub restraint: String,
}

/// A load entry, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadEntry {
    /// Concentrated force.
    Point {
        /// Signed magnitude in newtons.
        magnitude: f64,
        /// Position in metres.
        position: f64,
        /// Angle from the beam axis in degrees.
        #[serde(default = "default_angle")]
        angle: f64,
    },
    /// Uniform line load.
    Distributed {
        /// Start of the loaded interval in metres.
        start: f64,
        /// End of the loaded interval in metres.
        end: f64,
        /// Signed intensity in newtons per metre.
        magnitude: f64,
    },
}

fn default_length() -> f64 {
    Beam::DEFAULT_LENGTH
}

fn default_elastic_modulus() -> f64 {
    Beam::DEFAULT_ELASTIC_MODULUS
}

fn default_moment_of_inertia() -> f64 {
    Beam::DEFAULT_MOMENT_OF_INERTIA
}

fn default_node_count() -> usize {
    Beam::DEFAULT_NODE_COUNT
}

fn default_angle() -> f64 {
    90.0
}

impl Scenario {
    /// Read a scenario from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    /// Clamped-propped steel beam with a midspan point load.
    pub fn propped_cantilever() -> Self {
        Self {
            length: 10.0,
            elastic_modulus: 2.0e11,
            moment_of_inertia: 1.0e-5,
            node_count: 11,
            supports: vec![
                SupportEntry {
                    positions: vec![0.0],
                    restraint: "xyz".to_owned(),
                },
                SupportEntry {
                    positions: vec![10.0],
                    restraint: "y".to_owned(),
                },
            ],
            loads: vec![LoadEntry::Point {
                magnitude: -1_000.0,
                position: 5.0,
                angle: 90.0,
            }],
            settings: SolverSettings::default(),
        }
    }

    /// Build the beam, applying supports and loads in file order.
    pub fn build(&self) -> Result<Beam> {
        let mut beam = Beam::with_properties(
            self.length,
            self.elastic_modulus,
            self.moment_of_inertia,
            self.node_count,
        )?;
        beam.set_settings(self.settings);
        for entry in &self.supports {
            let restraint: Restraint = entry.restraint.parse()?;
            beam.add_supports(&entry.positions, restraint)
                .with_context(|| format!("cannot place supports at {:?}", entry.positions))?;
        }
        for load in &self.loads {
            match *load {
                LoadEntry::Point {
                    magnitude,
                    position,
                    angle,
                } => beam
                    .add_point_load(magnitude, position, angle)
                    .with_context(|| format!("cannot apply point load at {position}"))?,
                LoadEntry::Distributed {
                    start,
                    end,
                    magnitude,
                } => beam
                    .add_distributed_load(start, end, magnitude)
                    .with_context(|| format!("cannot apply distributed load over [{start}, {end}]"))?,
            }
        }
        Ok(beam)
    }
}

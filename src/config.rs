//! Run configuration.
//!
//! Defaults describe the standard data set: 20 vehicles of capacity 12 and
//! the `data/` input files. A JSON file may override any subset of fields;
//! command-line flags are applied on top by the binary.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::pipeline::SolveOptions;

/// Settings for one solve run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Coordinate file (depot first).
    pub coords: PathBuf,
    /// Distance table file.
    pub distances: PathBuf,
    /// Number of vehicles in the fleet.
    pub vehicles: usize,
    /// Capacity of every vehicle, in customers.
    pub capacity: usize,
    /// CSV output path.
    pub output: PathBuf,
    /// Optional JSON output path.
    pub json_output: Option<PathBuf>,
    /// Optional route plot, PNG or SVG by extension.
    pub plot: Option<PathBuf>,
    /// Run 2-opt after construction.
    pub improve: bool,
    /// Ignore customer pairs with non-positive savings.
    pub positive_savings_only: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            coords: PathBuf::from("data/Coord.txt"),
            distances: PathBuf::from("data/Dist.txt"),
            vehicles: 20,
            capacity: 12,
            output: PathBuf::from("routes_solution.csv"),
            json_output: None,
            plot: None,
            improve: true,
            positive_savings_only: false,
        }
    }
}

impl RunConfig {
    /// Parses a configuration from JSON; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing run configuration")
    }

    /// Reads a JSON configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading configuration from {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Algorithm switches for [`solve`](crate::pipeline::solve).
    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            improve: self.improve,
            positive_savings_only: self.positive_savings_only,
        }
    }
}

//! Flat-file loaders for coordinates and distance tables.
//!
//! Coordinates: one `x y` pair per line, whitespace separated. The first
//! line is the depot (id 0); the remaining lines are customers numbered
//! from 1 in file order. Malformed customer lines are skipped with a warning.
//!
//! Distances: one whitespace-separated row per line, indexed by node id.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{info, warn};

use crate::distance::DistanceMatrix;
use crate::models::{Node, ProblemInstance, Vehicle};

/// Largest `|d(i, j) - d(j, i)|` still treated as symmetric.
const SYMMETRY_TOLERANCE: f64 = 1e-9;

fn parse_xy(line: &str) -> Option<(f64, f64)> {
    let mut tokens = line.split_whitespace();
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    Some((x, y))
}

/// Parses depot and customer coordinates.
///
/// ```
/// use cw_routing::io::parse_coordinates;
///
/// let (depot, customers) = parse_coordinates("0 0\n1 2\n3 4\n").unwrap();
/// assert_eq!(depot.id(), 0);
/// assert_eq!(customers.len(), 2);
/// assert_eq!(customers[1].id(), 2);
/// ```
pub fn parse_coordinates(text: &str) -> Result<(Node, Vec<Node>)> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty());

    let (_, first) = lines
        .next()
        .ok_or_else(|| anyhow!("coordinate file is empty, no depot line"))?;
    let (x, y) = parse_xy(first).ok_or_else(|| anyhow!("malformed depot line: {first:?}"))?;
    let depot = Node::depot(x, y);

    let mut customers = Vec::new();
    for (lineno, line) in lines {
        match parse_xy(line) {
            Some((x, y)) => customers.push(Node::new(customers.len() + 1, x, y)),
            None => warn!(line = lineno + 1, content = line, "skipping malformed coordinate line"),
        }
    }
    Ok((depot, customers))
}

/// Parses a whitespace-separated square distance table.
///
/// ```
/// use cw_routing::io::parse_distance_matrix;
///
/// let dm = parse_distance_matrix("0 5\n5 0\n").unwrap();
/// assert_eq!(dm.size(), 2);
/// assert_eq!(dm.get(0, 1), 5.0);
/// ```
pub fn parse_distance_matrix(text: &str) -> Result<DistanceMatrix> {
    let mut rows = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|tok| {
                tok.parse::<f64>()
                    .with_context(|| format!("line {}: invalid distance {tok:?}", lineno + 1))
            })
            .collect::<Result<Vec<f64>>>()?;
        if let Some(d) = row.iter().find(|d| !d.is_finite() || **d < 0.0) {
            bail!("line {}: distance {d} is not a non-negative number", lineno + 1);
        }
        rows.push(row);
    }
    Ok(DistanceMatrix::from_rows(rows)?)
}

/// Reads and parses a coordinate file.
pub fn load_coordinates(path: &Path) -> Result<(Node, Vec<Node>)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading coordinates from {}", path.display()))?;
    parse_coordinates(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Reads and parses a distance file.
pub fn load_distance_matrix(path: &Path) -> Result<DistanceMatrix> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading distances from {}", path.display()))?;
    parse_distance_matrix(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Loads both files and assembles an instance with a homogeneous fleet.
///
/// A distance table that does not cover exactly the depot plus every
/// customer is an error.
pub fn load_instance(
    coords: &Path,
    distances: &Path,
    num_vehicles: usize,
    capacity: usize,
) -> Result<ProblemInstance> {
    let (depot, customers) = load_coordinates(coords)?;
    let matrix = load_distance_matrix(distances)?;
    if !matrix.is_symmetric(SYMMETRY_TOLERANCE) {
        warn!(
            path = %distances.display(),
            "distance table is asymmetric; 2-opt moves may lengthen routes"
        );
    }
    info!(
        customers = customers.len(),
        matrix = matrix.size(),
        vehicles = num_vehicles,
        capacity,
        "loaded instance data"
    );
    let instance = ProblemInstance::new(depot, customers, Vehicle::fleet(num_vehicles, capacity), matrix)
        .with_context(|| {
            format!(
                "assembling instance from {} and {}",
                coords.display(),
                distances.display()
            )
        })?;
    Ok(instance)
}

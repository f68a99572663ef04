//! Depot and customer locations.

use serde::{Deserialize, Serialize};

/// A location in a routing problem: the depot or a customer.
///
/// Node 0 is the depot. Customers carry ids `1..=N` and never change once
/// the instance is loaded. Every customer has an implicit demand of one unit.
///
/// # Examples
///
/// ```
/// use cw_routing::models::Node;
///
/// let depot = Node::depot(35.0, 35.0);
/// assert_eq!(depot.id(), 0);
/// assert!(depot.is_depot());
///
/// let c = Node::new(1, 41.0, 49.0);
/// assert_eq!(c.id(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: usize,
    x: f64,
    y: f64,
}

impl Node {
    /// Creates a node with the given id and coordinates.
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Creates the depot at the given coordinates (id=0).
    pub fn depot(x: f64, y: f64) -> Self {
        Self::new(0, x, y)
    }

    /// Node ID (0 = depot).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns `true` for the depot.
    pub fn is_depot(&self) -> bool {
        self.id == 0
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

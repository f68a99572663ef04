//! Problem instance: depot, customers, fleet, and distances.

use crate::distance::DistanceMatrix;
use crate::error::InstanceError;

use super::{Node, Vehicle};

/// A validated capacitated routing instance.
///
/// Construction checks the integrity conditions the algorithms rely on:
/// a non-empty fleet with ids `0..m`, positive capacities, a depot with id 0,
/// customers with ids `1..=N` in order, and a `(1 + N) x (1 + N)` matrix.
/// Once built, distance lookups by node id never go out of range.
///
/// # Examples
///
/// ```
/// use cw_routing::models::{Node, ProblemInstance, Vehicle};
/// use cw_routing::distance::DistanceMatrix;
///
/// let depot = Node::depot(0.0, 0.0);
/// let customers = vec![Node::new(1, 3.0, 4.0), Node::new(2, 6.0, 8.0)];
/// let dm = DistanceMatrix::from_nodes(&[depot, customers[0], customers[1]]);
///
/// let instance = ProblemInstance::new(depot, customers, Vehicle::fleet(1, 2), dm).unwrap();
/// assert_eq!(instance.num_customers(), 2);
/// assert!((instance.distance(0, 1) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    depot: Node,
    customers: Vec<Node>,
    vehicles: Vec<Vehicle>,
    distances: DistanceMatrix,
}

impl ProblemInstance {
    /// Validates and assembles an instance.
    pub fn new(
        depot: Node,
        customers: Vec<Node>,
        vehicles: Vec<Vehicle>,
        distances: DistanceMatrix,
    ) -> Result<Self, InstanceError> {
        if vehicles.is_empty() {
            return Err(InstanceError::NoVehicles);
        }
        for (index, v) in vehicles.iter().enumerate() {
            if v.id() != index {
                return Err(InstanceError::VehicleIdMismatch { index, id: v.id() });
            }
            if v.capacity() == 0 {
                return Err(InstanceError::ZeroCapacity { vehicle_id: v.id() });
            }
        }
        if !depot.is_depot() {
            return Err(InstanceError::DepotId { id: depot.id() });
        }
        for (index, c) in customers.iter().enumerate() {
            if c.id() != index + 1 {
                return Err(InstanceError::CustomerIdMismatch { index, id: c.id() });
            }
        }
        let expected = customers.len() + 1;
        if distances.size() != expected {
            return Err(InstanceError::MatrixSize {
                expected,
                found: distances.size(),
            });
        }

        Ok(Self {
            depot,
            customers,
            vehicles,
            distances,
        })
    }

    /// Builds an instance with a Euclidean matrix computed from coordinates.
    pub fn euclidean(
        depot: Node,
        customers: Vec<Node>,
        vehicles: Vec<Vehicle>,
    ) -> Result<Self, InstanceError> {
        let nodes: Vec<Node> = std::iter::once(depot)
            .chain(customers.iter().copied())
            .collect();
        let distances = DistanceMatrix::from_nodes(&nodes);
        Self::new(depot, customers, vehicles, distances)
    }

    /// The depot node.
    pub fn depot(&self) -> &Node {
        &self.depot
    }

    /// Customers in id order (index `i` holds id `i + 1`).
    pub fn customers(&self) -> &[Node] {
        &self.customers
    }

    /// Looks up any node (depot included) by id.
    pub fn node(&self, id: usize) -> Option<&Node> {
        if id == 0 {
            Some(&self.depot)
        } else {
            self.customers.get(id - 1)
        }
    }

    /// The fleet, indexed by vehicle id.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Number of customers (excluding depot).
    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    /// Number of vehicles in the fleet.
    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    /// The full distance table.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Distance from node `from` to node `to`, in that direction.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }
}

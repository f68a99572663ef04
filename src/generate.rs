//! Random Euclidean instance generation.

use rand::Rng;

use crate::error::InstanceError;
use crate::models::{Node, ProblemInstance, Vehicle};

/// Side length of the square customers are drawn from.
pub const GRID_SIZE: f64 = 100.0;

/// Generates a uniform random instance in `[0, GRID_SIZE)²`.
///
/// The depot sits at the centre of the grid; customers get ids `1..=n` and
/// the fleet is homogeneous. The same seed always yields the same instance.
///
/// # Examples
///
/// ```
/// use cw_routing::generate::random_instance;
///
/// let a = random_instance(10, 3, 4, 42).unwrap();
/// let b = random_instance(10, 3, 4, 42).unwrap();
/// assert_eq!(a.num_customers(), 10);
/// assert_eq!(a.customers(), b.customers());
/// ```
pub fn random_instance(
    num_customers: usize,
    num_vehicles: usize,
    capacity: usize,
    seed: u64,
) -> Result<ProblemInstance, InstanceError> {
    let mut rng = u_numflow::random::create_rng(seed);
    let depot = Node::depot(GRID_SIZE / 2.0, GRID_SIZE / 2.0);
    let customers = (1..=num_customers)
        .map(|id| {
            let x = rng.random_range(0.0..GRID_SIZE);
            let y = rng.random_range(0.0..GRID_SIZE);
            Node::new(id, x, y)
        })
        .collect();
    ProblemInstance::euclidean(depot, customers, Vehicle::fleet(num_vehicles, capacity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_in_grid() {
        let inst = random_instance(50, 5, 10, 7).expect("valid");
        assert_eq!(inst.num_customers(), 50);
        assert!(inst
            .customers()
            .iter()
            .all(|c| (0.0..GRID_SIZE).contains(&c.x()) && (0.0..GRID_SIZE).contains(&c.y())));
        assert!(inst.distances().is_symmetric(1e-12));
    }

    #[test]
    fn test_seed_reproducible() {
        let a = random_instance(20, 2, 10, 123).expect("valid");
        let b = random_instance(20, 2, 10, 123).expect("valid");
        assert_eq!(a.customers(), b.customers());
        assert_eq!(a.distances(), b.distances());
    }

    #[test]
    fn test_zero_vehicles_rejected() {
        assert_eq!(
            random_instance(5, 0, 10, 1).unwrap_err(),
            InstanceError::NoVehicles
        );
    }
}

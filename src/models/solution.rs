//! Solution and violation types.

use serde::{Deserialize, Serialize};

use super::{ProblemInstance, Route};
use crate::evaluation::RouteEvaluator;

/// A type of defect found when checking a solution against its instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationType {
    /// Route refers to a vehicle outside the fleet.
    UnknownVehicle {
        /// Route index in the solution.
        route_index: usize,
        /// Vehicle id carried by the route.
        vehicle_id: usize,
    },
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load that exceeded capacity.
        load: usize,
        /// Vehicle capacity.
        capacity: usize,
    },
    /// Cached load differs from the number of customers on the route.
    LoadMismatch {
        /// Route index in the solution.
        route_index: usize,
        /// Cached load.
        load: usize,
        /// Customers actually on the route.
        customers: usize,
    },
    /// Route visits an id that is not a customer of the instance.
    UnknownCustomer {
        /// Offending id.
        customer_id: usize,
    },
    /// Customer is visited more than once.
    DuplicateCustomer {
        /// Customer ID.
        customer_id: usize,
        /// Number of visits.
        visits: usize,
    },
    /// Customer is not visited by any route.
    MissingCustomer {
        /// Customer ID.
        customer_id: usize,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A set of routes together with their cached total cost.
///
/// Populated once by the savings constructor, then reordered
/// in place by 2-opt. The cost is only as fresh as the last [`recost`].
///
/// [`recost`]: RoutingSolution::recost
///
/// # Examples
///
/// ```
/// use cw_routing::models::{RoutingSolution, Route};
///
/// let sol = RoutingSolution::from_routes(vec![
///     Route::singleton(0, 1),
///     Route::from_customers(1, vec![2, 3]),
/// ]);
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 3);
/// assert_eq!(sol.total_cost(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingSolution {
    routes: Vec<Route>,
    total_cost: f64,
}

impl RoutingSolution {
    /// Creates a solution from existing routes. Cost starts at zero.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self {
            routes,
            total_cost: 0.0,
        }
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Mutable access to the routes; the route list itself cannot change.
    pub fn routes_mut(&mut self) -> &mut [Route] {
        &mut self.routes
    }

    /// Returns the number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total number of customer slots across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Returns the cached total cost.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Sets the total cost.
    pub fn set_total_cost(&mut self, cost: f64) {
        self.total_cost = cost;
    }

    /// Recomputes every route distance and the total cost from scratch.
    pub fn recost(&mut self, instance: &ProblemInstance) -> f64 {
        RouteEvaluator::new(instance).recost(self)
    }

    /// Lists every defect of this solution with respect to `instance`.
    pub fn violations(&self, instance: &ProblemInstance) -> Vec<Violation> {
        RouteEvaluator::new(instance).violations(self)
    }

    /// Returns `true` if every route fits its vehicle and every customer is
    /// served exactly once.
    pub fn is_valid(&self, instance: &ProblemInstance) -> bool {
        self.violations(instance).is_empty()
    }

    /// Returns `true` if more routes were built than there are vehicles.
    ///
    /// Merges keep the first route's vehicle id without reconciling the
    /// other one, so this is reported separately from validity.
    pub fn exceeds_fleet(&self, instance: &ProblemInstance) -> bool {
        self.routes.len() > instance.num_vehicles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_empty() {
        let sol = RoutingSolution::from_routes(Vec::new());
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.total_cost(), 0.0);
        assert_eq!(sol.num_served(), 0);
    }

    #[test]
    fn test_num_served_counts_slots() {
        let sol = RoutingSolution::from_routes(vec![
            Route::singleton(0, 1),
            Route::from_customers(1, vec![2, 3, 2]),
        ]);
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.num_served(), 4);
    }

    #[test]
    fn test_violation_types() {
        let v = Violation::new(ViolationType::CapacityExceeded {
            route_index: 0,
            load: 13,
            capacity: 12,
        });
        assert!(matches!(
            v.kind,
            ViolationType::CapacityExceeded { load: 13, .. }
        ));
    }

    #[test]
    fn test_serialize_json() {
        let sol = RoutingSolution::from_routes(vec![Route::from_customers(0, vec![2, 1])]);
        let json = serde_json::to_value(&sol).expect("serializable");
        assert_eq!(json["routes"][0]["customers"], serde_json::json!([2, 1]));
        assert_eq!(json["routes"][0]["load"], 2);
    }
}

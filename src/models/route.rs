//! Route type.

use serde::{Deserialize, Serialize};

/// An ordered sequence of customers served by one vehicle.
///
/// The depot is implicit at both ends and is not stored. `load` counts the
/// customers on the route and `total_distance` caches the closed-tour length
/// as last computed by the evaluator.
///
/// # Examples
///
/// ```
/// use cw_routing::models::Route;
///
/// let a = Route::singleton(1, 3);
/// let b = Route::singleton(2, 5);
/// let merged = Route::concat(&a, &b, a.vehicle_id());
/// assert_eq!(merged.customer_ids(), &[3, 5]);
/// assert_eq!(merged.load(), 2);
/// assert_eq!(merged.vehicle_id(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    vehicle_id: usize,
    customers: Vec<usize>,
    load: usize,
    total_distance: f64,
}

impl Route {
    /// Creates a route visiting a single customer.
    pub fn singleton(vehicle_id: usize, customer_id: usize) -> Self {
        Self::from_customers(vehicle_id, vec![customer_id])
    }

    /// Creates a route from an explicit visiting order.
    pub fn from_customers(vehicle_id: usize, customers: Vec<usize>) -> Self {
        let load = customers.len();
        Self {
            vehicle_id,
            customers,
            load,
            total_distance: 0.0,
        }
    }

    /// Splices `tail` after `head`, assigning the result to `vehicle_id`.
    ///
    /// The load of the merged route is the sum of both loads. Distance is
    /// left for the evaluator to recompute.
    pub fn concat(head: &Route, tail: &Route, vehicle_id: usize) -> Self {
        let mut customers = Vec::with_capacity(head.len() + tail.len());
        customers.extend_from_slice(&head.customers);
        customers.extend_from_slice(&tail.customers);
        Self {
            vehicle_id,
            customers,
            load: head.load + tail.load,
            total_distance: 0.0,
        }
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Returns the customer IDs in visit order.
    pub fn customer_ids(&self) -> &[usize] {
        &self.customers
    }

    /// Mutable access to the visiting order.
    ///
    /// The slice cannot grow or shrink, so membership and load stay fixed.
    pub fn customers_mut(&mut self) -> &mut [usize] {
        &mut self.customers
    }

    /// Returns the number of customers (excluding depot).
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns `true` if this route has no customers.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Number of customers counted against the vehicle capacity.
    pub fn load(&self) -> usize {
        self.load
    }

    /// Total distance of this route (set by evaluator).
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Sets the total distance (used by evaluator).
    pub fn set_total_distance(&mut self, d: f64) {
        self.total_distance = d;
    }
}

//! Clarke-Wright savings algorithm.
//!
//! # Algorithm
//!
//! The savings algorithm (Clarke & Wright, 1964) starts with each customer
//! on its own route (depot → customer → depot). It then merges routes by
//! computing the "savings" of combining the end of one route with the start
//! of another:
//!
//! ```text
//! s(i, j) = d(0, i) + d(0, j) - d(i, j)
//! ```
//!
//! Pairs are visited once, in decreasing order of savings. A pair is merged
//! only when both customers sit at an end of two different routes, the
//! combined load fits the vehicle of `i`'s route, and the ends line up as
//! tail-of-one to head-of-the-other. Routes are never reversed to make a
//! pair fit.
//!
//! # Complexity
//!
//! O(n² log n) where n = number of customers (dominated by sorting savings).
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use tracing::{debug, info, trace};

use crate::evaluation::RouteEvaluator;
use crate::models::{ProblemInstance, Route, RoutingSolution};

/// A savings value for serving customers `i` and `j` consecutively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saving {
    /// First customer id (the smaller one).
    pub i: usize,
    /// Second customer id.
    pub j: usize,
    /// Distance saved by the direct `i → j` link.
    pub value: f64,
}

/// Distance saved by linking `i` and `j` directly instead of via two depot
/// round trips.
///
/// ```
/// use cw_routing::models::{Node, ProblemInstance, Vehicle};
/// use cw_routing::constructive::saving;
///
/// let instance = ProblemInstance::euclidean(
///     Node::depot(0.0, 0.0),
///     vec![Node::new(1, 3.0, 0.0), Node::new(2, 4.0, 0.0)],
///     Vehicle::fleet(1, 2),
/// )
/// .unwrap();
/// // 3 + 4 - 1
/// assert!((saving(&instance, 1, 2) - 6.0).abs() < 1e-10);
/// ```
pub fn saving(instance: &ProblemInstance, i: usize, j: usize) -> f64 {
    let depot = instance.depot().id();
    instance.distance(depot, i) + instance.distance(depot, j) - instance.distance(i, j)
}

/// Builds a capacity-feasible solution with the Clarke-Wright savings merge.
///
/// Every customer starts on its own route, assigned round-robin to vehicle
/// `id mod m`. A merged route keeps the vehicle of `i`'s route; the vehicle
/// of the other route is dropped without being reconciled, so the result may
/// use more routes than there are vehicles (see
/// [`RoutingSolution::exceeds_fleet`]).
///
/// # Examples
///
/// ```
/// use cw_routing::models::{Node, ProblemInstance, Vehicle};
/// use cw_routing::constructive::SavingsConstructor;
///
/// let instance = ProblemInstance::euclidean(
///     Node::depot(0.0, 0.0),
///     vec![Node::new(1, 1.0, 0.0), Node::new(2, 2.0, 0.0), Node::new(3, 3.0, 0.0)],
///     Vehicle::fleet(1, 3),
/// )
/// .unwrap();
///
/// let solution = SavingsConstructor::new(&instance).build();
/// assert_eq!(solution.num_routes(), 1);
/// assert!(solution.is_valid(&instance));
/// ```
pub struct SavingsConstructor<'a> {
    instance: &'a ProblemInstance,
    positive_only: bool,
}

impl<'a> SavingsConstructor<'a> {
    /// Creates a constructor that considers every customer pair.
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self {
            instance,
            positive_only: false,
        }
    }

    /// Discards pairs whose saving is not strictly positive.
    pub fn positive_savings_only(mut self) -> Self {
        self.positive_only = true;
        self
    }

    /// All customer pairs `(i, j)` with `i < j`, sorted by decreasing saving.
    ///
    /// Equal savings keep ascending `(i, j)` order.
    pub fn savings(&self) -> Vec<Saving> {
        let n = self.instance.num_customers();
        let mut savings = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 1..=n {
            for j in (i + 1)..=n {
                let value = saving(self.instance, i, j);
                if self.positive_only && value <= 0.0 {
                    continue;
                }
                savings.push(Saving { i, j, value });
            }
        }
        savings.sort_by(|a, b| b.value.total_cmp(&a.value));
        savings
    }

    /// Runs the savings merge and returns a costed solution.
    pub fn build(&self) -> RoutingSolution {
        let savings = self.savings();
        let vehicles = self.instance.vehicles();
        let mut routes = RouteSet::singletons(self.instance);
        let mut merges = 0usize;

        debug!(
            customers = self.instance.num_customers(),
            pairs = savings.len(),
            "starting savings merge"
        );

        for s in &savings {
            let (Some((si, pi, ri)), Some((sj, pj, rj))) = (routes.locate(s.i), routes.locate(s.j))
            else {
                continue;
            };
            if si == sj {
                continue;
            }

            let (i_head, i_tail) = (pi == 0, pi + 1 == ri.len());
            let (j_head, j_tail) = (pj == 0, pj + 1 == rj.len());
            if !(i_head || i_tail) || !(j_head || j_tail) {
                continue;
            }

            let vehicle_id = ri.vehicle_id();
            let load = ri.load() + rj.load();
            if load > vehicles[vehicle_id].capacity() {
                trace!(i = s.i, j = s.j, load, vehicle_id, "merge exceeds capacity");
                continue;
            }

            let (head, tail) = if i_tail && j_head {
                (si, sj)
            } else if i_head && j_tail {
                (sj, si)
            } else {
                continue;
            };

            trace!(i = s.i, j = s.j, saving = s.value, load, "merge routes");
            routes.merge(head, tail, vehicle_id);
            merges += 1;
        }

        let mut solution = routes.into_solution();
        let cost = RouteEvaluator::new(self.instance).recost(&mut solution);
        info!(
            routes = solution.num_routes(),
            merges,
            cost,
            "savings construction finished"
        );
        solution
    }
}

/// Working set of routes with a customer → (slot, position) index.
///
/// Merged routes go into a fresh slot and both source slots are emptied, so
/// slot order is initial order followed by merge order.
struct RouteSet {
    slots: Vec<Option<Route>>,
    location: Vec<Option<(usize, usize)>>,
}

impl RouteSet {
    fn singletons(instance: &ProblemInstance) -> Self {
        let m = instance.num_vehicles();
        let mut slots = Vec::with_capacity(instance.num_customers());
        let mut location = vec![None; instance.num_customers() + 1];
        for c in instance.customers() {
            location[c.id()] = Some((slots.len(), 0));
            slots.push(Some(Route::singleton(c.id() % m, c.id())));
        }
        Self { slots, location }
    }

    /// Current slot, position, and route of a customer.
    fn locate(&self, customer: usize) -> Option<(usize, usize, &Route)> {
        let (slot, pos) = (*self.location.get(customer)?)?;
        let route = self.slots.get(slot)?.as_ref()?;
        (route.customer_ids().get(pos) == Some(&customer)).then_some((slot, pos, route))
    }

    /// Replaces the routes in `head` and `tail` with their concatenation.
    fn merge(&mut self, head: usize, tail: usize, vehicle_id: usize) {
        let (Some(h), Some(t)) = (self.slots[head].take(), self.slots[tail].take()) else {
            return;
        };
        let merged = Route::concat(&h, &t, vehicle_id);
        let slot = self.slots.len();
        for (pos, &cid) in merged.customer_ids().iter().enumerate() {
            self.location[cid] = Some((slot, pos));
        }
        self.slots.push(Some(merged));
    }

    fn into_solution(self) -> RoutingSolution {
        RoutingSolution::from_routes(self.slots.into_iter().flatten().collect())
    }
}

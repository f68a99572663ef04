//! Route evaluator that computes distances and checks solution validity.

use std::collections::BTreeSet;

use crate::models::{ProblemInstance, Route, RoutingSolution, Violation, ViolationType};

/// Computes route distances and checks a solution against its instance.
///
/// # Examples
///
/// ```
/// use cw_routing::models::{Node, ProblemInstance, Route, RoutingSolution, Vehicle};
/// use cw_routing::evaluation::RouteEvaluator;
///
/// let instance = ProblemInstance::euclidean(
///     Node::depot(0.0, 0.0),
///     vec![Node::new(1, 3.0, 4.0), Node::new(2, 6.0, 8.0)],
///     Vehicle::fleet(1, 2),
/// )
/// .unwrap();
///
/// let mut sol = RoutingSolution::from_routes(vec![Route::from_customers(0, vec![1, 2])]);
/// let evaluator = RouteEvaluator::new(&instance);
/// assert!((evaluator.recost(&mut sol) - 20.0).abs() < 1e-10);
/// assert!(evaluator.violations(&sol).is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    instance: &'a ProblemInstance,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given instance.
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self { instance }
    }

    /// Closed-tour length `depot → c[0] → ... → c[n-1] → depot`; zero when empty.
    pub fn route_distance(&self, customers: &[usize]) -> f64 {
        let (Some(&first), Some(&last)) = (customers.first(), customers.last()) else {
            return 0.0;
        };
        let depot = self.instance.depot().id();
        let mut dist = self.instance.distance(depot, first);
        for w in customers.windows(2) {
            dist += self.instance.distance(w[0], w[1]);
        }
        dist += self.instance.distance(last, depot);
        dist
    }

    /// Recomputes and caches the distance of a single route.
    pub fn evaluate_route(&self, route: &mut Route) -> f64 {
        let d = self.route_distance(route.customer_ids());
        route.set_total_distance(d);
        d
    }

    /// Recomputes every route distance and the solution total from scratch.
    pub fn recost(&self, solution: &mut RoutingSolution) -> f64 {
        let total = solution
            .routes_mut()
            .iter_mut()
            .map(|r| self.evaluate_route(r))
            .sum::<f64>();
        solution.set_total_cost(total);
        total
    }

    /// Lists every defect of `solution`.
    ///
    /// Checks vehicle ids, capacities, cached loads, and that each customer
    /// `1..=N` appears exactly once. Duplicates are detected by counting
    /// customer slots, not by comparing the size of a deduplicated set.
    pub fn violations(&self, solution: &RoutingSolution) -> Vec<Violation> {
        let vehicles = self.instance.vehicles();
        let n = self.instance.num_customers();
        let mut violations = Vec::new();
        let mut visits = vec![0usize; n + 1];
        let mut unknown = BTreeSet::new();

        for (route_index, route) in solution.routes().iter().enumerate() {
            match vehicles.get(route.vehicle_id()) {
                None => violations.push(Violation::new(ViolationType::UnknownVehicle {
                    route_index,
                    vehicle_id: route.vehicle_id(),
                })),
                Some(v) if route.load() > v.capacity() => {
                    violations.push(Violation::new(ViolationType::CapacityExceeded {
                        route_index,
                        load: route.load(),
                        capacity: v.capacity(),
                    }))
                }
                Some(_) => {}
            }

            if route.load() != route.len() {
                violations.push(Violation::new(ViolationType::LoadMismatch {
                    route_index,
                    load: route.load(),
                    customers: route.len(),
                }));
            }

            for &cid in route.customer_ids() {
                if (1..=n).contains(&cid) {
                    visits[cid] += 1;
                } else {
                    unknown.insert(cid);
                }
            }
        }

        for customer_id in unknown {
            violations.push(Violation::new(ViolationType::UnknownCustomer { customer_id }));
        }

        for (customer_id, &count) in visits.iter().enumerate().skip(1) {
            match count {
                0 => violations.push(Violation::new(ViolationType::MissingCustomer { customer_id })),
                1 => {}
                _ => violations.push(Violation::new(ViolationType::DuplicateCustomer {
                    customer_id,
                    visits: count,
                })),
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, Vehicle};

    fn setup() -> ProblemInstance {
        ProblemInstance::euclidean(
            Node::depot(0.0, 0.0),
            vec![
                Node::new(1, 3.0, 4.0),
                Node::new(2, 6.0, 8.0),
                Node::new(3, 0.0, 10.0),
            ],
            Vehicle::fleet(2, 2),
        )
        .expect("valid instance")
    }

    fn kinds(v: Vec<Violation>) -> Vec<ViolationType> {
        v.into_iter().map(|v| v.kind).collect()
    }

    #[test]
    fn test_route_distance_empty() {
        let inst = setup();
        let eval = RouteEvaluator::new(&inst);
        assert_eq!(eval.route_distance(&[]), 0.0);
    }

    #[test]
    fn test_route_distance_single() {
        let inst = setup();
        let eval = RouteEvaluator::new(&inst);
        // depot->1 = 5.0, 1->depot = 5.0
        assert!((eval.route_distance(&[1]) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_route_distance_directional() {
        let depot = Node::depot(0.0, 0.0);
        let customers = vec![Node::new(1, 0.0, 0.0), Node::new(2, 0.0, 0.0)];
        let mut dm = crate::distance::DistanceMatrix::new(3);
        dm.set(0, 1, 1.0);
        dm.set(1, 2, 2.0);
        dm.set(2, 0, 4.0);
        dm.set(0, 2, 8.0);
        dm.set(2, 1, 16.0);
        dm.set(1, 0, 32.0);
        let inst = ProblemInstance::new(depot, customers, Vehicle::fleet(1, 2), dm).expect("valid");
        let eval = RouteEvaluator::new(&inst);
        assert_eq!(eval.route_distance(&[1, 2]), 7.0);
        assert_eq!(eval.route_distance(&[2, 1]), 56.0);
    }

    #[test]
    fn test_recost_sets_routes_and_total() {
        let inst = setup();
        let eval = RouteEvaluator::new(&inst);
        let mut sol = RoutingSolution::from_routes(vec![
            Route::from_customers(0, vec![1, 2]),
            Route::singleton(1, 3),
        ]);
        let total = eval.recost(&mut sol);
        assert!((sol.routes()[0].total_distance() - 20.0).abs() < 1e-10);
        assert!((sol.routes()[1].total_distance() - 20.0).abs() < 1e-10);
        assert!((total - 40.0).abs() < 1e-10);
        assert_eq!(sol.total_cost(), total);
    }

    #[test]
    fn test_valid_solution() {
        let inst = setup();
        let sol = RoutingSolution::from_routes(vec![
            Route::from_customers(0, vec![1, 2]),
            Route::singleton(1, 3),
        ]);
        assert!(RouteEvaluator::new(&inst).violations(&sol).is_empty());
        assert!(sol.is_valid(&inst));
    }

    #[test]
    fn test_missing_customer() {
        let inst = setup();
        let sol = RoutingSolution::from_routes(vec![Route::from_customers(0, vec![1, 2])]);
        assert_eq!(
            kinds(sol.violations(&inst)),
            vec![ViolationType::MissingCustomer { customer_id: 3 }]
        );
    }

    #[test]
    fn test_duplicate_customer_with_full_coverage() {
        // Every id is present, so a deduplicated-set check alone would pass.
        let inst = setup();
        let sol = RoutingSolution::from_routes(vec![
            Route::from_customers(0, vec![1, 2]),
            Route::from_customers(1, vec![3, 1]),
        ]);
        assert_eq!(
            kinds(sol.violations(&inst)),
            vec![ViolationType::DuplicateCustomer {
                customer_id: 1,
                visits: 2
            }]
        );
    }

    #[test]
    fn test_capacity_exceeded() {
        let inst = setup();
        let sol = RoutingSolution::from_routes(vec![Route::from_customers(1, vec![1, 2, 3])]);
        assert_eq!(
            kinds(sol.violations(&inst)),
            vec![ViolationType::CapacityExceeded {
                route_index: 0,
                load: 3,
                capacity: 2
            }]
        );
    }

    #[test]
    fn test_unknown_vehicle_and_customer() {
        let inst = setup();
        let sol = RoutingSolution::from_routes(vec![
            Route::from_customers(0, vec![1, 2]),
            Route::from_customers(7, vec![3, 9]),
        ]);
        assert_eq!(
            kinds(sol.violations(&inst)),
            vec![
                ViolationType::UnknownVehicle {
                    route_index: 1,
                    vehicle_id: 7
                },
                ViolationType::UnknownCustomer { customer_id: 9 },
            ]
        );
    }

    #[test]
    fn test_depot_inside_route_is_unknown_customer() {
        let inst = setup();
        let sol = RoutingSolution::from_routes(vec![
            Route::from_customers(0, vec![1, 0]),
            Route::from_customers(1, vec![2, 3]),
        ]);
        assert_eq!(
            kinds(sol.violations(&inst)),
            vec![ViolationType::UnknownCustomer { customer_id: 0 }]
        );
    }

    #[test]
    fn test_exceeds_fleet() {
        let inst = setup();
        let sol = RoutingSolution::from_routes(vec![
            Route::singleton(0, 1),
            Route::singleton(1, 2),
            Route::singleton(0, 3),
        ]);
        assert!(sol.is_valid(&inst));
        assert!(sol.exceeds_fleet(&inst));
    }
}

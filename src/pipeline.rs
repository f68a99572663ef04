//! End-to-end solve: construction, improvement, recost, validity check.

use tracing::{info, warn};

use crate::constructive::SavingsConstructor;
use crate::local_search::{ImprovementReport, TwoOptImprover};
use crate::models::{ProblemInstance, RoutingSolution, Violation};

/// Algorithm switches for a solve run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveOptions {
    /// Run 2-opt after construction.
    pub improve: bool,
    /// Ignore customer pairs with non-positive savings.
    pub positive_savings_only: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            improve: true,
            positive_savings_only: false,
        }
    }
}

/// Result of [`solve`].
///
/// An invalid solution is returned rather than treated as an error; the
/// caller decides whether to export it.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Final, freshly costed solution.
    pub solution: RoutingSolution,
    /// Cost right after savings construction.
    pub construction_cost: f64,
    /// 2-opt statistics, if improvement ran.
    pub improvement: Option<ImprovementReport>,
    /// Defects found by the validity check.
    pub violations: Vec<Violation>,
    /// More routes than vehicles.
    pub exceeds_fleet: bool,
}

impl SolveOutcome {
    /// `true` when the validity check found nothing.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Builds, improves, recosts, and checks a solution for `instance`.
///
/// # Examples
///
/// ```
/// use cw_routing::generate::random_instance;
/// use cw_routing::pipeline::{solve, SolveOptions};
///
/// let instance = random_instance(30, 5, 8, 42).unwrap();
/// let outcome = solve(&instance, SolveOptions::default());
/// assert!(outcome.is_valid());
/// assert!(outcome.solution.total_cost() <= outcome.construction_cost);
/// ```
pub fn solve(instance: &ProblemInstance, options: SolveOptions) -> SolveOutcome {
    let mut constructor = SavingsConstructor::new(instance);
    if options.positive_savings_only {
        constructor = constructor.positive_savings_only();
    }
    let mut solution = constructor.build();
    let construction_cost = solution.total_cost();

    let improvement = options
        .improve
        .then(|| TwoOptImprover::new(instance).improve(&mut solution));

    let cost = solution.recost(instance);
    let violations = solution.violations(instance);
    let exceeds_fleet = solution.exceeds_fleet(instance);

    if exceeds_fleet {
        warn!(
            routes = solution.num_routes(),
            vehicles = instance.num_vehicles(),
            "more routes than vehicles"
        );
    }
    if !violations.is_empty() {
        warn!(violations = violations.len(), "solution failed validity check");
    }
    info!(cost, routes = solution.num_routes(), "solve finished");

    SolveOutcome {
        solution,
        construction_cost,
        improvement,
        violations,
        exceeds_fleet,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, Vehicle};

    #[test]
    fn test_solve_without_improvement() {
        let inst = ProblemInstance::euclidean(
            Node::depot(0.0, 0.0),
            vec![Node::new(1, 1.0, 0.0), Node::new(2, 2.0, 0.0)],
            Vehicle::fleet(1, 2),
        )
        .expect("valid instance");
        let outcome = solve(
            &inst,
            SolveOptions {
                improve: false,
                ..SolveOptions::default()
            },
        );
        assert!(outcome.improvement.is_none());
        assert!(outcome.is_valid());
        assert!(!outcome.exceeds_fleet);
        assert_eq!(outcome.solution.total_cost(), outcome.construction_cost);
    }

    #[test]
    fn test_solve_reports_fleet_overflow() {
        // Capacity 1 keeps every customer alone: 3 routes, 2 vehicles.
        let inst = ProblemInstance::euclidean(
            Node::depot(0.0, 0.0),
            vec![Node::new(1, 1.0, 0.0), Node::new(2, 2.0, 0.0), Node::new(3, 3.0, 0.0)],
            Vehicle::fleet(2, 1),
        )
        .expect("valid instance");
        let outcome = solve(&inst, SolveOptions::default());
        assert_eq!(outcome.solution.num_routes(), 3);
        assert!(outcome.exceeds_fleet);
        assert!(outcome.is_valid());
    }
}

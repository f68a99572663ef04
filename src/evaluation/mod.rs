//! Route cost computation and solution validity checking.

mod evaluator;

pub use evaluator::RouteEvaluator;

//! Local search operators for improving routing solutions.
//!
//! - [`TwoOptImprover`]: Intra-route 2-opt edge reversal

mod two_opt;

pub use two_opt::{two_opt_improve, ImprovementReport, TwoOptImprover};

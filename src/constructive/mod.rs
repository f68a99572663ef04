//! Constructive heuristics for building initial routing solutions.
//!
//! - [`SavingsConstructor`]: Clarke-Wright savings merge (1964), O(n² log n)

mod clarke_wright;

pub use clarke_wright::{saving, Saving, SavingsConstructor};

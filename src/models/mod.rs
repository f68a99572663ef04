//! Domain model types for capacitated vehicle routing.
//!
//! Provides the core abstractions: depot and customer nodes, vehicles with
//! a customer-count capacity, routes as ordered customer sequences, the
//! validated problem instance, and the routing solution.

mod instance;
mod node;
mod route;
mod solution;
mod vehicle;

pub use instance::ProblemInstance;
pub use node::Node;
pub use route::Route;
pub use solution::{RoutingSolution, Violation, ViolationType};
pub use vehicle::Vehicle;

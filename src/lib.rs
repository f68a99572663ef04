//! # cw-routing
//!
//! Capacitated vehicle routing from a single depot: Clarke-Wright savings
//! construction followed by intra-route 2-opt improvement.
//!
//! ## Modules
//!
//! - [`models`]: Domain model types (Node, Vehicle, Route, RoutingSolution, ProblemInstance)
//! - [`distance`]: Directional distance matrix
//! - [`evaluation`]: Route cost computation and solution validity checking
//! - [`constructive`]: Clarke-Wright savings construction
//! - [`local_search`]: 2-opt route improvement
//! - [`pipeline`]: Construction, improvement, recost, validity check
//! - [`generate`]: Seeded random instances
//! - [`io`]: Flat-file loading, CSV/JSON export, route plots, console report
//! - [`config`]: Run configuration

pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod generate;
pub mod io;
pub mod local_search;
pub mod models;
pub mod pipeline;

pub use error::InstanceError;

//! Adapters between flat files and the routing core.
//!
//! - [`loader`]: coordinate and distance files → [`ProblemInstance`](crate::models::ProblemInstance)
//! - [`export`]: routes → CSV / JSON
//! - [`plot`]: routes → PNG / SVG
//! - [`report`]: console summary

pub mod export;
pub mod loader;
pub mod plot;
pub mod report;

pub use export::{export_routes_csv, export_solution_json, write_routes_csv};
pub use loader::{
    load_coordinates, load_distance_matrix, load_instance, parse_coordinates,
    parse_distance_matrix,
};
pub use plot::{export_plot, render_svg, PlotFormat};
pub use report::write_report;

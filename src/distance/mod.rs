//! Distance matrix.
//!
//! Provides a dense, directional distance table indexed by node id.

mod matrix;

pub use matrix::DistanceMatrix;

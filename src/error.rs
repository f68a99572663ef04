//! Instance construction errors.

use std::fmt;

/// A data-integrity defect found while assembling a [`ProblemInstance`].
///
/// These are caller errors: an instance that fails these checks would make
/// the savings constructor divide by zero or index outside the distance
/// table, so it is rejected before any algorithm runs.
///
/// [`ProblemInstance`]: crate::models::ProblemInstance
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceError {
    /// The fleet is empty.
    NoVehicles,
    /// Vehicle at `index` carries a different id.
    VehicleIdMismatch {
        /// Position in the vehicle list.
        index: usize,
        /// Id found at that position.
        id: usize,
    },
    /// A vehicle has zero capacity.
    ZeroCapacity {
        /// Vehicle id.
        vehicle_id: usize,
    },
    /// The depot does not have id 0.
    DepotId {
        /// Id found on the depot node.
        id: usize,
    },
    /// Customer at `index` does not carry id `index + 1`.
    CustomerIdMismatch {
        /// Position in the customer list.
        index: usize,
        /// Id found at that position.
        id: usize,
    },
    /// Distance matrix size differs from `1 + customers`.
    MatrixSize {
        /// Expected number of rows and columns.
        expected: usize,
        /// Actual matrix size.
        found: usize,
    },
    /// A distance row has a different length than the first row.
    RaggedMatrix {
        /// Offending row.
        row: usize,
        /// Expected row length.
        expected: usize,
        /// Actual row length.
        found: usize,
    },
    /// The distance table has a different number of rows and columns.
    NonSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },
}

impl fmt::Display for InstanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoVehicles => write!(f, "instance has no vehicles"),
            Self::VehicleIdMismatch { index, id } => {
                write!(f, "vehicle at position {index} has id {id}, expected {index}")
            }
            Self::ZeroCapacity { vehicle_id } => {
                write!(f, "vehicle {vehicle_id} has zero capacity")
            }
            Self::DepotId { id } => write!(f, "depot has id {id}, expected 0"),
            Self::CustomerIdMismatch { index, id } => write!(
                f,
                "customer at position {index} has id {id}, expected {}",
                index + 1
            ),
            Self::MatrixSize { expected, found } => write!(
                f,
                "distance matrix is {found}x{found}, expected {expected}x{expected}"
            ),
            Self::RaggedMatrix {
                row,
                expected,
                found,
            } => write!(
                f,
                "distance row {row} has {found} entries, expected {expected}"
            ),
            Self::NonSquare { rows, cols } => {
                write!(f, "distance table is {rows}x{cols}, not square")
            }
        }
    }
}

impl std::error::Error for InstanceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matrix_size() {
        let e = InstanceError::MatrixSize {
            expected: 5,
            found: 4,
        };
        assert_eq!(e.to_string(), "distance matrix is 4x4, expected 5x5");
    }

    #[test]
    fn test_display_customer_id() {
        let e = InstanceError::CustomerIdMismatch { index: 2, id: 7 };
        assert_eq!(e.to_string(), "customer at position 2 has id 7, expected 3");
    }
}

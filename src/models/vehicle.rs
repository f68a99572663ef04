//! Vehicle type with a customer-count capacity.

use serde::{Deserialize, Serialize};

/// A vehicle that serves one route.
///
/// Capacity is measured in customers, since each customer has unit demand.
///
/// # Examples
///
/// ```
/// use cw_routing::models::Vehicle;
///
/// let v = Vehicle::new(0, 12);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.capacity(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    id: usize,
    capacity: usize,
}

impl Vehicle {
    /// Creates a vehicle with the given ID and capacity.
    pub fn new(id: usize, capacity: usize) -> Self {
        Self { id, capacity }
    }

    /// Builds a homogeneous fleet with ids `0..count`.
    ///
    /// ```
    /// use cw_routing::models::Vehicle;
    ///
    /// let fleet = Vehicle::fleet(3, 10);
    /// assert_eq!(fleet.len(), 3);
    /// assert_eq!(fleet[2].id(), 2);
    /// ```
    pub fn fleet(count: usize, capacity: usize) -> Vec<Self> {
        (0..count).map(|id| Self::new(id, capacity)).collect()
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum number of customers this vehicle can serve.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new(4, 200);
        assert_eq!(v.id(), 4);
        assert_eq!(v.capacity(), 200);
    }

    #[test]
    fn test_fleet() {
        let fleet = Vehicle::fleet(20, 12);
        assert_eq!(fleet.len(), 20);
        assert!(fleet.iter().enumerate().all(|(i, v)| v.id() == i));
        assert!(fleet.iter().all(|v| v.capacity() == 12));
    }

    #[test]
    fn test_empty_fleet() {
        assert!(Vehicle::fleet(0, 12).is_empty());
    }
}

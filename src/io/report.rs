//! Plain-text console report.

use std::io;

use crate::models::{ProblemInstance, RoutingSolution};

/// Writes a human-readable summary of `solution`.
///
/// ```text
/// Total cost: 7.24, routes: 1
/// Depot at (0, 0)
/// Route 1 (vehicle 0, customers: 4): depot -> 3 -> 4 -> 1 -> 2 -> depot (7.24)
/// ```
pub fn write_report<W: io::Write>(
    mut w: W,
    solution: &RoutingSolution,
    instance: &ProblemInstance,
) -> io::Result<()> {
    writeln!(
        w,
        "Total cost: {:.2}, routes: {}",
        solution.total_cost(),
        solution.num_routes()
    )?;
    let depot = instance.depot();
    writeln!(w, "Depot at ({}, {})", depot.x(), depot.y())?;
    for (k, route) in solution.routes().iter().enumerate() {
        write!(
            w,
            "Route {} (vehicle {}, customers: {}): depot -> ",
            k + 1,
            route.vehicle_id(),
            route.load()
        )?;
        for cid in route.customer_ids() {
            write!(w, "{cid} -> ")?;
        }
        writeln!(w, "depot ({:.2})", route.total_distance())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, Route, Vehicle};

    #[test]
    fn test_report_lines() {
        let inst = ProblemInstance::euclidean(
            Node::depot(0.0, 0.0),
            vec![Node::new(1, 3.0, 4.0), Node::new(2, 6.0, 8.0)],
            Vehicle::fleet(1, 2),
        )
        .expect("valid instance");
        let mut sol = RoutingSolution::from_routes(vec![Route::from_customers(0, vec![1, 2])]);
        sol.recost(&inst);

        let mut buf = Vec::new();
        write_report(&mut buf, &sol, &inst).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(
            text,
            "Total cost: 20.00, routes: 1\n\
             Depot at (0, 0)\n\
             Route 1 (vehicle 0, customers: 2): depot -> 1 -> 2 -> depot (20.00)\n"
        );
    }
}

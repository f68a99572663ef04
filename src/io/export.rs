//! Route export to CSV and JSON.
//!
//! The CSV layout is one block per route: a `# Ruta vehiculo <id>` marker
//! record, then `x,y,id` for the depot, every customer in visit order, and
//! the depot again.

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing::info;

use crate::models::{ProblemInstance, RoutingSolution};

/// Start-of-route record prefix; downstream plotting tools split on it.
pub const ROUTE_MARKER: &str = "# Ruta vehiculo";

/// Writes every route of `solution` as CSV records.
pub fn write_routes_csv<W: io::Write>(
    writer: W,
    solution: &RoutingSolution,
    instance: &ProblemInstance,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(writer);

    let depot = instance.depot();
    for (index, route) in solution.routes().iter().enumerate() {
        wtr.write_record([format!("{ROUTE_MARKER} {}", route.vehicle_id())])?;
        let stops = std::iter::once(depot.id())
            .chain(route.customer_ids().iter().copied())
            .chain(std::iter::once(depot.id()));
        for id in stops {
            let node = instance
                .node(id)
                .ok_or_else(|| anyhow!("route {index} visits unknown node {id}"))?;
            wtr.write_record([node.x().to_string(), node.y().to_string(), id.to_string()])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the CSV export to `path`.
pub fn export_routes_csv(
    path: &Path,
    solution: &RoutingSolution,
    instance: &ProblemInstance,
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_routes_csv(io::BufWriter::new(file), solution, instance)
        .with_context(|| format!("writing routes to {}", path.display()))?;
    info!(path = %path.display(), routes = solution.num_routes(), "CSV exported");
    Ok(())
}

/// Writes the whole solution as pretty-printed JSON to `path`.
pub fn export_solution_json(path: &Path, solution: &RoutingSolution) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(io::BufWriter::new(file), solution)
        .with_context(|| format!("writing solution to {}", path.display()))?;
    info!(path = %path.display(), "JSON exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, Route, Vehicle};

    fn setup() -> ProblemInstance {
        ProblemInstance::euclidean(
            Node::depot(0.0, 0.0),
            vec![Node::new(1, 1.0, 2.0), Node::new(2, 3.5, 4.0)],
            Vehicle::fleet(2, 2),
        )
        .expect("valid instance")
    }

    #[test]
    fn test_csv_layout() {
        let inst = setup();
        let sol = RoutingSolution::from_routes(vec![
            Route::from_customers(1, vec![2, 1]),
            Route::from_customers(0, Vec::new()),
        ]);
        let mut buf = Vec::new();
        write_routes_csv(&mut buf, &sol, &inst).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(
            text,
            "# Ruta vehiculo 1\n0,0,0\n3.5,4,2\n1,2,1\n0,0,0\n# Ruta vehiculo 0\n0,0,0\n0,0,0\n"
        );
    }

    /// Splits CSV text into `(x, y, id)` blocks at each route marker.
    fn split_blocks(text: &str) -> Vec<Vec<(f64, f64, usize)>> {
        let mut blocks = Vec::new();
        let mut current: Option<Vec<(f64, f64, usize)>> = None;
        for line in text.lines().map(str::trim) {
            if line.starts_with(ROUTE_MARKER) {
                blocks.extend(current.take());
                current = Some(Vec::new());
                continue;
            }
            let parts: Vec<&str> = line.split(',').collect();
            if let (Some(block), [x, y, id]) = (current.as_mut(), parts.as_slice()) {
                block.push((x.parse().unwrap(), y.parse().unwrap(), id.parse().unwrap()));
            }
        }
        blocks.extend(current);
        blocks
    }

    #[test]
    fn test_csv_two_routes_two_blocks() {
        let inst = ProblemInstance::euclidean(
            Node::depot(0.0, 0.0),
            vec![
                Node::new(1, 1.0, 0.0),
                Node::new(2, 2.0, 0.0),
                Node::new(3, 0.0, 1.0),
                Node::new(4, 0.0, 2.0),
            ],
            Vehicle::fleet(2, 2),
        )
        .expect("valid instance");
        let sol = crate::constructive::SavingsConstructor::new(&inst).build();
        assert_eq!(sol.num_routes(), 2);

        let mut buf = Vec::new();
        write_routes_csv(&mut buf, &sol, &inst).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text.lines().filter(|l| l.starts_with(ROUTE_MARKER)).count(), 2);

        let blocks = split_blocks(&text);
        assert_eq!(blocks.len(), 2);
        for (block, route) in blocks.iter().zip(sol.routes()) {
            let ids: Vec<usize> = block.iter().map(|&(_, _, id)| id).collect();
            let mut expected = vec![0];
            expected.extend_from_slice(route.customer_ids());
            expected.push(0);
            assert_eq!(ids, expected);
        }
    }

    #[test]
    fn test_csv_unknown_node() {
        let inst = setup();
        let sol = RoutingSolution::from_routes(vec![Route::from_customers(0, vec![9])]);
        let err = write_routes_csv(Vec::new(), &sol, &inst).unwrap_err();
        assert!(err.to_string().contains("unknown node 9"));
    }
}

//! Route plots rendered with plotters.
//!
//! Each route is drawn as a closed polyline in its own palette colour, with
//! customer markers labelled by node id and the depot drawn as a square.
//! SVG output always carries text. PNG output only carries text when the
//! `plot-fonts` feature provides a font rasterizer; otherwise the bitmap
//! shows routes and markers alone.

use std::ops::Range;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::models::{ProblemInstance, RoutingSolution};

/// Canvas size in pixels.
pub const PLOT_SIZE: (u32, u32) = (1600, 1200);

const LABEL_FONT: (&str, i32) = ("sans-serif", 14);

/// Image format of a plot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotFormat {
    Png,
    Svg,
}

impl PlotFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("svg") => Ok(Self::Svg),
            _ => bail!("cannot plot to {}: expected a .png or .svg file", path.display()),
        }
    }

    fn draws_text(self) -> bool {
        match self {
            Self::Svg => true,
            Self::Png => cfg!(feature = "plot-fonts"),
        }
    }
}

/// Renders the solution as an SVG document.
pub fn render_svg(solution: &RoutingSolution, instance: &ProblemInstance) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, PLOT_SIZE).into_drawing_area();
        draw_routes(&root, solution, instance, PlotFormat::Svg.draws_text())?;
        root.present()?;
    }
    Ok(svg)
}

/// Writes a plot of the solution to `path`, PNG or SVG by extension.
pub fn export_plot(path: &Path, solution: &RoutingSolution, instance: &ProblemInstance) -> Result<()> {
    let format = PlotFormat::from_path(path)?;
    match format {
        PlotFormat::Svg => {
            let svg = render_svg(solution, instance)?;
            std::fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
        }
        PlotFormat::Png => {
            let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
            draw_routes(&root, solution, instance, format.draws_text())
                .with_context(|| format!("plotting to {}", path.display()))?;
            root.present()
                .with_context(|| format!("writing {}", path.display()))?;
        }
    }
    info!(path = %path.display(), ?format, routes = solution.num_routes(), "plot exported");
    Ok(())
}

fn draw_routes<DB>(
    root: &DrawingArea<DB, Shift>,
    solution: &RoutingSolution,
    instance: &ProblemInstance,
    text: bool,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let depot = instance.depot();
    let nodes = || std::iter::once(depot).chain(instance.customers());
    let x_range = axis_range(nodes().map(|n| n.x()));
    let y_range = axis_range(nodes().map(|n| n.y()));

    let mut builder = ChartBuilder::on(root);
    builder.margin(20);
    if text {
        builder
            .caption("Clarke-Wright routes", ("sans-serif", 28))
            .x_label_area_size(40)
            .y_label_area_size(50);
    }
    let mut chart = builder.build_cartesian_2d(x_range, y_range)?;
    if text {
        chart.configure_mesh().x_desc("x").y_desc("y").draw()?;
    }

    for (index, route) in solution.routes().iter().enumerate() {
        let color = Palette99::pick(index).to_rgba();
        let stops = std::iter::once(depot.id())
            .chain(route.customer_ids().iter().copied())
            .chain(std::iter::once(depot.id()))
            .map(|id| {
                instance
                    .node(id)
                    .map(|n| (n.x(), n.y(), id))
                    .ok_or_else(|| anyhow!("route {index} visits unknown node {id}"))
            })
            .collect::<Result<Vec<_>>>()?;

        chart
            .draw_series(LineSeries::new(
                stops.iter().map(|&(x, y, _)| (x, y)),
                color.stroke_width(2),
            ))?
            .label(format!("Route {} (vehicle {})", index + 1, route.vehicle_id()))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        let customers = &stops[1..stops.len() - 1];
        chart.draw_series(
            customers
                .iter()
                .map(|&(x, y, _)| Circle::new((x, y), 4, color.filled())),
        )?;
        if text {
            chart.draw_series(customers.iter().map(|&(x, y, id)| {
                EmptyElement::at((x, y)) + Text::new(id.to_string(), (6, -18), LABEL_FONT)
            }))?;
        }
    }

    chart
        .draw_series(std::iter::once(
            EmptyElement::at((depot.x(), depot.y()))
                + Rectangle::new([(-8, -8), (8, 8)], RED.filled())
                + Rectangle::new([(-8, -8), (8, 8)], BLACK.stroke_width(2)),
        ))?
        .label("Depot")
        .legend(|(x, y)| Rectangle::new([(x - 5, y - 5), (x + 5, y + 5)], RED.filled()));

    if text {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}

/// Span of `values` padded by 5%, at least one unit each side.
fn axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return -1.0..1.0;
    }
    let pad = ((hi - lo) * 0.05).max(1.0);
    (lo - pad)..(hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, Route, Vehicle};

    fn setup() -> (ProblemInstance, RoutingSolution) {
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
        let sol = RoutingSolution::from_routes(vec![
            Route::from_customers(1, vec![1, 2]),
            Route::from_customers(0, vec![3, 4]),
        ]);
        (inst, sol)
    }

    fn svg_color(index: usize) -> String {
        let c = Palette99::pick(index).to_rgba();
        format!("#{:02X}{:02X}{:02X}", c.0, c.1, c.2)
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(PlotFormat::from_path(Path::new("out.png")).unwrap(), PlotFormat::Png);
        assert_eq!(PlotFormat::from_path(Path::new("OUT.SVG")).unwrap(), PlotFormat::Svg);
        assert!(PlotFormat::from_path(Path::new("routes.csv")).is_err());
        assert!(PlotFormat::from_path(Path::new("routes")).is_err());
    }

    #[test]
    fn test_svg_one_colour_per_route() {
        let (inst, sol) = setup();
        let svg = render_svg(&sol, &inst).expect("render");
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(&format!("stroke=\"{}\"", svg_color(0))));
        assert!(svg.contains(&format!("stroke=\"{}\"", svg_color(1))));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn test_svg_labels_nodes_and_depot() {
        let (inst, sol) = setup();
        let svg = render_svg(&sol, &inst).expect("render");
        let texts: Vec<&str> = svg.lines().collect();
        for id in ["1", "2", "3", "4"] {
            assert!(texts.contains(&id), "missing label {id}");
        }
        assert!(texts.contains(&"Depot"));
        assert!(texts.contains(&"Route 2 (vehicle 0)"));
        // depot fill
        assert!(svg.contains("fill=\"#FF0000\""));
    }

    #[test]
    fn test_unknown_node_rejected() {
        let (inst, _) = setup();
        let sol = RoutingSolution::from_routes(vec![Route::from_customers(0, vec![9])]);
        let err = render_svg(&sol, &inst).unwrap_err();
        assert!(err.to_string().contains("unknown node 9"));
    }

    #[test]
    fn test_export_svg_file() {
        let (inst, sol) = setup();
        let dir = std::env::temp_dir().join(format!("cw_routing_plot_{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("routes.svg");
        export_plot(&path, &sol, &inst).expect("export");
        let written = std::fs::read_to_string(&path).expect("read back");
        assert!(written.contains("<polyline"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_axis_range_padding() {
        let r = axis_range([0.0, 100.0].into_iter());
        assert_eq!(r, -5.0..105.0);
        let flat = axis_range([3.0].into_iter());
        assert_eq!(flat, 2.0..4.0);
    }
}

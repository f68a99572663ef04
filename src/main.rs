use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{arg, ArgMatches, Command};
use tracing::error;
use tracing_subscriber::EnvFilter;

use cw_routing::config::RunConfig;
use cw_routing::generate::random_instance;
use cw_routing::io::{
    export_plot, export_routes_csv, export_solution_json, load_instance, write_report,
};
use cw_routing::models::ProblemInstance;
use cw_routing::pipeline::solve;

fn solver_args(cmd: Command) -> Command {
    cmd.arg(arg!(--vehicles <N> "Number of vehicles").value_parser(clap::value_parser!(usize)))
        .arg(arg!(--capacity <C> "Customers per vehicle").value_parser(clap::value_parser!(usize)))
        .arg(arg!(-o --output <PATH> "CSV output path").value_parser(clap::value_parser!(PathBuf)))
        .arg(arg!(--json <PATH> "Also write the solution as JSON").value_parser(clap::value_parser!(PathBuf)))
        .arg(arg!(--plot <PATH> "Also plot the routes (.png or .svg)").value_parser(clap::value_parser!(PathBuf)))
        .arg(arg!(--"no-improve" "Skip 2-opt improvement"))
        .arg(arg!(--"positive-only" "Ignore pairs with non-positive savings"))
}

fn cli() -> Command {
    Command::new("cw-routing")
        .about("Clarke-Wright savings routing with 2-opt improvement")
        .arg_required_else_help(true)
        .arg(arg!(-v --verbose "Log at debug level").global(true))
        .subcommand(solver_args(
            Command::new("solve")
                .about("Solves an instance read from coordinate and distance files")
                .arg(arg!(--config <FILE> "JSON run configuration").value_parser(clap::value_parser!(PathBuf)))
                .arg(arg!(--coords <PATH> "Coordinate file, depot first").value_parser(clap::value_parser!(PathBuf)))
                .arg(arg!(--dist <PATH> "Distance table file").value_parser(clap::value_parser!(PathBuf))),
        ))
        .subcommand(solver_args(
            Command::new("random")
                .about("Solves a seeded random Euclidean instance")
                .arg(arg!(--customers <N> "Number of customers").required(true).value_parser(clap::value_parser!(usize)))
                .arg(arg!(--seed <S> "Random seed").default_value("42").value_parser(clap::value_parser!(u64))),
        ))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn apply_overrides(mut cfg: RunConfig, m: &ArgMatches) -> RunConfig {
    if let Some(v) = m.get_one::<usize>("vehicles") {
        cfg.vehicles = *v;
    }
    if let Some(c) = m.get_one::<usize>("capacity") {
        cfg.capacity = *c;
    }
    if let Some(p) = m.get_one::<PathBuf>("output") {
        cfg.output = p.clone();
    }
    if let Some(p) = m.get_one::<PathBuf>("json") {
        cfg.json_output = Some(p.clone());
    }
    if let Some(p) = m.get_one::<PathBuf>("plot") {
        cfg.plot = Some(p.clone());
    }
    if m.get_flag("no-improve") {
        cfg.improve = false;
    }
    if m.get_flag("positive-only") {
        cfg.positive_savings_only = true;
    }
    cfg
}

fn run(instance: &ProblemInstance, cfg: &RunConfig) -> Result<()> {
    let outcome = solve(instance, cfg.solve_options());
    write_report(io::stdout().lock(), &outcome.solution, instance)?;

    if !outcome.is_valid() {
        for v in &outcome.violations {
            error!(violation = ?v.kind, "invalid solution");
        }
        bail!(
            "solution has {} violation(s), refusing to export",
            outcome.violations.len()
        );
    }

    export_routes_csv(&cfg.output, &outcome.solution, instance)?;
    if let Some(path) = &cfg.json_output {
        export_solution_json(path, &outcome.solution)?;
    }
    if let Some(path) = &cfg.plot {
        export_plot(path, &outcome.solution, instance)?;
    }
    Ok(())
}

fn solve_files(m: &ArgMatches) -> Result<()> {
    let base = match m.get_one::<PathBuf>("config") {
        Some(path) => RunConfig::from_json_file(path)?,
        None => RunConfig::default(),
    };
    let mut cfg = apply_overrides(base, m);
    if let Some(p) = m.get_one::<PathBuf>("coords") {
        cfg.coords = p.clone();
    }
    if let Some(p) = m.get_one::<PathBuf>("dist") {
        cfg.distances = p.clone();
    }
    let instance = load_instance(&cfg.coords, &cfg.distances, cfg.vehicles, cfg.capacity)?;
    run(&instance, &cfg)
}

fn solve_random(m: &ArgMatches) -> Result<()> {
    let cfg = apply_overrides(RunConfig::default(), m);
    let customers = *m
        .get_one::<usize>("customers")
        .ok_or_else(|| anyhow!("--customers is required"))?;
    let seed = *m
        .get_one::<u64>("seed")
        .ok_or_else(|| anyhow!("--seed has no value"))?;
    let instance = random_instance(customers, cfg.vehicles, cfg.capacity, seed)?;
    run(&instance, &cfg)
}

fn main() {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    if let Err(e) = match matches.subcommand() {
        Some(("solve", sub_m)) => solve_files(sub_m),
        Some(("random", sub_m)) => solve_random(sub_m),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

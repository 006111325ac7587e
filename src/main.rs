mod report;
mod scenario;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use report::{render_json, render_summary};
use scenario::Scenario;

/// Solve an Euler-Bernoulli beam described by a JSON scenario.
#[derive(Debug, Parser)]
#[command(name = "beamx", version, about)]
struct Cli {
    /// Scenario file; a clamped-propped demonstration beam is solved when omitted
    scenario: Option<PathBuf>,

    /// Print the result arrays as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().filter_or("BEAMX_LOG", level)).init();

    // Read the beam description, or fall back to the built-in demonstration.
    let scenario = match &cli.scenario {
        Some(path) => Scenario::from_path(path)?,
        None => {
            info!("no scenario given, solving the demonstration beam");
            Scenario::propped_cantilever()
        }
    };
    if scenario.loads.is_empty() {
        bail!("scenario has no loads; add at least one point or distributed load");
    }

    // Discretise, restrain and solve. Instability is reported as an error.
    // See: https://en.wikipedia.org/wiki/Finite_difference_method
    let mut beam = scenario.build()?;
    beam.solve()?;
    let solution = beam
        .solution()
        .ok_or_else(|| anyhow::anyhow!("solution missing after a successful solve"))?;

    if cli.json {
        println!("{}", render_json(solution)?);
    } else {
        println!("{}", render_summary(&beam, solution));
    }

    Ok(())
}

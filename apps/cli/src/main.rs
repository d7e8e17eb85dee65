#![deny(warnings)]

//! Headless CLI: runs the daily pipeline for N days and prints KPIs.

use anyhow::{bail, Context, Result};
use society_core::{create_initial_world, WorldState};
use society_runtime::{SimConfig, Simulation};
use std::fs;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, PartialEq)]
struct Args {
    days: u32,
    seed: Option<u64>,
    config: Option<PathBuf>,
    resume: Option<PathBuf>,
    snapshot: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        let mut value = || it.next().with_context(|| format!("{arg} expects a value"));
        match arg.as_str() {
            "--days" => parsed.days = value()?.parse().context("--days")?,
            "--seed" => parsed.seed = Some(value()?.parse().context("--seed")?),
            "--config" => parsed.config = Some(value()?.into()),
            "--resume" => parsed.resume = Some(value()?.into()),
            "--snapshot" => parsed.snapshot = Some(value()?.into()),
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(parsed)
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut cfg = match &args.config {
        Some(path) => SimConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.rng_seed = seed;
    }
    Ok(cfg)
}

fn load_world(args: &Args) -> Result<WorldState> {
    match &args.resume {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading snapshot {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("decoding {}", path.display()))
        }
        None => Ok(create_initial_world()),
    }
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::DEBUG)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    info!(?args, build = env!("GIT_SHA"), "starting CLI");

    let cfg = load_config(&args)?;
    let world = load_world(&args)?;
    let sim = Simulation::from_config(&cfg)?;
    let start = world.day();
    let world = sim.run(world, args.days);

    println!(
        "World OK | companies: {} | parties: {} | segments: {} | policies: {}",
        world.companies().len(),
        world.parties().len(),
        world.citizen_segments().len(),
        world.active_policies().len()
    );
    if let Some(last) = world.history().last() {
        let leader = last
            .top_companies()
            .first()
            .map(|c| c.name.as_str())
            .unwrap_or("-");
        let government = world
            .governing_party()
            .map(|p| format!("{} {:.1}%", p.name(), p.popularity()))
            .unwrap_or_else(|| "-".into());
        println!(
            concat!(
                "KPI | days: {}..{} | revenue: ${:.0} | avg stock: ${:.2} | ",
                "satisfaction: {:.1} | events: {} | top: {} | government: {}"
            ),
            start,
            world.day(),
            last.total_revenue(),
            last.average_stock_price(),
            last.average_satisfaction(),
            last.events_count(),
            leader,
            government
        );
    }

    if let Some(path) = &args.snapshot {
        let json = serde_json::to_string_pretty(&world)?;
        fs::write(path, json).with_context(|| format!("writing snapshot {}", path.display()))?;
        info!(path = %path.display(), day = world.day(), "snapshot written");
    }

    Ok(())
}

//! detonate: run a SALVO scenario headless and print what happened.
//!
//! Usage:
//!   detonate run <scenario.json> --ticks 50
//!   detonate weapons <scenario.json>

use std::path::{Path, PathBuf};
use std::process;

use salvo_core::state::FrameReport;
use salvo_sim::scenario::{self, Scenario};
use salvo_sim::systems::snapshot::actor_views;
use tracing_subscriber::EnvFilter;

const DEFAULT_TICKS: u64 = 100;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "weapons" => cmd_weapons(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

/// Filter from `RUST_LOG`, or `info` when it is unset or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn print_usage() {
    eprintln!(
        "detonate: SALVO weapon impact simulator\n\
         \n\
         Commands:\n\
         \n\
         run       Run a scenario and print frame reports and final actors as JSON\n\
         \n\
           <scenario.json>    Scenario file (rules, map, actors, detonations)\n\
           --ticks <N>        Number of ticks to run (default: {DEFAULT_TICKS})\n\
           --quiet-frames     Omit frames with no audio or combat events\n\
         \n\
         weapons   List the weapons a scenario defines\n\
         \n\
           <scenario.json>    Scenario file\n\
         \n\
         Logging is controlled with RUST_LOG, e.g. RUST_LOG=salvo_sim=debug\n"
    );
}

fn parse_path(args: &[String]) -> Option<PathBuf> {
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--ticks" {
            i += 2;
            continue;
        }
        if !args[i].starts_with("--") {
            return Some(PathBuf::from(&args[i]));
        }
        i += 1;
    }
    None
}

fn parse_ticks(args: &[String]) -> u64 {
    for i in 0..args.len() {
        if args[i] == "--ticks" && i + 1 < args.len() {
            if let Ok(n) = args[i + 1].parse::<u64>() {
                return n;
            }
            eprintln!("Warning: invalid --ticks value '{}', using {DEFAULT_TICKS}", args[i + 1]);
        }
    }
    DEFAULT_TICKS
}

fn load_scenario(path: &Path) -> Scenario {
    let json = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            process::exit(1);
        }
    };
    match scenario::load(&json) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading scenario {}: {e}", path.display());
            process::exit(1);
        }
    }
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let path = match parse_path(args) {
        Some(p) => p,
        None => {
            eprintln!("Error: <scenario.json> is required");
            process::exit(1);
        }
    };
    let ticks = parse_ticks(args);
    let quiet = args.iter().any(|a| a == "--quiet-frames");

    let mut scenario = load_scenario(&path);
    tracing::info!("running {} for {} ticks", path.display(), ticks);

    let reports = match scenario.run(ticks) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Simulation aborted: {e}");
            process::exit(1);
        }
    };
    let frames: Vec<&FrameReport> = reports
        .iter()
        .filter(|r| !quiet || !r.audio.is_empty() || !r.combat.is_empty())
        .collect();

    let world = scenario.engine.world();
    let output = serde_json::json!({
        "frames": frames,
        "actors": actor_views(world.actors()),
        "resource_cells": world.resources().len(),
    });

    match serde_json::to_string_pretty(&output) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Error serialising output: {e}");
            process::exit(1);
        }
    }
}

// --- Weapons command ---

fn cmd_weapons(args: &[String]) {
    let path = match parse_path(args) {
        Some(p) => p,
        None => {
            eprintln!("Error: <scenario.json> is required");
            process::exit(1);
        }
    };

    let scenario = load_scenario(&path);
    for (name, weapon) in scenario.engine.world().rules().weapons() {
        let delays: Vec<i32> = weapon.warheads.iter().map(|w| w.delay).collect();
        println!(
            "{name}: {} warhead(s), delays {:?}, reports {:?}",
            weapon.warheads.len(),
            delays,
            weapon.report
        );
    }
}

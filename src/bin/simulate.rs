//! Level balance simulator CLI.
//!
//! Autoplays levels with a greedy bot to check that every goal is reachable.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                              # 100 runs of every preset
//!   cargo run --bin simulate -- -n 20 -l preset-04-patrol # 20 runs of one level
//!   cargo run --bin simulate -- --seed 42 --json          # Reproducible, JSON output

use serpent::levels::JsonLevelStore;
use serpent::simulator::{run_simulation, run_simulation_with, SimConfig};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let (config, data_dir) = parse_args(&args);
    let json = args.iter().any(|a| a == "--json");

    if !json {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              SERPENT LEVEL SIMULATOR                          ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs per level: {}", config.runs_per_level);
        println!("  Max Ticks:      {}", config.max_ticks_per_run);
        if config.level_ids.is_empty() {
            println!("  Levels:         all presets");
        } else {
            println!("  Levels:         {}", config.level_ids.join(", "));
        }
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        if let Some(dir) = &data_dir {
            println!("  Data dir:       {}", dir.display());
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = match data_dir {
        Some(dir) => run_simulation_with(&config, JsonLevelStore::new(dir)),
        None => run_simulation(&config),
    };

    if json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }
}

fn parse_args(args: &[String]) -> (SimConfig, Option<PathBuf>) {
    let mut config = SimConfig::default();
    let mut data_dir = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.runs_per_level = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--ticks" => {
                if i + 1 < args.len() {
                    config.max_ticks_per_run = args[i + 1].parse().unwrap_or(20_000);
                    i += 1;
                }
            }
            "-l" | "--level" => {
                if i + 1 < args.len() {
                    config.level_ids.push(args[i + 1].clone());
                    i += 1;
                }
            }
            "-d" | "--data-dir" => {
                if i + 1 < args.len() {
                    data_dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                config = SimConfig::quick();
            }
            _ => {}
        }
        i += 1;
    }

    (config, data_dir)
}

fn print_help() {
    println!("Serpent Level Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Runs per level (default: 100)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -t, --ticks <T>       Max ticks per run (default: 20,000)");
    println!("    -l, --level <ID>      Level id to play (repeatable; default: all presets)");
    println!("    -d, --data-dir <DIR>  Load levels from DIR instead of the built-ins");
    println!("    -v, --verbose         Print every run");
    println!("    --json                Print the report as JSON");
    println!("    --quick               Quick check (10 runs per level, 5,000 ticks)");
    println!("    -h, --help            Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                              # Default run");
    println!("    cargo run --bin simulate -- -n 20 -l preset-04-patrol # One level");
    println!("    cargo run --bin simulate -- --seed 42 --json          # Reproducible JSON");
    println!("    RUST_LOG=serpent=debug cargo run --bin simulate -- --quick -v");
}

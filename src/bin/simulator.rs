//! Headless snake agent simulator
//!
//! Plays batches of games with one or more agents and prints a comparison
//! report. Seeded runs are reproducible.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --agent NAME        Agent to run (repeatable, comma-separated or `all`)
//!   --cols N            Board width (default: 8)
//!   --rows N            Board height (default: 8)
//!   --games N           Games per agent (default: 100)
//!   --seed N            RNG seed; game i uses seed + i (default: random)
//!   --max-steps N       Move cap per game (default: 20000)
//!   --max-expansions N  BFS/A* node budget (default: 250000)
//!   --config FILE       Load settings from JSON; other flags override it
//!   --json              Print the report as JSON
//!   --verbose           One line per game
//!   --quiet             Only the final report
//!
//! Set RUST_LOG=snake_search=debug to trace agent decisions.

use snake_search::search::AgentKind;
use snake_search::simulator::{run_simulation, SimConfig};
use std::path::Path;
use std::str::FromStr;

// ── CLI Configuration ────────────────────────────────────────────────

struct CliArgs {
    config: SimConfig,
    json: bool,
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    args.get(i)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| fail(&format!("{flag} requires a number")))
}

/// Settings from `--config FILE` (the last one wins), before any other flag
/// is applied on top.
fn base_config(args: &[String]) -> SimConfig {
    let Some(pos) = args.iter().rposition(|a| a == "--config") else {
        return SimConfig::default();
    };
    let path = args
        .get(pos + 1)
        .unwrap_or_else(|| fail("--config requires a file"));
    SimConfig::load(Path::new(path)).unwrap_or_else(|e| fail(&e.to_string()))
}

fn parse_args(args: &[String]) -> CliArgs {
    let mut config = base_config(args);
    let mut json = false;
    let mut explicit_agents: Vec<AgentKind> = Vec::new();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--agent" => {
                i += 1;
                let list = args
                    .get(i)
                    .unwrap_or_else(|| fail("--agent requires a name"));
                match SimConfig::parse_agents(list) {
                    Ok(kinds) => explicit_agents.extend(kinds),
                    Err(e) => fail(&e.to_string()),
                }
            }
            "--cols" => {
                i += 1;
                config.cols = value(args, i, "--cols");
            }
            "--rows" => {
                i += 1;
                config.rows = value(args, i, "--rows");
            }
            "--games" => {
                i += 1;
                config.games = value(args, i, "--games");
            }
            "--seed" => {
                i += 1;
                config.seed = Some(value(args, i, "--seed"));
            }
            "--max-steps" => {
                i += 1;
                config.max_steps_per_game = value(args, i, "--max-steps");
            }
            "--max-expansions" => {
                i += 1;
                config.planner.max_expansions = value(args, i, "--max-expansions");
            }
            // loaded up front by base_config
            "--config" => i += 1,
            "--json" => json = true,
            "--verbose" => config.verbosity = 2,
            "--quiet" => config.verbosity = 0,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if !explicit_agents.is_empty() {
        explicit_agents.dedup();
        config.agents = explicit_agents;
    }
    if let Err(e) = config.validate() {
        fail(&e.to_string());
    }
    CliArgs { config, json }
}

fn print_usage() {
    eprintln!(
        "Snake Agent Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --agent NAME        manhattan, greedy, bfs, astar, forward-check or all\n\
         \x20 --cols N            Board width (default: 8)\n\
         \x20 --rows N            Board height (default: 8)\n\
         \x20 --games N           Games per agent (default: 100)\n\
         \x20 --seed N            RNG seed (default: random)\n\
         \x20 --max-steps N       Move cap per game (default: 20000)\n\
         \x20 --max-expansions N  BFS/A* node budget (default: 250000)\n\
         \x20 --config FILE       Load settings from a JSON file (flags override it)\n\
         \x20 --json              Print the report as JSON\n\
         \x20 --verbose           One line per game\n\
         \x20 --quiet             Only the final report\n\
         \x20 --help, -h          Show this help"
    );
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();
    let CliArgs { config, json } = parse_args(&args);

    if config.verbosity >= 1 {
        let agents: Vec<&str> = config.agents.iter().map(|a| a.name()).collect();
        eprintln!(
            "Snake Simulator: {} game(s) x [{}] on {}x{}, seed={}",
            config.games,
            agents.join(", "),
            config.cols,
            config.rows,
            config
                .seed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "random".to_string()),
        );
    }

    let report = run_simulation(&config);

    if json {
        println!("{}", report.to_json());
    } else {
        print!("{}", report.to_text());
    }
}

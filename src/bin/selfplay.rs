//! Self-play game generation CLI.
//!
//! Plays engine-versus-engine games and outputs one JSON record per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N             Number of games to play (default: 10)
//!   --white POLICY        White's policy: random, greedy, centre, alphabeta
//!   --black POLICY        Black's policy (default for both: alphabeta)
//!   --depth N             Search depth for both sides (default: 3)
//!   --white-config FILE   JSON engine config for White
//!   --black-config FILE   JSON engine config for Black
//!   --max-turns N         Moving-phase turn limit (default: 256)
//!   --threads N           Number of parallel threads (default: 4)
//!   --seed N              Random seed, 0 for entropy (default: 0)
//!   --output FILE         Output file path (default: stdout)
//!   --quiet               Suppress progress and summary output

use std::env;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use flanker::engine::EngineConfig;
use flanker::selfplay::{self, SelfPlayConfig};

fn parse_value<T>(flag: &str, value: Option<&String>) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let Some(value) = value else {
        eprintln!("missing value for {}", flag);
        process::exit(2);
    };
    value.parse().unwrap_or_else(|e| {
        eprintln!("invalid {} value '{}': {}", flag, value, e);
        process::exit(2);
    })
}

fn load_config(flag: &str, value: Option<&String>) -> EngineConfig {
    let path: String = parse_value(flag, value);
    EngineConfig::load(&path).unwrap_or_else(|e| {
        eprintln!("{}: {}", path, e);
        process::exit(2);
    })
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;
    let mut depth: Option<u32> = None;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args.get(i + 1);
        match flag {
            "--games" => config.num_games = parse_value(flag, value),
            "--white" => config.white.policy = parse_value(flag, value),
            "--black" => config.black.policy = parse_value(flag, value),
            "--depth" => depth = Some(parse_value(flag, value)),
            "--white-config" => config.white = load_config(flag, value),
            "--black-config" => config.black = load_config(flag, value),
            "--max-turns" => config.max_moving_turns = parse_value(flag, value),
            "--threads" => config.threads = parse_value(flag, value),
            "--seed" => config.seed = parse_value(flag, value),
            "--output" => output_path = Some(parse_value(flag, value)),
            "--quiet" => {
                config.quiet = true;
                i += 1;
                continue;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 2;
    }

    if let Some(d) = depth {
        config.white.depth = d;
        config.black.depth = d;
    }

    if !config.quiet {
        eprintln!(
            "Self-play: {} games, {} vs {}, depth {}/{}, {} threads",
            config.num_games,
            config.white.policy,
            config.black.policy,
            config.white.depth,
            config.black.depth,
            config.threads
        );
    }

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(games) => games,
        Err(e) => {
            eprintln!("failed to start worker threads: {}", e);
            process::exit(1);
        }
    };

    if !config.quiet {
        eprintln!(
            "Completed {} games in {:.1}s",
            games.len(),
            start.elapsed().as_secs_f64()
        );
        selfplay::print_summary(&games);
    }

    let written = match &output_path {
        Some(path) => File::create(path)
            .and_then(|file| selfplay::write_jsonl(&games, &mut BufWriter::new(file))),
        None => {
            let stdout = io::stdout();
            selfplay::write_jsonl(&games, &mut BufWriter::new(stdout.lock()))
        }
    };
    if let Err(e) = written {
        eprintln!("failed to write output: {}", e);
        process::exit(1);
    }
    if let (Some(path), false) = (&output_path, config.quiet) {
        eprintln!("Wrote {} games to {}", games.len(), path);
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N            Number of games to play (default: 10)");
    eprintln!("  --white POLICY       White's policy: random, greedy, centre, alphabeta");
    eprintln!("  --black POLICY       Black's policy (default for both: alphabeta)");
    eprintln!("  --depth N            Search depth for both sides (default: 3)");
    eprintln!("  --white-config FILE  JSON engine config for White");
    eprintln!("  --black-config FILE  JSON engine config for Black");
    eprintln!("  --max-turns N        Moving-phase turn limit (default: 256)");
    eprintln!("  --threads N          Number of parallel threads (default: 4)");
    eprintln!("  --seed N             Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE        Output file path (default: stdout)");
    eprintln!("  --quiet              Suppress progress and summary output");
    eprintln!("  --help               Show this help");
}

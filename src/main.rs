//! flanker -- a Watch Your Back! player speaking a line-oriented referee protocol.
//!
//! Reads commands from stdin and writes responses to stdout. Diagnostics go
//! to stderr through `env_logger` (set `RUST_LOG` to see them).
//!
//! Usage: `flanker [--config FILE]`

use std::env;
use std::io::{self, BufRead, Write};
use std::process;

use log::debug;

use flanker::board::Color;
use flanker::engine::{Engine, EngineConfig};
use flanker::protocol::{parse_command, ActionNotation, Command};

fn load_config() -> EngineConfig {
    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        None => EngineConfig::default(),
        Some("--config") => {
            let Some(path) = args.get(2) else {
                eprintln!("usage: flanker [--config FILE]");
                process::exit(2);
            };
            EngineConfig::load(path).unwrap_or_else(|e| {
                eprintln!("{}: {}", path, e);
                process::exit(2);
            })
        }
        Some(other) => {
            eprintln!("unknown argument: {}", other);
            eprintln!("usage: flanker [--config FILE]");
            process::exit(2);
        }
    }
}

/// Handles one command. Returns `Ok(false)` when the session should end.
fn dispatch<W: Write>(
    cmd: Command,
    engine: &mut Engine,
    config: &EngineConfig,
    out: &mut W,
) -> io::Result<bool> {
    match cmd {
        Command::Init { color } => {
            *engine = Engine::new(color, config.clone());
        }
        Command::IsReady => writeln!(out, "readyok")?,
        Command::SetOption { name, value } => {
            if let Err(e) = engine.set_option(&name, value.as_deref()) {
                writeln!(out, "error {}", e)?;
            }
        }
        Command::Position { layout } => {
            if let Err(e) = engine.set_position(&layout) {
                writeln!(out, "error {}", e)?;
            }
        }
        Command::Action { turns } => {
            let action = engine.action(turns, out);
            writeln!(out, "action {}", ActionNotation::from(action))?;
        }
        Command::Update { action } => {
            if let Err(e) = engine.update(action) {
                writeln!(out, "error {}", e)?;
            }
        }
        Command::Board => write!(out, "{}", engine.board())?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn main() -> io::Result<()> {
    env_logger::init();

    let config = load_config();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new(Color::White, config.clone());

    for line in stdin.lock().lines() {
        let line = line?;
        let cmd = match parse_command(&line) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error {}", e)?;
                out.flush()?;
                continue;
            }
        };
        debug!("command: {:?}", cmd);

        let keep_going = dispatch(cmd, &mut engine, &config, &mut out)?;
        out.flush()?;
        if !keep_going {
            break;
        }
    }
    Ok(())
}

//! Engine-versus-engine self-play.
//!
//! Acts as the referee between two engines: White opens both phases, the
//! players alternate, the referee's own board is advanced alongside and
//! shrunk on schedule, and the game ends when a side is eliminated or the
//! moving-phase turn limit is reached. Games are recorded as JSON lines.

use std::io::{self, Write};
use std::time::Instant;

use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::board::{BoardState, Color, Outcome, ALL_COLORS};
use crate::engine::{Engine, EngineConfig};
use crate::phase::{GameClock, Phase};
use crate::protocol::{encode_layout, ActionNotation};
use crate::strategy::Policy;

/// Configuration for a batch of self-play games.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    pub num_games: usize,
    pub white: EngineConfig,
    pub black: EngineConfig,
    /// Moving-phase turns after which an undecided game is stopped.
    pub max_moving_turns: u32,
    /// Worker threads; games run in parallel when this is above 1.
    pub threads: usize,
    /// Base seed for per-game engine seeds; 0 keeps each engine's own seed.
    pub seed: u64,
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            white: EngineConfig::default(),
            black: EngineConfig::default(),
            max_moving_turns: 256,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// Why a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEnd {
    /// One or both sides dropped below two pieces.
    Elimination,
    TurnLimit,
    /// An engine rejected its opponent's action.
    Aborted,
}

/// One played turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnRecord {
    pub color: Color,
    pub action: String,
    pub captured: usize,
}

/// A complete self-play game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub white_policy: Policy,
    pub black_policy: Policy,
    /// `None` for draws and unfinished games.
    pub winner: Option<Color>,
    pub end: GameEnd,
    pub moving_turns: u32,
    /// Remaining pieces, White then Black.
    pub final_counts: [usize; 2],
    pub final_layout: String,
    pub turns: Vec<TurnRecord>,
}

/// The engine config for `color` in game `game_id`, with a derived seed.
fn game_engine_config(config: &SelfPlayConfig, color: Color, game_id: usize) -> EngineConfig {
    let mut engine = match color {
        Color::White => config.white.clone(),
        Color::Black => config.black.clone(),
    };
    if config.seed != 0 {
        engine.seed = config
            .seed
            .wrapping_add(game_id as u64 * 2 + color.index() as u64)
            .max(1);
    }
    engine
}

/// Plays one game to completion.
pub fn play_game(config: &SelfPlayConfig, game_id: usize) -> GameRecord {
    let mut white = Engine::new(Color::White, game_engine_config(config, Color::White, game_id));
    let mut black = Engine::new(Color::Black, game_engine_config(config, Color::Black, game_id));
    let mut board = BoardState::new();
    let mut clock = GameClock::new();
    let mut turns = Vec::new();
    let mut out = io::sink();
    let mut to_move = Color::White;

    let end = loop {
        if clock.phase == Phase::Moving {
            if board.outcome().is_some() {
                break GameEnd::Elimination;
            }
            if clock.turns >= config.max_moving_turns {
                break GameEnd::TurnLimit;
            }
        }

        let (mover, other) = match to_move {
            Color::White => (&mut white, &mut black),
            Color::Black => (&mut black, &mut white),
        };
        let action = mover.action(clock.turns, &mut out);
        let notation = ActionNotation::from(action);
        if let Err(e) = other.update(notation) {
            warn!("game {}: {} rejected {}: {}", game_id, other.color(), notation, e);
            break GameEnd::Aborted;
        }

        let captured = action.map_or(0, |a| board.modify(&a, to_move).len());
        let (next, shrink) = clock.advance(to_move);
        clock = next;
        if let Some(shrink) = shrink {
            shrink.apply(&mut board);
        }

        turns.push(TurnRecord {
            color: to_move,
            action: notation.to_string(),
            captured,
        });
        to_move = to_move.opponent();
    };

    let winner = match board.outcome() {
        Some(Outcome::Winner(c)) if end == GameEnd::Elimination => Some(c),
        _ => None,
    };

    GameRecord {
        game_id,
        white_policy: config.white.policy,
        black_policy: config.black.policy,
        winner,
        end,
        moving_turns: if clock.phase == Phase::Moving { clock.turns } else { 0 },
        final_counts: [board.count(Color::White), board.count(Color::Black)],
        final_layout: encode_layout(&board),
        turns,
    }
}

fn describe(game: &GameRecord) -> String {
    match (game.end, game.winner) {
        (GameEnd::Elimination, Some(c)) => format!("{} wins", c),
        (GameEnd::Elimination, None) => "draw".to_string(),
        (GameEnd::TurnLimit, _) => "turn limit".to_string(),
        (GameEnd::Aborted, _) => "aborted".to_string(),
    }
}

fn play_logged(config: &SelfPlayConfig, game_id: usize) -> GameRecord {
    let start = Instant::now();
    let game = play_game(config, game_id);
    if !config.quiet {
        info!(
            "game {}/{}: {} after {} moving turns ({:.1}s)",
            game_id + 1,
            config.num_games,
            describe(&game),
            game.moving_turns,
            start.elapsed().as_secs_f64()
        );
    }
    game
}

/// Plays `config.num_games` games, in parallel when `config.threads > 1`.
///
/// Records come back ordered by game id either way.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, rayon::ThreadPoolBuildError> {
    if config.threads <= 1 {
        return Ok((0..config.num_games).map(|i| play_logged(config, i)).collect());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    Ok(pool.install(|| {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| play_logged(config, i))
            .collect()
    }))
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints aggregate results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let total = games.len();
    let mut wins = [0usize; 2];
    let mut draws = 0usize;
    let mut limits = 0usize;
    let mut aborted = 0usize;
    let mut moving_turns = 0u64;

    for game in games {
        moving_turns += game.moving_turns as u64;
        match (game.end, game.winner) {
            (GameEnd::Elimination, Some(c)) => wins[c.index()] += 1,
            (GameEnd::Elimination, None) => draws += 1,
            (GameEnd::TurnLimit, _) => limits += 1,
            (GameEnd::Aborted, _) => aborted += 1,
        }
    }

    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", total);
    eprintln!(
        "Avg moving turns/game: {:.1}",
        moving_turns as f64 / total.max(1) as f64
    );
    for color in ALL_COLORS {
        let n = wins[color.index()];
        eprintln!(
            "  {:>5}: {} ({:.1}%)",
            color,
            n,
            100.0 * n as f64 / total.max(1) as f64
        );
    }
    eprintln!("Draws: {}", draws);
    eprintln!("Turn limit: {}", limits);
    if aborted > 0 {
        eprintln!("Aborted: {}", aborted);
    }
}

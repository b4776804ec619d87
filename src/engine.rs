//! Engine state management.
//!
//! Holds one player's view of the game: its colour, the board, the clock
//! and the engine options. `action` chooses and plays this player's turn;
//! `update` applies the opponent's. Both paths advance the clock and fire
//! the scheduled board shrinks.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::{Action, BoardState, Color, InvalidMove};
use crate::eval::{EvalWeights, Heuristic};
use crate::phase::{GameClock, Phase, SHRINK_TURNS};
use crate::protocol::{parse_layout, ActionNotation, LayoutError};
use crate::search::{alphabeta_cutoff_search, SearchLimits, SearchNode};
use crate::strategy::{
    centralizing_move, greedy_capture_move, random_move, random_placement, Decision, Policy,
};

/// Default look-ahead in plies.
const DEFAULT_DEPTH: u32 = 3;

/// Engine options, loadable from a JSON file. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub policy: Policy,
    pub depth: u32,
    /// Per-move search budget in milliseconds; `None` searches to full depth.
    pub movetime_ms: Option<u64>,
    /// RNG seed; 0 draws from entropy.
    pub seed: u64,
    pub weights: EvalWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            policy: Policy::AlphaBeta,
            depth: DEFAULT_DEPTH,
            movetime_ms: None,
            seed: 0,
            weights: EvalWeights::default(),
        }
    }
}

/// Errors from reading an engine config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn limits(&self) -> SearchLimits {
        SearchLimits {
            depth: self.depth,
            movetime: self.movetime_ms.map(Duration::from_millis),
        }
    }
}

/// Errors reported back to the referee.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("illegal action: {0}")]
    InvalidMove(#[from] InvalidMove),

    #[error("{action} is not a {phase} phase action")]
    WrongPhase { phase: Phase, action: ActionNotation },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("unknown option: '{0}'")]
    UnknownOption(String),

    #[error("invalid value for {name}: '{value}'")]
    InvalidOption { name: String, value: String },
}

/// One player's engine.
pub struct Engine {
    color: Color,
    board: BoardState,
    clock: GameClock,
    config: EngineConfig,
    rng: SmallRng,
}

fn seeded_rng(seed: u64) -> SmallRng {
    if seed == 0 {
        SmallRng::from_entropy()
    } else {
        SmallRng::seed_from_u64(seed)
    }
}

impl Engine {
    /// Creates an engine for `color` at the start of a game.
    pub fn new(color: Color, config: EngineConfig) -> Self {
        info!("{} engine ready ({} depth {})", color, config.policy, config.depth);
        Engine {
            color,
            board: BoardState::new(),
            clock: GameClock::new(),
            rng: seeded_rng(config.seed),
            config,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn clock(&self) -> GameClock {
        self.clock
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Chooses, applies and returns this player's action. `None` is a forfeit.
    ///
    /// `turns` is the referee's count of turns completed in the current
    /// phase. Search progress is written to `out`.
    pub fn action<W: Write>(&mut self, turns: u32, out: &mut W) -> Option<Action> {
        self.clock = self.clock.synced(turns);

        let action = match self.clock.phase {
            Phase::Placing => random_placement(&self.board, self.color, &mut self.rng).map(Action::Place),
            Phase::Moving => self.choose_move(out).into_move().map(Action::Move),
        };

        match action {
            Some(a) => {
                let jump = matches!(a, Action::Move(mv) if mv.is_jump());
                let captured = self.board.modify(&a, self.color);
                debug!(
                    "{} plays {}{} (captured {})",
                    self.color,
                    ActionNotation::from(a),
                    if jump { " jumping" } else { "" },
                    captured.len()
                );
            }
            None => debug!("{} forfeits", self.color),
        }
        self.finish_turn(self.color);
        action
    }

    fn choose_move<W: Write>(&mut self, out: &mut W) -> Decision {
        match self.config.policy {
            Policy::Random => random_move(&self.board, self.color, &mut self.rng),
            Policy::GreedyCapture => greedy_capture_move(&self.board, self.color, &mut self.rng),
            Policy::Centralize => match centralizing_move(&self.board, self.color) {
                Some(mv) => Decision::Move(mv),
                None => random_move(&self.board, self.color, &mut self.rng),
            },
            Policy::AlphaBeta => {
                let node = SearchNode::new(self.board.clone(), self.color);
                let heuristic = Heuristic::new(self.config.weights);
                let result = alphabeta_cutoff_search(&node, &self.config.limits(), &heuristic, out);
                Decision::from(result.best)
            }
        }
    }

    /// Validates and applies the opponent's action.
    ///
    /// On error nothing changes: the board and clock stay as they were.
    pub fn update(&mut self, notation: ActionNotation) -> Result<(), EngineError> {
        let opponent = self.color.opponent();
        let action = self.validate(opponent, notation).map_err(|e| {
            warn!("rejected {} action {}: {}", opponent, notation, e);
            e
        })?;
        if let Some(a) = action {
            self.board.modify(&a, opponent);
        }
        self.finish_turn(opponent);
        Ok(())
    }

    fn validate(&self, color: Color, notation: ActionNotation) -> Result<Option<Action>, EngineError> {
        let action = match (self.clock.phase, notation) {
            (_, ActionNotation::Forfeit) => None,
            (Phase::Placing, ActionNotation::Place(at)) => Some(Action::place(&self.board, color, at)?),
            (Phase::Moving, ActionNotation::Move(from, to)) => {
                Some(Action::movement(&self.board, color, from, to)?)
            }
            (phase, action) => return Err(EngineError::WrongPhase { phase, action }),
        };
        Ok(action)
    }

    fn finish_turn(&mut self, mover: Color) {
        let (clock, shrink) = self.clock.advance(mover);
        self.clock = clock;
        if let Some(eliminated) = shrink.and_then(|s| s.apply(&mut self.board)) {
            debug!("shrink eliminated {:?}", eliminated);
        }
    }

    /// Replaces the board with a layout and puts the clock in the moving
    /// phase just after the shrinks the layout shows.
    pub fn set_position(&mut self, layout: &str) -> Result<(), EngineError> {
        let board = parse_layout(layout)?;
        let turns = match board.shrinks() {
            0 => 0,
            1 => SHRINK_TURNS[0] + 1,
            _ => SHRINK_TURNS[1] + 1,
        };
        self.board = board;
        self.clock = GameClock::moving(turns);
        Ok(())
    }

    /// Sets an engine option: `Strategy`, `Depth`, `MoveTime` (ms, 0 = none) or `Seed`.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), EngineError> {
        let raw = value.unwrap_or("").trim();
        let invalid = || EngineError::InvalidOption {
            name: name.to_string(),
            value: raw.to_string(),
        };
        match name.to_ascii_lowercase().as_str() {
            "strategy" => self.config.policy = raw.parse().map_err(|_| invalid())?,
            "depth" => self.config.depth = raw.parse().map_err(|_| invalid())?,
            "movetime" => {
                let ms: u64 = raw.parse().map_err(|_| invalid())?;
                self.config.movetime_ms = (ms > 0).then_some(ms);
            }
            "seed" => {
                self.config.seed = raw.parse().map_err(|_| invalid())?;
                self.rng = seeded_rng(self.config.seed);
            }
            _ => return Err(EngineError::UnknownOption(name.to_string())),
        }
        debug!("option {} = {}", name, raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Coord};
    use crate::phase::PIECE_QUOTA;
    use std::io::sink;

    const TWO_A_SIDE: &str = "X------X/--------/--------/--O@----/---O@---/--------/--------/X------X";

    fn config(policy: Policy) -> EngineConfig {
        EngineConfig {
            policy,
            depth: 2,
            seed: 7,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let cfg: EngineConfig = serde_json::from_str(r#"{"policy": "greedy", "depth": 5}"#).unwrap();
        assert_eq!(cfg.policy, Policy::GreedyCapture);
        assert_eq!(cfg.depth, 5);
        assert_eq!(cfg.movetime_ms, None);
        assert_eq!(cfg.weights, EvalWeights::default());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = EngineConfig::load("/nonexistent/flanker.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn placing_actions_stay_in_zone() {
        let mut white = Engine::new(Color::White, config(Policy::Random));
        let mut black = Engine::new(Color::Black, config(Policy::Random));
        for turn in 0..PIECE_QUOTA as u32 {
            let w = white.action(turn * 2, &mut sink()).unwrap();
            assert!(matches!(w, Action::Place(at) if at.row <= 5));
            black.update(ActionNotation::from(w)).unwrap();

            let b = black.action(turn * 2 + 1, &mut sink()).unwrap();
            assert!(matches!(b, Action::Place(at) if at.row >= 2));
            white.update(ActionNotation::from(b)).unwrap();
        }
        assert_eq!(white.board(), black.board());
        assert_eq!(white.clock().phase, Phase::Moving);
        assert_eq!(black.clock().phase, Phase::Moving);
    }

    #[test]
    fn update_rejects_illegal_move_without_change() {
        let mut engine = Engine::new(Color::White, config(Policy::AlphaBeta));
        engine.set_position(TWO_A_SIDE).unwrap();
        let before = engine.board().clone();
        let clock = engine.clock();

        // (2,3) holds a White piece, not a Black one.
        let err = engine
            .update(ActionNotation::Move(Coord::new(2, 3), Coord::new(2, 2)))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidMove(InvalidMove::NotOwned { .. })));
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.clock(), clock);
    }

    #[test]
    fn update_rejects_wrong_phase() {
        let mut engine = Engine::new(Color::White, config(Policy::Random));
        let err = engine
            .update(ActionNotation::Move(Coord::new(3, 3), Coord::new(3, 4)))
            .unwrap_err();
        assert!(matches!(err, EngineError::WrongPhase { phase: Phase::Placing, .. }));
    }

    #[test]
    fn update_applies_captures() {
        let mut engine = Engine::new(Color::Black, config(Policy::Random));
        engine
            .set_position("X------X/--------/--------/---@O---/--O-----/------@-/--------/X------X")
            .unwrap();
        engine
            .update(ActionNotation::Move(Coord::new(2, 4), Coord::new(2, 3)))
            .unwrap();
        assert_eq!(engine.board().output_piece(3, 3), Some(Cell::Empty));
        assert_eq!(engine.clock().turns, 1);
    }

    #[test]
    fn forfeit_still_advances_the_clock() {
        let mut engine = Engine::new(Color::White, config(Policy::Random));
        engine.set_position(TWO_A_SIDE).unwrap();
        engine.update(ActionNotation::Forfeit).unwrap();
        assert_eq!(engine.clock().turns, 1);
    }

    #[test]
    fn shrink_fires_at_turn_127() {
        let mut engine = Engine::new(Color::White, config(Policy::Centralize));
        engine.set_position(TWO_A_SIDE).unwrap();
        engine.action(127, &mut sink());
        assert_eq!(engine.board().shrinks(), 1);
        assert_eq!(engine.clock().turns, 128);
        engine.update(ActionNotation::Forfeit).unwrap();
        assert_eq!(engine.board().shrinks(), 1);
    }

    #[test]
    fn repeated_shrink_turn_does_not_shrink_again() {
        let mut engine = Engine::new(Color::White, config(Policy::Centralize));
        engine.set_position(TWO_A_SIDE).unwrap();
        engine.action(127, &mut sink());
        engine.action(127, &mut sink());
        assert_eq!(engine.board().shrinks(), 1);
    }

    #[test]
    fn loaded_shrunk_position_keeps_its_rings() {
        let once = "########/#X----X#/#------#/#-O@---#/#--O@--#/#------#/#X----X#/########";
        let mut engine = Engine::new(Color::White, config(Policy::Centralize));
        engine.set_position(once).unwrap();
        engine.action(127, &mut sink());
        assert_eq!(engine.board().shrinks(), 1);

        let twice = "########/########/##X--X##/##O@--##/##-O@-##/##X--X##/########/########";
        let mut engine = Engine::new(Color::White, config(Policy::Centralize));
        engine.set_position(twice).unwrap();
        engine.action(191, &mut sink());
        assert_eq!(engine.board().shrinks(), 2);
        engine.update(ActionNotation::Forfeit).unwrap();
        engine.action(191, &mut sink());
        assert_eq!(engine.board().shrinks(), 2);
    }

    #[test]
    fn alphabeta_action_is_legal_and_reports() {
        let mut engine = Engine::new(Color::White, config(Policy::AlphaBeta));
        engine.set_position(TWO_A_SIDE).unwrap();
        let before = engine.board().clone();
        let mut out = Vec::new();
        let action = engine.action(0, &mut out).unwrap();
        let Action::Move(mv) = action else {
            panic!("expected a move, got {:?}", action);
        };
        assert_eq!(before.cell(mv.from()), Some(Cell::Piece(Color::White)));
        assert!(String::from_utf8(out).unwrap().starts_with("info depth 2"));
    }

    #[test]
    fn same_seed_same_game() {
        let play = || {
            let mut engine = Engine::new(Color::White, config(Policy::Random));
            (0..PIECE_QUOTA as u32)
                .map(|t| engine.action(t * 2, &mut sink()))
                .collect::<Vec<_>>()
        };
        assert_eq!(play(), play());
    }

    #[test]
    fn set_option_updates_config() {
        let mut engine = Engine::new(Color::Black, EngineConfig::default());
        engine.set_option("Strategy", Some("greedy")).unwrap();
        engine.set_option("Depth", Some("4")).unwrap();
        engine.set_option("MoveTime", Some("250")).unwrap();
        assert_eq!(engine.config().policy, Policy::GreedyCapture);
        assert_eq!(engine.config().depth, 4);
        assert_eq!(engine.config().movetime_ms, Some(250));
        engine.set_option("MoveTime", Some("0")).unwrap();
        assert_eq!(engine.config().movetime_ms, None);

        assert!(matches!(
            engine.set_option("Depth", Some("deep")),
            Err(EngineError::InvalidOption { .. })
        ));
        assert!(matches!(
            engine.set_option("Threads", Some("4")),
            Err(EngineError::UnknownOption(_))
        ));
    }

    #[test]
    fn set_position_rejects_bad_layout() {
        let mut engine = Engine::new(Color::White, EngineConfig::default());
        assert!(matches!(
            engine.set_position("garbage"),
            Err(EngineError::Layout(LayoutError::WrongRowCount(1)))
        ));
        assert_eq!(engine.board(), &BoardState::new());
    }
}

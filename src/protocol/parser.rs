//! Referee command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the engine main loop can dispatch on.

use crate::board::Color;

use super::notation::{parse_action, ActionNotation, NotationError};

/// Errors for lines that name a known command but carry bad arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: '{0}'")]
    Unknown(String),

    #[error("malformed {command}: expected '{usage}'")]
    Usage {
        command: &'static str,
        usage: &'static str,
    },

    #[error("unknown colour: '{0}'")]
    UnknownColor(String),

    #[error("invalid turn count: '{0}'")]
    InvalidTurns(String),

    #[error(transparent)]
    Notation(#[from] NotationError),
}

/// A parsed referee-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a new game playing `color`.
    Init { color: Color },

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Replace the board with a layout string.
    Position { layout: String },

    /// Choose and play an action; `turns` is the referee's turn count.
    Action { turns: u32 },

    /// Apply the opponent's last action.
    Update { action: ActionNotation },

    /// Print the current board.
    Board,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let trimmed = line.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let Some(&head) = tokens.first() else {
        return Ok(None);
    };

    let cmd = match head {
        "isready" => Command::IsReady,
        "quit" => Command::Quit,
        "board" => Command::Board,

        "init" => parse_init(&tokens)?,
        "setoption" => parse_setoption(&tokens)?,
        "position" => parse_position(&tokens)?,
        "action" => parse_action_request(&tokens)?,
        "update" => parse_update(trimmed)?,

        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(cmd))
}

/// Parses `init <white|black>`.
fn parse_init(tokens: &[&str]) -> Result<Command, CommandError> {
    let arg = tokens.get(1).ok_or(CommandError::Usage {
        command: "init",
        usage: "init <white|black>",
    })?;
    let color = arg
        .parse::<Color>()
        .map_err(|_| CommandError::UnknownColor(arg.to_string()))?;
    Ok(Command::Init { color })
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Result<Command, CommandError> {
    const USAGE: CommandError = CommandError::Usage {
        command: "setoption",
        usage: "setoption name <id> [value <x>]",
    };
    if tokens.len() < 3 || tokens[1] != "name" {
        return Err(USAGE);
    }

    let (name, value) = match tokens.iter().position(|&t| t == "value") {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                return Err(USAGE);
            }
            let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Ok(Command::SetOption { name, value })
}

/// Parses `position <layout>`.
fn parse_position(tokens: &[&str]) -> Result<Command, CommandError> {
    match tokens.get(1) {
        Some(layout) => Ok(Command::Position {
            layout: layout.to_string(),
        }),
        None => Err(CommandError::Usage {
            command: "position",
            usage: "position <layout>",
        }),
    }
}

/// Parses `action <turns>`.
fn parse_action_request(tokens: &[&str]) -> Result<Command, CommandError> {
    let arg = tokens.get(1).ok_or(CommandError::Usage {
        command: "action",
        usage: "action <turns>",
    })?;
    let turns = arg
        .parse::<u32>()
        .map_err(|_| CommandError::InvalidTurns(arg.to_string()))?;
    Ok(Command::Action { turns })
}

/// Parses `update <notation>`; the notation may contain spaces.
fn parse_update(line: &str) -> Result<Command, CommandError> {
    let rest = line.strip_prefix("update").unwrap_or("").trim();
    if rest.is_empty() {
        return Err(CommandError::Usage {
            command: "update",
            usage: "update <action>",
        });
    }
    let action = parse_action(rest)?;
    Ok(Command::Update { action })
}

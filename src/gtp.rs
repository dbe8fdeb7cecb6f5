//! Go Text Protocol (GTP) front end.
//!
//! A line-oriented command loop over [`GameState`], usable from Go GUIs or by
//! hand. The session keeps every snapshot it has produced, so `undo` simply
//! drops the newest one.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - Start a new game on a board of the given size
//! - `clear_board` - Start a new game on the current board size
//! - `play <color> <vertex|pass>` - Play a move
//! - `genmove <color>` - Play a random legal move and print it
//! - `undo` - Return to the previous position
//! - `showboard` - Print the board
//! - `is_game_over` - `true` after two consecutive passes
//!
//! Moves are still accepted once the game is over.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::constants::MAX_VERTEX_BOARD_SIZE;
use crate::game::GameState;
use crate::playout::random_move;
use crate::position::{Move, Player, format_vertex, parse_move};

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "genmove",
    "is_game_over",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "undo",
    "version",
];

/// GTP session state.
pub struct GtpEngine {
    /// Every position of the current game, oldest first. Never empty.
    history: Vec<GameState>,
    rng: fastrand::Rng,
}

impl GtpEngine {
    /// Create a session on an empty board of `board_size`.
    pub fn new(board_size: usize, rng: fastrand::Rng) -> anyhow::Result<Self> {
        anyhow::ensure!(
            board_size <= MAX_VERTEX_BOARD_SIZE,
            "GTP supports boards up to {MAX_VERTEX_BOARD_SIZE}x{MAX_VERTEX_BOARD_SIZE} (got {board_size})"
        );
        let state = GameState::new(board_size)?;
        Ok(Self {
            history: vec![state],
            rng,
        })
    }

    /// The current position.
    pub fn state(&self) -> &GameState {
        // `history` always holds at least the starting position.
        &self.history[self.history.len() - 1]
    }

    /// Run the command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over arbitrary input and output.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<usize>() {
                    Ok(size) if (1..=MAX_VERTEX_BOARD_SIZE).contains(&size) => {
                        self.reset(size);
                        (true, String::new())
                    }
                    _ => (false, "unacceptable size".to_string()),
                }
            }

            "clear_board" => {
                self.reset(self.state().board_size());
                (true, String::new())
            }

            "play" => {
                let [color, vertex, ..] = args else {
                    return (false, "missing arguments".to_string());
                };
                let mv = match color
                    .parse::<Player>()
                    .and_then(|player| parse_move(player, vertex, self.state().board_size()))
                {
                    Ok(mv) => mv,
                    Err(err) => return (false, format!("syntax error: {err}")),
                };
                self.play(mv)
            }

            "genmove" => {
                let player = match args.first().map(|c| c.parse::<Player>()) {
                    Some(Ok(player)) => player,
                    Some(Err(err)) => return (false, format!("syntax error: {err}")),
                    None => return (false, "missing argument".to_string()),
                };
                if player != self.state().current_player() {
                    return (false, "illegal move: out of turn".to_string());
                }
                let size = self.state().board_size();
                let state = &self.history[self.history.len() - 1];
                let mv = random_move(state, &mut self.rng);
                let (success, message) = self.play(mv);
                if !success {
                    return (success, message);
                }
                let vertex = mv
                    .position()
                    .and_then(|p| format_vertex(p, size))
                    .unwrap_or_else(|| "pass".to_string());
                (true, vertex)
            }

            "undo" => {
                if self.history.len() <= 1 {
                    return (false, "cannot undo".to_string());
                }
                self.history.pop();
                (true, String::new())
            }

            "showboard" => (true, format!("\n{}", self.state())),

            "is_game_over" => (true, self.state().ended().to_string()),

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn reset(&mut self, board_size: usize) {
        match GameState::new(board_size) {
            Ok(state) => {
                info!(board_size, "new game");
                self.history = vec![state];
            }
            Err(err) => debug!(%err, "board reset refused"),
        }
    }

    fn play(&mut self, mv: Move) -> (bool, String) {
        match self.state().play_move(mv) {
            Ok(next) => {
                if next.ended() {
                    info!(moves = self.history.len(), "game over after two passes");
                }
                self.history.push(next);
                (true, String::new())
            }
            Err(err) => (false, format!("illegal move: {}", err.reason)),
        }
    }
}

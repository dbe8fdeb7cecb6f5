//! Players, board positions, and moves.
//!
//! Also provides the GTP-style vertex notation used by the text front ends:
//! columns are letters `A`-`Z` skipping `I`, rows are numbered from 1 at the
//! bottom of the board. Row 0 of a [`BoardPosition`] is the top row.

use std::fmt;
use std::str::FromStr;

use crate::constants::{COLUMN_LETTERS, MAX_VERTEX_BOARD_SIZE};

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// The opponent of this player.
    pub fn other(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "black"),
            Player::White => write!(f, "white"),
        }
    }
}

impl FromStr for Player {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Ok(Player::Black),
            "w" | "white" => Ok(Player::White),
            _ => Err(ParseMoveError::Player(s.to_string())),
        }
    }
}

/// A `(row, col)` pair on the board.
///
/// Coordinates are signed so that untrusted input can be represented as-is
/// and rejected by move validation instead of failing to construct.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardPosition {
    pub row: i32,
    pub col: i32,
}

impl BoardPosition {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Whether both coordinates lie in `0..board_size`.
    pub fn is_on_board(self, board_size: usize) -> bool {
        let in_range = |c: i32| usize::try_from(c).is_ok_and(|c| c < board_size);
        in_range(self.row) && in_range(self.col)
    }

    /// Row-major cell index, or `None` when off the board.
    pub fn to_index(self, board_size: usize) -> Option<usize> {
        if !self.is_on_board(board_size) {
            return None;
        }
        // Both coordinates are known non-negative here.
        Some(self.row as usize * board_size + self.col as usize)
    }

    /// Inverse of [`BoardPosition::to_index`].
    pub fn from_index(index: usize, board_size: usize) -> Self {
        Self {
            row: (index / board_size) as i32,
            col: (index % board_size) as i32,
        }
    }
}

impl From<(i32, i32)> for BoardPosition {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for BoardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A single move: either a stone placement or a pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Place(Player, BoardPosition),
    Pass(Player),
}

impl Move {
    pub fn place(player: Player, position: impl Into<BoardPosition>) -> Self {
        Move::Place(player, position.into())
    }

    pub fn pass(player: Player) -> Self {
        Move::Pass(player)
    }

    /// The player making this move.
    pub fn player(&self) -> Player {
        match *self {
            Move::Place(player, _) | Move::Pass(player) => player,
        }
    }

    /// The target position, or `None` for a pass.
    pub fn position(&self) -> Option<BoardPosition> {
        match *self {
            Move::Place(_, position) => Some(position),
            Move::Pass(_) => None,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass(_))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place(player, position) => write!(f, "{player} {position}"),
            Move::Pass(player) => write!(f, "{player} pass"),
        }
    }
}

/// Failure to read a move from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseMoveError {
    #[error("unknown player: {0:?}")]
    Player(String),

    #[error("malformed vertex: {0:?}")]
    Vertex(String),

    #[error("vertex notation supports boards up to 25x25 (got {0})")]
    UnsupportedBoardSize(usize),
}

/// Parse a vertex such as `"D4"` into a board position.
///
/// Well-formed vertices beyond the board edge (e.g. `"Z30"` on 9x9) still
/// parse; they come back off the board so move validation can reject them.
pub fn parse_vertex(s: &str, board_size: usize) -> Result<BoardPosition, ParseMoveError> {
    if board_size > MAX_VERTEX_BOARD_SIZE {
        return Err(ParseMoveError::UnsupportedBoardSize(board_size));
    }
    let malformed = || ParseMoveError::Vertex(s.to_string());

    let bytes = s.trim().as_bytes();
    let (&letter, digits) = bytes.split_first().ok_or_else(malformed)?;
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(malformed());
    }

    let letter = letter.to_ascii_uppercase();
    let col = COLUMN_LETTERS
        .iter()
        .position(|&c| c == letter)
        .ok_or_else(malformed)?;

    let number: i32 = std::str::from_utf8(digits)
        .ok()
        .and_then(|d| d.parse().ok())
        .ok_or_else(malformed)?;

    Ok(BoardPosition {
        row: board_size as i32 - number,
        col: col as i32,
    })
}

/// Format an on-board position as a vertex such as `"D4"`.
///
/// Returns `None` for positions off the board or boards too large for the
/// notation.
pub fn format_vertex(position: BoardPosition, board_size: usize) -> Option<String> {
    if board_size > MAX_VERTEX_BOARD_SIZE || !position.is_on_board(board_size) {
        return None;
    }
    let letter = COLUMN_LETTERS[position.col as usize] as char;
    Some(format!("{letter}{}", board_size as i32 - position.row))
}

/// Parse `"pass"` or a vertex into a move for `player`.
pub fn parse_move(player: Player, s: &str, board_size: usize) -> Result<Move, ParseMoveError> {
    if s.trim().eq_ignore_ascii_case("pass") {
        return Ok(Move::Pass(player));
    }
    parse_vertex(s, board_size).map(|position| Move::Place(player, position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::Black.other(), Player::White);
        assert_eq!(Player::White.other(), Player::Black);
    }

    #[test]
    fn test_player_from_str() {
        assert_eq!("B".parse::<Player>(), Ok(Player::Black));
        assert_eq!("white".parse::<Player>(), Ok(Player::White));
        assert!("red".parse::<Player>().is_err());
    }

    #[test]
    fn test_is_on_board() {
        assert!(BoardPosition::new(0, 0).is_on_board(5));
        assert!(BoardPosition::new(4, 4).is_on_board(5));
        assert!(!BoardPosition::new(5, 0).is_on_board(5));
        assert!(!BoardPosition::new(0, -1).is_on_board(5));
        assert!(!BoardPosition::new(-1, 2).is_on_board(5));
    }

    #[test]
    fn test_index_conversion() {
        assert_eq!(BoardPosition::new(2, 3).to_index(5), Some(13));
        assert_eq!(BoardPosition::new(2, 5).to_index(5), None);
        assert_eq!(BoardPosition::from_index(13, 5), BoardPosition::new(2, 3));
    }

    #[test]
    fn test_parse_vertex_corners() {
        assert_eq!(parse_vertex("A1", 9), Ok(BoardPosition::new(8, 0)));
        assert_eq!(parse_vertex("A9", 9), Ok(BoardPosition::new(0, 0)));
        assert_eq!(parse_vertex("j1", 9), Ok(BoardPosition::new(8, 8)));
    }

    #[test]
    fn test_parse_vertex_skips_i() {
        assert!(parse_vertex("I5", 9).is_err());
        assert_eq!(parse_vertex("J5", 9).map(|p| p.col), Ok(8));
    }

    #[test]
    fn test_parse_vertex_off_board_still_parses() {
        let position = parse_vertex("Z30", 9).unwrap();
        assert!(!position.is_on_board(9));
    }

    #[test]
    fn test_parse_vertex_malformed() {
        assert!(parse_vertex("", 9).is_err());
        assert!(parse_vertex("D", 9).is_err());
        assert!(parse_vertex("4D", 9).is_err());
        assert!(parse_vertex("D4x", 9).is_err());
        assert_eq!(
            parse_vertex("A1", 30),
            Err(ParseMoveError::UnsupportedBoardSize(30))
        );
    }

    #[test]
    fn test_format_vertex() {
        assert_eq!(format_vertex(BoardPosition::new(8, 0), 9).as_deref(), Some("A1"));
        assert_eq!(format_vertex(BoardPosition::new(0, 8), 9).as_deref(), Some("J9"));
        assert_eq!(format_vertex(BoardPosition::new(9, 0), 9), None);
    }

    #[test]
    fn test_parse_format_vertex_roundtrip() {
        for index in 0..13 * 13 {
            let position = BoardPosition::from_index(index, 13);
            let s = format_vertex(position, 13).unwrap();
            assert_eq!(parse_vertex(&s, 13), Ok(position), "failed roundtrip for {s}");
        }
    }

    #[test]
    fn test_parse_move_pass() {
        assert_eq!(parse_move(Player::White, "PASS", 9), Ok(Move::Pass(Player::White)));
        assert_eq!(
            parse_move(Player::Black, "C3", 9),
            Ok(Move::Place(Player::Black, BoardPosition::new(6, 2)))
        );
    }
}

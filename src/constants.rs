//! Board size defaults and limits.
//!
//! Board size is a runtime value carried by every game state; the constants
//! here only provide defaults for the CLI and the bounds of the text notation.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size used when none is given. Standard Go sizes are 9, 13, or 19.
pub const DEFAULT_BOARD_SIZE: usize = 19;

/// Largest board a game may be created on, matching the SGF coordinate range.
pub const MAX_BOARD_SIZE: usize = 52;

/// Largest board expressible in GTP vertex notation (letters A-Z without I).
pub const MAX_VERTEX_BOARD_SIZE: usize = 25;

/// Column letters used by vertex notation. 'I' is skipped.
pub const COLUMN_LETTERS: &[u8; MAX_VERTEX_BOARD_SIZE] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

// =============================================================================
// Playouts
// =============================================================================

/// Random games are cut off after `MAX_GAME_LEN_FACTOR * size * size` moves.
///
/// Without captures the board only fills up, so this is never reached on
/// small boards, but it bounds the loop regardless.
pub const MAX_GAME_LEN_FACTOR: usize = 3;

/// Maximum game length for a board of the given size.
pub const fn max_game_len(board_size: usize) -> usize {
    MAX_GAME_LEN_FACTOR * board_size * board_size
}

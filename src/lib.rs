//! Go-Rules: a rules engine for the game of Go.
//!
//! The engine keeps board state across a sequence of moves, enforces turn
//! order, board bounds, occupancy, and the suicide rule, tracks groups of
//! stones and their liberties, and ends the game after two consecutive
//! passes. Every state is an immutable value; playing a move returns a new
//! one.
//!
//! ## Modules
//!
//! - [`constants`] - Board size defaults and limits
//! - [`position`] - Players, positions, moves, and vertex notation
//! - [`group`] - Connected groups of stones and liberty counting
//! - [`game`] - Game state and move validation
//! - [`playout`] - Random self-play
//! - [`gtp`] - Go Text Protocol front end
//!
//! ## Example
//!
//! ```
//! use go_rules::game::GameState;
//! use go_rules::position::{Move, Player};
//!
//! let game = GameState::new(5).unwrap();
//! let game = game
//!     .play_moves([
//!         Move::place(Player::White, (2, 2)),
//!         Move::place(Player::Black, (0, 0)),
//!         Move::pass(Player::White),
//!         Move::pass(Player::Black),
//!     ])
//!     .unwrap();
//!
//! assert!(game.ended());
//! assert_eq!(game.get_cell((2, 2)), Some(Player::White));
//! assert_eq!(game.get_cell((4, 4)), None);
//! ```

pub mod constants;
pub mod game;
pub mod group;
pub mod gtp;
pub mod playout;
pub mod position;

//! Game state and move legality.
//!
//! A [`GameState`] is an immutable snapshot. Playing a move never modifies the
//! state it is called on; it validates the move and returns a new state, so a
//! rejected move leaves every earlier snapshot intact and usable.
//!
//! Legality rules, checked in order:
//! 1. the move must be made by the player whose turn it is (White opens);
//! 2. a placement must be on the board;
//! 3. a placement must target an empty cell;
//! 4. after placing and merging, the new stone's group must keep at least
//!    one liberty.
//!
//! Stones are never captured. A placement that would leave an adjacent enemy
//! group without liberties is judged purely on its own group's liberties, and
//! the enemy group stays on the board.

use std::fmt;

use tracing::{debug, trace};

use crate::constants::MAX_BOARD_SIZE;
use crate::group::{Group, GroupTracker};
use crate::position::{BoardPosition, Move, Player};

/// Why a move was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveValidationReason {
    /// Not this player's turn.
    OutOfTurn,
    /// The target cell already holds a stone.
    SpaceOccupied,
    /// The target cell is outside the board.
    OffBoard,
    /// The placed stone's group would have no liberties.
    Suicidal,
}

impl fmt::Display for MoveValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveValidationReason::OutOfTurn => write!(f, "out of turn"),
            MoveValidationReason::SpaceOccupied => write!(f, "space occupied"),
            MoveValidationReason::OffBoard => write!(f, "off board"),
            MoveValidationReason::Suicidal => write!(f, "suicidal"),
        }
    }
}

/// A move rejected by [`GameState::play_move`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid move: {reason}")]
pub struct InvalidMove {
    pub reason: MoveValidationReason,
}

impl From<MoveValidationReason> for InvalidMove {
    fn from(reason: MoveValidationReason) -> Self {
        InvalidMove { reason }
    }
}

/// A game cannot be created with this board size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardSizeError {
    #[error("board size must be at least 1")]
    Zero,

    #[error("board size {0} exceeds the maximum of {max}", max = MAX_BOARD_SIZE)]
    TooLarge(usize),
}

/// Immutable snapshot of a game.
#[derive(Debug, Clone)]
pub struct GameState {
    board_size: usize,
    ended: bool,
    last_move: Option<Move>,
    groups: GroupTracker,
}

impl GameState {
    /// A fresh game on an empty `board_size` x `board_size` board.
    ///
    /// # Errors
    /// Sizes outside `1..=MAX_BOARD_SIZE` are rejected.
    pub fn new(board_size: usize) -> Result<Self, BoardSizeError> {
        if board_size == 0 {
            return Err(BoardSizeError::Zero);
        }
        if board_size > MAX_BOARD_SIZE {
            return Err(BoardSizeError::TooLarge(board_size));
        }
        Ok(Self {
            board_size,
            ended: false,
            last_move: None,
            groups: GroupTracker::new(board_size),
        })
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Whether the last two moves were both passes.
    ///
    /// This is informational only: moves are still accepted afterwards.
    pub fn ended(&self) -> bool {
        self.ended
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// The player to move. White moves first, then turns alternate; a pass
    /// uses up a turn like any other move.
    pub fn current_player(&self) -> Player {
        match self.last_move {
            Some(last) => last.player().other(),
            None => Player::White,
        }
    }

    /// The stones on the board, grouped.
    pub fn groups(&self) -> &GroupTracker {
        &self.groups
    }

    /// The player occupying `position`, or `None` if it is empty.
    ///
    /// Positions off the board read as empty.
    pub fn get_cell(&self, position: impl Into<BoardPosition>) -> Option<Player> {
        self.group_at(position).map(Group::player)
    }

    /// The group occupying `position`, if any.
    pub fn group_at(&self, position: impl Into<BoardPosition>) -> Option<&Group> {
        let index = position.into().to_index(self.board_size)?;
        self.groups.get(index)
    }

    /// Liberties of the group occupying `position`, or `None` if it is empty.
    pub fn liberties(&self, position: impl Into<BoardPosition>) -> Option<usize> {
        let index = position.into().to_index(self.board_size)?;
        self.groups.liberties_of_group(index)
    }

    /// Check `mv` against this state without playing it.
    pub fn validate_move(&self, mv: &Move) -> Result<(), MoveValidationReason> {
        self.check_move(mv).map(|_| ())
    }

    /// Validate `mv` and return the tracker it produces; a pass keeps the
    /// current one.
    fn check_move(&self, mv: &Move) -> Result<GroupTracker, MoveValidationReason> {
        if mv.player() != self.current_player() {
            return Err(MoveValidationReason::OutOfTurn);
        }

        if let Move::Place(player, position) = *mv {
            let index = position
                .to_index(self.board_size)
                .ok_or(MoveValidationReason::OffBoard)?;

            if !self.groups.is_empty_at(index) {
                return Err(MoveValidationReason::SpaceOccupied);
            }

            let placed = self.groups.add_stone(player, index);
            if placed.liberties_of_group(index) == Some(0) {
                return Err(MoveValidationReason::Suicidal);
            }
            return Ok(placed);
        }

        Ok(self.groups.clone())
    }

    /// Play `mv` and return the resulting state.
    ///
    /// # Errors
    /// Returns [`InvalidMove`] carrying the first failed rule; `self` is
    /// unchanged either way.
    pub fn play_move(&self, mv: Move) -> Result<GameState, InvalidMove> {
        let groups = match self.check_move(&mv) {
            Ok(groups) => groups,
            Err(reason) => {
                debug!(%mv, %reason, "rejected move");
                return Err(reason.into());
            }
        };

        let ended = mv.is_pass() && self.last_move.is_some_and(|last| last.is_pass());

        trace!(%mv, ended, "played move");
        Ok(GameState {
            board_size: self.board_size,
            ended,
            last_move: Some(mv),
            groups,
        })
    }

    /// Play `moves` in order, stopping at the first invalid one.
    ///
    /// On failure nothing is returned but the error; `self` still holds the
    /// state from before the sequence.
    pub fn play_moves<I>(&self, moves: I) -> Result<GameState, InvalidMove>
    where
        I: IntoIterator<Item = Move>,
    {
        moves
            .into_iter()
            .try_fold(self.clone(), |state, mv| state.play_move(mv))
    }

    /// Every on-board position where the current player may place a stone.
    pub fn legal_placements(&self) -> Vec<BoardPosition> {
        let player = self.current_player();
        (0..self.board_size * self.board_size)
            .map(|index| BoardPosition::from_index(index, self.board_size))
            .filter(|&position| self.validate_move(&Move::Place(player, position)).is_ok())
            .collect()
    }
}

impl fmt::Display for GameState {
    /// Rows top to bottom: `X` black, `O` white, `.` empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.board_size {
            for col in 0..self.board_size {
                let ch = match self.groups.get(row * self.board_size + col).map(Group::player) {
                    Some(Player::Black) => 'X',
                    Some(Player::White) => 'O',
                    None => '.',
                };
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

//! Random self-play.
//!
//! Picks uniformly among the legal placements of the player to move and
//! passes when there are none. Used by `genmove` and the demo command.

use tracing::debug;

use crate::constants::max_game_len;
use crate::game::{BoardSizeError, GameState};
use crate::position::Move;

/// A random legal move for the player to move, or a pass if no placement is
/// legal.
pub fn random_move(state: &GameState, rng: &mut fastrand::Rng) -> Move {
    let player = state.current_player();
    let candidates = state.legal_placements();
    if candidates.is_empty() {
        return Move::pass(player);
    }
    Move::Place(player, candidates[rng.usize(..candidates.len())])
}

/// Play random moves from `state` until the game ends or `max_moves` moves
/// have been played; in the latter case both sides pass to finish.
pub fn random_playout(state: &GameState, max_moves: usize, rng: &mut fastrand::Rng) -> GameState {
    let mut state = state.clone();
    let mut played = 0;

    while !state.ended() {
        let mv = if played < max_moves {
            random_move(&state, rng)
        } else {
            Move::pass(state.current_player())
        };
        // Moves come from the legal set or are passes by the player to move,
        // so a rejection means the state is unusable.
        state = match state.play_move(mv) {
            Ok(next) => next,
            Err(err) => {
                debug!(%mv, %err, "random move rejected, stopping playout");
                break;
            }
        };
        played += 1;
    }

    state
}

/// A complete random game on a fresh board of `board_size`.
pub fn random_game(board_size: usize, rng: &mut fastrand::Rng) -> Result<GameState, BoardSizeError> {
    let state = GameState::new(board_size)?;
    Ok(random_playout(&state, max_game_len(board_size), rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Player;

    #[test]
    fn test_random_move_is_legal() {
        let mut rng = fastrand::Rng::with_seed(7);
        let state = GameState::new(5).unwrap();
        for _ in 0..20 {
            let mv = random_move(&state, &mut rng);
            assert_eq!(mv.player(), Player::White);
            assert!(state.validate_move(&mv).is_ok());
        }
    }

    #[test]
    fn test_random_move_passes_when_stuck() {
        let mut rng = fastrand::Rng::with_seed(1);
        let state = GameState::new(1).unwrap();
        assert_eq!(random_move(&state, &mut rng), Move::pass(Player::White));
    }

    #[test]
    fn test_random_game_ends() {
        let mut rng = fastrand::Rng::with_seed(42);
        let game = random_game(5, &mut rng).unwrap();
        assert!(game.ended());
        assert!(game.last_move().is_some_and(|m| m.is_pass()));
    }

    #[test]
    fn test_random_game_is_deterministic_for_seed() {
        let a = random_game(4, &mut fastrand::Rng::with_seed(3)).unwrap();
        let b = random_game(4, &mut fastrand::Rng::with_seed(3)).unwrap();
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_move_limit_forces_passes() {
        let mut rng = fastrand::Rng::with_seed(9);
        let start = GameState::new(9).unwrap();
        let game = random_playout(&start, 0, &mut rng);
        assert!(game.ended());
        assert!(game.groups().groups().is_empty());
    }

    #[test]
    fn test_random_game_rejects_zero_size() {
        let mut rng = fastrand::Rng::with_seed(0);
        assert!(random_game(0, &mut rng).is_err());
    }
}

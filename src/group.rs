//! Connected groups of stones and their liberties.
//!
//! A [`GroupTracker`] maps every occupied cell (row-major index) to the group
//! occupying it; cells absent from the map are empty. Trackers are immutable:
//! [`GroupTracker::add_stone`] returns a new tracker and leaves the receiver
//! untouched, so older game states keep observing their own board.
//!
//! The cell table is copied on write while the groups themselves are shared
//! behind [`Arc`], so untouched groups cost one pointer per snapshot.

use std::sync::Arc;

use tracing::trace;

use crate::position::Player;

/// A set of same-player stones connected through edge adjacency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    player: Player,
    /// Cell indices; the most recently placed stone first.
    members: Vec<usize>,
}

impl Group {
    pub fn player(&self) -> Player {
        self.player
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.members.contains(&index)
    }
}

/// Immutable map from cell index to the group occupying that cell.
#[derive(Debug, Clone)]
pub struct GroupTracker {
    board_size: usize,
    groups_by_index: Arc<Vec<Option<Arc<Group>>>>,
}

impl GroupTracker {
    /// An empty tracker for a `board_size` x `board_size` board.
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            groups_by_index: Arc::new(vec![None; board_size * board_size]),
        }
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// The group at `index`, or `None` if the cell is empty.
    pub fn get(&self, index: usize) -> Option<&Group> {
        self.groups_by_index.get(index)?.as_deref()
    }

    /// Whether no stone occupies `index`.
    pub fn is_empty_at(&self, index: usize) -> bool {
        self.get(index).is_none()
    }

    /// Place a stone for `player` at `index` and merge it with every adjacent
    /// group of the same player.
    ///
    /// The caller guarantees `index` is on the board and empty.
    pub fn add_stone(&self, player: Player, index: usize) -> GroupTracker {
        debug_assert!(index < self.groups_by_index.len(), "index {index} off the board");
        debug_assert!(self.is_empty_at(index), "index {index} already occupied");

        // A group touching the new stone from two sides must be merged once.
        let mut friendly: Vec<&Arc<Group>> = Vec::with_capacity(4);
        for adjacent in self.adjacent_indices(index) {
            if let Some(group) = &self.groups_by_index[adjacent] {
                if group.player == player && !friendly.iter().any(|g| Arc::ptr_eq(g, group)) {
                    friendly.push(group);
                }
            }
        }

        let mut members = Vec::with_capacity(1 + friendly.iter().map(|g| g.len()).sum::<usize>());
        members.push(index);
        for group in &friendly {
            members.extend_from_slice(&group.members);
        }
        if !friendly.is_empty() {
            trace!(index, merged = friendly.len(), stones = members.len(), "merged groups");
        }

        let group = Arc::new(Group { player, members });
        let mut groups_by_index = (*self.groups_by_index).clone();
        for &member in &group.members {
            groups_by_index[member] = Some(Arc::clone(&group));
        }

        GroupTracker {
            board_size: self.board_size,
            groups_by_index: Arc::new(groups_by_index),
        }
    }

    /// Liberties of the group at `index`, or `None` if the cell is empty.
    ///
    /// This is the sum of each member's empty neighbors. An empty cell
    /// bordering two stones of the group counts twice.
    pub fn liberties_of_group(&self, index: usize) -> Option<usize> {
        let group = self.get(index)?;
        Some(
            group
                .members
                .iter()
                .map(|&member| self.liberties_of_stone(member))
                .sum(),
        )
    }

    fn liberties_of_stone(&self, index: usize) -> usize {
        self.adjacent_indices(index)
            .filter(|&adjacent| self.is_empty_at(adjacent))
            .count()
    }

    /// Edge-adjacent cells of `index` in up, left, right, down order,
    /// skipping directions that would leave the board.
    pub fn adjacent_indices(&self, index: usize) -> impl Iterator<Item = usize> {
        let size = self.board_size;
        let up = (index >= size).then(|| index - size);
        let left = (index % size != 0).then(|| index - 1);
        let right = (index % size != size - 1).then(|| index + 1);
        let down = (index + size < size * size).then(|| index + size);
        [up, left, right, down].into_iter().flatten()
    }

    /// Every distinct group on the board, ordered by its lowest cell index.
    pub fn groups(&self) -> Vec<&Group> {
        let mut seen: Vec<&Arc<Group>> = Vec::new();
        for group in self.groups_by_index.iter().flatten() {
            if !seen.iter().any(|g| Arc::ptr_eq(g, group)) {
                seen.push(group);
            }
        }
        seen.into_iter().map(|g| g.as_ref()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: usize = 5;

    fn idx(row: usize, col: usize) -> usize {
        row * SIZE + col
    }

    #[test]
    fn test_empty_tracker() {
        let tracker = GroupTracker::new(SIZE);
        assert!(tracker.get(idx(2, 2)).is_none());
        assert_eq!(tracker.liberties_of_group(idx(2, 2)), None);
        assert!(tracker.groups().is_empty());
    }

    #[test]
    fn test_adjacent_indices_center() {
        let tracker = GroupTracker::new(SIZE);
        let adjacent: Vec<_> = tracker.adjacent_indices(idx(2, 2)).collect();
        assert_eq!(adjacent, vec![idx(1, 2), idx(2, 1), idx(2, 3), idx(3, 2)]);
    }

    #[test]
    fn test_adjacent_indices_edges() {
        let tracker = GroupTracker::new(SIZE);
        let corner: Vec<_> = tracker.adjacent_indices(idx(0, 0)).collect();
        assert_eq!(corner, vec![idx(0, 1), idx(1, 0)]);

        let far_corner: Vec<_> = tracker.adjacent_indices(idx(4, 4)).collect();
        assert_eq!(far_corner, vec![idx(3, 4), idx(4, 3)]);

        // Last cell of a row must not wrap to the next row.
        let right_edge: Vec<_> = tracker.adjacent_indices(idx(1, 4)).collect();
        assert_eq!(right_edge, vec![idx(0, 4), idx(1, 3), idx(2, 4)]);
    }

    #[test]
    fn test_single_cell_board_has_no_neighbors() {
        let tracker = GroupTracker::new(1);
        assert_eq!(tracker.adjacent_indices(0).count(), 0);
        let tracker = tracker.add_stone(Player::White, 0);
        assert_eq!(tracker.liberties_of_group(0), Some(0));
    }

    #[test]
    fn test_single_stone_liberties() {
        let tracker = GroupTracker::new(SIZE).add_stone(Player::Black, idx(2, 2));
        assert_eq!(tracker.liberties_of_group(idx(2, 2)), Some(4));

        let tracker = tracker.add_stone(Player::Black, idx(0, 0));
        assert_eq!(tracker.liberties_of_group(idx(0, 0)), Some(2));
    }

    #[test]
    fn test_add_stone_leaves_original_untouched() {
        let before = GroupTracker::new(SIZE).add_stone(Player::White, idx(1, 1));
        let after = before.add_stone(Player::White, idx(1, 2));

        assert_eq!(before.get(idx(1, 1)).map(Group::len), Some(1));
        assert!(before.get(idx(1, 2)).is_none());
        assert_eq!(after.get(idx(1, 1)).map(Group::len), Some(2));
    }

    #[test]
    fn test_opponent_stones_are_not_merged() {
        let tracker = GroupTracker::new(SIZE)
            .add_stone(Player::White, idx(2, 2))
            .add_stone(Player::Black, idx(2, 3));

        assert_eq!(tracker.get(idx(2, 2)).map(Group::len), Some(1));
        assert_eq!(tracker.get(idx(2, 3)).map(Group::player), Some(Player::Black));
        assert_eq!(tracker.liberties_of_group(idx(2, 2)), Some(3));
        assert_eq!(tracker.groups().len(), 2);
    }

    #[test]
    fn test_merge_two_groups() {
        let tracker = GroupTracker::new(SIZE)
            .add_stone(Player::White, idx(2, 1))
            .add_stone(Player::White, idx(2, 3))
            .add_stone(Player::White, idx(2, 2));

        let group = tracker.get(idx(2, 1)).unwrap();
        assert_eq!(group.members(), &[idx(2, 2), idx(2, 1), idx(2, 3)]);
        for cell in [idx(2, 1), idx(2, 2), idx(2, 3)] {
            assert_eq!(tracker.get(cell), Some(group));
        }
        assert_eq!(tracker.groups().len(), 1);
        // 3 + 2 + 3
        assert_eq!(tracker.liberties_of_group(idx(2, 2)), Some(8));
    }

    #[test]
    fn test_group_reached_from_two_sides_merges_once() {
        // U shape: the new stone at (1,1) touches the same group above and left.
        let tracker = GroupTracker::new(SIZE)
            .add_stone(Player::Black, idx(1, 0))
            .add_stone(Player::Black, idx(0, 0))
            .add_stone(Player::Black, idx(0, 1))
            .add_stone(Player::Black, idx(1, 1));

        let group = tracker.get(idx(1, 1)).unwrap();
        assert_eq!(group.len(), 4);
        let mut members = group.members().to_vec();
        members.sort_unstable();
        members.dedup();
        assert_eq!(members.len(), 4);
    }

    #[test]
    fn test_shared_liberty_counts_twice() {
        // L shape around the empty cell (2,1): it borders both (1,1) and (2,2).
        let tracker = GroupTracker::new(SIZE)
            .add_stone(Player::White, idx(1, 1))
            .add_stone(Player::White, idx(2, 2))
            .add_stone(Player::White, idx(1, 2));

        assert_eq!(tracker.liberties_of_group(idx(1, 1)), Some(8));
    }
}

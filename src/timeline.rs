use serde::{Deserialize, Serialize};

use crate::board::{BoardId, HalfTurn};
use crate::internal_error_message;


// Index into the game's timeline arena. Also serves as the `w` coordinate in move generation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct TimelineId(pub usize);

// `fork_at` of timelines that were not forked from anything: their first board has half-turn 0.
pub const ROOT_FORK_AT: HalfTurn = -1;

// An append-only sequence of boards. Invariant:
//   board_at(history[i]).half_turn() == fork_at + 1 + i
#[derive(Clone, Debug)]
pub struct Timeline {
    id: TimelineId,
    fork_at: HalfTurn,
    // Used for ancestry queries only.
    parent: Option<TimelineId>,
    history: Vec<BoardId>,
}

impl Timeline {
    pub fn new_root(id: TimelineId) -> Self {
        Timeline { id, fork_at: ROOT_FORK_AT, parent: None, history: Vec::new() }
    }

    // The new timeline is empty: the caller must push its first board, which should have
    // half-turn `fork_at + 1`.
    pub fn create_fork(&self, new_id: TimelineId, fork_at: HalfTurn) -> Timeline {
        Timeline {
            id: new_id,
            fork_at,
            parent: Some(self.id),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> TimelineId { self.id }
    pub fn fork_at(&self) -> HalfTurn { self.fork_at }
    pub fn parent(&self) -> Option<TimelineId> { self.parent }
    pub fn history(&self) -> &[BoardId] { &self.history }
    pub fn size(&self) -> usize { self.history.len() }
    pub fn is_empty(&self) -> bool { self.history.is_empty() }
    pub fn is_root(&self) -> bool { self.parent.is_none() }

    #[track_caller]
    pub fn back(&self) -> BoardId {
        *self
            .history
            .last()
            .unwrap_or_else(|| panic!("{}", internal_error_message!("Timeline {:?} is empty", self.id)))
    }

    // Half-turn of the most recent board.
    pub fn head_half_turn(&self) -> HalfTurn { self.fork_at + self.history.len() as HalfTurn }

    pub fn contains_half_turn(&self, half_turn: HalfTurn) -> bool {
        self.history_index(half_turn).is_some()
    }

    #[track_caller]
    pub fn get_board_by_half_turn(&self, half_turn: HalfTurn) -> BoardId {
        match self.history_index(half_turn) {
            Some(idx) => self.history[idx],
            None => panic!(
                "Half-turn {} is outside of timeline {:?}: it spans half-turns {}..={}",
                half_turn,
                self.id,
                self.fork_at + 1,
                self.head_half_turn()
            ),
        }
    }

    pub fn push_back(&mut self, board: BoardId) { self.history.push(board); }

    // Only `Game::undo` may remove boards.
    pub(crate) fn pop_back(&mut self) -> Option<BoardId> { self.history.pop() }

    fn history_index(&self, half_turn: HalfTurn) -> Option<usize> {
        let idx = usize::try_from(half_turn - self.fork_at - 1).ok()?;
        (idx < self.history.len()).then_some(idx)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn timeline_with_boards(fork_at: HalfTurn, num_boards: usize) -> Timeline {
        let root = Timeline::new_root(TimelineId(0));
        let mut timeline = root.create_fork(TimelineId(1), fork_at);
        for i in 0..num_boards {
            timeline.push_back(BoardId(100 + i));
        }
        timeline
    }

    #[test]
    fn index_law() {
        let timeline = timeline_with_boards(4, 3);
        assert_eq!(timeline.parent(), Some(TimelineId(0)));
        assert_eq!(timeline.head_half_turn(), 7);
        assert_eq!(timeline.get_board_by_half_turn(5), BoardId(100));
        assert_eq!(timeline.get_board_by_half_turn(6), BoardId(101));
        assert_eq!(timeline.get_board_by_half_turn(7), BoardId(102));
        assert_eq!(timeline.back(), BoardId(102));
        assert!(!timeline.contains_half_turn(4));
        assert!(!timeline.contains_half_turn(8));
        assert!(!timeline.contains_half_turn(-3));
    }

    #[test]
    fn root_timeline_starts_at_zero() {
        let mut timeline = Timeline::new_root(TimelineId(0));
        assert!(timeline.is_empty());
        timeline.push_back(BoardId(0));
        assert!(timeline.contains_half_turn(0));
        assert_eq!(timeline.head_half_turn(), 0);
    }

    #[test]
    #[should_panic(expected = "outside of timeline")]
    fn board_before_fork_point() {
        timeline_with_boards(4, 3).get_board_by_half_turn(4);
    }

    #[test]
    #[should_panic(expected = "outside of timeline")]
    fn board_after_head() {
        timeline_with_boards(4, 3).get_board_by_half_turn(8);
    }
}

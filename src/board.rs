use log::trace;
use serde::{Deserialize, Serialize};

use crate::coord::{BoardShape, Coord};
use crate::force::Force;
use crate::grid::{Grid, GridItem};
use crate::piece::PieceOnBoard;
use crate::timeline::TimelineId;


// Absolute ply index. Half-turn 0 is White's first move, half-turn 1 is Black's first move.
pub type HalfTurn = i32;
// Half-turn divided by two.
pub type FullTurn = i32;

// Index into the game's board arena.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct BoardId(pub usize);

// A snapshot of one timeline at one point in time. Boards are never modified after they have
// been pushed onto a timeline: every move creates new boards via `create_fork`.
#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    half_turn: HalfTurn,
    timeline: TimelineId,
    // The board this one was forked from. Plain index, never used for ownership.
    predecessor: Option<BoardId>,
}

impl Board {
    pub fn new(grid: Grid, half_turn: HalfTurn, timeline: TimelineId) -> Self {
        Board { grid, half_turn, timeline, predecessor: None }
    }

    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn shape(&self) -> BoardShape { self.grid.shape() }
    pub fn dim(&self) -> u8 { self.shape().size }
    pub fn half_turn(&self) -> HalfTurn { self.half_turn }
    pub fn full_turn(&self) -> FullTurn { self.half_turn.div_euclid(2) }
    pub fn timeline(&self) -> TimelineId { self.timeline }
    pub fn predecessor(&self) -> Option<BoardId> { self.predecessor }

    // The force that is to move on this board.
    pub fn active_force(&self) -> Force { Force::from_half_turn(self.half_turn) }

    pub fn get_piece(&self, pos: Coord) -> GridItem<PieceOnBoard> { self.grid.get(pos) }

    #[track_caller]
    pub fn place_piece(&mut self, pos: Coord, piece: Option<PieceOnBoard>) {
        assert!(
            self.shape().contains_coord(pos),
            "Cannot place a piece at {:?} on a {}x{} board",
            pos,
            self.dim(),
            self.dim()
        );
        self.grid[pos] = piece;
    }

    // Copies every piece onto a new board one half-turn ahead. The caller becomes the
    // predecessor of the new board; `self_id` must be the arena index of `self`.
    pub fn create_fork(&self, self_id: BoardId, target_timeline: TimelineId) -> Board {
        trace!(
            "Forking board {:?} (half-turn {}) onto timeline {:?}",
            self_id, self.half_turn, target_timeline
        );
        Board {
            grid: self.grid.clone(),
            half_turn: self.half_turn + 1,
            timeline: target_timeline,
            predecessor: Some(self_id),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceKind;

    #[test]
    fn fork_copies_pieces_and_advances_half_turn() {
        let mut board = Board::new(Grid::new(BoardShape::new(4)), 0, TimelineId(0));
        board.place_piece(Coord::from_xy(0, 0), Some(PieceOnBoard::new(PieceKind::King, Force::White)));
        board.place_piece(Coord::from_xy(3, 3), Some(PieceOnBoard::new(PieceKind::King, Force::Black)));
        let fork = board.create_fork(BoardId(7), TimelineId(2));
        assert_eq!(fork.half_turn(), board.half_turn() + 1);
        assert_eq!(fork.predecessor(), Some(BoardId(7)));
        assert_eq!(fork.timeline(), TimelineId(2));
        assert_eq!(fork.active_force(), Force::Black);
        assert_eq!(fork.grid(), board.grid());
    }

    #[test]
    #[should_panic(expected = "Cannot place a piece")]
    fn place_piece_out_of_bounds() {
        let mut board = Board::new(Grid::new(BoardShape::new(4)), 0, TimelineId(0));
        board.place_piece(Coord::from_xy(4, 0), Some(PieceOnBoard::new(PieceKind::Pawn, Force::White)));
    }
}

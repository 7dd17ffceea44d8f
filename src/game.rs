// Improvement potential. Check, checkmate and stalemate. Currently the only way to win is to
//   capture the opponent's king.

use derive_new::new;
use itertools::Itertools;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardId, FullTurn, HalfTurn};
use crate::coord::Coord;
use crate::error::TurnError;
use crate::force::Force;
use crate::grid::{Grid, GridItem};
use crate::internal_error_message;
use crate::movegen::{Vec4, generate_moves};
use crate::piece::{PieceKind, PieceOnBoard};
use crate::rules::Rules;
use crate::starter::generate_starting_grid;
use crate::timeline::{Timeline, TimelineId};


// A specific square on a specific board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, new, Serialize, Deserialize)]
pub struct SelectedPosition {
    pub board: BoardId,
    pub coord: Coord,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, new, Serialize, Deserialize)]
pub struct Move {
    pub from: SelectedPosition,
    pub to: SelectedPosition,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum VictoryReason {
    KingCaptured,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum GameStatus {
    Active,
    Victory(Force, VictoryReason),
}

// A board created by a move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ForkRecord {
    pub timeline: TimelineId,
    pub board: BoardId,
    // Whether the timeline itself was created by the move.
    pub new_timeline: bool,
}

#[derive(Clone, Debug)]
pub struct MoveRecord {
    pub mv: Move,
    // In creation order: the fork of the source board goes first.
    pub forks: Vec<ForkRecord>,
    pub status_before: GameStatus,
}

// Moves made since the last submission. This is the only state `undo` can roll back.
#[derive(Clone, Debug, Default)]
pub struct PendingTurn {
    moves: Vec<MoveRecord>,
}

impl PendingTurn {
    pub fn is_empty(&self) -> bool { self.moves.is_empty() }
    pub fn moves(&self) -> impl Iterator<Item = &Move> { self.moves.iter().map(|record| &record.mv) }
    pub fn records(&self) -> &[MoveRecord] { &self.moves }

    // The slowest of the boards created this turn: the present can't advance past it.
    pub fn min_reached_half_turn(&self, game: &Game) -> Option<HalfTurn> {
        self.moves
            .iter()
            .flat_map(|record| record.forks.iter())
            .map(|fork| game.board(fork.board).half_turn())
            .min()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurnRecord {
    pub force: Force,
    pub moves: Vec<Move>,
    // Present half-turn after the turn was submitted.
    pub present_half_turn: HalfTurn,
}

// Owns all boards and timelines. Boards and timelines refer to each other by arena index;
// a timeline's index is also its ID.
#[derive(Clone, Debug)]
pub struct Game {
    rules: Rules,
    boards: Vec<Board>,
    timelines: Vec<Timeline>,
    present_half_turn: HalfTurn,
    active_force: Force,
    status: GameStatus,
    pending_turn: PendingTurn,
    turn_log: Vec<TurnRecord>,
}

impl Game {
    pub fn new(rules: Rules) -> Self {
        let starting_grid = generate_starting_grid(&rules);
        Self::new_with_grid(rules, starting_grid)
    }

    pub fn new_with_grid(rules: Rules, starting_grid: Grid) -> Self {
        if let Err(err) = rules.verify() {
            panic!("Invalid rules: {err}");
        }
        assert_eq!(starting_grid.shape(), rules.board_shape());
        let root_id = TimelineId(0);
        let mut root = Timeline::new_root(root_id);
        let first_board = Board::new(starting_grid, root.fork_at() + 1, root_id);
        let present_half_turn = first_board.half_turn();
        root.push_back(BoardId(0));
        Game {
            rules,
            boards: vec![first_board],
            timelines: vec![root],
            present_half_turn,
            active_force: Force::from_half_turn(present_half_turn),
            status: GameStatus::Active,
            pending_turn: PendingTurn::default(),
            turn_log: Vec::new(),
        }
    }

    pub fn rules(&self) -> &Rules { &self.rules }
    pub fn dim(&self) -> u8 { self.rules.board_shape().size }
    pub fn active_force(&self) -> Force { self.active_force }
    pub fn present_half_turn(&self) -> HalfTurn { self.present_half_turn }
    pub fn present_full_turn(&self) -> FullTurn { self.present_half_turn.div_euclid(2) }
    pub fn status(&self) -> GameStatus { self.status }
    pub fn winner(&self) -> Option<Force> {
        match self.status {
            GameStatus::Active => None,
            GameStatus::Victory(force, _) => Some(force),
        }
    }
    pub fn timelines(&self) -> &[Timeline] { &self.timelines }
    pub fn timeline(&self, id: TimelineId) -> &Timeline { &self.timelines[id.0] }
    pub fn board(&self, id: BoardId) -> &Board { &self.boards[id.0] }
    pub fn num_boards(&self) -> usize { self.boards.len() }
    pub fn pending_turn(&self) -> &PendingTurn { &self.pending_turn }
    pub fn current_turn_moves(&self) -> impl Iterator<Item = &Move> { self.pending_turn.moves() }
    pub fn turn_log(&self) -> &[TurnRecord] { &self.turn_log }

    pub fn board_exists(&self, timeline: TimelineId, half_turn: HalfTurn) -> bool {
        self.timelines
            .get(timeline.0)
            .is_some_and(|timeline| timeline.contains_half_turn(half_turn))
    }

    // Panics if the board does not exist: check `board_exists` first.
    #[track_caller]
    pub fn get_board(&self, timeline: TimelineId, half_turn: HalfTurn) -> BoardId {
        self.timeline(timeline).get_board_by_half_turn(half_turn)
    }

    // Like `get_board`, but accepts any coordinates, including negative timelines.
    pub fn probe_board(&self, timeline: i32, half_turn: HalfTurn) -> Option<BoardId> {
        let timeline = TimelineId(usize::try_from(timeline).ok()?);
        self.board_exists(timeline, half_turn)
            .then(|| self.get_board(timeline, half_turn))
    }

    pub fn to_vec4(&self, pos: SelectedPosition) -> Vec4 {
        let board = self.board(pos.board);
        Vec4::new(
            pos.coord.x() as i32,
            pos.coord.y() as i32,
            board.full_turn(),
            board.timeline().0 as i32,
        )
    }

    pub fn is_head(&self, board: BoardId) -> bool {
        self.timeline(self.board(board).timeline()).back() == board
    }

    pub fn moveable_boards(&self) -> Vec<BoardId> {
        self.timelines
            .iter()
            .filter(|timeline| timeline.head_half_turn() == self.present_half_turn)
            .map(|timeline| timeline.back())
            .collect()
    }

    pub fn can_make_move_from_board(&self, board: BoardId) -> bool {
        board.0 < self.boards.len()
            && self.is_head(board)
            && self.board(board).half_turn() == self.present_half_turn
    }

    pub fn moveable_positions(
        &self, from: SelectedPosition,
    ) -> Result<Vec<SelectedPosition>, TurnError> {
        self.check_piece_to_move(from)?;
        Ok(generate_moves(self, from))
    }

    fn check_board(&self, pos: SelectedPosition) -> Result<&Board, TurnError> {
        let board = self.boards.get(pos.board.0).ok_or(TurnError::NoSuchBoard)?;
        if !board.shape().contains_coord(pos.coord) {
            return Err(TurnError::OutOfBounds);
        }
        Ok(board)
    }

    // Both the piece and the board it stands on must belong to the force to move.
    fn check_piece_to_move(&self, from: SelectedPosition) -> Result<PieceOnBoard, TurnError> {
        let board = self.check_board(from)?;
        let piece = match board.get_piece(from.coord) {
            GridItem::Piece(piece) if piece.force == self.active_force => piece,
            GridItem::Piece(_) => return Err(TurnError::WrongTurnOrder),
            GridItem::Empty => return Err(TurnError::PieceMissing),
            GridItem::OutOfBounds => return Err(TurnError::OutOfBounds),
        };
        if board.active_force() != self.active_force {
            return Err(TurnError::WrongTurnOrder);
        }
        Ok(piece)
    }

    fn board_has_moves(&self, board_id: BoardId) -> bool {
        self.board(board_id).grid().pieces().any(|(coord, piece)| {
            piece.force == self.active_force
                && !generate_moves(self, SelectedPosition::new(board_id, coord)).is_empty()
        })
    }

    // A turn is complete when no moveable board is left on which the active force could still
    // move. Boards without legal moves are skipped. A finished game needs no further moves.
    pub fn turn_complete(&self) -> bool {
        self.status != GameStatus::Active
            || !self.moveable_boards().into_iter().any(|board| self.board_has_moves(board))
    }

    // Applies a single move. The trajectory itself is not verified: callers are expected to
    // pick destinations from `moveable_positions`.
    pub fn make_move(&mut self, mv: Move) -> Result<(), TurnError> {
        if self.status != GameStatus::Active {
            return Err(TurnError::GameOver);
        }
        let piece = self.check_piece_to_move(mv.from)?;
        if !self.can_make_move_from_board(mv.from.board) {
            return Err(TurnError::BoardNotMoveable);
        }
        let destination = self.check_board(mv.to)?;
        if destination.active_force() != self.active_force {
            return Err(TurnError::WrongTurnOrder);
        }

        // Validation is done; from here on the move cannot fail.
        let status_before = self.status;
        if let GridItem::Piece(captured) = destination.get_piece(mv.to.coord) {
            if captured.kind == PieceKind::King && captured.force != self.active_force {
                info!("{:?} captured the {:?} king", self.active_force, captured.force);
                self.status = GameStatus::Victory(self.active_force, VictoryReason::KingCaptured);
            }
        }

        let mut forks = Vec::new();
        let source_timeline = self.board(mv.from.board).timeline();
        let mut source_fork = self.board(mv.from.board).create_fork(mv.from.board, source_timeline);
        source_fork.place_piece(mv.from.coord, None);
        if mv.from.board == mv.to.board {
            source_fork.place_piece(mv.to.coord, Some(self.maybe_promote(piece, mv.to.coord)));
            forks.push(self.push_board(source_fork, false));
        } else {
            forks.push(self.push_board(source_fork, false));
            let (target_timeline, new_timeline) = self.target_timeline(mv.to.board);
            let mut destination_fork = self.board(mv.to.board).create_fork(mv.to.board, target_timeline);
            destination_fork.place_piece(mv.to.coord, Some(self.maybe_promote(piece, mv.to.coord)));
            forks.push(self.push_board(destination_fork, new_timeline));
        }
        debug!(
            "{:?} moved {} {:?} -> {:?}, created boards {:?}",
            self.active_force,
            piece.kind.name(),
            mv.from,
            mv.to,
            forks.iter().map(|fork| fork.board).collect_vec()
        );
        self.pending_turn.moves.push(MoveRecord { mv, forks, status_before });
        Ok(())
    }

    fn maybe_promote(&self, piece: PieceOnBoard, to: Coord) -> PieceOnBoard {
        let last_row = match piece.force {
            Force::White => self.dim() as i8 - 1,
            Force::Black => 0,
        };
        if self.rules.pawn_promotion && piece.kind == PieceKind::Pawn && to.y() == last_row {
            PieceOnBoard { kind: PieceKind::Queen, ..piece }
        } else {
            piece
        }
    }

    // Moving onto the latest board of a timeline continues that timeline. Moving onto any
    // earlier board branches off a new timeline: history is never rewritten.
    fn target_timeline(&mut self, destination: BoardId) -> (TimelineId, bool) {
        let board = self.board(destination);
        let timeline = board.timeline();
        if self.timeline(timeline).back() == destination {
            return (timeline, false);
        }
        let new_id = TimelineId(self.timelines.len());
        let fork = self.timeline(timeline).create_fork(new_id, board.half_turn());
        debug!(
            "Creating timeline {:?}: branched off {:?} at half-turn {}",
            new_id,
            timeline,
            fork.fork_at()
        );
        self.timelines.push(fork);
        (new_id, true)
    }

    fn push_board(&mut self, board: Board, new_timeline: bool) -> ForkRecord {
        let id = BoardId(self.boards.len());
        let timeline_id = board.timeline();
        let timeline = &mut self.timelines[timeline_id.0];
        assert_eq!(
            board.half_turn(),
            timeline.head_half_turn() + 1,
            "{}",
            internal_error_message!("Board does not continue timeline {:?}", timeline_id)
        );
        timeline.push_back(id);
        self.boards.push(board);
        ForkRecord { timeline: timeline_id, board: id, new_timeline }
    }

    pub fn submit_turn(&mut self) -> Result<(), TurnError> {
        let Some(new_present) = self.pending_turn.min_reached_half_turn(self) else {
            return Err(TurnError::NoMovesToSubmit);
        };
        if !self.turn_complete() {
            return Err(TurnError::TurnIncomplete);
        }
        let pending_turn = std::mem::take(&mut self.pending_turn);
        let force = self.active_force;
        self.active_force = force.opponent();
        self.present_half_turn = new_present;
        assert_eq!(
            Force::from_half_turn(new_present),
            self.active_force,
            "{}",
            internal_error_message!("Present half-turn {} has wrong parity", new_present)
        );
        self.turn_log.push(TurnRecord {
            force,
            moves: pending_turn.moves().copied().collect(),
            present_half_turn: new_present,
        });
        info!(
            "{:?} submitted {} move(s); present is half-turn {} ({} timelines)",
            force,
            pending_turn.records().len(),
            new_present,
            self.timelines.len()
        );
        Ok(())
    }

    pub fn undoable(&self) -> bool { !self.pending_turn.is_empty() }

    // Reverts the most recent move of the current turn.
    pub fn undo(&mut self) -> Result<(), TurnError> {
        let record = self.pending_turn.moves.pop().ok_or(TurnError::NothingToUndo)?;
        for fork in record.forks.iter().rev() {
            let timeline = &mut self.timelines[fork.timeline.0];
            assert_eq!(timeline.pop_back(), Some(fork.board), "{}", internal_error_message!());
            assert_eq!(self.boards.len(), fork.board.0 + 1, "{}", internal_error_message!());
            self.boards.pop();
            if fork.new_timeline {
                assert!(timeline.is_empty(), "{}", internal_error_message!());
                assert_eq!(self.timelines.len(), fork.timeline.0 + 1, "{}", internal_error_message!());
                self.timelines.pop();
                debug!("Removed timeline {:?}", fork.timeline);
            } else {
                assert!(!timeline.is_empty(), "{}", internal_error_message!());
            }
        }
        self.status = record.status_before;
        debug!("{:?} undid {:?}", self.active_force, record.mv);
        Ok(())
    }
}

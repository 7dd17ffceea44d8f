// Test utilities that cannot be moved to the "tests" folder, because stress_test uses them.

use itertools::Itertools;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::error::TurnError;
use crate::game::{Game, Move, SelectedPosition};
use crate::grid::GridItem;


// In theory random tests verify statistical properties that should always hold, but let's fix
// the seed to avoid sporadic failures.
pub fn deterministic_rng() -> impl Rng { rand::rngs::StdRng::from_seed([0; 32]) }

// All moves the active force could make on moveable boards that have not been moved on
// during the current turn.
pub fn all_moves(game: &Game) -> Vec<Move> {
    let mut moves = Vec::new();
    for board_id in game.moveable_boards() {
        let board = game.board(board_id);
        for coord in board.shape().coords() {
            if let GridItem::Piece(piece) = board.get_piece(coord) {
                if piece.force == game.active_force() {
                    let from = SelectedPosition::new(board_id, coord);
                    let destinations = game.moveable_positions(from).unwrap();
                    moves.extend(destinations.into_iter().map(|to| Move::new(from, to)));
                }
            }
        }
    }
    moves
}

pub fn random_move(game: &Game, rng: &mut impl Rng) -> Option<Move> {
    all_moves(game).choose(rng).copied()
}

// Moves on every moveable board (if possible) and submits the turn. Returns the number of moves
// made.
pub fn play_random_turn(game: &mut Game, rng: &mut impl Rng) -> Result<usize, TurnError> {
    let mut num_moves = 0;
    while let Some(mv) = random_move(game, rng) {
        game.make_move(mv)?;
        num_moves += 1;
        if game.winner().is_some() {
            break;
        }
    }
    game.submit_turn()?;
    Ok(num_moves)
}

// Compact description of the game state, suitable for comparing states before and after undo.
pub fn timeline_fingerprint(game: &Game) -> Vec<(usize, i32, Vec<usize>)> {
    game.timelines()
        .iter()
        .map(|timeline| {
            (
                timeline.id().0,
                timeline.fork_at(),
                timeline.history().iter().map(|board| board.0).collect_vec(),
            )
        })
        .collect()
}

// Verifies the structural invariants of boards and timelines. Panics on violation.
pub fn verify_invariants(game: &Game) {
    for (idx, timeline) in game.timelines().iter().enumerate() {
        assert_eq!(timeline.id().0, idx);
        assert!(!timeline.is_empty(), "Timeline {idx} is empty");
        if let Some(parent) = timeline.parent() {
            assert!(parent.0 < idx, "Timeline {idx} has parent {parent:?} that was created later");
        }
        for (i, &board_id) in timeline.history().iter().enumerate() {
            let board = game.board(board_id);
            assert_eq!(board.timeline(), timeline.id());
            assert_eq!(board.half_turn(), timeline.fork_at() + 1 + i as i32);
            assert_eq!(timeline.get_board_by_half_turn(board.half_turn()), board_id);
            if let Some(predecessor) = board.predecessor() {
                assert_eq!(board.half_turn(), game.board(predecessor).half_turn() + 1);
            }
        }
    }
    for board_id in game.moveable_boards() {
        assert!(game.can_make_move_from_board(board_id));
    }
}

// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::collections::HashSet;

use itertools::Itertools;
use multiverse_chess::coord::{BoardShape, Col, Coord, Row};
use multiverse_chess::game::{Game, Move, SelectedPosition};
use multiverse_chess::grid::Grid;
use multiverse_chess::piece::PieceOnBoard;
use multiverse_chess::rules::Rules;
use multiverse_chess::util::as_single_char;


// Parses a grid drawn with the last row on top. Uppercase letters are white pieces, lowercase
// letters are black pieces, '.' is an empty square.
#[allow(dead_code)]
pub fn parse_grid(board_shape: BoardShape, grid_str: &str) -> Result<Grid, String> {
    let rows = grid_str
        .split('\n')
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.split_ascii_whitespace().collect_vec())
        .collect_vec();
    assert_eq!(rows.len(), board_shape.size as usize);
    assert!(rows.iter().all(|row| row.len() == board_shape.size as usize));
    let mut grid = Grid::new(board_shape);
    for (row_idx, row) in rows.iter().rev().enumerate() {
        for (col_idx, piece_str) in row.iter().enumerate() {
            let piece_char =
                as_single_char(piece_str).ok_or_else(|| format!("Invalid piece: {}", piece_str))?;
            let coord =
                Coord::new(Row::from_zero_based(row_idx as i8), Col::from_zero_based(col_idx as i8));
            grid[coord] = if piece_char == '.' {
                None
            } else {
                Some(
                    PieceOnBoard::from_ascii(piece_char)
                        .ok_or_else(|| format!("Invalid piece: {}", piece_char))?,
                )
            };
        }
    }
    Ok(grid)
}

#[allow(dead_code)]
pub fn game_from_grid(rules: Rules, grid_str: &str) -> Game {
    let grid = parse_grid(rules.board_shape(), grid_str).unwrap();
    Game::new_with_grid(rules, grid)
}

#[allow(dead_code)]
pub fn pos(game: &Game, notation: &str) -> SelectedPosition { game.parse_position(notation).unwrap() }

#[allow(dead_code)]
pub fn make_move(game: &mut Game, notation: &str) {
    let mv: Move = game.parse_move(notation).unwrap();
    game.make_move(mv).unwrap();
}

// Plays a sequence of turns. Moves within a turn are separated by commas, turns are separated
// by semicolons. Every turn is submitted.
#[allow(dead_code)]
pub fn replay_turns(game: &mut Game, log: &str) {
    for turn in log.split(';').map(str::trim).filter(|turn| !turn.is_empty()) {
        for mv in turn.split(',') {
            make_move(game, mv);
        }
        game.submit_turn().unwrap();
    }
}

#[allow(dead_code)]
pub fn destinations(game: &Game, notation: &str) -> HashSet<String> {
    game.moveable_positions(pos(game, notation))
        .unwrap()
        .into_iter()
        .map(|to| game.position_to_notation(to))
        .collect()
}

#[allow(dead_code)]
pub fn notation_set(squares: &[&str]) -> HashSet<String> {
    squares.iter().map(|s| s.to_string()).collect()
}

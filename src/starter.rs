use crate::coord::{Col, Coord, Row};
use crate::force::Force;
use crate::grid::Grid;
use crate::piece::{PieceKind, PieceOnBoard};
use crate::rules::{Rules, StartingPosition};


fn new_white(kind: PieceKind) -> PieceOnBoard { PieceOnBoard::new(kind, Force::White) }

fn setup_white_pawns_on_2nd_row(grid: &mut Grid) {
    for col in grid.shape().cols() {
        grid[Coord::new(Row::from_zero_based(1), col)] = Some(new_white(PieceKind::Pawn));
    }
}

fn setup_black_pieces_mirrorlike(grid: &mut Grid) {
    let size = grid.shape().size as i8;
    for coord in grid.shape().coords() {
        if let Some(piece) = grid[coord] {
            if piece.force == Force::White {
                let mirror_row = Row::from_zero_based(size - coord.row.to_zero_based() - 1);
                let mirror_coord = Coord::new(mirror_row, coord.col);
                assert!(grid[mirror_coord].is_none(), "{:?}", grid);
                grid[mirror_coord] = Some(PieceOnBoard { force: Force::Black, ..piece });
            }
        }
    }
}

// White pieces on the first row, `None` for empty squares.
pub fn starting_piece_row(starting_position: StartingPosition) -> &'static [Option<PieceKind>] {
    use PieceKind::*;
    match starting_position {
        StartingPosition::Standard => &[
            Some(Rook),
            Some(Knight),
            Some(Bishop),
            Some(Queen),
            Some(King),
            Some(Bishop),
            Some(Knight),
            Some(Rook),
        ],
        StartingPosition::Small => &[Some(Rook), Some(Knight), Some(Bishop), Some(Queen), Some(King)],
        StartingPosition::RookTutorial => &[Some(Rook), None, Some(King), Some(Rook)],
        StartingPosition::KnightTutorial => &[Some(Knight), None, Some(King), None, Some(Knight)],
        StartingPosition::PawnTutorial => &[None, None, Some(King), None, None],
    }
}

pub fn generate_starting_grid(rules: &Rules) -> Grid {
    let mut grid = Grid::new(rules.board_shape());
    let starting_row = starting_piece_row(rules.starting_position);
    assert_eq!(starting_row.len(), grid.shape().size as usize);
    for (col, piece_kind) in starting_row.iter().enumerate() {
        if let Some(piece_kind) = piece_kind {
            let coord = Coord::new(Row::from_zero_based(0), Col::from_zero_based(col as i8));
            grid[coord] = Some(new_white(*piece_kind));
        }
    }
    if rules.starting_position.has_pawns() {
        setup_white_pawns_on_2nd_row(&mut grid);
    }
    setup_black_pieces_mirrorlike(&mut grid);
    grid
}

use std::{fmt, ops};

use ndarray::{Array, Array2};
use serde::{Deserialize, Serialize};

use crate::coord::{BoardShape, Coord};
use crate::piece::PieceOnBoard;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GridItem<T> {
    Piece(T),
    Empty,
    OutOfBounds,
}

impl<T> GridItem<T> {
    pub fn is_free(&self) -> bool { matches!(self, GridItem::Empty) }
}

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    data: Array2<Option<PieceOnBoard>>,
}

impl Grid {
    pub fn new(board_shape: BoardShape) -> Self {
        let size = board_shape.size as usize;
        Grid { data: Array::from_elem((size, size), None) }
    }

    pub fn shape(&self) -> BoardShape { BoardShape::new(self.data.shape()[0] as u8) }

    pub fn get(&self, pos: Coord) -> GridItem<PieceOnBoard> {
        let Some(index) = coord_to_index(pos) else {
            return GridItem::OutOfBounds;
        };
        match self.data.get(index) {
            None => GridItem::OutOfBounds,
            Some(None) => GridItem::Empty,
            Some(Some(v)) => GridItem::Piece(*v),
        }
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Coord, PieceOnBoard)> + '_ {
        self.shape().coords().filter_map(|coord| self[coord].map(|piece| (coord, piece)))
    }
}

impl ops::Index<Coord> for Grid {
    type Output = Option<PieceOnBoard>;
    #[track_caller]
    fn index(&self, pos: Coord) -> &Self::Output {
        let shape = self.shape();
        coord_to_index(pos)
            .and_then(|index| self.data.get(index))
            .unwrap_or_else(|| panic!("{}", out_of_bound_message(pos, shape)))
    }
}

impl ops::IndexMut<Coord> for Grid {
    #[track_caller]
    fn index_mut(&mut self, pos: Coord) -> &mut Self::Output {
        let shape = self.shape();
        coord_to_index(pos)
            .and_then(|index| self.data.get_mut(index))
            .unwrap_or_else(|| panic!("{}", out_of_bound_message(pos, shape)))
    }
}

// Rows go first: this makes `Array2` iteration order match `BoardShape::coords`.
fn coord_to_index(pos: Coord) -> Option<[usize; 2]> {
    let row = usize::try_from(pos.y()).ok()?;
    let col = usize::try_from(pos.x()).ok()?;
    Some([row, col])
}

fn out_of_bound_message(pos: Coord, board_shape: BoardShape) -> String {
    format!(
        "Coord ({}, {}) is out of bound for {}x{} board",
        pos.x(),
        pos.y(),
        board_shape.size,
        board_shape.size
    )
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid ")?;
        f.debug_map()
            .entries(self.pieces().map(|(coord, piece)| (coord.to_algebraic(), piece.to_ascii())))
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::force::Force;
    use crate::piece::PieceKind;

    #[test]
    fn get_distinguishes_empty_and_out_of_bounds() {
        let mut g = Grid::new(BoardShape::new(4));
        g[Coord::from_xy(1, 2)] = Some(PieceOnBoard::new(PieceKind::Rook, Force::Black));
        assert_eq!(
            g.get(Coord::from_xy(1, 2)),
            GridItem::Piece(PieceOnBoard::new(PieceKind::Rook, Force::Black))
        );
        assert_eq!(g.get(Coord::from_xy(2, 1)), GridItem::Empty);
        assert_eq!(g.get(Coord::from_xy(4, 0)), GridItem::OutOfBounds);
        assert_eq!(g.get(Coord::from_xy(0, -1)), GridItem::OutOfBounds);
        assert_eq!(g.pieces().count(), 1);
    }

    #[test]
    #[should_panic(expected = "out of bound")]
    fn index_out_of_bounds_panics() {
        let g = Grid::new(BoardShape::new(4));
        let _ = g[Coord::from_xy(0, 4)];
    }
}

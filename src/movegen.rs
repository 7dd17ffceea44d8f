// Legal destinations in the four-dimensional board space.
//
// A square is addressed as (x, y, z, w): `x` and `y` are the square on a board, `z` is the
// full turn of the board and `w` is the timeline. Moving along `z` or `w` means targeting the
// board at half-turn `2 * z + parity` on timeline `w`, where `parity` belongs to the force that
// is to move. There is no check detection: a piece may move anywhere its trajectory allows,
// including onto the opponent's king.

use std::ops;

use itertools::iproduct;
use log::trace;

use crate::board::HalfTurn;
use crate::coord::Coord;
use crate::force::Force;
use crate::game::{Game, SelectedPosition};
use crate::grid::GridItem;
use crate::piece::PieceKind;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Vec4 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub w: i32,
}

impl Vec4 {
    pub const fn new(x: i32, y: i32, z: i32, w: i32) -> Self { Vec4 { x, y, z, w } }

    pub fn from_axes(axes: [i32; 4]) -> Self { Vec4::new(axes[0], axes[1], axes[2], axes[3]) }
    pub fn axes(self) -> [i32; 4] { [self.x, self.y, self.z, self.w] }
    pub fn is_zero(self) -> bool { self.axes() == [0; 4] }
}

impl ops::Add for Vec4 {
    type Output = Self;
    fn add(self, other: Self) -> Self::Output {
        Vec4::new(self.x + other.x, self.y + other.y, self.z + other.z, self.w + other.w)
    }
}

impl ops::Mul<i32> for Vec4 {
    type Output = Self;
    fn mul(self, k: i32) -> Self::Output {
        Vec4::new(self.x * k, self.y * k, self.z * k, self.w * k)
    }
}

const X: usize = 0;
const Y: usize = 1;
const Z: usize = 2;
const W: usize = 3;

// Where a single step of a trajectory lands.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Landing {
    Free(SelectedPosition),
    Capture(SelectedPosition),
    // Own piece, off the board, or a board that does not exist.
    Blocked,
}

struct Generator<'a> {
    game: &'a Game,
    force: Force,
    origin: Vec4,
    num_timelines: i32,
    result: Vec<SelectedPosition>,
}

impl<'a> Generator<'a> {
    fn new(game: &'a Game, from: SelectedPosition, force: Force) -> Self {
        Generator {
            game,
            force,
            origin: game.to_vec4(from),
            num_timelines: game.timelines().len() as i32,
            result: Vec::new(),
        }
    }

    fn land(&self, pos: Vec4) -> Landing {
        let dim = self.game.dim() as i32;
        if !(0..dim).contains(&pos.x) || !(0..dim).contains(&pos.y) {
            return Landing::Blocked;
        }
        let half_turn: HalfTurn = 2 * pos.z + self.force.half_turn_parity();
        let Some(board) = self.game.probe_board(pos.w, half_turn) else {
            return Landing::Blocked;
        };
        let coord = Coord::from_xy(pos.x as i8, pos.y as i8);
        let selected = SelectedPosition::new(board, coord);
        match self.game.board(board).get_piece(coord) {
            GridItem::Empty => Landing::Free(selected),
            GridItem::Piece(piece) if piece.force != self.force => Landing::Capture(selected),
            GridItem::Piece(_) | GridItem::OutOfBounds => Landing::Blocked,
        }
    }

    // Upper bound on the number of steps along a direction: board size for the spatial axes,
    // the number of full turns played so far for the time axis and the number of timelines for
    // the timeline axis. The time bound applies in both directions; steps that reach boards
    // which do not exist are cut off by `land` anyway.
    fn max_distance(&self, dir: Vec4) -> i32 {
        let dim = self.game.dim() as i32;
        let caps = [dim, dim, self.origin.z, self.num_timelines];
        dir.axes()
            .into_iter()
            .zip(caps)
            .filter(|&(d, _)| d != 0)
            .map(|(_, cap)| cap)
            .min()
            .unwrap_or(0)
    }

    fn slide(&mut self, dir: Vec4) {
        assert!(!dir.is_zero());
        for distance in 1..=self.max_distance(dir) {
            match self.land(self.origin + dir * distance) {
                Landing::Free(pos) => self.result.push(pos),
                Landing::Capture(pos) => {
                    self.result.push(pos);
                    break;
                }
                Landing::Blocked => break,
            }
        }
    }

    fn leap(&mut self, offset: Vec4) {
        match self.land(self.origin + offset) {
            Landing::Free(pos) | Landing::Capture(pos) => self.result.push(pos),
            Landing::Blocked => {}
        }
    }

    fn rook(&mut self) {
        // Rooks travel back in time only.
        for dir in [
            Vec4::new(1, 0, 0, 0),
            Vec4::new(-1, 0, 0, 0),
            Vec4::new(0, 1, 0, 0),
            Vec4::new(0, -1, 0, 0),
            Vec4::new(0, 0, -1, 0),
            Vec4::new(0, 0, 0, -1),
            Vec4::new(0, 0, 0, 1),
        ] {
            self.slide(dir);
        }
    }

    fn bishop(&mut self) {
        for (a, b) in axis_pairs() {
            for (sa, sb) in iproduct!([1, -1], [1, -1]) {
                let mut axes = [0; 4];
                axes[a] = sa;
                axes[b] = sb;
                self.slide(Vec4::from_axes(axes));
            }
        }
    }

    fn queen(&mut self) {
        for dir in unit_directions() {
            self.slide(dir);
        }
    }

    fn knight(&mut self) {
        for (a, b) in axis_pairs() {
            for ((la, lb), (sa, sb)) in iproduct!([(2, 1), (1, 2)], iproduct!([1, -1], [1, -1])) {
                let mut axes = [0; 4];
                axes[a] = la * sa;
                axes[b] = lb * sb;
                self.leap(Vec4::from_axes(axes));
            }
        }
    }

    fn king(&mut self) {
        for (dx, dy, dz, dw) in iproduct!(-1..=1, -1..=1, -1..=0, -1..=1) {
            let offset = Vec4::new(dx, dy, dz, dw);
            if !offset.is_zero() {
                self.leap(offset);
            }
        }
    }

    // Pawns never leave their board.
    fn pawn(&mut self, double_step: bool) {
        let forward = self.force.forward() as i32;
        let start_row = match self.force {
            Force::White => 1,
            Force::Black => self.game.dim() as i32 - 2,
        };
        if let Landing::Free(pos) = self.land(self.origin + Vec4::new(0, forward, 0, 0)) {
            self.result.push(pos);
            if double_step && self.origin.y == start_row {
                if let Landing::Free(pos) = self.land(self.origin + Vec4::new(0, 2 * forward, 0, 0)) {
                    self.result.push(pos);
                }
            }
        }
        for dx in [-1, 1] {
            if let Landing::Capture(pos) = self.land(self.origin + Vec4::new(dx, forward, 0, 0)) {
                self.result.push(pos);
            }
        }
    }
}

fn axis_pairs() -> impl Iterator<Item = (usize, usize)> {
    [(X, Y), (X, Z), (Y, Z), (X, W), (Y, W), (Z, W)].into_iter()
}

// Every combination of moving by one step along a non-empty subset of axes.
fn unit_directions() -> impl Iterator<Item = Vec4> {
    iproduct!(-1..=1, -1..=1, -1..=1, -1..=1)
        .map(|(x, y, z, w)| Vec4::new(x, y, z, w))
        .filter(|dir| !dir.is_zero())
}

// Assumes that `from` holds a piece of the active force; `Game::moveable_positions` verifies
// this before calling.
pub(crate) fn generate_moves(game: &Game, from: SelectedPosition) -> Vec<SelectedPosition> {
    let force = game.active_force();
    let piece = match game.board(from.board).get_piece(from.coord) {
        GridItem::Piece(piece) => piece,
        GridItem::Empty | GridItem::OutOfBounds => {
            panic!("{}", crate::internal_error_message!("No piece at {:?}", from))
        }
    };
    assert_eq!(piece.force, force);
    let mut generator = Generator::new(game, from, force);
    match piece.kind {
        PieceKind::King => generator.king(),
        PieceKind::Queen => generator.queen(),
        PieceKind::Rook => generator.rook(),
        PieceKind::Bishop => generator.bishop(),
        PieceKind::Knight => generator.knight(),
        PieceKind::Pawn => generator.pawn(game.rules().pawn_double_step),
    }
    trace!(
        "{} at {:?} has {} destinations",
        piece.kind.name(),
        from,
        generator.result.len()
    );
    generator.result
}


#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use itertools::Itertools;

    use super::*;

    #[test]
    fn direction_counts() {
        assert_eq!(unit_directions().count(), 80);
        assert_eq!(axis_pairs().count(), 6);
        assert_eq!(unit_directions().collect::<HashSet<_>>().len(), 80);
    }

    #[test]
    fn knight_offsets_are_distinct() {
        let mut offsets = Vec::new();
        for (a, b) in axis_pairs() {
            for ((la, lb), (sa, sb)) in iproduct!([(2, 1), (1, 2)], iproduct!([1, -1], [1, -1])) {
                let mut axes = [0; 4];
                axes[a] = la * sa;
                axes[b] = lb * sb;
                offsets.push(Vec4::from_axes(axes));
            }
        }
        assert_eq!(offsets.len(), 48);
        assert_eq!(offsets.iter().unique().count(), 48);
    }

    #[test]
    fn vec4_arithmetic() {
        let v = Vec4::new(1, -2, 0, 3);
        assert_eq!(v * 2, Vec4::new(2, -4, 0, 6));
        assert_eq!(v + Vec4::new(-1, 2, 0, -3), Vec4::new(0, 0, 0, 0));
        assert!((v + v * -1).is_zero());
    }
}

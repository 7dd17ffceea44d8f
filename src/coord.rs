use std::fmt;
use std::ops;

use itertools::Itertools;
use serde::{Deserialize, Serialize};


// Boards are square. Columns are labelled with letters, so 26 is a hard limit.
pub const MAX_BOARD_SIZE: u8 = 26;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BoardShape {
    pub size: u8,
}

impl BoardShape {
    pub fn new(size: u8) -> Self {
        assert!(size > 0 && size <= MAX_BOARD_SIZE, "Unsupported board size: {size}");
        BoardShape { size }
    }

    pub fn contains_row(&self, row: Row) -> bool { (0..self.size as i8).contains(&row.idx) }
    pub fn contains_col(&self, col: Col) -> bool { (0..self.size as i8).contains(&col.idx) }
    pub fn contains_coord(&self, coord: Coord) -> bool {
        self.contains_row(coord.row) && self.contains_col(coord.col)
    }

    pub fn rows(&self) -> impl DoubleEndedIterator<Item = Row> + Clone + use<> {
        (0..self.size as i8).map(Row::from_zero_based)
    }
    pub fn cols(&self) -> impl DoubleEndedIterator<Item = Col> + Clone + use<> {
        (0..self.size as i8).map(Col::from_zero_based)
    }
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        self.rows().cartesian_product(self.cols()).map(|(row, col)| Coord { row, col })
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Row {
    idx: i8, // 0-based
}

impl Row {
    pub const fn from_zero_based(idx: i8) -> Self { Self { idx } }
    pub fn from_algebraic(idx: char) -> Option<Self> {
        let idx = idx.to_digit(10)?;
        (idx >= 1 && idx <= MAX_BOARD_SIZE as u32).then(|| Self::from_zero_based(idx as i8 - 1))
    }
    pub fn from_algebraic_str(s: &str) -> Option<Self> {
        let idx: u8 = s.parse().ok()?;
        (idx >= 1 && idx <= MAX_BOARD_SIZE).then(|| Self::from_zero_based(idx as i8 - 1))
    }
    pub const fn to_zero_based(self) -> i8 { self.idx }
    pub fn to_algebraic(self) -> String { (self.idx + 1).to_string() }
}

impl ops::Add<i8> for Row {
    type Output = Self;
    fn add(self, other: i8) -> Self::Output { Self::from_zero_based(self.idx + other) }
}

impl ops::Sub for Row {
    type Output = i8;
    fn sub(self, other: Self) -> Self::Output { self.idx - other.idx }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Col {
    idx: i8, // 0-based
}

impl Col {
    pub const fn from_zero_based(idx: i8) -> Self { Self { idx } }
    pub fn from_algebraic(idx: char) -> Option<Self> {
        if idx.is_ascii_lowercase() {
            Some(Self::from_zero_based((idx as u8 - b'a') as i8))
        } else {
            None
        }
    }
    pub const fn to_zero_based(self) -> i8 { self.idx }
    pub fn to_algebraic(self) -> char { (self.idx as u8 + b'a') as char }
}

impl ops::Add<i8> for Col {
    type Output = Self;
    fn add(self, other: i8) -> Self::Output { Self::from_zero_based(self.idx + other) }
}

impl ops::Sub for Col {
    type Output = i8;
    fn sub(self, other: Self) -> Self::Output { self.idx - other.idx }
}


// A square on a single board. Coordinates are not bound-checked on construction: this is
// done by `BoardShape::contains_coord` and by `Grid` indexing.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: Row,
    pub col: Col,
}

impl Coord {
    pub const fn new(row: Row, col: Col) -> Self { Self { row, col } }
    // File goes first, as in algebraic notation.
    pub const fn from_xy(x: i8, y: i8) -> Self {
        Self {
            row: Row::from_zero_based(y),
            col: Col::from_zero_based(x),
        }
    }
    pub const fn x(self) -> i8 { self.col.to_zero_based() }
    pub const fn y(self) -> i8 { self.row.to_zero_based() }

    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let col = Col::from_algebraic(chars.next()?)?;
        let row = Row::from_algebraic_str(chars.as_str())?;
        Some(Coord { row, col })
    }
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.col.to_algebraic(), self.row.to_algebraic())
    }
}

// (dx, dy)
impl ops::Add<(i8, i8)> for Coord {
    type Output = Self;
    fn add(self, other: (i8, i8)) -> Self::Output {
        Self { col: self.col + other.0, row: self.row + other.1 }
    }
}

impl ops::Sub for Coord {
    type Output = (i8, i8);
    fn sub(self, other: Self) -> Self::Output { (self.col - other.col, self.row - other.row) }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({}, {})", self.x(), self.y())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebraic() {
        assert_eq!(Coord::from_algebraic("a1"), Some(Coord::from_xy(0, 0)));
        assert_eq!(Coord::from_algebraic("e2"), Some(Coord::from_xy(4, 1)));
        assert_eq!(Coord::from_algebraic("c12"), Some(Coord::from_xy(2, 11)));
        assert_eq!(Coord::from_algebraic("E2"), None);
        assert_eq!(Coord::from_algebraic("e0"), None);
        assert_eq!(Coord::from_algebraic("e"), None);
        assert_eq!(Coord::from_xy(7, 7).to_algebraic(), "h8");
    }

    #[test]
    fn shape_bounds() {
        let shape = BoardShape::new(5);
        assert!(shape.contains_coord(Coord::from_xy(4, 4)));
        assert!(!shape.contains_coord(Coord::from_xy(5, 0)));
        assert!(!shape.contains_coord(Coord::from_xy(0, -1)));
        assert_eq!(shape.coords().count(), 25);
    }
}

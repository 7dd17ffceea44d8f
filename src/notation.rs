// Coordinate notation for moves between boards.
//
// A square is written as `(<timeline>T<full turn>)<square>`, e.g. `(0T1)e2`. Full turns are
// 1-based, like move numbers in chess. The board within a full turn is normally implied by the
// force to move; it can be given explicitly with a `w` or `b` suffix: `(1T3b)c5`.
// A move is written as `<from>><to>`, e.g. `(0T1)e2>(0T1)e4`.

use std::fmt;

use lazy_static::lazy_static;
use regex_lite::Regex;

use crate::board::HalfTurn;
use crate::coord::Coord;
use crate::error::TurnError;
use crate::force::Force;
use crate::game::{Game, Move, SelectedPosition};
use crate::timeline::TimelineId;


// Keeps `half_turn` within `HalfTurn` range.
const MAX_FULL_TURN: i32 = i32::MAX / 2;

const SQUARE_RE: &str = r"\(\s*(\d+)\s*T\s*(\d+)\s*([wb])?\s*\)\s*([a-z]\d+)";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NotatedSquare {
    pub timeline: TimelineId,
    pub full_turn: i32, // 1-based
    pub force: Option<Force>,
    pub coord: Coord,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NotatedMove {
    pub from: NotatedSquare,
    pub to: NotatedSquare,
}

impl NotatedSquare {
    pub fn parse(notation: &str) -> Option<Self> {
        lazy_static! {
            static ref RE: Regex = Regex::new(&format!(r"^\s*{SQUARE_RE}\s*$")).unwrap();
        }
        let cap = RE.captures(notation)?;
        Self::from_captures(&cap, 1)
    }

    fn from_captures(cap: &regex_lite::Captures, first_group: usize) -> Option<Self> {
        let group = |i: usize| cap.get(first_group + i).map(|m| m.as_str());
        let timeline = TimelineId(group(0)?.parse().ok()?);
        let full_turn: i32 = group(1)?.parse().ok()?;
        if !(1..=MAX_FULL_TURN).contains(&full_turn) {
            return None;
        }
        let force = match group(2) {
            None => None,
            Some("w") => Some(Force::White),
            Some("b") => Some(Force::Black),
            Some(_) => return None,
        };
        let coord = Coord::from_algebraic(group(3)?)?;
        Some(NotatedSquare { timeline, full_turn, force, coord })
    }

    fn half_turn(&self, default_force: Force) -> HalfTurn {
        let force = self.force.unwrap_or(default_force);
        2 * (self.full_turn - 1) + force.half_turn_parity()
    }

    pub fn resolve(&self, game: &Game) -> Result<SelectedPosition, TurnError> {
        let half_turn = self.half_turn(game.active_force());
        if !game.board_exists(self.timeline, half_turn) {
            return Err(TurnError::NoSuchBoard);
        }
        let board = game.get_board(self.timeline, half_turn);
        if !game.board(board).shape().contains_coord(self.coord) {
            return Err(TurnError::OutOfBounds);
        }
        Ok(SelectedPosition::new(board, self.coord))
    }

    // The force suffix is only written when the board does not belong to the force to move.
    pub fn from_position(game: &Game, pos: SelectedPosition) -> Self {
        let board = game.board(pos.board);
        let force = board.active_force();
        NotatedSquare {
            timeline: board.timeline(),
            full_turn: board.full_turn() + 1,
            force: (force != game.active_force()).then_some(force),
            coord: pos.coord,
        }
    }
}

impl NotatedMove {
    pub fn parse(notation: &str) -> Option<Self> {
        lazy_static! {
            static ref RE: Regex =
                Regex::new(&format!(r"^\s*{SQUARE_RE}\s*>\s*{SQUARE_RE}\s*$")).unwrap();
        }
        let cap = RE.captures(notation)?;
        Some(NotatedMove {
            from: NotatedSquare::from_captures(&cap, 1)?,
            to: NotatedSquare::from_captures(&cap, 5)?,
        })
    }

    pub fn resolve(&self, game: &Game) -> Result<Move, TurnError> {
        Ok(Move::new(self.from.resolve(game)?, self.to.resolve(game)?))
    }

    pub fn from_move(game: &Game, mv: Move) -> Self {
        NotatedMove {
            from: NotatedSquare::from_position(game, mv.from),
            to: NotatedSquare::from_position(game, mv.to),
        }
    }
}

impl fmt::Display for NotatedSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let force = match self.force {
            None => "",
            Some(Force::White) => "w",
            Some(Force::Black) => "b",
        };
        write!(f, "({}T{}{}){}", self.timeline.0, self.full_turn, force, self.coord.to_algebraic())
    }
}

impl fmt::Display for NotatedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}>{}", self.from, self.to)
    }
}

impl Game {
    pub fn parse_position(&self, notation: &str) -> Result<SelectedPosition, TurnError> {
        NotatedSquare::parse(notation).ok_or(TurnError::InvalidNotation)?.resolve(self)
    }

    pub fn parse_move(&self, notation: &str) -> Result<Move, TurnError> {
        NotatedMove::parse(notation).ok_or(TurnError::InvalidNotation)?.resolve(self)
    }

    pub fn position_to_notation(&self, pos: SelectedPosition) -> String {
        NotatedSquare::from_position(self, pos).to_string()
    }

    pub fn move_to_notation(&self, mv: Move) -> String { NotatedMove::from_move(self, mv).to_string() }
}

use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::board::HalfTurn;


#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Serialize, Deserialize,
)]
pub enum Force {
    White,
    Black,
}

impl Force {
    pub fn opponent(self) -> Force {
        match self {
            Force::White => Force::Black,
            Force::Black => Force::White,
        }
    }

    // White moves on even half-turns, black moves on odd half-turns.
    pub fn from_half_turn(half_turn: HalfTurn) -> Force {
        if half_turn.rem_euclid(2) == 0 { Force::White } else { Force::Black }
    }

    pub fn half_turn_parity(self) -> HalfTurn {
        match self {
            Force::White => 0,
            Force::Black => 1,
        }
    }

    // Direction in which pawns advance.
    pub fn forward(self) -> i8 {
        match self {
            Force::White => 1,
            Force::Black => -1,
        }
    }
}

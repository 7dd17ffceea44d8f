use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::coord::BoardShape;


#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, EnumString, IntoStaticStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum StartingPosition {
    Standard,
    Small,
    RookTutorial,
    KnightTutorial,
    PawnTutorial,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub starting_position: StartingPosition,
    // Whether a pawn that has not moved yet may advance by two squares.
    pub pawn_double_step: bool,
    // Whether a pawn reaching the last rank becomes a queen.
    pub pawn_promotion: bool,
}

impl StartingPosition {
    pub fn board_shape(self) -> BoardShape {
        match self {
            StartingPosition::Standard => BoardShape::new(8),
            StartingPosition::Small => BoardShape::new(5),
            StartingPosition::RookTutorial => BoardShape::new(4),
            StartingPosition::KnightTutorial => BoardShape::new(5),
            StartingPosition::PawnTutorial => BoardShape::new(5),
        }
    }

    pub fn has_pawns(self) -> bool {
        match self {
            StartingPosition::Standard | StartingPosition::Small | StartingPosition::PawnTutorial => {
                true
            }
            StartingPosition::RookTutorial | StartingPosition::KnightTutorial => false,
        }
    }
}

impl Rules {
    pub fn standard() -> Self { Self::for_variant(StartingPosition::Standard) }

    pub fn for_variant(starting_position: StartingPosition) -> Self {
        Rules {
            starting_position,
            // Reduced boards are too cramped for the double step.
            pawn_double_step: starting_position == StartingPosition::Standard,
            pawn_promotion: true,
        }
    }

    pub fn board_shape(&self) -> BoardShape { self.starting_position.board_shape() }

    pub fn verify(&self) -> Result<(), String> {
        if self.pawn_double_step && self.board_shape().size < 6 {
            return Err(format!(
                "Pawn double step requires a board of at least 6x6, got {}x{}",
                self.board_shape().size,
                self.board_shape().size
            ));
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn variant_defaults_are_valid() {
        for starting_position in StartingPosition::iter() {
            Rules::for_variant(starting_position).verify().unwrap();
        }
        assert!(Rules::standard().pawn_double_step);
        assert!(!Rules::for_variant(StartingPosition::Small).pawn_double_step);
    }

    #[test]
    fn double_step_on_small_board_is_rejected() {
        let rules = Rules {
            pawn_double_step: true,
            ..Rules::for_variant(StartingPosition::Small)
        };
        assert!(rules.verify().is_err());
    }

    #[test]
    fn variant_names() {
        assert_eq!(StartingPosition::from_str("rook-tutorial").unwrap(), StartingPosition::RookTutorial);
        let name: &'static str = StartingPosition::KnightTutorial.into();
        assert_eq!(name, "knight-tutorial");
    }

    #[test]
    fn serialized_rules_use_variant_names() {
        let rules = Rules::for_variant(StartingPosition::PawnTutorial);
        let json = serde_json::to_string(&rules).unwrap();
        assert!(json.contains(r#""starting_position":"pawn-tutorial""#), "{json}");
        assert_eq!(serde_json::from_str::<Rules>(&json).unwrap(), rules);
    }
}

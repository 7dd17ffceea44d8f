use serde::{Deserialize, Serialize};


// Errors a caller can avoid by consulting the query surface first (`can_make_move_from_board`,
// `moveable_positions`, `turn_complete`, `undoable`). A failed call never changes game state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TurnError {
    InvalidNotation,
    NoSuchBoard,
    OutOfBounds,
    PieceMissing,
    WrongTurnOrder,
    BoardNotMoveable,
    NoMovesToSubmit,
    TurnIncomplete,
    NothingToUndo,
    GameOver,
}

#[macro_export]
macro_rules! internal_error_message {
    () => {
        format!("Internal error at {}:{}.", file!(), line!())
    };
    ($($arg:tt)+) => {
        format!("Internal error at {}:{}: {}.", file!(), line!(), format!($($arg)*))
    };
}

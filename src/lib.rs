#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod coord;
pub mod error;
pub mod force;
pub mod game;
pub mod grid;
pub mod movegen;
pub mod notation;
pub mod piece;
pub mod rules;
pub mod starter;
pub mod test_util;
pub mod timeline;
pub mod util;

pub use board::{Board, BoardId, FullTurn, HalfTurn};
pub use coord::{BoardShape, Col, Coord, Row};
pub use error::TurnError;
pub use force::Force;
pub use game::{Game, GameStatus, Move, SelectedPosition, TurnRecord, VictoryReason};
pub use grid::{Grid, GridItem};
pub use piece::{PieceKind, PieceOnBoard};
pub use rules::{Rules, StartingPosition};
pub use timeline::{Timeline, TimelineId};

pub mod turn;

pub use turn::{ChatTurn, TurnRole};

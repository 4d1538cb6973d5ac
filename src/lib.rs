pub mod ai;
pub mod board;
pub mod game;
pub mod player;

pub use ai::{RolloutTally, DEFAULT_ROLLOUT_BUDGET, DEFAULT_SEARCH_DEPTH};
pub use board::{Board, MoveError};
pub use game::{Game, GameState};
pub use player::Player;

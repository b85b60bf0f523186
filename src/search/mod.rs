pub mod engine;
pub mod rank;
pub mod safety;

pub use engine::Engine;
pub use rank::{RankPass, RankedMoves, Ranker};

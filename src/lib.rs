// Ultimate tic-tac-toe bot: board model, rule-chain move selection, protocol session
pub mod board;
pub mod config;
pub mod error;
pub mod protocol;
pub mod search;

pub use board::{Cell, CompositeBoard, MacroBoard, MacroStatus, Microboard, Move, Player};
pub use config::{DisabledScoring, EngineConfig, SafetyMode};
pub use error::{Error, Result};
pub use search::Engine;

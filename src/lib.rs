//! BLOCKFALL - a falling-block puzzle game
//!
//! The simulation core (`board`, `tetromino`, `randomizer`, `piece`, `kick`,
//! `score`, `game`) is pure and driven entirely by commands and elapsed time.
//! `settings`, `input`, `audio` and `ui` are the host-side collaborators used
//! by the terminal binary.

pub mod audio;
pub mod board;
pub mod game;
pub mod input;
pub mod kick;
pub mod piece;
pub mod randomizer;
pub mod score;
pub mod settings;
pub mod tetromino;
pub mod ui;

pub use board::Board;
pub use game::{Action, Game, GameEvent, GameSnapshot, GameState};
pub use piece::{Piece, Position};
pub use settings::{ConfigError, GameConfig, Settings, SettingsError};
pub use tetromino::TetrominoType;

//! Configuration errors reported at the engine boundary.
//!
//! Illegal moves are not errors (they report `false`); only configuration that
//! the engine cannot accept ends up here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board height {height} outside {min}..={max}")]
    InvalidBoardHeight { height: u8, min: u8, max: u8 },

    #[error("fall speed {ms}ms outside {min}..={max}ms")]
    InvalidFallSpeed { ms: u32, min: u32, max: u32 },

    #[error("board height cannot change while rows are being cleared")]
    AnimationActive,

    #[error("invalid value {value:?} for {var}")]
    InvalidEnvValue { var: &'static str, value: String },
}

//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds every rule of the game: the board, pieces, the seeded piece
//! source, same-color region analysis, scoring, the line-clear animation and the
//! controller that ties them together. It has **no dependencies** on rendering,
//! input devices, or timers; the host drives it with plain method calls.
//!
//! # Module Structure
//!
//! - [`board`]: 10-wide board of configurable height, collision and row compaction
//! - [`pieces`]: Tetromino shapes and SRS rotation with wall kicks
//! - [`rng`]: 7-bag piece source with a per-piece color
//! - [`regions`]: Same-color flood fill, highlights and per-color chains
//! - [`scoring`]: Region points, per-color breakdown and chain bonus tiers
//! - [`animation`]: LineBlink → PushDown → Idle state machine
//! - [`game_state`]: The controller (modes, input, locking, timers)
//! - [`snapshot`]: Serializable render view
//! - [`config`] / [`error`]: Engine configuration and its validation errors
//!
//! # Game Rules
//!
//! - Pieces are one of three colors (cyan, magenta, yellow)
//! - When a piece locks, every same-color region touching it with at least
//!   `REGION_THRESHOLD` members scores `10 * n * n` points for its color
//! - Each color keeps a chain: consecutive locks that produced a region of that color
//! - Full rows blink, are removed, and the board settles before the next piece spawns
//!
//! # Example
//!
//! ```
//! use thud_and_tile_core::GameState;
//! use thud_and_tile_types::{GameMode, InputCode};
//!
//! let mut game = GameState::new();
//! game.start_game();
//! assert_eq!(game.mode(), GameMode::Playing);
//!
//! game.handle_input(InputCode::MoveRight);
//! game.handle_input(InputCode::RotateClockwise);
//! game.handle_input(InputCode::HardDrop);
//!
//! assert_eq!(game.pieces_locked(), 1);
//! ```
//!
//! # Timing
//!
//! The host owns two clocks:
//! - **Fall timer**: call [`GameState::auto_fall`] every `fall_speed_ms` (1000ms default)
//! - **Animation timer**: call [`GameState::advance_animation`] with the elapsed
//!   milliseconds, e.g. every 16ms

pub mod animation;
pub mod board;
pub mod config;
pub mod error;
pub mod game_state;
pub mod pieces;
pub mod regions;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use thud_and_tile_types as types;

/// Engine version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export commonly used types for convenience
pub use animation::{Animation, AnimationEvent, AnimationInfo};
pub use board::{Board, ResizeOutcome, RowList};
pub use config::EngineConfig;
pub use error::ConfigError;
pub use game_state::GameState;
pub use pieces::{get_shape, try_rotate, Tetromino};
pub use regions::{analyze_lock, ChainCounters, LockAnalysis, Region};
pub use rng::{PieceQueue, PieceSpec, SimpleRng};
pub use scoring::{base_value, chain_bonus_tier, ColorScore, ScoreBoard};
pub use snapshot::{flatten_piece_cells, ActiveSnapshot, GameSnapshot, PieceCell};

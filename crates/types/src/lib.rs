//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behavior beyond small conversions, making them
//! usable in any context (core logic, host rendering, serialization).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9), fixed
//! - **Height**: 20 rows by default, configurable within `MIN_BOARD_HEIGHT..=MAX_BOARD_HEIGHT`
//! - **Origin**: `(0, 0)` is the top-left cell, `y` grows downward
//! - **Spawn anchor**: `(3, 0)`
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `ANIMATION_TICK_MS` | 16 | Suggested animation timer period (~60 FPS) |
//! | `DEFAULT_FALL_SPEED_MS` | 1000 | Default auto-fall interval |
//! | `BLINK_INTERVAL_MS` | 120 | One blink phase of a cleared row |
//! | `BLINK_REPEAT_LIMIT` | 6 | Blink phases before compaction |
//! | `PUSH_DOWN_SETTLE_MS` | 150 | Settle time after compaction |
//!
//! # Examples
//!
//! ```
//! use thud_and_tile_types::{CellColor, InputCode, Rotation, BOARD_WIDTH};
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(InputCode::from_code(5), Some(InputCode::HardDrop));
//! assert_eq!(CellColor::from_index(2), Some(CellColor::Yellow));
//! assert_eq!(BOARD_WIDTH, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells (20 rows)
pub const DEFAULT_BOARD_HEIGHT: u8 = 20;

/// Smallest accepted board height
pub const MIN_BOARD_HEIGHT: u8 = 8;

/// Largest accepted board height
pub const MAX_BOARD_HEIGHT: u8 = 40;

/// Spawn anchor `(x, y)` for every new piece
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

/// Suggested period for the host's animation timer
pub const ANIMATION_TICK_MS: u32 = 16;

/// Default auto-fall interval
pub const DEFAULT_FALL_SPEED_MS: u32 = 1000;

/// Fastest accepted auto-fall interval
pub const MIN_FALL_SPEED_MS: u32 = 50;

/// Slowest accepted auto-fall interval
pub const MAX_FALL_SPEED_MS: u32 = 5000;

/// Duration of one blink phase while full rows are highlighted
pub const BLINK_INTERVAL_MS: u32 = 120;

/// Number of blink phases before the cleared rows are compacted
pub const BLINK_REPEAT_LIMIT: u32 = 6;

/// Time the board settles after compaction before play resumes
pub const PUSH_DOWN_SETTLE_MS: u32 = 150;

/// Minimum member count for a same-color region to score.
///
/// A lone tetromino covers four cells, so a group only qualifies once it
/// joins settled cells of its own color.
pub const REGION_THRESHOLD: usize = 5;

/// Points per cell factor of the region score, `POINTS_PER_CELL * n * n`
pub const POINTS_PER_CELL: u32 = 10;

/// Chain lengths at which the chain bonus tier steps up
pub const CHAIN_BONUS_STEPS: [u32; 4] = [2, 4, 7, 10];

/// Cell codes used by the flat board encoding
pub const CELL_CODE_EMPTY: u8 = 0;
pub const CELL_CODE_CONNECTED_OFFSET: u8 = 9;
pub const CELL_CODE_SOLID: u8 = 21;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven shapes in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Catalog index (0..7), used by flat encodings
    pub fn index(&self) -> u8 {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North**: Spawn orientation (state 0)
/// - **East**: Rotated 90° clockwise (state 1)
/// - **South**: Rotated 180° (state 2)
/// - **West**: Rotated 90° counter-clockwise (state 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotation state number (0-3)
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// The three piece colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellColor {
    Cyan,
    Magenta,
    Yellow,
}

impl CellColor {
    pub const ALL: [CellColor; 3] = [CellColor::Cyan, CellColor::Magenta, CellColor::Yellow];

    /// Color index (0 = Cyan, 1 = Magenta, 2 = Yellow)
    pub fn index(&self) -> usize {
        match self {
            CellColor::Cyan => 0,
            CellColor::Magenta => 1,
            CellColor::Yellow => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CellColor::Cyan => "cyan",
            CellColor::Magenta => "magenta",
            CellColor::Yellow => "yellow",
        }
    }
}

/// Distinguishes normal settled cells from highlighted and obstacle cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellFlag {
    /// Settled piece cell
    Normal,
    /// Settled piece cell that belongs to a qualifying region
    Connected,
    /// Obstacle; blocks pieces and fills rows but never joins a region
    Solid,
}

/// A settled block on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub color: CellColor,
    pub flag: CellFlag,
}

impl Block {
    pub fn normal(color: CellColor) -> Self {
        Self {
            color,
            flag: CellFlag::Normal,
        }
    }

    pub fn solid(color: CellColor) -> Self {
        Self {
            color,
            flag: CellFlag::Solid,
        }
    }

    pub fn is_solid(&self) -> bool {
        self.flag == CellFlag::Solid
    }

    /// Flat cell code (see `CELL_CODE_*`)
    pub fn code(&self) -> u8 {
        let base = self.color.index() as u8 + 1;
        match self.flag {
            CellFlag::Normal => base,
            CellFlag::Connected => base + CELL_CODE_CONNECTED_OFFSET,
            CellFlag::Solid => CELL_CODE_SOLID,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Block)`: Settled block
pub type Cell = Option<Block>;

/// Flat code for a cell (0 when empty)
pub fn cell_code(cell: Cell) -> u8 {
    cell.map_or(CELL_CODE_EMPTY, |b| b.code())
}

/// Fixed input code table
///
/// | Code | Input |
/// |------|-------|
/// | 0 | MoveLeft |
/// | 1 | MoveRight |
/// | 2 | SoftDrop |
/// | 3 | RotateClockwise |
/// | 4 | RotateCounterClockwise |
/// | 5 | HardDrop |
/// | 6 | Restart |
/// | 7 | Quit |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputCode {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateClockwise,
    RotateCounterClockwise,
    HardDrop,
    Restart,
    Quit,
}

impl InputCode {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(InputCode::MoveLeft),
            1 => Some(InputCode::MoveRight),
            2 => Some(InputCode::SoftDrop),
            3 => Some(InputCode::RotateClockwise),
            4 => Some(InputCode::RotateCounterClockwise),
            5 => Some(InputCode::HardDrop),
            6 => Some(InputCode::Restart),
            7 => Some(InputCode::Quit),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            InputCode::MoveLeft => 0,
            InputCode::MoveRight => 1,
            InputCode::SoftDrop => 2,
            InputCode::RotateClockwise => 3,
            InputCode::RotateCounterClockwise => 4,
            InputCode::HardDrop => 5,
            InputCode::Restart => 6,
            InputCode::Quit => 7,
        }
    }

    /// Parse from the camelCase name (case-insensitive)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(InputCode::MoveLeft),
            "moveright" => Some(InputCode::MoveRight),
            "softdrop" => Some(InputCode::SoftDrop),
            "rotateclockwise" | "rotatecw" => Some(InputCode::RotateClockwise),
            "rotatecounterclockwise" | "rotateccw" => Some(InputCode::RotateCounterClockwise),
            "harddrop" => Some(InputCode::HardDrop),
            "restart" => Some(InputCode::Restart),
            "quit" => Some(InputCode::Quit),
            _ => None,
        }
    }
}

/// Top-level game mode
///
/// Transitions: Title → Playing (start), Playing → GameOver (spawn collision),
/// GameOver → Playing (restart).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    Title,
    Playing,
    GameOver,
}

impl GameMode {
    /// Numeric mode (0 = Title, 1 = Playing, 2 = GameOver)
    pub fn code(&self) -> u8 {
        match self {
            GameMode::Title => 0,
            GameMode::Playing => 1,
            GameMode::GameOver => 2,
        }
    }
}

/// A qualifying region credited by one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionResult {
    pub color: CellColor,
    pub member_count: usize,
}

/// Core-side event emitted after a piece locks.
///
/// Hosts consume it with `GameState::take_last_event` for logging or effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub color: CellColor,
    pub regions: Vec<RegionResult>,
    pub score_delta: u32,
    /// Chain counters (cyan, magenta, yellow) after this lock
    pub chains: [u32; 3],
    /// Full rows queued for the line-clear animation
    pub full_rows: Vec<usize>,
    pub game_over: bool,
}

//! Thud & Tile (workspace facade crate).
//!
//! Re-exports the engine crates under `crates/` as `thud_and_tile::{core,types}`.

pub use thud_and_tile_core as core;
pub use thud_and_tile_types as types;

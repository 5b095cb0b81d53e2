//! Snapshot tests - render view contents and JSON encoding

use thud_and_tile::core::{flatten_piece_cells, AnimationInfo, GameSnapshot, GameState, Tetromino};
use thud_and_tile::types::{
    Block, CellColor, GameMode, PieceKind, Rotation, BOARD_WIDTH, CELL_CODE_SOLID,
};

#[test]
fn test_snapshot_reflects_board_and_piece() {
    let mut game = GameState::new();
    game.start_game();
    assert!(game.place_solid(0, 19, CellColor::Cyan));
    assert!(game.place_block(1, 19, Block::normal(CellColor::Magenta)));

    let snap = game.snapshot();
    assert_eq!(snap.mode, GameMode::Playing);
    assert_eq!(snap.width, BOARD_WIDTH);
    assert_eq!(snap.cell_code(0, 19), Some(CELL_CODE_SOLID));
    assert_eq!(snap.cell_code(1, 19), Some(2));
    assert_eq!(snap.current_cells.len(), 4);
    assert_eq!(snap.next_cells.len(), 4);
    assert_eq!(snap.ghost_cells.len(), 4);
    assert_eq!(snap.animation, AnimationInfo::Idle);
    assert!(snap.playable());
    assert_eq!(snap.active.map(|a| a.color), game.active().map(|a| a.color));
}

#[test]
fn test_snapshot_during_line_blink() {
    let mut game = GameState::new();
    game.start_game();
    for x in 4..BOARD_WIDTH as i8 {
        assert!(game.place_solid(x, 19, CellColor::Yellow));
    }
    let flat_i = Tetromino {
        kind: PieceKind::I,
        color: CellColor::Cyan,
        rotation: Rotation::North,
        x: 0,
        y: 10,
    };
    assert!(game.place_active(flat_i));
    game.hard_drop();

    let snap = game.snapshot();
    assert!(!snap.playable());
    assert!(snap.current_cells.is_empty());
    assert_eq!(snap.animation.to_flat(), vec![1, 0, 0, 1, 19]);
}

#[test]
fn test_piece_cells_flatten_to_triples() {
    let piece = Tetromino::new(PieceKind::T, CellColor::Yellow);
    let cells = thud_and_tile::core::PieceCell::of(piece);
    assert_eq!(
        flatten_piece_cells(&cells),
        vec![4, 0, 2, 3, 1, 2, 4, 1, 2, 5, 1, 2]
    );
}

#[test]
fn test_snapshot_json_round_trip() {
    let mut game = GameState::new();
    game.start_game();
    game.hard_drop();

    let snap = game.snapshot();
    let json = serde_json::to_string(&snap).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["mode"], "Playing");
    assert_eq!(parsed["animation"]["type"], "idle");

    let back: GameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snap);
}

#[test]
fn test_lock_event_serializes() {
    let mut game = GameState::new();
    game.start_game();
    game.hard_drop();

    let event = game.take_last_event().unwrap();
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["chains"], serde_json::json!([0, 0, 0]));
    assert!(game.take_last_event().is_none());
}

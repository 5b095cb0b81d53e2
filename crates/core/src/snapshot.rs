use serde::{Deserialize, Serialize};

use crate::animation::AnimationInfo;
use crate::pieces::Tetromino;
use crate::scoring::ColorScore;
use crate::types::{CellColor, GameMode, PieceKind, Rotation, BOARD_WIDTH, DEFAULT_BOARD_HEIGHT};

/// One mino of a piece, in board coordinates (or preview coordinates for the next piece)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceCell {
    pub x: i8,
    pub y: i8,
    pub color: CellColor,
}

impl PieceCell {
    pub fn of(piece: Tetromino) -> Vec<PieceCell> {
        piece
            .cells()
            .iter()
            .map(|&(x, y)| PieceCell {
                x,
                y,
                color: piece.color,
            })
            .collect()
    }
}

/// `[x, y, color_index, ...]` triples
pub fn flatten_piece_cells(cells: &[PieceCell]) -> Vec<i32> {
    cells
        .iter()
        .flat_map(|c| [c.x as i32, c.y as i32, c.color.index() as i32])
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub color: CellColor,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            color: value.color,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub mode: GameMode,
    pub width: u8,
    pub height: u8,
    /// Row-major cell codes, `width * height` entries
    pub board: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    pub current_cells: Vec<PieceCell>,
    pub next_cells: Vec<PieceCell>,
    pub ghost_cells: Vec<PieceCell>,
    pub score: u32,
    pub colors: [ColorScore; 3],
    pub chain_bonus: u32,
    pub animation: AnimationInfo,
    pub fall_speed_ms: u32,
    pub lines_cleared: u32,
    pub pieces_locked: u32,
}

impl GameSnapshot {
    /// Cell code at (x, y); None when outside the board
    pub fn cell_code(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        self.board.get(y * self.width as usize + x).copied()
    }

    pub fn playable(&self) -> bool {
        self.mode == GameMode::Playing && self.animation == AnimationInfo::Idle
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            mode: GameMode::Title,
            width: BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            board: vec![0; BOARD_WIDTH as usize * DEFAULT_BOARD_HEIGHT as usize],
            active: None,
            current_cells: Vec::new(),
            next_cells: Vec::new(),
            ghost_cells: Vec::new(),
            score: 0,
            colors: [ColorScore::default(); 3],
            chain_bonus: 0,
            animation: AnimationInfo::Idle,
            fall_speed_ms: 0,
            lines_cleared: 0,
            pieces_locked: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_cells_follow_piece() {
        let piece = Tetromino::new(PieceKind::O, CellColor::Magenta);
        let cells = PieceCell::of(piece);
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|c| c.color == CellColor::Magenta));
        assert_eq!(
            flatten_piece_cells(&cells[..1]),
            vec![cells[0].x as i32, cells[0].y as i32, 1]
        );
    }

    #[test]
    fn test_cell_code_bounds() {
        let snap = GameSnapshot::default();
        assert_eq!(snap.cell_code(0, 0), Some(0));
        assert_eq!(snap.cell_code(10, 0), None);
        assert_eq!(snap.cell_code(0, 20), None);
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let snap = GameSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}

//! Game state module - the controller that owns every piece of session state
//!
//! This module ties together the board, pieces, piece source, region analyzer,
//! scoring and the line-clear animation. The host serializes three event
//! sources into calls on one `GameState`:
//!
//! - discrete input ([`GameState::handle_input`])
//! - the fall timer ([`GameState::auto_fall`], every `fall_speed_ms`)
//! - the animation timer ([`GameState::advance_animation`], e.g. every 16ms)
//!
//! While a line-clear animation runs there is no active piece and nothing can
//! lock; the next piece spawns once the animation is back to Idle.

use crate::animation::{Animation, AnimationEvent, AnimationInfo};
use crate::board::{Board, ResizeOutcome};
use crate::config::{validate_fall_speed, EngineConfig};
use crate::error::ConfigError;
use crate::pieces::{try_rotate, Tetromino};
use crate::regions::{analyze_lock, connected_cell_labels, refresh_highlights, ChainCounters};
use crate::rng::{PieceQueue, PieceSpec};
use crate::scoring::ScoreBoard;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, PieceCell};
use crate::types::{Block, CellColor, GameMode, InputCode, LockEvent, Rotation, BOARD_WIDTH};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    mode: GameMode,
    active: Option<Tetromino>,
    next: PieceSpec,
    piece_queue: PieceQueue,
    chains: ChainCounters,
    score: ScoreBoard,
    animation: Animation,
    fall_speed_ms: u32,
    lines_cleared: u32,
    pieces_locked: u32,
    /// Last lock event (consumed by observers)
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a game in Title mode with the default configuration
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let mut piece_queue = PieceQueue::new(config.seed);
        let next = piece_queue.draw();
        Self {
            board: Board::new(config.board_height),
            mode: GameMode::Title,
            active: None,
            next,
            piece_queue,
            chains: ChainCounters::new(),
            score: ScoreBoard::new(),
            animation: Animation::Idle,
            fall_speed_ms: config.fall_speed_ms,
            lines_cleared: 0,
            pieces_locked: 0,
            last_event: None,
        }
    }

    /// Start (or restart) a round: clears the board, score and chains, draws
    /// the current and next pieces from the seed, and enters Playing.
    pub fn start_game(&mut self) {
        self.board.clear();
        self.piece_queue = PieceQueue::new(self.piece_queue.seed());
        self.next = self.piece_queue.draw();
        self.active = None;
        self.chains.reset();
        self.score = ScoreBoard::new();
        self.animation = Animation::Idle;
        self.lines_cleared = 0;
        self.pieces_locked = 0;
        self.last_event = None;
        self.mode = GameMode::Playing;
        self.spawn_piece();
    }

    /// Replace the seed used by the next [`GameState::start_game`]
    pub fn set_seed(&mut self, seed: u32) {
        self.piece_queue = PieceQueue::new(seed);
        self.next = self.piece_queue.draw();
    }

    /// Spawn the queued piece at the spawn anchor.
    ///
    /// A blocked spawn ends the round (Playing → GameOver) and returns false.
    fn spawn_piece(&mut self) -> bool {
        let spec = self.next;
        self.next = self.piece_queue.draw();

        self.active = Tetromino::spawn(spec.kind, spec.color, &self.board);
        if self.active.is_none() {
            self.mode = GameMode::GameOver;
            return false;
        }
        true
    }

    /// Playing, animation idle, and a piece to control
    fn accepts_piece_actions(&self) -> bool {
        self.mode == GameMode::Playing && self.animation.is_idle() && self.active.is_some()
    }

    /// Dispatch one input code. Returns whether anything changed.
    ///
    /// `Restart` always restarts. `Quit` is left to the host and reports false.
    pub fn handle_input(&mut self, input: InputCode) -> bool {
        match input {
            InputCode::Restart => {
                self.start_game();
                true
            }
            InputCode::Quit => false,
            _ if !self.accepts_piece_actions() => false,
            InputCode::MoveLeft => self.try_move(-1, 0),
            InputCode::MoveRight => self.try_move(1, 0),
            InputCode::SoftDrop => self.soft_drop(),
            InputCode::RotateClockwise => self.try_rotate(true),
            InputCode::RotateCounterClockwise => self.try_rotate(false),
            InputCode::HardDrop => self.hard_drop().is_some(),
        }
    }

    /// [`GameState::handle_input`] for a raw code; unknown codes are ignored
    pub fn handle_input_code(&mut self, code: u8) -> bool {
        InputCode::from_code(code).is_some_and(|input| self.handle_input(input))
    }

    /// Translate the active piece if the target is in bounds and free
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.accepts_piece_actions() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match active.translated(dx, dy) {
            Some(moved) if moved.is_valid(&self.board) => {
                self.active = Some(moved);
                true
            }
            _ => false,
        }
    }

    /// Rotate with SRS wall kicks; state is untouched when every kick is blocked
    pub fn try_rotate(&mut self, clockwise: bool) -> bool {
        if !self.accepts_piece_actions() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let result = try_rotate(
            active.kind,
            active.rotation,
            active.x,
            active.y,
            clockwise,
            |x, y| self.board.is_valid(x, y),
        );

        let Some((rotation, (dx, dy))) = result else {
            return false;
        };
        match (Tetromino { rotation, ..active }).translated(dx, dy) {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// One row down, locking when blocked
    pub fn soft_drop(&mut self) -> bool {
        if !self.accepts_piece_actions() {
            return false;
        }
        self.try_move(0, 1) || self.lock_piece()
    }

    /// Drop to the resting position and lock.
    /// Returns the rows descended, or None when no drop was possible.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if !self.accepts_piece_actions() {
            return None;
        }
        let active = self.active?;

        let distance = active.drop_distance(&self.board);
        self.active = Some(active.projected(&self.board));
        self.lock_piece();
        Some(distance as u32)
    }

    /// Fall-timer tick: one row down, or lock when blocked.
    /// Returns whether any state changed.
    pub fn auto_fall(&mut self) -> bool {
        if !self.accepts_piece_actions() {
            return false;
        }
        self.try_move(0, 1) || self.lock_piece()
    }

    /// Lock the active piece where it is.
    ///
    /// Writes the cells, scores the regions through them, then either starts
    /// the line-clear animation or spawns the next piece.
    pub fn lock_piece(&mut self) -> bool {
        if !self.accepts_piece_actions() {
            return false;
        }
        let Some(active) = self.active.take() else {
            return false;
        };

        let cells = active.cells();
        self.board.write_cells(&cells, active.color);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let analysis = analyze_lock(&self.board, &cells, &mut self.chains);
        let score_delta = self.score.award(&analysis);
        refresh_highlights(&mut self.board);

        let full_rows = self.board.full_rows();
        if full_rows.is_empty() {
            self.spawn_piece();
        } else {
            self.animation = Animation::line_blink(full_rows.clone());
        }

        self.last_event = Some(LockEvent {
            kind: active.kind,
            color: active.color,
            regions: analysis.regions,
            score_delta,
            chains: analysis.chains,
            full_rows: full_rows.to_vec(),
            game_over: self.mode == GameMode::GameOver,
        });
        true
    }

    /// Animation-timer tick. Returns whether anything changed.
    pub fn advance_animation(&mut self, elapsed_ms: u32) -> bool {
        match self.animation.advance(elapsed_ms) {
            AnimationEvent::None => false,
            AnimationEvent::Blinked => true,
            AnimationEvent::Compact(rows) => {
                let removed = self.board.compact(&rows);
                self.lines_cleared = self.lines_cleared.wrapping_add(removed as u32);
                refresh_highlights(&mut self.board);
                true
            }
            AnimationEvent::Finished => {
                if self.mode == GameMode::Playing && self.active.is_none() {
                    self.spawn_piece();
                }
                true
            }
        }
    }

    pub fn set_fall_speed_ms(&mut self, ms: u32) -> Result<(), ConfigError> {
        validate_fall_speed(ms)?;
        self.fall_speed_ms = ms;
        Ok(())
    }

    /// Resize the board (see [`Board::set_height`] for what happens to cells).
    ///
    /// Rejected while rows are being cleared. During play the active piece goes
    /// back to the spawn anchor; if it no longer fits the round ends.
    pub fn set_board_height(&mut self, height: u8) -> Result<ResizeOutcome, ConfigError> {
        if !self.animation.is_idle() {
            return Err(ConfigError::AnimationActive);
        }
        let outcome = self.board.set_height(height)?;
        refresh_highlights(&mut self.board);

        if let Some(active) = self.active {
            self.active = Tetromino::spawn(active.kind, active.color, &self.board);
            if self.active.is_none() {
                self.mode = GameMode::GameOver;
            }
        }
        Ok(outcome)
    }

    /// Place the active piece directly (puzzle setups and tests).
    /// Fails unless the piece fits and a piece is currently controllable.
    pub fn place_active(&mut self, piece: Tetromino) -> bool {
        if !self.accepts_piece_actions() || !piece.is_valid(&self.board) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Place a settled block for puzzle setups.
    ///
    /// Refused while rows are being cleared, outside the board, on a filled
    /// cell, under the active piece, or when it would complete a row (rows
    /// only fill through locks, which start the clear animation).
    pub fn place_block(&mut self, x: i8, y: i8, block: Block) -> bool {
        if !self.animation.is_idle() || !self.board.is_valid(x, y) {
            return false;
        }
        if self.active.is_some_and(|piece| piece.cells().contains(&(x, y))) {
            return false;
        }

        self.board.set(x, y, Some(block));
        if self.board.is_row_full(y as usize) {
            self.board.set(x, y, None);
            return false;
        }
        refresh_highlights(&mut self.board);
        true
    }

    /// Place an obstacle cell (see [`GameState::place_block`])
    pub fn place_solid(&mut self, x: i8, y: i8, color: CellColor) -> bool {
        self.place_block(x, y, Block::solid(color))
    }

    // ---- queries ----

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_dimensions(&self) -> (u8, u8) {
        (BOARD_WIDTH, self.board.height())
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn next_piece(&self) -> PieceSpec {
        self.next
    }

    /// Where the active piece would rest after a hard drop
    pub fn ghost_piece(&self) -> Option<Tetromino> {
        self.active.map(|piece| piece.projected(&self.board))
    }

    pub fn current_cells(&self) -> Vec<PieceCell> {
        self.active.map(PieceCell::of).unwrap_or_default()
    }

    /// Next piece in rotation 0, relative to its own origin
    pub fn next_cells(&self) -> Vec<PieceCell> {
        PieceCell::of(Tetromino {
            kind: self.next.kind,
            color: self.next.color,
            rotation: Rotation::North,
            x: 0,
            y: 0,
        })
    }

    pub fn ghost_cells(&self) -> Vec<PieceCell> {
        self.ghost_piece().map(PieceCell::of).unwrap_or_default()
    }

    pub fn score(&self) -> u32 {
        self.score.total()
    }

    pub fn score_board(&self) -> &ScoreBoard {
        &self.score
    }

    pub fn chain(&self, color: CellColor) -> u32 {
        self.chains.get(color)
    }

    pub fn chains(&self) -> [u32; 3] {
        self.chains.as_array()
    }

    pub fn chain_bonus_tier(&self) -> u32 {
        self.score.chain_bonus_tier()
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn animation_info(&self) -> AnimationInfo {
        self.animation.info()
    }

    pub fn fall_speed_ms(&self) -> u32 {
        self.fall_speed_ms
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn seed(&self) -> u32 {
        self.piece_queue.seed()
    }

    /// `[x, y, count, ...]` labels of qualifying regions
    pub fn connected_cells_info(&self) -> Vec<i32> {
        connected_cell_labels(&self.board)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.mode = self.mode;
        out.width = BOARD_WIDTH;
        out.height = self.board.height();
        out.board.clear();
        out.board.extend(self.board.cells().iter().map(|&c| crate::types::cell_code(c)));
        out.active = self.active.map(ActiveSnapshot::from);
        out.current_cells = self.current_cells();
        out.next_cells = self.next_cells();
        out.ghost_cells = self.ghost_cells();
        out.score = self.score.total();
        out.colors = self.score.colors();
        out.chain_bonus = self.score.chain_bonus_tier();
        out.animation = self.animation.info();
        out.fall_speed_ms = self.fall_speed_ms;
        out.lines_cleared = self.lines_cleared;
        out.pieces_locked = self.pieces_locked;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, SPAWN_POSITION};

    fn playing() -> GameState {
        let mut state = GameState::new();
        state.start_game();
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new();
        assert_eq!(state.mode, GameMode::Title);
        assert!(state.active.is_none());
        assert_eq!(state.score(), 0);
        assert!(state.animation.is_idle());
    }

    #[test]
    fn test_start_game_spawns_current_and_next() {
        let state = playing();
        assert_eq!(state.mode, GameMode::Playing);
        let active = state.active.unwrap();
        assert_eq!((active.x, active.y), SPAWN_POSITION);
        assert_eq!(active.rotation, Rotation::North);
    }

    #[test]
    fn test_next_piece_becomes_current_after_lock() {
        let mut state = playing();
        let next = state.next_piece();
        assert!(state.hard_drop().is_some());

        let active = state.active.unwrap();
        assert_eq!((active.kind, active.color), (next.kind, next.color));
    }

    #[test]
    fn test_input_ignored_in_title() {
        let mut state = GameState::new();
        assert!(!state.handle_input(InputCode::MoveLeft));
        assert!(!state.auto_fall());
        assert_eq!(state.mode, GameMode::Title);
    }

    #[test]
    fn test_quit_is_not_handled() {
        let mut state = playing();
        let before = state.active;
        assert!(!state.handle_input(InputCode::Quit));
        assert_eq!(state.active, before);
    }

    #[test]
    fn test_try_move_respects_walls() {
        let mut state = playing();
        let mut moved = 0;
        for _ in 0..12 {
            if state.try_move(-1, 0) {
                moved += 1;
            }
        }
        assert!(moved <= 4);
        assert!(state.active.unwrap().is_valid(&state.board));
    }

    #[test]
    fn test_auto_fall_moves_then_locks() {
        let mut state = playing();
        let start_y = state.active.unwrap().y;
        assert!(state.auto_fall());
        assert_eq!(state.active.unwrap().y, start_y + 1);

        let mut guard = 0;
        while state.pieces_locked == 0 && guard < 100 {
            assert!(state.auto_fall());
            guard += 1;
        }
        assert_eq!(state.pieces_locked, 1);
        assert!(state.take_last_event().is_some());
    }

    #[test]
    fn test_soft_drop_locks_when_grounded() {
        let mut state = playing();
        let piece = state.active.unwrap();
        let grounded = piece.projected(&state.board);
        assert!(state.place_active(grounded));

        assert!(state.handle_input(InputCode::SoftDrop));
        assert_eq!(state.pieces_locked, 1);
    }

    #[test]
    fn test_lock_suppressed_during_animation() {
        let mut state = playing();
        state.animation = Animation::line_blink([19].into_iter().collect());

        assert!(!state.auto_fall());
        assert!(!state.lock_piece());
        assert_eq!(state.hard_drop(), None);
        assert_eq!(state.pieces_locked, 0);
    }

    #[test]
    fn test_set_board_height_rejected_mid_animation() {
        let mut state = playing();
        state.animation = Animation::line_blink([19].into_iter().collect());
        assert_eq!(state.set_board_height(24), Err(ConfigError::AnimationActive));
        assert_eq!(state.board.height(), 20);
    }

    #[test]
    fn test_set_board_height_respawns_active() {
        let mut state = playing();
        state.try_move(0, 1);
        assert_eq!(state.set_board_height(30), Ok(ResizeOutcome::Preserved));
        assert_eq!(state.board_dimensions(), (10, 30));
        let active = state.active.unwrap();
        assert_eq!((active.x, active.y), SPAWN_POSITION);
    }

    #[test]
    fn test_fall_speed_validation() {
        let mut state = GameState::new();
        assert!(state.set_fall_speed_ms(400).is_ok());
        assert_eq!(state.fall_speed_ms(), 400);
        assert!(state.set_fall_speed_ms(0).is_err());
        assert_eq!(state.fall_speed_ms(), 400);
    }

    #[test]
    fn test_restart_replays_same_sequence() {
        let mut state = playing();
        let first = state.active.unwrap();
        state.hard_drop();
        state.handle_input(InputCode::Restart);
        assert_eq!(state.active.unwrap(), first);
        assert_eq!(state.pieces_locked, 0);
    }

    #[test]
    fn test_lock_scores_region_touching_settled_cell() {
        let mut state = playing();
        let piece = Tetromino {
            kind: PieceKind::I,
            color: CellColor::Magenta,
            rotation: Rotation::North,
            x: 0,
            y: 17,
        };
        assert!(state.place_block(4, 18, Block::normal(CellColor::Magenta)));
        assert!(state.place_active(piece));
        assert!(state.lock_piece());

        let event = state.take_last_event().unwrap();
        assert_eq!(event.regions.len(), 1);
        assert_eq!(event.regions[0].member_count, 5);
        assert_eq!(event.score_delta, 250);
        assert_eq!(state.chain(CellColor::Magenta), 1);
    }

    #[test]
    fn test_try_move_extreme_deltas_not_applied() {
        let mut state = playing();
        let before = state.active;

        assert!(!state.try_move(i8::MAX, 0));
        assert!(!state.try_move(0, i8::MIN));
        assert!(!state.try_move(i8::MIN, i8::MAX));
        assert_eq!(state.active, before);
        assert!(state.try_move(0, 1));
    }

    #[test]
    fn test_place_block_refusals() {
        let mut state = playing();
        let (x, y) = state.active.unwrap().cells()[0];

        assert!(!state.place_solid(x, y, CellColor::Cyan));
        assert!(!state.place_solid(-1, 19, CellColor::Cyan));
        assert!(state.place_solid(0, 19, CellColor::Cyan));
        assert!(!state.place_solid(0, 19, CellColor::Yellow));

        for x in 1..9 {
            assert!(state.place_solid(x, 19, CellColor::Cyan));
        }
        // The last gap would complete the row
        assert!(!state.place_solid(9, 19, CellColor::Cyan));
        assert!(state.board.is_valid(9, 19));
        assert!(state.board.full_rows().is_empty());

        state.animation = Animation::line_blink([18].into_iter().collect());
        assert!(!state.place_solid(0, 18, CellColor::Cyan));
    }
}

//! Headless runner (default binary).
//!
//! Plays one seeded round with a scripted input pattern, driving the fall and
//! animation clocks from a virtual time base. Lock events go to stderr, the
//! final snapshot is printed to stdout as JSON.
//!
//! Configuration comes from `THUD_BOARD_HEIGHT`, `THUD_FALL_SPEED_MS` and `THUD_SEED`.

use anyhow::{Context, Result};

use thud_and_tile::core::{EngineConfig, GameState};
use thud_and_tile::types::{GameMode, InputCode, ANIMATION_TICK_MS};

/// Upper bound on simulated pieces so a lucky seed still terminates
const MAX_PIECES: u32 = 500;

/// Every this many animation ticks the script sends one input
const INPUT_EVERY_TICKS: u32 = 4;

/// Input script, replayed in a loop
const SCRIPT: [InputCode; 8] = [
    InputCode::RotateClockwise,
    InputCode::MoveLeft,
    InputCode::MoveLeft,
    InputCode::HardDrop,
    InputCode::MoveRight,
    InputCode::MoveRight,
    InputCode::MoveRight,
    InputCode::HardDrop,
];

fn main() -> Result<()> {
    let config = EngineConfig::from_env().context("invalid engine configuration")?;
    eprintln!(
        "[thud] v{} seed={} height={} fall={}ms",
        thud_and_tile::core::VERSION,
        config.seed,
        config.board_height,
        config.fall_speed_ms
    );

    let mut game = GameState::with_config(config)?;
    game.start_game();
    run(&mut game);

    eprintln!("[thud] {}", game.score_board());
    let snapshot = game.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run(game: &mut GameState) {
    let mut fall_timer_ms: u32 = 0;
    let mut tick: u32 = 0;
    let mut script_pos = 0;

    while game.mode() == GameMode::Playing && game.pieces_locked() < MAX_PIECES {
        tick = tick.wrapping_add(1);
        game.advance_animation(ANIMATION_TICK_MS);

        fall_timer_ms += ANIMATION_TICK_MS;
        if fall_timer_ms >= game.fall_speed_ms() {
            fall_timer_ms = 0;
            game.auto_fall();
        }

        if tick % INPUT_EVERY_TICKS == 0 && game.animation().is_idle() {
            game.handle_input(SCRIPT[script_pos]);
            script_pos = (script_pos + 1) % SCRIPT.len();
        }

        if let Some(event) = game.take_last_event() {
            eprintln!(
                "[thud] lock #{} {}/{} regions={} +{} chains={:?} rows={:?}{}",
                game.pieces_locked(),
                event.kind.as_str(),
                event.color.as_str(),
                event.regions.len(),
                event.score_delta,
                event.chains,
                event.full_rows,
                if event.game_over { " game over" } else { "" }
            );
        }
    }
}

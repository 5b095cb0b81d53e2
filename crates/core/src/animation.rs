//! Line-clear animation state machine
//!
//! ```text
//! Idle --full rows--> LineBlink --blink limit--> PushDown --settle--> Idle
//! ```
//!
//! The machine only tracks time. It tells the caller when to compact the board
//! (`AnimationEvent::Compact`) and when play may resume (`AnimationEvent::Finished`).
//! Advancing by zero milliseconds never changes state.

use serde::{Deserialize, Serialize};

use crate::board::RowList;
use crate::types::{BLINK_INTERVAL_MS, BLINK_REPEAT_LIMIT, PUSH_DOWN_SETTLE_MS};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Animation {
    #[default]
    Idle,
    /// Full rows are flashing; renderers show them when `blink_count % 2 == 1`
    LineBlink {
        lines: RowList,
        elapsed_ms: u32,
        blink_count: u32,
    },
    /// Rows were removed; the board settles before play resumes
    PushDown { elapsed_ms: u32, cleared: usize },
}

/// Transition produced by one [`Animation::advance`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationEvent {
    None,
    Blinked,
    /// Blinking finished; remove these rows now
    Compact(RowList),
    /// Back to Idle
    Finished,
}

impl Animation {
    pub fn line_blink(lines: RowList) -> Self {
        Animation::LineBlink {
            lines,
            elapsed_ms: 0,
            blink_count: 0,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Animation::Idle)
    }

    /// Advance by `elapsed_ms`; at most one phase transition per call
    pub fn advance(&mut self, elapsed_ms: u32) -> AnimationEvent {
        match self {
            Animation::Idle => AnimationEvent::None,
            Animation::LineBlink {
                lines,
                elapsed_ms: elapsed,
                blink_count,
            } => {
                *elapsed = elapsed.saturating_add(elapsed_ms);
                let before = *blink_count;
                while *elapsed >= BLINK_INTERVAL_MS && *blink_count < BLINK_REPEAT_LIMIT {
                    *elapsed -= BLINK_INTERVAL_MS;
                    *blink_count += 1;
                }

                if *blink_count >= BLINK_REPEAT_LIMIT {
                    let rows = lines.clone();
                    *self = Animation::PushDown {
                        elapsed_ms: 0,
                        cleared: rows.len(),
                    };
                    AnimationEvent::Compact(rows)
                } else if *blink_count != before {
                    AnimationEvent::Blinked
                } else {
                    AnimationEvent::None
                }
            }
            Animation::PushDown {
                elapsed_ms: elapsed,
                ..
            } => {
                *elapsed = elapsed.saturating_add(elapsed_ms);
                if *elapsed >= PUSH_DOWN_SETTLE_MS {
                    *self = Animation::Idle;
                    AnimationEvent::Finished
                } else {
                    AnimationEvent::None
                }
            }
        }
    }

    pub fn info(&self) -> AnimationInfo {
        match self {
            Animation::Idle => AnimationInfo::Idle,
            Animation::LineBlink {
                lines,
                elapsed_ms,
                blink_count,
            } => AnimationInfo::LineBlink {
                lines: lines.to_vec(),
                elapsed_ms: *elapsed_ms,
                blink_count: *blink_count,
            },
            Animation::PushDown {
                elapsed_ms,
                cleared,
            } => AnimationInfo::PushDown {
                elapsed_ms: *elapsed_ms,
                cleared: *cleared,
            },
        }
    }
}

/// Owned animation descriptor for queries and snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnimationInfo {
    Idle,
    LineBlink {
        lines: Vec<usize>,
        elapsed_ms: u32,
        blink_count: u32,
    },
    PushDown { elapsed_ms: u32, cleared: usize },
}

impl AnimationInfo {
    /// Flat encoding for foreign hosts:
    /// `[]`, `[1, elapsed, blink_count, n, rows...]` or `[2, elapsed, cleared]`
    pub fn to_flat(&self) -> Vec<i32> {
        match self {
            AnimationInfo::Idle => Vec::new(),
            AnimationInfo::LineBlink {
                lines,
                elapsed_ms,
                blink_count,
            } => {
                let mut out = vec![1, *elapsed_ms as i32, *blink_count as i32, lines.len() as i32];
                out.extend(lines.iter().map(|&y| y as i32));
                out
            }
            AnimationInfo::PushDown {
                elapsed_ms,
                cleared,
            } => vec![2, *elapsed_ms as i32, *cleared as i32],
        }
    }
}

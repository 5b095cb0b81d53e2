//! Scoring module - region points, per-color breakdown, max chains
//!
//! Rules:
//! - Each qualifying region is worth `base_value(member_count)`, a function of
//!   the count alone (color never matters).
//! - Points are credited to the region's color and to the total.
//! - Max chain per color only ever grows.
//! - The chain bonus tier is a display value derived from the current chains;
//!   it never adds points.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::regions::LockAnalysis;
use crate::types::{CellColor, CHAIN_BONUS_STEPS, POINTS_PER_CELL};

/// Points for one qualifying region of `member_count` cells
pub fn base_value(member_count: usize) -> u32 {
    let n = u32::try_from(member_count).unwrap_or(u32::MAX);
    POINTS_PER_CELL.saturating_mul(n).saturating_mul(n)
}

/// Tier of the chain bonus for a chain length
///
/// | Chain | Tier |
/// |-------|------|
/// | 0-1 | 0 |
/// | 2-3 | 1 |
/// | 4-6 | 2 |
/// | 7-9 | 3 |
/// | 10+ | 4 |
pub fn chain_bonus_tier(chain: u32) -> u32 {
    CHAIN_BONUS_STEPS.iter().filter(|&&step| chain >= step).count() as u32
}

/// Score and chain record of one color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScore {
    pub points: u32,
    pub chain: u32,
    pub max_chain: u32,
}

/// Session score state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    total: u32,
    colors: [ColorScore; 3],
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit one lock's analysis; returns the points added
    pub fn award(&mut self, analysis: &LockAnalysis) -> u32 {
        let mut delta: u32 = 0;
        for region in &analysis.regions {
            let points = base_value(region.member_count);
            let entry = &mut self.colors[region.color.index()];
            entry.points = entry.points.saturating_add(points);
            delta = delta.saturating_add(points);
        }
        self.total = self.total.saturating_add(delta);

        for color in CellColor::ALL {
            let entry = &mut self.colors[color.index()];
            entry.chain = analysis.chains[color.index()];
            entry.max_chain = entry.max_chain.max(entry.chain);
        }
        delta
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn color(&self, color: CellColor) -> ColorScore {
        self.colors[color.index()]
    }

    pub fn colors(&self) -> [ColorScore; 3] {
        self.colors
    }

    pub fn max_chains(&self) -> [u32; 3] {
        self.colors.map(|c| c.max_chain)
    }

    /// Highest max chain over all colors
    pub fn overall_max_chain(&self) -> u32 {
        self.max_chains().into_iter().max().unwrap_or(0)
    }

    /// Tier from the longest chain currently running
    pub fn chain_bonus_tier(&self) -> u32 {
        let current = self.colors.iter().map(|c| c.chain).max().unwrap_or(0);
        chain_bonus_tier(current)
    }

    /// `[total, cyan_max_chain, magenta_max_chain, yellow_max_chain]`
    pub fn details(&self) -> [u32; 4] {
        let [c, m, y] = self.max_chains();
        [self.total, c, m, y]
    }
}

impl fmt::Display for ScoreBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [c, m, y] = self.max_chains();
        write!(
            f,
            "Total: {} | Cyan max chain: {} | Magenta max chain: {} | Yellow max chain: {}",
            self.total, c, m, y
        )
    }
}

//! RNG module - seeded piece source
//!
//! Shapes come from a "7-bag": each bag holds one of each shape, shuffled, and is
//! drawn empty before the next bag is generated. Each drawn shape gets a color
//! picked uniformly from the three piece colors by the same generator, so one seed
//! fixes the entire piece sequence.

use crate::types::{CellColor, PieceKind};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would make the shuffle degenerate
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are better distributed than the low ones
        (self.next_u32() >> 16) % max
    }

    /// Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Shape and color of a piece waiting to spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSpec {
    pub kind: PieceKind,
    pub color: CellColor,
}

/// 7-bag piece generator with per-piece colors
#[derive(Debug, Clone)]
pub struct PieceQueue {
    seed: u32,
    bag: [PieceKind; 7],
    bag_index: usize,
    rng: SimpleRng,
}

impl PieceQueue {
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            seed,
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        queue.refill_bag();
        queue
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece
    pub fn draw(&mut self) -> PieceSpec {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }

        let kind = self.bag[self.bag_index];
        self.bag_index += 1;
        let color = CellColor::ALL[self.rng.next_range(CellColor::ALL.len() as u32) as usize];
        PieceSpec { kind, color }
    }

    /// Seed this queue was created with (restarts reuse it for replays)
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}

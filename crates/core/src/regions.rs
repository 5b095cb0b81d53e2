//! Region module - same-color connected groups and per-color chains
//!
//! A region is a maximal set of settled cells of one color joined through
//! their four orthogonal neighbours. Solid cells never join a region.
//! Regions are recomputed on demand after a lock and are never stored.

use std::collections::VecDeque;

use crate::board::Board;
use crate::types::{CellColor, CellFlag, RegionResult, BOARD_WIDTH, REGION_THRESHOLD};

const NEIGHBOURS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// A connected same-color group of board cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub color: CellColor,
    /// Member coordinates in discovery order
    pub cells: Vec<(usize, usize)>,
}

impl Region {
    pub fn member_count(&self) -> usize {
        self.cells.len()
    }

    /// Large enough to score
    pub fn qualifies(&self) -> bool {
        self.member_count() >= REGION_THRESHOLD
    }

    /// Top-most, then left-most member
    pub fn anchor(&self) -> (usize, usize) {
        self.cells
            .iter()
            .copied()
            .min_by_key(|&(x, y)| (y, x))
            .unwrap_or_default()
    }

    pub fn result(&self) -> RegionResult {
        RegionResult {
            color: self.color,
            member_count: self.member_count(),
        }
    }
}

fn region_color(board: &Board, x: usize, y: usize) -> Option<CellColor> {
    board
        .cell_at(x, y)
        .filter(|block| !block.is_solid())
        .map(|block| block.color)
}

/// Breadth-first flood fill from (x, y), marking members in `visited`.
///
/// Returns None when the start cell is empty, solid, or already visited.
fn flood_fill(board: &Board, x: usize, y: usize, visited: &mut [bool]) -> Option<Region> {
    let width = BOARD_WIDTH as usize;
    let height = board.height() as usize;

    if visited[y * width + x] {
        return None;
    }
    let color = region_color(board, x, y)?;

    let mut cells = Vec::new();
    let mut queue = VecDeque::new();
    visited[y * width + x] = true;
    queue.push_back((x, y));

    while let Some((cx, cy)) = queue.pop_front() {
        cells.push((cx, cy));
        for (dx, dy) in NEIGHBOURS {
            let nx = cx as isize + dx;
            let ny = cy as isize + dy;
            if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if visited[ny * width + nx] || region_color(board, nx, ny) != Some(color) {
                continue;
            }
            visited[ny * width + nx] = true;
            queue.push_back((nx, ny));
        }
    }

    Some(Region { color, cells })
}

/// Distinct regions containing at least one of `seeds`, in seed order
pub fn regions_touching(board: &Board, seeds: &[(i8, i8)]) -> Vec<Region> {
    let mut visited = vec![false; board.cells().len()];
    seeds
        .iter()
        .filter(|&&(x, y)| !board.is_out_of_bounds(x, y))
        .filter_map(|&(x, y)| flood_fill(board, x as usize, y as usize, &mut visited))
        .collect()
}

/// Every region on the board, in row-major discovery order
pub fn all_regions(board: &Board) -> Vec<Region> {
    let mut visited = vec![false; board.cells().len()];
    let mut regions = Vec::new();
    for y in 0..board.height() as usize {
        for x in 0..BOARD_WIDTH as usize {
            if let Some(region) = flood_fill(board, x, y, &mut visited) {
                regions.push(region);
            }
        }
    }
    regions
}

/// Mark members of qualifying regions as `Connected` and everything else
/// (except solid cells) as `Normal`.
pub fn refresh_highlights(board: &mut Board) {
    let connected: Vec<(usize, usize)> = all_regions(board)
        .into_iter()
        .filter(Region::qualifies)
        .flat_map(|region| region.cells)
        .collect();

    for block in board.cells_mut().iter_mut().flatten() {
        if block.flag == CellFlag::Connected {
            block.flag = CellFlag::Normal;
        }
    }
    let width = BOARD_WIDTH as usize;
    let cells = board.cells_mut();
    for (x, y) in connected {
        if let Some(block) = cells[y * width + x].as_mut() {
            block.flag = CellFlag::Connected;
        }
    }
}

/// Per-color streak of locks that produced a qualifying region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainCounters {
    chains: [u32; 3],
}

impl ChainCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, color: CellColor) -> u32 {
        self.chains[color.index()]
    }

    pub fn as_array(&self) -> [u32; 3] {
        self.chains
    }

    /// Longest current chain over the three colors
    pub fn current_max(&self) -> u32 {
        self.chains.iter().copied().max().unwrap_or(0)
    }

    /// Advance every color's counter for one lock: increment colors that
    /// qualified, reset the others to zero.
    pub fn update(&mut self, qualifying: &[RegionResult]) -> [u32; 3] {
        for color in CellColor::ALL {
            let hit = qualifying.iter().any(|r| r.color == color);
            let chain = &mut self.chains[color.index()];
            *chain = if hit { chain.saturating_add(1) } else { 0 };
        }
        self.chains
    }

    pub fn reset(&mut self) {
        self.chains = [0; 3];
    }
}

/// Region results of one lock
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockAnalysis {
    /// Qualifying regions touching the just-locked cells
    pub regions: Vec<RegionResult>,
    /// Chain counters after the update
    pub chains: [u32; 3],
}

/// Analyse a lock: find qualifying regions through the just-locked cells and
/// advance the chain counters.
pub fn analyze_lock(
    board: &Board,
    locked: &[(i8, i8)],
    chains: &mut ChainCounters,
) -> LockAnalysis {
    let regions: Vec<RegionResult> = regions_touching(board, locked)
        .iter()
        .filter(|r| r.qualifies())
        .map(Region::result)
        .collect();
    let chains = chains.update(&regions);
    LockAnalysis { regions, chains }
}

/// `[x, y, count, ...]` label per qualifying region at its anchor cell
pub fn connected_cell_labels(board: &Board) -> Vec<i32> {
    all_regions(board)
        .iter()
        .filter(|r| r.qualifies())
        .flat_map(|r| {
            let (x, y) = r.anchor();
            [x as i32, y as i32, r.member_count() as i32]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Block;

    fn put(board: &mut Board, cells: &[(i8, i8)], color: CellColor) {
        for &(x, y) in cells {
            board.set(x, y, Some(Block::normal(color)));
        }
    }

    #[test]
    fn test_flood_fill_is_four_connected() {
        let mut board = Board::default();
        // Diagonal neighbours do not connect
        put(&mut board, &[(0, 19), (1, 18)], CellColor::Cyan);

        let regions = all_regions(&board);
        assert_eq!(regions.len(), 2);
        assert!(regions.iter().all(|r| r.member_count() == 1));
    }

    #[test]
    fn test_region_stops_at_other_colors_and_solids() {
        let mut board = Board::default();
        put(&mut board, &[(0, 19), (1, 19), (3, 19)], CellColor::Yellow);
        board.set_solid(2, 19, CellColor::Yellow);
        put(&mut board, &[(0, 18)], CellColor::Magenta);

        let regions = regions_touching(&board, &[(0, 19)]);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].member_count(), 2);
        assert_eq!(regions[0].color, CellColor::Yellow);
    }

    #[test]
    fn test_regions_touching_deduplicates() {
        let mut board = Board::default();
        let cells = [(0, 19), (1, 19), (2, 19), (3, 19), (4, 19)];
        put(&mut board, &cells, CellColor::Cyan);

        let regions = regions_touching(&board, &cells);
        assert_eq!(regions.len(), 1);
        assert!(regions[0].qualifies());
        assert_eq!(regions[0].anchor(), (0, 19));
    }

    #[test]
    fn test_chain_counters_increment_and_reset() {
        let mut chains = ChainCounters::new();
        let cyan = RegionResult {
            color: CellColor::Cyan,
            member_count: 5,
        };
        let yellow = RegionResult {
            color: CellColor::Yellow,
            member_count: 6,
        };

        assert_eq!(chains.update(&[cyan, yellow]), [1, 0, 1]);
        assert_eq!(chains.update(&[cyan]), [2, 0, 0]);
        assert_eq!(chains.current_max(), 2);
        assert_eq!(chains.update(&[]), [0, 0, 0]);
    }

    #[test]
    fn test_refresh_highlights_marks_only_qualifying() {
        let mut board = Board::default();
        put(
            &mut board,
            &[(0, 19), (1, 19), (2, 19), (3, 19), (4, 19)],
            CellColor::Magenta,
        );
        put(&mut board, &[(9, 19)], CellColor::Magenta);

        refresh_highlights(&mut board);

        assert_eq!(board.cell_at(0, 19).map(|b| b.flag), Some(CellFlag::Connected));
        assert_eq!(board.cell_at(9, 19).map(|b| b.flag), Some(CellFlag::Normal));
        assert_eq!(connected_cell_labels(&board), vec![0, 19, 5]);
    }
}

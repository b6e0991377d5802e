//! Stage progression
//!
//! Tracks which level is active and owns its wall grid. Resetting a stage
//! (re-seeding ship and pools) is done by [`super::state::SimState`], which
//! owns the entities; the stage only answers what to place where.

use glam::DVec2;

use super::grid::TileGrid;
use super::level::{LevelDef, LevelSet, SpawnSpec};

#[derive(Debug, Clone)]
pub struct Stage {
    levels: LevelSet,
    index: usize,
    grid: TileGrid,
}

impl Stage {
    pub fn new(levels: LevelSet, cell_size: f64) -> Self {
        let grid = TileGrid::from_level(levels.level(0), cell_size);
        Self {
            levels,
            index: 0,
            grid,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn level(&self) -> &LevelDef {
        self.levels.level(self.index)
    }

    /// Select a level (wrapping past the end) and rebuild the wall grid
    pub fn load(&mut self, index: usize) {
        self.index = if index < self.levels.len() { index } else { 0 };
        self.grid = TileGrid::from_level(self.level(), self.grid.cell_size());
    }

    /// Index the next stage would load
    pub fn next_index(&self) -> usize {
        (self.index + 1) % self.levels.len()
    }

    /// Ship start position: the center of the start cell
    pub fn start_position(&self) -> DVec2 {
        let (x, y) = self.level().start_cell().unwrap_or((0, 0));
        self.grid.cell_center(x, y)
    }

    /// Marker spawns for the active level as world positions (cell origins)
    pub fn spawns(&self) -> Vec<(SpawnSpec, DVec2)> {
        self.level()
            .spawns()
            .map(|(x, y, spec)| (spec, self.grid.cell_origin(x, y)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_wraps_around() {
        let mut stage = Stage::new(LevelSet::builtin(), 8.0);
        assert_eq!(stage.index(), 0);
        for expected in [1, 2, 3, 0, 1] {
            let next = stage.next_index();
            stage.load(next);
            assert_eq!(stage.index(), expected);
        }
        stage.load(99);
        assert_eq!(stage.index(), 0);
    }

    #[test]
    fn test_first_stage_layout() {
        let stage = Stage::new(LevelSet::builtin(), 8.0);
        assert_eq!(stage.start_position(), DVec2::new(16.0 * 8.0 + 4.0, 24.0 * 8.0 + 4.0));
        let spawns = stage.spawns();
        assert_eq!(spawns.len(), 7);
        assert_eq!(spawns[0], (SpawnSpec::Enemy0, DVec2::new(14.0 * 8.0, 12.0 * 8.0)));
        assert!(stage.grid().is_wall_at(DVec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_grid_follows_level() {
        let mut stage = Stage::new(LevelSet::builtin(), 8.0);
        // Welcome has a wall bar on row 22, Survival does not
        let bar = stage.grid().cell_center(10, 22);
        assert!(stage.grid().is_wall_at(bar));
        stage.load(3);
        assert!(!stage.grid().is_wall_at(bar));
    }
}

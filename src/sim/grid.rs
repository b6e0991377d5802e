//! Tile grid collision
//!
//! The maze is a grid of square cells. Everything outside the grid counts as
//! wall, so entities can never leave the play area.

use glam::DVec2;

use super::level::{LevelDef, WALL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
}

/// Static wall layout for the active stage
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cell_size: f64,
    cells: Vec<Cell>,
}

impl TileGrid {
    /// An empty grid surrounded only by the implicit out-of-bounds wall
    pub fn new(width: usize, height: usize, cell_size: f64) -> Self {
        Self {
            width,
            height,
            cell_size,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Build the wall layout of a level. Markers and the start cell are floor.
    pub fn from_level(level: &LevelDef, cell_size: f64) -> Self {
        let mut grid = Self::new(level.width(), level.height(), cell_size);
        for (x, y, c) in level.cells() {
            if c == WALL {
                grid.set(x, y, Cell::Wall);
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// World-space extent of the grid
    pub fn world_size(&self) -> DVec2 {
        DVec2::new(
            self.width as f64 * self.cell_size,
            self.height as f64 * self.cell_size,
        )
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Top-left corner of a cell in world space
    pub fn cell_origin(&self, x: usize, y: usize) -> DVec2 {
        DVec2::new(x as f64 * self.cell_size, y as f64 * self.cell_size)
    }

    /// Center of a cell in world space
    pub fn cell_center(&self, x: usize, y: usize) -> DVec2 {
        self.cell_origin(x, y) + DVec2::splat(self.cell_size / 2.0)
    }

    /// Iterate over wall cells as `(x, y)`
    pub fn walls(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Wall)
            .map(|(i, _)| (i % self.width, i / self.width))
    }

    /// True if `pos` lies in a wall cell or outside the grid
    pub fn is_wall_at(&self, pos: DVec2) -> bool {
        let gx = (pos.x / self.cell_size).floor();
        let gy = (pos.y / self.cell_size).floor();
        if !(gx >= 0.0 && gy >= 0.0 && gx < self.width as f64 && gy < self.height as f64) {
            return true;
        }
        self.cells[gy as usize * self.width + gx as usize] == Cell::Wall
    }

    /// Move a circle of `radius` out of any wall it overlaps.
    ///
    /// Probes left, right, up and down in that order, each on the position
    /// corrected so far, and snaps the probed axis to the cell boundary.
    /// Corners are resolved one axis at a time, not as exact circle-vs-box.
    pub fn push_out(&self, pos: DVec2, radius: f64) -> DVec2 {
        let cs = self.cell_size;
        let mut pos = pos;

        let left = pos - DVec2::new(radius, 0.0);
        if self.is_wall_at(left) {
            pos.x = (left.x / cs).ceil() * cs + radius;
        }
        let right = pos + DVec2::new(radius, 0.0);
        if self.is_wall_at(right) {
            pos.x = (right.x / cs).floor() * cs - radius;
        }
        let up = pos - DVec2::new(0.0, radius);
        if self.is_wall_at(up) {
            pos.y = (up.y / cs).ceil() * cs + radius;
        }
        let down = pos + DVec2::new(0.0, radius);
        if self.is_wall_at(down) {
            pos.y = (down.y / cs).floor() * cs - radius;
        }

        pos
    }
}

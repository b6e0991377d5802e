//! Level definitions
//!
//! A level is a fixed grid of characters plus a table mapping marker
//! characters to the entity spawned there:
//! - `#` wall
//! - ` ` or `.` empty floor
//! - `S` ship start (exactly one per level)
//! - any other character is a marker, looked up in the level's spawn table;
//!   markers without an entry are treated as floor

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when validating or parsing level data
#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    #[error("level list must contain at least one level")]
    NoLevels,
    #[error("level {level} has no rows")]
    Empty { level: usize },
    #[error("level {level} row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        level: usize,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("level {level} has no start cell")]
    MissingStart { level: usize },
    #[error("level {level} has {count} start cells")]
    MultipleStarts { level: usize, count: usize },
    #[error("invalid level json: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        LevelError::Parse(e.to_string())
    }
}

/// What a marker character spawns when the stage resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnSpec {
    /// Stationary turret
    Enemy0,
    /// Chasing shooter
    Enemy1,
    /// Spread-firing brute
    Enemy2,
    /// Endless-mode spawner
    SurvivalModeManager,
}

pub const WALL: char = '#';
pub const START: char = 'S';

/// One level: its cell rows and marker table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDef {
    #[serde(default)]
    pub name: String,
    pub rows: Vec<String>,
    #[serde(default)]
    pub markers: BTreeMap<char, SpawnSpec>,
}

impl LevelDef {
    pub fn new(name: &str, rows: &[&str], markers: &[(char, SpawnSpec)]) -> Self {
        Self {
            name: name.to_string(),
            rows: rows.iter().map(|r| r.to_string()).collect(),
            markers: markers.iter().copied().collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map(|r| r.chars().count()).unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Iterate every cell as `(x, y, symbol)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.chars().enumerate().map(move |(x, c)| (x, y, c)))
    }

    /// Grid coordinates of the start cell
    pub fn start_cell(&self) -> Option<(usize, usize)> {
        self.cells().find(|&(_, _, c)| c == START).map(|(x, y, _)| (x, y))
    }

    /// Marker cells that have a spawn entry, in row-major order
    pub fn spawns(&self) -> impl Iterator<Item = (usize, usize, SpawnSpec)> + '_ {
        self.cells()
            .filter_map(|(x, y, c)| self.markers.get(&c).map(|&spec| (x, y, spec)))
    }

    /// Check shape and start cell; `index` is only used in error messages
    pub fn validate(&self, index: usize) -> Result<(), LevelError> {
        if self.rows.is_empty() {
            return Err(LevelError::Empty { level: index });
        }
        let expected = self.width();
        for (row, cells) in self.rows.iter().enumerate() {
            let found = cells.chars().count();
            if found != expected {
                return Err(LevelError::RaggedRow {
                    level: index,
                    row,
                    expected,
                    found,
                });
            }
        }
        match self.cells().filter(|&(_, _, c)| c == START).count() {
            0 => Err(LevelError::MissingStart { level: index }),
            1 => Ok(()),
            count => Err(LevelError::MultipleStarts {
                level: index,
                count,
            }),
        }
    }
}

/// Ordered, validated list of levels
#[derive(Debug, Clone, Serialize)]
pub struct LevelSet {
    levels: Vec<LevelDef>,
}

impl LevelSet {
    pub fn new(levels: Vec<LevelDef>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::NoLevels);
        }
        for (i, level) in levels.iter().enumerate() {
            level.validate(i)?;
        }
        Ok(Self { levels })
    }

    /// Parse a JSON array of levels
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let levels: Vec<LevelDef> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// The levels shipped with the game
    pub fn builtin() -> Self {
        use SpawnSpec::*;
        Self {
            levels: vec![
                LevelDef::new("Welcome", &WELCOME, &[('a', Enemy0)]),
                LevelDef::new("Corridors", &CORRIDORS, &[('a', Enemy0), ('b', Enemy1)]),
                LevelDef::new(
                    "Fortress",
                    &FORTRESS,
                    &[('a', Enemy0), ('b', Enemy1), ('c', Enemy2)],
                ),
                LevelDef::new("Survival", &SURVIVAL, &[('z', SurvivalModeManager)]),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelDef> {
        self.levels.get(index)
    }

    /// Level at `index`, wrapping around the end of the list
    pub fn level(&self, index: usize) -> &LevelDef {
        // Construction guarantees at least one level
        &self.levels[index % self.levels.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDef> {
        self.levels.iter()
    }
}

impl Default for LevelSet {
    fn default() -> Self {
        Self::builtin()
    }
}

const WELCOME: [&str; 32] = [
    "################################",
    "#                              #",
    "# # # #  ###   #### ####       #",
    "# # # # #   # #     #   #      #",
    "# # # # #####  ###  #   #      #",
    "# # # # #   #     # #   #      #",
    "#  # #  #   # ####  ####       #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#             a         a      #",
    "#                              #",
    "#                              #",
    "#                a   a         #",
    "#                 aaa          #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#     ###################      #",
    "#                              #",
    "#               S              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "################################",
];

const CORRIDORS: [&str; 32] = [
    "################################",
    "#                              #",
    "#                              #",
    "#                              #",
    "#    a    #          #    a    #",
    "#         #          #         #",
    "#         #    b     #         #",
    "#         #          #         #",
    "#                              #",
    "#                              #",
    "#         #          #         #",
    "#         #          #         #",
    "#         #    a     #         #",
    "#         #          #         #",
    "#         #          #         #",
    "#         #          #         #",
    "#   ###########  ###########   #",
    "#         #          #         #",
    "#         #          #         #",
    "#         #          #         #",
    "#         #          #         #",
    "#         #          #         #",
    "#                              #",
    "#                              #",
    "#         #          #         #",
    "#         #          #         #",
    "#         #    S     #         #",
    "#    b    #          #    b    #",
    "#                              #",
    "#                              #",
    "#                              #",
    "################################",
];

const FORTRESS: [&str; 32] = [
    "################################",
    "#                              #",
    "#                              #",
    "#                              #",
    "#   a                      a   #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#       ################       #",
    "#       #              #       #",
    "#       #              #       #",
    "#       #  b           #       #",
    "#       #              #       #",
    "#              c               #",
    "#                              #",
    "#                              #",
    "#       #              #       #",
    "#       #           b  #       #",
    "#       #              #       #",
    "#       #              #       #",
    "#       ################       #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#              S               #",
    "#                              #",
    "#                              #",
    "#                              #",
    "################################",
];

const SURVIVAL: [&str; 32] = [
    "################################",
    "#                              #",
    "# z                            #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#       ##             ##      #",
    "#       ##             ##      #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#              S               #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#       ##             ##      #",
    "#       ##             ##      #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "#                              #",
    "################################",
];

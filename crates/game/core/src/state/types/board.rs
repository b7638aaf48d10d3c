use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use arrayvec::ArrayVec;

use super::{Cell, Direction};
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

/// Orthogonal neighbours of a cell, in [`Direction::ALL`] order.
pub type Neighbors = ArrayVec<Cell, { GameConfig::MAX_NEIGHBORS }>;

/// What occupies a grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Empty,
    Obstacle,
    Trap,
    Resource,
}

impl CellKind {
    /// Single-character glyph used by text layouts and board dumps.
    pub const fn symbol(self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Obstacle => 'X',
            CellKind::Trap => 'T',
            CellKind::Resource => 'E',
        }
    }
}

/// Collectible placed on a resource cell.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResourceKind {
    /// Adds score.
    Coin,
    /// Restores health up to the maximum.
    Health,
    /// Grants a timed shield that can break one obstacle.
    Shield,
}

/// Hazard placed on a trap cell.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TrapKind {
    Spike,
    Fire,
}

impl TrapKind {
    pub fn damage(self, config: &GameConfig) -> i32 {
        match self {
            TrapKind::Spike => config.spike_damage,
            TrapKind::Fire => config.fire_damage,
        }
    }
}

/// Goal cells reserved at board creation.
///
/// The player-vs-AI and AI-vs-AI pairs share the two opposite corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalCells {
    pub end_player: Cell,
    pub end_ai: Cell,
    pub end_blue: Cell,
    pub end_red: Cell,
}

impl GoalCells {
    pub fn for_size(size: u32) -> Self {
        let far = Cell::new(size as i32 - 1, size as i32 - 1);
        Self {
            end_player: far,
            end_ai: Cell::ORIGIN,
            end_blue: far,
            end_red: Cell::ORIGIN,
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        [self.end_player, self.end_ai, self.end_blue, self.end_red].contains(&cell)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error(
        "board size {size} is outside {}..={}",
        GameConfig::MIN_GRID_SIZE,
        GameConfig::MAX_GRID_SIZE
    )]
    InvalidSize { size: u32 },

    #[error("cell {cell} is outside the board")]
    CellOutOfBounds { cell: Cell },

    #[error("cell {cell} is a reserved goal cell")]
    CellReserved { cell: Cell },

    #[error("cell {cell} is already occupied")]
    CellOccupied { cell: Cell },

    #[error("cannot place {requested} items on {available} free cells")]
    NotEnoughSpace { requested: u32, available: u32 },
}

impl GameError for BoardError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSize { .. } => "BOARD_INVALID_SIZE",
            Self::CellOutOfBounds { .. } => "BOARD_CELL_OUT_OF_BOUNDS",
            Self::CellReserved { .. } => "BOARD_CELL_RESERVED",
            Self::CellOccupied { .. } => "BOARD_CELL_OCCUPIED",
            Self::NotEnoughSpace { .. } => "BOARD_NOT_ENOUGH_SPACE",
        }
    }
}

/// Square grid with its resources, traps, obstacles and goal cells.
///
/// # Invariants
///
/// - A cell's [`CellKind`] and its membership in the resource, trap and
///   obstacle collections always agree. All mutation goes through the
///   `place_*` / `take_*` / `clear_obstacle` methods to keep it that way.
/// - Goal cells never host a resource, trap or obstacle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: u32,
    grid: Vec<CellKind>,
    resources: BTreeMap<Cell, ResourceKind>,
    traps: BTreeMap<Cell, TrapKind>,
    obstacles: BTreeSet<Cell>,
    goals: GoalCells,
}

impl Board {
    /// Creates an empty board of `size × size` cells.
    pub fn new(size: u32) -> Result<Self, BoardError> {
        if !(GameConfig::MIN_GRID_SIZE..=GameConfig::MAX_GRID_SIZE).contains(&size) {
            return Err(BoardError::InvalidSize { size });
        }

        Ok(Self {
            size,
            grid: vec![CellKind::Empty; (size * size) as usize],
            resources: BTreeMap::new(),
            traps: BTreeMap::new(),
            obstacles: BTreeSet::new(),
            goals: GoalCells::for_size(size),
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn goals(&self) -> &GoalCells {
        &self.goals
    }

    pub fn contains(&self, cell: Cell) -> bool {
        let size = self.size as i32;
        (0..size).contains(&cell.row) && (0..size).contains(&cell.col)
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| (cell.row as usize) * self.size as usize + cell.col as usize)
    }

    /// Kind of the cell, or `None` when off the board.
    pub fn kind(&self, cell: Cell) -> Option<CellKind> {
        self.index(cell).map(|idx| self.grid[idx])
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.kind(cell) == Some(CellKind::Obstacle)
    }

    /// On the board and not an obstacle.
    pub fn is_passable(&self, cell: Cell) -> bool {
        matches!(self.kind(cell), Some(kind) if kind != CellKind::Obstacle)
    }

    pub fn is_reserved(&self, cell: Cell) -> bool {
        self.goals.contains(cell)
    }

    pub fn resources(&self) -> &BTreeMap<Cell, ResourceKind> {
        &self.resources
    }

    pub fn traps(&self) -> &BTreeMap<Cell, TrapKind> {
        &self.traps
    }

    pub fn obstacles(&self) -> &BTreeSet<Cell> {
        &self.obstacles
    }

    pub fn has_resources(&self) -> bool {
        !self.resources.is_empty()
    }

    /// Closest resource by Manhattan distance; ties go to the lowest cell.
    pub fn nearest_resource(&self, from: Cell) -> Option<Cell> {
        self.resources
            .keys()
            .copied()
            .min_by_key(|cell| from.manhattan(*cell))
    }

    /// In-bounds, non-obstacle orthogonal neighbours in [`Direction::ALL`] order.
    pub fn passable_neighbors(&self, cell: Cell) -> Neighbors {
        Direction::ALL
            .into_iter()
            .map(|dir| cell.offset(dir))
            .filter(|next| self.is_passable(*next))
            .collect()
    }

    /// Empty, non-reserved cells in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let size = self.size as i32;
        (0..size)
            .flat_map(move |row| (0..size).map(move |col| Cell::new(row, col)))
            .filter(|cell| self.kind(*cell) == Some(CellKind::Empty) && !self.is_reserved(*cell))
    }

    pub fn place_resource(&mut self, cell: Cell, kind: ResourceKind) -> Result<(), BoardError> {
        self.claim(cell, CellKind::Resource)?;
        self.resources.insert(cell, kind);
        Ok(())
    }

    pub fn place_trap(&mut self, cell: Cell, kind: TrapKind) -> Result<(), BoardError> {
        self.claim(cell, CellKind::Trap)?;
        self.traps.insert(cell, kind);
        Ok(())
    }

    pub fn place_obstacle(&mut self, cell: Cell) -> Result<(), BoardError> {
        self.claim(cell, CellKind::Obstacle)?;
        self.obstacles.insert(cell);
        Ok(())
    }

    /// Removes and returns the resource at `cell`, turning it back to Empty.
    pub fn take_resource(&mut self, cell: Cell) -> Option<ResourceKind> {
        let kind = self.resources.remove(&cell)?;
        self.release(cell);
        Some(kind)
    }

    /// Removes and returns the trap at `cell`, turning it back to Empty.
    pub fn take_trap(&mut self, cell: Cell) -> Option<TrapKind> {
        let kind = self.traps.remove(&cell)?;
        self.release(cell);
        Some(kind)
    }

    /// Turns an obstacle cell back to Empty. Returns whether one was removed.
    pub fn clear_obstacle(&mut self, cell: Cell) -> bool {
        if !self.obstacles.remove(&cell) {
            return false;
        }
        self.release(cell);
        true
    }

    fn claim(&mut self, cell: Cell, kind: CellKind) -> Result<(), BoardError> {
        let idx = self
            .index(cell)
            .ok_or(BoardError::CellOutOfBounds { cell })?;
        if self.is_reserved(cell) {
            return Err(BoardError::CellReserved { cell });
        }
        if self.grid[idx] != CellKind::Empty {
            return Err(BoardError::CellOccupied { cell });
        }
        self.grid[idx] = kind;
        Ok(())
    }

    fn release(&mut self, cell: Cell) {
        if let Some(idx) = self.index(cell) {
            self.grid[idx] = CellKind::Empty;
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.chunks(self.size as usize) {
            let line: String = row.iter().map(|kind| kind.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

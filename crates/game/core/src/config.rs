use std::time::Duration;

/// Game configuration constants and tunable parameters.
///
/// Every gameplay number the world model applies lives here so that content
/// files can rebalance a round without touching code.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Side length of the square board.
    pub grid_size: u32,
    pub num_resources: u32,
    pub num_traps: u32,
    pub num_obstacles: u32,
    /// Turn limit after which the higher score wins.
    pub max_turns: u32,

    pub melee_damage: i32,
    /// Maximum Manhattan distance at which a melee strike lands.
    pub melee_reach: u32,
    pub ranged_damage: i32,
    /// Turns between scheduling a ranged strike and its resolution.
    pub ranged_delay_turns: u32,

    pub coin_score: i32,
    pub heal_amount: i32,
    pub spike_damage: i32,
    pub fire_damage: i32,
    /// Shield buff lifetime, in whole seconds of wall-clock time.
    pub shield_secs: u64,
}

impl GameConfig {
    // ===== compile-time constants =====
    pub const MAX_HEALTH: i32 = 100;
    /// Upper bound on orthogonal neighbours of a cell.
    pub const MAX_NEIGHBORS: usize = 4;
    /// Largest board side accepted from content files.
    pub const MAX_GRID_SIZE: u32 = 256;
    pub const MIN_GRID_SIZE: u32 = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_GRID_SIZE: u32 = 12;
    pub const DEFAULT_NUM_RESOURCES: u32 = 12;
    pub const DEFAULT_NUM_TRAPS: u32 = 8;
    pub const DEFAULT_NUM_OBSTACLES: u32 = 18;
    pub const DEFAULT_MAX_TURNS: u32 = 90;

    pub fn new() -> Self {
        Self {
            grid_size: Self::DEFAULT_GRID_SIZE,
            num_resources: Self::DEFAULT_NUM_RESOURCES,
            num_traps: Self::DEFAULT_NUM_TRAPS,
            num_obstacles: Self::DEFAULT_NUM_OBSTACLES,
            max_turns: Self::DEFAULT_MAX_TURNS,
            melee_damage: 15,
            melee_reach: 2,
            ranged_damage: 20,
            ranged_delay_turns: 1,
            coin_score: 10,
            heal_amount: 20,
            spike_damage: 10,
            fire_damage: 15,
            shield_secs: 5,
        }
    }

    pub fn shield_duration(&self) -> Duration {
        Duration::from_secs(self.shield_secs)
    }

    /// Item counts for a round at the given difficulty.
    ///
    /// Easier rounds get more resources and fewer hazards; counts are
    /// truncated toward zero.
    pub fn item_counts(&self, difficulty: Difficulty) -> ItemCounts {
        let (resources, traps, obstacles) = match difficulty {
            Difficulty::Easy => (1.4, 0.6, 0.7),
            Difficulty::Medium => (1.0, 1.0, 1.0),
            Difficulty::Hard => (0.7, 1.4, 1.2),
        };
        let scale = |count: u32, factor: f64| (f64::from(count) * factor) as u32;

        ItemCounts {
            resources: scale(self.num_resources, resources),
            traps: scale(self.num_traps, traps),
            obstacles: scale(self.num_obstacles, obstacles),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// How many of each item kind to scatter when generating a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ItemCounts {
    pub resources: u32,
    pub traps: u32,
    pub obstacles: u32,
}

impl ItemCounts {
    pub const fn new(resources: u32, traps: u32, obstacles: u32) -> Self {
        Self {
            resources,
            traps,
            obstacles,
        }
    }

    pub const fn total(&self) -> u32 {
        self.resources + self.traps + self.obstacles
    }
}

/// Difficulty selector shared by board generation and the AI tiers.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Manhattan distance within which the tier considers itself in melee
    /// range when deciding whether to strike.
    pub const fn melee_range(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium | Difficulty::Hard => 2,
        }
    }

    /// Whether the tier consults adversarial search.
    pub const fn uses_search(self) -> bool {
        matches!(self, Difficulty::Hard)
    }
}

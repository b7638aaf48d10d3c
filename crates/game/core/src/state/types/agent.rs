//! Agent state: vitals, buffs and the per-turn decision bookkeeping.
//!
//! Every decision field is a named field initialised in [`Agent::new`]; the
//! policies read and update them in place. Timed buffs expire by wall-clock
//! time, every other counter decrements once per turn.

use std::collections::BTreeMap;
use std::time::Instant;

use super::{Cell, ResourceKind};
use crate::config::GameConfig;

/// Behavioural temperament that weights the fuzzy desirabilities.
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Personality {
    Aggressive,
    Defensive,
    #[default]
    Balanced,
}

/// Timed buffs granted by resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Buff {
    /// Lets the holder walk through one obstacle, destroying it.
    Shield,
}

/// An in-flight delayed ranged strike.
///
/// The strike lands only if the target still stands on `target_pos` when
/// `turns` reaches zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingRanged {
    pub target_pos: Cell,
    pub turns: u32,
}

/// Memory used only by the symmetric AI-vs-AI policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MirrorMemory {
    /// Goal corner, assigned on the first mirror decision.
    pub goal: Option<Cell>,
    /// Distance to `goal` observed on the previous decision.
    pub last_goal_dist: Option<u32>,
    /// Consecutive decisions without strictly closing in on `goal`.
    pub no_progress_turns: u32,
    pub attack_cooldown: u32,
}

/// One of the two competitors on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Agent {
    pub name: String,
    pub cell: Cell,
    /// Starts at [`GameConfig::MAX_HEALTH`]. Healing clamps to the maximum;
    /// damage may push it below zero. `<= 0` means dead.
    pub health: i32,
    pub score: i32,
    pub personality: Personality,
    buffs: BTreeMap<Buff, Instant>,

    // === Decision state ===
    pub stunned_turns: u32,
    pub attack_cooldown: u32,
    pub ranged_cooldown: u32,
    pub pending_ranged: Option<PendingRanged>,
    /// Cell occupied immediately before the current one.
    pub last_pos: Option<Cell>,
    pub last_collected: Option<Cell>,
    pub last_pickup: Option<ResourceKind>,
    pub mirror: MirrorMemory,
}

impl Agent {
    pub fn new(name: impl Into<String>, cell: Cell, personality: Personality) -> Self {
        Self {
            name: name.into(),
            cell,
            health: GameConfig::MAX_HEALTH,
            score: 0,
            personality,
            buffs: BTreeMap::new(),
            stunned_turns: 0,
            attack_cooldown: 0,
            ranged_cooldown: 0,
            pending_ranged: None,
            last_pos: None,
            last_collected: None,
            last_pickup: None,
            mirror: MirrorMemory::default(),
        }
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_stunned(&self) -> bool {
        self.stunned_turns > 0
    }

    pub fn distance(&self, other: &Agent) -> u32 {
        self.cell.manhattan(other.cell)
    }

    /// Skips the next `turns` decisions.
    pub fn stun(&mut self, turns: u32) {
        self.stunned_turns = self.stunned_turns.max(turns);
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(GameConfig::MAX_HEALTH);
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub fn grant_buff(&mut self, buff: Buff, expires_at: Instant) {
        self.buffs.insert(buff, expires_at);
    }

    /// Whether `buff` is active at `now`. Expired entries are left for
    /// [`Agent::expire_buffs`].
    pub fn has_buff(&self, buff: Buff, now: Instant) -> bool {
        self.buffs.get(&buff).is_some_and(|expires| *expires > now)
    }

    pub fn consume_buff(&mut self, buff: Buff) -> bool {
        self.buffs.remove(&buff).is_some()
    }

    /// Drops every buff whose expiry is at or before `now`.
    pub fn expire_buffs(&mut self, now: Instant) {
        self.buffs.retain(|_, expires| *expires > now);
    }

    pub fn active_buffs(&self, now: Instant) -> impl Iterator<Item = Buff> + '_ {
        self.buffs
            .iter()
            .filter(move |(_, expires)| **expires > now)
            .map(|(buff, _)| *buff)
    }
}

//! Runtime and AI tuning configuration.

use game_core::{Difficulty, GameConfig};

use crate::api::{Result, RuntimeError};

/// Which decision procedure [`crate::BehaviorPolicy`] runs after the stun gate.
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
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Strategy {
    /// Per-difficulty gather/advance/attack controllers.
    #[default]
    Tiered,
    /// Argmax over the attack/retreat/gather desirabilities, with attack
    /// cooldowns and adversarial search at the hard tier.
    Utility,
}

/// Weights and depth of the bounded minimax search.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched from the root.
    pub depth: u32,
    /// Health removed by a simulated melee strike.
    pub melee_damage: i32,
    /// Manhattan distance within which Melee is offered.
    pub melee_reach: u32,
    /// Flat bonus added to the value of the Shoot action.
    pub shoot_bonus: f64,
    /// Penalty per tile of Manhattan distance in the static evaluation.
    pub distance_weight: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            melee_damage: 10,
            melee_reach: 2,
            shoot_bonus: 2.0,
            distance_weight: 0.5,
        }
    }
}

/// Tunable parameters of the AI policies.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub strategy: Strategy,
    pub search: SearchConfig,
    /// Turns a ranged strike stays on cooldown after being fired.
    pub ranged_cooldown_turns: u32,
    /// Probability the medium utility tier harasses when it cannot gather.
    pub harass_chance: f64,
    /// Opponent health at or below which the mirror policy goes for the kill.
    pub finish_threshold: i32,
    /// Mirror policy melee cooldown.
    pub melee_cooldown_turns: u32,
    /// Inclusive distance band in which the mirror policy fires ranged shots.
    pub harass_min_distance: u32,
    pub harass_max_distance: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            search: SearchConfig::default(),
            ranged_cooldown_turns: 3,
            harass_chance: 0.4,
            finish_threshold: 10,
            melee_cooldown_turns: 1,
            harass_min_distance: 3,
            harass_max_distance: 5,
        }
    }
}

/// Who controls each side of a session.
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
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Mode {
    /// A human player against the tiered behavior policy.
    PlayerVsAi,
    /// Two agents both driven by the symmetric mirror policy.
    #[default]
    AiVsAi,
}

/// Session configuration shared across the turn driver and the policies.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub ai_config: AiConfig,
    pub mode: Mode,
    pub difficulty: Difficulty,
    /// Seed for board generation and every randomized decision.
    pub seed: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            ai_config: AiConfig::default(),
            mode: Mode::default(),
            difficulty: Difficulty::default(),
            seed: 0,
        }
    }
}

impl RuntimeConfig {
    /// Rejects settings the policies cannot run with.
    pub fn validate(&self) -> Result<()> {
        let ai = &self.ai_config;
        if !(0.0..=1.0).contains(&ai.harass_chance) {
            return Err(RuntimeError::Config {
                reason: format!("harass_chance {} is outside [0, 1]", ai.harass_chance),
            });
        }
        if ai.harass_min_distance > ai.harass_max_distance {
            return Err(RuntimeError::Config {
                reason: format!(
                    "harass band {}..={} is empty",
                    ai.harass_min_distance, ai.harass_max_distance
                ),
            });
        }
        if self.game_config.max_turns == 0 {
            return Err(RuntimeError::Config {
                reason: "max_turns must be positive".to_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!(Strategy::from_str("UTILITY").unwrap(), Strategy::Utility);
        assert_eq!(Mode::from_str("player_vs_ai").unwrap(), Mode::PlayerVsAi);
        assert_eq!(Mode::AiVsAi.to_string(), "ai_vs_ai");
        assert!(Strategy::from_str("greedy").is_err());
    }

    #[test]
    fn defaults_validate() {
        assert!(RuntimeConfig::default().validate().is_ok());

        let mut config = RuntimeConfig::default();
        config.ai_config.harass_min_distance = 6;
        assert!(matches!(config.validate(), Err(RuntimeError::Config { .. })));
    }
}

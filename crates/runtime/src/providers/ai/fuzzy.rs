//! Fuzzy features and desirability scores for the behavior policy.
//!
//! Every feature is a linear ramp clamped to `[0, 1]`. Desirabilities blend
//! them with personality weights and are then scaled per difficulty.

use game_core::{Board, Cell, Difficulty, Personality};

fn ramp(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Membership degrees derived from the agent's health and the distance to
/// its opponent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FuzzyFeatures {
    pub health_low: f64,
    pub health_high: f64,
    pub dist_close: f64,
    pub dist_far: f64,
}

impl FuzzyFeatures {
    pub fn new(health: i32, distance: u32) -> Self {
        let health = f64::from(health);
        let distance = f64::from(distance);
        Self {
            health_low: ramp((50.0 - health) / 50.0),
            health_high: ramp((health - 50.0) / 50.0),
            dist_close: ramp((2.0 - distance) / 2.0),
            dist_far: ramp((distance - 2.0) / 5.0),
        }
    }
}

/// The three intents the utility strategy chooses between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Desire {
    Attack,
    Retreat,
    Gather,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Desirability {
    pub attack: f64,
    pub retreat: f64,
    pub gather: f64,
}

impl Desirability {
    /// Blends the features with the personality weights.
    pub fn from_features(features: &FuzzyFeatures, personality: Personality) -> Self {
        let FuzzyFeatures {
            health_low,
            health_high,
            dist_close,
            dist_far,
        } = *features;

        match personality {
            Personality::Aggressive => Self {
                attack: dist_close * health_high + 0.3,
                retreat: health_low,
                gather: dist_far * 0.5,
            },
            Personality::Defensive => Self {
                attack: dist_close * health_high * 0.5,
                retreat: health_low + 0.3,
                gather: dist_far,
            },
            Personality::Balanced => Self {
                attack: dist_close * health_high,
                retreat: health_low,
                gather: dist_far * 0.7,
            },
        }
    }

    /// Applies the difficulty multipliers to attack and gather.
    pub fn scaled(self, difficulty: Difficulty) -> Self {
        let profile = TierProfile::for_difficulty(difficulty);
        Self {
            attack: self.attack * profile.attack_scale,
            gather: self.gather * profile.gather_scale,
            ..self
        }
    }

    /// Highest-scoring desire; ties keep the earlier of attack, retreat, gather.
    pub fn best(&self) -> Desire {
        let mut best = (Desire::Attack, self.attack);
        for candidate in [(Desire::Retreat, self.retreat), (Desire::Gather, self.gather)] {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        best.0
    }
}

/// Per-difficulty constants used by the tiered and utility strategies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierProfile {
    pub attack_scale: f64,
    pub gather_scale: f64,
    /// Distance over which "near a resource" ramps from 1 down to 0.
    pub resource_band: f64,
    /// Goal distance at which "far from the end" starts to rise.
    pub goal_offset: f64,
    /// Width of the "far from the end" ramp.
    pub goal_span: f64,
    /// Cooldown applied after a utility-strategy melee strike. The hard tier
    /// strikes without one.
    pub attack_cooldown: u32,
}

impl TierProfile {
    pub const fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                attack_scale: 0.7,
                gather_scale: 0.9,
                resource_band: 8.0,
                goal_offset: 6.0,
                goal_span: 10.0,
                attack_cooldown: 2,
            },
            Difficulty::Medium => Self {
                attack_scale: 1.0,
                gather_scale: 1.1,
                resource_band: 6.0,
                goal_offset: 4.0,
                goal_span: 8.0,
                attack_cooldown: 1,
            },
            Difficulty::Hard => Self {
                attack_scale: 1.3,
                gather_scale: 1.3,
                resource_band: 6.0,
                goal_offset: 4.0,
                goal_span: 8.0,
                attack_cooldown: 0,
            },
        }
    }
}

/// Where the agent stands relative to resources and its goal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Objectives {
    pub nearest_resource: Option<Cell>,
    /// 1 when standing on a resource, 0 at or beyond the resource band.
    pub near_resource: f64,
    /// 0 near the goal, rising to 1 far from it.
    pub far_from_end: f64,
}

impl Objectives {
    pub fn assess(cell: Cell, board: &Board, goal: Cell, profile: &TierProfile) -> Self {
        let nearest_resource = board.nearest_resource(cell);
        let near_resource = nearest_resource
            .map(|res| {
                let distance = f64::from(cell.manhattan(res));
                ramp((profile.resource_band - distance) / profile.resource_band)
            })
            .unwrap_or(0.0);
        let far_from_end =
            ramp((f64::from(cell.manhattan(goal)) - profile.goal_offset) / profile.goal_span);

        Self {
            nearest_resource,
            near_resource,
            far_from_end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn features_ramp_and_clamp() {
        let full = FuzzyFeatures::new(100, 0);
        assert!(approx(full.health_low, 0.0));
        assert!(approx(full.health_high, 1.0));
        assert!(approx(full.dist_close, 1.0));
        assert!(approx(full.dist_far, 0.0));

        let hurt = FuzzyFeatures::new(20, 4);
        assert!(approx(hurt.health_low, 0.6));
        assert!(approx(hurt.health_high, 0.0));
        assert!(approx(hurt.dist_close, 0.0));
        assert!(approx(hurt.dist_far, 0.4));
        assert!(approx(FuzzyFeatures::new(20, 9).dist_far, 1.0));
    }

    #[test]
    fn aggressive_attack_at_close_range() {
        let features = FuzzyFeatures::new(100, 1);
        let desire = Desirability::from_features(&features, Personality::Aggressive);
        assert!(approx(desire.attack, 0.5 + 0.3));
        assert_eq!(desire.best(), Desire::Attack);
    }

    #[test]
    fn defensive_retreats_when_hurt() {
        let features = FuzzyFeatures::new(10, 2);
        let desire = Desirability::from_features(&features, Personality::Defensive);
        assert!(approx(desire.retreat, 0.8 + 0.3));
        assert!(approx(desire.attack, 0.0));
        assert_eq!(desire.best(), Desire::Retreat);
    }

    #[test]
    fn difficulty_scales_attack_and_gather() {
        let base = Desirability {
            attack: 1.0,
            retreat: 0.5,
            gather: 1.0,
        };
        let easy = base.scaled(Difficulty::Easy);
        assert!(approx(easy.attack, 0.7));
        assert!(approx(easy.gather, 0.9));
        assert!(approx(easy.retreat, 0.5));
        let medium = base.scaled(Difficulty::Medium);
        assert!(approx(medium.gather, 1.1));
        let hard = base.scaled(Difficulty::Hard);
        assert!(approx(hard.attack, 1.3));
        assert!(approx(hard.gather, 1.3));
    }

    #[test]
    fn ties_prefer_attack_then_retreat() {
        let zero = Desirability {
            attack: 0.0,
            retreat: 0.0,
            gather: 0.0,
        };
        assert_eq!(zero.best(), Desire::Attack);
        let tie = Desirability {
            attack: 0.1,
            retreat: 0.5,
            gather: 0.5,
        };
        assert_eq!(tie.best(), Desire::Retreat);
    }

    #[test]
    fn objectives_use_tier_bands() {
        let mut board = Board::new(12).unwrap();
        board
            .place_resource(Cell::new(0, 3), game_core::ResourceKind::Coin)
            .unwrap();
        let easy = TierProfile::for_difficulty(Difficulty::Easy);
        let obj = Objectives::assess(Cell::new(0, 1), &board, Cell::ORIGIN, &easy);

        assert_eq!(obj.nearest_resource, Some(Cell::new(0, 3)));
        assert!(approx(obj.near_resource, 0.75));
        assert!(approx(obj.far_from_end, 0.0));

        let far = Objectives::assess(Cell::new(11, 11), &board, Cell::ORIGIN, &easy);
        assert!(approx(far.far_from_end, 1.0));
    }
}

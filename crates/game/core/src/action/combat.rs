use crate::config::GameConfig;
use crate::state::{Agent, Cell, PendingRanged};

/// How a delayed ranged strike resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangedResolution {
    /// Still travelling; `turns` remain.
    InFlight { turns: u32 },
    /// The target was still on the recorded cell.
    Hit { damage: i32 },
    /// The target had left the recorded cell.
    Missed { target_pos: Cell },
}

impl Agent {
    /// Strikes `target` for [`GameConfig::melee_damage`] when it is within
    /// [`GameConfig::melee_reach`].
    ///
    /// Out of reach the strike is a no-op and returns `None`.
    pub fn melee(&self, target: &mut Agent, config: &GameConfig) -> Option<i32> {
        if self.distance(target) > config.melee_reach {
            tracing::debug!(
                attacker = %self.name,
                target = %target.name,
                distance = self.distance(target),
                "melee out of reach"
            );
            return None;
        }

        target.take_damage(config.melee_damage);
        tracing::debug!(
            attacker = %self.name,
            target = %target.name,
            damage = config.melee_damage,
            "melee hit"
        );
        Some(config.melee_damage)
    }

    /// Records a ranged strike aimed at `target_pos`, replacing any strike
    /// already in flight.
    pub fn schedule_ranged(&mut self, target_pos: Cell, config: &GameConfig) {
        self.pending_ranged = Some(PendingRanged {
            target_pos,
            turns: config.ranged_delay_turns,
        });
        tracing::debug!(attacker = %self.name, target = %target_pos, "ranged strike scheduled");
    }

    /// Advances the in-flight ranged strike by one turn.
    ///
    /// When the counter reaches zero the strike lands only if `target` still
    /// stands on the recorded cell, then the schedule is cleared either way.
    pub fn resolve_pending_ranged(
        &mut self,
        target: &mut Agent,
        config: &GameConfig,
    ) -> Option<RangedResolution> {
        let pending = self.pending_ranged.as_mut()?;
        pending.turns = pending.turns.saturating_sub(1);
        if pending.turns > 0 {
            return Some(RangedResolution::InFlight {
                turns: pending.turns,
            });
        }

        let target_pos = pending.target_pos;
        self.pending_ranged = None;

        if target.cell == target_pos {
            target.take_damage(config.ranged_damage);
            tracing::debug!(
                attacker = %self.name,
                target = %target.name,
                damage = config.ranged_damage,
                "ranged hit"
            );
            Some(RangedResolution::Hit {
                damage: config.ranged_damage,
            })
        } else {
            tracing::debug!(attacker = %self.name, target = %target.name, "ranged strike missed");
            Some(RangedResolution::Missed { target_pos })
        }
    }
}

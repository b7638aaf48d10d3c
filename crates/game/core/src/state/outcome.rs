//! Win-condition evaluation for a round.

use super::{Agent, Cell};

/// Which side, if any, took the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Winner {
    First,
    Second,
    Draw,
}

/// Why a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum OutcomeReason {
    GoalReached,
    Knockout,
    TurnLimit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundOutcome {
    pub winner: Winner,
    pub reason: OutcomeReason,
}

impl RoundOutcome {
    /// Evaluates the win conditions in priority order:
    ///
    /// 1. An agent standing on its goal cell wins (first agent checked first).
    /// 2. An agent with `health <= 0` loses; both down is a draw.
    /// 3. Once `turn >= max_turns` the higher score wins; equal scores draw.
    ///
    /// Returns `None` while the round is still running.
    pub fn evaluate(
        (first, first_goal): (&Agent, Cell),
        (second, second_goal): (&Agent, Cell),
        turn: u32,
        max_turns: u32,
    ) -> Option<Self> {
        let finish = |winner, reason| Some(Self { winner, reason });

        if first.cell == first_goal {
            return finish(Winner::First, OutcomeReason::GoalReached);
        }
        if second.cell == second_goal {
            return finish(Winner::Second, OutcomeReason::GoalReached);
        }

        match (first.is_alive(), second.is_alive()) {
            (false, false) => return finish(Winner::Draw, OutcomeReason::Knockout),
            (false, true) => return finish(Winner::Second, OutcomeReason::Knockout),
            (true, false) => return finish(Winner::First, OutcomeReason::Knockout),
            (true, true) => {}
        }

        if turn >= max_turns {
            let winner = match first.score.cmp(&second.score) {
                std::cmp::Ordering::Greater => Winner::First,
                std::cmp::Ordering::Less => Winner::Second,
                std::cmp::Ordering::Equal => Winner::Draw,
            };
            return finish(winner, OutcomeReason::TurnLimit);
        }

        None
    }
}

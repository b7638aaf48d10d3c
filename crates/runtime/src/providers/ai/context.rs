//! Per-turn decision context shared by the behavior and mirror policies.
//!
//! [`DecisionContext`] is the blackboard a policy works against for a single
//! turn. It bundles the mutable board, the world rules, the difficulty, the
//! injected random source and the wall-clock instant buffs are checked
//! against, and it exposes the stepping primitives both policies compose:
//!
//! - [`step_toward`](DecisionContext::step_toward): one A* step toward a target
//! - [`guarded_step`](DecisionContext::guarded_step): a step that refuses to
//!   bounce straight back to the previous cell
//! - [`retreat_step`](DecisionContext::retreat_step) and
//!   [`random_step`](DecisionContext::random_step): random passable steps

use std::time::Instant;

use game_core::{Agent, Board, Cell, Difficulty, Direction, GameConfig, GameError};
use rand::Rng;
use rand::seq::SliceRandom;

use super::pathfinding;
use crate::api::TurnAction;

pub struct DecisionContext<'a, R: Rng + ?Sized> {
    pub board: &'a mut Board,
    pub config: &'a GameConfig,
    pub difficulty: Difficulty,
    pub now: Instant,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> DecisionContext<'a, R> {
    pub fn new(
        board: &'a mut Board,
        config: &'a GameConfig,
        difficulty: Difficulty,
        rng: &'a mut R,
        now: Instant,
    ) -> Self {
        Self {
            board,
            config,
            difficulty,
            now,
            rng,
        }
    }

    /// Consumes one stun turn, if any remain.
    pub fn stun_gate(&self, agent: &mut Agent) -> Option<TurnAction> {
        if agent.stunned_turns == 0 {
            return None;
        }
        agent.stunned_turns -= 1;
        tracing::debug!(agent = %agent.name, remaining = agent.stunned_turns, "stunned, skipping turn");
        Some(TurnAction::Stunned {
            remaining: agent.stunned_turns,
        })
    }

    /// Bernoulli trial against the injected random source.
    pub fn roll(&mut self, chance: f64) -> bool {
        self.rng.gen_bool(chance.clamp(0.0, 1.0))
    }

    /// Moves `agent` onto the adjacent cell `next`.
    pub fn move_to(&mut self, agent: &mut Agent, next: Cell) -> TurnAction {
        match Direction::between(agent.cell, next) {
            Some(direction) => self.step(agent, direction),
            None => {
                tracing::warn!(agent = %agent.name, from = %agent.cell, to = %next, "step target is not adjacent");
                TurnAction::Idle
            }
        }
    }

    /// Takes the first step of the shortest path to `target`, or `None` when
    /// no path exists.
    pub fn step_toward(&mut self, agent: &mut Agent, target: Cell) -> Option<TurnAction> {
        let next = pathfinding::next_step(agent.cell, target, self.board)?;
        Some(self.move_to(agent, next))
    }

    /// Steps to `next` unless that would return the agent to the cell it just
    /// left, in which case a random passable detour is taken instead.
    pub fn guarded_step(&mut self, agent: &mut Agent, next: Cell) -> TurnAction {
        if agent.last_pos != Some(next) {
            return self.move_to(agent, next);
        }

        match self.random_direction(agent.cell, agent.last_pos) {
            Some(direction) => self.step(agent, direction),
            None => self.random_step(agent),
        }
    }

    /// A step in a random passable direction, or `None` when boxed in.
    pub fn retreat_step(&mut self, agent: &mut Agent) -> Option<TurnAction> {
        let direction = self.random_direction(agent.cell, None)?;
        Some(self.step(agent, direction))
    }

    /// Last-resort move: a uniformly random passable step, idling when every
    /// neighbour is blocked.
    pub fn random_step(&mut self, agent: &mut Agent) -> TurnAction {
        self.retreat_step(agent).unwrap_or(TurnAction::Idle)
    }

    /// Melee strike; out of reach it changes nothing.
    pub fn melee(&self, agent: &Agent, opponent: &mut Agent) -> TurnAction {
        TurnAction::Melee {
            damage: agent.melee(opponent, self.config),
        }
    }

    pub fn schedule_ranged(&self, agent: &mut Agent, target: Cell) -> TurnAction {
        agent.schedule_ranged(target, self.config);
        TurnAction::RangedScheduled { target }
    }

    fn step(&mut self, agent: &mut Agent, direction: Direction) -> TurnAction {
        match agent.step(direction, self.board, self.now, self.config) {
            Ok(outcome) => TurnAction::Moved {
                from: outcome.from,
                to: outcome.to,
            },
            Err(err) => {
                tracing::debug!(
                    agent = %agent.name,
                    %direction,
                    code = err.error_code(),
                    severity = err.severity().as_str(),
                    "move rejected"
                );
                TurnAction::MoveBlocked { direction }
            }
        }
    }

    fn random_direction(&mut self, from: Cell, avoid: Option<Cell>) -> Option<Direction> {
        let mut directions = Direction::ALL;
        directions.shuffle(&mut *self.rng);
        directions.into_iter().find(|&direction| {
            let next = from.offset(direction);
            self.board.is_passable(next) && Some(next) != avoid
        })
    }
}

#[cfg(test)]
mod tests {
    use game_core::Personality;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn fixture() -> (Board, GameConfig, StdRng) {
        (
            Board::new(5).unwrap(),
            GameConfig::default(),
            StdRng::seed_from_u64(7),
        )
    }

    #[test]
    fn stun_gate_counts_down() {
        let (mut board, config, mut rng) = fixture();
        let ctx = DecisionContext::new(&mut board, &config, Difficulty::Easy, &mut rng, Instant::now());
        let mut agent = Agent::new("AI", Cell::new(2, 2), Personality::Balanced);

        assert_eq!(ctx.stun_gate(&mut agent), None);
        agent.stun(1);
        assert_eq!(ctx.stun_gate(&mut agent), Some(TurnAction::Stunned { remaining: 0 }));
        assert_eq!(ctx.stun_gate(&mut agent), None);
    }

    #[test]
    fn guarded_step_avoids_previous_cell() {
        let (mut board, config, mut rng) = fixture();
        let mut ctx = DecisionContext::new(&mut board, &config, Difficulty::Easy, &mut rng, Instant::now());
        let mut agent = Agent::new("AI", Cell::new(2, 2), Personality::Balanced);
        agent.last_pos = Some(Cell::new(2, 1));

        for _ in 0..8 {
            let mut probe = agent.clone();
            match ctx.guarded_step(&mut probe, Cell::new(2, 1)) {
                TurnAction::Moved { to, .. } => assert_ne!(to, Cell::new(2, 1)),
                other => panic!("unexpected action {other:?}"),
            }
        }
    }

    #[test]
    fn boxed_in_agent_idles() {
        let (mut board, config, mut rng) = fixture();
        board.place_obstacle(Cell::new(0, 1)).unwrap();
        board.place_obstacle(Cell::new(1, 0)).unwrap();
        board.place_obstacle(Cell::new(1, 2)).unwrap();
        board.place_obstacle(Cell::new(2, 1)).unwrap();
        let mut ctx = DecisionContext::new(&mut board, &config, Difficulty::Easy, &mut rng, Instant::now());
        let mut agent = Agent::new("AI", Cell::new(1, 1), Personality::Balanced);

        assert_eq!(ctx.retreat_step(&mut agent), None);
        assert_eq!(ctx.random_step(&mut agent), TurnAction::Idle);
        assert_eq!(agent.cell, Cell::new(1, 1));
    }

    #[test]
    fn step_toward_follows_the_path() {
        let (mut board, config, mut rng) = fixture();
        let mut ctx = DecisionContext::new(&mut board, &config, Difficulty::Easy, &mut rng, Instant::now());
        let mut agent = Agent::new("AI", Cell::new(0, 0), Personality::Balanced);

        let action = ctx.step_toward(&mut agent, Cell::new(0, 3)).unwrap();
        assert_eq!(
            action,
            TurnAction::Moved {
                from: Cell::new(0, 0),
                to: Cell::new(0, 1)
            }
        );
        assert_eq!(ctx.step_toward(&mut agent, Cell::new(0, 1)), None);
    }
}

//! Symmetric policy for AI-vs-AI rounds.
//!
//! Both agents run the same ladder, so nothing here may depend on which side
//! of the board an agent started from except the goal it adopts on its first
//! turn.

use std::time::Instant;

use game_core::{Agent, Board, Cell, Difficulty, GameConfig};
use rand::Rng;

use super::context::DecisionContext;
use super::pathfinding;
use crate::api::{ActionProvider, TurnAction};
use crate::config::AiConfig;

/// Decision policy shared by both agents of an AI-vs-AI round.
#[derive(Clone, Debug, Default)]
pub struct MirrorPolicy {
    game: GameConfig,
    ai: AiConfig,
}

impl MirrorPolicy {
    pub fn new(game: GameConfig, ai: AiConfig) -> Self {
        Self { game, ai }
    }

    /// Decides and applies one turn for `agent`.
    ///
    /// Priority ladder, first applicable rung wins:
    ///
    /// 1. finish a weakened opponent within melee range
    /// 2. melee within range, or retreat toward the goal while cooling down
    /// 3. ranged harassment inside the harass band
    /// 4. step toward the goal, detouring over resources that do not lengthen
    ///    the route
    /// 5. a random passable step
    pub fn decide<R: Rng + ?Sized>(
        &self,
        agent: &mut Agent,
        opponent: &mut Agent,
        board: &mut Board,
        difficulty: Difficulty,
        rng: &mut R,
        now: Instant,
    ) -> TurnAction {
        let mut ctx = DecisionContext::new(board, &self.game, difficulty, rng, now);
        if let Some(stunned) = ctx.stun_gate(agent) {
            return stunned;
        }

        let corner = farther_corner(agent.cell, ctx.board.size());
        let goal = *agent.mirror.goal.get_or_insert(corner);
        track_progress(agent, goal);

        let action = self.ladder(&mut ctx, agent, opponent, goal);
        tracing::debug!(
            agent = %agent.name,
            %goal,
            no_progress = agent.mirror.no_progress_turns,
            ?action,
            "mirror policy decided"
        );
        action
    }

    fn ladder<R: Rng + ?Sized>(
        &self,
        ctx: &mut DecisionContext<'_, R>,
        agent: &mut Agent,
        opponent: &mut Agent,
        goal: Cell,
    ) -> TurnAction {
        let distance = agent.distance(opponent);
        let in_melee = distance <= ctx.difficulty.melee_range();

        if in_melee && opponent.health <= self.ai.finish_threshold {
            let action = ctx.melee(agent, opponent);
            agent.mirror.attack_cooldown = self.ai.melee_cooldown_turns;
            return action;
        }

        if in_melee {
            if agent.mirror.attack_cooldown == 0 {
                let action = ctx.melee(agent, opponent);
                agent.mirror.attack_cooldown = self.ai.melee_cooldown_turns;
                return action;
            }
            agent.mirror.attack_cooldown -= 1;
            return match pathfinding::next_step(agent.cell, goal, ctx.board) {
                Some(next) => ctx.guarded_step(agent, next),
                None => ctx.random_step(agent),
            };
        }

        let harass_band = self.ai.harass_min_distance..=self.ai.harass_max_distance;
        if harass_band.contains(&distance) && agent.ranged_cooldown == 0 {
            let action = ctx.schedule_ranged(agent, opponent.cell);
            agent.ranged_cooldown = self.ai.ranged_cooldown_turns;
            return action;
        }
        agent.ranged_cooldown = agent.ranged_cooldown.saturating_sub(1);

        match preferred_step(agent.cell, goal, ctx.board) {
            Some(next) => ctx.guarded_step(agent, next),
            None => ctx.random_step(agent),
        }
    }
}

/// Of `(0, 0)` and `(size-1, size-1)`, the corner farther from `cell`; ties
/// go to the bottom-right corner.
pub fn farther_corner(cell: Cell, size: u32) -> Cell {
    let last = size as i32 - 1;
    let origin = Cell::ORIGIN;
    let far = Cell::new(last, last);
    if cell.manhattan(origin) > cell.manhattan(far) {
        origin
    } else {
        far
    }
}

/// Picks between the next step toward the goal and the next step toward the
/// nearest resource, taking the resource step when it lands no farther from
/// the goal.
fn preferred_step(from: Cell, goal: Cell, board: &Board) -> Option<Cell> {
    let goal_step = pathfinding::next_step(from, goal, board);
    let resource_step = board
        .nearest_resource(from)
        .and_then(|resource| pathfinding::next_step(from, resource, board));

    match (goal_step, resource_step) {
        (Some(g), Some(r)) if r.manhattan(goal) <= g.manhattan(goal) => Some(r),
        (None, Some(r)) => Some(r),
        (step, _) => step,
    }
}

fn track_progress(agent: &mut Agent, goal: Cell) {
    let dist = agent.cell.manhattan(goal);
    let memory = &mut agent.mirror;
    match memory.last_goal_dist {
        Some(previous) if dist < previous => memory.no_progress_turns = 0,
        Some(_) => memory.no_progress_turns += 1,
        None => {}
    }
    memory.last_goal_dist = Some(dist);
}

impl ActionProvider for MirrorPolicy {
    fn provide_action<R: Rng + ?Sized>(
        &self,
        agent: &mut Agent,
        opponent: &mut Agent,
        board: &mut Board,
        difficulty: Difficulty,
        rng: &mut R,
        now: Instant,
    ) -> TurnAction {
        self.decide(agent, opponent, board, difficulty, rng, now)
    }
}

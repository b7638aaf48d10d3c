//! Difficulty-tiered behavior policy for an AI agent facing a player.
//!
//! Every turn starts with the stun gate. The tiered strategy then runs one of
//! three controllers:
//!
//! - **easy / medium**: melee when close, otherwise a fuzzy gather-vs-advance
//!   choice between the nearest resource and the goal
//! - **hard**: melee when close, otherwise the strongest of ranged attack,
//!   advance and gather
//!
//! The utility strategy instead takes the argmax of the personality-weighted
//! attack/retreat/gather desirabilities, with attack cooldowns and, at the
//! hard tier, adversarial search.

use std::time::Instant;

use game_core::{Agent, Board, Difficulty, GameConfig};
use rand::Rng;

use super::context::DecisionContext;
use super::fuzzy::{Desirability, Desire, FuzzyFeatures, Objectives, TierProfile};
use super::search::{AdversarialSearch, Duel, SearchAction};
use crate::api::{ActionProvider, TurnAction};
use crate::config::{AiConfig, Strategy};

/// Decision policy for the AI side of a player-vs-AI round.
#[derive(Clone, Debug, Default)]
pub struct BehaviorPolicy {
    game: GameConfig,
    ai: AiConfig,
}

impl BehaviorPolicy {
    pub fn new(game: GameConfig, ai: AiConfig) -> Self {
        Self { game, ai }
    }

    /// Decides and applies one turn for `agent`.
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

        let action = match (self.ai.strategy, difficulty) {
            (Strategy::Tiered, Difficulty::Easy | Difficulty::Medium) => {
                self.gather_or_advance(&mut ctx, agent, opponent)
            }
            (Strategy::Tiered, Difficulty::Hard) => self.hard(&mut ctx, agent, opponent),
            (Strategy::Utility, _) => self.utility(&mut ctx, agent, opponent),
        };

        tracing::debug!(
            agent = %agent.name,
            %difficulty,
            strategy = %self.ai.strategy,
            ?action,
            "behavior policy decided"
        );
        action
    }

    fn gather_or_advance<R: Rng + ?Sized>(
        &self,
        ctx: &mut DecisionContext<'_, R>,
        agent: &mut Agent,
        opponent: &mut Agent,
    ) -> TurnAction {
        if agent.distance(opponent) <= self.game.melee_reach {
            return ctx.melee(agent, opponent);
        }

        let goal = ctx.board.goals().end_ai;
        let profile = TierProfile::for_difficulty(ctx.difficulty);
        let obj = Objectives::assess(agent.cell, ctx.board, goal, &profile);
        let near = obj.near_resource;
        let far = obj.far_from_end;

        // Easy leans toward resources and breaks ties that way; medium leans
        // toward the goal.
        let target = match (ctx.difficulty, obj.nearest_resource) {
            (Difficulty::Easy, Some(resource)) => {
                let gather = 0.7 * near + 0.3 * far;
                let advance = 0.4 * (1.0 - near) + 0.6 * (1.0 - far);
                if gather >= advance
                    && let Some(action) = ctx.step_toward(agent, resource)
                {
                    return action;
                }
                goal
            }
            (Difficulty::Easy, None) => goal,
            (_, Some(resource)) => {
                let gather = 0.4 * near + 0.6 * far;
                let advance = 0.75 * (1.0 - near) + 0.25 * (1.0 - far);
                if advance > gather { goal } else { resource }
            }
            (_, None) => goal,
        };

        ctx.step_toward(agent, target).unwrap_or_else(|| ctx.random_step(agent))
    }

    fn hard<R: Rng + ?Sized>(
        &self,
        ctx: &mut DecisionContext<'_, R>,
        agent: &mut Agent,
        opponent: &mut Agent,
    ) -> TurnAction {
        let distance = agent.distance(opponent);
        if distance <= self.game.melee_reach {
            return ctx.melee(agent, opponent);
        }

        let goal = ctx.board.goals().end_ai;
        let profile = TierProfile::for_difficulty(Difficulty::Hard);
        let obj = Objectives::assess(agent.cell, ctx.board, goal, &profile);
        let features = FuzzyFeatures::new(agent.health, distance);

        let mut attack = 0.7 * features.dist_far + 0.3 * features.health_high;
        if agent.ranged_cooldown > 0 {
            attack *= 0.6;
        }
        let advance = 0.7 * (1.0 - obj.far_from_end);
        let gather = 0.3 * obj.near_resource;

        if attack >= advance.max(gather) {
            if agent.ranged_cooldown == 0 {
                let action = ctx.schedule_ranged(agent, opponent.cell);
                agent.ranged_cooldown = self.ai.ranged_cooldown_turns;
                return action;
            }
            agent.ranged_cooldown -= 1;
            return ctx.step_toward(agent, opponent.cell).unwrap_or(TurnAction::Idle);
        }

        if advance >= gather
            && let Some(action) = ctx.step_toward(agent, goal)
        {
            return action;
        }
        if let Some(resource) = obj.nearest_resource
            && let Some(action) = ctx.step_toward(agent, resource)
        {
            return action;
        }
        ctx.random_step(agent)
    }

    fn utility<R: Rng + ?Sized>(
        &self,
        ctx: &mut DecisionContext<'_, R>,
        agent: &mut Agent,
        opponent: &mut Agent,
    ) -> TurnAction {
        let distance = agent.distance(opponent);
        let features = FuzzyFeatures::new(agent.health, distance);
        let desire = Desirability::from_features(&features, agent.personality)
            .scaled(ctx.difficulty)
            .best();
        tracing::trace!(agent = %agent.name, %desire, "utility desire");

        let action = match desire {
            Desire::Retreat => ctx.retreat_step(agent),
            Desire::Attack => self.attack(ctx, agent, opponent),
            Desire::Gather => self.gather(ctx, agent, opponent),
        };
        action.unwrap_or_else(|| ctx.random_step(agent))
    }

    fn attack<R: Rng + ?Sized>(
        &self,
        ctx: &mut DecisionContext<'_, R>,
        agent: &mut Agent,
        opponent: &mut Agent,
    ) -> Option<TurnAction> {
        if agent.attack_cooldown > 0 {
            agent.attack_cooldown -= 1;
            return Some(ctx.step_toward(agent, opponent.cell).unwrap_or(TurnAction::Idle));
        }

        let distance = agent.distance(opponent);
        let difficulty = ctx.difficulty;
        if !difficulty.uses_search() {
            if distance > difficulty.melee_range() {
                return None;
            }
            let action = ctx.melee(agent, opponent);
            agent.attack_cooldown = TierProfile::for_difficulty(difficulty).attack_cooldown;
            return Some(action);
        }

        if distance <= self.game.melee_reach {
            return Some(ctx.melee(agent, opponent));
        }

        let duel = Duel {
            attacker: agent.cell,
            attacker_hp: agent.health,
            defender: opponent.cell,
            defender_hp: opponent.health,
        };
        let (value, best) = AdversarialSearch::new(ctx.board, &self.ai.search).search(
            duel,
            self.ai.search.depth,
            true,
        );
        tracing::debug!(agent = %agent.name, value, ?best, "adversarial search");

        // Out of melee reach here, so a searched melee falls back to shooting.
        let action = match best {
            Some(SearchAction::Move { to }) => ctx.move_to(agent, to),
            _ => ctx.schedule_ranged(agent, opponent.cell),
        };
        Some(action)
    }

    fn gather<R: Rng + ?Sized>(
        &self,
        ctx: &mut DecisionContext<'_, R>,
        agent: &mut Agent,
        opponent: &Agent,
    ) -> Option<TurnAction> {
        let resource = ctx.board.nearest_resource(agent.cell)?;
        if let Some(action) = ctx.step_toward(agent, resource) {
            return Some(action);
        }

        let harass = ctx.difficulty == Difficulty::Medium
            && agent.distance(opponent) > self.game.melee_reach
            && ctx.roll(self.ai.harass_chance);
        harass.then(|| ctx.schedule_ranged(agent, opponent.cell))
    }
}

impl ActionProvider for BehaviorPolicy {
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

#[cfg(test)]
mod tests {
    use game_core::{Cell, Personality, ResourceKind};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::SearchConfig;

    struct Fixture {
        board: Board,
        ai: Agent,
        player: Agent,
        rng: StdRng,
        now: Instant,
    }

    impl Fixture {
        fn new(size: u32, ai: Cell, player: Cell) -> Self {
            Self {
                board: Board::new(size).unwrap(),
                ai: Agent::new("AI", ai, Personality::Balanced),
                player: Agent::new("Player", player, Personality::Balanced),
                rng: StdRng::seed_from_u64(11),
                now: Instant::now(),
            }
        }

        fn decide(&mut self, policy: &BehaviorPolicy, difficulty: Difficulty) -> TurnAction {
            policy.decide(
                &mut self.ai,
                &mut self.player,
                &mut self.board,
                difficulty,
                &mut self.rng,
                self.now,
            )
        }
    }

    fn utility_policy() -> BehaviorPolicy {
        BehaviorPolicy::new(
            GameConfig::default(),
            AiConfig {
                strategy: Strategy::Utility,
                ..AiConfig::default()
            },
        )
    }

    #[test]
    fn easy_heads_for_a_nearby_resource() {
        let mut fx = Fixture::new(12, Cell::new(5, 5), Cell::new(11, 11));
        fx.board.place_resource(Cell::new(5, 7), ResourceKind::Coin).unwrap();

        let action = fx.decide(&BehaviorPolicy::default(), Difficulty::Easy);
        assert_eq!(
            action,
            TurnAction::Moved {
                from: Cell::new(5, 5),
                to: Cell::new(5, 6)
            }
        );
    }

    #[test]
    fn medium_advances_to_goal_when_resources_are_far() {
        let mut fx = Fixture::new(12, Cell::new(3, 0), Cell::new(11, 11));
        fx.board.place_resource(Cell::new(3, 11), ResourceKind::Coin).unwrap();

        let action = fx.decide(&BehaviorPolicy::default(), Difficulty::Medium);
        assert_eq!(
            action,
            TurnAction::Moved {
                from: Cell::new(3, 0),
                to: Cell::new(2, 0)
            }
        );
    }

    #[test]
    fn hard_fires_then_closes_in_on_cooldown() {
        let mut fx = Fixture::new(12, Cell::new(10, 10), Cell::new(2, 2));
        let policy = BehaviorPolicy::default();

        let first = fx.decide(&policy, Difficulty::Hard);
        assert_eq!(first, TurnAction::RangedScheduled { target: Cell::new(2, 2) });
        assert_eq!(fx.ai.ranged_cooldown, 3);
        assert!(fx.ai.pending_ranged.is_some());

        let second = fx.decide(&policy, Difficulty::Hard);
        assert!(second.is_move());
        assert_eq!(fx.ai.ranged_cooldown, 2);
        assert_eq!(fx.ai.cell.manhattan(Cell::new(2, 2)), 15);
    }

    #[test]
    fn hard_melees_in_reach() {
        let mut fx = Fixture::new(12, Cell::new(4, 4), Cell::new(4, 6));
        let action = fx.decide(&BehaviorPolicy::default(), Difficulty::Hard);
        assert_eq!(action, TurnAction::Melee { damage: Some(15) });
        assert_eq!(fx.player.health, 85);
    }

    #[test]
    fn utility_attack_sets_cooldown_then_chases() {
        let mut fx = Fixture::new(8, Cell::new(3, 3), Cell::new(3, 4));
        fx.ai.personality = Personality::Aggressive;
        let policy = utility_policy();

        let first = fx.decide(&policy, Difficulty::Easy);
        assert_eq!(first, TurnAction::Melee { damage: Some(15) });
        assert_eq!(fx.ai.attack_cooldown, 2);

        // Cooling down: steps toward the opponent instead of striking again.
        let second = fx.decide(&policy, Difficulty::Easy);
        assert_eq!(fx.ai.attack_cooldown, 1);
        assert_eq!(
            second,
            TurnAction::Moved {
                from: Cell::new(3, 3),
                to: Cell::new(3, 4)
            }
        );
        assert_eq!(fx.player.health, 85);
    }

    #[test]
    fn utility_retreat_moves_away_when_hurt() {
        let mut fx = Fixture::new(8, Cell::new(3, 3), Cell::new(3, 4));
        fx.ai.personality = Personality::Defensive;
        fx.ai.health = 10;

        let action = fx.decide(&utility_policy(), Difficulty::Medium);
        assert!(action.is_move());
        assert_eq!(fx.player.health, 100);
    }

    #[test]
    fn utility_hard_shoots_when_search_prefers_it() {
        let mut fx = Fixture::new(10, Cell::new(1, 1), Cell::new(1, 4));
        fx.ai.personality = Personality::Aggressive;

        // Two plies: Shoot scores 0 against -2 for Stay, closing in lets the
        // player strike first.
        let action = fx.decide(&utility_policy(), Difficulty::Hard);
        assert_eq!(action, TurnAction::RangedScheduled { target: Cell::new(1, 4) });
        assert_eq!(fx.ai.cell, Cell::new(1, 1));
        assert!(fx.ai.pending_ranged.is_some());
        assert_eq!(fx.player.health, 100);
    }

    #[test]
    fn utility_hard_follows_a_searched_move() {
        let mut fx = Fixture::new(10, Cell::new(1, 1), Cell::new(1, 4));
        fx.ai.personality = Personality::Aggressive;
        let policy = BehaviorPolicy::new(
            GameConfig::default(),
            AiConfig {
                strategy: Strategy::Utility,
                search: SearchConfig {
                    depth: 1,
                    shoot_bonus: 0.0,
                    ..SearchConfig::default()
                },
                ..AiConfig::default()
            },
        );

        // One ply without the bonus: stepping east is the only improvement.
        let action = fx.decide(&policy, Difficulty::Hard);
        assert_eq!(
            action,
            TurnAction::Moved {
                from: Cell::new(1, 1),
                to: Cell::new(1, 2)
            }
        );
        assert_eq!(fx.ai.pending_ranged, None);
    }

    #[test]
    fn medium_harasses_when_the_resource_is_walled_in() {
        let policy = utility_policy();
        let (mut ranged, mut moved) = (0, 0);

        for seed in 0..200 {
            let mut fx = Fixture::new(8, Cell::new(5, 5), Cell::new(2, 1));
            fx.rng = StdRng::seed_from_u64(seed);
            fx.board.place_resource(Cell::new(0, 3), ResourceKind::Coin).unwrap();
            for wall in [Cell::new(0, 2), Cell::new(0, 4), Cell::new(1, 3)] {
                fx.board.place_obstacle(wall).unwrap();
            }

            match fx.decide(&policy, Difficulty::Medium) {
                TurnAction::RangedScheduled { target } => {
                    assert_eq!(target, Cell::new(2, 1));
                    ranged += 1;
                }
                TurnAction::Moved { from, .. } => {
                    assert_eq!(from, Cell::new(5, 5));
                    moved += 1;
                }
                other => panic!("unexpected action {other:?}"),
            }
        }

        assert_eq!(ranged + moved, 200);
        assert!((50..=110).contains(&ranged), "ranged {ranged} of 200");
    }
}

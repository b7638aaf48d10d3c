//! Turn driver for a single round.
//!
//! A [`Session`] owns the board, both agents and the seeded random source.
//! Every call advances exactly one agent by one turn; a round counts as one
//! turn against the limit once both sides have acted.

use std::time::Instant;

use game_core::{
    Agent, Board, Cell, Direction, GameError, Personality, RoundOutcome, generate_board,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use strum::IntoEnumIterator;

use crate::api::{ActionProvider, Result, RuntimeError, TurnAction};
use crate::config::{Mode, RuntimeConfig};
use crate::providers::{BehaviorPolicy, MirrorPolicy, ai::predict};

/// Which agent acts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    /// The player, or Blue in AI-vs-AI.
    First,
    /// The AI, or Red in AI-vs-AI.
    Second,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

#[derive(Debug)]
pub struct Session {
    config: RuntimeConfig,
    board: Board,
    first: Agent,
    second: Agent,
    next: Side,
    turn: u32,
    outcome: Option<RoundOutcome>,
    rng: StdRng,
    behavior: BehaviorPolicy,
    mirror: MirrorPolicy,
}

impl Session {
    /// Starts a round on a freshly generated board.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let counts = config.game_config.item_counts(config.difficulty);
        let board = generate_board(config.game_config.grid_size, counts, &mut rng)?;
        Ok(Self::assemble(config, board, rng))
    }

    /// Starts a round on a supplied board, e.g. one loaded from a map file.
    pub fn with_board(config: RuntimeConfig, board: Board) -> Result<Self> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self::assemble(config, board, rng))
    }

    fn assemble(config: RuntimeConfig, board: Board, mut rng: StdRng) -> Self {
        let last = board.size() as i32 - 1;
        let (first, second) = match config.mode {
            Mode::PlayerVsAi => {
                let personality = Personality::iter().choose(&mut rng).unwrap_or_default();
                (
                    Agent::new("Player", Cell::ORIGIN, Personality::Balanced),
                    Agent::new("AI", Cell::new(last, last), personality),
                )
            }
            Mode::AiVsAi => (
                Agent::new("Blue", Cell::ORIGIN, Personality::Balanced),
                Agent::new("Red", Cell::new(last, last), Personality::Balanced),
            ),
        };

        tracing::info!(
            mode = %config.mode,
            difficulty = %config.difficulty,
            size = board.size(),
            seed = config.seed,
            ai_personality = %second.personality,
            "round started"
        );

        Self {
            behavior: BehaviorPolicy::new(config.game_config.clone(), config.ai_config.clone()),
            mirror: MirrorPolicy::new(config.game_config.clone(), config.ai_config.clone()),
            config,
            board,
            first,
            second,
            next: Side::First,
            turn: 0,
            outcome: None,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn agents(&self) -> (&Agent, &Agent) {
        (&self.first, &self.second)
    }

    pub fn agent(&self, side: Side) -> &Agent {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn next_side(&self) -> Side {
        self.next
    }

    /// Completed rounds.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Where `side` is expected to stand after its next move.
    pub fn predicted_cell(&self, side: Side) -> Cell {
        predict(self.agent(side), &self.board)
    }

    /// Moves the human player one step.
    ///
    /// A blocked step still spends the turn.
    pub fn player_step(&mut self, direction: Direction, now: Instant) -> Result<TurnAction> {
        self.ensure_mode(Mode::PlayerVsAi)?;
        self.ensure_running()?;

        let game = &self.config.game_config;
        let (player, ai) = (&mut self.first, &mut self.second);
        player.expire_buffs(now);
        player.resolve_pending_ranged(ai, game);

        let action = if player.stunned_turns > 0 {
            player.stunned_turns -= 1;
            TurnAction::Stunned {
                remaining: player.stunned_turns,
            }
        } else {
            match player.step(direction, &mut self.board, now, game) {
                Ok(outcome) => TurnAction::Moved {
                    from: outcome.from,
                    to: outcome.to,
                },
                Err(err) => {
                    tracing::debug!(
                        code = err.error_code(),
                        severity = err.severity().as_str(),
                        "player move rejected: {err}"
                    );
                    TurnAction::MoveBlocked { direction }
                }
            }
        };

        self.finish_turn(Side::First);
        Ok(action)
    }

    /// Plays one turn for the next AI-controlled agent.
    ///
    /// In player-vs-AI mode this is always the AI; in AI-vs-AI mode the two
    /// agents alternate, Blue first.
    pub fn ai_turn(&mut self, now: Instant) -> Result<TurnAction> {
        self.ensure_running()?;

        let side = match self.config.mode {
            Mode::PlayerVsAi => Side::Second,
            Mode::AiVsAi => self.next,
        };
        let (actor, opponent) = match side {
            Side::First => (&mut self.first, &mut self.second),
            Side::Second => (&mut self.second, &mut self.first),
        };

        actor.expire_buffs(now);
        let game = &self.config.game_config;
        if let Some(resolution) = actor.resolve_pending_ranged(opponent, game) {
            tracing::debug!(agent = %actor.name, ?resolution, "pending ranged strike advanced");
        }

        let difficulty = self.config.difficulty;
        let (board, rng) = (&mut self.board, &mut self.rng);
        let action = match self.config.mode {
            Mode::PlayerVsAi => {
                self.behavior.provide_action(actor, opponent, board, difficulty, rng, now)
            }
            Mode::AiVsAi => {
                self.mirror.provide_action(actor, opponent, board, difficulty, rng, now)
            }
        };

        self.finish_turn(side);
        Ok(action)
    }

    /// Plays an AI-vs-AI round to the end, sampling the clock before every
    /// turn.
    pub fn run_to_completion<F>(&mut self, mut now: F) -> Result<RoundOutcome>
    where
        F: FnMut() -> Instant,
    {
        self.ensure_mode(Mode::AiVsAi)?;
        loop {
            if let Some(outcome) = self.outcome {
                return Ok(outcome);
            }
            self.ai_turn(now())?;
        }
    }

    fn finish_turn(&mut self, side: Side) {
        if side == Side::Second {
            self.turn += 1;
        }
        self.next = side.other();

        let goals = self.board.goals();
        self.outcome = RoundOutcome::evaluate(
            (&self.first, goals.end_player),
            (&self.second, goals.end_ai),
            self.turn,
            self.config.game_config.max_turns,
        );
        if let Some(outcome) = self.outcome {
            tracing::info!(
                winner = %outcome.winner,
                reason = %outcome.reason,
                turn = self.turn,
                first_score = self.first.score,
                second_score = self.second.score,
                "round over"
            );
        }
    }

    fn ensure_mode(&self, expected: Mode) -> Result<()> {
        if self.config.mode != expected {
            return Err(RuntimeError::ModeMismatch {
                expected,
                actual: self.config.mode,
            });
        }
        Ok(())
    }

    fn ensure_running(&self) -> Result<()> {
        match self.outcome {
            Some(_) => Err(RuntimeError::RoundOver),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use game_core::{OutcomeReason, Winner};

    use super::*;

    fn config(mode: Mode) -> RuntimeConfig {
        RuntimeConfig {
            mode,
            seed: 42,
            ..RuntimeConfig::default()
        }
    }

    #[test]
    fn spawns_agents_in_opposite_corners() {
        let session = Session::new(config(Mode::PlayerVsAi)).unwrap();
        let (player, ai) = session.agents();
        assert_eq!(player.name, "Player");
        assert_eq!(player.cell, Cell::ORIGIN);
        assert_eq!(ai.name, "AI");
        assert_eq!(ai.cell, Cell::new(11, 11));
        assert_eq!(session.turn(), 0);
        assert_eq!(session.outcome(), None);
    }

    #[test]
    fn player_step_requires_player_mode() {
        let mut session = Session::new(config(Mode::AiVsAi)).unwrap();
        let err = session
            .player_step(Direction::South, Instant::now())
            .unwrap_err();
        assert!(matches!(err, RuntimeError::ModeMismatch { .. }));
        assert_eq!(err.error_code(), "RUNTIME_MODE_MISMATCH");
        assert!(err.severity().is_recoverable());
    }

    #[test]
    fn construction_errors_report_codes() {
        let mut crowded = config(Mode::AiVsAi);
        crowded.game_config.grid_size = 3;
        let err = Session::new(crowded).unwrap_err();
        assert_eq!(err.error_code(), "BOARD_NOT_ENOUGH_SPACE");
        assert_eq!(err.severity(), game_core::ErrorSeverity::Validation);

        let mut invalid = config(Mode::AiVsAi);
        invalid.ai_config.harass_chance = 1.5;
        let err = Session::new(invalid).unwrap_err();
        assert_eq!(err.error_code(), "RUNTIME_CONFIG");
        assert!(!err.severity().is_recoverable());
    }

    #[test]
    fn blocked_player_step_spends_the_turn() {
        let board = Board::new(6).unwrap();
        let mut session = Session::with_board(config(Mode::PlayerVsAi), board).unwrap();

        let action = session.player_step(Direction::North, Instant::now()).unwrap();
        assert_eq!(action, TurnAction::MoveBlocked { direction: Direction::North });
        assert_eq!(session.next_side(), Side::Second);

        session.ai_turn(Instant::now()).unwrap();
        assert_eq!(session.turn(), 1);
    }

    #[test]
    fn reaching_the_goal_ends_the_round() {
        let board = Board::new(2).unwrap();
        let mut session = Session::with_board(config(Mode::PlayerVsAi), board).unwrap();

        session.player_step(Direction::South, Instant::now()).unwrap();
        session.ai_turn(Instant::now()).unwrap();
        session.player_step(Direction::East, Instant::now()).unwrap_or(TurnAction::Idle);

        let outcome = session.outcome();
        assert!(outcome.is_some());
        assert!(matches!(
            session.ai_turn(Instant::now()),
            Err(RuntimeError::RoundOver)
        ));
    }

    #[test]
    fn ai_vs_ai_round_terminates_within_the_turn_limit() {
        let mut session = Session::new(config(Mode::AiVsAi)).unwrap();
        let outcome = session.run_to_completion(Instant::now).unwrap();

        assert!(session.turn() <= game_core::GameConfig::DEFAULT_MAX_TURNS);
        if outcome.reason == OutcomeReason::TurnLimit {
            let (blue, red) = session.agents();
            let expected = match blue.score.cmp(&red.score) {
                std::cmp::Ordering::Greater => Winner::First,
                std::cmp::Ordering::Less => Winner::Second,
                std::cmp::Ordering::Equal => Winner::Draw,
            };
            assert_eq!(outcome.winner, expected);
        }
    }

    #[test]
    fn invalid_ai_config_is_rejected() {
        let mut cfg = config(Mode::AiVsAi);
        cfg.ai_config.harass_chance = 1.5;
        assert!(matches!(
            Session::new(cfg),
            Err(RuntimeError::Config { .. })
        ));
    }
}

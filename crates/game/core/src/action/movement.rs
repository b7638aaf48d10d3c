use std::time::Instant;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Agent, Board, Buff, Cell, Direction, ResourceKind, TrapKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Cell },

    #[error("destination {destination} is blocked")]
    Blocked { destination: Cell },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            Self::Blocked { .. } => "MOVE_BLOCKED",
        }
    }
}

/// Effect picked up on entering a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pickup {
    Resource(ResourceKind),
    Trap { kind: TrapKind, damage: i32 },
}

/// Result of a successful step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    pub from: Cell,
    pub to: Cell,
    pub pickup: Option<Pickup>,
    /// The step smashed an obstacle using the shield buff.
    pub broke_obstacle: bool,
}

impl Agent {
    /// Moves one cell in `direction`, applying the destination's contents.
    ///
    /// - Off-board destinations and obstacles (without an active shield) are
    ///   rejected and leave the agent untouched.
    /// - With an active shield the obstacle is destroyed, the shield consumed,
    ///   and the agent enters the cleared cell.
    /// - Otherwise a resource or trap on the destination is popped from the
    ///   board and applied exactly once.
    pub fn step(
        &mut self,
        direction: Direction,
        board: &mut Board,
        now: Instant,
        config: &GameConfig,
    ) -> Result<StepOutcome, MoveError> {
        let from = self.cell;
        let destination = from.offset(direction);
        if !board.contains(destination) {
            return Err(MoveError::OutOfBounds { destination });
        }

        if board.is_obstacle(destination) {
            if !self.has_buff(Buff::Shield, now) {
                return Err(MoveError::Blocked { destination });
            }
            board.clear_obstacle(destination);
            self.consume_buff(Buff::Shield);
            self.enter(destination);
            tracing::debug!(agent = %self.name, cell = %destination, "shield broke obstacle");

            return Ok(StepOutcome {
                from,
                to: destination,
                pickup: None,
                broke_obstacle: true,
            });
        }

        self.enter(destination);
        let pickup = self.collect(board, now, config);

        Ok(StepOutcome {
            from,
            to: destination,
            pickup,
            broke_obstacle: false,
        })
    }

    fn enter(&mut self, destination: Cell) {
        self.last_pos = Some(self.cell);
        self.cell = destination;
    }

    fn collect(&mut self, board: &mut Board, now: Instant, config: &GameConfig) -> Option<Pickup> {
        if let Some(kind) = board.take_resource(self.cell) {
            match kind {
                ResourceKind::Coin => self.score += config.coin_score,
                ResourceKind::Health => self.heal(config.heal_amount),
                ResourceKind::Shield => {
                    self.grant_buff(Buff::Shield, now + config.shield_duration())
                }
            }
            self.last_pickup = Some(kind);
            self.last_collected = Some(self.cell);
            tracing::debug!(agent = %self.name, %kind, cell = %self.cell, "collected resource");
            return Some(Pickup::Resource(kind));
        }

        if let Some(kind) = board.take_trap(self.cell) {
            let damage = kind.damage(config);
            self.take_damage(damage);
            tracing::debug!(agent = %self.name, %kind, damage, "stepped on trap");
            return Some(Pickup::Trap { kind, damage });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::state::{CellKind, Personality};

    fn setup() -> (Agent, Board, GameConfig, Instant) {
        let board = Board::new(5).unwrap();
        let agent = Agent::new("AI", Cell::new(2, 2), Personality::Balanced);
        (agent, board, GameConfig::default(), Instant::now())
    }

    #[test]
    fn step_records_last_position() {
        let (mut agent, mut board, config, now) = setup();
        let outcome = agent.step(Direction::East, &mut board, now, &config).unwrap();

        assert_eq!(outcome.to, Cell::new(2, 3));
        assert_eq!(agent.cell, Cell::new(2, 3));
        assert_eq!(agent.last_pos, Some(Cell::new(2, 2)));
    }

    #[test]
    fn off_board_and_obstacles_reject_the_step() {
        let (mut agent, mut board, config, now) = setup();
        agent.cell = Cell::new(0, 0);
        assert_eq!(
            agent.step(Direction::North, &mut board, now, &config),
            Err(MoveError::OutOfBounds {
                destination: Cell::new(-1, 0)
            })
        );

        board.place_obstacle(Cell::new(1, 0)).unwrap();
        assert_eq!(
            agent.step(Direction::South, &mut board, now, &config),
            Err(MoveError::Blocked {
                destination: Cell::new(1, 0)
            })
        );
        assert_eq!(agent.cell, Cell::new(0, 0));
        assert_eq!(agent.last_pos, None);
    }

    #[test]
    fn resources_apply_once() {
        let (mut agent, mut board, config, now) = setup();
        board.place_resource(Cell::new(2, 3), ResourceKind::Coin).unwrap();

        let outcome = agent.step(Direction::East, &mut board, now, &config).unwrap();
        assert_eq!(outcome.pickup, Some(Pickup::Resource(ResourceKind::Coin)));
        assert_eq!(agent.score, 10);
        assert_eq!(board.kind(Cell::new(2, 3)), Some(CellKind::Empty));

        agent.step(Direction::West, &mut board, now, &config).unwrap();
        agent.step(Direction::East, &mut board, now, &config).unwrap();
        assert_eq!(agent.score, 10);
        assert_eq!(agent.last_collected, Some(Cell::new(2, 3)));
    }

    #[test]
    fn health_pickup_clamps_and_trap_damages() {
        let (mut agent, mut board, config, now) = setup();
        board.place_trap(Cell::new(3, 2), TrapKind::Fire).unwrap();
        board.place_resource(Cell::new(4, 2), ResourceKind::Health).unwrap();

        agent.step(Direction::South, &mut board, now, &config).unwrap();
        assert_eq!(agent.health, 85);

        agent.step(Direction::South, &mut board, now, &config).unwrap();
        assert_eq!(agent.health, 100);
    }

    #[test]
    fn shield_breaks_a_single_obstacle() {
        let (mut agent, mut board, config, now) = setup();
        board.place_resource(Cell::new(2, 1), ResourceKind::Shield).unwrap();
        board.place_obstacle(Cell::new(2, 0)).unwrap();
        board.place_obstacle(Cell::new(1, 0)).unwrap();

        agent.step(Direction::West, &mut board, now, &config).unwrap();
        assert!(agent.has_buff(Buff::Shield, now));

        let outcome = agent.step(Direction::West, &mut board, now, &config).unwrap();
        assert!(outcome.broke_obstacle);
        assert!(!board.obstacles().contains(&Cell::new(2, 0)));
        assert!(!agent.has_buff(Buff::Shield, now));

        assert!(matches!(
            agent.step(Direction::North, &mut board, now, &config),
            Err(MoveError::Blocked { .. })
        ));
    }

    #[test]
    fn expired_shield_does_not_break_obstacles() {
        let (mut agent, mut board, config, now) = setup();
        board.place_resource(Cell::new(2, 1), ResourceKind::Shield).unwrap();
        board.place_obstacle(Cell::new(2, 0)).unwrap();
        agent.step(Direction::West, &mut board, now, &config).unwrap();

        let later = now + Duration::from_secs(config.shield_secs + 1);
        assert!(agent.step(Direction::West, &mut board, later, &config).is_err());
    }
}

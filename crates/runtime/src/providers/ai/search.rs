//! Bounded minimax with alpha-beta pruning over a two-agent duel.
//!
//! The search only ever touches local copies of positions and health; the
//! real agents and board are never mutated.

use arrayvec::ArrayVec;
use game_core::{Board, Cell};

use crate::config::SearchConfig;

/// Sentinel bound larger than any reachable evaluation.
const INF: f64 = 1e9;

/// Stay, up to four moves, Melee, Shoot.
const MAX_ACTIONS: usize = 7;

/// A candidate action in the simulated duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SearchAction {
    Stay,
    Move { to: Cell },
    Melee,
    /// Ranged strike; only the searched (maximizing) side may shoot.
    Shoot,
}

/// Positions and health of both sides in a simulated state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Duel {
    pub attacker: Cell,
    pub attacker_hp: i32,
    pub defender: Cell,
    pub defender_hp: i32,
}

impl Duel {
    pub fn distance(&self) -> u32 {
        self.attacker.manhattan(self.defender)
    }

    fn is_terminal(&self) -> bool {
        self.attacker_hp <= 0 || self.defender_hp <= 0
    }
}

/// Alpha-beta minimax searcher bound to one board.
pub struct AdversarialSearch<'a> {
    board: &'a Board,
    config: &'a SearchConfig,
}

impl<'a> AdversarialSearch<'a> {
    pub fn new(board: &'a Board, config: &'a SearchConfig) -> Self {
        Self { board, config }
    }

    /// Static evaluation from the attacker's point of view.
    pub fn evaluate(&self, duel: &Duel) -> f64 {
        f64::from(duel.attacker_hp - duel.defender_hp)
            - self.config.distance_weight * f64::from(duel.distance())
    }

    /// Returns the minimax value of `duel` searched `depth` plies deep and the
    /// action chosen at the root, if any.
    ///
    /// `depth == 0` or a side at or below zero health yields the static
    /// evaluation and no action. Among equally valued actions the earliest in
    /// enumeration order wins.
    ///
    /// The Shoot bonus is added after its child has been searched inside the
    /// current alpha-beta window. A child cut off early only reports a bound,
    /// so with a non-zero `shoot_bonus` the returned value can differ from an
    /// unpruned minimax. With `shoot_bonus == 0.0` both agree exactly.
    pub fn search(&self, duel: Duel, depth: u32, maximizing: bool) -> (f64, Option<SearchAction>) {
        let (value, action) = self.minimax(duel, depth, -INF, INF, maximizing);
        tracing::trace!(?duel, depth, value, ?action, "minimax search finished");
        (value, action)
    }

    fn minimax(
        &self,
        duel: Duel,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> (f64, Option<SearchAction>) {
        if depth == 0 || duel.is_terminal() {
            return (self.evaluate(&duel), None);
        }

        let mut best_action = None;
        if maximizing {
            let mut best = -INF;
            for action in self.actions(&duel, true) {
                let (mut value, _) =
                    self.minimax(self.apply(duel, action, true), depth - 1, alpha, beta, false);
                if action == SearchAction::Shoot {
                    value += self.config.shoot_bonus;
                }
                if value > best {
                    best = value;
                    best_action = Some(action);
                }
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
            (best, best_action)
        } else {
            let mut best = INF;
            for action in self.actions(&duel, false) {
                let (value, _) =
                    self.minimax(self.apply(duel, action, false), depth - 1, alpha, beta, true);
                if value < best {
                    best = value;
                    best_action = Some(action);
                }
                beta = beta.min(best);
                if beta <= alpha {
                    break;
                }
            }
            (best, best_action)
        }
    }

    /// Enumerates actions for the side to move: Stay, Move per passable
    /// neighbour in direction order, Melee when in reach, then Shoot for the
    /// maximizing side only.
    fn actions(&self, duel: &Duel, maximizing: bool) -> ArrayVec<SearchAction, MAX_ACTIONS> {
        let origin = if maximizing { duel.attacker } else { duel.defender };

        let mut actions = ArrayVec::new();
        actions.push(SearchAction::Stay);
        actions.extend(
            self.board
                .passable_neighbors(origin)
                .into_iter()
                .map(|to| SearchAction::Move { to }),
        );
        if duel.distance() <= self.config.melee_reach {
            actions.push(SearchAction::Melee);
        }
        if maximizing {
            actions.push(SearchAction::Shoot);
        }
        actions
    }

    fn apply(&self, mut duel: Duel, action: SearchAction, maximizing: bool) -> Duel {
        let damage = self.config.melee_damage;
        match (action, maximizing) {
            (SearchAction::Move { to }, true) => duel.attacker = to,
            (SearchAction::Move { to }, false) => duel.defender = to,
            (SearchAction::Melee, true) => duel.defender_hp = (duel.defender_hp - damage).max(0),
            (SearchAction::Melee, false) => duel.attacker_hp = (duel.attacker_hp - damage).max(0),
            (SearchAction::Stay | SearchAction::Shoot, _) => {}
        }
        duel
    }
}

/// Runs the search with the default weights.
pub fn best_action(
    attacker_pos: Cell,
    attacker_hp: i32,
    defender_pos: Cell,
    defender_hp: i32,
    board: &Board,
    depth: u32,
    maximizing: bool,
) -> (f64, Option<SearchAction>) {
    let config = SearchConfig::default();
    let duel = Duel {
        attacker: attacker_pos,
        attacker_hp,
        defender: defender_pos,
        defender_hp,
    };
    AdversarialSearch::new(board, &config).search(duel, depth, maximizing)
}

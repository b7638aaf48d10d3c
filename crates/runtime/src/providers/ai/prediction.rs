//! Opponent move prediction for previewing ranged strikes.

use game_core::{Agent, Board, Cell};

/// Guesses the cell `agent` will occupy after its next move.
///
/// - With a recorded previous cell, repeats the last displacement verbatim
///   (not clamped to a unit step) and falls back to the current cell when
///   that lands off the board.
/// - Otherwise leans one unit per axis toward the nearest resource.
/// - Otherwise assumes the agent stays put.
pub fn predict(agent: &Agent, board: &Board) -> Cell {
    let current = agent.cell;

    if let Some(last) = agent.last_pos {
        let (dr, dc) = current.delta_from(last);
        let next = Cell::new(current.row + dr, current.col + dc);
        return if board.contains(next) { next } else { current };
    }

    if let Some(resource) = board.nearest_resource(current) {
        let (dr, dc) = resource.delta_from(current);
        return Cell::new(current.row + dr.signum(), current.col + dc.signum());
    }

    current
}

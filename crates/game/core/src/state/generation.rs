//! Random board generation.

use rand::Rng;
use rand::seq::IteratorRandom;
use strum::IntoEnumIterator;

use super::{Board, BoardError, Cell, ResourceKind, TrapKind};
use crate::config::ItemCounts;

/// Scatters resources, then traps, then obstacles over empty, non-reserved
/// cells of a fresh `size × size` board.
///
/// Fails with [`BoardError::NotEnoughSpace`] when the counts cannot fit,
/// rather than searching forever for a free cell.
pub fn generate_board<R>(size: u32, counts: ItemCounts, rng: &mut R) -> Result<Board, BoardError>
where
    R: Rng + ?Sized,
{
    let mut board = Board::new(size)?;
    let mut free: Vec<Cell> = board.free_cells().collect();

    let requested = counts.total();
    if requested as usize > free.len() {
        return Err(BoardError::NotEnoughSpace {
            requested,
            available: free.len() as u32,
        });
    }

    for _ in 0..counts.resources {
        let cell = take_random(&mut free, rng);
        let kind = ResourceKind::iter()
            .choose(rng)
            .unwrap_or(ResourceKind::Coin);
        board.place_resource(cell, kind)?;
    }

    for _ in 0..counts.traps {
        let cell = take_random(&mut free, rng);
        let kind = TrapKind::iter().choose(rng).unwrap_or(TrapKind::Spike);
        board.place_trap(cell, kind)?;
    }

    for _ in 0..counts.obstacles {
        let cell = take_random(&mut free, rng);
        board.place_obstacle(cell)?;
    }

    tracing::debug!(
        size,
        resources = counts.resources,
        traps = counts.traps,
        obstacles = counts.obstacles,
        "generated board"
    );

    Ok(board)
}

// Callers guarantee `free` is non-empty.
fn take_random<R: Rng + ?Sized>(free: &mut Vec<Cell>, rng: &mut R) -> Cell {
    let idx = rng.gen_range(0..free.len());
    free.swap_remove(idx)
}

//! A* shortest paths on the 4-connected board.

use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};

use game_core::{Board, Cell};

/// Finds a shortest obstacle-free path from `start` to `goal`.
///
/// The returned path starts with the first step after `start` and ends with
/// `goal`. It is empty when `start == goal`, when either endpoint is off the
/// board, or when `goal` cannot be reached. Obstacles are impassable; the
/// start cell itself is never checked.
///
/// Uses the Manhattan heuristic, which is admissible and consistent for unit
/// step costs, so the first time `goal` is popped its path is optimal.
pub fn find_path(start: Cell, goal: Cell, board: &Board) -> Vec<Cell> {
    if start == goal || !board.contains(start) || !board.is_passable(goal) {
        return Vec::new();
    }

    let mut open = BinaryHeap::new();
    let mut came_from: HashMap<Cell, Cell> = HashMap::new();
    let mut g_score: HashMap<Cell, u32> = HashMap::from([(start, 0)]);
    open.push(Reverse((start.manhattan(goal), 0u32, start)));

    while let Some(Reverse((_, g, current))) = open.pop() {
        if current == goal {
            return reconstruct(&came_from, start, goal);
        }
        // Stale heap entry superseded by a cheaper route.
        if g_score.get(&current).is_some_and(|&best| g > best) {
            continue;
        }

        let tentative = g + 1;
        for next in board.passable_neighbors(current) {
            let improved = match g_score.entry(next) {
                Entry::Vacant(slot) => {
                    slot.insert(tentative);
                    true
                }
                Entry::Occupied(mut slot) if tentative < *slot.get() => {
                    slot.insert(tentative);
                    true
                }
                Entry::Occupied(_) => false,
            };
            if improved {
                came_from.insert(next, current);
                open.push(Reverse((tentative + next.manhattan(goal), tentative, next)));
            }
        }
    }

    Vec::new()
}

/// First step along [`find_path`], if any.
pub fn next_step(start: Cell, goal: Cell, board: &Board) -> Option<Cell> {
    find_path(start, goal, board).first().copied()
}

fn reconstruct(came_from: &HashMap<Cell, Cell>, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        if previous == start {
            break;
        }
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_board(size: u32) -> Board {
        Board::new(size).unwrap()
    }

    fn assert_contiguous(start: Cell, path: &[Cell]) {
        let mut previous = start;
        for &cell in path {
            assert_eq!(previous.manhattan(cell), 1, "{previous} -> {cell}");
            previous = cell;
        }
    }

    #[test]
    fn straight_line_on_open_board() {
        let board = open_board(5);
        let path = find_path(Cell::new(0, 0), Cell::new(0, 4), &board);
        assert_eq!(
            path,
            vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(0, 3), Cell::new(0, 4)]
        );
    }

    #[test]
    fn detours_around_a_wall() {
        let mut board = open_board(5);
        for row in 0..4 {
            board.place_obstacle(Cell::new(row, 2)).unwrap();
        }

        let start = Cell::new(0, 0);
        let goal = Cell::new(0, 4);
        let path = find_path(start, goal, &board);

        assert_eq!(path.len(), 12);
        assert_eq!(path.last(), Some(&goal));
        assert!(path.iter().all(|cell| !board.is_obstacle(*cell)));
        assert_contiguous(start, &path);
    }

    #[test]
    fn empty_when_goal_is_unreachable_or_trivial() {
        let mut board = open_board(4);
        board.place_obstacle(Cell::new(2, 3)).unwrap();
        board.place_obstacle(Cell::new(3, 2)).unwrap();

        assert!(find_path(Cell::new(0, 0), Cell::new(3, 3), &board).is_empty());
        assert!(find_path(Cell::new(1, 1), Cell::new(1, 1), &board).is_empty());
        assert!(find_path(Cell::new(0, 0), Cell::new(2, 3), &board).is_empty());
        assert!(find_path(Cell::new(0, 0), Cell::new(9, 9), &board).is_empty());
        assert_eq!(next_step(Cell::new(0, 0), Cell::new(3, 3), &board), None);
    }

    #[test]
    fn next_step_is_adjacent() {
        let board = open_board(6);
        let step = next_step(Cell::new(2, 2), Cell::new(5, 5), &board).unwrap();
        assert_eq!(step.manhattan(Cell::new(2, 2)), 1);
        assert_eq!(step.manhattan(Cell::new(5, 5)), 5);
    }
}

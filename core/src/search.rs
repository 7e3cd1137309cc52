use std::collections::VecDeque;

use ndarray::Array2;

use crate::*;

/// Finds an unrevealed cell (`Empty` or `Mine`) reachable from `from`, for handing keyboard
/// focus over after a reveal.
///
/// This is a breadth-first walk over the 8-neighbour graph and returns the first unrevealed
/// cell in visiting order. That is close to `from` but not guaranteed to be the nearest by
/// any distance metric; callers rely on the visiting order, so keep it.
///
/// Returns `None` once the whole board is revealed, or when `from` lies outside the board.
pub fn find_unrevealed_near(board: &Board, from: Coord2) -> Option<Coord2> {
    let from = board.validate_coords(from).ok()?;
    let size = board.size();

    let mut visited: Array2<bool> = Array2::default((size, size).to_nd_index());
    visited[from.to_nd_index()] = true;
    let mut to_visit = VecDeque::from([from]);

    while let Some(coords) = to_visit.pop_front() {
        if board[coords].is_unrevealed() {
            return Some(coords);
        }

        for pos in board.neighbors(coords) {
            let seen = &mut visited[pos.to_nd_index()];
            if !*seen {
                *seen = true;
                to_visit.push_back(pos);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &str) -> Board {
        rows.parse().unwrap()
    }

    #[test]
    fn unrevealed_start_is_returned_directly() {
        let board = board("E RE / RE RE");

        assert_eq!(find_unrevealed_near(&board, (0, 0)), Some((0, 0)));
    }

    #[test]
    fn fully_revealed_board_has_no_target() {
        let board = board("RE 1 / RM 1");

        assert_eq!(find_unrevealed_near(&board, (0, 0)), None);
    }

    #[test]
    fn mines_count_as_focus_targets() {
        let board = board("RE RE RE / RE RE RE / RE RE M");

        assert_eq!(find_unrevealed_near(&board, (0, 0)), Some((2, 2)));
    }

    #[test]
    fn returns_first_cell_in_visiting_order() {
        // (0, 2) and (2, 0) sit at the same distance; the row above is visited first.
        let board = board("RE RE E / RE RE RE / E RE RE");

        assert_eq!(find_unrevealed_near(&board, (1, 1)), Some((0, 2)));
    }

    #[test]
    fn walks_past_revealed_region() {
        let board = board(
            "RE RE RE RE RE / RE RE RE RE RE / RE RE RE RE RE / RE RE RE RE RE / RE RE RE RE E",
        );

        assert_eq!(find_unrevealed_near(&board, (0, 0)), Some((4, 4)));
    }

    #[test]
    fn out_of_range_reference_has_no_target() {
        let board = board("E E / E E");

        assert_eq!(find_unrevealed_near(&board, (2, 0)), None);
        assert_eq!(find_unrevealed_near(&Board::with_size(0), (0, 0)), None);
    }
}

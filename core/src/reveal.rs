use crate::*;

/// Reveals `coords` and flood-fills through every connected zero-count cell.
///
/// Only [`Cell::Empty`] cells are opened: anything else, including mines, leaves the board
/// as it was. Triggering a mine is a separate transition handled by the session. Flags are
/// not consulted. The input board is cloned once up front and the copy is returned.
pub fn reveal(board: &Board, coords: Coord2) -> Board {
    let mut next = board.clone();
    if next[coords] != Cell::Empty {
        return next;
    }

    // An opened cell is no longer `Empty`, which doubles as the visited marker.
    let mut to_visit = vec![coords];
    while let Some(visit_coords) = to_visit.pop() {
        if next[visit_coords] != Cell::Empty {
            continue;
        }

        let count = next.adjacent_mines(visit_coords);
        next[visit_coords] = Cell::revealed_with(count);
        log::trace!("Opened cell at {:?}, mine count: {}", visit_coords, count);

        if count == 0 {
            to_visit.extend(
                next.neighbors(visit_coords)
                    .filter(|&pos| next[pos] == Cell::Empty),
            );
        }
    }

    next
}

/// Shows every mine that is not flagged, without opening anything else.
pub fn reveal_mines(board: &Board, flags: &FlagOverlay) -> Board {
    let mut next = board.clone();
    for (coords, cell) in board.iter() {
        if cell == Cell::Mine && !flags.is_flagged(coords) {
            next[coords] = Cell::RevealedMine;
        }
    }
    next
}

/// Flags every hidden mine that is not flagged yet.
pub fn flag_mines(board: &Board, flags: &FlagOverlay) -> FlagOverlay {
    let mut next = flags.clone();
    for (coords, cell) in board.iter() {
        if cell == Cell::Mine {
            next.set(coords, true);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &str) -> Board {
        rows.parse().unwrap()
    }

    #[test]
    fn flood_fill_stops_at_numbers() {
        let before = board("E E E / E E E / M E E");

        let after = reveal(&before, (0, 0));

        assert_eq!(after, board("RE RE RE / 1 1 RE / M 1 RE"));
    }

    #[test]
    fn surrounded_cell_counts_eight() {
        let before = board("M M M / M E M / M M M");

        let after = reveal(&before, (1, 1));

        assert_eq!(after[(1, 1)], Cell::RevealedCount(8));
        assert_eq!(after.mine_count(), 8);
    }

    #[test]
    fn numbered_cell_does_not_expand() {
        let before = board("E E E / E E E / E E M");

        let after = reveal(&before, (1, 1));

        assert_eq!(after.diff(&before), vec![(1, 1)]);
        assert_eq!(after[(1, 1)], Cell::RevealedCount(1));
    }

    #[test]
    fn revealing_twice_is_idempotent() {
        let once = reveal(&board("E E E / E E E / M E E"), (0, 0));

        assert_eq!(reveal(&once, (0, 0)), once);
        assert_eq!(reveal(&once, (1, 0)), once);
    }

    #[test]
    fn mine_cells_are_left_alone() {
        let before = board("M E / E E");

        assert_eq!(reveal(&before, (0, 0)), before);
    }

    #[test]
    fn input_board_is_untouched() {
        let before = board("E E E E / E E E E / E E E E / E E E M");
        let snapshot = before.clone();

        let after = reveal(&before, (0, 0));

        assert_eq!(before, snapshot);
        assert!(!after.has_empty());
    }

    #[test]
    fn large_open_board_reveals_everything() {
        let before = Board::with_size(Coord::MAX);

        let after = reveal(&before, (0, 0));

        assert!(after.iter().all(|(_, cell)| cell == Cell::RevealedEmpty));
    }

    #[test]
    fn loss_reveals_only_unflagged_mines() {
        let before = board("M M / E RM");
        let mut flags = FlagOverlay::new(2);
        flags.set((0, 1), true);

        let after = reveal_mines(&before, &flags);

        assert_eq!(after, board("RM M / E RM"));
    }

    #[test]
    fn win_flags_remaining_mines() {
        let current = board("M M / 2 2");
        let mut flags = FlagOverlay::new(2);
        flags.set((0, 0), true);

        let after = flag_mines(&current, &flags);

        assert!(after.is_flagged((0, 0)));
        assert!(after.is_flagged((0, 1)));
        assert_eq!(after.count(), 2);
    }
}

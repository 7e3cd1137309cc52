use super::*;

/// Uniformly random placement that never puts a mine on the `safe` cell.
///
/// All cell indices are shuffled (Fisher–Yates) and mines go onto the first `mines` of
/// them, skipping the safe cell and cells that already hold a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
    safe: Coord2,
}

impl RandomMineGenerator {
    pub fn new(seed: u64, safe: Coord2) -> Self {
        Self { seed, safe }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn place(self, board: &Board, mines: CellCount) -> Board {
        use rand::rngs::SmallRng;
        use rand::seq::SliceRandom;
        use rand::SeedableRng;

        let mut placed_board = board.clone();
        let capacity = board.total_cells().saturating_sub(1);
        let mines = if mines > capacity {
            log::warn!(
                "Too many mines requested, {} but only {} fit besides the safe cell",
                mines,
                capacity
            );
            capacity
        } else {
            mines
        };

        if mines == 0 {
            return placed_board;
        }

        let size = usize::from(board.size());
        let safe_index = usize::from(self.safe.0) * size + usize::from(self.safe.1);
        let mut indices: Vec<usize> = (0..size * size).collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        indices.shuffle(&mut rng);

        let mut mines_placed = 0;
        for index in indices {
            if mines_placed == mines {
                break;
            }
            if index == safe_index {
                continue;
            }

            let coords = ((index / size) as Coord, (index % size) as Coord);
            if placed_board[coords] != Cell::Empty {
                continue;
            }
            placed_board[coords] = Cell::Mine;
            mines_placed += 1;
        }

        if mines_placed != mines {
            log::warn!(
                "Mine placement fell short, placed {} of {} requested",
                mines_placed,
                mines
            );
        }
        log::debug!(
            "Placed {} mines around safe cell {:?} with seed {}",
            mines_placed,
            self.safe,
            self.seed
        );
        placed_board
    }
}

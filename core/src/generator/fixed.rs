use super::*;

/// Places mines on an explicit list of cells, for hand-made puzzles and reproducible games.
///
/// Coordinates outside the board are skipped and at most `mines` of the listed cells are used.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn place(self, board: &Board, mines: CellCount) -> Board {
        let mut placed_board = board.clone();

        for coords in self.mines.into_iter().take(mines.into()) {
            match board.validate_coords(coords) {
                Ok(coords) => placed_board[coords] = Cell::Mine,
                Err(_) => log::warn!("Skipping mine outside the board at {:?}", coords),
            }
        }

        placed_board
    }
}

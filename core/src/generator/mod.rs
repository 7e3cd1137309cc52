use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy for laying mines onto a board.
///
/// Implementations return a new board and leave the input untouched.
pub trait MineGenerator {
    fn place(self, board: &Board, mines: CellCount) -> Board;
}

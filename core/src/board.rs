use core::fmt;
use core::ops::{Index, IndexMut};
use core::str::FromStr;
use ndarray::Array2;
use serde::{Deserialize, Deserializer, Serialize};

use crate::*;

/// Square grid of [`Cell`]s addressed by `(row, col)`.
///
/// Operations that change a board take it by reference and hand back a fresh one, so a
/// renderer can keep the previous snapshot around and [`Board::diff`] against it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Creates a `size × size` board where every cell is [`Cell::Empty`].
    ///
    /// Fails with [`GameError::InvalidSize`] when `size` is negative or does not fit a [`Coord`].
    pub fn new(size: i32) -> Result<Self> {
        let size = Coord::try_from(size).map_err(|_| GameError::InvalidSize(size))?;
        Ok(Self::with_size(size))
    }

    pub fn with_size(size: Coord) -> Self {
        Self {
            cells: Array2::default((size, size).to_nd_index()),
        }
    }

    /// Builds a board from cells listed in row-major order.
    pub fn from_cells(size: Coord, cells: Vec<Cell>) -> Result<Self> {
        Array2::from_shape_vec((size, size).to_nd_index(), cells)
            .map(|cells| Self { cells })
            .map_err(|_| GameError::InvalidBoardShape)
    }

    /// Wraps an existing grid, which must be square.
    pub fn from_array(cells: Array2<Cell>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows != cols {
            return Err(GameError::InvalidBoardShape);
        }
        Coord::try_from(rows).map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { cells })
    }

    /// Side length of the board.
    pub fn size(&self) -> Coord {
        self.cells.nrows() as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.validate_coords(coords).ok().map(|coords| self[coords])
    }

    /// All cells with their coordinates, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn adjacent_mines(&self, coords: Coord2) -> u8 {
        self.neighbors(coords)
            .filter(|&pos| self[pos].has_mine())
            .count() as u8
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(Cell::has_mine)
    }

    pub fn empty_count(&self) -> CellCount {
        self.count_where(|cell| cell == Cell::Empty)
    }

    /// Whether any safe cell is still unrevealed.
    pub fn has_empty(&self) -> bool {
        self.cells.iter().any(|&cell| cell == Cell::Empty)
    }

    /// Coordinates whose cell differs between `self` and `other`.
    ///
    /// Boards of different sizes share no cells, so every cell of `other` is reported.
    pub fn diff(&self, other: &Board) -> Vec<Coord2> {
        if self.size() != other.size() {
            return other.iter().map(|(coords, _)| coords).collect();
        }

        self.iter()
            .zip(other.cells.iter())
            .filter(|((_, before), after)| before != *after)
            .map(|((coords, _), _)| coords)
            .collect()
    }

    fn count_where(&self, predicate: impl Fn(Cell) -> bool) -> CellCount {
        self.cells.iter().filter(|&&cell| predicate(cell)).count() as CellCount
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct BoardCells {
            cells: Array2<Cell>,
        }

        let BoardCells { cells } = BoardCells::deserialize(deserializer)?;
        Self::from_array(cells).map_err(serde::de::Error::custom)
    }
}

/// Rows separated by newlines or `/`, cells by whitespace, using the [`Cell`] codes.
impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let rows = s
            .split(['\n', '/'])
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .map(|row| {
                row.split_whitespace()
                    .map(str::parse::<Cell>)
                    .collect::<Result<Vec<Cell>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return Err(GameError::InvalidBoardShape);
        }
        let size = Coord::try_from(size).map_err(|_| GameError::InvalidBoardShape)?;

        Self::from_cells(size, rows.into_iter().flatten().collect())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.cells.rows().into_iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}

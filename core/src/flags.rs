use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Deserializer, Serialize};

use crate::*;

/// Player-placed flags, kept apart from the [`Board`] so mine placement and reveals never
/// have to consider them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlagOverlay {
    flags: Array2<bool>,
}

impl FlagOverlay {
    pub fn new(size: Coord) -> Self {
        Self {
            flags: Array2::default((size, size).to_nd_index()),
        }
    }

    /// Wraps an existing flag grid, which must be square.
    pub fn from_array(flags: Array2<bool>) -> Result<Self> {
        let (rows, cols) = flags.dim();
        if rows != cols {
            return Err(GameError::InvalidBoardShape);
        }
        Coord::try_from(rows).map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { flags })
    }

    pub fn size(&self) -> Coord {
        self.flags.nrows() as Coord
    }

    /// Number of flags placed.
    pub fn count(&self) -> CellCount {
        self.flags.iter().filter(|&&flagged| flagged).count() as CellCount
    }

    pub fn is_flagged(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Flips the flag at `coords` and returns whether it is now set.
    pub fn toggle(&mut self, coords: Coord2) -> bool {
        let flagged = !self[coords];
        self.set(coords, flagged);
        flagged
    }

    pub fn set(&mut self, coords: Coord2, flagged: bool) {
        self.flags[coords.to_nd_index()] = flagged;
    }

    pub fn iter_flagged(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.flags
            .indexed_iter()
            .filter(|&(_, &flagged)| flagged)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    /// Drops flags sitting on cells that `board` shows as revealed.
    pub fn clear_revealed(&mut self, board: &Board) -> CellCount {
        let stale: Vec<_> = self
            .iter_flagged()
            .filter(|&coords| board[coords].is_revealed())
            .collect();
        for &coords in &stale {
            self.set(coords, false);
        }
        stale.len() as CellCount
    }
}

impl<'de> Deserialize<'de> for FlagOverlay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct FlagCells {
            flags: Array2<bool>,
        }

        let FlagCells { flags } = FlagCells::deserialize(deserializer)?;
        Self::from_array(flags).map_err(serde::de::Error::custom)
    }
}

impl Index<Coord2> for FlagOverlay {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.flags[coords.to_nd_index()]
    }
}

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// State of a single square of the board.
///
/// Cells only move from unrevealed to revealed: `Empty` becomes `RevealedEmpty` or
/// `RevealedCount`, and `Mine` becomes `RevealedMine` when triggered or shown after a loss.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Unrevealed, no mine.
    Empty,
    /// Unrevealed, contains a mine.
    Mine,
    /// Revealed, no adjacent mines.
    RevealedEmpty,
    /// Revealed, with 1 to 8 adjacent mines.
    RevealedCount(u8),
    /// Revealed mine.
    RevealedMine,
}

impl Cell {
    /// Revealed state for a safe cell with `count` adjacent mines.
    pub const fn revealed_with(count: u8) -> Self {
        if count == 0 {
            Self::RevealedEmpty
        } else {
            Self::RevealedCount(count)
        }
    }

    /// Whether the player can still act on this cell.
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Empty | Self::Mine)
    }

    pub const fn is_revealed(self) -> bool {
        !self.is_unrevealed()
    }

    pub const fn has_mine(self) -> bool {
        matches!(self, Self::Mine | Self::RevealedMine)
    }

    /// Adjacent mine count of a revealed safe cell.
    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::RevealedEmpty => Some(0),
            Self::RevealedCount(count) => Some(count),
            _ => None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("E"),
            Self::Mine => f.write_str("M"),
            Self::RevealedEmpty => f.write_str("RE"),
            Self::RevealedCount(count) => write!(f, "{count}"),
            Self::RevealedMine => f.write_str("RM"),
        }
    }
}

impl FromStr for Cell {
    type Err = GameError;

    fn from_str(code: &str) -> Result<Self> {
        match code {
            "E" => Ok(Self::Empty),
            "M" => Ok(Self::Mine),
            "RE" => Ok(Self::RevealedEmpty),
            "RM" => Ok(Self::RevealedMine),
            _ => code
                .parse::<u8>()
                .ok()
                .filter(|count| (1..=8).contains(count))
                .map(Self::RevealedCount)
                .ok_or(GameError::InvalidCellCode),
        }
    }
}

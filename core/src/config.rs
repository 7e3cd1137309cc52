use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Key under which a front end persists a value between sessions.
pub trait StorageKey {
    const KEY: &'static str;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Keeps at least one cell free of mines so the first reveal can always be safe.
    pub fn new(size: Coord, mines: CellCount) -> Self {
        let mines = mines.min(mult(size, size).saturating_sub(1));
        Self::new_unchecked(size, mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// The fixed board presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::new_unchecked(6, 4),
            Self::Intermediate => GameConfig::new_unchecked(9, 9),
            Self::Expert => GameConfig::new_unchecked(14, 35),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Beginner
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(name.trim()))
            .ok_or(GameError::UnknownDifficulty)
    }
}

impl StorageKey for Difficulty {
    const KEY: &'static str = "difficulty";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_board_sizes() {
        assert_eq!(Difficulty::Beginner.config(), GameConfig { size: 6, mines: 4 });
        assert_eq!(Difficulty::Intermediate.config(), GameConfig { size: 9, mines: 9 });
        assert_eq!(Difficulty::Expert.config(), GameConfig { size: 14, mines: 35 });
    }

    #[test]
    fn presets_leave_a_safe_cell() {
        for difficulty in Difficulty::ALL {
            let config = difficulty.config();
            assert_eq!(GameConfig::new(config.size, config.mines), config);
            assert!(config.safe_cells() > 0);
        }
    }

    #[test]
    fn config_clamps_mines() {
        assert_eq!(GameConfig::new(3, 20).mines, 8);
        assert_eq!(GameConfig::new(0, 5).mines, 0);
    }

    #[test]
    fn difficulty_names_parse_back() {
        assert_eq!("Expert".parse::<Difficulty>(), Ok(Difficulty::Expert));
        assert_eq!(
            "intermediate".parse::<Difficulty>(),
            Ok(Difficulty::Intermediate)
        );
        assert_eq!(
            "nightmare".parse::<Difficulty>(),
            Err(GameError::UnknownDifficulty)
        );
    }

    #[test]
    fn persisted_difficulty_uses_plain_name() {
        assert_eq!(<Difficulty as StorageKey>::KEY, "difficulty");
        assert_eq!(
            serde_json::to_string(&Difficulty::Intermediate).unwrap(),
            "\"intermediate\""
        );
        assert_eq!(
            serde_json::from_str::<Difficulty>("\"expert\"").unwrap(),
            Difficulty::Expert
        );
    }
}

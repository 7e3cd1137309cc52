use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid grid size {0}")]
    InvalidSize(i32),
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape is not a square matching its declared size")]
    InvalidBoardShape,
    #[error("Unknown cell code")]
    InvalidCellCode,
    #[error("Unknown difficulty")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;

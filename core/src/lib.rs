//! Board, reveal and session engine for a single-player minesweeper.
//!
//! The engine is pure game logic. A front end drives a [`Session`] with reveal, flag and reset
//! actions and renders the board and flag snapshots it exposes.

pub use board::*;
pub use cell::*;
pub use config::*;
pub use error::*;
pub use flags::*;
pub use generator::*;
pub use reveal::*;
pub use search::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod error;
mod flags;
mod generator;
mod reveal;
mod search;
mod session;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

impl Default for RevealOutcome {
    fn default() -> Self {
        Self::NoChange
    }
}

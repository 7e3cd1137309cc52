use chrono::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress, on the first reveal or flag
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// A reset goes back to `NotStarted` from any state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_started(self) -> bool {
        !matches!(self, Self::NotStarted)
    }

    /// No more moves are accepted.
    pub const fn is_ended(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// What a screen reader should announce about the cell the player just opened.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub coords: Coord2,
    pub adjacent_mines: u8,
}

/// Result of [`Session::reveal`], with everything a renderer needs to update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealReport {
    pub outcome: RevealOutcome,
    /// Cells whose board value changed, in row-major order.
    pub changed: Vec<Coord2>,
    /// Unrevealed cell that should take keyboard focus next.
    pub focus: Option<Coord2>,
    pub announcement: Option<Announcement>,
}

/// One game from first click to win or loss.
///
/// The board starts with no mines; they are laid on the first reveal, using the revealed
/// cell as the safe cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Session {
    difficulty: Difficulty,
    config: GameConfig,
    board: Board,
    flags: FlagOverlay,
    remaining_flags: isize,
    first_click_pending: bool,
    state: SessionState,
    triggered_mine: Option<Coord2>,
    seed: u64,
    move_count: u32,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_seed(difficulty, rand::random())
    }

    /// Session whose mine layouts are derived from `seed`, including those after resets.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        let config = difficulty.config();
        Self {
            difficulty,
            config,
            board: Board::with_size(config.size),
            flags: FlagOverlay::new(config.size),
            remaining_flags: config.mines as isize,
            first_click_pending: true,
            state: Default::default(),
            triggered_mine: None,
            seed,
            move_count: 0,
            started_at: None,
            ended_at: None,
        }
    }

    /// Session over a board whose mines are already laid; no safe first click is arranged.
    ///
    /// The board must have the side length of `difficulty`. The flag budget follows the mines
    /// actually on the board.
    pub fn from_board(difficulty: Difficulty, board: Board) -> Result<Self> {
        if board.size() != difficulty.config().size {
            return Err(GameError::InvalidBoardShape);
        }

        let mut session = Self::with_seed(difficulty, rand::random());
        session.config = GameConfig::new_unchecked(board.size(), board.mine_count());
        session.remaining_flags = session.config.mines as isize;
        session.board = board;
        session.first_click_pending = false;
        Ok(session)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn flags(&self) -> &FlagOverlay {
        &self.flags
    }

    pub fn is_flagged(&self, coords: Coord2) -> bool {
        self.board.validate_coords(coords).is_ok() && self.flags.is_flagged(coords)
    }

    /// Mines minus flags placed; negative when the player has placed too many flags.
    pub fn remaining_flags(&self) -> isize {
        self.remaining_flags
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.state.is_started()
    }

    pub fn is_ended(&self) -> bool {
        self.state.is_ended()
    }

    pub fn is_won(&self) -> bool {
        matches!(self.state, SessionState::Won)
    }

    pub fn first_click_pending(&self) -> bool {
        self.first_click_pending
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// How many seconds have passed since the session started, 0 if it hasn't started.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            let secs = (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0);
            u32::try_from(secs).unwrap_or(u32::MAX)
        } else {
            0
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealReport {
        use RevealOutcome::*;

        if self.state.is_ended() {
            return RevealReport::default();
        }
        let Some(coords) = self.checked_coords(coords) else {
            return RevealReport::default();
        };

        self.mark_started();
        if self.first_click_pending {
            self.board =
                RandomMineGenerator::new(self.seed, coords).place(&self.board, self.config.mines);
            self.first_click_pending = false;
        }

        if self.flags.is_flagged(coords) {
            log::debug!("Ignoring reveal of flagged cell {:?}", coords);
            return RevealReport::default();
        }

        let (outcome, next) = match self.board[coords] {
            Cell::Mine => (HitMine, reveal_mines(&self.board, &self.flags)),
            Cell::Empty => {
                let next = reveal(&self.board, coords);
                let outcome = if next.has_empty() { Revealed } else { Won };
                (outcome, next)
            }
            _ => return RevealReport::default(),
        };

        let changed = self.board.diff(&next);
        self.board = next;
        self.move_count = self.move_count.saturating_add(1);
        self.flags.clear_revealed(&self.board);

        match outcome {
            HitMine => {
                self.triggered_mine = Some(coords);
                self.end_game(false);
            }
            Won => {
                self.flags = flag_mines(&self.board, &self.flags);
                self.end_game(true);
            }
            NoChange | Revealed => {}
        }
        self.remaining_flags = self.config.mines as isize - self.flags.count() as isize;

        RevealReport {
            outcome,
            changed,
            focus: find_unrevealed_near(&self.board, coords),
            announcement: self.board[coords]
                .adjacent_mines()
                .map(|adjacent_mines| Announcement {
                    coords,
                    adjacent_mines,
                }),
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if self.state.is_ended() {
            return MarkOutcome::NoChange;
        }
        let Some(coords) = self.checked_coords(coords) else {
            return MarkOutcome::NoChange;
        };

        self.mark_started();
        if !self.board[coords].is_unrevealed() {
            return MarkOutcome::NoChange;
        }

        if self.flags.toggle(coords) {
            self.remaining_flags -= 1;
        } else {
            self.remaining_flags += 1;
        }
        self.move_count = self.move_count.saturating_add(1);
        MarkOutcome::Changed
    }

    /// Starts over with a fresh board, switching preset when `difficulty` is given.
    pub fn reset(&mut self, difficulty: Option<Difficulty>) {
        use rand::prelude::*;

        let difficulty = difficulty.unwrap_or(self.difficulty);
        let seed = SmallRng::seed_from_u64(self.seed).random();
        *self = Self::with_seed(difficulty, seed);
        log::debug!("Reset to {} with seed {}", difficulty, seed);
    }

    fn checked_coords(&self, coords: Coord2) -> Option<Coord2> {
        match self.board.validate_coords(coords) {
            Ok(coords) => Some(coords),
            Err(err) => {
                log::warn!("Ignoring move at {:?}: {}", coords, err);
                None
            }
        }
    }

    /// Checks if the state is initial and changes to in-progress recording the start time
    fn mark_started(&mut self) {
        if matches!(self.state, SessionState::NotStarted) {
            let now = Utc::now();
            log::debug!("started at {}", now);
            self.started_at = Some(now);
            self.state = SessionState::InProgress;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_ended() {
            return;
        }

        self.state = if won {
            SessionState::Won
        } else {
            SessionState::Lost
        };
        let now = Utc::now();
        self.ended_at = Some(now);
        log::debug!("{:?} at {}", self.state, now);
    }
}

/// Snapshots whose board, flags and config disagree on the side length are rejected.
impl<'de> Deserialize<'de> for Session {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct SessionFields {
            difficulty: Difficulty,
            config: GameConfig,
            board: Board,
            flags: FlagOverlay,
            remaining_flags: isize,
            first_click_pending: bool,
            state: SessionState,
            triggered_mine: Option<Coord2>,
            seed: u64,
            move_count: u32,
            started_at: Option<DateTime<Utc>>,
            ended_at: Option<DateTime<Utc>>,
        }

        let fields = SessionFields::deserialize(deserializer)?;
        let size = fields.board.size();
        if fields.flags.size() != size || fields.config.size != size {
            return Err(serde::de::Error::custom(GameError::InvalidBoardShape));
        }

        Ok(Self {
            difficulty: fields.difficulty,
            config: fields.config,
            board: fields.board,
            flags: fields.flags,
            remaining_flags: fields.remaining_flags,
            first_click_pending: fields.first_click_pending,
            state: fields.state,
            triggered_mine: fields.triggered_mine,
            seed: fields.seed,
            move_count: fields.move_count,
            started_at: fields.started_at,
            ended_at: fields.ended_at,
        })
    }
}

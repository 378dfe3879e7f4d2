use core::num::Saturating;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Tile held between the first and second pick of a match attempt.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    Idle,
    OneSelected(Coord2),
}

impl Selection {
    pub const fn selected(self) -> Option<Coord2> {
        match self {
            Self::Idle => None,
            Self::OneSelected(coords) => Some(coords),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Playing,
    Cleared,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Cleared)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Playing
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    NoChange,
    Selected,
    Deselected,
    Reselected,
    Matched(Path),
    Cleared(Path),
}

impl SelectOutcome {
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn path(&self) -> Option<&Path> {
        match self {
            Self::Matched(path) | Self::Cleared(path) => Some(path),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub match_score: u32,
    /// Ticks a matched path stays highlighted.
    pub path_display_ticks: u16,
    /// Ticks a hint stays highlighted.
    pub hint_display_ticks: u16,
    pub shuffle_attempts: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            match_score: 10,
            path_display_ticks: 60,
            hint_display_ticks: 120,
            shuffle_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// One round of play: the board plus the selection state machine, score, and transient highlights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    board: Board,
    config: SessionConfig,
    selection: Selection,
    state: SessionState,
    score: Saturating<u32>,
    matches: CellCount,
    shown_path: Option<(Path, Countdown)>,
    shown_hint: Option<(Hint, Countdown)>,
}

impl Session {
    pub fn new(board: Board, config: SessionConfig) -> Self {
        let state = if board.is_cleared() {
            SessionState::Cleared
        } else {
            SessionState::Playing
        };
        Self {
            board,
            config,
            selection: Default::default(),
            state,
            score: Saturating(0),
            matches: 0,
            shown_path: None,
            shown_hint: None,
        }
    }

    /// Starts over on a new board, dropping score and selection.
    pub fn restart(&mut self, board: Board) {
        *self = Self::new(board, self.config);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn score(&self) -> u32 {
        self.score.0
    }

    pub fn matches(&self) -> CellCount {
        self.matches
    }

    pub fn tiles_left(&self) -> CellCount {
        self.board.occupied_count()
    }

    pub fn has_moves(&self) -> bool {
        is_solvable(&self.board)
    }

    pub fn highlighted_path(&self) -> Option<&Path> {
        self.shown_path.as_ref().map(|(path, _)| path)
    }

    pub fn highlighted_hint(&self) -> Option<&Hint> {
        self.shown_hint.as_ref().map(|(hint, _)| hint)
    }

    /// Handles a pick of the cell at `coords`.
    pub fn select(&mut self, coords: Coord2) -> Result<SelectOutcome> {
        use SelectOutcome::*;
        use Selection::*;

        let coords = self.board.validate_coords(coords)?;
        self.check_playing()?;

        if self.board.kind_at(coords).is_none() {
            return Ok(NoChange);
        }

        let held = match self.selection {
            Idle => {
                self.selection = OneSelected(coords);
                return Ok(Selected);
            }
            OneSelected(held) if held == coords => {
                self.selection = Idle;
                return Ok(Deselected);
            }
            OneSelected(held) => held,
        };

        match match_path(&self.board, held, coords) {
            Some(path) => self.apply_match(held, coords, path),
            None => {
                log::debug!("No match between {:?} and {:?}", held, coords);
                self.selection = OneSelected(coords);
                Ok(Reselected)
            }
        }
    }

    fn apply_match(&mut self, first: Coord2, second: Coord2, path: Path) -> Result<SelectOutcome> {
        self.board.remove_pair(first, second)?;
        self.selection = Selection::Idle;
        self.score += self.config.match_score;
        self.matches += 1;
        self.shown_hint = None;
        self.shown_path = Some((path.clone(), Countdown::new(self.config.path_display_ticks)));

        if self.board.is_cleared() {
            self.state = SessionState::Cleared;
            log::debug!("Board cleared, score {}", self.score);
            Ok(SelectOutcome::Cleared(path))
        } else {
            Ok(SelectOutcome::Matched(path))
        }
    }

    /// Looks up the first available move and keeps it highlighted for a while.
    pub fn hint(&mut self) -> Option<Hint> {
        if self.is_finished() {
            return None;
        }
        let hint = find_hint(&self.board)?;
        self.shown_hint = Some((hint.clone(), Countdown::new(self.config.hint_display_ticks)));
        Some(hint)
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<ShuffleOutcome> {
        self.check_playing()?;
        self.selection = Selection::Idle;
        self.shown_hint = None;
        Ok(shuffle(&mut self.board, rng, self.config.shuffle_attempts))
    }

    /// Advances every transient highlight by one frame.
    pub fn tick(&mut self) {
        fn advance<T>(slot: &mut Option<(T, Countdown)>) {
            let expired = slot.as_mut().is_some_and(|(_, countdown)| countdown.tick());
            if expired {
                *slot = None;
            }
        }

        advance(&mut self.shown_path);
        advance(&mut self.shown_hint);
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn session(rows: &[&str]) -> Session {
        Session::new(Board::from_rows(rows).unwrap(), SessionConfig::default())
    }

    #[test]
    fn picking_the_held_tile_deselects_it() {
        let mut session = session(&["A.A"]);

        assert_eq!(session.select((0, 0)).unwrap(), SelectOutcome::Selected);
        assert_eq!(session.selection(), Selection::OneSelected((0, 0)));
        assert_eq!(session.select((0, 0)).unwrap(), SelectOutcome::Deselected);
        assert_eq!(session.selection(), Selection::Idle);
    }

    #[test]
    fn empty_cells_are_ignored() {
        let mut session = session(&["A.A"]);

        assert_eq!(session.select((0, 1)).unwrap(), SelectOutcome::NoChange);
        session.select((0, 0)).unwrap();
        assert_eq!(session.select((0, 1)).unwrap(), SelectOutcome::NoChange);
        assert_eq!(session.selection(), Selection::OneSelected((0, 0)));
    }

    #[test]
    fn kind_mismatch_moves_the_selection() {
        let mut session = session(&["AB", "BA"]);

        session.select((0, 0)).unwrap();
        assert_eq!(session.select((0, 1)).unwrap(), SelectOutcome::Reselected);
        assert_eq!(session.selection(), Selection::OneSelected((0, 1)));
    }

    #[test]
    fn unconnectable_match_moves_the_selection() {
        let mut session = session(&["ABA"]);

        session.select((0, 0)).unwrap();
        assert_eq!(session.select((0, 2)).unwrap(), SelectOutcome::Reselected);
        assert_eq!(session.selection(), Selection::OneSelected((0, 2)));
        assert_eq!(session.tiles_left(), 3);
    }

    #[test]
    fn matching_pairs_until_the_board_is_cleared() {
        let mut session = session(&["A.AB", "B..."]);

        session.select((0, 0)).unwrap();
        let outcome = session.select((0, 2)).unwrap();
        assert_eq!(outcome.path().map(Path::points), Some(&[(0, 0), (0, 2)][..]));
        assert!(matches!(outcome, SelectOutcome::Matched(_)));
        assert_eq!(session.score(), 10);
        assert_eq!(session.selection(), Selection::Idle);

        session.select((0, 3)).unwrap();
        let outcome = session.select((1, 0)).unwrap();
        assert!(matches!(outcome, SelectOutcome::Cleared(_)));
        assert_eq!(session.state(), SessionState::Cleared);
        assert_eq!(session.matches(), 2);
        assert_eq!(session.score(), 20);

        assert_eq!(session.select((0, 0)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn out_of_bounds_pick_is_an_error() {
        let mut session = session(&["A.A"]);

        assert_eq!(session.select((1, 0)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn matched_path_highlight_expires_after_ticks() {
        let board = Board::from_rows(&["A.A", "B.B"]).unwrap();
        let config = SessionConfig {
            path_display_ticks: 2,
            ..Default::default()
        };
        let mut session = Session::new(board, config);

        session.select((0, 0)).unwrap();
        session.select((0, 2)).unwrap();
        assert!(session.highlighted_path().is_some());

        session.tick();
        assert!(session.highlighted_path().is_some());
        session.tick();
        assert_eq!(session.highlighted_path(), None);
    }

    #[test]
    fn hint_is_highlighted_until_a_match() {
        let mut session = session(&["A.A", "B.B"]);

        let hint = session.hint().unwrap();
        assert_eq!((hint.first, hint.second), ((0, 0), (0, 2)));
        assert_eq!(session.highlighted_hint(), Some(&hint));

        session.select((1, 0)).unwrap();
        session.select((1, 2)).unwrap();
        assert_eq!(session.highlighted_hint(), None);
    }

    #[test]
    fn shuffle_clears_selection_and_keeps_tiles() {
        let mut session = session(&["AB", "BA", "CC"]);
        let mut rng = SmallRng::seed_from_u64(11);

        session.select((0, 0)).unwrap();
        let outcome = session.shuffle(&mut rng).unwrap();

        assert!(outcome.is_solvable());
        assert_eq!(session.selection(), Selection::Idle);
        assert_eq!(session.tiles_left(), 6);
        assert!(session.has_moves());
    }

    #[test]
    fn restart_resets_progress() {
        let mut session = session(&["A.A"]);
        session.select((0, 0)).unwrap();
        session.select((0, 2)).unwrap();
        assert!(session.is_finished());

        session.restart(Board::from_rows(&["BB"]).unwrap());

        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.matches(), 0);
        assert_eq!(session.highlighted_path(), None);
    }
}

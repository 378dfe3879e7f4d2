use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Invalid game configuration")]
    InvalidConfig,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Unknown tile symbol {0:?} in board layout")]
    InvalidLayout(char),
    #[error("Cell holds no tile")]
    NotOccupied,
    #[error("Could not produce a board with a connectable pair")]
    Unsolvable,
    #[error("Round already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;

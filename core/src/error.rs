use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Board must have at least one row, one column and one mine")]
    InvalidDimensions,
    #[error("Invalid preset configuration: {0}")]
    Config(String),
}

pub type Result<T> = core::result::Result<T, GameError>;

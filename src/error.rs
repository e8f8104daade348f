use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Board cells hold powers of two starting at 2; anything else is rejected
    /// when a board is built from raw values.
    #[error("tile value {0} is not a power of two >= 2")]
    InvalidTileValue(u32),
}

pub type Result<T> = std::result::Result<T, GameError>;

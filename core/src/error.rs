use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("Invalid player number {0}, expected 1 or 2")]
    InvalidPlayer(u8),
    #[error("Score snapshot violates a scoring invariant")]
    InvalidState,
    #[error("Match already ended, no new points are accepted")]
    MatchOver,
}

pub type Result<T> = core::result::Result<T, MatchError>;

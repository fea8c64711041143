use serde::{Deserialize, Serialize};

use crate::{MatchError, Result};

/// Point count inside a normal game, 0..=3 ("0"/"15"/"30"/"40").
pub type PointCount = u8;

/// Count type used for games within a set.
pub type GameCount = u8;

/// Count type used for sets within a match.
pub type SetCount = u8;

/// Raw tie-break point count.
pub type TiebreakCount = u16;

/// One of the two sides of the court.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Index into the per-player `[T; 2]` arrays of `ScoreState`.
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = MatchError;

    fn try_from(number: u8) -> Result<Self> {
        match number {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            _ => Err(MatchError::InvalidPlayer(number)),
        }
    }
}

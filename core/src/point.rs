use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{PointCount, TiebreakCount};

/// Canonical player-visible point value inside the current game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointDisplay {
    Love,
    Fifteen,
    Thirty,
    Forty,
    Advantage,
    Tiebreak(TiebreakCount),
}

impl PointDisplay {
    pub(crate) const fn from_count(count: PointCount) -> Self {
        match count {
            0 => Self::Love,
            1 => Self::Fifteen,
            2 => Self::Thirty,
            _ => Self::Forty,
        }
    }
}

impl fmt::Display for PointDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Love => f.write_str("0"),
            Self::Fifteen => f.write_str("15"),
            Self::Thirty => f.write_str("30"),
            Self::Forty => f.write_str("40"),
            Self::Advantage => f.write_str("Adv"),
            Self::Tiebreak(points) => write!(f, "{points}"),
        }
    }
}

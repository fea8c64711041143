use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use point::*;
pub use types::*;

mod engine;
mod error;
mod point;
mod types;

/// First to this many tie-break points, with a two-point lead, takes the set.
pub(crate) const TIEBREAK_TARGET: TiebreakCount = 7;
pub(crate) const TIEBREAK_LEAD: TiebreakCount = 2;

/// Games lead required to close out a set before the tie-break.
pub(crate) const SET_LEAD: GameCount = 2;

/// Immutable match settings, supplied once at match start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub player1: String,
    pub player2: String,
    pub games_per_set: GameCount,
    pub best_of: SetCount,
}

impl MatchConfig {
    pub fn new_unchecked(
        player1: String,
        player2: String,
        games_per_set: GameCount,
        best_of: SetCount,
    ) -> Self {
        Self {
            player1,
            player2,
            games_per_set,
            best_of,
        }
    }

    pub fn new(
        player1: impl Into<String>,
        player2: impl Into<String>,
        games_per_set: GameCount,
        best_of: SetCount,
    ) -> Self {
        Self::new_unchecked(
            player1.into(),
            player2.into(),
            games_per_set.max(1),
            best_of.max(1),
        )
    }

    /// Set wins that take the match: best-of-N means `ceil(N / 2)`.
    pub const fn sets_to_win(&self) -> SetCount {
        self.best_of.div_ceil(2)
    }

    pub fn player_name(&self, player: Player) -> &str {
        match player {
            Player::One => &self.player1,
            Player::Two => &self.player2,
        }
    }
}

/// Full score of a match in progress, the sole unit of persisted state.
///
/// Outside the tie-break `points` holds per-player counts 0..=3; while
/// `tiebreak` is set the game points are suspended and `tiebreak_points`
/// holds the raw tally instead.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub(crate) points: [PointCount; 2],
    pub(crate) advantage: Option<Player>,
    pub(crate) games: [GameCount; 2],
    pub(crate) sets: [SetCount; 2],
    pub(crate) tiebreak: bool,
    pub(crate) tiebreak_points: [TiebreakCount; 2],
}

impl ScoreState {
    pub fn points(&self, player: Player) -> PointCount {
        self.points[player.index()]
    }

    pub fn advantage(&self) -> Option<Player> {
        self.advantage
    }

    pub fn games(&self, player: Player) -> GameCount {
        self.games[player.index()]
    }

    pub fn sets(&self, player: Player) -> SetCount {
        self.sets[player.index()]
    }

    pub fn is_tiebreak(&self) -> bool {
        self.tiebreak
    }

    pub fn tiebreak_points(&self, player: Player) -> TiebreakCount {
        self.tiebreak_points[player.index()]
    }

    pub fn is_deuce(&self) -> bool {
        !self.tiebreak && self.points == [3, 3]
    }

    /// Checks every scoring invariant against `config`, failing closed on
    /// snapshots that no sequence of recorded points could have produced.
    pub fn validate(&self, config: &MatchConfig) -> Result<()> {
        let games_per_set = config.games_per_set;

        if self.sets.iter().any(|&sets| sets >= config.sets_to_win()) {
            // a finished match must not be restored
            return Err(MatchError::InvalidState);
        }
        if self.games.iter().any(|&games| games > games_per_set) {
            return Err(MatchError::InvalidState);
        }

        if self.tiebreak {
            if self.games != [games_per_set; 2] {
                return Err(MatchError::InvalidState);
            }
            if self.points != [0, 0] || self.advantage.is_some() {
                // stale game points alongside the tie-break flag
                return Err(MatchError::InvalidState);
            }
            let high = self.tiebreak_points[0].max(self.tiebreak_points[1]);
            let low = self.tiebreak_points[0].min(self.tiebreak_points[1]);
            if high >= TIEBREAK_TARGET && high - low >= TIEBREAK_LEAD {
                // an already-decided tie-break must not be left standing
                return Err(MatchError::InvalidState);
            }
        } else {
            if self.tiebreak_points != [0, 0] {
                return Err(MatchError::InvalidState);
            }
            if self.points.iter().any(|&points| points > 3) {
                return Err(MatchError::InvalidState);
            }
            if self.advantage.is_some() && self.points != [3, 3] {
                return Err(MatchError::InvalidState);
            }
            if self.games == [games_per_set; 2] {
                // all-square at games_per_set only exists inside the tie-break
                return Err(MatchError::InvalidState);
            }
            for player in [Player::One, Player::Two] {
                let ours = self.games[player.index()];
                let theirs = self.games[player.opponent().index()];
                if ours >= games_per_set && ours - theirs >= SET_LEAD {
                    // a completed set must not be left standing
                    return Err(MatchError::InvalidState);
                }
            }
        }

        Ok(())
    }
}

/// Outcome of awarding a single point, the highest-level event only: a game
/// win that also completes a set reports `SetWon`, a set win that completes
/// the match reports `MatchWon`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointOutcome {
    Point,
    TiebreakStarted,
    TiebreakPoint,
    GameWon(Player),
    SetWon(Player),
    MatchWon(Player),
}

impl PointOutcome {
    /// Whether this outcome closed out the current game (or more).
    pub const fn ends_game(self) -> bool {
        matches!(self, Self::GameWon(_) | Self::SetWon(_) | Self::MatchWon(_))
    }

    pub const fn ends_match(self) -> bool {
        matches!(self, Self::MatchWon(_))
    }
}

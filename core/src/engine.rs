use chrono::prelude::*;
use serde::Serialize;

use crate::*;

/// Valid transitions:
/// - Ready -> Active (first recorded point)
/// - Active -> Complete (match point converted)
/// - any -> Ready (`reset_all`)
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub enum MatchPhase {
    Ready,
    Active,
    Complete,
}

impl MatchPhase {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Indicates the match has ended and no points can be recorded anymore.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl Default for MatchPhase {
    fn default() -> Self {
        Self::Ready
    }
}

/// The match scoring state machine: consumes point-won events, owns the
/// [`ScoreState`], and reports the highest-level event each point caused.
///
/// Deliberately not `Deserialize`: restoring a persisted score goes through
/// [`MatchEngine::restore`] so that invalid snapshots fail closed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchEngine {
    config: MatchConfig,
    score: ScoreState,
    phase: MatchPhase,
    winner: Option<Player>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl MatchEngine {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            score: ScoreState::default(),
            phase: MatchPhase::default(),
            winner: None,
            started_at: None,
            ended_at: None,
        }
    }

    /// Rebuilds an engine around a persisted [`ScoreState`], validating every
    /// invariant first. A restored engine reproduces subsequent behavior
    /// exactly, including mid-deuce and mid-tie-break states.
    pub fn restore(config: MatchConfig, score: ScoreState) -> Result<Self> {
        score.validate(&config)?;
        let phase = if score == ScoreState::default() {
            MatchPhase::Ready
        } else {
            MatchPhase::Active
        };
        Ok(Self {
            config,
            score,
            phase,
            winner: None,
            started_at: None,
            ended_at: None,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn player_name(&self, player: Player) -> &str {
        self.config.player_name(player)
    }

    pub fn games(&self, player: Player) -> GameCount {
        self.score.games(player)
    }

    pub fn sets(&self, player: Player) -> SetCount {
        self.score.sets(player)
    }

    pub fn is_tiebreak(&self) -> bool {
        self.score.is_tiebreak()
    }

    pub fn tiebreak_points(&self, player: Player) -> TiebreakCount {
        self.score.tiebreak_points(player)
    }

    /// Player-visible point value for the current game.
    pub fn point_display(&self, player: Player) -> PointDisplay {
        if self.score.tiebreak {
            PointDisplay::Tiebreak(self.score.tiebreak_points(player))
        } else if self.score.advantage == Some(player) {
            PointDisplay::Advantage
        } else {
            PointDisplay::from_count(self.score.points(player))
        }
    }

    /// How many seconds have passed since the first point, 0 before that.
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or_else(Utc::now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    /// Awards one point to `player` and resolves everything that follows from
    /// it: deuce/advantage, game, tie-break activation, set, and match.
    ///
    /// Exactly one outcome is returned per call. Once the match is complete
    /// no further points are accepted; the engine stays in its last state.
    pub fn record_point(&mut self, player: Player) -> Result<PointOutcome> {
        self.check_not_finished()?;
        self.mark_started();

        let outcome = if self.score.tiebreak {
            self.resolve_tiebreak_point(player)
        } else {
            self.resolve_game_point(player)
        };
        log::trace!("point for {:?} -> {:?}", player, outcome);
        Ok(outcome)
    }

    fn resolve_tiebreak_point(&mut self, player: Player) -> PointOutcome {
        self.score.tiebreak_points[player.index()] += 1;

        let ours = self.score.tiebreak_points(player);
        let theirs = self.score.tiebreak_points(player.opponent());
        if ours >= TIEBREAK_TARGET && ours >= theirs + TIEBREAK_LEAD {
            log::debug!(
                "{} takes the tie-break {}-{}",
                self.player_name(player),
                ours,
                theirs
            );
            self.score.tiebreak = false;
            self.score.tiebreak_points = [0, 0];
            // the tie-break stands in as the deciding game of the set
            self.award_set(player)
        } else {
            PointOutcome::TiebreakPoint
        }
    }

    fn resolve_game_point(&mut self, player: Player) -> PointOutcome {
        if self.score.is_deuce() {
            match self.score.advantage {
                None => {
                    self.score.advantage = Some(player);
                    PointOutcome::Point
                }
                Some(holder) if holder == player => self.award_game(player),
                // the other player held advantage, back to deuce
                Some(_) => {
                    self.score.advantage = None;
                    PointOutcome::Point
                }
            }
        } else if self.score.points(player) < 3 {
            self.score.points[player.index()] += 1;
            PointOutcome::Point
        } else {
            // at 40 with the opponent below 40, the point wins the game
            self.award_game(player)
        }
    }

    fn award_game(&mut self, player: Player) -> PointOutcome {
        self.score.points = [0, 0];
        self.score.advantage = None;
        self.score.games[player.index()] += 1;
        log::debug!(
            "game {} ({}-{})",
            self.player_name(player),
            self.score.games[0],
            self.score.games[1]
        );

        let games_per_set = self.config.games_per_set;
        if self.score.games == [games_per_set; 2] {
            self.score.tiebreak = true;
            self.score.tiebreak_points = [0, 0];
            log::debug!("tie-break started at {0}-{0}", games_per_set);
            return PointOutcome::TiebreakStarted;
        }

        let ours = self.score.games(player);
        let theirs = self.score.games(player.opponent());
        if ours >= games_per_set && ours - theirs >= SET_LEAD {
            self.award_set(player)
        } else {
            PointOutcome::GameWon(player)
        }
    }

    fn award_set(&mut self, player: Player) -> PointOutcome {
        self.score.games = [0, 0];
        self.score.sets[player.index()] += 1;
        log::debug!(
            "set {} ({}-{})",
            self.player_name(player),
            self.score.sets[0],
            self.score.sets[1]
        );

        if self.score.sets(player) >= self.config.sets_to_win() {
            self.mark_ended(player);
            PointOutcome::MatchWon(player)
        } else {
            PointOutcome::SetWon(player)
        }
    }

    /// Zeroes points and games for both players, keeping won sets; used
    /// between sets.
    pub fn reset_game_and_points(&mut self) {
        self.score.points = [0, 0];
        self.score.advantage = None;
        self.score.games = [0, 0];
        self.score.tiebreak = false;
        self.score.tiebreak_points = [0, 0];
    }

    /// Clears every counter for a fresh match with the same settings.
    pub fn reset_all(&mut self) {
        self.score = ScoreState::default();
        self.phase = MatchPhase::Ready;
        self.winner = None;
        self.started_at = None;
        self.ended_at = None;
    }

    /// Checks if the phase is initial and moves to active recording the
    /// start time. Restored engines carry no timestamps, so a missing start
    /// time is filled in here when points resume.
    fn mark_started(&mut self) {
        if self.started_at.is_none() {
            let now = Utc::now();
            log::debug!("match started at {}", now);
            self.started_at.replace(now);
        }
        if matches!(self.phase, MatchPhase::Ready) {
            self.phase = MatchPhase::Active;
        }
    }

    fn mark_ended(&mut self, winner: Player) {
        let now = Utc::now();
        log::debug!("{} wins the match at {}", self.player_name(winner), now);
        self.ended_at.replace(now);
        self.phase = MatchPhase::Complete;
        self.winner = Some(winner);
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.phase.is_finished() {
            Err(MatchError::MatchOver)
        } else {
            Ok(())
        }
    }
}

//! Round history for the current session.

use serde::{Deserialize, Serialize};

use crate::policy::Difficulty;
use crate::{Move, Outcome};

/// A count of each outcome across the session.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTally {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

/// Counts saturate at `u32::MAX`, like the session scores.
impl OutcomeTally {
    /// Count one more round with this outcome.
    pub fn record(&mut self, outcome: Outcome) {
        let count = match outcome {
            Outcome::Win => &mut self.wins,
            Outcome::Lose => &mut self.losses,
            Outcome::Tie => &mut self.ties,
        };
        *count = count.saturating_add(1);
    }

    /// Rounds counted so far.
    pub fn total(&self) -> u32 {
        self.wins.saturating_add(self.losses).saturating_add(self.ties)
    }

    /// One-line text form, e.g. `wins: 2, losses: 1, ties: 0`.
    pub fn describe(&self) -> String {
        format!(
            "wins: {}, losses: {}, ties: {}",
            self.wins, self.losses, self.ties
        )
    }
}

/// A single completed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round number.
    pub round: u32,
    pub difficulty: Difficulty,
    pub player_move: Move,
    pub opponent_move: Move,
    pub outcome: Outcome,
    /// Streak after this round.
    pub streak: u32,
}

/// Tracks every round played in a session.
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    pub tally: OutcomeTally,
    pub history: Vec<RoundRecord>,
}

impl ScoreTracker {
    /// Tracker with no rounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed round and count its outcome.
    pub fn add(&mut self, record: RoundRecord) {
        self.tally.record(record.outcome);
        self.history.push(record);
    }

    /// Number of completed rounds.
    pub fn rounds_played(&self) -> u32 {
        self.tally.total()
    }

    /// Share of rounds won, ties included in the denominator.
    pub fn win_rate(&self) -> Option<f64> {
        let total = self.tally.total();
        if total == 0 {
            None
        } else {
            Some(self.tally.wins as f64 / total as f64)
        }
    }

    /// Longest streak reached this session (not the persisted best).
    pub fn longest_streak(&self) -> u32 {
        self.history.iter().map(|r| r.streak).max().unwrap_or(0)
    }

    /// Label for the end-of-session summary.
    pub fn rating(&self) -> &'static str {
        match self.win_rate() {
            None => "Unplayed",
            Some(rate) if rate >= 0.6 => "Mind Reader",
            Some(rate) if rate >= 0.4 => "Worthy Rival",
            Some(rate) if rate >= 0.25 => "Holding On",
            Some(_) => "Outplayed",
        }
    }
}

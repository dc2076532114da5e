//! What the UI is told after each step of a round.

use serde::{Deserialize, Serialize};

use crate::session::{PendingRound, RoundReport};
use crate::{Move, Outcome};

/// Which of the three sound effects fits an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    Win,
    Lose,
    Tie,
}

impl From<Outcome> for SoundCue {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => SoundCue::Win,
            Outcome::Lose => SoundCue::Lose,
            Outcome::Tie => SoundCue::Tie,
        }
    }
}

/// Observer of round progress. Sinks display; they never decide anything.
pub trait PresentationSink {
    /// Both moves are known; the result is not shown yet.
    fn round_started(&mut self, pending: &PendingRound);

    /// The round has been resolved and the session state committed.
    fn round_resolved(&mut self, report: &RoundReport);

    /// The persisted best streak rose.
    fn best_streak_changed(&mut self, best: u32) {
        let _ = best;
    }
}

/// Hand emoji for a move.
pub fn move_glyph(mv: Move) -> &'static str {
    match mv {
        Move::Rock => "👊",
        Move::Paper => "✋",
        Move::Scissors => "✌️",
    }
}

/// Banner shown once the round resolves.
pub fn outcome_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win => "🎉 You Win!",
        Outcome::Lose => "😢 You Lose!",
        Outcome::Tie => "🤝 It's a Tie!",
    }
}

/// "🔥 Best Win Streak: N"
pub fn leaderboard_line(best: u32) -> String {
    format!("🔥 Best Win Streak: {}", best)
}

/// "👊 You  vs  ✌️ Computer"
pub fn matchup_line(player_move: Move, opponent_move: Move) -> String {
    format!(
        "{} You  vs  {} Computer",
        move_glyph(player_move),
        move_glyph(opponent_move)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_outcome_has_its_own_cue_and_message() {
        assert_eq!(SoundCue::from(Outcome::Win), SoundCue::Win);
        assert_eq!(SoundCue::from(Outcome::Lose), SoundCue::Lose);
        assert_eq!(SoundCue::from(Outcome::Tie), SoundCue::Tie);

        assert_eq!(outcome_message(Outcome::Win), "🎉 You Win!");
        assert_eq!(outcome_message(Outcome::Lose), "😢 You Lose!");
        assert_eq!(outcome_message(Outcome::Tie), "🤝 It's a Tie!");
    }

    #[test]
    fn matchup_shows_both_glyphs() {
        let line = matchup_line(Move::Rock, Move::Scissors);
        assert!(line.starts_with("👊"));
        assert!(line.contains("✌️ Computer"));
    }

    #[test]
    fn leaderboard_shows_best_streak() {
        assert_eq!(leaderboard_line(4), "🔥 Best Win Streak: 4");
    }
}

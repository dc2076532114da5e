use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config;
pub mod policy;
pub mod presentation;
pub mod random;
pub mod resolver;
pub mod scoring;
pub mod session;
pub mod store;

pub use config::GameConfig;
pub use policy::{select_opponent_move, Difficulty, Opponent};
pub use presentation::{PresentationSink, SoundCue};
pub use random::{Draw, ScriptedDraws};
pub use resolver::{classify, resolve_round, RoundResolution, SessionState};
pub use scoring::{OutcomeTally, RoundRecord, ScoreTracker};
pub use session::{GameSession, PendingRound, RoundReport, SessionError};
pub use store::{BestStreakRecord, JsonFileStore, KeyValueStore, MemoryStore, StoreError};

/// Raised when text from the player does not name a known move or difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown move `{0}` (expected rock, paper or scissors)")]
    UnknownMove(String),
    #[error("unknown difficulty `{0}` (expected easy, normal or hard)")]
    UnknownDifficulty(String),
}

/// One of the three hand shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// All moves, in the order used for uniform index draws.
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// The move that defeats `self`.
    pub fn counter(self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }

    /// Whether `self` defeats `other` under the standard beat relation.
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors) | (Move::Paper, Move::Rock) | (Move::Scissors, Move::Paper)
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Rock => write!(f, "rock"),
            Move::Paper => write!(f, "paper"),
            Move::Scissors => write!(f, "scissors"),
        }
    }
}

impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" | "r" => Ok(Move::Rock),
            "paper" | "p" => Ok(Move::Paper),
            "scissors" | "s" => Ok(Move::Scissors),
            _ => Err(ParseError::UnknownMove(s.trim().to_string())),
        }
    }
}

/// Result of a round, seen from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Tie,
}

impl Outcome {
    /// The same round seen from the opponent's side.
    pub fn inverse(self) -> Outcome {
        match self {
            Outcome::Win => Outcome::Lose,
            Outcome::Lose => Outcome::Win,
            Outcome::Tie => Outcome::Tie,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Lose => write!(f, "lose"),
            Outcome::Tie => write!(f, "tie"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_returns_the_winning_reply() {
        for mv in Move::ALL {
            assert!(mv.counter().beats(mv), "{} should lose to {}", mv, mv.counter());
        }
        assert_eq!(Move::Rock.counter(), Move::Paper);
        assert_eq!(Move::Paper.counter(), Move::Scissors);
        assert_eq!(Move::Scissors.counter(), Move::Rock);
    }

    #[test]
    fn no_move_beats_itself() {
        for mv in Move::ALL {
            assert!(!mv.beats(mv));
        }
    }

    #[test]
    fn moves_parse_from_names_and_aliases() {
        assert_eq!("rock".parse::<Move>().unwrap(), Move::Rock);
        assert_eq!(" Paper ".parse::<Move>().unwrap(), Move::Paper);
        assert_eq!("S".parse::<Move>().unwrap(), Move::Scissors);
    }

    #[test]
    fn unknown_move_is_rejected() {
        let err = "lizard".parse::<Move>().unwrap_err();
        assert_eq!(err, ParseError::UnknownMove("lizard".to_string()));
        assert!(err.to_string().contains("lizard"));
    }

    #[test]
    fn moves_display_and_serialize_lowercase() {
        assert_eq!(Move::Scissors.to_string(), "scissors");
        assert_eq!(serde_json::to_string(&Move::Rock).unwrap(), "\"rock\"");
        assert_eq!(
            serde_json::from_str::<Move>("\"paper\"").unwrap(),
            Move::Paper
        );
        assert!(serde_json::from_str::<Move>("\"spock\"").is_err());
    }

    #[test]
    fn outcome_inverse_swaps_win_and_lose() {
        assert_eq!(Outcome::Win.inverse(), Outcome::Lose);
        assert_eq!(Outcome::Lose.inverse(), Outcome::Win);
        assert_eq!(Outcome::Tie.inverse(), Outcome::Tie);
    }
}

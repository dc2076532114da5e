//! Round classification and session state transitions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Move, Outcome};

/// Scores and streak for the current session. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub player_score: u32,
    pub computer_score: u32,
    pub current_streak: u32,
}

impl SessionState {
    /// Zero scores, no streak.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one round's outcome, returning the next state.
    pub fn apply(self, outcome: Outcome) -> SessionState {
        match outcome {
            Outcome::Win => SessionState {
                player_score: self.player_score.saturating_add(1),
                current_streak: self.current_streak.saturating_add(1),
                ..self
            },
            Outcome::Lose => SessionState {
                computer_score: self.computer_score.saturating_add(1),
                current_streak: 0,
                ..self
            },
            Outcome::Tie => SessionState {
                current_streak: 0,
                ..self
            },
        }
    }
}

/// Everything a round changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResolution {
    pub outcome: Outcome,
    pub new_state: SessionState,
    pub new_best_streak: u32,
    /// Set only when the best streak rose; the caller persists it then.
    pub best_streak_changed: bool,
}

/// Classify a move pair from the player's side.
pub fn classify(player_move: Move, opponent_move: Move) -> Outcome {
    if player_move == opponent_move {
        Outcome::Tie
    } else if player_move.beats(opponent_move) {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}

/// Resolve one round against the given state and best streak.
pub fn resolve_round(
    player_move: Move,
    opponent_move: Move,
    state: SessionState,
    best_streak: u32,
) -> RoundResolution {
    let outcome = classify(player_move, opponent_move);
    let new_state = state.apply(outcome);

    let best_streak_changed = new_state.current_streak > best_streak;
    let new_best_streak = if best_streak_changed {
        new_state.current_streak
    } else {
        best_streak
    };

    debug!(
        player = %player_move,
        opponent = %opponent_move,
        %outcome,
        streak = new_state.current_streak,
        best = new_best_streak,
        "round resolved"
    );

    RoundResolution {
        outcome,
        new_state,
        new_best_streak,
        best_streak_changed,
    }
}

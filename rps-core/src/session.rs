//! The round controller.
//!
//! A round runs in two phases. `begin_round` picks the opponent's move and
//! hands both moves back for display; `complete_round`, called after the
//! think delay, resolves the round and commits the new state. Only one round
//! may be pending at a time.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::GameConfig;
use crate::policy::{select_opponent_move, Difficulty};
use crate::presentation::{PresentationSink, SoundCue};
use crate::random::Draw;
use crate::resolver::{resolve_round, SessionState};
use crate::scoring::{RoundRecord, ScoreTracker};
use crate::store::{BestStreakRecord, KeyValueStore};
use crate::{Move, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a round is already in progress")]
    RoundInProgress,
    #[error("no round is waiting to be resolved")]
    NoRoundPending,
}

/// A round whose moves are chosen but not yet resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRound {
    pub round: u32,
    pub difficulty: Difficulty,
    pub player_move: Move,
    pub opponent_move: Move,
}

/// Everything the UI needs after a round resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u32,
    pub difficulty: Difficulty,
    pub player_move: Move,
    pub opponent_move: Move,
    pub outcome: Outcome,
    pub cue: SoundCue,
    pub state: SessionState,
    pub best_streak: u32,
    pub best_streak_changed: bool,
}

/// Owns the single mutable session state and threads it through each round.
pub struct GameSession<S, R> {
    store: S,
    rng: R,
    config: GameConfig,
    difficulty: Difficulty,
    state: SessionState,
    best_streak: u32,
    tracker: ScoreTracker,
    pending: Option<PendingRound>,
}

impl<S: KeyValueStore, R: Draw> GameSession<S, R> {
    /// Open a session, loading the persisted best streak from `store`.
    pub fn new(store: S, rng: R, config: GameConfig) -> Self {
        let best_streak = BestStreakRecord::load(&store);
        Self {
            store,
            rng,
            difficulty: config.difficulty,
            config,
            state: SessionState::new(),
            best_streak,
            tracker: ScoreTracker::new(),
            pending: None,
        }
    }

    /// Difficulty the next round will be played at.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Takes effect from the next `begin_round`.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if difficulty != self.difficulty {
            info!(from = %self.difficulty, to = %difficulty, "difficulty changed");
        }
        self.difficulty = difficulty;
    }

    /// Scores and current streak after the last completed round.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Best streak across sessions, including this one.
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    /// Every completed round of this session.
    pub fn history(&self) -> &ScoreTracker {
        &self.tracker
    }

    /// Settings the session was started with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Backing store of the best streak.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_round_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Pick the opponent's move and hold the round open until `complete_round`.
    pub fn begin_round(&mut self, player_move: Move) -> Result<PendingRound, SessionError> {
        if self.pending.is_some() {
            return Err(SessionError::RoundInProgress);
        }

        let difficulty = self.difficulty;
        let opponent_move = select_opponent_move(player_move, difficulty, &mut self.rng);
        let pending = PendingRound {
            round: self.tracker.rounds_played().saturating_add(1),
            difficulty,
            player_move,
            opponent_move,
        };
        self.pending = Some(pending);
        Ok(pending)
    }

    /// Resolve the pending round and commit the new state.
    ///
    /// The best streak is written to the store when it rises. A failed write
    /// is logged and the round still completes.
    pub fn complete_round(&mut self) -> Result<RoundReport, SessionError> {
        let pending = self.pending.take().ok_or(SessionError::NoRoundPending)?;

        let resolution = resolve_round(
            pending.player_move,
            pending.opponent_move,
            self.state,
            self.best_streak,
        );
        self.state = resolution.new_state;
        self.best_streak = resolution.new_best_streak;

        if resolution.best_streak_changed {
            info!(best = self.best_streak, "new best streak");
            if let Err(e) = BestStreakRecord::save(&mut self.store, self.best_streak) {
                warn!(error = %e, "could not persist best streak");
            }
        }

        self.tracker.add(RoundRecord {
            round: pending.round,
            difficulty: pending.difficulty,
            player_move: pending.player_move,
            opponent_move: pending.opponent_move,
            outcome: resolution.outcome,
            streak: self.state.current_streak,
        });

        Ok(RoundReport {
            round: pending.round,
            difficulty: pending.difficulty,
            player_move: pending.player_move,
            opponent_move: pending.opponent_move,
            outcome: resolution.outcome,
            cue: resolution.outcome.into(),
            state: self.state,
            best_streak: self.best_streak,
            best_streak_changed: resolution.best_streak_changed,
        })
    }

    /// Run a whole round: show the moves, wait out the think delay, resolve,
    /// then show the result.
    pub fn play_round(
        &mut self,
        player_move: Move,
        sink: &mut dyn PresentationSink,
        wait: &mut dyn FnMut(Duration),
    ) -> Result<RoundReport, SessionError> {
        let pending = self.begin_round(player_move)?;
        sink.round_started(&pending);
        wait(self.config.think_delay);

        let report = self.complete_round()?;
        sink.round_resolved(&report);
        if report.best_streak_changed {
            sink.best_streak_changed(report.best_streak);
        }
        Ok(report)
    }
}

//! Terminal and JSON-lines renderings of a session.

use std::io::{self, Write};

use rps_core::presentation::{leaderboard_line, matchup_line, outcome_message};
use rps_core::{PendingRound, PresentationSink, RoundReport, ScoreTracker, SessionState};
use serde::Serialize;
use tracing::warn;

fn report_write_error(result: io::Result<()>) {
    if let Err(e) = result {
        warn!(error = %e, "failed to write output");
    }
}

pub fn scoreboard_line(state: &SessionState) -> String {
    format!(
        "You: {}  Computer: {}  Streak: {}",
        state.player_score, state.computer_score, state.current_streak
    )
}

/// Human-readable output, one block per round.
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PresentationSink for TerminalSink<W> {
    fn round_started(&mut self, pending: &PendingRound) {
        let line = matchup_line(pending.player_move, pending.opponent_move);
        report_write_error(writeln!(self.out, "{}", line).and_then(|_| self.out.flush()));
    }

    fn round_resolved(&mut self, report: &RoundReport) {
        report_write_error(writeln!(
            self.out,
            "{}\n{}",
            outcome_message(report.outcome),
            scoreboard_line(&report.state)
        ));
    }

    fn best_streak_changed(&mut self, best: u32) {
        report_write_error(writeln!(self.out, "{}", leaderboard_line(best)));
    }
}

/// One JSON object per resolved round.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PresentationSink for JsonSink<W> {
    fn round_started(&mut self, _pending: &PendingRound) {}

    fn round_resolved(&mut self, report: &RoundReport) {
        let result = serde_json::to_writer(&mut self.out, report)
            .map_err(io::Error::from)
            .and_then(|_| writeln!(self.out));
        report_write_error(result);
    }
}

/// End-of-session numbers, printed on quit.
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub rounds: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub win_rate: Option<f64>,
    pub longest_streak: u32,
    pub best_streak: u32,
    pub rating: &'static str,
}

impl SessionSummary {
    pub fn new(history: &ScoreTracker, best_streak: u32) -> Self {
        Self {
            rounds: history.rounds_played(),
            wins: history.tally.wins,
            losses: history.tally.losses,
            ties: history.tally.ties,
            win_rate: history.win_rate(),
            longest_streak: history.longest_streak(),
            best_streak,
            rating: history.rating(),
        }
    }

    pub fn render(&self) -> String {
        let rate = self
            .win_rate
            .map(|r| format!("{:.0}%", r * 100.0))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "=== Session Summary ===\nRounds: {} ({} wins, {} losses, {} ties)\nWin rate: {}\nLongest streak: {}\n{}\nRating: {}",
            self.rounds,
            self.wins,
            self.losses,
            self.ties,
            rate,
            self.longest_streak,
            leaderboard_line(self.best_streak),
            self.rating
        )
    }
}

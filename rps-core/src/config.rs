//! Session settings.

use std::time::Duration;

use crate::policy::Difficulty;

/// Pause between showing the moves and showing the result.
pub const DEFAULT_THINK_DELAY: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub think_delay: Duration,
    /// Difficulty selected when the session opens.
    pub difficulty: Difficulty,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            think_delay: DEFAULT_THINK_DELAY,
            difficulty: Difficulty::default(),
        }
    }
}

impl GameConfig {
    /// Start the session at `difficulty`.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Pause between showing the moves and showing the result.
    pub fn with_think_delay(mut self, think_delay: Duration) -> Self {
        self.think_delay = think_delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_game() {
        let config = GameConfig::default();
        assert_eq!(config.think_delay, Duration::from_millis(600));
        assert_eq!(config.difficulty, Difficulty::Normal);
    }

    #[test]
    fn builders_override_fields() {
        let config = GameConfig::default()
            .with_difficulty(Difficulty::Hard)
            .with_think_delay(Duration::ZERO);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.think_delay, Duration::ZERO);
    }
}

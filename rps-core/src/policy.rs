//! Opponent move selection.
//!
//! Each difficulty is its own opponent. The balance constants are fixed
//! presets: easy plays uniformly, normal counters half of the time, hard
//! counters most of the time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::random::{index_for_draw, Draw};
use crate::{Move, ParseError};

/// Chance that the normal opponent plays a uniform move instead of countering.
pub const NORMAL_RANDOM_CHANCE: f64 = 0.5;

/// Chance that the hard opponent counters the player's move.
pub const HARD_COUNTER_CHANCE: f64 = 0.8;

/// Selects which opponent the player faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// The opponent that plays at this difficulty.
    pub fn opponent(self) -> &'static dyn Opponent {
        match self {
            Difficulty::Easy => &EasyOpponent,
            Difficulty::Normal => &NormalOpponent,
            Difficulty::Hard => &HardOpponent,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Normal => write!(f, "normal"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "e" => Ok(Difficulty::Easy),
            "normal" | "n" => Ok(Difficulty::Normal),
            "hard" | "h" => Ok(Difficulty::Hard),
            _ => Err(ParseError::UnknownDifficulty(s.trim().to_string())),
        }
    }
}

/// Core trait for anything that picks the computer's move.
///
/// Opponents see the player's move (they are allowed to cheat) but never the
/// session state.
pub trait Opponent: Send + Sync {
    fn name(&self) -> &'static str;
    fn choose(&self, player_move: Move, rng: &mut dyn Draw) -> Move;
}

/// Plays uniformly at random.
pub struct EasyOpponent;

/// Flips a coin between a uniform move and the counter.
pub struct NormalOpponent;

/// Counters the player 80% of the time.
pub struct HardOpponent;

impl Opponent for EasyOpponent {
    fn name(&self) -> &'static str {
        "easy"
    }

    fn choose(&self, _player_move: Move, rng: &mut dyn Draw) -> Move {
        uniform_move(rng)
    }
}

impl Opponent for NormalOpponent {
    fn name(&self) -> &'static str {
        "normal"
    }

    fn choose(&self, player_move: Move, rng: &mut dyn Draw) -> Move {
        if rng.draw() < NORMAL_RANDOM_CHANCE {
            uniform_move(rng)
        } else {
            player_move.counter()
        }
    }
}

impl Opponent for HardOpponent {
    fn name(&self) -> &'static str {
        "hard"
    }

    fn choose(&self, player_move: Move, rng: &mut dyn Draw) -> Move {
        if rng.draw() < HARD_COUNTER_CHANCE {
            player_move.counter()
        } else {
            uniform_move(rng)
        }
    }
}

/// Pick one of the three moves with a single draw.
pub fn uniform_move(rng: &mut dyn Draw) -> Move {
    Move::ALL[index_for_draw(rng.draw(), Move::ALL.len())]
}

/// Choose the computer's reply to `player_move` at the given difficulty.
pub fn select_opponent_move(player_move: Move, difficulty: Difficulty, rng: &mut dyn Draw) -> Move {
    let opponent = difficulty.opponent();
    let chosen = opponent.choose(player_move, rng);
    debug!(
        opponent = opponent.name(),
        player = %player_move,
        chosen = %chosen,
        "opponent move selected"
    );
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedDraws;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SAMPLES: usize = 30_000;

    fn frequencies(player_move: Move, difficulty: Difficulty, seed: u64) -> [f64; 3] {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut counts = [0usize; 3];
        for _ in 0..SAMPLES {
            let mv = select_opponent_move(player_move, difficulty, &mut rng);
            let idx = Move::ALL.iter().position(|m| *m == mv).unwrap();
            counts[idx] += 1;
        }
        counts.map(|c| c as f64 / SAMPLES as f64)
    }

    fn counter_frequency(player_move: Move, difficulty: Difficulty, seed: u64) -> f64 {
        let freq = frequencies(player_move, difficulty, seed);
        let idx = Move::ALL
            .iter()
            .position(|m| *m == player_move.counter())
            .unwrap();
        freq[idx]
    }

    #[test]
    fn easy_is_uniform_for_every_player_move() {
        for (i, player_move) in Move::ALL.into_iter().enumerate() {
            for f in frequencies(player_move, Difficulty::Easy, 11 + i as u64) {
                assert!((f - 1.0 / 3.0).abs() < 0.02, "easy frequency {} not ~1/3", f);
            }
        }
    }

    #[test]
    fn normal_counters_about_two_thirds_of_the_time() {
        let expected = (1.0 - NORMAL_RANDOM_CHANCE) + NORMAL_RANDOM_CHANCE / 3.0;
        for player_move in Move::ALL {
            let f = counter_frequency(player_move, Difficulty::Normal, 23);
            assert!((f - expected).abs() < 0.02, "normal counter frequency {} not ~{}", f, expected);
        }
    }

    #[test]
    fn hard_counters_most_of_the_time() {
        let expected = HARD_COUNTER_CHANCE + (1.0 - HARD_COUNTER_CHANCE) / 3.0;
        for player_move in Move::ALL {
            let f = counter_frequency(player_move, Difficulty::Hard, 37);
            assert!((f - expected).abs() < 0.02, "hard counter frequency {} not ~{}", f, expected);
        }
    }

    #[test]
    fn normal_branches_on_first_draw() {
        // below 0.5: uniform move from the second draw
        let mut draws = ScriptedDraws::new([0.2, 0.0]);
        assert_eq!(select_opponent_move(Move::Rock, Difficulty::Normal, &mut draws), Move::Rock);

        // at 0.5: counter, second draw untouched
        let mut draws = ScriptedDraws::new([0.5, 0.0]);
        assert_eq!(select_opponent_move(Move::Rock, Difficulty::Normal, &mut draws), Move::Paper);
        assert_eq!(draws.remaining(), 1);
    }

    #[test]
    fn hard_branches_on_first_draw() {
        let mut draws = ScriptedDraws::new([0.79, 0.0]);
        assert_eq!(select_opponent_move(Move::Scissors, Difficulty::Hard, &mut draws), Move::Rock);
        assert_eq!(draws.remaining(), 1);

        let mut draws = ScriptedDraws::new([0.8, 0.5]);
        assert_eq!(select_opponent_move(Move::Scissors, Difficulty::Hard, &mut draws), Move::Paper);
    }

    #[test]
    fn easy_uses_a_single_draw() {
        let mut draws = ScriptedDraws::new([0.7, 0.0]);
        assert_eq!(select_opponent_move(Move::Paper, Difficulty::Easy, &mut draws), Move::Scissors);
        assert_eq!(draws.remaining(), 1);
    }

    #[test]
    fn draw_of_exactly_one_maps_to_last_move() {
        let mut draws = ScriptedDraws::new([1.0]);
        assert_eq!(uniform_move(&mut draws), Move::Scissors);

        let mut draws = ScriptedDraws::new([0.0, 1.0]);
        assert_eq!(select_opponent_move(Move::Rock, Difficulty::Normal, &mut draws), Move::Scissors);
    }

    #[test]
    fn difficulty_maps_to_named_opponent() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.opponent().name(), difficulty.to_string());
        }
    }

    #[test]
    fn difficulty_parses_and_rejects_unknown() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("e".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(
            "insane".parse::<Difficulty>().unwrap_err(),
            ParseError::UnknownDifficulty("insane".to_string())
        );
        assert_eq!(Difficulty::default(), Difficulty::Normal);
    }
}

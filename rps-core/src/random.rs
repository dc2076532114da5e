//! Random draws for opponent move selection.
//!
//! Every policy decision consumes draws in `[0, 1)`. Any `rand` generator
//! provides them; `ScriptedDraws` replays a fixed sequence for deterministic
//! tests and replays.

use std::collections::VecDeque;

use rand::{Rng, RngCore};

/// A source of uniform draws in `[0, 1)`.
pub trait Draw {
    fn draw(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> Draw for R {
    fn draw(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of draws, then repeats the last one.
///
/// An empty script yields `0.0` forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDraws {
    queue: VecDeque<f64>,
    last: f64,
}

impl ScriptedDraws {
    /// Script that yields `draws` in order.
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            queue: draws.into_iter().collect(),
            last: 0.0,
        }
    }

    /// Draws left before the script starts repeating.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl Draw for ScriptedDraws {
    fn draw(&mut self) -> f64 {
        if let Some(next) = self.queue.pop_front() {
            self.last = next;
        }
        self.last
    }
}

/// Map a draw onto `0..len` via `floor(draw * len)`.
///
/// Out-of-range draws are clamped: `1.0` (or above) maps to the last index,
/// negative and NaN draws map to 0.
pub fn index_for_draw(draw: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let idx = (draw * len as f64).floor();
    if idx.is_nan() || idx < 0.0 {
        0
    } else {
        (idx as usize).min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rng_draws_stay_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let d = rng.draw();
            assert!((0.0..1.0).contains(&d), "draw {} out of range", d);
        }
    }

    #[test]
    fn seeded_draws_are_deterministic() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn scripted_draws_replay_then_repeat_last() {
        let mut draws = ScriptedDraws::new([0.1, 0.9]);
        assert_eq!(draws.remaining(), 2);
        assert_eq!(draws.draw(), 0.1);
        assert_eq!(draws.draw(), 0.9);
        assert_eq!(draws.draw(), 0.9);
        assert_eq!(draws.remaining(), 0);
    }

    #[test]
    fn empty_script_yields_zero() {
        let mut draws = ScriptedDraws::default();
        assert_eq!(draws.draw(), 0.0);
    }

    #[test]
    fn index_for_draw_splits_interval_evenly() {
        assert_eq!(index_for_draw(0.0, 3), 0);
        assert_eq!(index_for_draw(0.33, 3), 0);
        assert_eq!(index_for_draw(0.34, 3), 1);
        assert_eq!(index_for_draw(0.66, 3), 1);
        assert_eq!(index_for_draw(0.67, 3), 2);
        assert_eq!(index_for_draw(0.999_999, 3), 2);
    }

    #[test]
    fn index_for_draw_clamps_out_of_range() {
        assert_eq!(index_for_draw(1.0, 3), 2);
        assert_eq!(index_for_draw(7.5, 3), 2);
        assert_eq!(index_for_draw(-0.2, 3), 0);
        assert_eq!(index_for_draw(f64::NAN, 3), 0);
        assert_eq!(index_for_draw(0.5, 0), 0);
    }
}

//! Slime Lord advice
//!
//! Hint text is an external collaborator: the game asks an `AdviceSource`
//! for one line given the level and the current counters. The built-in
//! source draws from a fixed list with a seeded generator so replays match.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::RunStats;

/// Fallback line when a source has nothing better to say
pub const DEFAULT_ADVICE: &str = "The goop must flow, little squishling...";

const SLIME_QUOTES: &[&str] = &[
    "A builder's bricks are thin, but so is patience. Lay them early.",
    "Ooze downward when the wall will not yield.",
    "One blocker can turn a flood of goop into an orderly trickle.",
    "Floaters fear no drop. Everyone else should.",
    "The basher respects only the wall in front of it.",
    "Squish gently; the terrain remembers every hole you dig.",
    "When all else fails, the diggers go down and the goop follows.",
    "A climber sees no wall, only a taller floor.",
    "Release slowly. A crowd of slime is a crowd of mistakes.",
    "Five seconds is a long time for a bomber and a short time for you.",
];

/// Produces a one-line hint for the player
pub trait AdviceSource {
    fn advice(&mut self, level_name: &str, stats: &RunStats) -> String;
}

/// Canned advice picked from a fixed list
#[derive(Debug, Clone)]
pub struct CannedAdvice {
    rng: Pcg32,
}

impl CannedAdvice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl AdviceSource for CannedAdvice {
    fn advice(&mut self, level_name: &str, stats: &RunStats) -> String {
        let index = self.rng.random_range(0..SLIME_QUOTES.len());
        log::debug!(
            "Advice for \"{}\" (released {}, saved {}, dead {}): quote {}",
            level_name,
            stats.released,
            stats.saved,
            stats.dead,
            index
        );
        SLIME_QUOTES
            .get(index)
            .map_or_else(|| DEFAULT_ADVICE.to_string(), |quote| quote.to_string())
    }
}

//! Per-gene mutation probability.

use amoeba_core::{Error, Result, SimRng};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Chance that a single gene mutates, expressed as 1 in `denominator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationChance(NonZeroU32);

impl MutationChance {
    pub fn one_in(denominator: u32) -> Result<Self> {
        NonZeroU32::new(denominator).map(Self).ok_or_else(|| {
            Error::Configuration("mutation probability denominator must be at least 1".to_string())
        })
    }

    pub fn denominator(&self) -> u32 {
        self.0.get()
    }

    /// One independent Bernoulli trial.
    pub fn roll(&self, rng: &mut SimRng) -> bool {
        rng.gen_ratio(1, self.0.get())
    }
}

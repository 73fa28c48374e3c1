//! A single bounded, steppable heritable scalar.

use amoeba_core::{Error, Result, SimRng};
use rand::Rng;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Numeric kinds a gene can carry.
pub trait Allele: Copy + PartialOrd + fmt::Debug + fmt::Display {
    /// `self + step` when `up`, otherwise `self - step`. Must not overflow.
    fn offset(self, step: Self, up: bool) -> Self;
}

macro_rules! integer_allele {
    ($($t:ty),*) => {$(
        impl Allele for $t {
            fn offset(self, step: Self, up: bool) -> Self {
                if up {
                    self.saturating_add(step)
                } else {
                    self.saturating_sub(step)
                }
            }
        }
    )*};
}

macro_rules! float_allele {
    ($($t:ty),*) => {$(
        impl Allele for $t {
            fn offset(self, step: Self, up: bool) -> Self {
                if up { self + step } else { self - step }
            }
        }
    )*};
}

integer_allele!(i32, i64);
float_allele!(f32, f64);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gene<T> {
    value: T,
    min: T,
    max: T,
    step: T,
}

impl<T: Allele> Gene<T> {
    /// Build a gene; `value` is clamped into `[min, max]`.
    pub fn new(value: T, min: T, max: T, step: T) -> Result<Self> {
        // NaN bounds compare as None and are rejected with inverted ones.
        if !matches!(
            min.partial_cmp(&max),
            Some(Ordering::Less | Ordering::Equal)
        ) {
            return Err(Error::Configuration(format!(
                "gene min {} exceeds max {}",
                min, max
            )));
        }
        if step.partial_cmp(&step).is_none() {
            return Err(Error::Configuration(format!("gene step {} is not a number", step)));
        }
        let mut gene = Self {
            value: min,
            min,
            max,
            step,
        };
        gene.set_value(value);
        Ok(gene)
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    pub fn step(&self) -> T {
        self.step
    }

    /// A value that compares with nothing (NaN) falls back to `min`.
    pub fn set_value(&mut self, value: T) {
        self.value = self.clamp(value);
    }

    /// Move one step in the given direction, then clamp.
    pub fn nudge(&mut self, up: bool) {
        self.set_value(self.value.offset(self.step, up));
    }

    /// Move one step in a direction chosen by a fair coin.
    pub fn mutate(&mut self, rng: &mut SimRng) {
        let up = rng.gen_bool(0.5);
        self.nudge(up);
    }

    fn clamp(&self, value: T) -> T {
        if value.partial_cmp(&self.min).is_none() || value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

impl<T: fmt::Display> fmt::Display for Gene<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

//! Core type definitions for the simulation.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The single generator threaded through every random draw of a run.
pub type SimRng = ChaCha8Rng;

/// Unique identifier for an organism instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganismId(pub Uuid);

impl OrganismId {
    /// Draw an id from the simulation generator so seeded runs stay reproducible.
    pub fn generate(rng: &mut SimRng) -> Self {
        Self(uuid::Builder::from_random_bytes(rng.gen()).into_uuid())
    }
}

impl fmt::Display for OrganismId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 2D position in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Uniformly random position with `0 <= x < width`, `0 <= y < height`.
    pub fn random(bounds: Bounds, rng: &mut SimRng) -> Self {
        Self {
            x: rng.gen_range(0..bounds.width),
            y: rng.gen_range(0..bounds.height),
        }
    }

    /// Euclidean distance between centers
    pub fn distance(&self, other: &Position) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

/// Unit direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub x: f32,
    pub y: f32,
}

impl Heading {
    /// Normalized vector from `from` to `to`, or `None` when they coincide.
    pub fn toward(from: Position, to: Position) -> Option<Self> {
        let dx = (to.x - from.x) as f32;
        let dy = (to.y - from.y) as f32;
        let len = dx.hypot(dy);
        if len == 0.0 {
            return None;
        }
        Some(Self {
            x: dx / len,
            y: dy / len,
        })
    }

    pub fn flip_x(&mut self) {
        self.x = -self.x;
    }

    pub fn flip_y(&mut self) {
        self.y = -self.y;
    }
}

impl Default for Heading {
    fn default() -> Self {
        Self { x: 1.0, y: 0.0 }
    }
}

/// World extent. Valid coordinates span `0..=width` and `0..=height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..=self.width).contains(&pos.x) && (0..=self.height).contains(&pos.y)
    }
}

//! Stationary food sources.

use crate::interaction::Sensed;
use amoeba_core::{Bounds, PlantConfig, Position, SimRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub position: Position,
    pub radius: i32,
    eaten: bool,
}

impl Plant {
    pub fn new(position: Position, radius: i32) -> Self {
        Self {
            position,
            radius,
            eaten: false,
        }
    }

    /// A plant at a uniformly random spot with a uniformly random radius.
    pub fn random(config: &PlantConfig, bounds: Bounds, rng: &mut SimRng) -> Self {
        let position = Position::random(bounds, rng);
        Self::new(position, config.radius.sample(rng))
    }

    pub fn is_eaten(&self) -> bool {
        self.eaten
    }

    /// Flag only; the plant stays in place until the tick commits.
    pub fn mark_eaten(&mut self) {
        self.eaten = true;
    }
}

impl Sensed for Plant {
    fn position(&self) -> Position {
        self.position
    }

    fn radius(&self) -> i32 {
        self.radius
    }

    /// Plants have no scent of their own; their body is what gets smelled.
    fn scent_reach(&self) -> i32 {
        self.radius
    }
}

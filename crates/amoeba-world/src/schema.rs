//! Fixed trait layout of an organism genome.

use amoeba_core::{Result, SimRng, TraitRanges};
use amoeba_genome::{Gene, Genome};
use serde::{Deserialize, Serialize};

/// Genome positions, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trait {
    Size,
    Speed,
    ViewDistance,
    Offspring,
    FoodNeeded,
    SmellDistance,
}

impl Trait {
    pub const COUNT: usize = 6;

    pub const ALL: [Trait; Trait::COUNT] = [
        Trait::Size,
        Trait::Speed,
        Trait::ViewDistance,
        Trait::Offspring,
        Trait::FoodNeeded,
        Trait::SmellDistance,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// `(min, max, step)` every gene at this position carries.
    pub fn bounds(self) -> (i32, i32, i32) {
        match self {
            Trait::Size => (10, 50, 5),
            Trait::Speed => (0, 10, 1),
            Trait::ViewDistance => (10, 1000, 5),
            Trait::Offspring => (0, 100, 1),
            Trait::FoodNeeded => (2, 100, 1),
            Trait::SmellDistance => (10, 1000, 5),
        }
    }
}

/// Trait values used to build a conforming genome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phenotype {
    pub size: i32,
    pub speed: i32,
    pub view_distance: i32,
    pub offspring: i32,
    pub food_needed: i32,
    pub smell_distance: i32,
}

impl Phenotype {
    pub fn random(ranges: &TraitRanges, rng: &mut SimRng) -> Self {
        Self {
            size: ranges.size.sample(rng),
            speed: ranges.speed.sample(rng),
            view_distance: ranges.view_distance.sample(rng),
            offspring: ranges.offspring.sample(rng),
            food_needed: ranges.food_needed.sample(rng),
            smell_distance: ranges.smell_distance.sample(rng),
        }
    }

    fn value(&self, t: Trait) -> i32 {
        match t {
            Trait::Size => self.size,
            Trait::Speed => self.speed,
            Trait::ViewDistance => self.view_distance,
            Trait::Offspring => self.offspring,
            Trait::FoodNeeded => self.food_needed,
            Trait::SmellDistance => self.smell_distance,
        }
    }

    /// Values outside a trait's bounds are clamped.
    pub fn to_genome(&self) -> Result<Genome<i32>> {
        let genes = Trait::ALL
            .iter()
            .map(|&t| {
                let (min, max, step) = t.bounds();
                Gene::new(self.value(t), min, max, step)
            })
            .collect::<Result<Vec<_>>>()?;
        Genome::new(genes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_follow_declaration_order() {
        for (i, t) in Trait::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }

    #[test]
    fn test_genome_is_clamped_to_schema() {
        let phenotype = Phenotype {
            size: 1,
            speed: 4,
            view_distance: 5000,
            offspring: 3,
            food_needed: 0,
            smell_distance: 60,
        };
        let genome = phenotype.to_genome().unwrap();
        assert_eq!(genome.len(), Trait::COUNT);
        let values: Vec<i32> = genome.genes().iter().map(|g| g.value()).collect();
        assert_eq!(values, vec![10, 4, 1000, 3, 2, 60]);
    }
}

//! Configuration types for the simulation.

use crate::error::{Error, Result};
use crate::types::{Bounds, SimRng};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Inclusive integer range used for every "pick something between" knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i32,
    pub max: i32,
}

impl IntRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Uniform draw in `min..=max`. Only meaningful on a validated range.
    pub fn sample(&self, rng: &mut SimRng) -> i32 {
        rng.gen_range(self.min..=self.max)
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        if self.min > self.max {
            return Err(Error::Configuration(format!(
                "{}: min {} exceeds max {}",
                name, self.min, self.max
            )));
        }
        Ok(())
    }

    fn validate_non_negative(&self, name: &str) -> Result<()> {
        self.validate(name)?;
        if self.min < 0 {
            return Err(Error::Configuration(format!(
                "{}: min {} must not be negative",
                name, self.min
            )));
        }
        Ok(())
    }
}

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the world
    pub width: i32,
    /// Height of the world
    pub height: i32,
    /// Organisms seeded on creation and after every reset
    pub initial_organisms: usize,
}

impl WorldConfig {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
            initial_organisms: 3,
        }
    }
}

/// Ranges the starting organisms draw their traits from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitRanges {
    pub size: IntRange,
    pub speed: IntRange,
    pub view_distance: IntRange,
    pub offspring: IntRange,
    pub food_needed: IntRange,
    pub smell_distance: IntRange,
}

impl Default for TraitRanges {
    fn default() -> Self {
        Self {
            size: IntRange::new(10, 50),
            speed: IntRange::new(1, 1),
            view_distance: IntRange::new(20, 100),
            offspring: IntRange::new(1, 5),
            food_needed: IntRange::new(2, 7),
            smell_distance: IntRange::new(30, 100),
        }
    }
}

impl TraitRanges {
    fn validate(&self) -> Result<()> {
        self.size.validate("starting_traits.size")?;
        self.speed.validate("starting_traits.speed")?;
        self.view_distance.validate("starting_traits.view_distance")?;
        self.offspring.validate("starting_traits.offspring")?;
        self.food_needed.validate("starting_traits.food_needed")?;
        self.smell_distance.validate("starting_traits.smell_distance")
    }
}

/// Organism lifecycle and inheritance parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganismConfig {
    /// Ticks an organism lives before dying
    pub lifespan_ticks: u32,
    /// Ticks between random retargets
    pub retarget_ticks: IntRange,
    /// Per-gene mutation chance, read as 1 in `mutation_denominator`
    pub mutation_denominator: u32,
    /// Trait ranges for organisms seeded at world creation
    pub starting_traits: TraitRanges,
}

impl Default for OrganismConfig {
    fn default() -> Self {
        Self {
            lifespan_ticks: 3000,
            retarget_ticks: IntRange::new(250, 750),
            mutation_denominator: 10,
            starting_traits: TraitRanges::default(),
        }
    }
}

/// Plant growth parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantConfig {
    /// Plants grown when the world is created or reset
    pub initial_plants: usize,
    /// Ticks between growth batches
    pub growth_interval_ticks: u32,
    /// Plants per growth batch
    pub batch_size: IntRange,
    /// Radius of a new plant
    pub radius: IntRange,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            initial_plants: 100,
            growth_interval_ticks: 1500,
            batch_size: IntRange::new(25, 50),
            radius: IntRange::new(5, 30),
        }
    }
}

/// Top-level configuration for one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Stop after this many ticks; run until interrupted when `None`
    pub max_ticks: Option<u64>,
    /// Wall-clock pacing of one tick for the host loop
    pub tick_millis: u64,
    /// Ticks between population metric log lines
    pub metrics_interval: u64,
    pub world: WorldConfig,
    pub organisms: OrganismConfig,
    pub plants: PlantConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_ticks: None,
            tick_millis: 20,
            metrics_interval: 500,
            world: WorldConfig::default(),
            organisms: OrganismConfig::default(),
            plants: PlantConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load a JSON config; missing fields fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.world.width <= 0 || self.world.height <= 0 {
            return Err(Error::Configuration(format!(
                "world bounds must be positive, got {}x{}",
                self.world.width, self.world.height
            )));
        }
        if self.world.initial_organisms == 0 {
            return Err(Error::Configuration(
                "world.initial_organisms must be at least 1".to_string(),
            ));
        }
        if self.organisms.lifespan_ticks == 0 {
            return Err(Error::Configuration(
                "organisms.lifespan_ticks must be at least 1".to_string(),
            ));
        }
        if self.organisms.mutation_denominator == 0 {
            return Err(Error::Configuration(
                "organisms.mutation_denominator must be at least 1".to_string(),
            ));
        }
        self.organisms.retarget_ticks.validate("organisms.retarget_ticks")?;
        if self.organisms.retarget_ticks.min < 1 {
            return Err(Error::Configuration(
                "organisms.retarget_ticks.min must be at least 1".to_string(),
            ));
        }
        self.organisms.starting_traits.validate()?;
        if self.plants.growth_interval_ticks == 0 {
            return Err(Error::Configuration(
                "plants.growth_interval_ticks must be at least 1".to_string(),
            ));
        }
        self.plants.batch_size.validate_non_negative("plants.batch_size")?;
        self.plants.radius.validate_non_negative("plants.radius")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_default_configs() {
        let config = SimulationConfig::default();
        assert_eq!(config.world.width, 1200);
        assert_eq!(config.world.height, 900);
        assert_eq!(config.world.initial_organisms, 3);
        assert_eq!(config.organisms.lifespan_ticks, 3000);
        assert_eq!(config.organisms.mutation_denominator, 10);
        assert_eq!(config.plants.initial_plants, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut config = SimulationConfig::default();
        config.plants.radius = IntRange::new(30, 5);
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_zero_denominator_rejected() {
        let mut config = SimulationConfig::default();
        config.organisms.mutation_denominator = 0;
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_non_positive_bounds_rejected() {
        let mut config = SimulationConfig::default();
        config.world.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_range_sample_inclusive() {
        let mut rng = SimRng::seed_from_u64(3);
        let range = IntRange::new(2, 4);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let v = range.sample(&mut rng);
            assert!((2..=4).contains(&v));
            seen[(v - 2) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"seed": 9, "world": {"width": 300}}"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.world.width, 300);
        assert_eq!(config.world.height, 900);
        assert_eq!(config.plants.growth_interval_ticks, 1500);
    }
}

//! Organism state and behavior.

use crate::interaction::Sensed;
use crate::schema::{Phenotype, Trait};
use amoeba_core::{
    Bounds, Error, Heading, IntRange, OrganismId, Position, Result, SimRng, SimulationConfig,
};
use amoeba_genome::{Genome, MutationChance};
use serde::{Deserialize, Serialize};

/// World-wide parameters every organism consults while living and breeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub bounds: Bounds,
    pub lifespan_ticks: u32,
    pub retarget_ticks: IntRange,
    pub mutation: MutationChance,
}

impl Rules {
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        Ok(Self {
            bounds: config.world.bounds(),
            lifespan_ticks: config.organisms.lifespan_ticks,
            retarget_ticks: config.organisms.retarget_ticks,
            mutation: MutationChance::one_in(config.organisms.mutation_denominator)?,
        })
    }

    fn retarget_delay(&self, rng: &mut SimRng) -> u32 {
        u32::try_from(self.retarget_ticks.sample(rng)).map_or(1, |t| t.max(1))
    }
}

/// Behavioral state of a living organism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrganismState {
    /// Looking for plants.
    Foraging,
    /// Fed enough to breed; looking for another receptive organism.
    Receptive,
}

/// An organism in the simulation
#[derive(Debug)]
pub struct Organism {
    pub id: OrganismId,
    position: Position,
    heading: Heading,
    target: Position,
    genome: Genome<i32>,
    foraging_counter: u32,
    alive: bool,
    lifespan_remaining: u32,
    retarget_remaining: u32,
}

impl Organism {
    /// Fails with `InvalidInput` unless `genome` matches the trait schema.
    pub fn new(
        position: Position,
        genome: Genome<i32>,
        rules: &Rules,
        rng: &mut SimRng,
    ) -> Result<Self> {
        if genome.len() != Trait::COUNT {
            return Err(Error::InvalidInput(format!(
                "organism genome needs {} genes, got {}",
                Trait::COUNT,
                genome.len()
            )));
        }

        let mut organism = Self {
            id: OrganismId::generate(rng),
            position,
            heading: Heading::default(),
            target: position,
            genome,
            foraging_counter: 0,
            alive: true,
            lifespan_remaining: rules.lifespan_ticks,
            retarget_remaining: 0,
        };
        organism.retarget(rules, rng);
        Ok(organism)
    }

    pub fn spawn(
        position: Position,
        phenotype: &Phenotype,
        rules: &Rules,
        rng: &mut SimRng,
    ) -> Result<Self> {
        Self::new(position, phenotype.to_genome()?, rules, rng)
    }

    /// Panics if the genome does not follow the schema, which `new` rules out.
    pub fn trait_value(&self, t: Trait) -> i32 {
        self.genome.genes()[t.index()].value()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn genome(&self) -> &Genome<i32> {
        &self.genome
    }

    pub fn radius(&self) -> i32 {
        self.trait_value(Trait::Size)
    }

    pub fn speed(&self) -> i32 {
        self.trait_value(Trait::Speed)
    }

    pub fn view_distance(&self) -> i32 {
        self.trait_value(Trait::ViewDistance)
    }

    pub fn smell_distance(&self) -> i32 {
        self.trait_value(Trait::SmellDistance)
    }

    pub fn offspring_count(&self) -> usize {
        usize::try_from(self.trait_value(Trait::Offspring)).unwrap_or(0)
    }

    pub fn food_needed(&self) -> i32 {
        self.trait_value(Trait::FoodNeeded)
    }

    /// Plants eaten since the last reproduction.
    pub fn foraging_counter(&self) -> u32 {
        self.foraging_counter
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn lifespan_remaining(&self) -> u32 {
        self.lifespan_remaining
    }

    pub fn is_receptive(&self) -> bool {
        i64::from(self.foraging_counter) >= i64::from(self.food_needed())
    }

    pub fn state(&self) -> OrganismState {
        if self.is_receptive() {
            OrganismState::Receptive
        } else {
            OrganismState::Foraging
        }
    }

    /// Count one plant eaten.
    pub fn record_meal(&mut self) {
        self.foraging_counter = self.foraging_counter.saturating_add(1);
    }

    /// Head for `target` and restart the retarget countdown.
    pub fn set_target(&mut self, target: Position, rules: &Rules, rng: &mut SimRng) {
        self.target = target;
        if let Some(heading) = Heading::toward(self.position, target) {
            self.heading = heading;
        }
        self.retarget_remaining = rules.retarget_delay(rng);
    }

    fn retarget(&mut self, rules: &Rules, rng: &mut SimRng) {
        let target = Position::random(rules.bounds, rng);
        self.set_target(target, rules, rng);
    }

    /// Advance one tick: age, maybe retarget, then move.
    pub fn update(&mut self, rules: &Rules, rng: &mut SimRng) {
        if !self.alive {
            return;
        }

        self.lifespan_remaining = self.lifespan_remaining.saturating_sub(1);
        if self.lifespan_remaining == 0 {
            self.alive = false;
            return;
        }

        self.retarget_remaining = self.retarget_remaining.saturating_sub(1);
        if self.retarget_remaining == 0 {
            self.retarget(rules, rng);
        }

        self.advance(rules.bounds);
    }

    /// Out-of-bounds coordinates are clamped back to the wall and that axis
    /// of the heading is inverted.
    fn advance(&mut self, bounds: Bounds) {
        let speed = self.speed() as f32;

        self.position.x += (speed * self.heading.x).round() as i32;
        if self.position.x > bounds.width || self.position.x < 0 {
            self.heading.flip_x();
            self.position.x = self.position.x.clamp(0, bounds.width);
        }

        self.position.y += (speed * self.heading.y).round() as i32;
        if self.position.y > bounds.height || self.position.y < 0 {
            self.heading.flip_y();
            self.position.y = self.position.y.clamp(0, bounds.height);
        }
    }

    /// Asexual reproduction: `offspring_count` independently mutated clones.
    pub fn reproduce(&self, rules: &Rules, rng: &mut SimRng) -> Result<Vec<Organism>> {
        (0..self.offspring_count())
            .map(|_| {
                let mut genome = self.genome.clone();
                genome.mutate_all(rules.mutation, rng);
                Organism::new(self.position, genome, rules, rng)
            })
            .collect()
    }

    /// Sexual reproduction. Both parents' foraging counters reset at once.
    ///
    /// The brood size is read from one crossover of the parents; every child
    /// then gets its own fresh crossover and mutation.
    pub fn reproduce_with(
        &mut self,
        partner: &mut Organism,
        rules: &Rules,
        rng: &mut SimRng,
    ) -> Result<Vec<Organism>> {
        self.foraging_counter = 0;
        partner.foraging_counter = 0;

        let sample = self.genome.crossover(&partner.genome, rng)?;
        let brood = usize::try_from(sample.genes()[Trait::Offspring.index()].value()).unwrap_or(0);

        (0..brood)
            .map(|_| {
                let mut genome = self.genome.crossover(&partner.genome, rng)?;
                genome.mutate_all(rules.mutation, rng);
                Organism::new(self.position, genome, rules, rng)
            })
            .collect()
    }
}

impl Sensed for Organism {
    fn position(&self) -> Position {
        self.position
    }

    fn radius(&self) -> i32 {
        Organism::radius(self)
    }

    fn scent_reach(&self) -> i32 {
        self.smell_distance()
    }
}

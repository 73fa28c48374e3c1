//! The world coordinator.
//!
//! Each tick runs in fixed phases so results depend only on the seed:
//!
//! 1. update every live organism (age, retarget, move)
//! 2. scan: receptive organisms look for mates, foraging ones for plants;
//!    offspring are buffered and plants only flagged
//! 3. commit: drop the dead, append offspring, drop eaten plants
//! 4. grow a batch of plants when the growth countdown expires
//!
//! No population changes shape while it is being scanned.

use crate::interaction::{resolve, Interaction};
use crate::organism::{Organism, Rules};
use crate::plant::Plant;
use crate::schema::Phenotype;
use crate::snapshot::{OrganismView, PlantView, WorldSnapshot};
use crate::stats::WorldStats;
use amoeba_core::{Error, OrganismId, Position, Result, SimRng, SimulationConfig};
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetReason {
    /// Every organism had died.
    Extinction,
    /// The host asked for a restart.
    Requested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    Advanced,
    /// The tick only reinitialized the world.
    Reset(ResetReason),
}

pub struct World {
    config: SimulationConfig,
    rules: Rules,
    organisms: Vec<Organism>,
    plants: Vec<Plant>,
    growth_countdown: u32,
    rng: SimRng,
    tick: u64,
    reset_requested: bool,
    stats: WorldStats,
}

impl World {
    /// A world seeded with the configured starting organisms and plants.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let mut world = Self::empty(config)?;
        world.populate()?;

        info!(
            seed = world.config.seed,
            width = world.rules.bounds.width,
            height = world.rules.bounds.height,
            organisms = world.organisms.len(),
            plants = world.plants.len(),
            "World created"
        );
        Ok(world)
    }

    /// A world with no organisms or plants, for hosts that stage their own.
    ///
    /// The first tick of a world left empty resets it to the configured start.
    pub fn empty(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let rules = Rules::from_config(&config)?;
        let rng = SimRng::seed_from_u64(config.seed);
        let growth_countdown = config.plants.growth_interval_ticks;

        Ok(Self {
            config,
            rules,
            organisms: Vec::new(),
            plants: Vec::new(),
            growth_countdown,
            rng,
            tick: 0,
            reset_requested: false,
            stats: WorldStats::default(),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn stats(&self) -> WorldStats {
        self.stats
    }

    pub fn organisms(&self) -> &[Organism] {
        &self.organisms
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn organism(&self, id: OrganismId) -> Option<&Organism> {
        self.organisms.iter().find(|o| o.id == id)
    }

    pub fn organism_mut(&mut self, id: OrganismId) -> Option<&mut Organism> {
        self.organisms.iter_mut().find(|o| o.id == id)
    }

    /// Add an organism with the given traits. Returns its id.
    pub fn spawn_organism(&mut self, position: Position, phenotype: &Phenotype) -> Result<OrganismId> {
        let organism = Organism::spawn(position, phenotype, &self.rules, &mut self.rng)?;
        let id = organism.id;
        self.organisms.push(organism);
        Ok(id)
    }

    pub fn add_plant(&mut self, position: Position, radius: i32) {
        self.plants.push(Plant::new(position, radius));
    }

    /// Reinitialize on the next tick.
    pub fn request_reset(&mut self) {
        self.reset_requested = true;
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            organisms: self
                .organisms
                .iter()
                .filter(|o| o.is_alive())
                .map(OrganismView::from)
                .collect(),
            plants: self
                .plants
                .iter()
                .filter(|p| !p.is_eaten())
                .map(PlantView::from)
                .collect(),
        }
    }

    /// Run `ticks` ticks back to back.
    #[instrument(skip(self), fields(seed = self.config.seed))]
    pub fn run(&mut self, ticks: u64) -> Result<WorldStats> {
        info!("Running world for {} ticks", ticks);
        for _ in 0..ticks {
            self.tick()?;
        }
        self.emit_population_metrics();
        Ok(self.stats)
    }

    /// Advance the world by one tick.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        self.tick += 1;

        let reason = if self.reset_requested {
            Some(ResetReason::Requested)
        } else if self.organisms.is_empty() {
            Some(ResetReason::Extinction)
        } else {
            None
        };
        if let Some(reason) = reason {
            self.reset(reason)?;
            return Ok(TickOutcome::Reset(reason));
        }

        for organism in self.organisms.iter_mut().filter(|o| o.is_alive()) {
            organism.update(&self.rules, &mut self.rng);
        }

        let offspring = self.scan()?;
        self.commit(offspring);
        self.grow_on_schedule();

        let interval = self.config.metrics_interval;
        if interval > 0 && self.tick % interval == 0 {
            self.emit_population_metrics();
        }

        Ok(TickOutcome::Advanced)
    }

    /// Resolve every interaction of the tick without changing either
    /// population's shape. Returns offspring waiting to be added.
    fn scan(&mut self) -> Result<Vec<Organism>> {
        let Self {
            rules,
            organisms,
            plants,
            rng,
            stats,
            tick,
            ..
        } = self;

        let mut offspring = Vec::new();
        // Organisms that already bred this tick sit out the rest of it.
        let mut spent = vec![false; organisms.len()];

        for i in 0..organisms.len() {
            if spent[i] || !organisms[i].is_alive() {
                continue;
            }

            if !organisms[i].is_receptive() {
                let organism = &mut organisms[i];
                for plant in plants.iter_mut().filter(|p| !p.is_eaten()) {
                    match resolve(&*organism, &*plant, rng) {
                        Interaction::Contact => {
                            plant.mark_eaten();
                            organism.record_meal();
                        }
                        kind if kind.is_pursuit() => {
                            trace!(organism_id = %organism.id, interaction = ?kind, "Heading for plant");
                            organism.set_target(plant.position, rules, rng);
                        }
                        _ => {}
                    }
                }
                continue;
            }

            for j in 0..organisms.len() {
                if j == i || spent[j] {
                    continue;
                }
                let other = &organisms[j];
                if !other.is_alive() || !other.is_receptive() {
                    continue;
                }

                match resolve(&organisms[i], other, rng) {
                    Interaction::Contact => {
                        let (actor, partner) = pair_mut(organisms, i, j)?;
                        let brood = actor.reproduce_with(partner, rules, rng)?;
                        debug!(
                            tick = *tick,
                            parent_a = %actor.id,
                            parent_b = %partner.id,
                            offspring = brood.len(),
                            "Organisms reproduced"
                        );
                        stats.reproductions += 1;
                        offspring.extend(brood);
                        spent[i] = true;
                        spent[j] = true;
                        break;
                    }
                    kind if kind.is_pursuit() => {
                        let mate = organisms[j].position();
                        organisms[i].set_target(mate, rules, rng);
                    }
                    _ => {}
                }
            }
        }

        Ok(offspring)
    }

    fn commit(&mut self, offspring: Vec<Organism>) {
        let before = self.organisms.len();
        self.organisms.retain(|o| o.is_alive());
        let deaths = before - self.organisms.len();

        let births = offspring.len();
        self.organisms.extend(offspring);

        let plants_before = self.plants.len();
        self.plants.retain(|p| !p.is_eaten());
        let eaten = plants_before - self.plants.len();

        self.stats.deaths += deaths as u64;
        self.stats.births += births as u64;
        self.stats.plants_eaten += eaten as u64;

        if deaths > 0 {
            debug!(tick = self.tick, deaths, population = self.organisms.len(), "Organisms died");
        }
        if self.organisms.is_empty() {
            info!(tick = self.tick, "All organisms died out");
        }
    }

    fn grow_on_schedule(&mut self) {
        self.growth_countdown = self.growth_countdown.saturating_sub(1);
        if self.growth_countdown == 0 {
            let count = usize::try_from(self.config.plants.batch_size.sample(&mut self.rng)).unwrap_or(0);
            self.grow(count);
            self.growth_countdown = self.config.plants.growth_interval_ticks;
            debug!(tick = self.tick, grown = count, plants = self.plants.len(), "Plants grew");
        }
    }

    fn grow(&mut self, count: usize) {
        for _ in 0..count {
            let plant = Plant::random(&self.config.plants, self.rules.bounds, &mut self.rng);
            self.plants.push(plant);
        }
        self.stats.plants_grown += count as u64;
    }

    fn populate(&mut self) -> Result<()> {
        self.organisms.clear();
        self.plants.clear();

        for _ in 0..self.config.world.initial_organisms {
            let position = Position::random(self.rules.bounds, &mut self.rng);
            let phenotype = Phenotype::random(&self.config.organisms.starting_traits, &mut self.rng);
            self.spawn_organism(position, &phenotype)?;
        }
        self.grow(self.config.plants.initial_plants);
        self.growth_countdown = self.config.plants.growth_interval_ticks;
        Ok(())
    }

    fn reset(&mut self, reason: ResetReason) -> Result<()> {
        self.reset_requested = false;
        self.stats.resets += 1;
        self.populate()?;
        info!(
            tick = self.tick,
            reason = ?reason,
            resets = self.stats.resets,
            organisms = self.organisms.len(),
            plants = self.plants.len(),
            "New simulation began"
        );
        Ok(())
    }

    fn emit_population_metrics(&self) {
        let population = self.organisms.len();
        let receptive = self.organisms.iter().filter(|o| o.is_receptive()).count();
        let mean = |f: fn(&Organism) -> i32| {
            if population == 0 {
                0.0
            } else {
                self.organisms.iter().map(|o| f64::from(f(o))).sum::<f64>() / population as f64
            }
        };

        info!(
            event = "population_metrics",
            tick = self.tick,
            population,
            receptive,
            plants = self.plants.len(),
            avg_size = format!("{:.1}", mean(Organism::radius)),
            avg_speed = format!("{:.2}", mean(Organism::speed)),
            avg_view = format!("{:.1}", mean(Organism::view_distance)),
            avg_smell = format!("{:.1}", mean(Organism::smell_distance)),
            births = self.stats.births,
            deaths = self.stats.deaths,
            reproductions = self.stats.reproductions,
            plants_eaten = self.stats.plants_eaten,
            resets = self.stats.resets,
            "Population metrics snapshot"
        );
    }
}

/// Two distinct mutable entries of one slice.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> Result<(&mut T, &mut T)> {
    if a == b || a >= items.len() || b >= items.len() {
        return Err(Error::InvalidState(format!(
            "interaction between entries {} and {} of {}",
            a,
            b,
            items.len()
        )));
    }
    if a < b {
        let (left, right) = items.split_at_mut(b);
        Ok((&mut left[a], &mut right[0]))
    } else {
        let (left, right) = items.split_at_mut(a);
        Ok((&mut right[0], &mut left[b]))
    }
}

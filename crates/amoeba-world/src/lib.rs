//! World simulation engine.
//!
//! Organisms wander a bounded plane, forage for plants, and breed once they
//! have eaten enough. The [`World`] coordinator advances everything one tick
//! at a time and hands presentation a [`WorldSnapshot`].

pub mod interaction;
pub mod organism;
pub mod plant;
pub mod schema;
pub mod snapshot;
pub mod stats;
pub mod world;

pub use interaction::{resolve, Interaction, Sensed};
pub use organism::{Organism, OrganismState, Rules};
pub use plant::Plant;
pub use schema::{Phenotype, Trait};
pub use snapshot::{OrganismView, PlantView, WorldSnapshot};
pub use stats::WorldStats;
pub use world::{ResetReason, TickOutcome, World};

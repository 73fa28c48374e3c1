//! Heritable trait encoding for organisms.
//!
//! A genome is a fixed-length vector of bounded, steppable numeric genes.
//! It is schema-agnostic: what each position means is decided by the owner.
//!
//! - Genes always hold a value inside their own `[min, max]`
//! - Mutation nudges a gene by exactly one step, up or down
//! - Crossover is uniform and keeps the bounds of the first parent

pub mod gene;
pub mod genome;
pub mod mutation;

pub use gene::{Allele, Gene};
pub use genome::Genome;
pub use mutation::MutationChance;

//! Fixed-length gene vectors with mutation and uniform crossover.

use crate::gene::{Allele, Gene};
use crate::mutation::MutationChance;
use amoeba_core::{Error, Result, SimRng};
use rand::Rng;
use serde::Serialize;
use std::fmt;

/// An ordered, fixed-length sequence of genes.
///
/// `Clone` is a deep copy: a cloned genome shares no storage with its source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Genome<T> {
    genes: Vec<Gene<T>>,
}

impl<T: Allele> Genome<T> {
    pub fn new(genes: Vec<Gene<T>>) -> Result<Self> {
        if genes.is_empty() {
            return Err(Error::Configuration(
                "genome length must be at least 1".to_string(),
            ));
        }
        Ok(Self { genes })
    }

    /// A genome of `length` copies of `template`.
    pub fn filled(length: usize, template: Gene<T>) -> Result<Self> {
        Self::new(vec![template; length])
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Always false for a constructed genome.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn genes(&self) -> &[Gene<T>] {
        &self.genes
    }

    pub fn gene(&self, index: usize) -> Option<&Gene<T>> {
        self.genes.get(index)
    }

    pub fn gene_mut(&mut self, index: usize) -> Option<&mut Gene<T>> {
        self.genes.get_mut(index)
    }

    /// Give every gene an independent `chance` to mutate. Returns how many did.
    pub fn mutate_all(&mut self, chance: MutationChance, rng: &mut SimRng) -> usize {
        let mut mutated = 0;
        for gene in &mut self.genes {
            if chance.roll(rng) {
                gene.mutate(rng);
                mutated += 1;
            }
        }
        mutated
    }

    /// Uniform crossover. Each position takes `other`'s value with
    /// probability 1/2; bounds and steps always come from `self`.
    pub fn crossover(&self, other: &Genome<T>, rng: &mut SimRng) -> Result<Genome<T>> {
        if self.len() != other.len() {
            return Err(Error::InvalidInput(format!(
                "cannot cross genomes of length {} and {}",
                self.len(),
                other.len()
            )));
        }

        let mut child = self.clone();
        for (gene, donor) in child.genes.iter_mut().zip(&other.genes) {
            if rng.gen_bool(0.5) {
                gene.set_value(donor.value());
            }
        }
        Ok(child)
    }
}

impl<T: fmt::Display> fmt::Display for Genome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for gene in &self.genes {
            write!(f, "[{}]", gene)?;
        }
        Ok(())
    }
}

//! Distance-tiered sensing between an organism and another entity.
//!
//! Three concentric thresholds surround the acting organism:
//!
//! - touch: own radius + counterpart radius
//! - view: own view distance + counterpart radius
//! - smell: own smell distance + counterpart scent reach
//!
//! Anything inside view is seen for certain (and touched if inside touch).
//! Between view and smell the organism may pick up a scent; the odds fall
//! off linearly toward the smell edge and are further cut to one in five.

use crate::organism::Organism;
use amoeba_core::{Position, SimRng};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Anything an organism can sense.
pub trait Sensed {
    fn position(&self) -> Position;
    fn radius(&self) -> i32;
    /// How far this entity's scent carries toward a smeller.
    fn scent_reach(&self) -> i32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interaction {
    None,
    /// Picked up by scent beyond view range.
    Detected,
    Seen,
    Contact,
}

impl Interaction {
    /// Seen or detected: the actor should head toward the counterpart.
    pub fn is_pursuit(self) -> bool {
        matches!(self, Interaction::Detected | Interaction::Seen)
    }
}

/// Classify what `actor` perceives of `other`.
pub fn resolve<S: Sensed + ?Sized>(actor: &Organism, other: &S, rng: &mut SimRng) -> Interaction {
    let distance = actor.position().distance(&other.position());

    let view = f64::from(actor.view_distance()) + f64::from(other.radius());
    if distance <= view {
        let touch = f64::from(actor.radius()) + f64::from(other.radius());
        return if distance <= touch {
            Interaction::Contact
        } else {
            Interaction::Seen
        };
    }

    let smell = actor.smell_distance().saturating_add(other.scent_reach());
    if smell > 0 && distance <= f64::from(smell) {
        let draw = rng.gen_range(0..smell);
        if f64::from(draw) > distance && rng.gen_ratio(1, 5) {
            return Interaction::Detected;
        }
    }

    Interaction::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organism::Rules;
    use crate::plant::Plant;
    use crate::schema::Phenotype;
    use amoeba_core::SimulationConfig;
    use rand::SeedableRng;

    fn organism_at(pos: Position, rng: &mut SimRng) -> Organism {
        let rules = Rules::from_config(&SimulationConfig::default()).unwrap();
        let phenotype = Phenotype {
            size: 10,
            speed: 0,
            view_distance: 50,
            offspring: 2,
            food_needed: 2,
            smell_distance: 200,
        };
        Organism::spawn(pos, &phenotype, &rules, rng).unwrap()
    }

    #[test]
    fn test_zero_distance_is_contact() {
        let mut rng = SimRng::seed_from_u64(1);
        let org = organism_at(Position::new(100, 100), &mut rng);
        let plant = Plant::new(Position::new(100, 100), 0);
        for _ in 0..100 {
            assert_eq!(resolve(&org, &plant, &mut rng), Interaction::Contact);
        }
        let twin = organism_at(Position::new(100, 100), &mut rng);
        assert_eq!(resolve(&org, &twin, &mut rng), Interaction::Contact);
    }

    #[test]
    fn test_touch_and_view_thresholds() {
        let mut rng = SimRng::seed_from_u64(2);
        let org = organism_at(Position::new(0, 0), &mut rng);

        // touch = 10 + 5, view = 50 + 5
        let touching = Plant::new(Position::new(15, 0), 5);
        assert_eq!(resolve(&org, &touching, &mut rng), Interaction::Contact);

        let visible = Plant::new(Position::new(16, 0), 5);
        assert_eq!(resolve(&org, &visible, &mut rng), Interaction::Seen);

        let edge = Plant::new(Position::new(55, 0), 5);
        assert_eq!(resolve(&org, &edge, &mut rng), Interaction::Seen);
    }

    #[test]
    fn test_beyond_smell_is_none() {
        let mut rng = SimRng::seed_from_u64(3);
        let org = organism_at(Position::new(0, 0), &mut rng);
        // smell = 200 + 5
        let far = Plant::new(Position::new(206, 0), 5);
        for _ in 0..1000 {
            assert_eq!(resolve(&org, &far, &mut rng), Interaction::None);
        }
    }

    #[test]
    fn test_scent_band_is_probabilistic() {
        let mut rng = SimRng::seed_from_u64(4);
        let org = organism_at(Position::new(0, 0), &mut rng);
        // Just past view: scent odds are roughly (1 - 60/205) / 5.
        let near_band = Plant::new(Position::new(60, 0), 5);

        let detected = (0..10_000)
            .map(|_| resolve(&org, &near_band, &mut rng))
            .filter(|i| {
                assert!(matches!(i, Interaction::None | Interaction::Detected));
                *i == Interaction::Detected
            })
            .count();
        assert!((1000..1900).contains(&detected), "detected = {}", detected);
    }

    #[test]
    fn test_scent_fades_near_edge() {
        let mut rng = SimRng::seed_from_u64(5);
        let org = organism_at(Position::new(0, 0), &mut rng);
        let near = Plant::new(Position::new(60, 0), 5);
        let edge = Plant::new(Position::new(200, 0), 5);

        let count = |plant: &Plant, rng: &mut SimRng| {
            (0..5000)
                .filter(|_| resolve(&org, plant, rng) == Interaction::Detected)
                .count()
        };
        assert!(count(&near, &mut rng) > count(&edge, &mut rng));
    }

    #[test]
    fn test_organism_scent_uses_counterpart_smell() {
        let mut rng = SimRng::seed_from_u64(6);
        let org = organism_at(Position::new(0, 0), &mut rng);
        let other = organism_at(Position::new(390, 0), &mut rng);
        // smell = 200 + 200; a plant at the same spot is out of reach.
        let plant = Plant::new(Position::new(390, 0), 10);

        let detections = (0..20_000)
            .filter(|_| resolve(&org, &other, &mut rng) == Interaction::Detected)
            .count();
        assert!(detections > 0);
        assert!((0..1000).all(|_| resolve(&org, &plant, &mut rng) == Interaction::None));
    }
}

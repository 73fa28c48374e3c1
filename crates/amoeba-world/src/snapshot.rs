//! Read-only view of the world handed to presentation once per tick.

use crate::organism::{Organism, OrganismState};
use crate::plant::Plant;
use amoeba_core::{OrganismId, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganismView {
    pub id: OrganismId,
    pub position: Position,
    pub radius: i32,
    pub view_distance: i32,
    pub smell_distance: i32,
    pub state: OrganismState,
}

impl From<&Organism> for OrganismView {
    fn from(org: &Organism) -> Self {
        Self {
            id: org.id,
            position: org.position(),
            radius: org.radius(),
            view_distance: org.view_distance(),
            smell_distance: org.smell_distance(),
            state: org.state(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantView {
    pub position: Position,
    pub radius: i32,
}

impl From<&Plant> for PlantView {
    fn from(plant: &Plant) -> Self {
        Self {
            position: plant.position,
            radius: plant.radius,
        }
    }
}

/// Live organisms and uneaten plants, in population order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub organisms: Vec<OrganismView>,
    pub plants: Vec<PlantView>,
}

#[cfg(test)]
mod tests {
    use crate::world::World;
    use amoeba_core::SimulationConfig;

    #[test]
    fn test_snapshot_lists_live_entities() {
        let world = World::new(SimulationConfig::default()).unwrap();
        let snapshot = world.snapshot();
        assert_eq!(snapshot.tick, 0);
        assert_eq!(snapshot.organisms.len(), world.organisms().len());
        assert_eq!(snapshot.plants.len(), world.plants().len());
        for (view, org) in snapshot.organisms.iter().zip(world.organisms()) {
            assert_eq!(view.id, org.id);
            assert_eq!(view.radius, org.radius());
            assert_eq!(view.view_distance, org.view_distance());
            assert_eq!(view.smell_distance, org.smell_distance());
        }
    }

    #[test]
    fn test_snapshot_serialization() {
        let world = World::new(SimulationConfig::default()).unwrap();
        let snapshot = world.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: super::WorldSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.organisms.len(), snapshot.organisms.len());
        assert_eq!(decoded.plants.len(), snapshot.plants.len());
    }
}

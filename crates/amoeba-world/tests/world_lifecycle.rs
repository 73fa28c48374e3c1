use amoeba_core::{IntRange, Position, SimulationConfig};
use amoeba_world::{OrganismState, Phenotype, ResetReason, TickOutcome, World};

fn isolated_config(lifespan: u32) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.seed = 7;
    config.world.initial_organisms = 1;
    config.organisms.lifespan_ticks = lifespan;
    config.plants.initial_plants = 0;
    config.plants.growth_interval_ticks = 1_000_000;
    config
}

fn stationary(food_needed: i32, offspring: i32) -> Phenotype {
    Phenotype {
        size: 15,
        speed: 0,
        view_distance: 40,
        offspring,
        food_needed,
        smell_distance: 60,
    }
}

#[test]
fn test_lone_organism_dies_then_world_reinitializes() {
    let lifespan = 25;
    let mut world = World::new(isolated_config(lifespan)).unwrap();
    assert_eq!(world.snapshot().organisms.len(), 1);
    assert!(world.snapshot().plants.is_empty());

    for tick in 1..lifespan {
        assert_eq!(world.tick().unwrap(), TickOutcome::Advanced);
        assert_eq!(world.snapshot().organisms.len(), 1, "alive after tick {}", tick);
    }

    assert_eq!(world.tick().unwrap(), TickOutcome::Advanced);
    assert!(world.snapshot().organisms.is_empty());
    assert_eq!(world.stats().deaths, 1);

    assert_eq!(
        world.tick().unwrap(),
        TickOutcome::Reset(ResetReason::Extinction)
    );
    assert_eq!(world.snapshot().organisms.len(), 1);
    assert_eq!(world.stats().resets, 1);
}

#[test]
fn test_receptive_pair_at_same_spot_reproduces() {
    let mut world = World::empty(isolated_config(1000)).unwrap();
    let spot = Position::new(300, 300);
    let a = world.spawn_organism(spot, &stationary(2, 3)).unwrap();
    let b = world.spawn_organism(spot, &stationary(2, 3)).unwrap();
    for id in [a, b] {
        let org = world.organism_mut(id).unwrap();
        org.record_meal();
        org.record_meal();
        assert_eq!(org.state(), OrganismState::Receptive);
    }

    assert_eq!(world.tick().unwrap(), TickOutcome::Advanced);

    assert_eq!(world.organism(a).unwrap().foraging_counter(), 0);
    assert_eq!(world.organism(b).unwrap().foraging_counter(), 0);
    assert_eq!(world.stats().reproductions, 1);
    assert_eq!(world.stats().births, 3);

    let snapshot = world.snapshot();
    assert_eq!(snapshot.organisms.len(), 5);
    assert!(snapshot
        .organisms
        .iter()
        .all(|o| o.state == OrganismState::Foraging));
    // Offspring start where their parents stand.
    assert!(snapshot.organisms.iter().all(|o| o.position == spot));
}

#[test]
fn test_organism_on_plant_eats_it() {
    let mut world = World::empty(isolated_config(1000)).unwrap();
    let spot = Position::new(120, 80);
    let id = world.spawn_organism(spot, &stationary(5, 1)).unwrap();
    world.add_plant(spot, 10);

    world.tick().unwrap();

    assert!(world.snapshot().plants.is_empty());
    assert_eq!(world.organism(id).unwrap().foraging_counter(), 1);
}

#[test]
fn test_organism_turns_toward_seen_plant() {
    let mut world = World::empty(isolated_config(1000)).unwrap();
    let id = world
        .spawn_organism(Position::new(100, 100), &stationary(5, 1))
        .unwrap();
    world.add_plant(Position::new(130, 100), 5);

    world.tick().unwrap();

    let org = world.organism(id).unwrap();
    assert_eq!(org.target(), Position::new(130, 100));
    assert!((org.heading().x - 1.0).abs() < 1e-6);
    assert_eq!(world.snapshot().plants.len(), 1);
}

#[test]
fn test_population_stays_in_bounds() {
    let mut config = SimulationConfig::default();
    config.seed = 99;
    config.world.width = 300;
    config.world.height = 200;
    config.world.initial_organisms = 10;
    config.organisms.starting_traits.speed = IntRange::new(3, 10);
    let mut world = World::new(config).unwrap();

    for _ in 0..300 {
        world.tick().unwrap();
        for org in world.snapshot().organisms {
            assert!((0..=300).contains(&org.position.x));
            assert!((0..=200).contains(&org.position.y));
        }
    }
}

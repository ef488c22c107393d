//! Integration test: structural invariants under random play.
//!
//! Drives worlds with seeded random actions and checks after every tick
//! that the pool and spatial index agree, every agent stands on an open
//! in-bounds cell, and the per-tick outputs line up with the population.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skirmish_core::AgentId;
use skirmish_engine::create_world;
use skirmish_test_utils::fixtures::{battle_config, random_actions, two_group_config};

fn ids<T>(v: &[(AgentId, T)]) -> Vec<AgentId> {
    v.iter().map(|(id, _)| *id).collect()
}

fn check_world(config: skirmish_engine::WorldConfig, action_seed: u64, ticks: usize) {
    let mut world = create_world(config).unwrap();
    world.reset().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(action_seed);
    let mut dead: BTreeSet<AgentId> = BTreeSet::new();

    for _ in 0..ticks {
        if world.state().is_done() {
            break;
        }
        let before: Vec<AgentId> = world.agents().iter().map(|a| a.id).collect();
        let actions = random_actions(&world, &mut rng);
        let r = world.step_discrete(&actions).unwrap();

        world.pool().check_consistency().unwrap();
        let grid = world.pool().grid();
        let mut cells = BTreeSet::new();
        for (id, pos) in world.agent_positions() {
            assert!(grid.contains(pos), "{id} off grid at {pos}");
            assert!(!grid.is_obstacle(pos), "{id} on obstacle at {pos}");
            assert!(cells.insert(pos), "two agents share {pos}");
            assert_eq!(world.pool().index().occupant_at(pos), Some(id));
            assert!(!dead.contains(&id), "retired id {id} came back");
        }

        assert_eq!(ids(&r.rewards), before);
        assert_eq!(ids(&r.dones), before);
        assert_eq!(ids(&r.observations), world.pool().alive_ids());
        for (id, done) in &r.dones {
            if !r.episode_done {
                assert_eq!(*done, !world.pool().is_alive(*id));
            }
        }
        dead.extend(r.resolved.died());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn open_field_invariants(layout_seed in 0u64..1000, action_seed in 0u64..1000, per_group in 1usize..40) {
        check_world(two_group_config(20, 20, per_group, layout_seed), action_seed, 40);
    }

    #[test]
    fn walled_arena_invariants(layout_seed in 0u64..1000, action_seed in 0u64..1000) {
        check_world(battle_config(32, 40, layout_seed, false), action_seed, 40);
    }
}

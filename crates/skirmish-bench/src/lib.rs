//! Benchmark profiles and utilities for the skirmish simulation engine.
//!
//! Provides pre-built [`WorldConfig`] profiles for benchmarking and examples:
//!
//! - [`reference_profile`]: 64x64 grid with 2 x 256 agents
//! - [`stress_profile`]: 256x256 grid with 2 x 4096 agents, parallel phases on
//! - [`scripted_actions`]: deterministic per-agent actions without an RNG

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::BTreeMap;

use skirmish_core::AgentId;
use skirmish_engine::{
    GroupConfig, ObstacleConfig, ParallelConfig, Termination, World, WorldConfig,
};

fn profile(size: u32, per_group: usize, seed: u64, parallel: bool) -> WorldConfig {
    let group = |name: &str| {
        let mut g = GroupConfig::named(name, per_group);
        g.view.view_range = 6;
        g.attack_range = 1;
        g
    };
    WorldConfig {
        width: size,
        height: size,
        max_agents: per_group * 2,
        max_ticks: Some(1000),
        seed,
        groups: vec![group("red"), group("blue")],
        obstacles: ObstacleConfig {
            border: true,
            random_density: 0.02,
            ..ObstacleConfig::default()
        },
        termination: Termination::LastGroupStanding,
        parallel: ParallelConfig {
            enabled: parallel,
            threshold: 1024,
        },
        ..WorldConfig::default()
    }
}

/// Build a reference benchmark profile: 64x64 grid, 512 agents.
pub fn reference_profile(seed: u64) -> WorldConfig {
    profile(64, 256, seed, false)
}

/// Build a stress benchmark profile: 256x256 grid, 8192 agents.
///
/// Same rules as [`reference_profile`] at 16x the area and population,
/// with observation and reward computation sharded across rayon workers.
pub fn stress_profile(seed: u64) -> WorldConfig {
    profile(256, 4096, seed, true)
}

/// Deterministic discrete actions for every living agent.
///
/// Cycles each agent through its group's action space using a simple
/// hash of the agent id and tick, so benchmarks exercise moves, turns and
/// attacks without pulling in an RNG.
pub fn scripted_actions(world: &World, tick: u64) -> BTreeMap<AgentId, u32> {
    world
        .agents()
        .iter()
        .map(|a| {
            let n = world.action_space(a.group).map_or(1, |s| s.len()) as u64;
            let h = a
                .id
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(tick.wrapping_mul(1442695040888963407));
            (a.id, ((h >> 33) % n) as u32)
        })
        .collect()
}

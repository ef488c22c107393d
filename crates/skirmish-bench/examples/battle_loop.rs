//! End-to-end battle loop example.
//!
//! Demonstrates: build config → World → reset → step with discrete actions
//! → read rewards and metrics → reset with a new seed → repeat.
//!
//! Set `RUST_LOG=skirmish_engine=debug` to see per-tick summaries.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skirmish_bench::reference_profile;
use skirmish_core::AgentId;
use skirmish_engine::World;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut world = World::new(reference_profile(42)).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    for episode in 0..3u64 {
        world.set_seed(42 + episode);
        let obs = world.reset().unwrap();
        tracing::info!(episode, agents = obs.len(), "episode start");

        let mut returns: BTreeMap<AgentId, f32> = BTreeMap::new();
        let mut total_us = 0u64;
        while !world.state().is_done() {
            let actions: BTreeMap<AgentId, u32> = world
                .agents()
                .iter()
                .map(|a| {
                    let n = world.action_space(a.group).map_or(1, |s| s.len()) as u32;
                    (a.id, rng.random_range(0..n))
                })
                .collect();
            let result = world.step_discrete(&actions).unwrap();
            for (id, r) in &result.rewards {
                *returns.entry(*id).or_default() += r;
            }
            total_us += result.metrics.total_us;

            if result.tick.0 % 100 == 0 {
                println!(
                    "  tick {:>4}: alive={:?} hits={:>3} kills={:>2} time={:>6}us",
                    result.tick.0,
                    world.group_counts(),
                    result.metrics.attacks_hit,
                    result.metrics.kills,
                    result.metrics.total_us,
                );
            }
        }

        let mean = returns.values().sum::<f32>() / returns.len().max(1) as f32;
        println!(
            "episode {episode}: {} after {} ticks, survivors={:?}, mean return={mean:.3}, mean tick={}us, hash={:016x}",
            world.state(),
            world.tick().0,
            world.group_counts(),
            total_us / world.tick().0.max(1),
            world.state_hash(),
        );
    }
}

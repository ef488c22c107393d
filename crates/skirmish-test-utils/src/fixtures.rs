//! Reusable world fixtures.
//!
//! - [`two_group_config`]: two symmetric groups spawned at random.
//! - [`battle_config`]: a larger arena with walls, obstacles and regions.
//! - [`random_actions`]: a seeded stream of discrete actions.
//! - [`ConstantRule`]: a reward rule that always returns the same value.

use std::collections::BTreeMap;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use skirmish_core::AgentId;
use skirmish_engine::{
    GroupConfig, ObstacleConfig, ParallelConfig, RectConfig, SpawnConfig, World, WorldConfig,
};
use skirmish_reward::{AgentTick, RewardContext, RewardRule};

/// Two default groups, `red` and `blue`, each with `per_group` agents
/// spawned at random on an open `width × height` grid.
pub fn two_group_config(width: u32, height: u32, per_group: usize, seed: u64) -> WorldConfig {
    WorldConfig {
        width,
        height,
        max_agents: per_group * 2,
        max_ticks: Some(200),
        seed,
        groups: vec![
            GroupConfig::named("red", per_group),
            GroupConfig::named("blue", per_group),
        ],
        ..WorldConfig::default()
    }
}

/// A walled arena with random obstacles and the two groups starting in
/// opposite corners. Units are faster and see further than the defaults.
pub fn battle_config(size: u32, per_group: usize, seed: u64, parallel: bool) -> WorldConfig {
    let corner = (size / 3).max(2);
    let far = size as i32 - 1 - corner as i32;
    let group = |name: &str, x: i32, y: i32| {
        let mut g = GroupConfig::named(name, per_group);
        g.speed = 2;
        g.attack_range = 2;
        g.view.view_range = 6;
        g.spawn = SpawnConfig::Region {
            count: per_group,
            rect: RectConfig {
                x,
                y,
                width: corner,
                height: corner,
            },
        };
        g
    };
    WorldConfig {
        width: size,
        height: size,
        max_agents: per_group * 2,
        max_ticks: Some(500),
        seed,
        groups: vec![group("red", 1, 1), group("blue", far, far)],
        obstacles: ObstacleConfig {
            border: true,
            random_density: 0.05,
            ..ObstacleConfig::default()
        },
        parallel: ParallelConfig {
            enabled: parallel,
            threshold: 64,
        },
        ..WorldConfig::default()
    }
}

/// One discrete action per living agent, drawn uniformly from its group's
/// action space, plus an occasional action for an id that does not exist.
pub fn random_actions(world: &World, rng: &mut ChaCha8Rng) -> BTreeMap<AgentId, u32> {
    let mut out = BTreeMap::new();
    for agent in world.agents() {
        let n = world
            .action_space(agent.group)
            .map_or(1, |space| space.len());
        out.insert(agent.id, rng.random_range(0..n as u32));
    }
    if rng.random_bool(0.1) {
        out.insert(AgentId(u64::MAX), 0);
    }
    out
}

/// Adds a fixed amount to every surviving agent's reward.
#[derive(Debug, Clone)]
pub struct ConstantRule {
    pub value: f32,
}

impl ConstantRule {
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl RewardRule for ConstantRule {
    fn name(&self) -> &str {
        "constant"
    }

    fn score(&self, _ctx: &RewardContext<'_>, _agent: &AgentTick<'_>) -> f32 {
        self.value
    }
}

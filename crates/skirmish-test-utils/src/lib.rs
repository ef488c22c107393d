//! Test utilities for skirmish development.
//!
//! Provides a [`TestWorldBuilder`] for hand-placed scenarios and the
//! reusable fixtures in [`fixtures`]: canned configurations, seeded random
//! action streams and a constant reward rule.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use skirmish_core::{Direction, Pos};
use skirmish_engine::{
    GroupConfig, ObstacleConfig, SpawnConfig, Termination, World, WorldConfig,
};

/// Builder for small worlds with every agent and obstacle placed by hand.
///
/// Groups are declared with [`group`](Self::group) and populated with
/// [`agent`](Self::agent). Ids are allocated group by group in declaration
/// order, and within a group in the order agents were added.
///
/// Defaults: no step reward shaping beyond the group defaults, recovery
/// off, facing north, termination `Never`, `max_ticks` 100.
pub struct TestWorldBuilder {
    config: WorldConfig,
}

impl TestWorldBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            config: WorldConfig {
                width,
                height,
                max_agents: (width as usize * height as usize).max(1),
                max_ticks: Some(100),
                groups: Vec::new(),
                obstacles: ObstacleConfig::default(),
                termination: Termination::Never,
                ..WorldConfig::default()
            },
        }
    }

    /// Declare a group with the given combat rules and no agents yet.
    pub fn group(mut self, name: &str, hp_max: f32, damage: f32) -> Self {
        self.config.groups.push(GroupConfig {
            name: name.to_string(),
            hp_max,
            damage,
            step_recover: 0.0,
            facing: Some(Direction::North),
            spawn: SpawnConfig::Positions { cells: Vec::new() },
            ..GroupConfig::default()
        });
        self
    }

    /// Adjust the most recently declared group.
    pub fn with_last_group(mut self, f: impl FnOnce(&mut GroupConfig)) -> Self {
        if let Some(g) = self.config.groups.last_mut() {
            f(g);
        }
        self
    }

    /// Place an agent of group `group` (declaration index) at `(x, y)`.
    pub fn agent(mut self, group: usize, x: i32, y: i32) -> Self {
        let g = &mut self.config.groups[group];
        match &mut g.spawn {
            SpawnConfig::Positions { cells } => cells.push(Pos::new(x, y)),
            other => *other = SpawnConfig::Positions {
                cells: vec![Pos::new(x, y)],
            },
        }
        self
    }

    pub fn obstacle(mut self, x: i32, y: i32) -> Self {
        self.config.obstacles.cells.push(Pos::new(x, y));
        self
    }

    pub fn termination(mut self, termination: Termination) -> Self {
        self.config.termination = termination;
        self
    }

    pub fn max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.config.max_ticks = max_ticks;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// The assembled configuration.
    pub fn config(self) -> WorldConfig {
        self.config
    }

    /// Build and reset the world.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn build(self) -> World {
        let mut world = World::new(self.config).expect("test world config is valid");
        world.reset().expect("test world resets");
        world
    }
}

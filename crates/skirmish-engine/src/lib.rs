//! Simulation engine orchestrating skirmish worlds.
//!
//! Provides the top-level [`World`] that runs the tick loop, coordinating
//! the agent pool, action resolution, rewards and observation building.
//! Worlds are configured with a [`WorldConfig`], which can also be loaded
//! from TOML.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action_space;
pub mod config;
pub mod hash;
mod layout;
pub mod metrics;
pub mod resolver;
pub mod world;

pub use action_space::ActionSpace;
pub use config::{
    ConfigError, GroupConfig, ObstacleConfig, ParallelConfig, RectConfig, SpawnConfig,
    Termination, WorldConfig, MAX_ATTACK_RANGE, MAX_SPEED,
};
pub use metrics::StepMetrics;
pub use resolver::{ActionResolver, GroupRules};
pub use world::{create_world, StepError, StepResult, World, WorldState};

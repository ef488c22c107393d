//! Skirmish: a large-scale multi-agent grid-world engine.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! skirmish sub-crates. For most users, adding `skirmish` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use skirmish::prelude::*;
//!
//! let config = WorldConfig {
//!     width: 32,
//!     height: 32,
//!     groups: vec![GroupConfig::named("red", 16), GroupConfig::named("blue", 16)],
//!     ..WorldConfig::default()
//! };
//! let mut world = create_world(config).unwrap();
//! let observations = world.reset().unwrap();
//! assert_eq!(observations.len(), 32);
//!
//! // Everyone steps east; conflicts and blocked moves resolve as no-ops.
//! let actions: BTreeMap<AgentId, Action> = world
//!     .agents()
//!     .iter()
//!     .map(|a| (a.id, Action::Move { direction: Direction::East, distance: 1 }))
//!     .collect();
//! let result = world.step(&actions).unwrap();
//! assert_eq!(result.tick, TickId(1));
//! assert_eq!(result.rewards.len(), 32);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `skirmish-core` | Ids, positions, actions, resolution records |
//! | [`space`] | `skirmish-space` | Grid terrain and the bucketed spatial index |
//! | [`arena`] | `skirmish-arena` | Agent pool and agent snapshots |
//! | [`obs`] | `skirmish-obs` | Observation windows and builder |
//! | [`reward`] | `skirmish-reward` | Reward rules and their composition |
//! | [`engine`] | `skirmish-engine` | Configuration, action resolution, world lifecycle |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and ids (`skirmish-core`).
pub use skirmish_core as types;

/// Grid terrain and spatial indexing (`skirmish-space`).
///
/// [`space::SpatialIndex`] answers cell occupancy and radius queries in
/// canonical row-major order.
pub use skirmish_space as space;

/// Agent storage (`skirmish-arena`).
///
/// [`arena::AgentPool`] is the single owner of agent state and keeps the
/// spatial index in step with it.
pub use skirmish_arena as arena;

/// Observation building (`skirmish-obs`).
pub use skirmish_obs as obs;

/// Reward rules (`skirmish-reward`).
///
/// Implement [`reward::RewardRule`] to add custom shaping terms.
pub use skirmish_reward as reward;

/// Worlds and the tick loop (`skirmish-engine`).
pub use skirmish_engine as engine;

/// Common imports for typical skirmish usage.
///
/// ```rust
/// use skirmish::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use skirmish_core::{Action, AgentId, Direction, GroupId, Pos, Rotation, TickId};

    // Agents and observations
    pub use skirmish_arena::AgentView;
    pub use skirmish_obs::{ObsSpec, Observation, ViewFrame, ViewShape};

    // Rewards
    pub use skirmish_reward::{GroupRewards, RewardRule};

    // Errors
    pub use skirmish_engine::{ConfigError, StepError};

    // Engine
    pub use skirmish_engine::{
        create_world, ActionSpace, GroupConfig, SpawnConfig, StepMetrics, StepResult,
        Termination, World, WorldConfig, WorldState,
    };
}

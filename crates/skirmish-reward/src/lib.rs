//! Per-agent rewards for skirmish simulations.
//!
//! Rewards are a pure function of the pre-tick snapshots, the
//! [`ResolvedTick`](skirmish_core::ResolvedTick) and the post-tick pool.
//! Individual [`RewardRule`]s are summed by a [`RewardEngine`]; the
//! built-in rules take per-group coefficients from [`GroupRewards`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod rule;
pub mod rules;

pub use config::GroupRewards;
pub use engine::{RewardEngine, RewardError};
pub use rule::{AgentTick, RewardContext, RewardRule};
pub use rules::{AttackPenalty, DamageTaken, HitReward, KillReward, StepReward, TeamKillShare};

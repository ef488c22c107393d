//! Core types for the skirmish multi-agent grid simulation engine.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! vocabulary shared across the workspace: agent/group/tick identifiers,
//! grid positions, actions, and the records produced by action resolution.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod id;
pub mod outcome;

pub use action::{Action, ActionKind, Direction, Rotation};
pub use id::{AgentId, GroupId, Path, Pos, TickId};
pub use outcome::{AgentOutcome, MoveRejection, ResolveStats, ResolvedTick, TickEvent};

//! Agent pool error types.

use skirmish_core::{AgentId, GroupId};
use skirmish_space::SpaceError;
use thiserror::Error;

/// Errors returned by direct [`AgentPool`](crate::AgentPool) mutations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PoolError {
    /// The population cap has been reached.
    #[error("agent pool full: capacity {capacity}")]
    CapacityExceeded {
        /// Maximum number of simultaneously living agents.
        capacity: usize,
    },
    /// The id does not name a living agent.
    #[error("unknown agent {id}")]
    UnknownAgent {
        /// The unrecognised id.
        id: AgentId,
    },
    /// The group was not declared when the pool was created.
    #[error("unknown group {group}: pool has {groups} groups")]
    UnknownGroup {
        /// The requested group.
        group: GroupId,
        /// Number of declared groups.
        groups: usize,
    },
    /// Spawn attributes are unusable (non-finite or non-positive hp).
    #[error("invalid agent attributes: {reason}")]
    InvalidAttributes {
        /// What was wrong.
        reason: String,
    },
    /// Agent records and the spatial index disagree.
    #[error("agent pool inconsistent: {detail}")]
    Inconsistent {
        /// Description of the first violation found.
        detail: String,
    },
    /// A cell-level failure from the spatial index.
    #[error(transparent)]
    Space(#[from] SpaceError),
}

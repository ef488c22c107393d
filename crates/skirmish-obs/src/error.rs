//! Observation builder errors.

use skirmish_core::GroupId;
use thiserror::Error;

/// Errors from constructing or running an
/// [`ObservationBuilder`](crate::ObservationBuilder).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ObsError {
    /// No per-group spec was supplied.
    #[error("observation builder needs at least one group")]
    NoGroups,
    /// A group's view range exceeds [`MAX_VIEW_RANGE`](crate::MAX_VIEW_RANGE).
    #[error("group {group} view range {range} exceeds maximum {max}")]
    ViewRangeTooLarge {
        /// The group.
        group: GroupId,
        /// The requested range.
        range: u32,
        /// The maximum.
        max: u32,
    },
    /// The pool declares a different number of groups than the builder.
    #[error("builder has {expected} groups but pool has {actual}")]
    GroupMismatch {
        /// Groups known to the builder.
        expected: usize,
        /// Groups declared by the pool.
        actual: usize,
    },
}

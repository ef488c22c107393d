//! Error types for grid and spatial index operations.

use skirmish_core::{AgentId, Pos};
use thiserror::Error;

/// Errors arising from grid construction or spatial index mutation.
///
/// These surface only from direct, low-level calls (world setup and
/// tests). Per-tick action resolution checks cells up front and never
/// lets one of these escape a step.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpaceError {
    /// A position lies outside the grid.
    #[error("position {pos} out of bounds: [0, {width}) x [0, {height})")]
    OutOfBounds {
        /// The offending position.
        pos: Pos,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// The target cell already holds an agent.
    #[error("cell {pos} is occupied by agent {occupant}")]
    OccupiedCell {
        /// The contested cell.
        pos: Pos,
        /// The agent already there.
        occupant: AgentId,
    },
    /// The target cell is a permanent obstacle.
    #[error("cell {pos} is an obstacle")]
    Obstacle {
        /// The blocked cell.
        pos: Pos,
    },
    /// The agent has no entry in the index.
    #[error("agent {id} is not indexed")]
    NotIndexed {
        /// The unknown agent.
        id: AgentId,
    },
    /// The caller's idea of an agent's cell disagrees with the index.
    #[error("agent {id} is indexed at {actual}, not {expected}")]
    PositionMismatch {
        /// The agent being moved.
        id: AgentId,
        /// Position the caller supplied.
        expected: Pos,
        /// Position recorded in the index.
        actual: Pos,
    },
    /// The same agent id was inserted twice.
    #[error("agent {id} is already indexed")]
    AlreadyIndexed {
        /// The duplicate agent.
        id: AgentId,
    },
    /// Internal bookkeeping disagrees with itself (reported by
    /// consistency checks, never by ordinary mutations).
    #[error("spatial index inconsistent: {detail}")]
    Inconsistent {
        /// Human-readable description of the first violation found.
        detail: String,
    },
    /// Attempted to construct a grid with zero cells.
    #[error("grid must have at least one cell")]
    EmptyGrid,
    /// A grid dimension exceeds the supported maximum.
    #[error("grid {name} {value} exceeds maximum {max}")]
    DimensionTooLarge {
        /// Which dimension (`"width"` or `"height"`).
        name: &'static str,
        /// The requested value.
        value: u32,
        /// The maximum allowed value.
        max: u32,
    },
}

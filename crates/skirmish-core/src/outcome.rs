//! Records produced by action resolution and consumed by reward rules.
//!
//! A [`ResolvedTick`] is the complete, ordered account of what happened in
//! one tick. It is plain data so that reward computation can run as a pure
//! function of it without reaching back into the resolver.

use crate::action::{ActionKind, Direction};
use crate::id::{AgentId, GroupId, Pos};

/// Why a move intent did not take effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveRejection {
    /// Distance was zero or exceeded the group's speed.
    InvalidDistance,
    /// The destination lies outside the grid.
    OutOfBounds,
    /// The straight path crosses a permanent obstacle.
    Blocked,
    /// A lower-id agent claimed the same destination.
    Conflict,
    /// The destination stays occupied by an agent that is not moving away.
    Occupied,
}

/// What happened to a single agent during one tick.
///
/// One record exists for every agent alive at the start of the tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AgentOutcome {
    /// Group of the agent.
    pub group: GroupId,
    /// The action the agent submitted (or `Noop`).
    pub action: ActionKind,
    /// Whether a move intent was applied.
    pub moved: bool,
    /// Whether an attack was attempted (valid offset, attacker still alive).
    pub attacked: bool,
    /// Whether that attack damaged an enemy.
    pub hit: bool,
    /// Total hp removed from enemies by this agent.
    pub damage_dealt: f32,
    /// Total hp lost by this agent to attacks.
    pub damage_taken: f32,
    /// Number of enemies this agent's attacks despawned.
    pub kills: u32,
    /// Whether the agent was despawned during this tick.
    pub died: bool,
}

/// A single resolved interaction, in the order it was applied.
#[derive(Clone, Debug, PartialEq)]
pub enum TickEvent {
    /// An agent rotated in place.
    Turned {
        /// The turning agent.
        agent: AgentId,
        /// Facing after the turn.
        facing: Direction,
    },
    /// A move intent was applied.
    Moved {
        /// The moving agent.
        agent: AgentId,
        /// Cell before the move.
        from: Pos,
        /// Cell after the move.
        to: Pos,
    },
    /// A move intent was dropped.
    MoveRejected {
        /// The agent whose move was dropped.
        agent: AgentId,
        /// Reason for rejection.
        reason: MoveRejection,
    },
    /// An attack damaged an enemy.
    Hit {
        /// The attacker.
        attacker: AgentId,
        /// The damaged agent.
        target: AgentId,
        /// Hp actually removed (never more than the target had).
        damage: f32,
    },
    /// An attack found no living enemy at the target cell.
    Missed {
        /// The attacker.
        attacker: AgentId,
        /// The attacked cell (may lie outside the grid).
        cell: Pos,
    },
    /// An agent was despawned this tick.
    Killed {
        /// The despawned agent.
        agent: AgentId,
        /// The agent whose attack caused the death, if any.
        by: Option<AgentId>,
    },
}

/// Aggregate counters for one resolved tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Actions addressed to ids that were not alive at tick start.
    pub actions_ignored: u32,
    /// Move intents applied.
    pub moves_accepted: u32,
    /// Move intents dropped for any reason.
    pub moves_rejected: u32,
    /// Turns applied.
    pub turns: u32,
    /// Attacks that damaged an enemy.
    pub attacks_hit: u32,
    /// Attacks that found no living enemy.
    pub attacks_missed: u32,
    /// Attacks dropped as malformed (bad offset) or by dead attackers.
    pub attacks_invalid: u32,
    /// Agents despawned this tick.
    pub kills: u32,
}

/// Full account of one tick's resolution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedTick {
    /// One outcome per agent alive at tick start, ascending by id.
    pub agents: Vec<(AgentId, AgentOutcome)>,
    /// Interactions in application order.
    pub events: Vec<TickEvent>,
    /// Aggregate counters.
    pub stats: ResolveStats,
}

impl ResolvedTick {
    /// Look up an agent's outcome by id (binary search over the sorted list).
    pub fn outcome(&self, id: AgentId) -> Option<&AgentOutcome> {
        self.agents
            .binary_search_by_key(&id, |(a, _)| *a)
            .ok()
            .map(|i| &self.agents[i].1)
    }

    /// Kills credited to members of `group` this tick.
    pub fn group_kills(&self, group: GroupId) -> u32 {
        self.agents
            .iter()
            .filter(|(_, o)| o.group == group)
            .map(|(_, o)| o.kills)
            .sum()
    }

    /// Ids despawned this tick, ascending.
    pub fn died(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.iter().filter(|(_, o)| o.died).map(|(id, _)| *id)
    }
}

//! The [`RewardRule`] trait and the context it scores against.

use skirmish_arena::{AgentPool, AgentView};
use skirmish_core::{AgentId, AgentOutcome, ResolvedTick, TickId};

/// Everything a rule may read when scoring one tick.
///
/// `before` holds snapshots of every agent alive at tick start in ascending
/// id order, aligned one-to-one with `resolved.agents`. `after` is the pool
/// once resolution has finished. All three are read-only.
#[derive(Debug, Clone, Copy)]
pub struct RewardContext<'a> {
    /// Pre-tick snapshots.
    pub before: &'a [AgentView],
    /// What happened during the tick.
    pub resolved: &'a ResolvedTick,
    /// Post-tick state.
    pub after: &'a AgentPool,
    /// The tick that was just resolved.
    pub tick: TickId,
    /// Kills credited to each group this tick, indexed by group.
    pub group_kills: &'a [u32],
}

/// One agent's slice of the tick, handed to [`RewardRule::score`].
#[derive(Debug, Clone, Copy)]
pub struct AgentTick<'a> {
    /// The agent's id.
    pub id: AgentId,
    /// Snapshot at tick start.
    pub before: &'a AgentView,
    /// Resolution outcome.
    pub outcome: &'a AgentOutcome,
}

/// A stateless scoring term. Rules are summed per agent.
///
/// # Contract
///
/// - `score()` MUST be a pure function of its inputs.
/// - Rules never see agents that died this tick; the engine pins those
///   rewards to zero before consulting any rule.
///
/// # Object safety
///
/// This trait is object-safe; the engine stores rules as
/// `Vec<Box<dyn RewardRule>>`.
///
/// # Examples
///
/// ```
/// use skirmish_reward::{AgentTick, RewardContext, RewardRule};
///
/// #[derive(Debug)]
/// struct Survive;
///
/// impl RewardRule for Survive {
///     fn name(&self) -> &str { "survive" }
///
///     fn score(&self, _ctx: &RewardContext<'_>, _agent: &AgentTick<'_>) -> f32 {
///         0.01
///     }
/// }
///
/// assert_eq!(Survive.name(), "survive");
/// ```
pub trait RewardRule: Send + Sync + std::fmt::Debug {
    /// Human-readable rule name for logging and introspection.
    fn name(&self) -> &str;

    /// Reward contribution for one surviving agent.
    fn score(&self, ctx: &RewardContext<'_>, agent: &AgentTick<'_>) -> f32;
}

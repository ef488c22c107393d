//! Per-tick performance metrics for the simulation engine.
//!
//! [`StepMetrics`] captures phase timings and resolution counters for a
//! single tick, for logging, profiling and benchmark reporting.

use skirmish_core::ResolveStats;

/// Timing and counter metrics collected during a single tick.
///
/// All durations are in microseconds. The world populates these fields
/// after each `step()` call and keeps the most recent set available via
/// `last_metrics()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
    /// Time spent resolving actions, in microseconds.
    pub resolve_us: u64,
    /// Time spent computing rewards, in microseconds.
    pub reward_us: u64,
    /// Time spent building observations, in microseconds.
    pub observe_us: u64,
    /// Entries in the submitted action map.
    pub actions_submitted: u32,
    /// Entries addressed to agents that were not alive.
    pub actions_ignored: u32,
    /// Moves applied.
    pub moves_accepted: u32,
    /// Moves dropped.
    pub moves_rejected: u32,
    /// Attacks that damaged an enemy.
    pub attacks_hit: u32,
    /// Attacks that found no enemy.
    pub attacks_missed: u32,
    /// Agents despawned during the tick.
    pub kills: u32,
    /// Agents alive after the tick.
    pub alive: u32,
}

impl StepMetrics {
    /// Copy the counters out of a resolution's stats.
    pub(crate) fn record_stats(&mut self, stats: &ResolveStats) {
        self.actions_ignored = stats.actions_ignored;
        self.moves_accepted = stats.moves_accepted;
        self.moves_rejected = stats.moves_rejected;
        self.attacks_hit = stats.attacks_hit;
        self.attacks_missed = stats.attacks_missed;
        self.kills = stats.kills;
    }
}

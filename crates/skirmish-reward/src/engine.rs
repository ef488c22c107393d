//! Additive composition of reward rules.

use rayon::prelude::*;
use skirmish_arena::{AgentPool, AgentView};
use skirmish_core::{AgentId, GroupId, ResolvedTick, TickId};
use thiserror::Error;

use crate::config::GroupRewards;
use crate::rule::{AgentTick, RewardContext, RewardRule};
use crate::rules::{AttackPenalty, DamageTaken, HitReward, KillReward, StepReward, TeamKillShare};

/// Invalid reward configuration.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RewardError {
    /// A coefficient is NaN or infinite.
    #[error("group {group} reward '{field}' is not finite: {value}")]
    NonFinite {
        /// The group.
        group: GroupId,
        /// The coefficient name.
        field: &'static str,
        /// The offending value.
        value: f32,
    },
}

/// Sums a list of [`RewardRule`]s for every agent alive at tick start.
///
/// Agents that died during the tick score exactly 0 regardless of rules.
/// Scoring never mutates state; with parallel mode on, agents are sharded
/// across rayon workers and the output order is unchanged.
#[derive(Debug)]
pub struct RewardEngine {
    rules: Vec<Box<dyn RewardRule>>,
    group_count: usize,
    parallel: bool,
    parallel_threshold: usize,
}

impl RewardEngine {
    /// An engine with no rules for `group_count` groups. Every survivor
    /// scores 0 until rules are added.
    pub fn new(group_count: usize) -> Self {
        Self {
            rules: Vec::new(),
            group_count,
            parallel: false,
            parallel_threshold: usize::MAX,
        }
    }

    /// Build the six built-in rules from per-group coefficients, indexed by
    /// group. Rules whose coefficients are zero for every group are left
    /// out.
    pub fn from_config(groups: &[GroupRewards]) -> Result<Self, RewardError> {
        for (i, g) in groups.iter().enumerate() {
            for (field, value) in g.fields() {
                if !value.is_finite() {
                    return Err(RewardError::NonFinite {
                        group: GroupId(i as u32),
                        field,
                        value,
                    });
                }
            }
        }

        let column = |f: fn(&GroupRewards) -> f32| -> Option<Vec<f32>> {
            let v: Vec<f32> = groups.iter().map(f).collect();
            v.iter().any(|&c| c != 0.0).then_some(v)
        };

        let mut engine = Self::new(groups.len());
        if let Some(v) = column(|g| g.step) {
            engine.add_rule(Box::new(StepReward::new(v)));
        }
        if let Some(v) = column(|g| g.damage_taken) {
            engine.add_rule(Box::new(DamageTaken::new(v)));
        }
        if let Some(v) = column(|g| g.kill) {
            engine.add_rule(Box::new(KillReward::new(v)));
        }
        if let Some(v) = column(|g| g.attack_penalty) {
            engine.add_rule(Box::new(AttackPenalty::new(v)));
        }
        if let Some(v) = column(|g| g.hit) {
            engine.add_rule(Box::new(HitReward::new(v)));
        }
        if let Some(v) = column(|g| g.team_kill) {
            engine.add_rule(Box::new(TeamKillShare::new(v)));
        }
        Ok(engine)
    }

    /// Append a rule. Contributions are summed in insertion order.
    pub fn add_rule(&mut self, rule: Box<dyn RewardRule>) {
        self.rules.push(rule);
    }

    /// Enable rayon sharding for populations above `threshold`.
    pub fn with_parallel(mut self, enabled: bool, threshold: usize) -> Self {
        self.parallel = enabled;
        self.parallel_threshold = threshold;
        self
    }

    /// Names of the active rules, in summation order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Score one resolved tick.
    ///
    /// `before` must list the agents alive at tick start in ascending id
    /// order, matching `resolved.agents`. Returns one `(id, reward)` pair
    /// per entry of `resolved.agents`, in the same order.
    pub fn compute(
        &self,
        before: &[AgentView],
        resolved: &ResolvedTick,
        after: &AgentPool,
        tick: TickId,
    ) -> Vec<(AgentId, f32)> {
        let mut group_kills = vec![0u32; self.group_count];
        for (_, o) in &resolved.agents {
            if let Some(k) = group_kills.get_mut(o.group.index()) {
                *k += o.kills;
            }
        }
        let ctx = RewardContext {
            before,
            resolved,
            after,
            tick,
            group_kills: &group_kills,
        };

        let score_one = |i: usize| -> (AgentId, f32) {
            let (id, outcome) = &resolved.agents[i];
            if outcome.died {
                return (*id, 0.0);
            }
            let view = match before.get(i) {
                Some(v) if v.id == *id => v,
                _ => match before.binary_search_by_key(id, |v| v.id) {
                    Ok(j) => &before[j],
                    Err(_) => return (*id, 0.0),
                },
            };
            let agent = AgentTick {
                id: *id,
                before: view,
                outcome,
            };
            let total = self.rules.iter().map(|r| r.score(&ctx, &agent)).sum::<f32>();
            (*id, total)
        };

        let n = resolved.agents.len();
        if self.parallel && n > self.parallel_threshold {
            (0..n).into_par_iter().map(score_one).collect()
        } else {
            (0..n).map(score_one).collect()
        }
    }
}

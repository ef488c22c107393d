//! Built-in reward rules.
//!
//! Each rule carries one coefficient per group, indexed by
//! [`GroupId::index`](skirmish_core::GroupId::index). Groups beyond the
//! table score zero.

use crate::rule::{AgentTick, RewardContext, RewardRule};

fn coeff(per_group: &[f32], agent: &AgentTick<'_>) -> f32 {
    per_group
        .get(agent.before.group.index())
        .copied()
        .unwrap_or(0.0)
}

/// Constant reward every tick an agent survives.
#[derive(Debug, Clone)]
pub struct StepReward {
    per_group: Vec<f32>,
}

impl StepReward {
    /// Create from per-group coefficients.
    pub fn new(per_group: Vec<f32>) -> Self {
        Self { per_group }
    }
}

impl RewardRule for StepReward {
    fn name(&self) -> &str {
        "step"
    }

    fn score(&self, _ctx: &RewardContext<'_>, agent: &AgentTick<'_>) -> f32 {
        coeff(&self.per_group, agent)
    }
}

/// Scales hp lost to attacks.
#[derive(Debug, Clone)]
pub struct DamageTaken {
    per_group: Vec<f32>,
}

impl DamageTaken {
    /// Create from per-group coefficients.
    pub fn new(per_group: Vec<f32>) -> Self {
        Self { per_group }
    }
}

impl RewardRule for DamageTaken {
    fn name(&self) -> &str {
        "damage_taken"
    }

    fn score(&self, _ctx: &RewardContext<'_>, agent: &AgentTick<'_>) -> f32 {
        coeff(&self.per_group, agent) * agent.outcome.damage_taken
    }
}

/// Scales the number of enemies the agent killed.
#[derive(Debug, Clone)]
pub struct KillReward {
    per_group: Vec<f32>,
}

impl KillReward {
    /// Create from per-group coefficients.
    pub fn new(per_group: Vec<f32>) -> Self {
        Self { per_group }
    }
}

impl RewardRule for KillReward {
    fn name(&self) -> &str {
        "kill"
    }

    fn score(&self, _ctx: &RewardContext<'_>, agent: &AgentTick<'_>) -> f32 {
        coeff(&self.per_group, agent) * agent.outcome.kills as f32
    }
}

/// Charged once per attempted attack, hit or miss.
#[derive(Debug, Clone)]
pub struct AttackPenalty {
    per_group: Vec<f32>,
}

impl AttackPenalty {
    /// Create from per-group coefficients.
    pub fn new(per_group: Vec<f32>) -> Self {
        Self { per_group }
    }
}

impl RewardRule for AttackPenalty {
    fn name(&self) -> &str {
        "attack_penalty"
    }

    fn score(&self, _ctx: &RewardContext<'_>, agent: &AgentTick<'_>) -> f32 {
        if agent.outcome.attacked {
            coeff(&self.per_group, agent)
        } else {
            0.0
        }
    }
}

/// Scales hp dealt to enemies.
#[derive(Debug, Clone)]
pub struct HitReward {
    per_group: Vec<f32>,
}

impl HitReward {
    /// Create from per-group coefficients.
    pub fn new(per_group: Vec<f32>) -> Self {
        Self { per_group }
    }
}

impl RewardRule for HitReward {
    fn name(&self) -> &str {
        "hit"
    }

    fn score(&self, _ctx: &RewardContext<'_>, agent: &AgentTick<'_>) -> f32 {
        coeff(&self.per_group, agent) * agent.outcome.damage_dealt
    }
}

/// Rewards every survivor for each kill made by its group this tick.
///
/// Reads the per-group totals precomputed in
/// [`RewardContext::group_kills`].
#[derive(Debug, Clone)]
pub struct TeamKillShare {
    per_group: Vec<f32>,
}

impl TeamKillShare {
    /// Create from per-group coefficients.
    pub fn new(per_group: Vec<f32>) -> Self {
        Self { per_group }
    }
}

impl RewardRule for TeamKillShare {
    fn name(&self) -> &str {
        "team_kill"
    }

    fn score(&self, ctx: &RewardContext<'_>, agent: &AgentTick<'_>) -> f32 {
        let kills = ctx
            .group_kills
            .get(agent.before.group.index())
            .copied()
            .unwrap_or(0);
        coeff(&self.per_group, agent) * kills as f32
    }
}

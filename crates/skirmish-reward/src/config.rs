//! Per-group reward coefficients.

use serde::{Deserialize, Serialize};

/// Reward coefficients for one group.
///
/// Every term is `coefficient × quantity`, so penalties are expressed with
/// negative coefficients.
///
/// | Field            | Quantity                                   |
/// |------------------|--------------------------------------------|
/// | `step`           | 1 per tick survived                        |
/// | `damage_taken`   | hp lost to attacks                         |
/// | `kill`           | enemies this agent killed                  |
/// | `attack_penalty` | 1 per attack attempted                     |
/// | `hit`            | hp dealt to enemies                        |
/// | `team_kill`      | enemies killed by the agent's whole group  |
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupRewards {
    /// Per-tick time pressure, typically negative.
    pub step: f32,
    /// Scale on hp lost.
    pub damage_taken: f32,
    /// Scale on own kills.
    pub kill: f32,
    /// Per attack attempted, typically negative.
    pub attack_penalty: f32,
    /// Scale on hp dealt.
    pub hit: f32,
    /// Scale on group kills this tick.
    pub team_kill: f32,
}

impl Default for GroupRewards {
    fn default() -> Self {
        Self {
            step: -0.005,
            damage_taken: -0.1,
            kill: 5.0,
            attack_penalty: -0.1,
            hit: 0.2,
            team_kill: 0.0,
        }
    }
}

impl GroupRewards {
    /// All coefficients zero.
    pub fn zero() -> Self {
        Self {
            step: 0.0,
            damage_taken: 0.0,
            kill: 0.0,
            attack_penalty: 0.0,
            hit: 0.0,
            team_kill: 0.0,
        }
    }

    /// `(name, value)` pairs for every coefficient.
    pub fn fields(&self) -> [(&'static str, f32); 6] {
        [
            ("step", self.step),
            ("damage_taken", self.damage_taken),
            ("kill", self.kill),
            ("attack_penalty", self.attack_penalty),
            ("hit", self.hit),
            ("team_kill", self.team_kill),
        ]
    }
}

//! Agent records and the read-only views handed out by the pool.

use skirmish_core::{AgentId, Direction, GroupId, Pos};

/// Attributes supplied when spawning an agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnAttrs {
    /// Starting hit points. Must be finite and in `(0, hp_max]`.
    pub hp: f32,
    /// Maximum hit points. Must be finite and positive.
    pub hp_max: f32,
    /// Initial facing.
    pub orientation: Direction,
}

impl SpawnAttrs {
    /// Attributes for an agent at full health facing north.
    pub fn full(hp_max: f32) -> Self {
        Self {
            hp: hp_max,
            hp_max,
            orientation: Direction::North,
        }
    }

    /// Same attributes with a different facing.
    pub fn facing(mut self, orientation: Direction) -> Self {
        self.orientation = orientation;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if !self.hp_max.is_finite() || self.hp_max <= 0.0 {
            return Err(format!("hp_max must be finite and > 0, got {}", self.hp_max));
        }
        if !self.hp.is_finite() || self.hp <= 0.0 || self.hp > self.hp_max {
            return Err(format!(
                "hp must be finite and in (0, {}], got {}",
                self.hp_max, self.hp
            ));
        }
        Ok(())
    }
}

/// Mutable record stored inside the pool.
#[derive(Clone, Debug)]
pub(crate) struct Agent {
    pub(crate) group: GroupId,
    pub(crate) pos: Pos,
    pub(crate) orientation: Direction,
    pub(crate) hp: f32,
    pub(crate) hp_max: f32,
}

impl Agent {
    pub(crate) fn view(&self, id: AgentId) -> AgentView {
        AgentView {
            id,
            group: self.group,
            pos: self.pos,
            orientation: self.orientation,
            hp: self.hp,
            hp_max: self.hp_max,
        }
    }
}

/// A copy of one living agent's state.
///
/// Views are detached snapshots: holding one does not borrow the pool, and
/// it does not change when the agent is later mutated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentView {
    /// Stable id.
    pub id: AgentId,
    /// Team.
    pub group: GroupId,
    /// Current cell.
    pub pos: Pos,
    /// Current facing.
    pub orientation: Direction,
    /// Current hit points, in `(0, hp_max]` while alive.
    pub hp: f32,
    /// Maximum hit points.
    pub hp_max: f32,
}

impl AgentView {
    /// `hp / hp_max`.
    pub fn hp_fraction(&self) -> f32 {
        self.hp / self.hp_max
    }
}

/// Result of [`AgentPool::apply_damage`](crate::AgentPool::apply_damage).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageOutcome {
    /// Hp actually removed (never more than the agent had).
    pub dealt: f32,
    /// Hp left afterwards (0 if killed).
    pub remaining: f32,
    /// Whether the agent was despawned by this damage.
    pub killed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_attrs_validate() {
        assert!(SpawnAttrs::full(10.0).validate().is_ok());
    }

    #[test]
    fn bad_attrs_rejected() {
        assert!(SpawnAttrs::full(0.0).validate().is_err());
        assert!(SpawnAttrs::full(f32::NAN).validate().is_err());
        assert!(SpawnAttrs::full(f32::INFINITY).validate().is_err());
        let over = SpawnAttrs {
            hp: 11.0,
            ..SpawnAttrs::full(10.0)
        };
        assert!(over.validate().is_err());
        let dead = SpawnAttrs {
            hp: 0.0,
            ..SpawnAttrs::full(10.0)
        };
        assert!(dead.validate().is_err());
    }

    #[test]
    fn hp_fraction() {
        let v = AgentView {
            id: AgentId(0),
            group: GroupId(0),
            pos: Pos::new(0, 0),
            orientation: Direction::North,
            hp: 2.5,
            hp_max: 10.0,
        };
        assert_eq!(v.hp_fraction(), 0.25);
    }
}

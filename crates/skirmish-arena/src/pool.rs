//! The agent pool: canonical agent records plus the spatial index.

use std::collections::BTreeMap;

use skirmish_core::{AgentId, Direction, GroupId, Pos};
use skirmish_space::{Grid, SpatialIndex};

use crate::agent::{Agent, AgentView, DamageOutcome, SpawnAttrs};
use crate::error::PoolError;

/// Single source of truth for agent state.
///
/// The pool owns every agent record and the [`SpatialIndex`] that maps
/// cells to agents. Every operation that touches both (spawn, despawn,
/// relocation, lethal damage) updates them together, so callers can never
/// observe an agent whose record and cell disagree.
///
/// Records are kept in a `BTreeMap` keyed by [`AgentId`]; iteration is in
/// ascending id order, which is the canonical order for all per-tick
/// processing.
///
/// Ids come from a monotonic counter and are never reissued until
/// [`clear`](Self::clear) starts a new run.
///
/// # Examples
///
/// ```
/// use skirmish_arena::{AgentPool, SpawnAttrs};
/// use skirmish_core::{GroupId, Pos};
/// use skirmish_space::{Grid, SpatialIndex};
///
/// let index = SpatialIndex::new(Grid::new(8, 8).unwrap());
/// let mut pool = AgentPool::new(index, 16, 2);
///
/// let a = pool.spawn(GroupId(0), Pos::new(1, 1), SpawnAttrs::full(10.0)).unwrap();
/// let b = pool.spawn(GroupId(1), Pos::new(2, 1), SpawnAttrs::full(10.0)).unwrap();
/// assert_eq!(pool.alive_ids(), vec![a, b]);
///
/// let hit = pool.apply_damage(b, 10.0).unwrap();
/// assert!(hit.killed);
/// assert!(pool.get(b).is_none());
/// assert!(pool.is_retired(b));
/// ```
#[derive(Debug, Clone)]
pub struct AgentPool {
    index: SpatialIndex,
    agents: BTreeMap<AgentId, Agent>,
    group_counts: Vec<usize>,
    next_id: u64,
    capacity: usize,
}

impl AgentPool {
    /// Create an empty pool over `index` holding at most `capacity` living
    /// agents split across `groups` teams.
    ///
    /// Any agents already in `index` are discarded.
    pub fn new(mut index: SpatialIndex, capacity: usize, groups: usize) -> Self {
        index.clear();
        Self {
            index,
            agents: BTreeMap::new(),
            group_counts: vec![0; groups],
            next_id: 0,
            capacity,
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// Create an agent at `pos`.
    ///
    /// On failure nothing changes and no id is consumed.
    pub fn spawn(
        &mut self,
        group: GroupId,
        pos: Pos,
        attrs: SpawnAttrs,
    ) -> Result<AgentId, PoolError> {
        if group.index() >= self.group_counts.len() {
            return Err(PoolError::UnknownGroup {
                group,
                groups: self.group_counts.len(),
            });
        }
        attrs
            .validate()
            .map_err(|reason| PoolError::InvalidAttributes { reason })?;
        if self.agents.len() >= self.capacity {
            return Err(PoolError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let id = AgentId(self.next_id);
        self.index.insert(id, pos)?;
        self.next_id += 1;
        self.agents.insert(
            id,
            Agent {
                group,
                pos,
                orientation: attrs.orientation,
                hp: attrs.hp,
                hp_max: attrs.hp_max,
            },
        );
        self.group_counts[group.index()] += 1;
        Ok(id)
    }

    /// Remove a living agent and free its cell.
    ///
    /// Returns `false` (and does nothing) for unknown or already-dead ids.
    pub fn despawn(&mut self, id: AgentId) -> bool {
        let Some(agent) = self.agents.remove(&id) else {
            return false;
        };
        if let Err(e) = self.index.remove(id) {
            tracing::error!(agent = %id, error = %e, "despawned agent missing from spatial index");
        }
        self.group_counts[agent.group.index()] -= 1;
        tracing::trace!(agent = %id, group = %agent.group, pos = %agent.pos, "despawn");
        true
    }

    /// Remove every agent and restart id allocation at 0. Terrain is kept.
    pub fn clear(&mut self) {
        self.agents.clear();
        self.index.clear();
        self.group_counts.fill(0);
        self.next_id = 0;
    }

    /// Mark `pos` as a permanent obstacle. Fails if an agent stands there.
    pub fn set_obstacle(&mut self, pos: Pos) -> Result<(), PoolError> {
        self.index.set_obstacle(pos)?;
        Ok(())
    }

    /// Remove all obstacles.
    pub fn clear_obstacles(&mut self) {
        self.index.clear_obstacles();
    }

    // ── Reads ───────────────────────────────────────────────────

    /// Snapshot of a living agent.
    pub fn get(&self, id: AgentId) -> Option<AgentView> {
        self.agents.get(&id).map(|a| a.view(id))
    }

    /// Whether `id` names a living agent.
    pub fn is_alive(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    /// Whether `id` was issued in this run and has since been despawned.
    pub fn is_retired(&self, id: AgentId) -> bool {
        id.0 < self.next_id && !self.agents.contains_key(&id)
    }

    /// Living ids in ascending order.
    pub fn alive_ids(&self) -> Vec<AgentId> {
        self.agents.keys().copied().collect()
    }

    /// Snapshots of every living agent in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = AgentView> + '_ {
        self.agents.iter().map(|(&id, a)| a.view(id))
    }

    /// [`iter`](Self::iter) collected into a vector.
    pub fn views(&self) -> Vec<AgentView> {
        self.iter().collect()
    }

    /// Number of living agents.
    pub fn alive_count(&self) -> usize {
        self.agents.len()
    }

    /// Number of living agents in `group` (0 for undeclared groups).
    pub fn alive_in_group(&self, group: GroupId) -> usize {
        self.group_counts.get(group.index()).copied().unwrap_or(0)
    }

    /// Living agents per group, indexed by [`GroupId::index`].
    pub fn group_counts(&self) -> &[usize] {
        &self.group_counts
    }

    /// Number of declared groups.
    pub fn group_count(&self) -> usize {
        self.group_counts.len()
    }

    /// The id the next successful spawn will receive.
    pub fn next_id(&self) -> AgentId {
        AgentId(self.next_id)
    }

    /// Maximum number of simultaneously living agents.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Read access to the spatial index.
    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    /// The terrain.
    pub fn grid(&self) -> &Grid {
        self.index.grid()
    }

    // ── Mutation ────────────────────────────────────────────────

    /// Remove up to `amount` hp from a living agent.
    ///
    /// Hp is clamped at 0; an agent reaching 0 is despawned before this
    /// returns. Negative or NaN amounts deal no damage. Returns `None` for
    /// ids that are not alive.
    pub fn apply_damage(&mut self, id: AgentId, amount: f32) -> Option<DamageOutcome> {
        let agent = self.agents.get_mut(&id)?;
        let dealt = amount.max(0.0).min(agent.hp);
        agent.hp -= dealt;
        let remaining = agent.hp;
        let killed = remaining <= 0.0;
        if killed {
            self.despawn(id);
        }
        Some(DamageOutcome {
            dealt,
            remaining: remaining.max(0.0),
            killed,
        })
    }

    /// Restore up to `amount` hp, clamped at `hp_max`. Returns the new hp.
    pub fn heal(&mut self, id: AgentId, amount: f32) -> Option<f32> {
        let agent = self.agents.get_mut(&id)?;
        agent.hp = (agent.hp + amount.max(0.0)).min(agent.hp_max);
        Some(agent.hp)
    }

    /// Change a living agent's facing.
    pub fn set_orientation(&mut self, id: AgentId, orientation: Direction) -> Result<(), PoolError> {
        let agent = self
            .agents
            .get_mut(&id)
            .ok_or(PoolError::UnknownAgent { id })?;
        agent.orientation = orientation;
        Ok(())
    }

    /// Move a single agent to `to`.
    pub fn relocate(&mut self, id: AgentId, to: Pos) -> Result<(), PoolError> {
        let agent = self
            .agents
            .get_mut(&id)
            .ok_or(PoolError::UnknownAgent { id })?;
        self.index.move_agent(id, agent.pos, to)?;
        agent.pos = to;
        Ok(())
    }

    /// Move several agents at once.
    ///
    /// All movers vacate before any target is occupied, so swaps, chains
    /// and rotations among the movers succeed. The batch is validated in
    /// full first; on error nothing has changed.
    pub fn relocate_batch(&mut self, moves: &[(AgentId, Pos)]) -> Result<(), PoolError> {
        if let Some(&(id, _)) = moves.iter().find(|(id, _)| !self.agents.contains_key(id)) {
            return Err(PoolError::UnknownAgent { id });
        }
        self.index.move_batch(moves)?;
        for &(id, to) in moves {
            if let Some(agent) = self.agents.get_mut(&id) {
                agent.pos = to;
            }
        }
        Ok(())
    }

    // ── Invariants ──────────────────────────────────────────────

    /// Verify that every record matches the index and that group counts,
    /// hp bounds and the index's own bookkeeping are sound.
    pub fn check_consistency(&self) -> Result<(), PoolError> {
        self.index.check_consistency()?;
        let inconsistent = |detail: String| Err(PoolError::Inconsistent { detail });

        if self.index.len() != self.agents.len() {
            return inconsistent(format!(
                "{} records but {} indexed agents",
                self.agents.len(),
                self.index.len()
            ));
        }
        let mut counts = vec![0usize; self.group_counts.len()];
        for (&id, agent) in &self.agents {
            match self.index.position_of(id) {
                Some(p) if p == agent.pos => {}
                other => {
                    return inconsistent(format!(
                        "agent {id} recorded at {} but indexed at {other:?}",
                        agent.pos
                    ))
                }
            }
            if !(agent.hp > 0.0 && agent.hp <= agent.hp_max) {
                return inconsistent(format!(
                    "agent {id} alive with hp {} outside (0, {}]",
                    agent.hp, agent.hp_max
                ));
            }
            if id.0 >= self.next_id {
                return inconsistent(format!("agent {id} not below next id {}", self.next_id));
            }
            counts[agent.group.index()] += 1;
        }
        if counts != self.group_counts {
            return inconsistent(format!(
                "group counts {:?} but records give {counts:?}",
                self.group_counts
            ));
        }
        Ok(())
    }
}

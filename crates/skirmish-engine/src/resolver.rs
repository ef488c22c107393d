//! Deterministic action resolution.
//!
//! [`ActionResolver::resolve`] turns one tick's action map into mutations
//! of the [`AgentPool`] and a [`ResolvedTick`] describing them. Every
//! ordering decision is made by ascending [`AgentId`]:
//!
//! 1. Turns apply immediately.
//! 2. Move intents are validated (distance, bounds, obstacles on the path).
//! 3. Intents sharing a destination are reduced to the lowest id.
//! 4. Remaining winners are accepted if their destination is empty or is
//!    being vacated by another accepted winner (chains and cycles). A
//!    winner behind an agent that stays put fails, along with everything
//!    chained behind it.
//! 5. Accepted moves are applied as one batch: vacate, then occupy.
//! 6. Attacks resolve one at a time; kills free the cell immediately.
//! 7. Survivors recover (or lose) `step_recover` hp.

use std::collections::{BTreeMap, BTreeSet};

use skirmish_arena::{AgentPool, AgentView};
use skirmish_core::{
    Action, AgentId, AgentOutcome, Direction, MoveRejection, Pos, ResolveStats, ResolvedTick,
    TickEvent,
};

use crate::config::GroupConfig;

/// Per-group rules the resolver enforces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupRules {
    /// Maximum cells per move.
    pub speed: u32,
    /// Chebyshev attack reach.
    pub attack_range: u32,
    /// Hp removed per hit.
    pub damage: f32,
    /// Hp change applied to survivors after attacks.
    pub step_recover: f32,
}

impl From<&GroupConfig> for GroupRules {
    fn from(g: &GroupConfig) -> Self {
        Self {
            speed: g.speed,
            attack_range: g.attack_range,
            damage: g.damage,
            step_recover: g.step_recover,
        }
    }
}

/// Applies one tick of actions to a pool.
///
/// The resolver is stateless between ticks; all state lives in the pool.
#[derive(Clone, Debug)]
pub struct ActionResolver {
    rules: Vec<GroupRules>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Chain {
    Unvisited,
    InProgress,
    Feasible,
    Infeasible,
}

struct MoveIntent {
    slot: usize,
    id: AgentId,
    from: Pos,
    to: Pos,
    direction: Direction,
}

impl ActionResolver {
    /// A resolver with rules indexed by group.
    pub fn new(rules: Vec<GroupRules>) -> Self {
        Self { rules }
    }

    /// Rules for every group, indexed by group.
    pub fn rules(&self) -> &[GroupRules] {
        &self.rules
    }

    fn rules_for(&self, view: &AgentView) -> Option<&GroupRules> {
        self.rules.get(view.group.index())
    }

    /// Resolve `actions` against `pool`.
    ///
    /// Entries for ids that are not alive are counted in
    /// [`ResolveStats::actions_ignored`] and otherwise skipped. Living agents
    /// without an entry act as `Noop`. Malformed actions never fail; they
    /// resolve as no-ops.
    pub fn resolve(&self, pool: &mut AgentPool, actions: &BTreeMap<AgentId, Action>) -> ResolvedTick {
        let alive = pool.views();
        let slot_of = |id: AgentId| alive.binary_search_by_key(&id, |v| v.id).ok();

        let mut stats = ResolveStats::default();
        let mut events = Vec::new();
        let mut outcomes: Vec<(AgentId, AgentOutcome)> = alive
            .iter()
            .map(|v| {
                let action = actions.get(&v.id).copied().unwrap_or_default();
                (
                    v.id,
                    AgentOutcome {
                        group: v.group,
                        action: action.kind(),
                        ..AgentOutcome::default()
                    },
                )
            })
            .collect();

        for id in actions.keys().filter(|id| slot_of(**id).is_none()) {
            tracing::trace!(agent = %id, "action for unknown or dead agent ignored");
            stats.actions_ignored += 1;
        }

        // ── Turns ──────────────────────────────────────────────

        for view in &alive {
            if let Some(Action::Turn(rotation)) = actions.get(&view.id) {
                let facing = view.orientation.turned(*rotation);
                if let Err(e) = pool.set_orientation(view.id, facing) {
                    tracing::error!(agent = %view.id, error = %e, "turn failed");
                    continue;
                }
                stats.turns += 1;
                events.push(TickEvent::Turned {
                    agent: view.id,
                    facing,
                });
            }
        }

        // ── Moves ──────────────────────────────────────────────

        let mut rejected: Vec<(usize, MoveRejection)> = Vec::new();
        let mut candidates: Vec<MoveIntent> = Vec::new();
        for (slot, view) in alive.iter().enumerate() {
            let Some(&Action::Move {
                direction,
                distance,
            }) = actions.get(&view.id)
            else {
                continue;
            };
            let speed = self.rules_for(view).map_or(0, |r| r.speed);
            if distance == 0 || distance > speed {
                rejected.push((slot, MoveRejection::InvalidDistance));
                continue;
            }
            let to = view.pos.travel(direction, distance);
            if !pool.grid().contains(to) {
                rejected.push((slot, MoveRejection::OutOfBounds));
                continue;
            }
            let path = view.pos.path(direction, distance);
            if !pool.grid().path_is_open(&path) {
                rejected.push((slot, MoveRejection::Blocked));
                continue;
            }
            candidates.push(MoveIntent {
                slot,
                id: view.id,
                from: view.pos,
                to,
                direction,
            });
        }

        // Lowest id claims each destination.
        let mut claimed: BTreeSet<Pos> = BTreeSet::new();
        let mut winners: Vec<MoveIntent> = Vec::with_capacity(candidates.len());
        for intent in candidates {
            if claimed.insert(intent.to) {
                winners.push(intent);
            } else {
                rejected.push((intent.slot, MoveRejection::Conflict));
            }
        }

        // Winner index by the cell it currently stands on.
        let by_source: BTreeMap<Pos, usize> = winners
            .iter()
            .enumerate()
            .map(|(w, m)| (m.from, w))
            .collect();
        let mut state = vec![Chain::Unvisited; winners.len()];
        for start in 0..winners.len() {
            if state[start] != Chain::Unvisited {
                continue;
            }
            let mut walked = Vec::new();
            let mut cur = start;
            let feasible = loop {
                match state[cur] {
                    Chain::Feasible => break true,
                    Chain::Infeasible => break false,
                    // Back at a node of this walk: a closed rotation.
                    Chain::InProgress => break true,
                    Chain::Unvisited => {
                        state[cur] = Chain::InProgress;
                        walked.push(cur);
                        let target = winners[cur].to;
                        if pool.index().occupant_at(target).is_none() {
                            break true;
                        }
                        match by_source.get(&target) {
                            Some(&next) => cur = next,
                            None => break false,
                        }
                    }
                }
            };
            let verdict = if feasible {
                Chain::Feasible
            } else {
                Chain::Infeasible
            };
            for w in walked {
                state[w] = verdict;
            }
        }

        let mut accepted: Vec<&MoveIntent> = Vec::new();
        for (w, intent) in winners.iter().enumerate() {
            if state[w] == Chain::Feasible {
                accepted.push(intent);
            } else {
                rejected.push((intent.slot, MoveRejection::Occupied));
            }
        }

        let batch: Vec<(AgentId, Pos)> = accepted.iter().map(|m| (m.id, m.to)).collect();
        match pool.relocate_batch(&batch) {
            Ok(()) => {
                for m in &accepted {
                    if let Err(e) = pool.set_orientation(m.id, m.direction) {
                        tracing::error!(agent = %m.id, error = %e, "facing update failed");
                    }
                    outcomes[m.slot].1.moved = true;
                    events.push(TickEvent::Moved {
                        agent: m.id,
                        from: m.from,
                        to: m.to,
                    });
                }
                stats.moves_accepted = accepted.len() as u32;
            }
            Err(e) => {
                tracing::error!(moves = batch.len(), error = %e, "move batch rejected, dropping this tick's moves");
            }
        }

        rejected.sort_by_key(|(slot, _)| *slot);
        stats.moves_rejected = rejected.len() as u32;
        for (slot, reason) in rejected {
            tracing::trace!(agent = %alive[slot].id, ?reason, "move rejected");
            events.push(TickEvent::MoveRejected {
                agent: alive[slot].id,
                reason,
            });
        }

        // ── Attacks ────────────────────────────────────────────

        for (slot, view) in alive.iter().enumerate() {
            let Some(&Action::Attack { dx, dy }) = actions.get(&view.id) else {
                continue;
            };
            let Some(attacker) = pool.get(view.id) else {
                tracing::trace!(agent = %view.id, "attacker died earlier this tick");
                stats.attacks_invalid += 1;
                continue;
            };
            let Some(rules) = self.rules_for(view) else {
                stats.attacks_invalid += 1;
                continue;
            };
            let reach = dx.unsigned_abs().max(dy.unsigned_abs());
            if reach == 0 || reach > rules.attack_range {
                tracing::trace!(agent = %view.id, dx, dy, "malformed attack offset");
                stats.attacks_invalid += 1;
                continue;
            }

            outcomes[slot].1.attacked = true;
            let cell = attacker.pos.offset(dx, dy);
            let target = pool
                .index()
                .occupant_at(cell)
                .and_then(|t| pool.get(t))
                .filter(|t| t.group != attacker.group);
            let Some(target) = target else {
                stats.attacks_missed += 1;
                events.push(TickEvent::Missed {
                    attacker: view.id,
                    cell,
                });
                continue;
            };
            let Some(dmg) = pool.apply_damage(target.id, rules.damage) else {
                stats.attacks_missed += 1;
                continue;
            };

            stats.attacks_hit += 1;
            outcomes[slot].1.hit = true;
            outcomes[slot].1.damage_dealt += dmg.dealt;
            let target_slot = slot_of(target.id);
            if let Some(t) = target_slot {
                outcomes[t].1.damage_taken += dmg.dealt;
            }
            events.push(TickEvent::Hit {
                attacker: view.id,
                target: target.id,
                damage: dmg.dealt,
            });
            if dmg.killed {
                stats.kills += 1;
                outcomes[slot].1.kills += 1;
                if let Some(t) = target_slot {
                    outcomes[t].1.died = true;
                }
                events.push(TickEvent::Killed {
                    agent: target.id,
                    by: Some(view.id),
                });
            }
        }

        // ── Recovery ───────────────────────────────────────────

        for (slot, view) in alive.iter().enumerate() {
            let recover = self.rules_for(view).map_or(0.0, |r| r.step_recover);
            if recover == 0.0 || !pool.is_alive(view.id) {
                continue;
            }
            if recover > 0.0 {
                pool.heal(view.id, recover);
            } else if let Some(d) = pool.apply_damage(view.id, -recover) {
                if d.killed {
                    stats.kills += 1;
                    outcomes[slot].1.died = true;
                    events.push(TickEvent::Killed {
                        agent: view.id,
                        by: None,
                    });
                }
            }
        }

        ResolvedTick {
            agents: outcomes,
            events,
            stats,
        }
    }
}

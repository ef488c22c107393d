//! The simulation world and its episode lifecycle.
//!
//! [`World`] owns the agent pool and the three per-tick stages. Each call
//! to [`step()`](World::step) resolves actions, scores the tick, checks
//! for the end of the episode and builds observations, in that order.
//!
//! # Lifecycle
//!
//! ```text
//!   Created ──reset()──▶ Running ──step()──▶ Running
//!                           │
//!                           ├──(termination rule)──▶ Terminated
//!                           └──(tick ≥ max_ticks)──▶ Truncated
//! ```
//!
//! `reset()` is allowed from every state. `step()` is only allowed while
//! `Running`.
//!
//! # Ownership model
//!
//! `World` is [`Send`] but every mutating method takes `&mut self`. The
//! parallel stages borrow the pool immutably and join before `step()`
//! returns, so no state is shared across ticks.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

use skirmish_arena::{AgentPool, AgentView, PoolError, SpawnAttrs};
use skirmish_core::{Action, AgentId, Direction, GroupId, Pos, ResolvedTick, TickId};
use skirmish_obs::{ObsError, Observation, ObservationBuilder};
use skirmish_reward::{RewardEngine, RewardRule};
use skirmish_space::{Grid, SpatialIndex};
use thiserror::Error;

use crate::action_space::ActionSpace;
use crate::config::{ConfigError, Termination, WorldConfig};
use crate::hash;
use crate::layout;
use crate::metrics::StepMetrics;
use crate::resolver::{ActionResolver, GroupRules};

// Compile-time assertion: World is Send.
// Fails to compile if any field is !Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<World>();
    }
};

// ── WorldState ──────────────────────────────────────────────────

/// Episode state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WorldState {
    /// Constructed but never reset.
    Created,
    /// Accepting steps.
    Running,
    /// Ended by the termination rule.
    Terminated,
    /// Ended by reaching `max_ticks`.
    Truncated,
}

impl WorldState {
    /// Whether the episode has ended.
    pub fn is_done(self) -> bool {
        matches!(self, WorldState::Terminated | WorldState::Truncated)
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorldState::Created => "created",
            WorldState::Running => "running",
            WorldState::Terminated => "terminated",
            WorldState::Truncated => "truncated",
        };
        f.write_str(s)
    }
}

// ── StepError ───────────────────────────────────────────────────

/// Errors returned by [`World::step`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StepError {
    /// `step()` called outside `Running`. Call `reset()` first.
    #[error("cannot step in state {state}; call reset() first")]
    InvalidState {
        /// The state the world was in.
        state: WorldState,
    },
    /// Observation building rejected the pool layout.
    #[error("observation: {0}")]
    Observation(#[from] ObsError),
}

// ── StepResult ──────────────────────────────────────────────────

/// Everything produced by one [`World::step`].
#[derive(Clone, Debug)]
pub struct StepResult {
    /// Observations for agents alive after the tick, ascending by id.
    pub observations: Vec<(AgentId, Observation)>,
    /// Rewards for agents alive at tick start, ascending by id.
    pub rewards: Vec<(AgentId, f32)>,
    /// Done flags for agents alive at tick start: died this tick, or the
    /// episode ended.
    pub dones: Vec<(AgentId, bool)>,
    /// The tick just completed.
    pub tick: TickId,
    /// Whether the episode ended on this tick.
    pub episode_done: bool,
    /// State after this tick.
    pub state: WorldState,
    /// The resolution record for this tick.
    pub resolved: ResolvedTick,
    /// Timing and counters for this tick.
    pub metrics: StepMetrics,
}

// ── World ───────────────────────────────────────────────────────

/// A grid world populated by groups of agents.
///
/// Built from a [`WorldConfig`] with [`create_world`] or
/// [`World::new`]. Construction validates the configuration and lays out
/// the initial population once, so a layout that cannot be generated is
/// reported up front.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use skirmish_engine::{create_world, GroupConfig, WorldConfig, WorldState};
///
/// let config = WorldConfig {
///     width: 16,
///     height: 16,
///     max_ticks: Some(5),
///     groups: vec![GroupConfig::named("red", 4), GroupConfig::named("blue", 4)],
///     ..WorldConfig::default()
/// };
/// let mut world = create_world(config).unwrap();
/// let obs = world.reset().unwrap();
/// assert_eq!(obs.len(), 8);
///
/// while !world.state().is_done() {
///     world.step(&BTreeMap::new()).unwrap();
/// }
/// assert_eq!(world.state(), WorldState::Truncated);
/// assert_eq!(world.tick().0, 5);
/// ```
pub struct World {
    config: WorldConfig,
    pool: AgentPool,
    resolver: ActionResolver,
    rewards: RewardEngine,
    observer: ObservationBuilder,
    spaces: Vec<ActionSpace>,
    state: WorldState,
    tick: TickId,
    seed: u64,
    initial_groups: Vec<usize>,
    last_metrics: StepMetrics,
}

/// Validate `config` and build a [`World`] in the `Created` state.
pub fn create_world(config: WorldConfig) -> Result<World, ConfigError> {
    World::new(config)
}

impl World {
    /// Validate `config` and build the world.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = Grid::new(config.width, config.height)?;
        let index = SpatialIndex::with_bucket_size(grid, config.bucket_size);
        let mut pool = AgentPool::new(index, config.max_agents, config.groups.len());

        let resolver = ActionResolver::new(config.groups.iter().map(GroupRules::from).collect());
        let reward_config: Vec<_> = config.groups.iter().map(|g| g.rewards).collect();
        let rewards = RewardEngine::from_config(&reward_config)?
            .with_parallel(config.parallel.enabled, config.parallel.threshold);
        let observer = ObservationBuilder::new(config.groups.iter().map(|g| g.view).collect())?
            .with_max_ticks(config.max_ticks)
            .with_parallel(config.parallel.enabled, config.parallel.threshold);
        let spaces = config
            .groups
            .iter()
            .map(|g| ActionSpace::for_group(g.speed, g.attack_range))
            .collect();

        layout::populate(&mut pool, &config, config.seed)?;

        tracing::info!(
            width = config.width,
            height = config.height,
            groups = config.groups.len(),
            agents = pool.alive_count(),
            seed = config.seed,
            "world created"
        );

        Ok(Self {
            seed: config.seed,
            initial_groups: pool.group_counts().to_vec(),
            config,
            pool,
            resolver,
            rewards,
            observer,
            spaces,
            state: WorldState::Created,
            tick: TickId(0),
            last_metrics: StepMetrics::default(),
        })
    }

    /// Restore the configured layout and start a new episode.
    ///
    /// Obstacles and spawns are regenerated from the current seed, agent
    /// ids restart at 0 and the tick counter returns to 0. Returns the
    /// initial observation of every agent. Allowed from any state; on
    /// failure the world is left in `Created`.
    pub fn reset(&mut self) -> Result<Vec<(AgentId, Observation)>, ConfigError> {
        if let Err(e) = layout::populate(&mut self.pool, &self.config, self.seed) {
            self.state = WorldState::Created;
            return Err(e);
        }
        self.tick = TickId(0);
        self.initial_groups = self.pool.group_counts().to_vec();
        self.last_metrics = StepMetrics::default();
        self.state = WorldState::Running;
        tracing::info!(
            seed = self.seed,
            agents = self.pool.alive_count(),
            "episode reset"
        );
        Ok(self.observer.build_all(&self.pool, self.tick)?)
    }

    /// Run one tick.
    ///
    /// Entries for ids that are not alive are ignored; living agents
    /// without an entry do nothing.
    ///
    /// # Errors
    ///
    /// [`StepError::InvalidState`] unless the world is `Running`.
    pub fn step(&mut self, actions: &BTreeMap<AgentId, Action>) -> Result<StepResult, StepError> {
        if self.state != WorldState::Running {
            return Err(StepError::InvalidState { state: self.state });
        }
        let started = Instant::now();
        let before = self.pool.views();

        let resolved = self.resolver.resolve(&mut self.pool, actions);
        let resolve_us = started.elapsed().as_micros() as u64;
        self.tick = self.tick.next();

        let reward_started = Instant::now();
        let rewards = self.rewards.compute(&before, &resolved, &self.pool, self.tick);
        let reward_us = reward_started.elapsed().as_micros() as u64;

        if self.is_terminal() {
            self.state = WorldState::Terminated;
        } else if self.config.max_ticks.is_some_and(|max| self.tick.0 >= max) {
            self.state = WorldState::Truncated;
        }
        let episode_done = self.state.is_done();

        let observe_started = Instant::now();
        let observations = self.observer.build_all(&self.pool, self.tick)?;
        let observe_us = observe_started.elapsed().as_micros() as u64;

        let dones = resolved
            .agents
            .iter()
            .map(|(id, o)| (*id, o.died || episode_done))
            .collect();

        let mut metrics = StepMetrics {
            total_us: started.elapsed().as_micros() as u64,
            resolve_us,
            reward_us,
            observe_us,
            actions_submitted: actions.len() as u32,
            alive: self.pool.alive_count() as u32,
            ..StepMetrics::default()
        };
        metrics.record_stats(&resolved.stats);

        if metrics.actions_ignored > 0 {
            tracing::warn!(
                tick = self.tick.0,
                ignored = metrics.actions_ignored,
                "actions addressed to unknown or dead agents"
            );
        }
        tracing::debug!(
            tick = self.tick.0,
            alive = metrics.alive,
            moves = metrics.moves_accepted,
            hits = metrics.attacks_hit,
            kills = metrics.kills,
            total_us = metrics.total_us,
            "tick complete"
        );
        if episode_done {
            tracing::info!(
                tick = self.tick.0,
                state = %self.state,
                groups = ?self.pool.group_counts(),
                "episode ended"
            );
        }

        self.last_metrics = metrics.clone();
        Ok(StepResult {
            observations,
            rewards,
            dones,
            tick: self.tick,
            episode_done,
            state: self.state,
            resolved,
            metrics,
        })
    }

    /// Run one tick from discrete action indices.
    ///
    /// Each index is decoded through the acting agent's group
    /// [`ActionSpace`]; out-of-range indices act as `Noop`.
    pub fn step_discrete(&mut self, actions: &BTreeMap<AgentId, u32>) -> Result<StepResult, StepError> {
        let decoded: BTreeMap<AgentId, Action> = actions
            .iter()
            .map(|(&id, &index)| {
                let action = self
                    .pool
                    .get(id)
                    .and_then(|a| self.spaces.get(a.group.index()))
                    .map_or(Action::Noop, |space| space.decode_or_noop(index));
                (id, action)
            })
            .collect();
        self.step(&decoded)
    }

    fn is_terminal(&self) -> bool {
        let counts = self.pool.group_counts();
        match self.config.termination {
            Termination::LastGroupStanding => counts.iter().filter(|&&c| c > 0).count() <= 1,
            Termination::AnyGroupEliminated => self
                .initial_groups
                .iter()
                .zip(counts)
                .any(|(&start, &now)| start > 0 && now == 0),
            Termination::Never => false,
        }
    }

    // ── Setup ───────────────────────────────────────────────────

    /// Place a new agent at full health.
    ///
    /// Uses the group's `hp_max` and configured facing (north if random).
    pub fn spawn_agent(&mut self, group: GroupId, pos: Pos) -> Result<AgentId, PoolError> {
        let g = self
            .config
            .groups
            .get(group.index())
            .ok_or(PoolError::UnknownGroup {
                group,
                groups: self.config.groups.len(),
            })?;
        let attrs = SpawnAttrs::full(g.hp_max).facing(g.facing.unwrap_or(Direction::North));
        self.pool.spawn(group, pos, attrs)
    }

    /// Remove a living agent.
    pub fn despawn_agent(&mut self, id: AgentId) -> Result<(), PoolError> {
        if self.pool.despawn(id) {
            Ok(())
        } else {
            Err(PoolError::UnknownAgent { id })
        }
    }

    /// Append a reward rule. Its score is added to the configured rules
    /// from the next step on.
    pub fn add_reward_rule(&mut self, rule: Box<dyn RewardRule>) {
        self.rewards.add_rule(rule);
    }

    /// Change the seed used by the next [`reset()`](Self::reset).
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Positions of every living agent, ascending by id.
    pub fn agent_positions(&self) -> Vec<(AgentId, Pos)> {
        self.pool.iter().map(|a| (a.id, a.pos)).collect()
    }

    /// Snapshots of every living agent, ascending by id.
    pub fn agents(&self) -> Vec<AgentView> {
        self.pool.views()
    }

    /// Living agents per group, indexed by group.
    pub fn group_counts(&self) -> &[usize] {
        self.pool.group_counts()
    }

    /// Current observation of one living agent.
    pub fn observe(&self, id: AgentId) -> Option<Observation> {
        self.observer.build(&self.pool, id, self.tick)
    }

    /// The discrete action space of `group`.
    pub fn action_space(&self, group: GroupId) -> Option<&ActionSpace> {
        self.spaces.get(group.index())
    }

    /// Episode state.
    pub fn state(&self) -> WorldState {
        self.state
    }

    /// Ticks completed since the last reset.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Seed for the next reset.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// FNV-1a hash of the tick and all agent state.
    pub fn state_hash(&self) -> u64 {
        hash::state_hash(&self.pool, self.tick)
    }

    /// The configuration this world was built from.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The agent pool.
    pub fn pool(&self) -> &AgentPool {
        &self.pool
    }

    /// Names of the active reward rules.
    pub fn reward_rules(&self) -> Vec<&str> {
        self.rewards.rule_names()
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("state", &self.state)
            .field("tick", &self.tick)
            .field("seed", &self.seed)
            .field("alive", &self.pool.alive_count())
            .finish()
    }
}

//! Observation extraction over the agent pool.

use rayon::prelude::*;
use skirmish_arena::{AgentPool, AgentView};
use skirmish_core::{AgentId, GroupId, TickId};

use crate::error::ObsError;
use crate::geometry::Window;
use crate::observation::{
    channel_count, presence_channel, NeighborInfo, Observation, FEATURE_LEN, WALL_CHANNEL,
};
use crate::spec::{ObsSpec, MAX_VIEW_RANGE};

/// Default population above which [`ObservationBuilder::build_all`] shards
/// work across rayon workers.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// Builds per-agent observations from a read-only [`AgentPool`].
///
/// Holds one [`ObsSpec`] and one precomputed [`Window`] per group. Each
/// observation costs one spatial-index query of radius `view_range` plus a
/// terrain pass over the window; no step scans the whole grid or the whole
/// population.
///
/// # Examples
///
/// ```
/// use skirmish_arena::{AgentPool, SpawnAttrs};
/// use skirmish_core::{GroupId, Pos, TickId};
/// use skirmish_obs::{ObsSpec, ObservationBuilder};
/// use skirmish_space::{Grid, SpatialIndex};
///
/// let mut pool = AgentPool::new(SpatialIndex::new(Grid::new(8, 8).unwrap()), 8, 2);
/// let a = pool.spawn(GroupId(0), Pos::new(2, 2), SpawnAttrs::full(4.0)).unwrap();
/// let b = pool.spawn(GroupId(1), Pos::new(3, 2), SpawnAttrs::full(4.0)).unwrap();
///
/// let spec = ObsSpec { view_range: 1, ..ObsSpec::default() };
/// let builder = ObservationBuilder::new(vec![spec, spec]).unwrap();
/// let obs = builder.build(&pool, a, TickId(0)).unwrap();
///
/// assert_eq!(obs.shape(), [3, 3, 5]);
/// assert_eq!(obs.neighbors.len(), 1);
/// assert_eq!(obs.neighbors[0].id, b);
/// assert_eq!((obs.neighbors[0].dx, obs.neighbors[0].dy), (1, 0));
/// ```
#[derive(Debug, Clone)]
pub struct ObservationBuilder {
    specs: Vec<ObsSpec>,
    windows: Vec<Window>,
    channels: usize,
    max_ticks: Option<u64>,
    parallel: bool,
    parallel_threshold: usize,
}

impl ObservationBuilder {
    /// Create a builder with one spec per group, indexed by
    /// [`GroupId::index`]. Parallel mode starts disabled.
    pub fn new(specs: Vec<ObsSpec>) -> Result<Self, ObsError> {
        if specs.is_empty() {
            return Err(ObsError::NoGroups);
        }
        for (i, spec) in specs.iter().enumerate() {
            if spec.view_range > MAX_VIEW_RANGE {
                return Err(ObsError::ViewRangeTooLarge {
                    group: GroupId(i as u32),
                    range: spec.view_range,
                    max: MAX_VIEW_RANGE,
                });
            }
        }
        let windows = specs.iter().map(Window::new).collect();
        let channels = channel_count(specs.len());
        Ok(Self {
            specs,
            windows,
            channels,
            max_ticks: None,
            parallel: false,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    /// Normalise the tick feature by `max_ticks` (left at 0 when unset).
    pub fn with_max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Enable rayon sharding for populations above `threshold`.
    pub fn with_parallel(mut self, enabled: bool, threshold: usize) -> Self {
        self.parallel = enabled;
        self.parallel_threshold = threshold;
        self
    }

    /// Window channels, `1 + 2 * groups`.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// The spec for `group`.
    pub fn spec(&self, group: GroupId) -> Option<&ObsSpec> {
        self.specs.get(group.index())
    }

    /// Observation for one living agent, or `None` if `id` is not alive
    /// or its group has no spec.
    pub fn build(&self, pool: &AgentPool, id: AgentId, tick: TickId) -> Option<Observation> {
        let view = pool.get(id)?;
        if view.group.index() >= self.specs.len() {
            return None;
        }
        let mut scratch = Vec::new();
        Some(self.build_view(pool, &view, tick, &mut scratch))
    }

    /// Observations for every living agent, in ascending id order.
    ///
    /// Output is identical whether or not the parallel path is taken.
    pub fn build_all(
        &self,
        pool: &AgentPool,
        tick: TickId,
    ) -> Result<Vec<(AgentId, Observation)>, ObsError> {
        if pool.group_count() != self.specs.len() {
            return Err(ObsError::GroupMismatch {
                expected: self.specs.len(),
                actual: pool.group_count(),
            });
        }
        let views = pool.views();
        let out: Vec<(AgentId, Observation)> = if self.parallel && views.len() > self.parallel_threshold {
            views
                .par_iter()
                .map_init(Vec::new, |scratch, view| {
                    (view.id, self.build_view(pool, view, tick, scratch))
                })
                .collect()
        } else {
            let mut scratch = Vec::new();
            views
                .iter()
                .map(|view| (view.id, self.build_view(pool, view, tick, &mut scratch)))
                .collect()
        };
        Ok(out)
    }

    fn build_view(
        &self,
        pool: &AgentPool,
        view: &AgentView,
        tick: TickId,
        scratch: &mut Vec<AgentId>,
    ) -> Observation {
        let spec = &self.specs[view.group.index()];
        let win = &self.windows[view.group.index()];
        let grid = pool.grid();
        let c = self.channels;
        let facing = view.orientation;

        let mut window = vec![0.0f32; win.cells() * c];
        let mut valid_mask = vec![false; win.cells()];

        // ── Terrain ─────────────────────────────────────────────
        for i in 0..win.cells() {
            if !win.in_shape(i) {
                continue;
            }
            let (dx, dy) = win.world_offset(i, facing);
            let cell = view.pos.offset(dx, dy);
            if grid.is_wall(cell) {
                window[i * c + WALL_CHANNEL] = 1.0;
            }
            valid_mask[i] = grid.contains(cell);
        }

        // ── Agents ──────────────────────────────────────────────
        let mut neighbors = Vec::new();
        if pool
            .index()
            .neighbors_within_into(view.pos, win.radius(), scratch)
            .is_ok()
        {
            for &other_id in scratch.iter() {
                let Some(other) = pool.get(other_id) else {
                    continue;
                };
                let dx = other.pos.x - view.pos.x;
                let dy = other.pos.y - view.pos.y;
                let Some(cell) = win.cell_of(dx, dy, facing) else {
                    continue;
                };
                let ch = presence_channel(view.group, other.group);
                window[cell * c + ch] = 1.0;
                window[cell * c + ch + 1] = other.hp_fraction();

                if other_id != view.id {
                    let (fx, fy) = win.to_frame(dx, dy, facing);
                    neighbors.push(NeighborInfo {
                        id: other_id,
                        dx: fx,
                        dy: fy,
                        group: other.group,
                        hp: other.hp,
                    });
                }
            }
        }
        if let Some(cap) = spec.max_neighbors {
            neighbors.truncate(cap);
        }

        Observation {
            side: win.side(),
            channels: c,
            window,
            valid_mask,
            neighbors,
            features: self.features(pool, view, tick),
        }
    }

    fn features(&self, pool: &AgentPool, view: &AgentView, tick: TickId) -> Vec<f32> {
        let grid = pool.grid();
        let norm = |v: i32, extent: u32| {
            if extent > 1 {
                v as f32 / (extent - 1) as f32
            } else {
                0.0
            }
        };
        let mut f = Vec::with_capacity(FEATURE_LEN);
        f.push(view.hp_fraction());
        let mut facing = [0.0f32; 4];
        facing[view.orientation.index()] = 1.0;
        f.extend_from_slice(&facing);
        f.push(norm(view.pos.x, grid.width()));
        f.push(norm(view.pos.y, grid.height()));
        f.push(match self.max_ticks {
            Some(max) if max > 0 => tick.0 as f32 / max as f32,
            _ => 0.0,
        });
        f
    }
}

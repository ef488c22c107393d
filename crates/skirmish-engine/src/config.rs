//! World configuration, validation, and error types.
//!
//! [`WorldConfig`] is the input for constructing a [`World`](crate::World).
//! [`validate()`](WorldConfig::validate) checks every structural invariant
//! that can be decided without rolling the layout RNG; anything that
//! depends on random placement is reported by `reset()` instead.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use skirmish_arena::PoolError;
use skirmish_core::{Direction, GroupId, Pos};
use skirmish_obs::{ObsError, ObsSpec, MAX_VIEW_RANGE};
use skirmish_reward::{GroupRewards, RewardError};
use skirmish_space::SpaceError;
use thiserror::Error;

/// Largest supported `width × height`.
pub const MAX_CELLS: u64 = 1 << 30;

/// Largest supported group `speed`. Bounds the discrete action space.
pub const MAX_SPEED: u32 = 255;

/// Largest supported group `attack_range`. Bounds the discrete action space.
pub const MAX_ATTACK_RANGE: u32 = 255;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a configuration or building its layout.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Width or height is zero, or the grid has too many cells.
    #[error("invalid grid dimensions {width}x{height} (max {MAX_CELLS} cells)")]
    InvalidDimensions {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// `max_agents` is zero.
    #[error("max_agents must be at least 1")]
    ZeroCapacity,
    /// No groups declared.
    #[error("at least one group is required")]
    NoGroups,
    /// Two groups share a name.
    #[error("duplicate group name '{name}'")]
    DuplicateGroup {
        /// The repeated name.
        name: String,
    },
    /// A group's rules are unusable.
    #[error("group '{group}': {reason}")]
    InvalidGroup {
        /// The group name.
        group: String,
        /// What was wrong.
        reason: String,
    },
    /// `random_density` is outside `[0, 1)`.
    #[error("obstacle density must be in [0, 1), got {value}")]
    InvalidObstacleDensity {
        /// The configured density.
        value: f32,
    },
    /// An obstacle cell or rectangle lies outside the grid.
    #[error("obstacle at {pos} is out of bounds")]
    ObstacleOutOfBounds {
        /// First offending cell.
        pos: Pos,
    },
    /// An explicit spawn cell lies outside the grid.
    #[error("group '{group}' spawn at {pos} is out of bounds")]
    SpawnOutOfBounds {
        /// The group name.
        group: String,
        /// The offending cell.
        pos: Pos,
    },
    /// An explicit spawn cell is a fixed obstacle.
    #[error("group '{group}' spawn at {pos} is on an obstacle")]
    SpawnOnObstacle {
        /// The group name.
        group: String,
        /// The offending cell.
        pos: Pos,
    },
    /// Two explicit spawns share a cell.
    #[error("spawn cell {pos} is used twice")]
    DuplicateSpawn {
        /// The shared cell.
        pos: Pos,
    },
    /// A spawn region lies outside the grid or is empty.
    #[error("group '{group}' spawn region is empty or out of bounds")]
    InvalidSpawnRegion {
        /// The group name.
        group: String,
    },
    /// More agents requested than the population cap allows.
    #[error("initial population {requested} exceeds max_agents {capacity}")]
    PopulationExceedsCapacity {
        /// Total agents requested.
        requested: usize,
        /// The cap.
        capacity: usize,
    },
    /// More agents requested than there are open cells.
    #[error("initial population {requested} exceeds {open} open cells")]
    PopulationExceedsOpenCells {
        /// Total agents requested.
        requested: usize,
        /// Cells left after obstacles.
        open: usize,
    },
    /// Random placement ran out of free cells for a group.
    #[error("group '{group}': only {available} free cells for {requested} agents")]
    LayoutFailed {
        /// The group name.
        group: String,
        /// Agents requested.
        requested: usize,
        /// Free cells found.
        available: usize,
    },
    /// Reward coefficients are invalid.
    #[error("rewards: {0}")]
    Reward(#[from] RewardError),
    /// Observation settings are invalid.
    #[error("observation: {0}")]
    Obs(#[from] ObsError),
    /// Grid construction failed.
    #[error("space: {0}")]
    Space(#[from] SpaceError),
    /// Agent placement failed.
    #[error("pool: {0}")]
    Pool(#[from] PoolError),
    /// A TOML document could not be parsed.
    #[error("parse: {0}")]
    Parse(#[from] toml::de::Error),
    /// A configuration file could not be read.
    #[error("reading {path}: {source}")]
    Io {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

// ── Sub-configs ────────────────────────────────────────────────────

/// Axis-aligned rectangle of cells, `[x, x+width) × [y, y+height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectConfig {
    /// Left column.
    pub x: i32,
    /// Top row.
    pub y: i32,
    /// Columns covered.
    pub width: u32,
    /// Rows covered.
    pub height: u32,
}

impl RectConfig {
    /// Cells of the rectangle in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let (x0, y0) = (self.x, self.y);
        let (w, h) = (self.width as i32, self.height as i32);
        (y0..y0.saturating_add(h)).flat_map(move |y| (x0..x0.saturating_add(w)).map(move |x| Pos::new(x, y)))
    }

    /// Whether the rectangle is non-empty and fits inside `width × height`.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x >= 0
            && self.y >= 0
            && self.x as i64 + self.width as i64 <= width as i64
            && self.y as i64 + self.height as i64 <= height as i64
    }
}

/// Where a group's agents appear on reset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpawnConfig {
    /// `count` agents on uniformly random free cells.
    Random {
        /// Agents to place.
        count: usize,
    },
    /// `count` agents on random free cells inside `rect`.
    Region {
        /// Agents to place.
        count: usize,
        /// Allowed area.
        rect: RectConfig,
    },
    /// One agent on each listed cell, in order.
    Positions {
        /// Spawn cells.
        cells: Vec<Pos>,
    },
}

impl SpawnConfig {
    /// Number of agents this spawn places.
    pub fn count(&self) -> usize {
        match self {
            SpawnConfig::Random { count } | SpawnConfig::Region { count, .. } => *count,
            SpawnConfig::Positions { cells } => cells.len(),
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        SpawnConfig::Random { count: 0 }
    }
}

/// Rules and layout for one group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupConfig {
    /// Unique name.
    pub name: String,
    /// Maximum (and starting) hit points.
    pub hp_max: f32,
    /// Maximum cells per move.
    pub speed: u32,
    /// Chebyshev attack reach. 0 disables attacking.
    pub attack_range: u32,
    /// Hp removed per hit.
    pub damage: f32,
    /// Hp regained (or lost, if negative) by survivors every tick.
    pub step_recover: f32,
    /// Facing on spawn. `None` draws one at random.
    pub facing: Option<Direction>,
    /// Observation settings.
    pub view: ObsSpec,
    /// Reward coefficients.
    pub rewards: GroupRewards,
    /// Initial placement.
    pub spawn: SpawnConfig,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            hp_max: 10.0,
            speed: 1,
            attack_range: 1,
            damage: 2.0,
            step_recover: 0.1,
            facing: None,
            view: ObsSpec::default(),
            rewards: GroupRewards::default(),
            spawn: SpawnConfig::default(),
        }
    }
}

impl GroupConfig {
    /// A default group called `name` spawning `count` agents at random.
    pub fn named(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            spawn: SpawnConfig::Random { count },
            ..Self::default()
        }
    }
}

/// Fixed and random terrain.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    /// Surround the grid with a one-cell wall.
    pub border: bool,
    /// Individual obstacle cells.
    pub cells: Vec<Pos>,
    /// Filled obstacle rectangles.
    pub rects: Vec<RectConfig>,
    /// Fraction of the remaining open cells to block at random on reset.
    pub random_density: f32,
}

/// When an episode ends before `max_ticks`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// At most one group has living agents.
    #[default]
    LastGroupStanding,
    /// Some group that started with agents has none left.
    AnyGroupEliminated,
    /// Only truncation ends the episode.
    Never,
}

/// Rayon sharding for the read-only phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Whether observation and reward computation may use rayon.
    pub enabled: bool,
    /// Minimum population before work is sharded.
    pub threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: skirmish_obs::DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

// ── WorldConfig ────────────────────────────────────────────────────

/// Complete configuration for constructing a simulation world.
///
/// # Examples
///
/// ```
/// use skirmish_engine::{GroupConfig, WorldConfig};
///
/// let config = WorldConfig {
///     width: 32,
///     height: 32,
///     groups: vec![GroupConfig::named("red", 20), GroupConfig::named("blue", 20)],
///     ..WorldConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Grid columns.
    pub width: u32,
    /// Grid rows.
    pub height: u32,
    /// Population cap.
    pub max_agents: usize,
    /// Truncate after this many ticks. `None` never truncates.
    pub max_ticks: Option<u64>,
    /// Seed for layout generation.
    pub seed: u64,
    /// Spatial index bucket side length.
    pub bucket_size: u32,
    /// Groups in [`GroupId`] order.
    pub groups: Vec<GroupConfig>,
    /// Terrain.
    pub obstacles: ObstacleConfig,
    /// Episode end condition.
    pub termination: Termination,
    /// Parallelism for read-only phases.
    pub parallel: ParallelConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            max_agents: 4096,
            max_ticks: Some(1000),
            seed: 0,
            bucket_size: skirmish_space::DEFAULT_BUCKET_SIZE,
            groups: Vec::new(),
            obstacles: ObstacleConfig::default(),
            termination: Termination::default(),
            parallel: ParallelConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Group ids by name, in declaration order.
    pub fn group_ids(&self) -> IndexMap<&str, GroupId> {
        self.groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.name.as_str(), GroupId(i as u32)))
            .collect()
    }

    /// The id of the group called `name`.
    pub fn group_id(&self, name: &str) -> Option<GroupId> {
        self.groups
            .iter()
            .position(|g| g.name == name)
            .map(|i| GroupId(i as u32))
    }

    /// Total agents placed on reset.
    pub fn initial_population(&self) -> usize {
        self.groups.iter().map(|g| g.spawn.count()).sum()
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Grid dimensions.
        let cells = self.width as u64 * self.height as u64;
        if cells == 0 || cells > MAX_CELLS || self.width > i32::MAX as u32 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        // 2. Population cap.
        if self.max_agents == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        // 3. Groups.
        if self.groups.is_empty() {
            return Err(ConfigError::NoGroups);
        }
        let mut names: IndexMap<&str, ()> = IndexMap::with_capacity(self.groups.len());
        for g in &self.groups {
            if names.insert(g.name.as_str(), ()).is_some() {
                return Err(ConfigError::DuplicateGroup {
                    name: g.name.clone(),
                });
            }
            validate_group(g, self.width.max(self.height))?;
        }
        // 4. Fixed obstacles.
        let density = self.obstacles.random_density;
        if !density.is_finite() || !(0.0..1.0).contains(&density) {
            return Err(ConfigError::InvalidObstacleDensity { value: density });
        }
        let fixed = self.fixed_obstacles()?;

        // 5. Explicit spawns and regions.
        let mut taken: BTreeSet<Pos> = BTreeSet::new();
        for g in &self.groups {
            match &g.spawn {
                SpawnConfig::Positions { cells } => {
                    for &pos in cells {
                        if !self.in_bounds(pos) {
                            return Err(ConfigError::SpawnOutOfBounds {
                                group: g.name.clone(),
                                pos,
                            });
                        }
                        if fixed.contains(&pos) {
                            return Err(ConfigError::SpawnOnObstacle {
                                group: g.name.clone(),
                                pos,
                            });
                        }
                        if !taken.insert(pos) {
                            return Err(ConfigError::DuplicateSpawn { pos });
                        }
                    }
                }
                SpawnConfig::Region { rect, .. } => {
                    if !rect.fits(self.width, self.height) {
                        return Err(ConfigError::InvalidSpawnRegion {
                            group: g.name.clone(),
                        });
                    }
                }
                SpawnConfig::Random { .. } => {}
            }
        }

        // 6. Population against capacity and open space.
        let requested = self.initial_population();
        if requested > self.max_agents {
            return Err(ConfigError::PopulationExceedsCapacity {
                requested,
                capacity: self.max_agents,
            });
        }
        let open = self.open_cells_after_obstacles(fixed.len());
        if requested > open {
            return Err(ConfigError::PopulationExceedsOpenCells { requested, open });
        }
        Ok(())
    }

    /// Every fixed obstacle cell (border, rectangles, listed cells).
    pub(crate) fn fixed_obstacles(&self) -> Result<BTreeSet<Pos>, ConfigError> {
        let mut out = BTreeSet::new();
        if self.obstacles.border {
            let (w, h) = (self.width as i32, self.height as i32);
            for x in 0..w {
                out.insert(Pos::new(x, 0));
                out.insert(Pos::new(x, h - 1));
            }
            for y in 0..h {
                out.insert(Pos::new(0, y));
                out.insert(Pos::new(w - 1, y));
            }
        }
        for rect in &self.obstacles.rects {
            for pos in rect.cells() {
                if !self.in_bounds(pos) {
                    return Err(ConfigError::ObstacleOutOfBounds { pos });
                }
                out.insert(pos);
            }
        }
        for &pos in &self.obstacles.cells {
            if !self.in_bounds(pos) {
                return Err(ConfigError::ObstacleOutOfBounds { pos });
            }
            out.insert(pos);
        }
        Ok(out)
    }

    /// Number of random obstacles placed on reset, given `fixed` fixed ones.
    pub(crate) fn random_obstacle_count(&self, fixed: usize) -> usize {
        let open = (self.width as usize * self.height as usize).saturating_sub(fixed);
        (self.obstacles.random_density as f64 * open as f64).floor() as usize
    }

    fn open_cells_after_obstacles(&self, fixed: usize) -> usize {
        let open = (self.width as usize * self.height as usize).saturating_sub(fixed);
        open - self.random_obstacle_count(fixed).min(open)
    }

    fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }
}

fn validate_group(g: &GroupConfig, extent: u32) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidGroup {
        group: g.name.clone(),
        reason,
    };
    if g.name.is_empty() {
        return Err(invalid("name must not be empty".to_string()));
    }
    if !g.hp_max.is_finite() || g.hp_max <= 0.0 {
        return Err(invalid(format!("hp_max must be finite and > 0, got {}", g.hp_max)));
    }
    if !g.damage.is_finite() || g.damage < 0.0 {
        return Err(invalid(format!("damage must be finite and >= 0, got {}", g.damage)));
    }
    if !g.step_recover.is_finite() {
        return Err(invalid(format!("step_recover must be finite, got {}", g.step_recover)));
    }
    let max_speed = MAX_SPEED.min(extent);
    if g.speed > max_speed {
        return Err(invalid(format!("speed {} exceeds maximum {max_speed}", g.speed)));
    }
    let max_range = MAX_ATTACK_RANGE.min(extent);
    if g.attack_range > max_range {
        return Err(invalid(format!(
            "attack_range {} exceeds maximum {max_range}",
            g.attack_range
        )));
    }
    if g.view.view_range > MAX_VIEW_RANGE {
        return Err(invalid(format!(
            "view_range {} exceeds maximum {MAX_VIEW_RANGE}",
            g.view.view_range
        )));
    }
    for (field, value) in g.rewards.fields() {
        if !value.is_finite() {
            return Err(invalid(format!("reward '{field}' is not finite")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_groups() -> WorldConfig {
        WorldConfig {
            width: 10,
            height: 10,
            max_agents: 50,
            groups: vec![GroupConfig::named("red", 5), GroupConfig::named("blue", 5)],
            ..WorldConfig::default()
        }
    }

    #[test]
    fn default_two_group_config_validates() {
        two_groups().validate().unwrap();
    }

    #[test]
    fn rejects_zero_dimensions() {
        let cfg = WorldConfig {
            width: 0,
            ..two_groups()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidDimensions { width: 0, .. })
        ));
    }

    #[test]
    fn rejects_zero_capacity() {
        let cfg = WorldConfig {
            max_agents: 0,
            ..two_groups()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroCapacity)));
    }

    #[test]
    fn rejects_no_groups_and_duplicates() {
        let cfg = WorldConfig {
            groups: vec![],
            ..two_groups()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::NoGroups)));
        let cfg = WorldConfig {
            groups: vec![GroupConfig::named("a", 1), GroupConfig::named("a", 1)],
            ..two_groups()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::DuplicateGroup { .. })
        ));
    }

    #[test]
    fn rejects_bad_group_rules() {
        let mut cfg = two_groups();
        cfg.groups[1].hp_max = 0.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidGroup { ref group, .. }) if group == "blue"
        ));
        let mut cfg = two_groups();
        cfg.groups[0].damage = f32::NAN;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidGroup { .. })));
        let mut cfg = two_groups();
        cfg.groups[0].view.view_range = MAX_VIEW_RANGE + 1;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidGroup { .. })));
    }

    #[test]
    fn rejects_unbounded_speed_and_range() {
        let mut cfg = two_groups();
        cfg.groups[0].speed = u32::MAX;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidGroup { ref group, .. }) if group == "red"
        ));

        // Bounded by the larger grid side.
        let mut cfg = two_groups();
        cfg.groups[1].speed = 10;
        cfg.validate().unwrap();
        cfg.groups[1].speed = 11;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidGroup { .. })));

        let mut cfg = two_groups();
        cfg.groups[0].attack_range = 3000;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidGroup { .. })));

        // Bounded by the hard cap even on a wide grid.
        let mut cfg = two_groups();
        cfg.width = 4096;
        cfg.groups[0].attack_range = MAX_ATTACK_RANGE + 1;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidGroup { .. })));
        cfg.groups[0].attack_range = MAX_ATTACK_RANGE;
        cfg.groups[0].speed = MAX_SPEED;
        cfg.validate().unwrap();
    }

    #[test]
    fn rejects_bad_density() {
        let mut cfg = two_groups();
        cfg.obstacles.random_density = 1.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidObstacleDensity { .. })
        ));
    }

    #[test]
    fn rejects_spawn_on_obstacle_and_duplicates() {
        let mut cfg = two_groups();
        cfg.obstacles.cells = vec![Pos::new(3, 3)];
        cfg.groups[0].spawn = SpawnConfig::Positions {
            cells: vec![Pos::new(3, 3)],
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::SpawnOnObstacle { .. })
        ));

        let mut cfg = two_groups();
        cfg.groups[0].spawn = SpawnConfig::Positions {
            cells: vec![Pos::new(1, 1)],
        };
        cfg.groups[1].spawn = SpawnConfig::Positions {
            cells: vec![Pos::new(1, 1)],
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::DuplicateSpawn { .. })
        ));

        let mut cfg = two_groups();
        cfg.groups[0].spawn = SpawnConfig::Positions {
            cells: vec![Pos::new(10, 0)],
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::SpawnOutOfBounds { .. })
        ));
    }

    #[test]
    fn rejects_obstacle_rect_out_of_bounds() {
        let mut cfg = two_groups();
        cfg.obstacles.rects = vec![RectConfig {
            x: 8,
            y: 0,
            width: 3,
            height: 1,
        }];
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ObstacleOutOfBounds { .. })
        ));
    }

    #[test]
    fn rejects_overpopulation() {
        let mut cfg = two_groups();
        cfg.max_agents = 9;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::PopulationExceedsCapacity { requested: 10, .. })
        ));

        let mut cfg = two_groups();
        cfg.obstacles.border = true; // 36 border cells, 64 open
        cfg.obstacles.random_density = 0.9; // 57 random, 7 open
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::PopulationExceedsOpenCells { requested: 10, open: 7 })
        ));
    }

    #[test]
    fn rejects_bad_region() {
        let mut cfg = two_groups();
        cfg.groups[0].spawn = SpawnConfig::Region {
            count: 2,
            rect: RectConfig {
                x: 5,
                y: 5,
                width: 6,
                height: 1,
            },
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidSpawnRegion { .. })
        ));
    }

    #[test]
    fn group_lookup_preserves_order() {
        let cfg = two_groups();
        let ids = cfg.group_ids();
        assert_eq!(ids.keys().copied().collect::<Vec<_>>(), vec!["red", "blue"]);
        assert_eq!(cfg.group_id("blue"), Some(GroupId(1)));
        assert_eq!(cfg.group_id("green"), None);
    }

    #[test]
    fn border_counts_each_cell_once() {
        let cfg = WorldConfig {
            width: 4,
            height: 3,
            obstacles: ObstacleConfig {
                border: true,
                ..ObstacleConfig::default()
            },
            ..two_groups()
        };
        assert_eq!(cfg.fixed_obstacles().unwrap().len(), 10);
    }
}

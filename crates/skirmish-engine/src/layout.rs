//! Seeded initial layout: terrain and spawns.
//!
//! Layout is a pure function of the configuration and the seed. The same
//! pair always produces the same obstacles, the same spawn cells and the
//! same agent ids, which is what makes `reset()` reproducible.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skirmish_arena::{AgentPool, SpawnAttrs};
use skirmish_core::{Direction, GroupId, Pos};

use crate::config::{ConfigError, GroupConfig, SpawnConfig, WorldConfig};

/// Clear `pool` and rebuild terrain and population from `config`.
///
/// Steps, in order:
/// 1. fixed obstacles (border, rectangles, cells);
/// 2. random obstacles, drawn from open cells not reserved by explicit spawns;
/// 3. groups in declaration order, each placing its agents.
pub(crate) fn populate(pool: &mut AgentPool, config: &WorldConfig, seed: u64) -> Result<(), ConfigError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    pool.clear();
    pool.clear_obstacles();

    let fixed = config.fixed_obstacles()?;
    for &pos in &fixed {
        pool.set_obstacle(pos)?;
    }

    let reserved: BTreeSet<Pos> = config
        .groups
        .iter()
        .filter_map(|g| match &g.spawn {
            SpawnConfig::Positions { cells } => Some(cells.iter().copied()),
            _ => None,
        })
        .flatten()
        .collect();

    let target = config.random_obstacle_count(fixed.len());
    if target > 0 {
        let mut candidates: Vec<Pos> = pool
            .grid()
            .open_cells()
            .filter(|p| !reserved.contains(p))
            .collect();
        candidates.shuffle(&mut rng);
        for &pos in candidates.iter().take(target) {
            pool.set_obstacle(pos)?;
        }
    }

    for (i, group) in config.groups.iter().enumerate() {
        spawn_group(pool, GroupId(i as u32), group, &reserved, &mut rng)?;
    }

    tracing::debug!(
        seed,
        obstacles = pool.grid().obstacle_count(),
        agents = pool.alive_count(),
        "layout generated"
    );
    Ok(())
}

fn spawn_group(
    pool: &mut AgentPool,
    gid: GroupId,
    group: &GroupConfig,
    reserved: &BTreeSet<Pos>,
    rng: &mut ChaCha8Rng,
) -> Result<(), ConfigError> {
    let cells: Vec<Pos> = match &group.spawn {
        SpawnConfig::Positions { cells } => cells.clone(),
        SpawnConfig::Random { count } => {
            let free: Vec<Pos> = pool
                .grid()
                .open_cells()
                .filter(|p| pool.index().is_free(*p) && !reserved.contains(p))
                .collect();
            pick(free, *count, group, rng)?
        }
        SpawnConfig::Region { count, rect } => {
            let free: Vec<Pos> = rect
                .cells()
                .filter(|p| pool.index().is_free(*p) && !reserved.contains(p))
                .collect();
            pick(free, *count, group, rng)?
        }
    };

    for pos in cells {
        let facing = match group.facing {
            Some(d) => d,
            None => Direction::ALL[rng.random_range(0..4usize)],
        };
        pool.spawn(gid, pos, SpawnAttrs::full(group.hp_max).facing(facing))?;
    }
    Ok(())
}

fn pick(
    mut free: Vec<Pos>,
    count: usize,
    group: &GroupConfig,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<Pos>, ConfigError> {
    if free.len() < count {
        return Err(ConfigError::LayoutFailed {
            group: group.name.clone(),
            requested: count,
            available: free.len(),
        });
    }
    free.shuffle(rng);
    free.truncate(count);
    Ok(free)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ObstacleConfig, RectConfig};
    use skirmish_space::{Grid, SpatialIndex};

    fn pool_for(config: &WorldConfig) -> AgentPool {
        let grid = Grid::new(config.width, config.height).unwrap();
        AgentPool::new(
            SpatialIndex::new(grid),
            config.max_agents,
            config.groups.len(),
        )
    }

    fn config() -> WorldConfig {
        WorldConfig {
            width: 16,
            height: 12,
            max_agents: 64,
            groups: vec![GroupConfig::named("red", 10), GroupConfig::named("blue", 10)],
            obstacles: ObstacleConfig {
                border: true,
                random_density: 0.2,
                ..ObstacleConfig::default()
            },
            ..WorldConfig::default()
        }
    }

    fn snapshot(pool: &AgentPool) -> (Vec<Pos>, Vec<(u64, u32, Pos, Direction)>) {
        let obstacles = pool.grid().obstacle_cells().collect();
        let agents = pool
            .iter()
            .map(|a| (a.id.0, a.group.0, a.pos, a.orientation))
            .collect();
        (obstacles, agents)
    }

    #[test]
    fn same_seed_same_layout() {
        let cfg = config();
        let mut a = pool_for(&cfg);
        let mut b = pool_for(&cfg);
        populate(&mut a, &cfg, 7).unwrap();
        populate(&mut b, &cfg, 7).unwrap();
        assert_eq!(snapshot(&a), snapshot(&b));

        // Repopulating the same pool reproduces it, ids included.
        populate(&mut a, &cfg, 7).unwrap();
        assert_eq!(snapshot(&a), snapshot(&b));
    }

    #[test]
    fn different_seeds_differ() {
        let cfg = config();
        let mut a = pool_for(&cfg);
        let mut b = pool_for(&cfg);
        populate(&mut a, &cfg, 1).unwrap();
        populate(&mut b, &cfg, 2).unwrap();
        assert_ne!(snapshot(&a), snapshot(&b));
    }

    #[test]
    fn counts_and_obstacles() {
        let cfg = config();
        let mut pool = pool_for(&cfg);
        populate(&mut pool, &cfg, 3).unwrap();
        assert_eq!(pool.group_counts(), &[10, 10]);
        let border = 2 * 16 + 2 * 10;
        let random = ((16 * 12 - border) as f64 * 0.2).floor() as usize;
        assert_eq!(pool.grid().obstacle_count(), border + random);
        for a in pool.iter() {
            assert!(pool.grid().is_open(a.pos));
        }
        pool.check_consistency().unwrap();
    }

    #[test]
    fn explicit_positions_are_never_blocked() {
        let mut cfg = config();
        cfg.obstacles.random_density = 0.9;
        cfg.groups[0].spawn = SpawnConfig::Positions {
            cells: vec![Pos::new(1, 1), Pos::new(2, 1)],
        };
        cfg.groups[1].spawn = SpawnConfig::Random { count: 2 };
        cfg.groups[0].facing = Some(Direction::South);
        for seed in 0..10 {
            let mut pool = pool_for(&cfg);
            populate(&mut pool, &cfg, seed).unwrap();
            let red: Vec<_> = pool.iter().filter(|a| a.group == GroupId(0)).collect();
            assert_eq!(red.len(), 2);
            assert_eq!(red[0].pos, Pos::new(1, 1));
            assert_eq!(red[1].pos, Pos::new(2, 1));
            assert!(red.iter().all(|a| a.orientation == Direction::South));
        }
    }

    #[test]
    fn region_confines_spawns() {
        let mut cfg = config();
        cfg.obstacles = ObstacleConfig::default();
        let rect = RectConfig {
            x: 0,
            y: 0,
            width: 4,
            height: 4,
        };
        cfg.groups[0].spawn = SpawnConfig::Region { count: 16, rect };
        let mut pool = pool_for(&cfg);
        populate(&mut pool, &cfg, 0).unwrap();
        for a in pool.iter().filter(|a| a.group == GroupId(0)) {
            assert!(a.pos.x < 4 && a.pos.y < 4);
        }
        assert!(pool
            .iter()
            .filter(|a| a.group == GroupId(1))
            .all(|a| a.pos.x >= 4 || a.pos.y >= 4));
    }

    #[test]
    fn overfull_region_fails() {
        let mut cfg = config();
        cfg.obstacles = ObstacleConfig::default();
        cfg.groups[0].spawn = SpawnConfig::Region {
            count: 5,
            rect: RectConfig {
                x: 0,
                y: 0,
                width: 2,
                height: 2,
            },
        };
        let mut pool = pool_for(&cfg);
        assert!(matches!(
            populate(&mut pool, &cfg, 0),
            Err(ConfigError::LayoutFailed {
                requested: 5,
                available: 4,
                ..
            })
        ));
    }
}

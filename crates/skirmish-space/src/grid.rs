//! Fixed-size 2D grid with permanent obstacle terrain.

use crate::error::SpaceError;
use skirmish_core::{Path, Pos};

/// A `width × height` cell space with per-cell obstacle flags.
///
/// Each cell has coordinate `Pos { x, y }` where `0 <= x < width` and
/// `0 <= y < height`. Cells are ranked row-major: `rank = y * width + x`.
/// The grid is the only owner of terrain; agent occupancy lives in
/// [`SpatialIndex`](crate::SpatialIndex).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    obstacles: Vec<bool>,
    obstacle_count: usize,
}

impl Grid {
    /// Maximum dimension size: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create an obstacle-free grid.
    ///
    /// Returns `Err(SpaceError::EmptyGrid)` if either dimension is 0, or
    /// `Err(SpaceError::DimensionTooLarge)` if either exceeds `i32::MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skirmish_space::Grid;
    /// use skirmish_core::Pos;
    ///
    /// let grid = Grid::new(16, 8).unwrap();
    /// assert_eq!(grid.cell_count(), 128);
    /// assert!(grid.contains(Pos::new(15, 7)));
    /// assert!(!grid.contains(Pos::new(16, 0)));
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self, SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptyGrid);
        }
        if width > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        let cells = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            obstacles: vec![false; cells],
            obstacle_count: 0,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells, including obstacles.
    pub fn cell_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Whether `pos` lies inside the grid.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    /// Row-major rank of `pos`, or `None` if it lies outside the grid.
    pub fn rank(&self, pos: Pos) -> Option<usize> {
        if self.contains(pos) {
            Some((pos.y as usize) * (self.width as usize) + (pos.x as usize))
        } else {
            None
        }
    }

    /// Position of the cell with row-major rank `rank`.
    pub fn pos_of(&self, rank: usize) -> Option<Pos> {
        if rank >= self.cell_count() {
            return None;
        }
        let w = self.width as usize;
        Some(Pos::new((rank % w) as i32, (rank / w) as i32))
    }

    /// Check that `pos` is in bounds and return its rank.
    pub fn check_bounds(&self, pos: Pos) -> Result<usize, SpaceError> {
        self.rank(pos).ok_or(SpaceError::OutOfBounds {
            pos,
            width: self.width,
            height: self.height,
        })
    }

    /// Mark `pos` as a permanent obstacle. Idempotent.
    pub fn set_obstacle(&mut self, pos: Pos) -> Result<(), SpaceError> {
        let rank = self.check_bounds(pos)?;
        if !self.obstacles[rank] {
            self.obstacles[rank] = true;
            self.obstacle_count += 1;
        }
        Ok(())
    }

    /// Clear all obstacles.
    pub fn clear_obstacles(&mut self) {
        self.obstacles.fill(false);
        self.obstacle_count = 0;
    }

    /// Whether `pos` is an in-bounds obstacle. Out-of-bounds cells report
    /// `false`; use [`is_wall`](Self::is_wall) to treat them as blocked.
    pub fn is_obstacle(&self, pos: Pos) -> bool {
        self.rank(pos).is_some_and(|r| self.obstacles[r])
    }

    /// Whether `pos` is an obstacle or lies outside the grid.
    pub fn is_wall(&self, pos: Pos) -> bool {
        match self.rank(pos) {
            Some(r) => self.obstacles[r],
            None => true,
        }
    }

    /// Whether an agent could stand on `pos` if nobody else were there.
    pub fn is_open(&self, pos: Pos) -> bool {
        !self.is_wall(pos)
    }

    /// Whether every cell of `path` is open.
    pub fn path_is_open(&self, path: &Path) -> bool {
        path.iter().all(|&p| self.is_open(p))
    }

    /// Number of obstacle cells.
    pub fn obstacle_count(&self) -> usize {
        self.obstacle_count
    }

    /// Number of cells an agent could stand on.
    pub fn open_cell_count(&self) -> usize {
        self.cell_count() - self.obstacle_count
    }

    /// All open cells in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.obstacles
            .iter()
            .enumerate()
            .filter(|(_, &blocked)| !blocked)
            .filter_map(|(rank, _)| self.pos_of(rank))
    }

    /// All obstacle cells in row-major order.
    pub fn obstacle_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.obstacles
            .iter()
            .enumerate()
            .filter(|(_, &blocked)| blocked)
            .filter_map(|(rank, _)| self.pos_of(rank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Pos {
        Pos::new(x, y)
    }

    #[test]
    fn new_rejects_zero_dims() {
        assert_eq!(Grid::new(0, 4), Err(SpaceError::EmptyGrid));
        assert_eq!(Grid::new(4, 0), Err(SpaceError::EmptyGrid));
    }

    #[test]
    fn new_rejects_oversized_dims() {
        match Grid::new(u32::MAX, 1) {
            Err(SpaceError::DimensionTooLarge { name: "width", .. }) => {}
            other => panic!("expected DimensionTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn rank_is_row_major() {
        let g = Grid::new(4, 3).unwrap();
        assert_eq!(g.rank(p(0, 0)), Some(0));
        assert_eq!(g.rank(p(3, 0)), Some(3));
        assert_eq!(g.rank(p(0, 1)), Some(4));
        assert_eq!(g.rank(p(3, 2)), Some(11));
        assert_eq!(g.rank(p(4, 0)), None);
        assert_eq!(g.rank(p(-1, 0)), None);
    }

    #[test]
    fn pos_of_inverts_rank() {
        let g = Grid::new(5, 7).unwrap();
        for rank in 0..g.cell_count() {
            let pos = g.pos_of(rank).unwrap();
            assert_eq!(g.rank(pos), Some(rank));
        }
        assert_eq!(g.pos_of(35), None);
    }

    #[test]
    fn obstacles_counted_once() {
        let mut g = Grid::new(3, 3).unwrap();
        g.set_obstacle(p(1, 1)).unwrap();
        g.set_obstacle(p(1, 1)).unwrap();
        assert_eq!(g.obstacle_count(), 1);
        assert_eq!(g.open_cell_count(), 8);
        assert!(g.is_obstacle(p(1, 1)));
        assert!(!g.is_open(p(1, 1)));
    }

    #[test]
    fn set_obstacle_out_of_bounds_fails() {
        let mut g = Grid::new(3, 3).unwrap();
        match g.set_obstacle(p(3, 0)) {
            Err(SpaceError::OutOfBounds { .. }) => {}
            other => panic!("expected OutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn off_grid_is_wall_not_obstacle() {
        let g = Grid::new(2, 2).unwrap();
        assert!(!g.is_obstacle(p(-1, 0)));
        assert!(g.is_wall(p(-1, 0)));
    }

    #[test]
    fn open_cells_skip_obstacles_in_order() {
        let mut g = Grid::new(2, 2).unwrap();
        g.set_obstacle(p(1, 0)).unwrap();
        let open: Vec<Pos> = g.open_cells().collect();
        assert_eq!(open, vec![p(0, 0), p(0, 1), p(1, 1)]);
        let blocked: Vec<Pos> = g.obstacle_cells().collect();
        assert_eq!(blocked, vec![p(1, 0)]);
    }

    #[test]
    fn path_blocked_by_any_obstacle() {
        let mut g = Grid::new(5, 1).unwrap();
        g.set_obstacle(p(2, 0)).unwrap();
        let path = p(0, 0).path(skirmish_core::Direction::East, 3);
        assert!(!g.path_is_open(&path));
        let short = p(0, 0).path(skirmish_core::Direction::East, 1);
        assert!(g.path_is_open(&short));
    }

    #[test]
    fn clear_obstacles_resets_count() {
        let mut g = Grid::new(3, 3).unwrap();
        g.set_obstacle(p(0, 0)).unwrap();
        g.set_obstacle(p(2, 2)).unwrap();
        g.clear_obstacles();
        assert_eq!(g.obstacle_count(), 0);
        assert_eq!(g.open_cell_count(), 9);
    }
}

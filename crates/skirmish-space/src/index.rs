//! Bucketed cell → agent occupancy index.

use indexmap::IndexMap;
use skirmish_core::{AgentId, Pos};

use crate::error::SpaceError;
use crate::grid::Grid;

/// Default side length of a square occupancy bucket, in cells.
pub const DEFAULT_BUCKET_SIZE: u32 = 8;

/// Occupancy index over a [`Grid`].
///
/// Holds back-references only: cell rank → occupant and occupant → cell
/// rank. Agent records live elsewhere (the agent pool owns both the records
/// and this index, so cross-structure updates stay atomic).
///
/// The grid is partitioned into square buckets of `bucket_size` cells per
/// side, each carrying an occupancy count. Neighbour scans walk the query
/// window row by row and skip every bucket whose count is zero, so a query
/// costs roughly `O(rows × buckets_per_row + occupied_cells_in_window)`
/// regardless of total population.
///
/// # Examples
///
/// ```
/// use skirmish_core::{AgentId, Pos};
/// use skirmish_space::{Grid, SpatialIndex};
///
/// let mut index = SpatialIndex::new(Grid::new(16, 16).unwrap());
/// index.insert(AgentId(0), Pos::new(3, 3)).unwrap();
/// index.insert(AgentId(1), Pos::new(5, 2)).unwrap();
/// index.insert(AgentId(2), Pos::new(12, 12)).unwrap();
///
/// // Row-major: (5, 2) is on an earlier row than (3, 3).
/// let near = index.neighbors_within(Pos::new(4, 3), 2).unwrap();
/// assert_eq!(near, vec![AgentId(1), AgentId(0)]);
/// ```
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    grid: Grid,
    cells: Vec<Option<AgentId>>,
    locations: IndexMap<AgentId, usize>,
    bucket_size: u32,
    buckets_x: u32,
    bucket_counts: Vec<u32>,
}

impl SpatialIndex {
    /// Create an empty index over `grid` with [`DEFAULT_BUCKET_SIZE`].
    pub fn new(grid: Grid) -> Self {
        Self::with_bucket_size(grid, DEFAULT_BUCKET_SIZE)
    }

    /// Create an empty index with a custom bucket side length.
    ///
    /// A `bucket_size` of 0 is treated as 1.
    pub fn with_bucket_size(grid: Grid, bucket_size: u32) -> Self {
        let bucket_size = bucket_size.max(1);
        let buckets_x = grid.width().div_ceil(bucket_size);
        let buckets_y = grid.height().div_ceil(bucket_size);
        let cells = vec![None; grid.cell_count()];
        Self {
            grid,
            cells,
            locations: IndexMap::new(),
            bucket_size,
            buckets_x,
            bucket_counts: vec![0; (buckets_x as usize) * (buckets_y as usize)],
        }
    }

    // ── Accessors ───────────────────────────────────────────────

    /// The underlying terrain.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Bucket side length in cells.
    pub fn bucket_size(&self) -> u32 {
        self.bucket_size
    }

    /// Number of indexed agents.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether no agent is indexed.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// The agent occupying `pos`, if any. Off-grid cells report `None`.
    pub fn occupant_at(&self, pos: Pos) -> Option<AgentId> {
        self.grid.rank(pos).and_then(|r| self.cells[r])
    }

    /// Whether an agent could be placed on `pos` right now: in bounds, not
    /// an obstacle, and unoccupied.
    pub fn is_free(&self, pos: Pos) -> bool {
        match self.grid.rank(pos) {
            Some(r) => !self.grid.is_obstacle(pos) && self.cells[r].is_none(),
            None => false,
        }
    }

    /// The cell an agent is indexed at.
    pub fn position_of(&self, id: AgentId) -> Option<Pos> {
        self.locations
            .get(&id)
            .and_then(|&rank| self.grid.pos_of(rank))
    }

    /// Whether `id` is indexed.
    pub fn contains(&self, id: AgentId) -> bool {
        self.locations.contains_key(&id)
    }

    // ── Mutation ────────────────────────────────────────────────

    /// Index `id` at `pos`.
    pub fn insert(&mut self, id: AgentId, pos: Pos) -> Result<(), SpaceError> {
        if self.locations.contains_key(&id) {
            return Err(SpaceError::AlreadyIndexed { id });
        }
        let rank = self.check_target(pos)?;
        self.occupy(id, rank);
        Ok(())
    }

    /// Remove `id` from the index, returning the cell it occupied.
    pub fn remove(&mut self, id: AgentId) -> Result<Pos, SpaceError> {
        let rank = self
            .locations
            .swap_remove(&id)
            .ok_or(SpaceError::NotIndexed { id })?;
        self.cells[rank] = None;
        let bucket = self.bucket_of_rank(rank);
        self.bucket_counts[bucket] -= 1;
        self.grid
            .pos_of(rank)
            .ok_or(SpaceError::NotIndexed { id })
    }

    /// Move `id` from `from` to `to`.
    ///
    /// Moving to the cell the agent already occupies is a no-op.
    pub fn move_agent(&mut self, id: AgentId, from: Pos, to: Pos) -> Result<(), SpaceError> {
        let current = *self
            .locations
            .get(&id)
            .ok_or(SpaceError::NotIndexed { id })?;
        let actual = self
            .grid
            .pos_of(current)
            .ok_or(SpaceError::NotIndexed { id })?;
        if actual != from {
            return Err(SpaceError::PositionMismatch {
                id,
                expected: from,
                actual,
            });
        }
        if from == to {
            return Ok(());
        }
        let target = self.check_target(to)?;
        self.vacate(current);
        self.occupy(id, target);
        Ok(())
    }

    /// Relocate several agents as one operation.
    ///
    /// All movers' cells are vacated first, then targets are occupied in
    /// slice order, so swaps and rotations among the movers are legal. The
    /// whole batch is validated before anything changes: every id must be
    /// indexed and appear once, every target must be in bounds, not an
    /// obstacle, claimed once, and either empty or held by another mover.
    pub fn move_batch(&mut self, moves: &[(AgentId, Pos)]) -> Result<(), SpaceError> {
        let mut movers: IndexMap<AgentId, usize> = IndexMap::with_capacity(moves.len());
        for &(id, _) in moves {
            let rank = *self
                .locations
                .get(&id)
                .ok_or(SpaceError::NotIndexed { id })?;
            if movers.insert(id, rank).is_some() {
                return Err(SpaceError::AlreadyIndexed { id });
            }
        }

        let mut targets: Vec<usize> = Vec::with_capacity(moves.len());
        let mut claimed: IndexMap<usize, AgentId> = IndexMap::with_capacity(moves.len());
        for &(id, to) in moves {
            let rank = self.grid.check_bounds(to)?;
            if self.grid.is_obstacle(to) {
                return Err(SpaceError::Obstacle { pos: to });
            }
            if let Some(&other) = claimed.get(&rank) {
                return Err(SpaceError::OccupiedCell {
                    pos: to,
                    occupant: other,
                });
            }
            if let Some(occupant) = self.cells[rank] {
                if !movers.contains_key(&occupant) {
                    return Err(SpaceError::OccupiedCell { pos: to, occupant });
                }
            }
            claimed.insert(rank, id);
            targets.push(rank);
        }

        for &rank in movers.values() {
            self.vacate(rank);
        }
        for (&(id, _), &rank) in moves.iter().zip(&targets) {
            self.occupy(id, rank);
        }
        Ok(())
    }

    /// Remove every agent, keeping terrain.
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.locations.clear();
        self.bucket_counts.fill(0);
    }

    /// Mark `pos` as a permanent obstacle.
    ///
    /// Fails with [`SpaceError::OccupiedCell`] if an agent stands there.
    pub fn set_obstacle(&mut self, pos: Pos) -> Result<(), SpaceError> {
        let rank = self.grid.check_bounds(pos)?;
        if let Some(occupant) = self.cells[rank] {
            return Err(SpaceError::OccupiedCell { pos, occupant });
        }
        self.grid.set_obstacle(pos)
    }

    /// Remove all obstacles.
    pub fn clear_obstacles(&mut self) {
        self.grid.clear_obstacles();
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Agents inside the Chebyshev window of `radius` around `pos`,
    /// clipped to the grid, in row-major cell order.
    ///
    /// The agent at `pos` itself (if any) is included.
    pub fn neighbors_within(&self, pos: Pos, radius: u32) -> Result<Vec<AgentId>, SpaceError> {
        let mut out = Vec::new();
        self.neighbors_within_into(pos, radius, &mut out)?;
        Ok(out)
    }

    /// Allocation-free variant of [`neighbors_within`](Self::neighbors_within).
    ///
    /// `out` is cleared before results are appended.
    pub fn neighbors_within_into(
        &self,
        pos: Pos,
        radius: u32,
        out: &mut Vec<AgentId>,
    ) -> Result<(), SpaceError> {
        out.clear();
        self.scan_window(pos, radius, |id| out.push(id))
    }

    /// Number of agents inside the window of `radius` around `pos`.
    pub fn count_within(&self, pos: Pos, radius: u32) -> Result<usize, SpaceError> {
        let mut n = 0usize;
        self.scan_window(pos, radius, |_| n += 1)?;
        Ok(n)
    }

    /// Verify the cell table, location map and bucket counts agree.
    pub fn check_consistency(&self) -> Result<(), SpaceError> {
        let inconsistent = |detail: String| Err(SpaceError::Inconsistent { detail });

        for (&id, &rank) in &self.locations {
            if self.cells.get(rank).copied().flatten() != Some(id) {
                return inconsistent(format!("agent {id} maps to rank {rank} which does not hold it"));
            }
            if self.grid.pos_of(rank).is_some_and(|p| self.grid.is_obstacle(p)) {
                return inconsistent(format!("agent {id} stands on an obstacle"));
            }
        }
        let occupied = self.cells.iter().filter(|c| c.is_some()).count();
        if occupied != self.locations.len() {
            return inconsistent(format!(
                "{occupied} occupied cells but {} indexed agents",
                self.locations.len()
            ));
        }

        let mut expected = vec![0u32; self.bucket_counts.len()];
        for &rank in self.locations.values() {
            expected[self.bucket_of_rank(rank)] += 1;
        }
        if let Some(b) = (0..expected.len()).find(|&b| expected[b] != self.bucket_counts[b]) {
            return inconsistent(format!(
                "bucket {b} counts {} but holds {}",
                self.bucket_counts[b], expected[b]
            ));
        }
        Ok(())
    }

    // ── Internals ───────────────────────────────────────────────

    fn check_target(&self, pos: Pos) -> Result<usize, SpaceError> {
        let rank = self.grid.check_bounds(pos)?;
        if self.grid.is_obstacle(pos) {
            return Err(SpaceError::Obstacle { pos });
        }
        if let Some(occupant) = self.cells[rank] {
            return Err(SpaceError::OccupiedCell { pos, occupant });
        }
        Ok(rank)
    }

    fn occupy(&mut self, id: AgentId, rank: usize) {
        self.cells[rank] = Some(id);
        self.locations.insert(id, rank);
        let bucket = self.bucket_of_rank(rank);
        self.bucket_counts[bucket] += 1;
    }

    fn vacate(&mut self, rank: usize) {
        if self.cells[rank].take().is_some() {
            let bucket = self.bucket_of_rank(rank);
            self.bucket_counts[bucket] -= 1;
        }
    }

    fn bucket_of_rank(&self, rank: usize) -> usize {
        let w = self.grid.width() as usize;
        let bs = self.bucket_size as usize;
        let (x, y) = (rank % w, rank / w);
        (y / bs) * (self.buckets_x as usize) + x / bs
    }

    /// Visit occupants of the clipped window in row-major order, skipping
    /// empty buckets.
    fn scan_window(
        &self,
        pos: Pos,
        radius: u32,
        mut visit: impl FnMut(AgentId),
    ) -> Result<(), SpaceError> {
        self.grid.check_bounds(pos)?;
        let w = self.grid.width() as i64;
        let h = self.grid.height() as i64;
        let r = radius as i64;
        let x0 = (pos.x as i64 - r).max(0) as usize;
        let x1 = (pos.x as i64 + r).min(w - 1) as usize;
        let y0 = (pos.y as i64 - r).max(0) as usize;
        let y1 = (pos.y as i64 + r).min(h - 1) as usize;

        let bs = self.bucket_size as usize;
        let bx0 = x0 / bs;
        let bx1 = x1 / bs;
        let width = w as usize;

        for y in y0..=y1 {
            let bucket_row = (y / bs) * (self.buckets_x as usize);
            let row_base = y * width;
            for bx in bx0..=bx1 {
                if self.bucket_counts[bucket_row + bx] == 0 {
                    continue;
                }
                let cx0 = x0.max(bx * bs);
                let cx1 = x1.min(bx * bs + bs - 1);
                for cell in &self.cells[row_base + cx0..=row_base + cx1] {
                    if let Some(id) = *cell {
                        visit(id);
                    }
                }
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn bucket_dims(&self) -> (u32, u32) {
        let rows = self.bucket_counts.len() / self.buckets_x as usize;
        (self.buckets_x, rows as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;

    fn p(x: i32, y: i32) -> Pos {
        Pos::new(x, y)
    }

    fn index(w: u32, h: u32) -> SpatialIndex {
        SpatialIndex::new(Grid::new(w, h).unwrap())
    }

    #[test]
    fn insert_and_lookup() {
        let mut idx = index(4, 4);
        idx.insert(AgentId(7), p(2, 1)).unwrap();
        assert_eq!(idx.occupant_at(p(2, 1)), Some(AgentId(7)));
        assert_eq!(idx.position_of(AgentId(7)), Some(p(2, 1)));
        assert_eq!(idx.len(), 1);
        assert!(!idx.is_free(p(2, 1)));
        idx.check_consistency().unwrap();
    }

    #[test]
    fn insert_rejects_occupied_out_of_bounds_and_obstacle() {
        let mut idx = index(3, 3);
        idx.set_obstacle(p(1, 1)).unwrap();
        idx.insert(AgentId(0), p(0, 0)).unwrap();

        assert_eq!(
            idx.insert(AgentId(1), p(0, 0)),
            Err(SpaceError::OccupiedCell {
                pos: p(0, 0),
                occupant: AgentId(0)
            })
        );
        assert_eq!(
            idx.insert(AgentId(1), p(1, 1)),
            Err(SpaceError::Obstacle { pos: p(1, 1) })
        );
        assert!(matches!(
            idx.insert(AgentId(1), p(3, 0)),
            Err(SpaceError::OutOfBounds { .. })
        ));
        assert_eq!(
            idx.insert(AgentId(0), p(2, 2)),
            Err(SpaceError::AlreadyIndexed { id: AgentId(0) })
        );
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn remove_frees_cell() {
        let mut idx = index(3, 3);
        idx.insert(AgentId(0), p(1, 2)).unwrap();
        assert_eq!(idx.remove(AgentId(0)), Ok(p(1, 2)));
        assert!(idx.is_free(p(1, 2)));
        assert_eq!(
            idx.remove(AgentId(0)),
            Err(SpaceError::NotIndexed { id: AgentId(0) })
        );
        idx.check_consistency().unwrap();
    }

    #[test]
    fn move_agent_checks_from() {
        let mut idx = index(3, 3);
        idx.insert(AgentId(0), p(0, 0)).unwrap();
        assert_eq!(
            idx.move_agent(AgentId(0), p(1, 0), p(2, 0)),
            Err(SpaceError::PositionMismatch {
                id: AgentId(0),
                expected: p(1, 0),
                actual: p(0, 0)
            })
        );
        idx.move_agent(AgentId(0), p(0, 0), p(2, 0)).unwrap();
        assert_eq!(idx.occupant_at(p(2, 0)), Some(AgentId(0)));
        assert_eq!(idx.occupant_at(p(0, 0)), None);
        idx.check_consistency().unwrap();
    }

    #[test]
    fn move_agent_in_place_is_noop() {
        let mut idx = index(2, 2);
        idx.insert(AgentId(3), p(1, 1)).unwrap();
        idx.move_agent(AgentId(3), p(1, 1), p(1, 1)).unwrap();
        assert_eq!(idx.occupant_at(p(1, 1)), Some(AgentId(3)));
    }

    #[test]
    fn move_into_occupied_fails_without_mutation() {
        let mut idx = index(3, 1);
        idx.insert(AgentId(0), p(0, 0)).unwrap();
        idx.insert(AgentId(1), p(1, 0)).unwrap();
        assert!(idx.move_agent(AgentId(0), p(0, 0), p(1, 0)).is_err());
        assert_eq!(idx.occupant_at(p(0, 0)), Some(AgentId(0)));
        assert_eq!(idx.occupant_at(p(1, 0)), Some(AgentId(1)));
    }

    #[test]
    fn batch_swap_succeeds() {
        let mut idx = index(2, 2);
        idx.insert(AgentId(0), p(0, 0)).unwrap();
        idx.insert(AgentId(1), p(1, 0)).unwrap();
        idx.move_batch(&[(AgentId(0), p(1, 0)), (AgentId(1), p(0, 0))])
            .unwrap();
        assert_eq!(idx.occupant_at(p(1, 0)), Some(AgentId(0)));
        assert_eq!(idx.occupant_at(p(0, 0)), Some(AgentId(1)));
        idx.check_consistency().unwrap();
    }

    #[test]
    fn batch_rejects_stationary_occupant_atomically() {
        let mut idx = index(3, 1);
        idx.insert(AgentId(0), p(0, 0)).unwrap();
        idx.insert(AgentId(1), p(1, 0)).unwrap();
        idx.insert(AgentId(2), p(2, 0)).unwrap();
        // 0 follows 1, but 1 walks into 2 which stays.
        let err = idx
            .move_batch(&[(AgentId(0), p(1, 0)), (AgentId(1), p(2, 0))])
            .unwrap_err();
        assert_eq!(
            err,
            SpaceError::OccupiedCell {
                pos: p(2, 0),
                occupant: AgentId(2)
            }
        );
        assert_eq!(idx.position_of(AgentId(0)), Some(p(0, 0)));
        assert_eq!(idx.position_of(AgentId(1)), Some(p(1, 0)));
        idx.check_consistency().unwrap();
    }

    #[test]
    fn batch_rejects_double_claim() {
        let mut idx = index(3, 1);
        idx.insert(AgentId(0), p(0, 0)).unwrap();
        idx.insert(AgentId(1), p(2, 0)).unwrap();
        assert!(idx
            .move_batch(&[(AgentId(0), p(1, 0)), (AgentId(1), p(1, 0))])
            .is_err());
        assert!(idx.is_free(p(1, 0)));
    }

    #[test]
    fn neighbors_clip_at_edges() {
        let mut idx = index(5, 5);
        idx.insert(AgentId(0), p(0, 0)).unwrap();
        idx.insert(AgentId(1), p(4, 4)).unwrap();
        idx.insert(AgentId(2), p(1, 0)).unwrap();
        assert_eq!(
            idx.neighbors_within(p(0, 0), 1).unwrap(),
            vec![AgentId(0), AgentId(2)]
        );
        assert_eq!(idx.count_within(p(2, 2), 2).unwrap(), 3);
        assert_eq!(idx.count_within(p(2, 2), 0).unwrap(), 0);
    }

    #[test]
    fn neighbors_centre_off_grid_fails() {
        let idx = index(4, 4);
        assert!(matches!(
            idx.neighbors_within(p(-1, 0), 2),
            Err(SpaceError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn neighbors_span_bucket_boundaries() {
        let mut idx = SpatialIndex::with_bucket_size(Grid::new(10, 10).unwrap(), 3);
        assert_eq!(idx.bucket_dims(), (4, 4));
        let spots = [p(2, 2), p(3, 2), p(5, 4), p(6, 6), p(9, 9)];
        for (i, &s) in spots.iter().enumerate() {
            idx.insert(AgentId(i as u64), s).unwrap();
        }
        compliance::assert_matches_brute_force(&idx, p(4, 4), 2);
        compliance::assert_matches_brute_force(&idx, p(9, 9), 9);
        compliance::assert_matches_brute_force(&idx, p(0, 0), 3);
    }

    #[test]
    fn set_obstacle_under_agent_fails() {
        let mut idx = index(2, 2);
        idx.insert(AgentId(0), p(1, 1)).unwrap();
        assert!(matches!(
            idx.set_obstacle(p(1, 1)),
            Err(SpaceError::OccupiedCell { .. })
        ));
        assert!(!idx.grid().is_obstacle(p(1, 1)));
    }

    #[test]
    fn clear_keeps_terrain() {
        let mut idx = index(3, 3);
        idx.set_obstacle(p(0, 0)).unwrap();
        idx.insert(AgentId(0), p(1, 1)).unwrap();
        idx.clear();
        assert!(idx.is_empty());
        assert!(idx.grid().is_obstacle(p(0, 0)));
        idx.check_consistency().unwrap();
    }

    #[test]
    fn zero_bucket_size_is_clamped() {
        let idx = SpatialIndex::with_bucket_size(Grid::new(3, 2).unwrap(), 0);
        assert_eq!(idx.bucket_size(), 1);
        assert_eq!(idx.bucket_dims(), (3, 2));
    }
}

//! Strongly-typed identifiers and the [`Pos`] grid coordinate.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

use crate::action::Direction;

/// Identifies one agent for the lifetime of a run.
///
/// Ids are allocated from a monotonic counter by the agent pool and are
/// never reissued while the simulation runs, so an id seen in one tick's
/// rewards can never alias a different agent in a later tick.
///
/// Ascending `AgentId` order is the canonical iteration order used for
/// every conflict resolution in the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AgentId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies a group (team) of agents.
///
/// Groups are declared in the world configuration; `GroupId(n)`
/// corresponds to the n-th declared group.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GroupId(pub u32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for GroupId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl GroupId {
    /// The group's position in the configuration, usable as a slice index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Monotonically increasing tick counter.
///
/// Zero after construction or reset; incremented once per completed step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl TickId {
    /// The tick following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Cells visited by a straight move, excluding the starting cell.
///
/// Moves rarely exceed a handful of cells, so the path stays inline.
pub type Path = SmallVec<[Pos; 4]>;

/// A cell coordinate on the 2D grid.
///
/// `x` grows eastward (columns), `y` grows southward (rows). Coordinates
/// are signed so that offsets past the grid edge can be represented and
/// rejected explicitly instead of wrapping.
///
/// Ordering is row-major (`y` first, then `x`), matching the canonical
/// cell scan order of the spatial index.
///
/// # Examples
///
/// ```
/// use skirmish_core::Pos;
///
/// let a = Pos::new(3, 0);
/// let b = Pos::new(0, 1);
/// // Row-major: everything on row 0 sorts before row 1.
/// assert!(a < b);
/// assert_eq!(a.offset(1, 2), Pos::new(4, 2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Pos {
    /// Construct a position from column and row.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position displaced by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// The position one step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        self.offset(dx, dy)
    }

    /// The cell reached by moving `distance` cells in `direction`,
    /// computed without walking the path.
    pub fn travel(self, direction: Direction, distance: u32) -> Self {
        let (dx, dy) = direction.offset();
        let d = i32::try_from(distance).unwrap_or(i32::MAX);
        self.offset(dx.saturating_mul(d), dy.saturating_mul(d))
    }

    /// Every cell entered by moving `distance` cells in `direction`,
    /// in travel order. The last element is the destination.
    pub fn path(self, direction: Direction, distance: u32) -> Path {
        let mut out = Path::new();
        let mut cur = self;
        for _ in 0..distance {
            cur = cur.step(direction);
            out.push(cur);
        }
        out
    }

    /// Chebyshev (king-move) distance to `other`.
    pub fn chebyshev(self, other: Pos) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Pos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for Pos {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pos_orders_row_major() {
        let mut cells = vec![Pos::new(1, 1), Pos::new(0, 1), Pos::new(2, 0), Pos::new(0, 0)];
        cells.sort();
        assert_eq!(
            cells,
            vec![Pos::new(0, 0), Pos::new(2, 0), Pos::new(0, 1), Pos::new(1, 1)]
        );
    }

    #[test]
    fn path_lists_every_entered_cell() {
        let p = Pos::new(2, 2).path(Direction::West, 3);
        assert_eq!(p.as_slice(), &[Pos::new(1, 2), Pos::new(0, 2), Pos::new(-1, 2)]);
    }

    #[test]
    fn travel_matches_path_end() {
        let p = Pos::new(2, 2);
        for d in Direction::ALL {
            assert_eq!(p.travel(d, 3), *p.path(d, 3).last().unwrap());
        }
        assert_eq!(p.travel(Direction::East, u32::MAX), Pos::new(i32::MAX, 2));
        assert_eq!(p.travel(Direction::North, 0), p);
    }

    #[test]
    fn zero_distance_path_is_empty() {
        assert!(Pos::new(0, 0).path(Direction::North, 0).is_empty());
    }

    #[test]
    fn tick_next_increments() {
        assert_eq!(TickId(4).next(), TickId(5));
    }

    #[test]
    fn display_formats() {
        assert_eq!(format!("{}", Pos::new(-1, 7)), "(-1, 7)");
        assert_eq!(format!("{}", AgentId(12)), "12");
        assert_eq!(format!("{}", GroupId(3)), "3");
    }

    proptest! {
        #[test]
        fn ordering_matches_rank(ax in 0i32..50, ay in 0i32..50, bx in 0i32..50, by in 0i32..50) {
            let a = Pos::new(ax, ay);
            let b = Pos::new(bx, by);
            let rank = |p: Pos| p.y * 50 + p.x;
            prop_assert_eq!(a.cmp(&b), rank(a).cmp(&rank(b)));
        }

        #[test]
        fn chebyshev_is_symmetric(ax in -20i32..20, ay in -20i32..20, bx in -20i32..20, by in -20i32..20) {
            let a = Pos::new(ax, ay);
            let b = Pos::new(bx, by);
            prop_assert_eq!(a.chebyshev(b), b.chebyshev(a));
        }
    }
}

//! Agent actions, facing directions and rotations.

use serde::{Deserialize, Serialize};

/// Cardinal direction, used both for movement and for agent facing.
///
/// North is toward row 0 (`y - 1`), east toward higher columns (`x + 1`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Direction {
    /// Toward row 0.
    #[default]
    North = 0,
    /// Toward the last column.
    East = 1,
    /// Toward the last row.
    South = 2,
    /// Toward column 0.
    West = 3,
}

impl Direction {
    /// All directions in clockwise order starting at north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Returns the `(dx, dy)` unit offset for this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Clockwise index in `0..4`, suitable for one-hot encoding.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction for a clockwise index; `None` outside `0..4`.
    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    /// The facing after applying `rotation`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skirmish_core::{Direction, Rotation};
    ///
    /// assert_eq!(Direction::North.turned(Rotation::Right), Direction::East);
    /// assert_eq!(Direction::North.turned(Rotation::Left), Direction::West);
    /// ```
    pub fn turned(self, rotation: Rotation) -> Self {
        let i = self.index();
        let j = match rotation {
            Rotation::Left => (i + 3) % 4,
            Rotation::Right => (i + 1) % 4,
        };
        Self::ALL[j]
    }

    /// Rotate a world-frame offset into the frame of an agent facing `self`,
    /// where the agent's forward is local `(0, -1)`.
    pub fn to_local(self, dx: i32, dy: i32) -> (i32, i32) {
        match self {
            Direction::North => (dx, dy),
            Direction::East => (dy, -dx),
            Direction::South => (-dx, -dy),
            Direction::West => (-dy, dx),
        }
    }

    /// Inverse of [`to_local`](Self::to_local).
    pub fn to_world(self, lx: i32, ly: i32) -> (i32, i32) {
        match self {
            Direction::North => (lx, ly),
            Direction::East => (-ly, lx),
            Direction::South => (-lx, -ly),
            Direction::West => (ly, -lx),
        }
    }
}

/// A quarter turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// Counter-clockwise.
    Left,
    /// Clockwise.
    Right,
}

/// A per-agent intent for one tick.
///
/// Actions are untrusted input: a move farther than the agent's speed or an
/// attack outside its range is not an error, it simply resolves as a no-op.
///
/// # Examples
///
/// ```
/// use skirmish_core::{Action, ActionKind, Direction};
///
/// let a = Action::Move { direction: Direction::East, distance: 1 };
/// assert_eq!(a.kind(), ActionKind::Move);
/// assert_eq!(Action::default(), Action::Noop);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Action {
    /// Do nothing this tick.
    #[default]
    Noop,
    /// Move in a straight line.
    Move {
        /// Direction of travel.
        direction: Direction,
        /// Number of cells to travel. Must be in `1..=speed`.
        distance: u32,
    },
    /// Rotate in place.
    Turn(Rotation),
    /// Attack the cell at `(dx, dy)` relative to the attacker's position
    /// after movement.
    Attack {
        /// Column offset.
        dx: i32,
        /// Row offset.
        dy: i32,
    },
}

impl Action {
    /// The action's category.
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Noop => ActionKind::Noop,
            Action::Move { .. } => ActionKind::Move,
            Action::Turn(_) => ActionKind::Turn,
            Action::Attack { .. } => ActionKind::Attack,
        }
    }
}

/// Category of an [`Action`], carried in resolution outcomes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// No action, or an action that was not submitted.
    #[default]
    Noop,
    /// A move intent.
    Move,
    /// A turn.
    Turn,
    /// An attack intent.
    Attack,
}

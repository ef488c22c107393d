//! Observation specification types.
//!
//! An [`ObsSpec`] describes what one group of agents sees: how far, in
//! which shape, in which reference frame, and how many neighbour tuples
//! are reported.

use serde::{Deserialize, Serialize};

/// Largest supported view range. Keeps `side²` allocations bounded.
pub const MAX_VIEW_RANGE: u32 = 255;

/// Outline of the visible region inside the square window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewShape {
    /// Every cell of the `(2r+1)²` window.
    #[default]
    Square,
    /// Only cells with `dx² + dy² <= r²`; cells outside the disc of radius
    /// `r` are masked.
    Circle,
}

impl ViewShape {
    /// Whether the offset `(dx, dy)` lies inside the shape of radius `r`.
    pub fn contains(self, dx: i32, dy: i32, r: u32) -> bool {
        let r = r as i64;
        let (dx, dy) = (dx as i64, dy as i64);
        match self {
            ViewShape::Square => dx.abs() <= r && dy.abs() <= r,
            ViewShape::Circle => dx * dx + dy * dy <= r * r,
        }
    }
}

/// Reference frame for the window and neighbour offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewFrame {
    /// Row 0 is the northmost row regardless of facing.
    #[default]
    World,
    /// The window is rotated so the agent always faces row 0.
    Egocentric,
}

/// Per-group observation settings.
///
/// # Examples
///
/// ```
/// use skirmish_obs::{ObsSpec, ViewShape, ViewFrame};
///
/// let spec = ObsSpec {
///     view_range: 3,
///     shape: ViewShape::Circle,
///     frame: ViewFrame::Egocentric,
///     max_neighbors: Some(8),
/// };
/// assert_eq!(spec.side(), 7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObsSpec {
    /// Chebyshev radius of the window.
    pub view_range: u32,
    /// Visible outline.
    pub shape: ViewShape,
    /// Reference frame.
    pub frame: ViewFrame,
    /// Cap on reported neighbour tuples; `None` reports all.
    pub max_neighbors: Option<usize>,
}

impl Default for ObsSpec {
    fn default() -> Self {
        Self {
            view_range: 5,
            shape: ViewShape::Square,
            frame: ViewFrame::World,
            max_neighbors: None,
        }
    }
}

impl ObsSpec {
    /// Window side length, `2 * view_range + 1`.
    pub fn side(&self) -> usize {
        2 * self.view_range as usize + 1
    }
}

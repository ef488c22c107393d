//! The per-agent observation value.

use skirmish_core::{AgentId, GroupId};

/// Length of [`Observation::features`].
///
/// `[hp / hp_max, facing one-hot × 4, x / (width-1), y / (height-1), tick / max_ticks]`
pub const FEATURE_LEN: usize = 8;

/// Channel holding walls (obstacles and off-grid cells).
pub const WALL_CHANNEL: usize = 0;

/// Number of window channels for `groups` declared groups.
///
/// One wall channel plus a presence and an hp-fraction channel per group.
pub fn channel_count(groups: usize) -> usize {
    1 + 2 * groups
}

/// Presence channel for agents of `other` as seen by an observer in
/// `observer`. The hp-fraction channel is the next one.
///
/// The observer's own group always occupies channels 1 and 2; the other
/// groups follow in ascending id order.
pub fn presence_channel(observer: GroupId, other: GroupId) -> usize {
    let slot = match other.cmp(&observer) {
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Less => other.index() + 1,
        std::cmp::Ordering::Greater => other.index(),
    };
    1 + 2 * slot
}

/// One visible agent, as reported to the observer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeighborInfo {
    /// The neighbour's id.
    pub id: AgentId,
    /// Column offset in the observer's frame.
    pub dx: i32,
    /// Row offset in the observer's frame.
    pub dy: i32,
    /// The neighbour's group.
    pub group: GroupId,
    /// The neighbour's current hp.
    pub hp: f32,
}

/// Snapshot handed to one agent for one tick.
///
/// `window` is laid out `[row][col][channel]` with `side × side × channels`
/// elements. `valid_mask` has one entry per cell, `true` where the cell is
/// both on the grid and inside the view shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    /// Window side length.
    pub side: usize,
    /// Channels per cell.
    pub channels: usize,
    /// Flattened window tensor.
    pub window: Vec<f32>,
    /// Per-cell validity.
    pub valid_mask: Vec<bool>,
    /// Visible agents in row-major scan order, excluding the observer.
    pub neighbors: Vec<NeighborInfo>,
    /// Self features, [`FEATURE_LEN`] long.
    pub features: Vec<f32>,
}

impl Observation {
    /// Value at `(row, col, channel)`.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is out of range.
    pub fn at(&self, row: usize, col: usize, channel: usize) -> f32 {
        assert!(row < self.side && col < self.side && channel < self.channels);
        self.window[(row * self.side + col) * self.channels + channel]
    }

    /// Whether cell `(row, col)` is valid.
    pub fn is_valid(&self, row: usize, col: usize) -> bool {
        self.valid_mask[row * self.side + col]
    }

    /// Shape of the window tensor as `[side, side, channels]`.
    pub fn shape(&self) -> [usize; 3] {
        [self.side, self.side, self.channels]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_group_first_then_others_ascending() {
        // Observer in group 1 of 3.
        assert_eq!(presence_channel(GroupId(1), GroupId(1)), 1);
        assert_eq!(presence_channel(GroupId(1), GroupId(0)), 3);
        assert_eq!(presence_channel(GroupId(1), GroupId(2)), 5);
        // Observer in group 0.
        assert_eq!(presence_channel(GroupId(0), GroupId(0)), 1);
        assert_eq!(presence_channel(GroupId(0), GroupId(1)), 3);
        assert_eq!(presence_channel(GroupId(0), GroupId(2)), 5);
        assert_eq!(channel_count(3), 7);
    }

    #[test]
    fn at_indexes_hwc() {
        let obs = Observation {
            side: 2,
            channels: 3,
            window: (0..12).map(|v| v as f32).collect(),
            valid_mask: vec![true; 4],
            neighbors: Vec::new(),
            features: vec![0.0; FEATURE_LEN],
        };
        assert_eq!(obs.at(1, 0, 2), 8.0);
        assert_eq!(obs.shape(), [2, 2, 3]);
    }
}

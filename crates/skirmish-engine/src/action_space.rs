//! Discrete action indexing for learning frontends.
//!
//! Each group gets a flat enumeration of every action its rules allow:
//!
//! ```text
//! 0                       Noop
//! 1 ..= 4*speed           Move { dir, dist } for dir in N,E,S,W, dist in 1..=speed
//! next two                Turn Left, Turn Right
//! remaining               Attack offsets, row-major over the Chebyshev square
//!                         of radius attack_range, skipping (0, 0)
//! ```

use skirmish_core::{Action, Direction, Rotation};

/// The discrete action enumeration for one group.
///
/// # Examples
///
/// ```
/// use skirmish_core::{Action, Direction};
/// use skirmish_engine::ActionSpace;
///
/// let space = ActionSpace::for_group(1, 1);
/// // Noop + 4 moves + 2 turns + 8 attacks.
/// assert_eq!(space.len(), 15);
/// assert_eq!(space.decode(0), Some(Action::Noop));
/// assert_eq!(
///     space.decode(2),
///     Some(Action::Move { direction: Direction::East, distance: 1 })
/// );
/// assert_eq!(space.decode(99), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionSpace {
    actions: Vec<Action>,
}

impl ActionSpace {
    /// Enumerate the actions for a group with the given rules.
    pub fn for_group(speed: u32, attack_range: u32) -> Self {
        let mut actions = Vec::with_capacity(1 + 4 * speed as usize + 2);
        actions.push(Action::Noop);
        for direction in Direction::ALL {
            for distance in 1..=speed {
                actions.push(Action::Move {
                    direction,
                    distance,
                });
            }
        }
        actions.push(Action::Turn(Rotation::Left));
        actions.push(Action::Turn(Rotation::Right));
        let r = attack_range as i32;
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx, dy) != (0, 0) {
                    actions.push(Action::Attack { dx, dy });
                }
            }
        }
        Self { actions }
    }

    /// Number of discrete actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Always `false`: `Noop` is always present.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The action at `index`, or `None` if out of range.
    pub fn decode(&self, index: u32) -> Option<Action> {
        self.actions.get(index as usize).copied()
    }

    /// Like [`decode`](Self::decode), mapping out-of-range indices to `Noop`.
    pub fn decode_or_noop(&self, index: u32) -> Action {
        self.decode(index).unwrap_or(Action::Noop)
    }

    /// The index of `action`, if this space contains it.
    pub fn encode(&self, action: Action) -> Option<u32> {
        self.actions
            .iter()
            .position(|a| *a == action)
            .map(|i| i as u32)
    }

    /// All actions in index order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_order() {
        let space = ActionSpace::for_group(2, 1);
        assert_eq!(space.len(), 1 + 8 + 2 + 8);
        assert_eq!(
            space.decode(1),
            Some(Action::Move {
                direction: Direction::North,
                distance: 1
            })
        );
        assert_eq!(
            space.decode(2),
            Some(Action::Move {
                direction: Direction::North,
                distance: 2
            })
        );
        assert_eq!(space.decode(9), Some(Action::Turn(Rotation::Left)));
        assert_eq!(space.decode(10), Some(Action::Turn(Rotation::Right)));
        assert_eq!(space.decode(11), Some(Action::Attack { dx: -1, dy: -1 }));
        assert_eq!(space.decode(18), Some(Action::Attack { dx: 1, dy: 1 }));
    }

    #[test]
    fn encode_inverts_decode() {
        let space = ActionSpace::for_group(3, 2);
        for (i, a) in space.actions().iter().enumerate() {
            assert_eq!(space.encode(*a), Some(i as u32));
        }
        assert_eq!(space.encode(Action::Attack { dx: 3, dy: 0 }), None);
    }

    #[test]
    fn no_attacks_without_range() {
        let space = ActionSpace::for_group(1, 0);
        assert_eq!(space.len(), 7);
        assert!(!space
            .actions()
            .iter()
            .any(|a| matches!(a, Action::Attack { .. })));
        assert_eq!(space.decode_or_noop(7), Action::Noop);
    }
}

//! Reference checks for the spatial index.
//!
//! Brute-force scans used as oracles by unit tests in this crate.

use skirmish_core::{AgentId, Pos};

use crate::index::SpatialIndex;

/// Occupants of the clipped Chebyshev window, found by visiting every cell
/// of the window in row-major order without using buckets.
pub fn brute_force_window(index: &SpatialIndex, centre: Pos, radius: u32) -> Vec<AgentId> {
    let r = radius as i32;
    let mut out = Vec::new();
    for y in centre.y.saturating_sub(r)..=centre.y.saturating_add(r) {
        for x in centre.x.saturating_sub(r)..=centre.x.saturating_add(r) {
            if let Some(id) = index.occupant_at(Pos::new(x, y)) {
                out.push(id);
            }
        }
    }
    out
}

/// Assert the bucketed scan returns exactly the brute-force result.
pub fn assert_matches_brute_force(index: &SpatialIndex, centre: Pos, radius: u32) {
    let fast = index
        .neighbors_within(centre, radius)
        .expect("centre must be in bounds");
    let slow = brute_force_window(index, centre, radius);
    assert_eq!(
        fast, slow,
        "neighbors_within({centre}, {radius}) disagrees with brute-force scan"
    );
    let count = index
        .count_within(centre, radius)
        .expect("centre must be in bounds");
    assert_eq!(count, slow.len(), "count_within({centre}, {radius}) wrong");
}

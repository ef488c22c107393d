//! State hashing for determinism checks.
//!
//! Uses FNV-1a for fast, deterministic hashing of the agent population.
//! These hashes are not cryptographically secure; they exist so that two
//! runs can be compared tick by tick without storing full snapshots.

use skirmish_arena::AgentPool;
use skirmish_core::TickId;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u32(mut hash: u64, v: u32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Hash the tick and every living agent in ascending id order.
///
/// Each agent contributes its id, group, position, facing and the bit
/// pattern of its hp, so any divergence in resolution shows up here.
pub fn state_hash(pool: &AgentPool, tick: TickId) -> u64 {
    let mut hash = fnv1a_u64(FNV_OFFSET, tick.0);
    hash = fnv1a_u64(hash, pool.alive_count() as u64);
    for a in pool.iter() {
        hash = fnv1a_u64(hash, a.id.0);
        hash = fnv1a_u32(hash, a.group.0);
        hash = fnv1a_u32(hash, a.pos.x as u32);
        hash = fnv1a_u32(hash, a.pos.y as u32);
        hash = fnv1a_byte(hash, a.orientation.index() as u8);
        hash = fnv1a_u32(hash, a.hp.to_bits());
    }
    hash
}

//! Grid terrain and spatial occupancy for skirmish simulations.
//!
//! [`Grid`] owns the fixed cell space and its permanent obstacles.
//! [`SpatialIndex`] layers a cell → agent occupancy table on top of it,
//! partitioned into square buckets so neighbour scans skip empty space.
//!
//! # Ordering
//!
//! Every query that returns more than one agent reports them in row-major
//! cell order (`y` ascending, then `x` ascending). Callers rely on this for
//! reproducible tie-breaking.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod index;

#[cfg(test)]
pub(crate) mod compliance;

pub use error::SpaceError;
pub use grid::Grid;
pub use index::{SpatialIndex, DEFAULT_BUCKET_SIZE};

//! Per-agent observations for skirmish simulations.
//!
//! Each living agent receives an [`Observation`]: a square window of
//! terrain and occupancy channels centred on it, a validity mask, tuples
//! describing visible agents, and a short self-feature vector. What a group
//! sees is configured by an [`ObsSpec`]; [`ObservationBuilder`] turns a
//! read-only [`AgentPool`](skirmish_arena::AgentPool) into observations,
//! optionally across rayon workers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod error;
pub mod geometry;
pub mod observation;
pub mod spec;

pub use builder::{ObservationBuilder, DEFAULT_PARALLEL_THRESHOLD};
pub use error::ObsError;
pub use geometry::Window;
pub use observation::{
    channel_count, presence_channel, NeighborInfo, Observation, FEATURE_LEN, WALL_CHANNEL,
};
pub use spec::{ObsSpec, ViewFrame, ViewShape, MAX_VIEW_RANGE};

//! Agent storage for skirmish simulations.
//!
//! [`AgentPool`] is the single owner of agent state. It also owns the
//! [`SpatialIndex`](skirmish_space::SpatialIndex), so that every update that
//! touches both an agent record and its cell happens as one operation:
//!
//! ```text
//! AgentPool
//! ├── BTreeMap<AgentId, Agent>   (records, ascending id = canonical order)
//! ├── SpatialIndex               (cell ↔ agent back-references)
//! │   └── Grid                   (terrain)
//! └── group counts, id counter, capacity
//! ```
//!
//! Readers receive [`AgentView`] copies and never borrow records.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod error;
pub mod pool;

pub use agent::{AgentView, DamageOutcome, SpawnAttrs};
pub use error::PoolError;
pub use pool::AgentPool;

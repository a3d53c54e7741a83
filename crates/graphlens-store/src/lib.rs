//! GraphLens Store — volatile storage for submitted graphs.
//!
//! Every graph a caller submits lives here under a generated id together
//! with its display settings and derived metadata. Writes are last-write-wins;
//! nothing survives the process.

pub mod queries;
pub mod records;
pub mod store;

pub use queries::{GraphQuery, QueryStats};
pub use records::{GraphMetadata, GraphSummary, GraphUpdate, StoredGraph};
pub use store::{GraphStore, MemoryGraphStore, StoreError};

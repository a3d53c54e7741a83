//! GraphLens front end: the stdio tool server and the one-shot commands
//! behind the `graphlens` binary.

pub mod report;
pub mod server;
pub mod tools;

pub use report::{filter_report, FilterReport};
pub use server::serve;
pub use tools::{ToolError, ToolRequest, ToolServer};

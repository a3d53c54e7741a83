//! graphlens-core: Shared types, configuration, and error handling for GraphLens.
//!
//! This crate provides the foundational types used across all GraphLens components:
//! - Entities and relationships making up a submitted graph
//! - The catalogue of visualization types a graph can be rendered as
//! - Layered configuration
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::LensConfig;
pub use error::GraphLensError;
pub use types::{Entity, Graph, Properties, Relationship, VisualizationInfo, VisualizationType};

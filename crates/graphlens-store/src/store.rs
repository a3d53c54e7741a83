//! Graph storage trait and the in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use graphlens_core::{Graph, VisualizationType};

use crate::queries::{run_query, GraphQuery};
use crate::records::{GraphSummary, GraphUpdate, StoredGraph};

/// Errors that can occur during graph storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Graph not found: {0}")]
    NotFound(String),

    #[error("Invalid graph format: {0}")]
    InvalidGraph(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Trait for graph storage backends.
pub trait GraphStore {
    /// Store a new graph under a freshly generated id.
    fn create(
        &self,
        graph: Graph,
        visualization_type: VisualizationType,
        title: String,
    ) -> Result<(String, StoredGraph), StoreError>;

    /// Retrieve a stored graph by id.
    fn get(&self, id: &str) -> Result<StoredGraph, StoreError>;

    /// Summaries of every stored graph, in creation order.
    fn list(&self) -> Result<Vec<GraphSummary>, StoreError>;

    /// Patch a stored graph. Omitted fields keep their previous value.
    fn update(&self, id: &str, update: GraphUpdate) -> Result<StoredGraph, StoreError>;

    /// Remove a stored graph.
    fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Run a single-shot query against a stored graph.
    fn query(&self, id: &str, query: &GraphQuery) -> Result<Graph, StoreError> {
        let stored = self.get(id)?;
        Ok(run_query(&stored.graph, query))
    }
}

#[derive(Default)]
struct Inner {
    graphs: HashMap<String, StoredGraph>,
    /// Ids in creation order.
    order: Vec<String>,
    counter: u64,
}

/// Process-local graph store.
///
/// Ids are `graph_1`, `graph_2`, ... and are never reused. Clone is cheap
/// (inner Arc); clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryGraphStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GraphStore for MemoryGraphStore {
    fn create(
        &self,
        graph: Graph,
        visualization_type: VisualizationType,
        title: String,
    ) -> Result<(String, StoredGraph), StoreError> {
        let stored = StoredGraph::new(graph, visualization_type, title);

        let mut inner = self.inner.write();
        inner.counter += 1;
        let id = format!("graph_{}", inner.counter);
        inner.graphs.insert(id.clone(), stored.clone());
        inner.order.push(id.clone());

        tracing::info!(
            graph_id = %id,
            entities = stored.metadata.entity_count,
            relationships = stored.metadata.relationship_count,
            visualization = %stored.visualization_type,
            "Graph stored"
        );

        Ok((id, stored))
    }

    fn get(&self, id: &str) -> Result<StoredGraph, StoreError> {
        self.inner
            .read()
            .graphs
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list(&self) -> Result<Vec<GraphSummary>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.graphs.get(id).map(|g| g.summary(id)))
            .collect())
    }

    fn update(&self, id: &str, update: GraphUpdate) -> Result<StoredGraph, StoreError> {
        let mut inner = self.inner.write();
        let stored = inner
            .graphs
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let replaced_graph = update.graph.is_some();
        stored.apply(update);

        tracing::info!(
            graph_id = %id,
            replaced_graph,
            visualization = %stored.visualization_type,
            "Graph updated"
        );

        Ok(stored.clone())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        if inner.graphs.remove(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        inner.order.retain(|existing| existing != id);

        tracing::info!(graph_id = %id, "Graph deleted");
        Ok(())
    }
}

//! Stored graph records and graph input validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use graphlens_core::{Graph, VisualizationType};

use crate::store::StoreError;

/// Derived facts about a stored graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GraphMetadata {
    pub entity_count: usize,
    pub relationship_count: usize,
    /// Distinct entity types, first-seen order.
    pub entity_types: Vec<String>,
    /// Distinct relationship types, first-seen order.
    pub relationship_types: Vec<String>,
}

impl GraphMetadata {
    pub fn of(graph: &Graph) -> Self {
        Self {
            entity_count: graph.entity_count(),
            relationship_count: graph.relationship_count(),
            entity_types: graph.entity_types(),
            relationship_types: graph.relationship_types(),
        }
    }
}

/// A graph plus its display settings, as held by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredGraph {
    pub graph: Graph,
    pub visualization_type: VisualizationType,
    pub title: String,
    /// Time of the last write, serialized as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub metadata: GraphMetadata,
}

impl StoredGraph {
    pub fn new(graph: Graph, visualization_type: VisualizationType, title: String) -> Self {
        let metadata = GraphMetadata::of(&graph);
        Self {
            graph,
            visualization_type,
            title,
            timestamp: Utc::now(),
            metadata,
        }
    }

    /// Apply a partial update. Omitted fields and empty titles keep their value;
    /// metadata is only recomputed when a new graph is supplied.
    pub fn apply(&mut self, update: GraphUpdate) {
        if let Some(graph) = update.graph {
            self.metadata = GraphMetadata::of(&graph);
            self.graph = graph;
        }
        if let Some(visualization_type) = update.visualization_type {
            self.visualization_type = visualization_type;
        }
        if let Some(title) = update.title.filter(|t| !t.is_empty()) {
            self.title = title;
        }
        self.timestamp = Utc::now();
    }

    pub fn summary(&self, graph_id: &str) -> GraphSummary {
        GraphSummary {
            graph_id: graph_id.to_string(),
            title: self.title.clone(),
            visualization_type: self.visualization_type,
            timestamp: self.timestamp,
            metadata: self.metadata.clone(),
        }
    }
}

/// Listing entry for a stored graph (everything but the graph body).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphSummary {
    pub graph_id: String,
    pub title: String,
    pub visualization_type: VisualizationType,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub metadata: GraphMetadata,
}

/// Partial replacement of a stored graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphUpdate {
    pub graph: Option<Graph>,
    pub visualization_type: Option<VisualizationType>,
    pub title: Option<String>,
}

/// Decode a caller-supplied graph, rejecting input without both arrays.
pub fn graph_from_value(value: serde_json::Value) -> Result<Graph, StoreError> {
    let object = value
        .as_object()
        .ok_or_else(|| StoreError::InvalidGraph("graph must be an object".to_string()))?;

    for field in ["entities", "relationships"] {
        if !object.get(field).is_some_and(serde_json::Value::is_array) {
            return Err(StoreError::InvalidGraph(format!("missing {field} array")));
        }
    }

    Ok(serde_json::from_value(value)?)
}

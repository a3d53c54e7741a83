//! Core domain types for a GraphLens graph.
//!
//! A graph is a flat list of typed entities plus a flat list of directed,
//! typed relationships between entity ids. Both lists keep the order in
//! which the caller submitted them.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GraphLensError;

/// Arbitrary key-value properties attached to entities and relationships.
///
/// Key order is the order the caller supplied.
pub type Properties = serde_json::Map<String, serde_json::Value>;

// ── Graph ─────────────────────────────────────────────────────────

/// A node in the graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    /// Unique within a graph. Callers are responsible for uniqueness.
    pub id: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub name: String,
    #[serde(default)]
    pub properties: Properties,
}

impl Entity {
    pub fn new(id: impl Into<String>, entity_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entity_type: entity_type.into(),
            name: name.into(),
            properties: Properties::new(),
        }
    }

    /// Attach a property, replacing any previous value under `key`.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A directed, typed edge between two entity ids.
///
/// `source` and `target` are not required to resolve to an entity; dangling
/// references simply never match during joins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Relationship {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub relationship_type: String,
    #[serde(default)]
    pub properties: Properties,
}

impl Relationship {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        relationship_type: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relationship_type: relationship_type.into(),
            properties: Properties::new(),
        }
    }

    /// Whether `id` is either endpoint of this relationship.
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }
}

/// A submitted graph: entities and relationships in caller order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Graph {
    pub entities: Vec<Entity>,
    pub relationships: Vec<Relationship>,
}

impl Graph {
    pub fn new(entities: Vec<Entity>, relationships: Vec<Relationship>) -> Self {
        Self {
            entities,
            relationships,
        }
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relationships.is_empty()
    }

    /// Look up an entity by id. First match wins if ids are duplicated.
    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Distinct entity types in first-seen order.
    pub fn entity_types(&self) -> Vec<String> {
        distinct(self.entities.iter().map(|e| e.entity_type.as_str()))
    }

    /// Distinct relationship types in first-seen order.
    pub fn relationship_types(&self) -> Vec<String> {
        distinct(self.relationships.iter().map(|r| r.relationship_type.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

// ── Visualizations ────────────────────────────────────────────────

/// How a stored graph is meant to be rendered.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum VisualizationType {
    #[default]
    ForceDirected,
    Chord,
    Heatmap,
    Tree,
    Swimlane,
    Sankey,
}

impl VisualizationType {
    pub const ALL: [VisualizationType; 6] = [
        Self::ForceDirected,
        Self::Chord,
        Self::Heatmap,
        Self::Tree,
        Self::Swimlane,
        Self::Sankey,
    ];

    /// The wire identifier, e.g. `force-directed`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ForceDirected => "force-directed",
            Self::Chord => "chord",
            Self::Heatmap => "heatmap",
            Self::Tree => "tree",
            Self::Swimlane => "swimlane",
            Self::Sankey => "sankey",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ForceDirected => "Force-Directed Graph",
            Self::Chord => "Chord Diagram",
            Self::Heatmap => "Relationship Heat Map",
            Self::Tree => "Hierarchical Tree",
            Self::Swimlane => "Swimlane Diagram",
            Self::Sankey => "Sankey Flow Diagram",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ForceDirected => "Interactive network graph with physics simulation. Best for exploring relationships and network structure.",
            Self::Chord => "Circular layout showing relationships between entities as connecting arcs. Best for visualizing flow and connections.",
            Self::Heatmap => "Matrix visualization showing relationship intensity between entity types. Best for pattern recognition.",
            Self::Tree => "Tree layout showing hierarchical relationships. Best for organizational structures.",
            Self::Swimlane => "Process flow visualization with horizontal lanes for different teams/roles. Shows cross-functional workflows and handoffs.",
            Self::Sankey => "Flow visualization where connection width represents volume/importance. Excellent for identifying bottlenecks.",
        }
    }

    pub fn best_for(&self) -> &'static str {
        match self {
            Self::ForceDirected => "General purpose, relationship exploration, network analysis",
            Self::Chord => "Relationship density, flow patterns, interconnections",
            Self::Heatmap => "Pattern recognition, relationship density by type, overview analysis",
            Self::Tree => "Hierarchies, organizational structures, parent-child relationships",
            Self::Swimlane => "Process flows across teams, role-based workflows, responsibility boundaries, cross-team processes",
            Self::Sankey => "Process chains, resource flows, value streams, bottleneck identification, flow volume analysis",
        }
    }

    pub fn info(&self) -> VisualizationInfo {
        VisualizationInfo {
            visualization_type: *self,
            name: self.display_name().to_string(),
            description: self.description().to_string(),
            best_for: self.best_for().to_string(),
        }
    }

    /// The full catalogue, in presentation order.
    pub fn catalogue() -> Vec<VisualizationInfo> {
        Self::ALL.iter().map(|v| v.info()).collect()
    }
}

impl fmt::Display for VisualizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisualizationType {
    type Err = GraphLensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| GraphLensError::UnknownVisualization(s.to_string()))
    }
}

/// Catalogue entry describing a visualization type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationInfo {
    #[serde(rename = "type")]
    pub visualization_type: VisualizationType,
    pub name: String,
    pub description: String,
    pub best_for: String,
}

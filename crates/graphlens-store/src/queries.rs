//! Single-shot structural queries over a stored graph.
//!
//! Unlike the filter engine these hold no state. Exactly one criterion is
//! evaluated, chosen by the fixed priority
//! `entity_id > entity_type > relationship_type > node_ids`; with none the
//! whole graph comes back.
//!
//! The `entity_type` and `relationship_type` branches leave the other list
//! untouched, so their results may contain relationships whose endpoints are
//! not among the returned entities. Callers rely on that shape.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use graphlens_core::Graph;

/// Query criteria. Empty strings count as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphQuery {
    pub entity_id: Option<String>,
    pub entity_type: Option<String>,
    pub relationship_type: Option<String>,
    pub node_ids: Option<Vec<String>>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Evaluate `query` against `graph`.
pub fn run_query(graph: &Graph, query: &GraphQuery) -> Graph {
    if let Some(id) = present(&query.entity_id) {
        return match graph.entity(id) {
            Some(entity) => Graph::new(
                vec![entity.clone()],
                graph
                    .relationships
                    .iter()
                    .filter(|r| r.touches(id))
                    .cloned()
                    .collect(),
            ),
            None => Graph::default(),
        };
    }

    if let Some(entity_type) = present(&query.entity_type) {
        return Graph::new(
            graph
                .entities
                .iter()
                .filter(|e| e.entity_type == entity_type)
                .cloned()
                .collect(),
            graph.relationships.clone(),
        );
    }

    if let Some(relationship_type) = present(&query.relationship_type) {
        return Graph::new(
            graph.entities.clone(),
            graph
                .relationships
                .iter()
                .filter(|r| r.relationship_type == relationship_type)
                .cloned()
                .collect(),
        );
    }

    if let Some(node_ids) = &query.node_ids {
        let wanted: HashSet<&str> = node_ids.iter().map(String::as_str).collect();
        return Graph::new(
            graph
                .entities
                .iter()
                .filter(|e| wanted.contains(e.id.as_str()))
                .cloned()
                .collect(),
            graph
                .relationships
                .iter()
                .filter(|r| wanted.contains(r.source.as_str()) && wanted.contains(r.target.as_str()))
                .cloned()
                .collect(),
        );
    }

    graph.clone()
}

/// Sizes of a query result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueryStats {
    pub entities_found: usize,
    pub relationships_found: usize,
}

impl QueryStats {
    pub fn of(result: &Graph) -> Self {
        Self {
            entities_found: result.entity_count(),
            relationships_found: result.relationship_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphlens_core::{Entity, Relationship};

    /// a:Team -> b:Process -> c:Process, plus c -> a:FEEDS.
    fn build_graph() -> Graph {
        Graph::new(
            vec![
                Entity::new("a", "Team", "A"),
                Entity::new("b", "Process", "B"),
                Entity::new("c", "Process", "C"),
            ],
            vec![
                Relationship::new("a", "b", "PERFORMS"),
                Relationship::new("b", "c", "NEXT"),
                Relationship::new("c", "a", "FEEDS"),
            ],
        )
    }

    fn ids(graph: &Graph) -> Vec<&str> {
        graph.entities.iter().map(|e| e.id.as_str()).collect()
    }

    fn rel_types(graph: &Graph) -> Vec<&str> {
        graph
            .relationships
            .iter()
            .map(|r| r.relationship_type.as_str())
            .collect()
    }

    #[test]
    fn test_entity_id_returns_incident_edges() {
        let result = run_query(
            &build_graph(),
            &GraphQuery {
                entity_id: Some("b".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(ids(&result), vec!["b"]);
        assert_eq!(rel_types(&result), vec!["PERFORMS", "NEXT"]);
    }

    #[test]
    fn test_entity_id_not_found_is_empty() {
        let result = run_query(
            &build_graph(),
            &GraphQuery {
                entity_id: Some("zzz".to_string()),
                ..Default::default()
            },
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_entity_type_keeps_all_relationships() {
        let result = run_query(
            &build_graph(),
            &GraphQuery {
                entity_type: Some("Process".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(ids(&result), vec!["b", "c"]);
        // a is gone but PERFORMS and FEEDS still reference it.
        assert_eq!(rel_types(&result), vec!["PERFORMS", "NEXT", "FEEDS"]);
    }

    #[test]
    fn test_relationship_type_keeps_all_entities() {
        let result = run_query(
            &build_graph(),
            &GraphQuery {
                relationship_type: Some("NEXT".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(ids(&result), vec!["a", "b", "c"]);
        assert_eq!(rel_types(&result), vec!["NEXT"]);
    }

    #[test]
    fn test_node_ids_subgraph() {
        let result = run_query(
            &build_graph(),
            &GraphQuery {
                node_ids: Some(vec!["c".to_string(), "a".to_string()]),
                ..Default::default()
            },
        );
        assert_eq!(ids(&result), vec!["a", "c"]);
        assert_eq!(rel_types(&result), vec!["FEEDS"]);
    }

    #[test]
    fn test_empty_node_ids_is_empty_result() {
        let result = run_query(
            &build_graph(),
            &GraphQuery {
                node_ids: Some(vec![]),
                ..Default::default()
            },
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_priority_order() {
        let graph = build_graph();
        let query = GraphQuery {
            entity_id: Some("a".to_string()),
            entity_type: Some("Process".to_string()),
            relationship_type: Some("NEXT".to_string()),
            node_ids: Some(vec!["b".to_string()]),
        };
        assert_eq!(ids(&run_query(&graph, &query)), vec!["a"]);

        let query = GraphQuery {
            entity_id: Some(String::new()),
            ..query
        };
        assert_eq!(ids(&run_query(&graph, &query)), vec!["b", "c"]);

        let query = GraphQuery {
            entity_type: None,
            ..query
        };
        assert_eq!(rel_types(&run_query(&graph, &query)), vec!["NEXT"]);
        assert_eq!(ids(&run_query(&graph, &query)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_no_criteria_returns_full_graph() {
        let graph = build_graph();
        assert_eq!(run_query(&graph, &GraphQuery::default()), graph);
    }

    #[test]
    fn test_query_deserializes_camel_case() {
        let query: GraphQuery =
            serde_json::from_str(r#"{"entityType":"Team","nodeIds":["a"]}"#).unwrap();
        assert_eq!(query.entity_type.as_deref(), Some("Team"));
        assert_eq!(query.node_ids, Some(vec!["a".to_string()]));
        assert_eq!(QueryStats::of(&build_graph()).relationships_found, 3);
    }
}

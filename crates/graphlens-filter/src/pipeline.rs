//! The filter pipeline: a pure function of (graph, criteria).
//!
//! Stages run in a fixed order. Entity stages narrow the entity list first,
//! then relationships are joined against the surviving ids, and only then
//! narrowed by type. A relationship therefore never references an entity
//! missing from the same result.

use std::collections::HashSet;

use graphlens_core::{Entity, Graph};

use crate::criteria::FilterCriteria;
use crate::neighbors::neighborhood;

/// Derive the filtered view of `graph`. Returns owned copies.
pub fn apply(graph: &Graph, criteria: &FilterCriteria) -> Graph {
    let mut entities: Vec<Entity> = graph.entities.clone();

    if !criteria.entity_types.is_empty() {
        entities.retain(|e| criteria.entity_types.contains(&e.entity_type));
    }

    if !criteria.search_text.is_empty() {
        entities.retain(|e| matches_search(e, &criteria.search_text));
    }

    for (key, value) in criteria.properties.iter() {
        entities.retain(|e| matches_property(e, key, value));
    }

    if let Some(focus) = criteria.focus() {
        let within = neighborhood(graph, focus, criteria.focus_depth);
        entities.retain(|e| within.contains(&e.id));
    }

    let surviving: HashSet<&str> = entities.iter().map(|e| e.id.as_str()).collect();

    let relationships = graph
        .relationships
        .iter()
        .filter(|r| surviving.contains(r.source.as_str()) && surviving.contains(r.target.as_str()))
        .filter(|r| {
            criteria.relationship_types.is_empty()
                || criteria.relationship_types.contains(&r.relationship_type)
        })
        .cloned()
        .collect();

    Graph::new(entities, relationships)
}

/// Text an entity is searched by: name, type and properties JSON, lowercased.
pub fn search_haystack(entity: &Entity) -> String {
    let props = serde_json::to_string(&entity.properties).unwrap_or_default();
    format!("{} {} {}", entity.name, entity.entity_type, props).to_lowercase()
}

/// `needle` must already be lowercase.
pub fn matches_search(entity: &Entity, needle: &str) -> bool {
    search_haystack(entity).contains(needle)
}

/// Case-insensitive substring match of a property value. Absent key fails.
pub fn matches_property(entity: &Entity, key: &str, value: &str) -> bool {
    match entity.properties.get(key) {
        Some(prop) => stringify_value(prop)
            .to_lowercase()
            .contains(&value.to_lowercase()),
        None => false,
    }
}

/// Strings are used as-is; any other JSON value by its JSON text.
pub fn stringify_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

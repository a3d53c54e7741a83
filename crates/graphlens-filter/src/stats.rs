//! Counts that drive filter controls.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use graphlens_core::Graph;

/// Entity and relationship totals for one graph.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Counts {
    pub entities: usize,
    pub relationships: usize,
}

impl Counts {
    pub fn of(graph: &Graph) -> Self {
        Self {
            entities: graph.entity_count(),
            relationships: graph.relationship_count(),
        }
    }
}

/// Original vs. filtered sizes plus per-type tallies of the unfiltered graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterStats {
    pub original: Counts,
    pub filtered: Counts,
    pub entity_types: BTreeMap<String, usize>,
    pub relationship_types: BTreeMap<String, usize>,
}

pub fn entity_type_counts(graph: &Graph) -> BTreeMap<String, usize> {
    tally(graph.entities.iter().map(|e| e.entity_type.as_str()))
}

pub fn relationship_type_counts(graph: &Graph) -> BTreeMap<String, usize> {
    tally(graph.relationships.iter().map(|r| r.relationship_type.as_str()))
}

fn tally<'a>(types: impl Iterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for t in types {
        *counts.entry(t.to_string()).or_insert(0) += 1;
    }
    counts
}

/// One checkbox in a type filter list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeOption {
    #[serde(rename = "type")]
    pub type_name: String,
    pub count: usize,
    /// Shown as selected: the allow-set is empty or contains this type.
    pub checked: bool,
}

/// Build name-sorted options from per-type counts and the current allow-set.
pub fn type_options(counts: &BTreeMap<String, usize>, allowed: &BTreeSet<String>) -> Vec<TypeOption> {
    counts
        .iter()
        .map(|(type_name, &count)| TypeOption {
            type_name: type_name.clone(),
            count,
            checked: allowed.is_empty() || allowed.contains(type_name),
        })
        .collect()
}

//! Active filter criteria held by the engine.

use std::collections::BTreeSet;

/// The set of constraints applied to derive a filtered view.
///
/// The default value filters nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Allowed entity types. Empty allows all.
    pub entity_types: BTreeSet<String>,
    /// Allowed relationship types. Empty allows all.
    pub relationship_types: BTreeSet<String>,
    /// Lowercased search needle. Empty disables the search filter.
    pub search_text: String,
    /// Property substring filters, in registration order.
    pub properties: PropertyFilters,
    /// Entity whose neighborhood restricts the view.
    pub focus_node: Option<String>,
    /// Hop bound for the focus neighborhood.
    pub focus_depth: usize,
}

pub const DEFAULT_FOCUS_DEPTH: usize = 1;

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            entity_types: BTreeSet::new(),
            relationship_types: BTreeSet::new(),
            search_text: String::new(),
            properties: PropertyFilters::default(),
            focus_node: None,
            focus_depth: DEFAULT_FOCUS_DEPTH,
        }
    }
}

impl FilterCriteria {
    /// True when no criterion would remove anything.
    pub fn is_empty(&self) -> bool {
        self.entity_types.is_empty()
            && self.relationship_types.is_empty()
            && self.search_text.is_empty()
            && self.properties.is_empty()
            && self.focus().is_none()
    }

    /// The active focus id. An empty id means no focus.
    pub fn focus(&self) -> Option<&str> {
        self.focus_node.as_deref().filter(|id| !id.is_empty())
    }

    /// Enter focus mode, or leave it when `node_id` is empty.
    ///
    /// Depth 0 is not a valid hop bound and is stored as the default.
    pub fn set_focus(&mut self, node_id: Option<String>, depth: usize) {
        self.focus_node = node_id.filter(|id| !id.is_empty());
        self.focus_depth = if depth == 0 { DEFAULT_FOCUS_DEPTH } else { depth };
    }
}

/// Insert `value` if absent, remove it if present.
pub(crate) fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

/// Ordered `key -> value substring` map.
///
/// Re-setting an existing key replaces its value in place, keeping its
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFilters {
    entries: Vec<(String, String)>,
}

impl PropertyFilters {
    pub fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.retain(|(k, _)| k != key);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

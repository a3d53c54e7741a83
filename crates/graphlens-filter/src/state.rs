//! Plain-data snapshot of filter criteria for external persistence
//! (URL parameters, saved views).

use serde::{Deserialize, Serialize};

use crate::criteria::{FilterCriteria, PropertyFilters};
use crate::pipeline::stringify_value;

/// Serializable filter criteria. Sets become sorted arrays.
///
/// Every field is optional on input; missing fields load as "no filtering".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub entity_types: Vec<String>,
    pub relationship_types: Vec<String>,
    pub search_text: String,
    pub properties: serde_json::Map<String, serde_json::Value>,
    pub focus_node: Option<String>,
    pub focus_depth: usize,
}

impl From<&FilterCriteria> for FilterState {
    fn from(criteria: &FilterCriteria) -> Self {
        Self {
            entity_types: criteria.entity_types.iter().cloned().collect(),
            relationship_types: criteria.relationship_types.iter().cloned().collect(),
            search_text: criteria.search_text.clone(),
            properties: criteria
                .properties
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
                .collect(),
            focus_node: criteria.focus_node.clone(),
            focus_depth: criteria.focus_depth,
        }
    }
}

impl From<FilterState> for FilterCriteria {
    fn from(state: FilterState) -> Self {
        let mut properties = PropertyFilters::default();
        for (key, value) in state.properties.iter().filter(|(_, v)| !v.is_null()) {
            let value = stringify_value(value);
            if !value.is_empty() {
                properties.set(key, &value);
            }
        }

        let mut criteria = Self {
            entity_types: state.entity_types.into_iter().collect(),
            relationship_types: state.relationship_types.into_iter().collect(),
            search_text: state.search_text.to_lowercase(),
            properties,
            ..Self::default()
        };
        criteria.set_focus(state.focus_node, state.focus_depth);
        criteria
    }
}

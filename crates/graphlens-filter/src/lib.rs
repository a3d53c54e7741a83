//! graphlens-filter: Filter and neighborhood query engine for GraphLens graphs.
//!
//! Holds one active graph plus a set of filter criteria, derives a filtered
//! view on demand, and pushes that view to registered listeners every time
//! the criteria change. Focus mode restricts the view to a bounded-hop
//! neighborhood computed by BFS.
//!
//! The engine is single-threaded and synchronous: every mutator runs the
//! pipeline once and fans the result out before returning.

pub mod criteria;
pub mod neighbors;
pub mod pipeline;
pub mod presets;
pub mod state;
pub mod stats;

pub use criteria::FilterCriteria;
pub use presets::Preset;
pub use state::FilterState;
pub use stats::{Counts, FilterStats, TypeOption};

use std::collections::HashSet;

use graphlens_core::Graph;

/// The derived subgraph produced by applying criteria. Same shape as [`Graph`].
pub type FilteredGraph = Graph;

/// Callback invoked with the filtered view after each criteria change.
///
/// Receives `None` while no graph is set.
pub type ChangeListener = Box<dyn FnMut(Option<&FilteredGraph>)>;

/// The filter engine.
///
/// Listeners run in registration order. A listener that panics unwinds
/// through the mutator that triggered it; listeners registered after it do
/// not see that change.
#[derive(Default)]
pub struct FilterEngine {
    graph: Option<Graph>,
    criteria: FilterCriteria,
    listeners: Vec<ChangeListener>,
}

impl FilterEngine {
    /// Create an engine with no graph and no active filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held graph. Criteria are kept and listeners are not notified.
    pub fn set_graph(&mut self, graph: Graph) {
        tracing::debug!(
            entities = graph.entity_count(),
            relationships = graph.relationship_count(),
            "Filter engine graph replaced"
        );
        self.graph = Some(graph);
    }

    pub fn graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Register a change listener. There is no unregister.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(Option<&FilteredGraph>) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Run the pipeline once and hand the same snapshot to every listener.
    pub fn notify_change(&mut self) {
        let filtered = self.apply_filters();
        if let Some(view) = &filtered {
            tracing::debug!(
                entities = view.entity_count(),
                relationships = view.relationship_count(),
                listeners = self.listeners.len(),
                "Filters changed"
            );
        }
        for listener in self.listeners.iter_mut() {
            listener(filtered.as_ref());
        }
    }

    /// The filtered view of the held graph, or `None` if no graph is set.
    pub fn apply_filters(&self) -> Option<FilteredGraph> {
        self.graph
            .as_ref()
            .map(|graph| pipeline::apply(graph, &self.criteria))
    }

    /// Ids within `depth` undirected hops of `node_id`, including it.
    ///
    /// With no graph set this is just `{node_id}`.
    pub fn neighbors(&self, node_id: &str, depth: usize) -> HashSet<String> {
        match &self.graph {
            Some(graph) => neighbors::neighborhood(graph, node_id, depth),
            None => HashSet::from([node_id.to_string()]),
        }
    }

    // ── Mutators ─────────────────────────────────────────────────

    pub fn set_entity_type_filter<I, S>(&mut self, types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.criteria.entity_types = types.into_iter().map(Into::into).collect();
        self.notify_change();
    }

    pub fn toggle_entity_type(&mut self, entity_type: &str) {
        criteria::toggle(&mut self.criteria.entity_types, entity_type);
        self.notify_change();
    }

    pub fn set_relationship_type_filter<I, S>(&mut self, types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.criteria.relationship_types = types.into_iter().map(Into::into).collect();
        self.notify_change();
    }

    pub fn toggle_relationship_type(&mut self, relationship_type: &str) {
        criteria::toggle(&mut self.criteria.relationship_types, relationship_type);
        self.notify_change();
    }

    /// Set the search needle. Matching is case-insensitive.
    pub fn set_search(&mut self, text: &str) {
        self.criteria.search_text = text.to_lowercase();
        self.notify_change();
    }

    /// Filter on a property substring. `None` or an empty value removes the filter.
    pub fn set_property_filter(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(v) if !v.is_empty() => self.criteria.properties.set(key, v),
            _ => self.criteria.properties.remove(key),
        }
        self.notify_change();
    }

    /// Restrict the view to `node_id`'s neighborhood. An empty id leaves
    /// focus mode; depth 0 is stored as the default depth.
    pub fn set_focus_node(&mut self, node_id: &str, depth: usize) {
        self.criteria.set_focus(Some(node_id.to_string()), depth);
        self.notify_change();
    }

    /// Leave focus mode. The focus depth is kept.
    pub fn clear_focus(&mut self) {
        self.criteria.focus_node = None;
        self.notify_change();
    }

    pub fn clear_all(&mut self) {
        self.criteria = FilterCriteria::default();
        self.notify_change();
    }

    /// Clear all criteria, then apply the preset's type filters.
    ///
    /// Listeners see one notification per step.
    pub fn apply_preset(&mut self, preset: Preset) {
        self.clear_all();
        if preset == Preset::All {
            return;
        }
        self.set_entity_type_filter(preset.entity_types().iter().copied());
        self.set_relationship_type_filter(preset.relationship_types().iter().copied());
    }

    // ── Stats & state ────────────────────────────────────────────

    /// Original vs. filtered counts and per-type tallies of the unfiltered graph.
    pub fn stats(&self) -> Option<FilterStats> {
        let graph = self.graph.as_ref()?;
        let filtered = pipeline::apply(graph, &self.criteria);
        Some(FilterStats {
            original: Counts::of(graph),
            filtered: Counts::of(&filtered),
            entity_types: stats::entity_type_counts(graph),
            relationship_types: stats::relationship_type_counts(graph),
        })
    }

    /// Name-sorted entity type checkboxes. Empty with no graph set.
    pub fn entity_type_options(&self) -> Vec<TypeOption> {
        self.graph
            .as_ref()
            .map(|g| stats::type_options(&stats::entity_type_counts(g), &self.criteria.entity_types))
            .unwrap_or_default()
    }

    /// Name-sorted relationship type checkboxes. Empty with no graph set.
    pub fn relationship_type_options(&self) -> Vec<TypeOption> {
        self.graph
            .as_ref()
            .map(|g| {
                stats::type_options(
                    &stats::relationship_type_counts(g),
                    &self.criteria.relationship_types,
                )
            })
            .unwrap_or_default()
    }

    pub fn save_state(&self) -> FilterState {
        FilterState::from(&self.criteria)
    }

    /// Replace all criteria from a snapshot and notify.
    pub fn load_state(&mut self, state: FilterState) {
        self.criteria = FilterCriteria::from(state);
        self.notify_change();
    }
}

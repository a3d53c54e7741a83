//! One-shot filtering for the `filter` command.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use graphlens_core::Graph;
use graphlens_filter::{FilterEngine, FilterState, FilterStats, FilteredGraph, Preset};

/// What the `filter` command prints.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FilterReport {
    pub filtered: FilteredGraph,
    pub stats: FilterStats,
    /// The criteria actually applied, after normalization.
    pub state: FilterState,
}

/// Filter `graph` with a saved state, then an optional preset on top.
///
/// The result is taken from the last change notification, so it is exactly
/// what a subscribed view would have rendered.
pub fn filter_report(graph: Graph, state: FilterState, preset: Option<Preset>) -> Option<FilterReport> {
    let mut engine = FilterEngine::new();
    engine.set_graph(graph);

    let latest: Rc<RefCell<Option<FilteredGraph>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&latest);
    engine.on_change(move |filtered| {
        *sink.borrow_mut() = filtered.cloned();
    });

    engine.load_state(state);
    if let Some(preset) = preset {
        engine.apply_preset(preset);
    }

    let filtered = latest.borrow_mut().take()?;
    Some(FilterReport {
        filtered,
        stats: engine.stats()?,
        state: engine.save_state(),
    })
}

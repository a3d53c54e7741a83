//! Bounded-depth neighborhood expansion.
//!
//! BFS from a start entity over the undirected adjacency implied by the
//! relationship list. Each relationship links both of its endpoints, so
//! direction is ignored. A visited set keeps cyclic graphs finite.

use std::collections::{HashMap, HashSet, VecDeque};

use graphlens_core::Graph;

/// Undirected adjacency keyed by entity id.
///
/// Built from relationships alone: a dangling endpoint still becomes a
/// vertex here, it just never matches an entity later on.
pub struct Adjacency<'a> {
    neighbors: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> Adjacency<'a> {
    pub fn from_graph(graph: &'a Graph) -> Self {
        let mut neighbors: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
        for rel in &graph.relationships {
            neighbors
                .entry(rel.source.as_str())
                .or_default()
                .push(rel.target.as_str());
            neighbors
                .entry(rel.target.as_str())
                .or_default()
                .push(rel.source.as_str());
        }
        Self { neighbors }
    }

    fn of(&self, id: &str) -> &[&'a str] {
        self.neighbors.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Every id within `depth` hops of `start`, `start` included.
///
/// `depth == 0` yields just `{start}`. The start id need not exist in the
/// graph; an unknown id has no neighbors.
pub fn neighborhood(graph: &Graph, start: &str, depth: usize) -> HashSet<String> {
    let adjacency = Adjacency::from_graph(graph);

    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(start);

    // BFS queue: (id, hops)
    let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
    queue.push_back((start, 0));

    while let Some((id, hops)) = queue.pop_front() {
        if hops >= depth {
            continue;
        }

        for &next in adjacency.of(id) {
            if visited.insert(next) {
                queue.push_back((next, hops + 1));
            }
        }
    }

    visited.into_iter().map(str::to_string).collect()
}

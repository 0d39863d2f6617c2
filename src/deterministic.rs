use crate::alphabet::Symbol;
use crate::graph::Graph;
use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// A graph with deterministic transitions: at most one target per
/// `(node, symbol)` pair, plus a designated start node.
///
/// The start node is fixed at construction and the value is never mutated
/// afterwards, so a finished graph can be shared freely among concurrent
/// readers.
#[derive(Debug, Clone)]
pub struct DeterministicGraph<N> {
    graph: Graph<N>,
    start: N,
}

impl<N: Clone + Ord + Hash> DeterministicGraph<N> {
    pub fn new(mut graph: Graph<N>, start: N) -> Self {
        // A single-node automaton has no edges to register its start.
        graph.insert_node(start.clone());
        Self { graph, start }
    }

    pub fn start_node(&self) -> &N {
        &self.start
    }

    pub fn node_exists(&self, node: &N) -> bool {
        self.graph.contains_node(node)
    }

    pub fn is_accepting(&self, node: &N) -> bool {
        self.graph.is_accepting(node)
    }

    pub fn as_graph(&self) -> &Graph<N> {
        &self.graph
    }

    /// The unique node reachable from `node` by `symbol`, or `None` when the
    /// transition is undefined. Should construction ever have violated the
    /// one-target discipline, the smallest target is returned.
    pub fn next_node(&self, node: &N, symbol: Symbol) -> Option<N> {
        self.graph.reachable(node, symbol).into_iter().next()
    }

    /// Applies `next_node` with the same symbol `count` times, bailing out
    /// at the first undefined transition. Zero moves lands on `node` itself.
    pub fn n_moves(&self, node: &N, symbol: Symbol, count: usize) -> Option<N> {
        let mut current = node.clone();
        for _ in 0..count {
            current = self.next_node(&current, symbol)?;
        }
        Some(current)
    }

    /// Hop count of the shortest path from `source` to `target`, ignoring
    /// edge labels, or `None` when `target` is unreachable.
    pub fn shortest_distance(&self, source: &N, target: &N) -> Option<usize> {
        self.bfs_distance(source, |node| node == target)
    }

    pub fn distance_from_start(&self, node: &N) -> Option<usize> {
        self.shortest_distance(&self.start, node)
    }

    /// Distance from `source` to the closest accepting node, or `None` when
    /// no accepting node is reachable. An accepting `source` is at distance
    /// zero.
    pub fn distance_to_nearest_accepting(&self, source: &N) -> Option<usize> {
        self.bfs_distance(source, |node| self.graph.is_accepting(node))
    }

    /// Every node with a defined transition on `symbol`. The iterator is
    /// lazy; call again to restart.
    pub fn nodes_with_transition(&self, symbol: Symbol) -> impl Iterator<Item = &N> + '_ {
        self.graph
            .nodes()
            .filter(move |&node| self.next_node(node, symbol).is_some())
    }

    // Breadth-first search over the unlabeled adjacency view. Nodes enter
    // the visited set when enqueued, so cycles cannot loop and no node is
    // expanded twice.
    fn bfs_distance(&self, source: &N, found: impl Fn(&N) -> bool) -> Option<usize> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(source.clone());
        queue.push_back((source.clone(), 0));
        while let Some((node, distance)) = queue.pop_front() {
            if found(&node) {
                return Some(distance);
            }
            for neighbor in self.graph.neighbors(&node) {
                if visited.insert(neighbor.clone()) {
                    queue.push_back((neighbor, distance + 1));
                }
            }
        }
        None
    }
}

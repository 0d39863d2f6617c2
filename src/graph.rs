use crate::alphabet::Symbol;
use crate::state::StateId;
use indexmap::{IndexMap, IndexSet};
use std::collections::BTreeSet;
use std::hash::Hash;
use std::iter;

/// A labeled directed multigraph. Edges go `source --symbol--> target`; a
/// `(source, symbol)` pair may have any number of targets, which is what
/// makes the nondeterministic phase nondeterministic. The deterministic
/// phase stores its edges in the same shape and simply never records more
/// than one target per pair.
///
/// Accepting ("finite") nodes are a subset of the node set; both grow only.
#[derive(Debug, Clone)]
pub struct Graph<N> {
    adjacency: IndexMap<N, IndexMap<Symbol, BTreeSet<N>>>,
    nodes: IndexSet<N>,
    accepting: IndexSet<N>,
    next_id: u32,
}

impl<N> Graph<N> {
    pub fn new() -> Self {
        Self {
            adjacency: IndexMap::new(),
            nodes: IndexSet::new(),
            accepting: IndexSet::new(),
            next_id: 0,
        }
    }
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph<StateId> {
    /// Returns a fresh, previously unused identifier. The node joins the
    /// graph once an edge touches it.
    pub fn allocate_node(&mut self) -> StateId {
        let id = StateId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl<N: Clone + Ord + Hash> Graph<N> {
    /// Adds the transition and registers both endpoints as nodes.
    pub fn add_edge(&mut self, source: N, target: N, symbol: Symbol) {
        self.nodes.insert(source.clone());
        self.nodes.insert(target.clone());
        self.adjacency
            .entry(source)
            .or_insert_with(IndexMap::new)
            .entry(symbol)
            .or_insert_with(BTreeSet::new)
            .insert(target);
    }

    pub(crate) fn insert_node(&mut self, node: N) {
        self.nodes.insert(node);
    }

    pub fn mark_accepting(&mut self, node: N) {
        self.nodes.insert(node.clone());
        self.accepting.insert(node);
    }

    pub fn is_accepting(&self, node: &N) -> bool {
        self.accepting.contains(node)
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.nodes.contains(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The recorded targets of `(source, symbol)`. Unknown sources and
    /// unlabeled symbols yield the empty set, never an error.
    pub fn edges_from(&self, source: &N, symbol: Symbol) -> BTreeSet<N> {
        self.targets(source, symbol).cloned().unwrap_or_default()
    }

    /// All nodes reachable from `node` through epsilon edges alone,
    /// including `node` itself.
    pub fn epsilon_closure(&self, node: &N) -> BTreeSet<N> {
        self.close(iter::once(node.clone()))
    }

    /// The nodes reachable from `node` by `symbol`. For epsilon this is the
    /// epsilon closure; for an alphabet symbol it is the closure of the
    /// symbol-move taken from every node in the closure of `node`.
    pub fn reachable(&self, node: &N, symbol: Symbol) -> BTreeSet<N> {
        match symbol {
            Symbol::Epsilon => self.epsilon_closure(node),
            Symbol::Char(_) => {
                let mut moved = BTreeSet::new();
                for origin in self.epsilon_closure(node) {
                    if let Some(targets) = self.targets(&origin, symbol) {
                        moved.extend(targets.iter().cloned());
                    }
                }
                self.close(moved)
            }
        }
    }

    /// Union of `reachable` over a set of nodes. An empty input yields the
    /// empty set.
    pub fn reachable_from_set<'a, I>(&self, nodes: I, symbol: Symbol) -> BTreeSet<N>
    where
        I: IntoIterator<Item = &'a N>,
        N: 'a,
    {
        let mut result = BTreeSet::new();
        for node in nodes {
            result.extend(self.reachable(node, symbol));
        }
        result
    }

    /// Every node one edge away from `node`, whatever the label. This is the
    /// unlabeled adjacency view the shortest-path queries walk.
    pub fn neighbors(&self, node: &N) -> BTreeSet<N> {
        match self.adjacency.get(node) {
            Some(by_symbol) => by_symbol
                .values()
                .flat_map(|targets| targets.iter().cloned())
                .collect(),
            None => BTreeSet::new(),
        }
    }

    fn targets(&self, source: &N, symbol: Symbol) -> Option<&BTreeSet<N>> {
        self.adjacency.get(source)?.get(&symbol)
    }

    // Epsilon-closes the seed set. The result set doubles as the visited
    // set, so epsilon cycles terminate and each node is added at most once.
    fn close(&self, seed: impl IntoIterator<Item = N>) -> BTreeSet<N> {
        let mut result = BTreeSet::new();
        let mut stack: Vec<N> = seed.into_iter().collect();
        while let Some(node) = stack.pop() {
            if !result.insert(node.clone()) {
                continue;
            }
            if let Some(targets) = self.targets(&node, Symbol::Epsilon) {
                for target in targets {
                    if !result.contains(target) {
                        stack.push(target.clone());
                    }
                }
            }
        }
        result
    }
}

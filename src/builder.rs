use crate::alphabet::{Alphabet, Symbol};
use crate::deterministic::DeterministicGraph;
use crate::diagnostics::DiagnosticSink;
use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::graph::Graph;
use crate::state::{StateId, StateSet};
use indexmap::IndexSet;

/// Compiles a syntax tree into a deterministic automaton.
///
/// Two phases: Thompson construction builds a nondeterministic graph from
/// the tree, then subset construction folds it into a deterministic one.
/// The nondeterministic graph never leaves `build`.
///
/// ```
/// use automaton::{Alphabet, AutomatonBuilder, Expr};
///
/// let expr = Expr::repetition(Expr::literal('a'));
/// let automaton = AutomatonBuilder::new(&expr, Alphabet::from("ab")).build()?;
/// assert!(automaton.graph().is_accepting(automaton.graph().start_node()));
/// # Ok::<(), automaton::Error>(())
/// ```
pub struct AutomatonBuilder<'e, 's> {
    expr: &'e Expr,
    alphabet: Alphabet,
    sink: Option<&'s mut dyn DiagnosticSink>,
}

/// The finished artifact: the deterministic graph plus the borrowed syntax
/// tree it was compiled from, kept around for diagnostics.
#[derive(Debug)]
pub struct Automaton<'e> {
    expr: &'e Expr,
    graph: DeterministicGraph<StateSet>,
}

impl<'e> Automaton<'e> {
    pub fn graph(&self) -> &DeterministicGraph<StateSet> {
        &self.graph
    }

    pub fn expr(&self) -> &'e Expr {
        self.expr
    }
}

// One step of the iterative tree walk. `Enter` frames descend into a
// subtree; the remaining frames resume a parent once its children have
// pushed their end nodes onto the finished stack.
enum Frame<'e> {
    Enter { expr: &'e Expr, begin: StateId },
    EnterSecond { expr: &'e Expr },
    JoinAlternation { end: StateId },
    JoinConcatenation { end: StateId },
    JoinRepetition { loop_node: StateId, end: StateId },
}

fn pop_end(finished: &mut Vec<StateId>) -> StateId {
    finished.pop().expect("join frame with no pending end node")
}

impl<'e, 's> AutomatonBuilder<'e, 's> {
    pub fn new(expr: &'e Expr, alphabet: Alphabet) -> Self {
        Self {
            expr,
            alphabet,
            sink: None,
        }
    }

    /// Installs a sink receiving one entry per composite node expanded
    /// during subset construction.
    pub fn with_diagnostics(mut self, sink: &'s mut dyn DiagnosticSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(mut self) -> Result<Automaton<'e>> {
        let nondeterministic = self.thompson()?;
        tracing::debug!(
            nodes = nondeterministic.node_count(),
            "nondeterministic graph built"
        );
        let graph = self.determinize(&nondeterministic);
        tracing::debug!(nodes = graph.as_graph().node_count(), "deterministic graph built");
        Ok(Automaton {
            expr: self.expr,
            graph,
        })
    }

    // Thompson construction over an explicit frame stack, so construction
    // depth is bounded by the heap rather than the call stack. Each subtree
    // consumes a begin node and pushes the end node it wired up; join frames
    // splice the children together.
    fn thompson(&self) -> Result<Graph<StateId>> {
        let mut graph = Graph::new();
        let begin = graph.allocate_node();
        let mut frames = vec![Frame::Enter {
            expr: self.expr,
            begin,
        }];
        let mut finished: Vec<StateId> = Vec::new();

        while let Some(frame) = frames.pop() {
            match frame {
                Frame::Enter { expr, begin } => {
                    // A subtree matching only the empty string is a single
                    // epsilon edge, whatever its shape.
                    if expr.is_neutral() {
                        let end = graph.allocate_node();
                        graph.add_edge(begin, end, Symbol::Epsilon);
                        finished.push(end);
                        continue;
                    }
                    match expr {
                        Expr::Alternation(first, second) => {
                            // Both branches leave the same begin node; the
                            // shared origin is where the nondeterminism
                            // comes from.
                            let end = graph.allocate_node();
                            frames.push(Frame::JoinAlternation { end });
                            frames.push(Frame::Enter {
                                expr: second.as_ref(),
                                begin,
                            });
                            frames.push(Frame::Enter {
                                expr: first.as_ref(),
                                begin,
                            });
                        }
                        Expr::Concatenation(first, second) => {
                            let end = graph.allocate_node();
                            frames.push(Frame::JoinConcatenation { end });
                            frames.push(Frame::EnterSecond {
                                expr: second.as_ref(),
                            });
                            frames.push(Frame::Enter {
                                expr: first.as_ref(),
                                begin,
                            });
                        }
                        Expr::Repetition(body) => {
                            let end = graph.allocate_node();
                            let loop_node = graph.allocate_node();
                            graph.add_edge(begin, loop_node, Symbol::Epsilon);
                            frames.push(Frame::JoinRepetition { loop_node, end });
                            frames.push(Frame::Enter {
                                expr: body.as_ref(),
                                begin: loop_node,
                            });
                        }
                        Expr::Literal(symbol) => {
                            if !self.alphabet.contains(*symbol) {
                                return Err(Error::MalformedExpression(*symbol));
                            }
                            let end = graph.allocate_node();
                            graph.add_edge(begin, end, Symbol::Char(*symbol));
                            finished.push(end);
                        }
                        Expr::Neutral => unreachable!("neutral subtrees are handled above"),
                    }
                }
                // The second leg of a concatenation starts where the first
                // one ended.
                Frame::EnterSecond { expr } => {
                    let begin = pop_end(&mut finished);
                    frames.push(Frame::Enter { expr, begin });
                }
                Frame::JoinAlternation { end } => {
                    let second_end = pop_end(&mut finished);
                    let first_end = pop_end(&mut finished);
                    graph.add_edge(first_end, end, Symbol::Epsilon);
                    graph.add_edge(second_end, end, Symbol::Epsilon);
                    finished.push(end);
                }
                Frame::JoinConcatenation { end } => {
                    let last = pop_end(&mut finished);
                    graph.add_edge(last, end, Symbol::Epsilon);
                    finished.push(end);
                }
                Frame::JoinRepetition { loop_node, end } => {
                    let body_end = pop_end(&mut finished);
                    graph.add_edge(body_end, loop_node, Symbol::Epsilon);
                    graph.add_edge(loop_node, end, Symbol::Epsilon);
                    finished.push(end);
                }
            }
        }

        let accept = pop_end(&mut finished);
        graph.mark_accepting(accept);
        Ok(graph)
    }

    // Subset construction. Every composite node is pushed onto the worklist
    // exactly once, the moment it first enters `discovered`; the run is
    // bounded by the number of distinct subsets of nondeterministic nodes.
    fn determinize(&mut self, nondeterministic: &Graph<StateId>) -> DeterministicGraph<StateSet> {
        let mut graph: Graph<StateSet> = Graph::new();
        let start = StateSet::from(nondeterministic.epsilon_closure(&StateId(0)));

        let mut discovered: IndexSet<StateSet> = IndexSet::new();
        discovered.insert(start.clone());
        let mut worklist = vec![start.clone()];

        while let Some(current) = worklist.pop() {
            let accepting = current.iter().any(|id| nondeterministic.is_accepting(id));
            graph.insert_node(current.clone());
            if accepting {
                graph.mark_accepting(current.clone());
            }
            tracing::trace!(node = ?current, accepting, "expanding composite node");
            if let Some(sink) = self.sink.as_mut() {
                sink.composite_expanded(&current, accepting);
            }

            for symbol in self.alphabet.symbols() {
                let targets =
                    nondeterministic.reachable_from_set(current.iter(), Symbol::Char(symbol));
                if targets.is_empty() {
                    continue;
                }
                let target = StateSet::from(targets);
                if discovered.insert(target.clone()) {
                    worklist.push(target.clone());
                }
                graph.add_edge(current.clone(), target, Symbol::Char(symbol));
            }
        }

        DeterministicGraph::new(graph, start)
    }
}

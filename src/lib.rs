//! Compiles parsed regular-expression syntax trees into deterministic
//! automata.
//!
//! The pipeline is the textbook one: Thompson construction turns the tree
//! into a nondeterministic graph, subset construction folds that into a
//! deterministic graph, and the deterministic graph answers transition and
//! shortest-path queries. Parsing regex text and driving the automaton over
//! input are both left to the caller; this crate starts at the syntax tree
//! and stops at the finished graph.

mod alphabet;
mod builder;
mod deterministic;
mod diagnostics;
mod error;
mod expr;
mod graph;
#[cfg(test)]
mod qc;
mod state;

pub use alphabet::{Alphabet, Symbol};
pub use builder::{Automaton, AutomatonBuilder};
pub use deterministic::DeterministicGraph;
pub use diagnostics::{DiagnosticSink, NullSink};
pub use error::{Error, Result};
pub use expr::Expr;
pub use graph::Graph;
pub use state::{StateId, StateSet};

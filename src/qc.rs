// Test-only helpers: random syntax trees with exact expected match sets,
// plus a small walker standing in for the matching driver.

use crate::alphabet::Symbol;
use crate::deterministic::DeterministicGraph;
use crate::expr::Expr;
use crate::state::StateSet;
use quickcheck::{Arbitrary, Gen};
use std::collections::HashSet;

const SYMBOLS: [char; 3] = ['a', 'b', 'c'];
const MAX_DEPTH: usize = 4;

/// Walks the deterministic graph over `input`; true when the walk ends on
/// an accepting node.
pub fn accepts(graph: &DeterministicGraph<StateSet>, input: &str) -> bool {
    let mut current = graph.start_node().clone();
    for symbol in input.chars() {
        match graph.next_node(&current, Symbol::Char(symbol)) {
            Some(next) => current = next,
            None => return false,
        }
    }
    graph.is_accepting(&current)
}

// Repetition is left out so every case has a finite, exact match set.
#[derive(Debug, Clone)]
enum Shape {
    Lit(char),
    Alt(Box<Shape>, Box<Shape>),
    Cat(Box<Shape>, Box<Shape>),
}

impl Shape {
    fn new(g: &mut Gen, level: usize) -> Self {
        if level == 0 {
            return Shape::Lit(*g.choose(&SYMBOLS).unwrap());
        }
        match g.choose(&[0, 1, 2]).unwrap() {
            0 => Shape::Lit(*g.choose(&SYMBOLS).unwrap()),
            1 => Shape::Alt(
                Box::new(Shape::new(g, level - 1)),
                Box::new(Shape::new(g, level - 1)),
            ),
            _ => Shape::Cat(
                Box::new(Shape::new(g, level - 1)),
                Box::new(Shape::new(g, level - 1)),
            ),
        }
    }

    fn expr(&self) -> Expr {
        match self {
            Shape::Lit(symbol) => Expr::literal(*symbol),
            Shape::Alt(first, second) => Expr::alternation(first.expr(), second.expr()),
            Shape::Cat(first, second) => Expr::concatenation(first.expr(), second.expr()),
        }
    }

    fn matches(&self) -> HashSet<String> {
        match self {
            Shape::Lit(symbol) => {
                let mut result = HashSet::new();
                result.insert(symbol.to_string());
                result
            }
            Shape::Alt(first, second) => {
                let mut result = first.matches();
                result.extend(second.matches());
                result
            }
            Shape::Cat(first, second) => {
                let heads = first.matches();
                let tails = second.matches();
                let mut result = HashSet::with_capacity(heads.len() * tails.len());
                for head in &heads {
                    for tail in &tails {
                        result.insert(format!("{}{}", head, tail));
                    }
                }
                result
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExprCase {
    pub expr: Expr,
    pub matches: HashSet<String>,
}

impl Arbitrary for ExprCase {
    fn arbitrary(g: &mut Gen) -> Self {
        let level = g.size().min(MAX_DEPTH);
        let shape = Shape::new(g, level);
        ExprCase {
            expr: shape.expr(),
            matches: shape.matches(),
        }
    }
}

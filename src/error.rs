pub type Result<T> = std::result::Result<T, Error>;

/// An error raised while turning a syntax tree into an automaton.
///
/// "No transition" and "no path" outcomes of automaton queries are ordinary
/// `None` values, not errors; construction is the only fallible step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The tree contains a literal the alphabet does not define. The
    /// transition such a literal would produce could never be taken, so the
    /// build reports it instead of emitting a dead branch.
    #[error("malformed expression: literal {0:?} is not a member of the alphabet")]
    MalformedExpression(char),
}

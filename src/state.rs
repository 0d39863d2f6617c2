use std::collections::BTreeSet;
use std::fmt;

/// A node of the nondeterministic graph. Identifiers are handed out by a
/// monotonically increasing counter; node 0 is the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub u32);

/// A node of the deterministic graph: the canonical (sorted, deduplicated)
/// sequence of the nondeterministic nodes it stands for. Two deterministic
/// nodes are equal iff their sequences are equal.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateSet(Box<[StateId]>);

impl StateSet {
    pub fn iter(&self) -> std::slice::Iter<'_, StateId> {
        self.0.iter()
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.0.binary_search(&id).is_ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeSet<StateId>> for StateSet {
    // A BTreeSet iterates sorted and deduplicated, which is the canonical
    // form already.
    fn from(set: BTreeSet<StateId>) -> Self {
        StateSet(set.into_iter().collect())
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter().map(|id| id.0)).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[u32]) -> StateSet {
        StateSet::from(ids.iter().map(|&id| StateId(id)).collect::<BTreeSet<_>>())
    }

    #[test]
    fn canonical_form() {
        assert_eq!(set(&[3, 1, 2, 1]), set(&[1, 2, 3]));
        assert_eq!(set(&[1, 2, 3]).len(), 3);
    }

    #[test]
    fn contains_uses_the_sorted_order() {
        let states = set(&[5, 1, 9]);
        assert!(states.contains(StateId(5)));
        assert!(!states.contains(StateId(2)));
    }

    #[test]
    fn distinct_sequences_differ() {
        assert_ne!(set(&[1, 2]), set(&[1, 2, 3]));
    }
}

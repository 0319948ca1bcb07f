use std::collections::BTreeMap;

use log::debug;

use crate::builder::AutomatonBuilder;
use crate::errors::BuildError;

/// Index of a node in the automaton's arena.
///
/// Edges store indices rather than references: after minimization a
/// node can be the target of edges from many parents, and an index
/// into the arena sidesteps any shared-ownership bookkeeping for a
/// graph that lives and dies as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

pub(crate) const ROOT: NodeId = NodeId(0);

/// A single automaton state: an edge map plus a terminal flag.
///
/// Edges are kept in a `BTreeMap` so iteration is always in character
/// order, which makes word enumeration lexicographic for free.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub(crate) edges: BTreeMap<char, NodeId>,
    pub(crate) terminal: bool,
}

impl Node {
    /// Installs or overwrites the transition for `ch`.
    pub(crate) fn add_edge(&mut self, ch: char, child: NodeId) {
        self.edges.insert(ch, child);
    }

    pub fn child(&self, ch: char) -> Option<NodeId> {
        self.edges.get(&ch).copied()
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Outgoing edges in character order.
    pub fn edges(&self) -> impl Iterator<Item = (char, NodeId)> + '_ {
        self.edges.iter().map(|(&ch, &id)| (ch, id))
    }
}

/// A minimized deterministic acyclic word graph (DAWG).
///
/// Built from a sorted word list by [`AutomatonBuilder`]; every
/// structurally equivalent suffix is represented by a single shared
/// node. Queries are pure reads over `&self`, so a finished automaton
/// can be shared freely; `add_word` takes `&mut self` and rebuilds,
/// which already serializes mutation against readers.
pub struct Automaton {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
}

impl Automaton {
    /// Builds an automaton from words in non-decreasing code-point
    /// order (after case folding). Convenience wrapper over
    /// [`AutomatonBuilder`].
    pub fn from_words<I, S>(words: I) -> Result<Automaton, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = AutomatonBuilder::new();
        for word in words {
            builder.insert(word.as_ref())?;
        }
        Ok(builder.finish())
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Exact membership. The query is folded to the lexicon's
    /// canonical lowercase before traversal.
    pub fn contains(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        let mut node = self.root;
        for ch in word.chars() {
            match self.node(node).child(ch) {
                Some(child) => node = child,
                None => return false,
            }
        }
        self.node(node).is_terminal()
    }

    /// Every accepted word, in lexicographic order.
    pub fn words(&self) -> Vec<String> {
        let mut words = Vec::new();
        let mut prefix = String::new();
        self.collect_words(self.root, &mut prefix, &mut words);
        words
    }

    fn collect_words(&self, node: NodeId, prefix: &mut String, out: &mut Vec<String>) {
        if self.node(node).is_terminal() {
            out.push(prefix.clone());
        }
        for (ch, child) in self.node(node).edges() {
            prefix.push(ch);
            self.collect_words(child, prefix, out);
            prefix.pop();
        }
    }

    /// Adds a single word after construction. Returns `false` without
    /// touching the graph if the word is already accepted.
    ///
    /// Otherwise the accepted set is enumerated, extended, re-sorted
    /// and rebuilt through a fresh builder, then swapped in place.
    /// O(total accepted words) per call; an amortized incremental
    /// merge is out of scope.
    pub fn add_word(&mut self, word: &str) -> Result<bool, BuildError> {
        let word = word.to_lowercase();
        if word.is_empty() {
            return Err(BuildError::EmptyWord);
        }
        if self.contains(&word) {
            return Ok(false);
        }
        debug!("rebuilding automaton to add {word:?}");
        let mut words = self.words();
        words.push(word);
        words.sort();
        *self = Automaton::from_words(&words)?;
        Ok(true)
    }

    /// Number of live nodes. An honest minimality measure: the builder
    /// reclaims every discarded trial node, so nothing unreachable is
    /// left in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Automaton {
        Automaton::from_words(["car", "cat", "do", "dog", "dogs"]).unwrap()
    }

    #[test]
    fn test_contains_existing_words() {
        let automaton = sample();
        assert!(automaton.contains("car"));
        assert!(automaton.contains("cat"));
        assert!(automaton.contains("do"));
        assert!(automaton.contains("dog"));
        assert!(automaton.contains("dogs"));
    }

    #[test]
    fn test_contains_non_existing_words() {
        let automaton = sample();
        assert!(!automaton.contains("cats"));
        assert!(!automaton.contains("catalog"));
        assert!(!automaton.contains("ca"));
        assert!(!automaton.contains("d"));
        assert!(!automaton.contains(""));
    }

    #[test]
    fn test_contains_folds_case() {
        let automaton = sample();
        assert!(automaton.contains("DOG"));
        assert!(automaton.contains("Dog"));
    }

    #[test]
    fn test_words_in_lexicographic_order() {
        let automaton = sample();
        assert_eq!(automaton.words(), vec!["car", "cat", "do", "dog", "dogs"]);
    }

    #[test]
    fn test_add_word() {
        let mut automaton = sample();
        assert_eq!(automaton.add_word("catalog"), Ok(true));
        assert!(automaton.contains("catalog"));
        assert_eq!(
            automaton.words(),
            vec!["car", "cat", "catalog", "do", "dog", "dogs"]
        );
    }

    #[test]
    fn test_add_word_is_idempotent() {
        let mut automaton = sample();
        let before = automaton.words();
        assert_eq!(automaton.add_word("dog"), Ok(false));
        assert_eq!(automaton.add_word("DOG"), Ok(false));
        assert_eq!(automaton.words(), before);
    }

    #[test]
    fn test_add_word_rejects_empty() {
        let mut automaton = sample();
        assert_eq!(automaton.add_word(""), Err(BuildError::EmptyWord));
    }

    #[test]
    fn test_added_word_shares_suffixes() {
        // "catalog" must reuse the terminal state "dog" already ends in.
        let mut automaton = Automaton::from_words(["dog"]).unwrap();
        let before = automaton.node_count();
        automaton.add_word("catalog").unwrap();
        // root + c,a,t,a,l,o + the shared "g" chain tail
        assert!(automaton.node_count() < before + "catalog".len());
    }

    #[test]
    fn test_suffix_sharing_is_minimal() {
        // {cog, cogs, dog, dogs}: the entire "og(s)" tail is shared, so
        // the minimal automaton has exactly 5 states where a plain trie
        // needs 9.
        let automaton = Automaton::from_words(["cog", "cogs", "dog", "dogs"]).unwrap();
        assert_eq!(automaton.node_count(), 5);
        assert_eq!(automaton.words(), vec!["cog", "cogs", "dog", "dogs"]);
    }

    #[test]
    fn test_empty_automaton() {
        let automaton = Automaton::from_words(std::iter::empty::<&str>()).unwrap();
        assert!(!automaton.contains("anything"));
        assert!(automaton.words().is_empty());
        assert_eq!(automaton.node_count(), 1);
    }
}

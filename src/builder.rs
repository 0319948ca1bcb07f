use std::collections::HashMap;

use log::debug;

use crate::automaton::{Automaton, Node, NodeId, ROOT};
use crate::errors::BuildError;

/// Structural identity of a node: its terminal flag plus the canonical
/// identity of every outgoing edge, in character order.
///
/// Two nodes with equal signatures accept exactly the same suffix set,
/// so the registry can collapse them into one. The signature must be
/// computed from canonical child ids, never from the identity of a
/// freshly allocated child, or the builder silently degenerates into
/// an unminimized trie.
#[derive(Debug, PartialEq, Eq, Hash)]
struct Signature {
    terminal: bool,
    edges: Vec<(char, NodeId)>,
}

/// Incremental constructor for a minimal [`Automaton`].
///
/// Words must be inserted in non-decreasing code-point order (after
/// folding to lowercase). Sorted input is what makes single-pass
/// minimization sound: when a word diverges from its predecessor, no
/// future word can extend the nodes past the divergence point, so they
/// are closed and safe to collapse immediately.
///
/// All construction state is scoped to one builder instance and
/// discarded by [`finish`](Self::finish), so independent builds never
/// interfere.
pub struct AutomatonBuilder {
    nodes: Vec<Node>,
    previous_word: String,
    /// Pending `(parent, char, child)` triples for the current word's
    /// path, shallowest first. Children here are trial nodes not yet
    /// proven canonical.
    unchecked: Vec<(NodeId, char, NodeId)>,
    registry: HashMap<Signature, NodeId>,
    words: usize,
}

impl AutomatonBuilder {
    pub fn new() -> Self {
        AutomatonBuilder {
            nodes: vec![Node::default()],
            previous_word: String::new(),
            unchecked: Vec::new(),
            registry: HashMap::new(),
            words: 0,
        }
    }

    /// Inserts the next word. Re-inserting the previous word is a
    /// no-op; anything comparing before it is an error.
    pub fn insert(&mut self, word: &str) -> Result<(), BuildError> {
        let word = word.to_lowercase();
        if word.is_empty() {
            return Err(BuildError::EmptyWord);
        }
        if word < self.previous_word {
            return Err(BuildError::OutOfOrder {
                previous: self.previous_word.clone(),
                word,
            });
        }

        let prefix_len = common_prefix_len(&self.previous_word, &word);
        self.collapse(prefix_len);

        // Extend the trie with fresh trial nodes for the new suffix,
        // starting from the deepest still-pending node.
        let mut node = match self.unchecked.last() {
            Some(&(_, _, child)) => child,
            None => ROOT,
        };
        for ch in word.chars().skip(prefix_len) {
            let child = self.alloc();
            self.nodes[node.index()].add_edge(ch, child);
            self.unchecked.push((node, ch, child));
            node = child;
        }
        self.nodes[node.index()].terminal = true;

        self.previous_word = word;
        self.words += 1;
        Ok(())
    }

    /// Finalizes every pending node deeper than `down_to`, deepest
    /// first: a parent's signature depends on its children already
    /// being canonical, so the order is load-bearing.
    fn collapse(&mut self, down_to: usize) {
        while self.unchecked.len() > down_to {
            let (parent, ch, child) = self
                .unchecked
                .pop()
                .expect("frontier is non-empty while deeper than down_to");
            let signature = self.signature_of(child);
            match self.registry.get(&signature) {
                Some(&canonical) => {
                    // An equivalent node already exists: rewire the
                    // parent to it and reclaim the trial node. The
                    // trial node is always the newest arena slot here,
                    // since any deeper pending nodes were themselves
                    // duplicates and have already been popped.
                    self.nodes[parent.index()].add_edge(ch, canonical);
                    debug_assert_eq!(child.index() + 1, self.nodes.len());
                    self.nodes.pop();
                }
                None => {
                    self.registry.insert(signature, child);
                }
            }
        }
    }

    fn signature_of(&self, id: NodeId) -> Signature {
        let node = &self.nodes[id.index()];
        Signature {
            terminal: node.terminal,
            edges: node.edges().collect(),
        }
    }

    fn alloc(&mut self) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::default());
        id
    }

    /// Collapses the remaining pending path down to the root and
    /// returns the finished automaton. No partially minimized
    /// automaton is ever observable.
    pub fn finish(mut self) -> Automaton {
        self.collapse(0);
        debug!(
            "minimized {} words into {} nodes ({} registered classes)",
            self.words,
            self.nodes.len(),
            self.registry.len()
        );
        Automaton {
            nodes: self.nodes,
            root: ROOT,
        }
    }
}

impl Default for AutomatonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Length in chars of the shared prefix of two words.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_order_words() {
        let mut builder = AutomatonBuilder::new();
        builder.insert("dog").unwrap();
        assert_eq!(
            builder.insert("cat"),
            Err(BuildError::OutOfOrder {
                previous: "dog".to_string(),
                word: "cat".to_string(),
            })
        );
    }

    #[test]
    fn test_rejects_prefix_after_extension() {
        // "do" compares before "dog", so it must be rejected too.
        let mut builder = AutomatonBuilder::new();
        builder.insert("dog").unwrap();
        assert!(matches!(
            builder.insert("do"),
            Err(BuildError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_word() {
        let mut builder = AutomatonBuilder::new();
        assert_eq!(builder.insert(""), Err(BuildError::EmptyWord));
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut builder = AutomatonBuilder::new();
        builder.insert("dog").unwrap();
        builder.insert("dog").unwrap();
        let automaton = builder.finish();
        assert_eq!(automaton.words(), vec!["dog"]);
    }

    #[test]
    fn test_insert_folds_case_before_ordering() {
        let mut builder = AutomatonBuilder::new();
        builder.insert("CAR").unwrap();
        builder.insert("cat").unwrap();
        let automaton = builder.finish();
        assert!(automaton.contains("car"));
        assert!(automaton.contains("cat"));
    }

    #[test]
    fn test_shared_suffix_nodes_are_collapsed() {
        let mut builder = AutomatonBuilder::new();
        for word in ["bats", "cats", "rats"] {
            builder.insert(word).unwrap();
        }
        let automaton = builder.finish();
        // The three first letters all lead into one shared "ats" chain:
        // root + 4 chain states.
        assert_eq!(automaton.node_count(), 5);
        assert_eq!(automaton.words(), vec!["bats", "cats", "rats"]);
    }

    #[test]
    fn test_diverging_interior_paths_stay_distinct() {
        // "abe"/"aco" share their leaf, but the interior states carry
        // different edge labels and must not be merged.
        let automaton = Automaton::from_words(["abe", "aco"]).unwrap();
        assert_eq!(automaton.node_count(), 5);
        assert!(automaton.contains("abe"));
        assert!(automaton.contains("aco"));
        assert!(!automaton.contains("abo"));
    }

    #[test]
    fn test_finish_without_words() {
        let automaton = AutomatonBuilder::new().finish();
        assert_eq!(automaton.node_count(), 1);
        assert!(automaton.words().is_empty());
    }
}

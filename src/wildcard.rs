use std::collections::{HashMap, HashSet};

use crate::automaton::{Automaton, NodeId};
use crate::errors::PatternError;

/// Anchored wildcard search over the whole accepted word.
///
/// Pattern tokens after case folding: literal letters, `?` (exactly
/// one character) and `*` (zero or more characters). Anything else is
/// a [`PatternError`]. Absence of matches is not an error: the result
/// is simply empty.
pub fn wildcard_search(
    automaton: &Automaton,
    pattern: &str,
) -> Result<HashSet<String>, PatternError> {
    let pattern = pattern.to_lowercase();
    let tokens: Vec<char> = pattern.chars().collect();
    if let Some(&token) = tokens
        .iter()
        .find(|&&c| c != '?' && c != '*' && !c.is_alphabetic())
    {
        return Err(PatternError::InvalidToken { token, pattern });
    }

    // Memo lives for one top-level call only.
    let mut memo = HashMap::new();
    let words = completions(automaton, automaton.root(), &tokens, 0, &mut memo);
    Ok(words.into_iter().collect())
}

/// All suffixes completing the match from `(node, pos)`.
///
/// Naive recursion revisits the same `(node, position)` pair once per
/// distinct path leading to it, which blows up exponentially on
/// patterns mixing several `*`/`?` tokens. Memoizing the completion
/// set per pair turns the search into a product-automaton traversal
/// bounded by reachable states times pattern length: each pair is
/// expanded exactly once.
fn completions(
    automaton: &Automaton,
    node: NodeId,
    pattern: &[char],
    pos: usize,
    memo: &mut HashMap<(NodeId, usize), Vec<String>>,
) -> Vec<String> {
    if let Some(cached) = memo.get(&(node, pos)) {
        return cached.clone();
    }

    let mut suffixes = Vec::new();
    match pattern.get(pos).copied() {
        None => {
            if automaton.node(node).is_terminal() {
                suffixes.push(String::new());
            }
        }
        Some('?') => {
            for (ch, child) in automaton.node(node).edges() {
                prepend(&mut suffixes, ch, completions(automaton, child, pattern, pos + 1, memo));
            }
        }
        Some('*') => {
            // Zero characters consumed: drop the star here.
            suffixes.extend(completions(automaton, node, pattern, pos + 1, memo));
            // One more character consumed, star still pending. The
            // "consume one and drop the star" alternative is covered by
            // the child's own zero-consumption branch.
            for (ch, child) in automaton.node(node).edges() {
                prepend(&mut suffixes, ch, completions(automaton, child, pattern, pos, memo));
            }
        }
        Some(literal) => {
            if let Some(child) = automaton.node(node).child(literal) {
                prepend(&mut suffixes, literal, completions(automaton, child, pattern, pos + 1, memo));
            }
        }
    }

    // Adjacent wildcards reach the same completion along several
    // branches; dedup keeps the per-state sets tight.
    suffixes.sort();
    suffixes.dedup();
    memo.insert((node, pos), suffixes.clone());
    suffixes
}

fn prepend(suffixes: &mut Vec<String>, ch: char, completed: Vec<String>) {
    for suffix in completed {
        let mut word = String::with_capacity(ch.len_utf8() + suffix.len());
        word.push(ch);
        word.push_str(&suffix);
        suffixes.push(word);
    }
}

use std::collections::HashSet;

use crate::automaton::{Automaton, NodeId};
use crate::errors::{PatternError, RackError};

/// Marker for a blank tile in a rack and for an open slot in a
/// template. A blank tile substitutes for any letter.
pub const BLANK: char = '?';

/// A multiset of available tiles: per-letter counts plus blanks.
///
/// `Copy` on purpose: the search threads the remaining rack through
/// every call by value, so backtracking never has to undo anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rack {
    counts: [u8; 26],
    blanks: u8,
}

impl Rack {
    /// Parses a rack string of letters and `?` blanks, e.g. `"aest??"`.
    pub fn parse(tiles: &str) -> Result<Rack, RackError> {
        let mut rack = Rack::default();
        for tile in tiles.to_lowercase().chars() {
            if tile == BLANK {
                rack.blanks = rack.blanks.saturating_add(1);
            } else if let Some(slot) = slot(tile) {
                rack.counts[slot] = rack.counts[slot].saturating_add(1);
            } else {
                return Err(RackError::InvalidTile { tile });
            }
        }
        Ok(rack)
    }

    pub fn len(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum::<usize>() + self.blanks as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn without_letter(mut self, ch: char) -> Option<Rack> {
        let slot = slot(ch)?;
        if self.counts[slot] == 0 {
            return None;
        }
        self.counts[slot] -= 1;
        Some(self)
    }

    fn without_blank(mut self) -> Option<Rack> {
        if self.blanks == 0 {
            return None;
        }
        self.blanks -= 1;
        Some(self)
    }

    /// The ways this rack can pay for tile `ch`: with the letter
    /// itself, with a blank, or both. Each yielded rack is the
    /// remainder after payment.
    fn spend(self, ch: char) -> impl Iterator<Item = Rack> {
        [self.without_letter(ch), self.without_blank()]
            .into_iter()
            .flatten()
    }
}

fn slot(ch: char) -> Option<usize> {
    ch.is_ascii_lowercase().then(|| (ch as u8 - b'a') as usize)
}

/// Rack-constrained word discovery.
///
/// Finds every accepted word of the form `prefix + filled_template +
/// suffix`, where each `?` slot in the template consumes one rack
/// tile, template literals consume nothing (they model tiles already
/// on the board), and prefix/suffix are built from leftover rack
/// tiles in any order and split.
///
/// The search walks automaton edges directly instead of generating
/// candidate strings: at every step only edges the remaining rack can
/// pay for are followed, so a branch dies the moment the rack cannot
/// cover any outgoing edge. That bounds the work by the automaton's
/// live branching rather than by rack permutations, which is what
/// keeps racks beyond a handful of tiles tractable.
pub fn rack_search(
    automaton: &Automaton,
    template: &str,
    rack: Rack,
) -> Result<HashSet<String>, PatternError> {
    let template = template.to_lowercase();
    let tokens: Vec<char> = template.chars().collect();
    if let Some(&token) = tokens
        .iter()
        .find(|&&c| c != BLANK && !c.is_ascii_lowercase())
    {
        return Err(PatternError::InvalidToken {
            token,
            pattern: template,
        });
    }

    let mut search = Search {
        automaton,
        template: tokens,
        results: HashSet::new(),
    };
    let mut word = String::new();
    search.grow_prefix(automaton.root(), rack, &mut word);
    Ok(search.results)
}

struct Search<'a> {
    automaton: &'a Automaton,
    template: Vec<char>,
    results: HashSet<String>,
}

impl Search<'_> {
    /// Prefix phase: either start the template at the current node, or
    /// buy one more leading tile from the rack and keep growing.
    fn grow_prefix(&mut self, node: NodeId, rack: Rack, word: &mut String) {
        self.match_template(node, 0, rack, word);
        let automaton = self.automaton;
        for (ch, child) in automaton.node(node).edges() {
            for remaining in rack.spend(ch) {
                word.push(ch);
                self.grow_prefix(child, remaining, word);
                word.pop();
            }
        }
    }

    /// Template phase: literals are pinned to their edge and cost
    /// nothing; each `?` slot consumes one rack tile.
    fn match_template(&mut self, node: NodeId, pos: usize, rack: Rack, word: &mut String) {
        let automaton = self.automaton;
        match self.template.get(pos).copied() {
            None => self.grow_suffix(node, rack, word),
            Some(BLANK) => {
                for (ch, child) in automaton.node(node).edges() {
                    for remaining in rack.spend(ch) {
                        word.push(ch);
                        self.match_template(child, pos + 1, remaining, word);
                        word.pop();
                    }
                }
            }
            Some(literal) => {
                if let Some(child) = automaton.node(node).child(literal) {
                    word.push(literal);
                    self.match_template(child, pos + 1, rack, word);
                    word.pop();
                }
            }
        }
    }

    /// Suffix phase: the template is fully consumed, so every terminal
    /// node reached from here on is a result.
    fn grow_suffix(&mut self, node: NodeId, rack: Rack, word: &mut String) {
        if self.automaton.node(node).is_terminal() {
            self.results.insert(word.clone());
        }
        let automaton = self.automaton;
        for (ch, child) in automaton.node(node).edges() {
            for remaining in rack.spend(ch) {
                word.push(ch);
                self.grow_suffix(child, remaining, word);
                word.pop();
            }
        }
    }
}

//! Incremental prefix matcher over a label set.

use std::collections::HashMap;

/// Result of matching typed characters against the label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// The input left every label behind.
    NoMatch,
    /// The input is a proper prefix of at least one label.
    PartialMatch,
    /// The input is exactly one of the labels.
    CompleteMatch,
}

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    terminal: bool,
}

/// Prefix tree with one level per label character.
///
/// Built once per hint session and never modified afterwards.  A lookup
/// walks one node per typed character, so its cost does not depend on how
/// many labels were inserted.
#[derive(Debug, Default)]
pub struct HintTrie {
    root: TrieNode,
    len: usize,
}

impl HintTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `label` to the trie.  Inserting the same label twice is a no-op.
    pub fn insert(&mut self, label: &str) {
        let mut node = &mut self.root;
        for ch in label.chars() {
            node = node.children.entry(ch).or_default();
        }
        if !node.terminal {
            node.terminal = true;
            self.len += 1;
        }
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Classify `prefix` against the inserted labels.
    pub fn lookup<I>(&self, prefix: I) -> MatchState
    where
        I: IntoIterator<Item = char>,
    {
        let mut node = &self.root;
        for ch in prefix {
            match node.children.get(&ch) {
                Some(next) => node = next,
                None => return MatchState::NoMatch,
            }
        }
        if node.terminal {
            MatchState::CompleteMatch
        } else if node.children.is_empty() {
            MatchState::NoMatch
        } else {
            MatchState::PartialMatch
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for HintTrie {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut trie = HintTrie::new();
        for label in iter {
            trie.insert(label.as_ref());
        }
        trie
    }
}

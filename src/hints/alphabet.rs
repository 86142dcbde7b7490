//! Hint label generation.
//!
//! Labels grow breadth-first, the way link-hinting browser extensions
//! allocate them: start from the empty placeholder, and keep replacing the
//! earliest unexpanded candidate with one child per alphabet character
//! until there are enough candidates.  Expansion always finishes the
//! level it started, so every label in a set has the same length.  That
//! makes the set prefix-free whichever way round its labels are read,
//! which is what allows [`reverse_each`] to flip typing order safely.
//!
//! The cost is that one window too many for single keys moves every
//! window to two keys: 15 windows over a 14-letter alphabet get 15
//! two-key labels, where stopping mid-level would leave 13 of them on one
//! key.  Mixed lengths are only prefix-free in one reading direction.

/// Generate `count` distinct, prefix-free labels over `alphabet`.
///
/// Labels are as short as `count` allows (never empty) and are returned in
/// lexicographic order.  The result is deterministic for a given input.
///
/// A single-character alphabet can only ever produce one prefix-free
/// label, so at most one label is returned in that case.  An empty
/// alphabet yields no labels.
pub fn generate(count: usize, alphabet: &[char]) -> Vec<String> {
    if count == 0 || alphabet.is_empty() {
        return Vec::new();
    }
    if alphabet.len() == 1 {
        return vec![alphabet[0].to_string()];
    }

    let mut candidates: Vec<String> = vec![String::new()];
    let mut offset = 0;

    while needs_expansion(&candidates, offset, count) {
        let parent = candidates[offset].clone();
        offset += 1;
        for &ch in alphabet {
            let mut child = parent.clone();
            child.push(ch);
            candidates.push(child);
        }
    }

    let mut labels = candidates.split_off(offset);
    labels.truncate(count);
    labels.sort();
    labels
}

/// Keep expanding while there are too few unexpanded candidates, while the
/// empty placeholder is still unexpanded, or while a level is half done.
fn needs_expansion(candidates: &[String], offset: usize, count: usize) -> bool {
    if offset == 0 || candidates.len() - offset < count {
        return true;
    }
    let first = candidates[offset].chars().count();
    let last = candidates[candidates.len() - 1].chars().count();
    first != last
}

/// Reverse the characters of every label, keeping the list order.
///
/// With reversed labels the first typed character picks among the largest
/// groups of windows instead of the smallest.
pub fn reverse_each(labels: Vec<String>) -> Vec<String> {
    labels
        .into_iter()
        .map(|label| label.chars().rev().collect())
        .collect()
}

//! Hint labels: generation, matching, and the label-to-window assignment.

pub mod alphabet;
pub mod trie;

pub use alphabet::{generate, reverse_each};
pub use trie::{HintTrie, MatchState};

use crate::tree::WindowId;

/// Binding between enumerated windows and their labels.
///
/// Position `i` of the enumeration receives label `i`.  The assignment is
/// frozen when a hint session starts: windows that appear later get no
/// label and windows that vanish keep theirs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    entries: Vec<(WindowId, String)>,
}

impl Assignment {
    /// Pair `windows` with `labels` in order.  Surplus items on either side
    /// are dropped.
    pub fn new(windows: impl IntoIterator<Item = WindowId>, labels: Vec<String>) -> Self {
        Self {
            entries: windows.into_iter().zip(labels).collect(),
        }
    }

    pub fn label_for(&self, window: WindowId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| *id == window)
            .map(|(_, label)| label.as_str())
    }

    pub fn window_for(&self, label: &str) -> Option<WindowId> {
        self.entries
            .iter()
            .find(|(_, l)| l == label)
            .map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_pairs_by_position() {
        let a = Assignment::new(
            [WindowId(7), WindowId(3), WindowId(9)],
            generate(3, &['a', 'b']),
        );
        assert_eq!(a.label_for(WindowId(7)), Some("aa"));
        assert_eq!(a.label_for(WindowId(3)), Some("ab"));
        assert_eq!(a.window_for("ba"), Some(WindowId(9)));
        assert_eq!(a.window_for("bb"), None);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn short_label_list_leaves_windows_unlabelled() {
        let a = Assignment::new([WindowId(1), WindowId(2)], vec!["x".into()]);
        assert_eq!(a.len(), 1);
        assert_eq!(a.label_for(WindowId(2)), None);
    }
}

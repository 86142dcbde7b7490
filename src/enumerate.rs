//! Flatten the container tree into the ordered list of windows hintbar
//! labels and renders.
//!
//! Enumeration is a pure function of the tree snapshot: calling it twice on
//! the same tree gives the same order.  Leaves keep their left-to-right
//! document order, tiled windows before floating ones.
//!
//! A leaf is *visible* when every tabbed or stacked ancestor between it and
//! its workspace has the leaf's branch as its focused child, which is how
//! i3 decides what is drawn.  Every leaf gets a typeable label; only
//! visible ones are candidates for an on-screen overlay.

use crate::tree::{Layout, Node, NodeType};
use serde::{Deserialize, Serialize};

/// Which workspaces contribute windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    /// Only the workspace holding focus.
    #[default]
    CurrentWorkspace,
    /// Every workspace currently shown on some output.
    AllVisibleWorkspaces,
    /// Every workspace, shown or not.
    AllWorkspaces,
}

/// A leaf window together with its computed visibility.
#[derive(Debug, Clone, Copy)]
pub struct WindowRef<'a> {
    pub node: &'a Node,
    pub visible: bool,
}

/// A top-level item of a workspace: either a window, or a container that
/// is rendered as a labelled group of its children.
#[derive(Debug, Clone)]
pub enum Entry<'a> {
    Window(WindowRef<'a>),
    Group {
        node: &'a Node,
        visible: bool,
        children: Vec<Entry<'a>>,
    },
}

impl<'a> Entry<'a> {
    /// The leaves of this entry, depth first.
    pub fn leaves(&self) -> Vec<WindowRef<'a>> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<WindowRef<'a>>) {
        match self {
            Entry::Window(window) => out.push(*window),
            Entry::Group { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

/// The workspaces covered by `scope`, in document order.
pub fn scoped_workspaces(tree: &Node, scope: Scope) -> Vec<&Node> {
    match scope {
        Scope::CurrentWorkspace => tree.focused_workspace().into_iter().collect(),
        Scope::AllVisibleWorkspaces => tree
            .workspaces()
            .into_iter()
            .filter(|ws| tree.is_workspace_visible(ws.id))
            .collect(),
        Scope::AllWorkspaces => tree.workspaces(),
    }
}

/// Top-level entries of every workspace in `scope`.
pub fn entries(tree: &Node, scope: Scope) -> Vec<Entry<'_>> {
    scoped_workspaces(tree, scope)
        .into_iter()
        .flat_map(|ws| build_workspace(ws, tree.is_workspace_visible(ws.id)))
        .collect()
}

/// Top-level entries of a single workspace, assumed to be on screen.
///
/// A workspace whose only child is a tabbed container is treated as if the
/// tabs were its direct children.
pub fn workspace_entries(workspace: &Node) -> Vec<Entry<'_>> {
    build_workspace(workspace, true)
}

/// All leaf windows in `scope`, in order.
pub fn enumerate(tree: &Node, scope: Scope) -> Vec<WindowRef<'_>> {
    flatten(&entries(tree, scope))
}

/// Depth-first leaves of `entries`.
pub fn flatten<'a>(entries: &[Entry<'a>]) -> Vec<WindowRef<'a>> {
    entries.iter().flat_map(|entry| entry.leaves()).collect()
}

fn build_workspace(workspace: &Node, shown: bool) -> Vec<Entry<'_>> {
    let mut children = workspace.children();
    let sole_child = match (children.next(), children.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    };
    match sole_child {
        Some(tabs) if tabs.layout == Layout::Tabbed && tabs.has_children() => {
            build_children(tabs, shown)
        }
        _ => build_children(workspace, shown),
    }
}

fn build_children(parent: &Node, visible: bool) -> Vec<Entry<'_>> {
    let focused = parent.focused_tiled_child();
    let tiled = parent.nodes.iter().filter_map(|child| {
        let shown = !parent.layout.occludes_children() || focused == Some(child.id);
        build_entry(child, visible && shown)
    });
    let floating = parent
        .floating_nodes
        .iter()
        .filter_map(|child| build_entry(child, visible));
    tiled.chain(floating).collect()
}

fn build_entry(node: &Node, visible: bool) -> Option<Entry<'_>> {
    if node.is_leaf() {
        return Some(Entry::Window(WindowRef { node, visible }));
    }
    if !node.has_children() {
        return None;
    }
    // Floating wrappers hold exactly one real container.
    if node.node_type == NodeType::FloatingCon && node.nodes.len() == 1 {
        return build_entry(&node.nodes[0], visible);
    }
    Some(Entry::Group {
        node,
        visible,
        children: build_children(node, visible),
    })
}

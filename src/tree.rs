//! The window-manager container tree.
//!
//! A [`Node`] mirrors one entry of the JSON document i3 and sway return for
//! a `GET_TREE` request.  Only the fields hintbar consumes are modelled;
//! everything else is ignored during deserialization.
//!
//! The tree is a read-only snapshot.  It is pulled fresh for every
//! enumeration and never cached: the window manager is the source of truth
//! and may change it at any time between two requests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque container id assigned by the window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Root,
    Output,
    #[default]
    Con,
    FloatingCon,
    Workspace,
    Dockarea,
    #[serde(other)]
    Other,
}

/// Layout policy of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Layout {
    #[serde(rename = "splith")]
    SplitHorizontal,
    #[serde(rename = "splitv")]
    SplitVertical,
    #[serde(rename = "tabbed")]
    Tabbed,
    #[serde(rename = "stacked")]
    Stacked,
    /// Anything else i3 reports (`output`, `dockarea`, `none`).
    #[default]
    #[serde(other)]
    None,
}

impl Layout {
    /// Whether only one child of a container with this layout is on screen
    /// at a time.
    pub fn occludes_children(self) -> bool {
        matches!(self, Layout::Tabbed | Layout::Stacked)
    }

    /// Single-letter marker used when rendering a container as a group.
    pub fn marker(self) -> &'static str {
        match self {
            Layout::SplitHorizontal => "H",
            Layout::SplitVertical => "V",
            Layout::Tabbed => "T",
            Layout::Stacked => "S",
            Layout::None => "",
        }
    }
}

/// Position and size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// X11 properties of a window (i3 only).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowProperties {
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub instance: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// One node of the container tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    pub id: WindowId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Workspace number, `-1` for named workspaces (workspaces only).
    pub num: Option<i32>,
    pub name: Option<String>,
    pub layout: Layout,
    pub focused: bool,
    pub urgent: bool,
    pub rect: Rect,
    pub window_properties: Option<WindowProperties>,
    /// Wayland application id (sway only).
    pub app_id: Option<String>,
    /// Child ids, most recently focused first.
    pub focus: Vec<WindowId>,
    pub nodes: Vec<Node>,
    pub floating_nodes: Vec<Node>,
}

impl Node {
    /// Tiled children followed by floating children, in document order.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().chain(self.floating_nodes.iter())
    }

    pub fn has_children(&self) -> bool {
        !self.nodes.is_empty() || !self.floating_nodes.is_empty()
    }

    /// A leaf is a focusable application window: a container with no
    /// children of its own.
    pub fn is_leaf(&self) -> bool {
        !self.has_children() && matches!(self.node_type, NodeType::Con | NodeType::FloatingCon)
    }

    /// Id of the child that currently holds focus within this container.
    ///
    /// Falls back to the first child when the window manager reports no
    /// focus history.
    pub fn focused_child(&self) -> Option<WindowId> {
        self.focus
            .first()
            .copied()
            .or_else(|| self.children().next().map(|c| c.id))
    }

    /// Id of the most recently focused tiled child.
    ///
    /// i3 lists floating children in the same focus history; they never
    /// decide which tab or stack entry is drawn.
    pub fn focused_tiled_child(&self) -> Option<WindowId> {
        self.focus
            .iter()
            .copied()
            .find(|id| self.nodes.iter().any(|n| n.id == *id))
            .or_else(|| self.nodes.first().map(|n| n.id))
    }

    /// The window class on X11, or the application id on Wayland.
    pub fn class_name(&self) -> Option<&str> {
        self.window_properties
            .as_ref()
            .and_then(|p| p.class.as_deref())
            .or(self.app_id.as_deref())
    }

    /// The window title, empty if the window manager reports none.
    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Workspaces that hold user windows, in document order.
    ///
    /// Internal workspaces such as i3's scratchpad (`__i3_scratch`) are
    /// skipped.
    pub fn workspaces(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        collect_workspaces(self, &mut out);
        out
    }

    /// The workspace containing the focused node, if any.
    pub fn focused_workspace(&self) -> Option<&Node> {
        find_focused_workspace(self, None)
    }

    /// The focused node (usually a leaf, but an empty workspace can hold
    /// focus too).
    pub fn find_focused(&self) -> Option<&Node> {
        if self.focused {
            return Some(self);
        }
        self.children().find_map(Node::find_focused)
    }

    /// Whether `workspace` is the one currently shown on its output.
    pub fn is_workspace_visible(&self, workspace: WindowId) -> bool {
        find_parent(self, workspace)
            .map(|parent| parent.focused_child() == Some(workspace))
            .unwrap_or(false)
    }
}

fn collect_workspaces<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    if node.node_type == NodeType::Workspace {
        if !node.title().starts_with("__") {
            out.push(node);
        }
        return;
    }
    for child in node.children() {
        collect_workspaces(child, out);
    }
}

fn find_focused_workspace<'a>(node: &'a Node, workspace: Option<&'a Node>) -> Option<&'a Node> {
    let workspace = if node.node_type == NodeType::Workspace {
        Some(node)
    } else {
        workspace
    };
    if node.focused {
        return workspace;
    }
    node.children()
        .find_map(|child| find_focused_workspace(child, workspace))
}

fn find_parent(node: &Node, id: WindowId) -> Option<&Node> {
    if node.children().any(|c| c.id == id) {
        return Some(node);
    }
    node.children().find_map(|c| find_parent(c, id))
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn deserialize_i3_tree_subset() {
        let json = r#"{
            "id": 1, "type": "root", "name": "root", "layout": "splith",
            "focus": [2], "unknown_field": [1, 2, 3],
            "nodes": [{
                "id": 2, "type": "workspace", "num": 1, "name": "1",
                "layout": "tabbed", "focus": [4, 3],
                "nodes": [
                    {"id": 3, "type": "con", "name": "vim", "layout": "splith",
                     "window_properties": {"class": "URxvt"},
                     "rect": {"x": 0, "y": 0, "width": 800, "height": 600}},
                    {"id": 4, "type": "con", "name": "firefox", "focused": true,
                     "urgent": true, "layout": "output", "app_id": "firefox"}
                ]
            }]
        }"#;
        let tree: Node = serde_json::from_str(json).unwrap();
        let ws = &tree.nodes[0];
        assert_eq!(ws.node_type, NodeType::Workspace);
        assert_eq!(ws.layout, Layout::Tabbed);
        assert_eq!(ws.num, Some(1));
        assert_eq!(ws.nodes[0].class_name(), Some("URxvt"));
        assert_eq!(ws.nodes[0].rect.width, 800);
        assert_eq!(ws.nodes[1].class_name(), Some("firefox"));
        // Unknown layouts collapse to `None`.
        assert_eq!(ws.nodes[1].layout, Layout::None);
        assert!(ws.nodes[1].urgent);
        assert_eq!(ws.focused_child(), Some(WindowId(4)));
    }

    #[test]
    fn leaf_requires_no_children() {
        let leaf = window(10, "A", "a");
        assert!(leaf.is_leaf());
        let parent = container(11, Layout::SplitVertical, vec![leaf]);
        assert!(!parent.is_leaf());
        // An empty workspace is not a window.
        assert!(!workspace(12, "1", vec![]).is_leaf());
    }

    #[test]
    fn unknown_layout_names_fall_back_to_none() {
        for name in ["\"output\"", "\"dockarea\"", "\"none\""] {
            assert_eq!(serde_json::from_str::<Layout>(name).unwrap(), Layout::None);
        }
        assert_eq!(
            serde_json::from_str::<Layout>("\"stacked\"").unwrap(),
            Layout::Stacked
        );
    }

    #[test]
    fn focused_tiled_child_skips_floating_ids() {
        let mut ws = workspace(10, "1", vec![window(11, "A", "a"), window(12, "B", "b")]);
        ws.floating_nodes.push(window(13, "F", "f"));
        ws.focus = vec![WindowId(13), WindowId(12), WindowId(11)];
        assert_eq!(ws.focused_child(), Some(WindowId(13)));
        assert_eq!(ws.focused_tiled_child(), Some(WindowId(12)));
        ws.focus.clear();
        assert_eq!(ws.focused_tiled_child(), Some(WindowId(11)));
    }

    #[test]
    fn children_list_floating_after_tiled() {
        let mut ws = workspace(20, "1", vec![window(21, "A", "a")]);
        ws.floating_nodes.push(window(22, "B", "b"));
        let ids: Vec<u64> = ws.children().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![21, 22]);
    }

    #[test]
    fn focused_workspace_found_through_nested_leaf() {
        let tree = root(vec![
            workspace(10, "1", vec![window(11, "A", "a")]),
            workspace(
                20,
                "2",
                vec![container(21, Layout::SplitVertical, vec![focused(window(22, "B", "b"))])],
            ),
        ]);
        assert_eq!(tree.focused_workspace().map(|w| w.id), Some(WindowId(20)));
        assert_eq!(tree.find_focused().map(|w| w.id), Some(WindowId(22)));
    }

    #[test]
    fn focused_empty_workspace_is_its_own_workspace() {
        let tree = root(vec![focused(workspace(10, "1", vec![]))]);
        assert_eq!(tree.focused_workspace().map(|w| w.id), Some(WindowId(10)));
    }

    #[test]
    fn workspaces_skip_scratchpad() {
        let tree = root(vec![
            workspace(10, "1", vec![]),
            workspace(11, "__i3_scratch", vec![]),
            workspace(12, "web", vec![]),
        ]);
        let names: Vec<&str> = tree.workspaces().iter().map(|w| w.title()).collect();
        assert_eq!(names, vec!["1", "web"]);
    }

    #[test]
    fn visible_workspace_is_front_of_output_focus() {
        let tree = root(vec![workspace(10, "1", vec![]), workspace(11, "2", vec![])]);
        assert!(tree.is_workspace_visible(WindowId(10)));
        assert!(!tree.is_workspace_visible(WindowId(11)));
    }
}

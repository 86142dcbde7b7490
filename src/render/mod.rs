//! Render enumerated windows as one line of polybar-style markup.
//!
//! Each window becomes a clickable segment made of an optional number, an
//! optional hint label (only while hint mode is active), an icon, and a
//! title.  Containers that are not flattened away render as groups such as
//! `V[vim htop]`, their children sharing the parent's character budget.
//!
//! Rendering is a pure function of the entries, the configuration, and the
//! current hint assignment.

pub mod icons;

use crate::enumerate::{Entry, WindowRef};
use crate::hints::Assignment;
use icons::{IconResolver, IconRule, IconRuleError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which part of a window segment is underlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Underline {
    #[default]
    None,
    Icon,
    Title,
    Both,
}

/// Title bar appearance.
///
/// Colours are polybar colour strings (`#rgb`, `#rrggbb`, `#aarrggbb`).
/// `click_command` is run by polybar when a title is clicked; `{id}` is
/// replaced with the window's container id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Characters available to one top-level entry.
    pub max_length: usize,
    /// Markup placed between top-level entries.
    pub separator: String,
    /// 1-based polybar font index used for icons.
    pub icon_font: u32,
    pub show_icons: bool,
    pub show_titles: bool,
    pub show_numbers: bool,
    pub show_hints: bool,
    pub underline: Underline,
    pub underline_color: Option<String>,
    pub focused_foreground: Option<String>,
    pub urgent_background: Option<String>,
    pub hidden_foreground: Option<String>,
    pub hint_foreground: Option<String>,
    pub icons: Vec<IconRule>,
    /// Window class → strings removed from that class's titles.
    pub formatters: BTreeMap<String, Vec<String>>,
    pub click_command: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_length: 26,
            separator: "%{O12}".into(),
            icon_font: 3,
            show_icons: true,
            show_titles: true,
            show_numbers: false,
            show_hints: true,
            underline: Underline::None,
            underline_color: None,
            focused_foreground: Some("#fff".into()),
            urgent_background: None,
            hidden_foreground: None,
            hint_foreground: Some("#ffb52a".into()),
            icons: icons::default_icon_rules(),
            formatters: icons::default_formatters(),
            click_command: Some("i3-msg '[con_id={id}] focus'".into()),
        }
    }
}

impl RenderConfig {
    /// Replace `$USER` and `$HOST` inside formatter strings.
    pub fn expand_placeholders(&mut self, user: &str, host: &str) {
        for strip in self.formatters.values_mut() {
            for s in strip.iter_mut() {
                *s = s.replace("$USER", user).replace("$HOST", host);
            }
        }
    }
}

/// Hint-mode data the renderer prints next to each window.
#[derive(Debug, Clone, Copy)]
pub struct HintView<'a> {
    pub assignment: &'a Assignment,
    /// Characters typed so far; labels that no longer match are hidden.
    pub typed: &'a str,
}

/// Escape text so polybar does not read it as formatting tags.
pub fn escape_text(text: &str) -> String {
    text.replace('%', "%%")
}

/// Escape a shell command for use inside an `%{A:…:}` action tag.
pub fn escape_action(command: &str) -> String {
    command.replace(':', "\\:")
}

fn underlined(text: &str, color: &str) -> String {
    if color.is_empty() {
        format!("%{{+u}}{}%{{-u}}", text)
    } else {
        format!("%{{u{}}}%{{+u}}{}%{{-u}}", color, text)
    }
}

/// Joins an icon and a title, applying the underline.  Arguments are
/// `(icon, title, underline_color)`.
type Compose = fn(&str, &str, &str) -> String;

/// Pick the composition for a segment shape.
fn composer(has_icon: bool, has_title: bool, underline: Underline) -> Compose {
    match (has_icon, has_title, underline) {
        (false, false, _) => |_, _, _| String::new(),
        (true, false, Underline::None | Underline::Title) => |icon, _, _| icon.to_string(),
        (true, false, Underline::Icon | Underline::Both) => |icon, _, c| underlined(icon, c),
        (false, true, Underline::None | Underline::Icon) => |_, title, _| title.to_string(),
        (false, true, Underline::Title | Underline::Both) => |_, title, c| underlined(title, c),
        (true, true, Underline::None) => |icon, title, _| format!("{} {}", icon, title),
        (true, true, Underline::Icon) => {
            |icon, title, c| format!("{} {}", underlined(icon, c), title)
        }
        (true, true, Underline::Title) => {
            |icon, title, c| format!("{} {}", icon, underlined(title, c))
        }
        (true, true, Underline::Both) => {
            |icon, title, c| underlined(&format!("{} {}", icon, title), c)
        }
    }
}

fn colored(tag: char, color: Option<&str>, text: String) -> String {
    match color {
        Some(c) if !text.is_empty() => format!("%{{{}{}}}{}%{{{}-}}", tag, c, text, tag),
        _ => text,
    }
}

/// Compiled renderer.  Build once per configuration.
#[derive(Debug)]
pub struct Renderer {
    config: RenderConfig,
    icons: IconResolver,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Result<Self, IconRuleError> {
        let icons = IconResolver::new(&config.icons)?;
        Ok(Self { config, icons })
    }

    /// Render `entries` into one line.
    pub fn render(&self, entries: &[Entry<'_>], hints: Option<HintView<'_>>) -> String {
        let mut number = 0;
        entries
            .iter()
            .map(|entry| self.render_entry(entry, self.config.max_length, &mut number, hints))
            .collect::<Vec<_>>()
            .join(&self.config.separator)
    }

    fn render_entry(
        &self,
        entry: &Entry<'_>,
        budget: usize,
        number: &mut usize,
        hints: Option<HintView<'_>>,
    ) -> String {
        match entry {
            Entry::Window(window) => {
                *number += 1;
                self.render_window(window, budget, *number, hints)
            }
            Entry::Group { node, children, .. } => {
                let child_budget = (budget / children.len().max(1)).max(1);
                let inner = children
                    .iter()
                    .map(|child| self.render_entry(child, child_budget, number, hints))
                    .collect::<String>();
                format!("{}[{}]", node.layout.marker(), inner)
            }
        }
    }

    fn render_window(
        &self,
        window: &WindowRef<'_>,
        budget: usize,
        number: usize,
        hints: Option<HintView<'_>>,
    ) -> String {
        let cfg = &self.config;
        let node = window.node;

        let icon = if cfg.show_icons {
            self.icons
                .resolve(node)
                .map(|icon| format!("%{{T{}}}{}%{{T-}}", cfg.icon_font, icon))
        } else {
            None
        };
        let title = if cfg.show_titles {
            let formatted = icons::format_title(node, &cfg.formatters);
            Some(escape_text(&icons::truncate(&formatted, budget)))
        } else {
            None
        };

        let compose = composer(icon.is_some(), title.is_some(), cfg.underline);
        let body = compose(
            icon.as_deref().unwrap_or(""),
            title.as_deref().unwrap_or(""),
            cfg.underline_color.as_deref().unwrap_or(""),
        );

        let number = if cfg.show_numbers {
            format!("{} ", number)
        } else {
            String::new()
        };
        let state_fg = if node.focused {
            cfg.focused_foreground.as_deref()
        } else if !window.visible {
            cfg.hidden_foreground.as_deref()
        } else {
            None
        };

        // `%{F-}` resets to the bar default, so colour runs must not nest.
        let text = match self.hint_label(window, hints) {
            Some(label) => format!(
                "{}{} {}",
                colored('F', state_fg, number),
                colored('F', cfg.hint_foreground.as_deref().or(state_fg), escape_text(label)),
                colored('F', state_fg, body)
            ),
            None => colored('F', state_fg, number + &body),
        };
        let text = if node.urgent {
            colored('B', cfg.urgent_background.as_deref(), text)
        } else {
            text
        };

        match &cfg.click_command {
            Some(command) => {
                let command = command.replace("{id}", &node.id.to_string());
                format!("%{{A1:{}:}} {} %{{A-}}", escape_action(&command), text)
            }
            None => format!(" {} ", text),
        }
    }

    fn hint_label<'h>(&self, window: &WindowRef<'_>, hints: Option<HintView<'h>>) -> Option<&'h str> {
        if !self.config.show_hints {
            return None;
        }
        let hints = hints?;
        hints
            .assignment
            .label_for(window.node.id)
            .filter(|label| label.starts_with(hints.typed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::workspace_entries;
    use crate::tree::testing::*;
    use crate::tree::{Layout, WindowId};

    fn plain() -> RenderConfig {
        RenderConfig {
            separator: "|".into(),
            show_icons: false,
            show_hints: true,
            focused_foreground: None,
            hint_foreground: None,
            icons: Vec::new(),
            formatters: BTreeMap::new(),
            click_command: None,
            ..Default::default()
        }
    }

    #[test]
    fn plain_titles_joined_by_separator() {
        let ws = workspace(10, "1", vec![window(11, "A", "one"), window(12, "B", "two")]);
        let r = Renderer::new(plain()).unwrap();
        assert_eq!(r.render(&workspace_entries(&ws), None), " one | two ");
    }

    #[test]
    fn empty_workspace_renders_empty_line() {
        let ws = workspace(10, "1", vec![]);
        let r = Renderer::new(plain()).unwrap();
        assert_eq!(r.render(&workspace_entries(&ws), None), "");
    }

    #[test]
    fn focused_window_gets_foreground() {
        let ws = workspace(10, "1", vec![focused(window(11, "A", "one"))]);
        let r = Renderer::new(RenderConfig {
            focused_foreground: Some("#fff".into()),
            ..plain()
        })
        .unwrap();
        assert_eq!(r.render(&workspace_entries(&ws), None), " %{F#fff}one%{F-} ");
    }

    #[test]
    fn urgent_and_hidden_windows_are_coloured() {
        let mut urgent = window(12, "B", "two");
        urgent.urgent = true;
        let ws = workspace(
            10,
            "1",
            vec![container(20, Layout::Tabbed, vec![window(11, "A", "one"), urgent])],
        );
        let r = Renderer::new(RenderConfig {
            urgent_background: Some("#f00".into()),
            hidden_foreground: Some("#666".into()),
            ..plain()
        })
        .unwrap();
        assert_eq!(
            r.render(&workspace_entries(&ws), None),
            " one | %{B#f00}%{F#666}two%{F-}%{B-} "
        );
    }

    #[test]
    fn icon_uses_icon_font() {
        let ws = workspace(10, "1", vec![window(11, "Firefox", "docs - Mozilla Firefox")]);
        let r = Renderer::new(RenderConfig {
            show_icons: true,
            icon_font: 3,
            icons: vec![IconRule::new("class=Firefox", "F")],
            formatters: icons::default_formatters(),
            ..plain()
        })
        .unwrap();
        assert_eq!(r.render(&workspace_entries(&ws), None), " %{T3}F%{T-} docs ");
    }

    #[test]
    fn underline_table_covers_shapes() {
        assert_eq!(composer(true, true, Underline::None)("I", "T", "#0f0"), "I T");
        assert_eq!(
            composer(true, true, Underline::Icon)("I", "T", "#0f0"),
            "%{u#0f0}%{+u}I%{-u} T"
        );
        assert_eq!(
            composer(true, true, Underline::Title)("I", "T", ""),
            "I %{+u}T%{-u}"
        );
        assert_eq!(
            composer(true, true, Underline::Both)("I", "T", ""),
            "%{+u}I T%{-u}"
        );
        assert_eq!(composer(true, false, Underline::Title)("I", "", ""), "I");
        assert_eq!(composer(false, true, Underline::Icon)("", "T", ""), "T");
        assert_eq!(composer(false, true, Underline::Both)("", "T", ""), "%{+u}T%{-u}");
        assert_eq!(composer(false, false, Underline::Both)("", "", ""), "");
    }

    #[test]
    fn groups_split_the_budget() {
        let ws = workspace(
            10,
            "1",
            vec![
                window(11, "A", "abcdefghijkl"),
                container(
                    20,
                    Layout::SplitVertical,
                    vec![window(21, "B", "abcdefghijkl"), window(22, "C", "xyz")],
                ),
            ],
        );
        let r = Renderer::new(RenderConfig {
            max_length: 12,
            ..plain()
        })
        .unwrap();
        assert_eq!(
            r.render(&workspace_entries(&ws), None),
            " abcdefghijkl |V[ abc...  xyz ]"
        );
    }

    #[test]
    fn hints_and_numbers_combine() {
        let ws = workspace(10, "1", vec![window(11, "A", "one"), window(12, "B", "two")]);
        let assignment = Assignment::new([WindowId(11), WindowId(12)], vec!["a".into(), "b".into()]);
        let r = Renderer::new(RenderConfig {
            show_numbers: true,
            ..plain()
        })
        .unwrap();
        let hints = HintView {
            assignment: &assignment,
            typed: "",
        };
        assert_eq!(
            r.render(&workspace_entries(&ws), Some(hints)),
            " 1 a one | 2 b two "
        );
    }

    #[test]
    fn focused_colour_survives_hint_label() {
        let ws = workspace(10, "1", vec![focused(window(11, "A", "one"))]);
        let assignment = Assignment::new([WindowId(11)], vec!["a".into()]);
        let hints = HintView {
            assignment: &assignment,
            typed: "",
        };
        let cfg = RenderConfig {
            focused_foreground: Some("#fff".into()),
            hint_foreground: Some("#ffb52a".into()),
            ..plain()
        };
        let r = Renderer::new(cfg.clone()).unwrap();
        assert_eq!(
            r.render(&workspace_entries(&ws), Some(hints)),
            " %{F#ffb52a}a%{F-} %{F#fff}one%{F-} "
        );

        let r = Renderer::new(RenderConfig {
            show_numbers: true,
            ..cfg
        })
        .unwrap();
        assert_eq!(
            r.render(&workspace_entries(&ws), Some(hints)),
            " %{F#fff}1 %{F-}%{F#ffb52a}a%{F-} %{F#fff}one%{F-} "
        );
    }

    #[test]
    fn hidden_label_without_hint_colour_takes_hidden_colour() {
        let ws = workspace(
            10,
            "1",
            vec![container(20, Layout::Stacked, vec![window(11, "A", "one"), window(12, "B", "two")])],
        );
        let assignment = Assignment::new([WindowId(11), WindowId(12)], vec!["a".into(), "b".into()]);
        let r = Renderer::new(RenderConfig {
            hidden_foreground: Some("#666".into()),
            ..plain()
        })
        .unwrap();
        let hints = HintView {
            assignment: &assignment,
            typed: "",
        };
        assert_eq!(
            r.render(&workspace_entries(&ws), Some(hints)),
            "S[ a one  %{F#666}b%{F-} %{F#666}two%{F-} ]"
        );
    }

    #[test]
    fn labels_not_matching_typed_prefix_are_hidden() {
        let ws = workspace(10, "1", vec![window(11, "A", "one"), window(12, "B", "two")]);
        let assignment =
            Assignment::new([WindowId(11), WindowId(12)], vec!["aa".into(), "ba".into()]);
        let r = Renderer::new(plain()).unwrap();
        let hints = HintView {
            assignment: &assignment,
            typed: "b",
        };
        assert_eq!(r.render(&workspace_entries(&ws), Some(hints)), " one | ba two ");
    }

    #[test]
    fn click_action_and_escaping() {
        let ws = workspace(10, "1", vec![window(11, "A", "100% done")]);
        let r = Renderer::new(RenderConfig {
            click_command: Some("i3-msg '[con_id={id}] focus'".into()),
            ..plain()
        })
        .unwrap();
        assert_eq!(
            r.render(&workspace_entries(&ws), None),
            "%{A1:i3-msg '[con_id=11] focus':} 100%% done %{A-}"
        );
        assert_eq!(escape_action("a:b"), "a\\:b");
    }

    #[test]
    fn placeholders_expand_in_formatters() {
        let mut cfg = RenderConfig::default();
        cfg.expand_placeholders("alice", "box");
        assert_eq!(cfg.formatters["URxvt"], vec!["alice@box: ".to_string()]);
    }
}

//! Commands and types used throughout hintbar.
//!
//! This module defines the vocabulary that all components share:
//! [`Command`] describes every action the bar can perform and [`Key`] is
//! one decoded keystroke of hint input.
//!
//! Keys travel as plain strings on the wire (`"a"`, `"BackSpace"`,
//! `"Escape"`) so i3 `bindsym` lines can forward them without any
//! translation.

use crate::enumerate::Scope;
use crate::tree::WindowId;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One logical keystroke of hint input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A label character.
    Char(char),
    /// Remove the last typed character.
    Backspace,
    /// Leave hint mode without focusing anything.
    Cancel,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Backspace => write!(f, "backspace"),
            Key::Cancel => write!(f, "escape"),
        }
    }
}

/// Parse a key name (case-insensitive for named keys; a single character is
/// taken verbatim).
fn parse_key(s: &str) -> Option<Key> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(Key::Char(c));
    }
    let normalized: String = s
        .trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(|c| c.to_lowercase())
        .collect();
    match normalized.as_str() {
        "backspace" | "delete" | "bs" => Some(Key::Backspace),
        "escape" | "esc" | "cancel" => Some(Key::Cancel),
        "space" => Some(Key::Char(' ')),
        _ => None,
    }
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_key(&s).ok_or_else(|| DeError::custom(format!("invalid key: {:?}", s)))
    }
}

/// Every action the bar can perform.
///
/// Commands are produced by [`CommandSource`](crate::traits::CommandSource)
/// implementations and consumed by the [`HintBar`](crate::bar::HintBar).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Pull a fresh tree from the window manager and re-render.
    ///
    /// Sent whenever the window manager reports a window or workspace
    /// change.  An active hint session keeps its labels.
    Refresh,

    /// Enter hint mode over the configured scope.
    EnterHints,

    /// Enter hint mode over `scope`, overriding the configured one for this
    /// session only.
    EnterHintsIn(Scope),

    /// A keystroke while hint mode is active.
    Key(Key),

    /// Leave hint mode.  Same as sending [`Key::Cancel`].
    Cancel,

    /// Focus a window directly, e.g. from a click on its title.
    Focus(WindowId),

    /// Focus the window before the focused one on the current workspace.
    FocusPrev,

    /// Focus the window after the focused one on the current workspace.
    FocusNext,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_named_keys() {
        assert_eq!(parse_key("a"), Some(Key::Char('a')));
        assert_eq!(parse_key("A"), Some(Key::Char('A')));
        assert_eq!(parse_key("BackSpace"), Some(Key::Backspace));
        assert_eq!(parse_key("back_space"), Some(Key::Backspace));
        assert_eq!(parse_key("Delete"), Some(Key::Backspace));
        assert_eq!(parse_key("Escape"), Some(Key::Cancel));
        assert_eq!(parse_key("cancel"), Some(Key::Cancel));
        assert_eq!(parse_key("space"), Some(Key::Char(' ')));
        assert_eq!(parse_key("Return"), None);
        assert_eq!(parse_key(""), None);
    }

    #[test]
    fn key_display_round_trips_through_parse() {
        for key in [Key::Char('j'), Key::Backspace, Key::Cancel] {
            assert_eq!(parse_key(&key.to_string()), Some(key));
        }
    }

    #[test]
    fn deserialize_commands() {
        let cmd: Command = serde_json::from_str(r#""Refresh""#).unwrap();
        assert_eq!(cmd, Command::Refresh);
        let cmd: Command = serde_json::from_str(r#"{"Key":"f"}"#).unwrap();
        assert_eq!(cmd, Command::Key(Key::Char('f')));
        let cmd: Command = serde_json::from_str(r#"{"Key":"Escape"}"#).unwrap();
        assert_eq!(cmd, Command::Key(Key::Cancel));
        let cmd: Command = serde_json::from_str(r#"{"Focus":94827}"#).unwrap();
        assert_eq!(cmd, Command::Focus(WindowId(94827)));
        let cmd: Command = serde_json::from_str(r#""FocusNext""#).unwrap();
        assert_eq!(cmd, Command::FocusNext);
    }

    #[test]
    fn deserialize_enter_hints_with_and_without_scope() {
        let cmd: Command = serde_json::from_str(r#""EnterHints""#).unwrap();
        assert_eq!(cmd, Command::EnterHints);
        let cmd: Command = serde_json::from_str(r#"{"EnterHintsIn":"all-workspaces"}"#).unwrap();
        assert_eq!(cmd, Command::EnterHintsIn(Scope::AllWorkspaces));
    }

    #[test]
    fn invalid_key_is_rejected() {
        assert!(serde_json::from_str::<Command>(r#"{"Key":"Hyper_L"}"#).is_err());
    }
}

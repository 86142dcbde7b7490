//! Hint-mode state machine.
//!
//! A [`HintSession`] is either idle or active.  Starting a session freezes
//! the label assignment for the windows enumerated at that moment; every
//! key then narrows the typed prefix until it names exactly one window
//! (resolved), leaves every label behind (aborted), or the user gives up
//! (cancelled).  All three end the session and return it to idle.
//!
//! The session performs no I/O.  The caller turns a resolved outcome into
//! a focus request.

use crate::command::Key;
use crate::enumerate::Scope;
use crate::hints::{self, Assignment, HintTrie, MatchState};
use crate::tree::WindowId;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Hint-mode settings.
///
/// ```json
/// {
///   "alphabet": "sadfjklewcmpgh",
///   "scope": "current-workspace",
///   "reverse_labels": false,
///   "binding_mode": "hints"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HintConfig {
    /// Characters labels are built from, in order of preference.
    pub alphabet: String,
    /// Which workspaces contribute windows.
    pub scope: Scope,
    /// Reverse every label so the first key picks among the largest groups.
    pub reverse_labels: bool,
    /// i3 binding mode to enter while a session is active, so plain key
    /// presses can be bound to `Key` commands only during hint mode.
    pub binding_mode: Option<String>,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            alphabet: "sadfjklewcmpgh".into(),
            scope: Scope::CurrentWorkspace,
            reverse_labels: false,
            binding_mode: None,
        }
    }
}

impl HintConfig {
    pub fn alphabet_chars(&self) -> Vec<char> {
        self.alphabet.chars().collect()
    }
}

/// Coarse session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
}

/// Result of [`HintSession::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Started {
    /// Labels were handed out to this many windows.
    Active { windows: usize },
    /// There was nothing to label; the session stayed idle.
    Empty,
}

/// Result of feeding one key to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Still active; the typed prefix matches at least one label.
    Pending,
    /// The typed prefix is a complete label.  The session has ended.
    Resolved(WindowId),
    /// The user cancelled.  The session has ended.
    Cancelled,
    /// The typed prefix matches no label.  The session has ended.
    Aborted,
    /// No session was active.
    Ignored,
}

/// Misuse of the session.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a hint session is already active")]
    AlreadyActive,
}

#[derive(Debug)]
struct ActiveSession {
    typed: String,
    assignment: Assignment,
    trie: HintTrie,
}

/// Stateful hint-mode controller.  At most one session is active at a time.
#[derive(Debug, Default)]
pub struct HintSession {
    active: Option<ActiveSession>,
}

impl HintSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        if self.active.is_some() {
            SessionState::Active
        } else {
            SessionState::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Label `windows` (in enumeration order) and start waiting for keys.
    ///
    /// Fails if a session is already active; the running session is left
    /// untouched.
    pub fn start(
        &mut self,
        windows: impl IntoIterator<Item = WindowId>,
        config: &HintConfig,
    ) -> Result<Started, SessionError> {
        if self.active.is_some() {
            return Err(SessionError::AlreadyActive);
        }

        let windows: Vec<WindowId> = windows.into_iter().collect();
        if windows.is_empty() {
            debug!("no windows to label");
            return Ok(Started::Empty);
        }

        let mut labels = hints::generate(windows.len(), &config.alphabet_chars());
        if config.reverse_labels {
            labels = hints::reverse_each(labels);
        }
        let trie: HintTrie = labels.iter().collect();
        let assignment = Assignment::new(windows, labels);
        let count = assignment.len();
        info!("hint mode: {} window(s) labelled", count);

        self.active = Some(ActiveSession {
            typed: String::new(),
            assignment,
            trie,
        });
        Ok(Started::Active { windows: count })
    }

    /// Feed one keystroke.
    pub fn feed(&mut self, key: Key) -> KeyOutcome {
        let Some(active) = self.active.as_mut() else {
            return KeyOutcome::Ignored;
        };

        match key {
            Key::Cancel => {
                info!("hint mode cancelled");
                self.active = None;
                KeyOutcome::Cancelled
            }
            Key::Backspace => {
                active.typed.pop();
                debug!("hint input: {:?}", active.typed);
                KeyOutcome::Pending
            }
            Key::Char(c) => {
                active.typed.push(c);
                let state = active.trie.lookup(active.typed.chars());
                debug!("hint input: {:?} -> {:?}", active.typed, state);
                match state {
                    MatchState::PartialMatch => KeyOutcome::Pending,
                    MatchState::CompleteMatch => {
                        let target = active.assignment.window_for(&active.typed);
                        self.active = None;
                        match target {
                            Some(id) => {
                                info!("hint resolved to window {}", id);
                                KeyOutcome::Resolved(id)
                            }
                            None => KeyOutcome::Aborted,
                        }
                    }
                    MatchState::NoMatch => {
                        info!("hint mode aborted: {:?} matches nothing", active.typed);
                        self.active = None;
                        KeyOutcome::Aborted
                    }
                }
            }
        }
    }

    /// End the active session, if any.  Returns whether one was active.
    pub fn cancel(&mut self) -> bool {
        self.feed(Key::Cancel) == KeyOutcome::Cancelled
    }

    /// The frozen label assignment of the active session.
    pub fn assignment(&self) -> Option<&Assignment> {
        self.active.as_ref().map(|a| &a.assignment)
    }

    /// Characters typed so far in the active session.
    pub fn typed(&self) -> &str {
        self.active.as_ref().map(|a| a.typed.as_str()).unwrap_or("")
    }
}

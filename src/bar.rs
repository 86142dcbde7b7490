//! The orchestrator that ties the window manager, hint session, and
//! renderer together.
//!
//! [`HintBar`] reacts to [`Command`]s by pulling the container tree,
//! driving the [`HintSession`], and issuing focus requests through the
//! [`WindowManager`] trait.  Every handled command may produce a new title
//! line for the bar.

use crate::command::{Command, Key};
use crate::enumerate::{self, Scope};
use crate::render::{HintView, Renderer};
use crate::session::{HintConfig, HintSession, KeyOutcome, SessionError, Started};
use crate::traits::WindowManager;
use crate::tree::{Node, WindowId};
use log::{debug, info, warn};

/// Possible errors from the bar.
#[derive(Debug, thiserror::Error)]
pub enum BarError {
    /// The window manager returned an error.
    #[error("window manager error: {0}")]
    WindowManager(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

fn wm_error(e: impl std::fmt::Display) -> BarError {
    BarError::WindowManager(e.to_string())
}

/// Orchestrates hint mode, focus requests, and title rendering.
///
/// The bar is generic over any [`WindowManager`] implementation, so it can
/// be driven by a fixed tree in tests.
///
/// # Typical usage
///
/// ```ignore
/// let mut bar = HintBar::new(I3Wm::new(), config.hints, Renderer::new(config.render)?);
/// if let Some(line) = bar.handle(Command::Refresh)? {
///     println!("{}", line);
/// }
/// ```
pub struct HintBar<W: WindowManager> {
    wm: W,
    hints: HintConfig,
    renderer: Renderer,
    session: HintSession,
    /// Scope of the active session; the bar shows the same windows the
    /// session labelled.
    session_scope: Option<Scope>,
    last_line: Option<String>,
}

impl<W: WindowManager> HintBar<W> {
    pub fn new(wm: W, hints: HintConfig, renderer: Renderer) -> Self {
        Self {
            wm,
            hints,
            renderer,
            session: HintSession::new(),
            session_scope: None,
            last_line: None,
        }
    }

    pub fn session(&self) -> &HintSession {
        &self.session
    }

    /// Process a single [`Command`].
    ///
    /// Returns the new title line when it differs from the last one
    /// returned, `None` otherwise.
    pub fn handle(&mut self, cmd: Command) -> Result<Option<String>, BarError> {
        match cmd {
            Command::Refresh => {
                debug!("refresh");
                self.refresh()
            }
            Command::EnterHints => {
                let scope = self.hints.scope;
                self.enter_hints(scope)
            }
            Command::EnterHintsIn(scope) => self.enter_hints(scope),
            Command::Key(key) => self.feed(key),
            Command::Cancel => self.feed(Key::Cancel),
            Command::Focus(window) => {
                info!("focus {}", window);
                self.wm.focus(window).map_err(wm_error)?;
                Ok(None)
            }
            Command::FocusPrev => self.focus_relative(-1),
            Command::FocusNext => self.focus_relative(1),
        }
    }

    fn refresh(&mut self) -> Result<Option<String>, BarError> {
        let tree = self.wm.tree().map_err(wm_error)?;
        Ok(self.render(&tree))
    }

    fn enter_hints(&mut self, scope: Scope) -> Result<Option<String>, BarError> {
        if self.session.is_active() {
            return Err(SessionError::AlreadyActive.into());
        }
        info!("enter hints ({:?})", scope);

        let tree = self.wm.tree().map_err(wm_error)?;
        let windows = enumerate::enumerate(&tree, scope)
            .into_iter()
            .map(|w| w.node.id);
        match self.session.start(windows, &self.hints)? {
            Started::Empty => info!("nothing to hint"),
            Started::Active { .. } => {
                self.session_scope = Some(scope);
                if let Some(mode) = &self.hints.binding_mode {
                    if let Err(e) = self.wm.set_binding_mode(mode) {
                        warn!("could not enter binding mode {:?}: {}", mode, e);
                    }
                }
            }
        }
        Ok(self.render(&tree))
    }

    fn feed(&mut self, key: Key) -> Result<Option<String>, BarError> {
        match self.session.feed(key) {
            KeyOutcome::Ignored => {
                debug!("key {} outside hint mode", key);
                return Ok(None);
            }
            KeyOutcome::Pending => {}
            KeyOutcome::Resolved(window) => {
                self.finish_session();
                self.focus_or_warn(window);
            }
            KeyOutcome::Cancelled | KeyOutcome::Aborted => self.finish_session(),
        }
        self.refresh()
    }

    fn finish_session(&mut self) {
        self.session_scope = None;
        if self.hints.binding_mode.is_some() {
            if let Err(e) = self.wm.set_binding_mode("default") {
                warn!("could not leave binding mode: {}", e);
            }
        }
    }

    /// A hinted window may have closed since the session started.
    fn focus_or_warn(&self, window: WindowId) {
        if let Err(e) = self.wm.focus(window) {
            warn!("focus {} failed: {}", window, e);
        }
    }

    fn focus_relative(&mut self, step: isize) -> Result<Option<String>, BarError> {
        let tree = self.wm.tree().map_err(wm_error)?;
        let windows = enumerate::enumerate(&tree, Scope::CurrentWorkspace);
        let Some(focused) = tree.find_focused().map(|n| n.id) else {
            debug!("nothing focused");
            return Ok(None);
        };
        let Some(current) = windows.iter().position(|w| w.node.id == focused) else {
            debug!("focused container {} is not a listed window", focused);
            return Ok(None);
        };

        let target = current
            .saturating_add_signed(step)
            .min(windows.len().saturating_sub(1));
        if target != current {
            let window = windows[target].node.id;
            info!("focus {}", window);
            self.wm.focus(window).map_err(wm_error)?;
        }
        Ok(None)
    }

    fn render(&mut self, tree: &Node) -> Option<String> {
        let scope = self.session_scope.unwrap_or(Scope::CurrentWorkspace);
        let entries = enumerate::entries(tree, scope);
        let hints = self.session.assignment().map(|assignment| HintView {
            assignment,
            typed: self.session.typed(),
        });
        let line = self.renderer.render(&entries, hints);
        if self.last_line.as_deref() == Some(line.as_str()) {
            return None;
        }
        self.last_line = Some(line.clone());
        Some(line)
    }
}

//! [`WindowManager`] implementation backed by i3 IPC.
//!
//! Communicates directly with i3 (or sway) through the socket named by
//! `$I3SOCK` / `$SWAYSOCK`, without spawning `i3-msg` or pulling in a
//! client crate.

use super::ipc::{self, I3Error, MessageType};
use crate::traits::WindowManager;
use crate::tree::{Node, WindowId};
use log::debug;
use serde::Deserialize;
use std::path::PathBuf;

/// i3-backed window manager.
///
/// No connection is held open; each method call is one short-lived IPC
/// request.
pub struct I3Wm {
    socket: Option<PathBuf>,
}

impl Default for I3Wm {
    fn default() -> Self {
        Self::new()
    }
}

impl I3Wm {
    /// Create a handle that resolves the socket from the environment on
    /// every request.
    pub fn new() -> Self {
        Self { socket: None }
    }

    /// Create a handle bound to an explicit socket path.
    pub fn with_socket(path: impl Into<PathBuf>) -> Self {
        Self {
            socket: Some(path.into()),
        }
    }

    fn socket(&self) -> Result<PathBuf, I3Error> {
        match &self.socket {
            Some(path) => Ok(path.clone()),
            None => ipc::socket_path(),
        }
    }

    /// Run an i3 command and fail if i3 reports it unsuccessful.
    pub fn run_command(&self, command: &str) -> Result<(), I3Error> {
        debug!("i3 command: {}", command);
        let reply = ipc::request(&self.socket()?, MessageType::RunCommand, command.as_bytes())?;
        let outcomes: Vec<CommandOutcome> = serde_json::from_slice(&reply)?;
        match outcomes.into_iter().find(|o| !o.success) {
            Some(failed) => Err(I3Error::Protocol(format!(
                "{:?} failed: {}",
                command,
                failed.error.unwrap_or_else(|| "unknown error".into())
            ))),
            None => Ok(()),
        }
    }
}

/// One element of a RUN_COMMAND reply.
#[derive(Deserialize)]
struct CommandOutcome {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Quote `s` for use inside an i3 command string.
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

impl WindowManager for I3Wm {
    type Error = I3Error;

    fn tree(&self) -> Result<Node, Self::Error> {
        let reply = ipc::request(&self.socket()?, MessageType::GetTree, b"")?;
        Ok(serde_json::from_slice(&reply)?)
    }

    fn focus(&self, window: WindowId) -> Result<(), Self::Error> {
        self.run_command(&format!("[con_id={}] focus", window))
    }

    fn set_binding_mode(&self, mode: &str) -> Result<(), Self::Error> {
        self.run_command(&format!("mode {}", quote(mode)))
    }
}

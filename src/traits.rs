//! Core traits that decouple hintbar from any specific window manager or
//! transport mechanism.
//!
//! Every concrete backend (i3 IPC, a Unix-socket listener, a test harness)
//! implements one of these traits.  The [`HintBar`](crate::bar::HintBar)
//! only depends on these abstractions.

use crate::command::Command;
use crate::tree::{Node, WindowId};
use std::sync::mpsc;

/// Abstraction over a window manager that exposes a container tree and can
/// focus windows.
///
/// An implementation might talk to i3 via IPC, or it might be a stub
/// serving a fixed tree in tests.
pub trait WindowManager {
    /// The error type produced by this window manager.
    type Error: std::error::Error + Send + 'static;

    /// Return a fresh snapshot of the whole container tree.
    fn tree(&self) -> Result<Node, Self::Error>;

    /// Focus the container with the given id.
    ///
    /// The window may have closed since it was enumerated; implementations
    /// report that as an error and callers treat it as non-fatal.
    fn focus(&self, window: WindowId) -> Result<(), Self::Error>;

    /// Switch the active key binding mode (`"default"` leaves any mode).
    fn set_binding_mode(&self, mode: &str) -> Result<(), Self::Error>;
}

/// A source of [`Command`]s.
///
/// Implementations listen on some transport (a Unix socket or the window
/// manager's event stream) and forward parsed commands into the provided
/// [`mpsc::Sender`].  Every source feeds the
/// same channel, so the bar sees one ordered stream.
///
/// # Contract
///
/// * [`run`](CommandSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Each received command must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait CommandSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`Command`] into `sink`.
    ///
    /// This method blocks the calling thread.  To run multiple sources
    /// concurrently, spawn each one on its own thread.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error>;
}

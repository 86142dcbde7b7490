//! IPC listener that accepts commands over a Unix socket.
//!
//! Key bindings, polybar click actions, and scripts connect to the socket
//! and send newline-delimited JSON commands (see `hintbar-msg`).

pub mod listener;

/// Default socket path for the command listener
/// (`$XDG_RUNTIME_DIR/hintbar.sock`, falling back to `/tmp`).
pub fn default_socket_path() -> std::path::PathBuf {
    let runtime = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
    std::path::PathBuf::from(runtime).join("hintbar.sock")
}

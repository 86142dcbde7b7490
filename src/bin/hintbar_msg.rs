//! Send commands to a running hintbar.
//!
//! Meant for i3 `bindsym` lines and polybar click actions:
//!
//! ```text
//! hintbar-msg enter-hints
//! hintbar-msg enter-hints all-visible-workspaces
//! hintbar-msg key a
//! hintbar-msg key BackSpace
//! hintbar-msg cancel
//! hintbar-msg focus 94827365
//! hintbar-msg focus-next
//! hintbar-msg '{"Key":"f"}'
//! ```
//!
//! Arguments starting with `{` or `"` are sent verbatim as JSON.  The
//! socket is `$HINTBAR_SOCKET` if set, otherwise the daemon's default.

use hintbar::command::{Command, Key};
use hintbar::enumerate::Scope;
use hintbar::ipc::default_socket_path;
use hintbar::tree::WindowId;
use log::{debug, error};
use serde::de::DeserializeOwned;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
enum MsgError {
    #[error("usage: {0}")]
    Usage(String),
    #[error("invalid argument: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot reach hintbar: {0}")]
    Io(#[from] std::io::Error),
}

/// Decode a bare name (`"escape"`, `"all-workspaces"`) with the type's own
/// serde representation.
fn from_name<T: DeserializeOwned>(name: &str) -> Result<T, MsgError> {
    Ok(serde_json::from_value(serde_json::Value::String(name.into()))?)
}

fn parse_args(args: &[String]) -> Result<Vec<String>, MsgError> {
    let mut lines = Vec::new();
    let mut args = args.iter().map(String::as_str).peekable();
    while let Some(arg) = args.next() {
        if arg.starts_with('{') || arg.starts_with('"') {
            serde_json::from_str::<Command>(arg)?;
            lines.push(arg.to_string());
            continue;
        }
        let cmd = match arg {
            "refresh" => Command::Refresh,
            "enter-hints" => match args.peek() {
                Some(next) if from_name::<Scope>(next).is_ok() => {
                    let scope = from_name(next)?;
                    args.next();
                    Command::EnterHintsIn(scope)
                }
                _ => Command::EnterHints,
            },
            "key" => {
                let name = args
                    .next()
                    .ok_or_else(|| MsgError::Usage("key <name>".into()))?;
                Command::Key(from_name::<Key>(name)?)
            }
            "cancel" => Command::Cancel,
            "focus" => {
                let id = args
                    .next()
                    .and_then(|id| id.parse().ok())
                    .ok_or_else(|| MsgError::Usage("focus <con_id>".into()))?;
                Command::Focus(WindowId(id))
            }
            "focus-prev" => Command::FocusPrev,
            "focus-next" => Command::FocusNext,
            other => return Err(MsgError::Usage(format!("unknown command {:?}", other))),
        };
        lines.push(serde_json::to_string(&cmd)?);
    }
    Ok(lines)
}

fn send(lines: &[String]) -> Result<(), MsgError> {
    let path = std::env::var("HINTBAR_SOCKET")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_socket_path());
    let mut stream = UnixStream::connect(&path)?;
    for line in lines {
        debug!("sending {}", line);
        writeln!(stream, "{}", line)?;
    }
    stream.flush()?;
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: hintbar-msg <command> [args] ...");
        std::process::exit(2);
    }
    if let Err(e) = parse_args(&args).and_then(|lines| send(&lines)) {
        error!("{}", e);
        eprintln!("hintbar-msg: {}", e);
        std::process::exit(1);
    }
}

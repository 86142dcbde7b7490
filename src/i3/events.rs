//! Turns i3 window and workspace events into [`Command::Refresh`].
//!
//! [`I3EventSource`] opens a dedicated IPC connection, subscribes to the
//! `window` and `workspace` event streams, and emits one refresh per event.
//! The bar pulls a fresh tree in response, so event payloads are never
//! parsed.

use super::ipc::{self, EventType, I3Error, MessageType};
use crate::command::Command;
use crate::traits::CommandSource;
use log::{debug, info, warn};
use serde::Deserialize;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::sync::mpsc;

/// A [`CommandSource`] fed by the i3 event stream.
pub struct I3EventSource {
    socket: Option<PathBuf>,
}

impl Default for I3EventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl I3EventSource {
    pub fn new() -> Self {
        Self { socket: None }
    }

    pub fn with_socket(path: impl Into<PathBuf>) -> Self {
        Self {
            socket: Some(path.into()),
        }
    }
}

#[derive(Deserialize)]
struct SubscribeReply {
    success: bool,
}

impl CommandSource for I3EventSource {
    type Error = I3Error;

    /// Subscribe and forward events until i3 shuts down or the sink closes.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error> {
        let path = match &self.socket {
            Some(path) => path.clone(),
            None => ipc::socket_path()?,
        };
        let mut stream = UnixStream::connect(&path)?;
        ipc::write_message(
            &mut stream,
            MessageType::Subscribe as u32,
            br#"["window","workspace"]"#,
        )?;

        let reply: SubscribeReply = loop {
            let (msg_type, payload) = ipc::read_message(&mut stream)?;
            if msg_type == MessageType::Subscribe as u32 {
                break serde_json::from_slice(&payload)?;
            }
        };
        if !reply.success {
            return Err(I3Error::Protocol("subscription refused".into()));
        }
        info!("subscribed to i3 events on {}", path.display());

        loop {
            let (msg_type, _) = ipc::read_message(&mut stream)?;
            match EventType::from_raw(msg_type) {
                Some(EventType::Window | EventType::Workspace) => {
                    debug!("i3 event {:?}", EventType::from_raw(msg_type));
                    if sink.send(Command::Refresh).is_err() {
                        info!("sink closed, shutting down");
                        return Ok(());
                    }
                }
                Some(EventType::Shutdown) => {
                    warn!("i3 is shutting down");
                    return Ok(());
                }
                Some(_) => {}
                None => debug!("ignoring non-event message type {}", msg_type),
            }
        }
    }
}

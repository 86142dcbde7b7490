//! i3 IPC message framing.
//!
//! Every message, in both directions, is
//!
//! | Bytes | Content                                  |
//! |-------|------------------------------------------|
//! | 6     | the magic string `i3-ipc`                |
//! | 4     | payload length, u32 little-endian        |
//! | 4     | message type, u32 little-endian          |
//! | n     | payload (JSON)                           |
//!
//! Replies carry the type of the request they answer.  Events pushed to a
//! subscribed connection have the high bit of the type set.

use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};

pub const MAGIC: &[u8; 6] = b"i3-ipc";

/// Set on the type of every event message.
pub const EVENT_BIT: u32 = 1 << 31;

/// Upper bound on a single payload; anything larger is a framing error.
const MAX_PAYLOAD: usize = 64 * 1024 * 1024;

/// Request types hintbar sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum MessageType {
    RunCommand = 0,
    Subscribe = 2,
    GetTree = 4,
}

/// Event types hintbar reacts to (with [`EVENT_BIT`] cleared).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Workspace,
    Output,
    Mode,
    Window,
    Shutdown,
    Other(u32),
}

impl EventType {
    pub fn from_raw(raw: u32) -> Option<Self> {
        if raw & EVENT_BIT == 0 {
            return None;
        }
        Some(match raw & !EVENT_BIT {
            0 => EventType::Workspace,
            1 => EventType::Output,
            2 => EventType::Mode,
            3 => EventType::Window,
            6 => EventType::Shutdown,
            other => EventType::Other(other),
        })
    }
}

/// Errors from talking to i3.
#[derive(Debug, thiserror::Error)]
pub enum I3Error {
    #[error("neither I3SOCK nor SWAYSOCK is set")]
    NoSocket,
    #[error("i3 IPC io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("i3 IPC json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("i3 IPC protocol error: {0}")]
    Protocol(String),
}

/// Resolve the IPC socket path from `$I3SOCK`, falling back to `$SWAYSOCK`.
pub fn socket_path() -> Result<PathBuf, I3Error> {
    std::env::var_os("I3SOCK")
        .or_else(|| std::env::var_os("SWAYSOCK"))
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .ok_or(I3Error::NoSocket)
}

/// Frame `payload` as a message of type `msg_type`.
pub fn encode(msg_type: u32, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(MAGIC.len() + 8 + payload.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    buf.extend_from_slice(&msg_type.to_le_bytes());
    buf.extend_from_slice(payload);
    buf
}

pub fn write_message<W: Write>(w: &mut W, msg_type: u32, payload: &[u8]) -> Result<(), I3Error> {
    w.write_all(&encode(msg_type, payload))?;
    w.flush()?;
    Ok(())
}

/// Read one framed message, returning its raw type and payload.
pub fn read_message<R: Read>(r: &mut R) -> Result<(u32, Vec<u8>), I3Error> {
    let mut header = [0u8; 14];
    r.read_exact(&mut header)?;
    if &header[..6] != MAGIC {
        return Err(I3Error::Protocol(format!("bad magic {:?}", &header[..6])));
    }
    let len = u32::from_le_bytes([header[6], header[7], header[8], header[9]]) as usize;
    let msg_type = u32::from_le_bytes([header[10], header[11], header[12], header[13]]);
    if len > MAX_PAYLOAD {
        return Err(I3Error::Protocol(format!("payload of {} bytes", len)));
    }
    let mut payload = vec![0u8; len];
    r.read_exact(&mut payload)?;
    Ok((msg_type, payload))
}

/// Send one request on a fresh connection and return the reply payload.
pub fn request(socket: &Path, msg_type: MessageType, payload: &[u8]) -> Result<Vec<u8>, I3Error> {
    let mut stream = UnixStream::connect(socket)?;
    write_message(&mut stream, msg_type as u32, payload)?;
    let (reply_type, reply) = read_message(&mut stream)?;
    if reply_type != msg_type as u32 {
        return Err(I3Error::Protocol(format!(
            "expected reply type {}, got {}",
            msg_type as u32, reply_type
        )));
    }
    Ok(reply)
}

//! i3-specific implementations (sway speaks the same protocol).
//!
//! This module provides concrete backends for the
//! [`WindowManager`](crate::traits::WindowManager) and
//! [`CommandSource`](crate::traits::CommandSource) traits, powered by the
//! i3 IPC socket.
//!
//! Nothing outside this module should reference i3 IPC directly.

pub mod events;
pub mod ipc;
pub mod wm;

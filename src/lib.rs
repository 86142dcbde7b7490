//! **hintbar**: keyboard hints for window titles in an i3 status bar.
//!
//! hintbar prints a polybar line listing the windows of the current
//! workspace.  On request it enters *hint mode*: every listed window gets a
//! short label built from a configurable alphabet, and typing a label
//! focuses that window.
//!
//! # Architecture
//!
//! The crate is organised around two core traits:
//!
//! * [`traits::WindowManager`] abstracts reading the container tree and
//!   focusing windows, so hint logic is not coupled to i3.
//! * [`traits::CommandSource`] abstracts the transports that deliver
//!   commands (the Unix-socket listener and the i3 event stream).
//!
//! Pure pieces ([`hints`], [`enumerate`], [`session`], [`render`]) perform
//! no I/O.  [`bar::HintBar`] wires them to a window manager.  Concrete
//! implementations live in [`i3`] (i3 IPC) and [`ipc`] (command socket).

pub mod bar;
pub mod command;
pub mod config;
pub mod enumerate;
pub mod hints;
pub mod i3;
pub mod ipc;
pub mod render;
pub mod session;
pub mod traits;
pub mod tree;

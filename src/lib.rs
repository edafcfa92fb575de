//! To-do list library
//!
//! The task-list state machine, its event surface, rendering and the
//! interactive shell host. Exposed as a library for testing and embedding.

pub mod cli;
pub mod config;
pub mod controller;
pub mod dates;
pub mod error;
pub mod events;
pub mod format;
pub mod logging;
pub mod shell;
pub mod types;
pub mod view_state;

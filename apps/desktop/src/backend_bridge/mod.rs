//! Bridge between the UI thread and the avatar decode worker.

pub mod commands;
pub mod runtime;

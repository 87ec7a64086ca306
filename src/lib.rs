//! slirc-bot - chat command dispatch for IRC bots.
//!
//! Takes tokenized protocol lines, recognizes prefix-style (`~ping`) and
//! address-style (`bot: ping`) commands, checks the sender's permissions,
//! binds the arguments each handler declares, and routes replies to a
//! [`ReplySink`](handlers::ReplySink).

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod security;
pub mod services;
pub mod telemetry;

pub use error::{DispatchError, HandlerError, PermissionError, RegistryError};
pub use handlers::{Command, Dispatcher, Outcome};
pub use slirc_line::Line;

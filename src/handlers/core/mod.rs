//! Core handler infrastructure.
//!
//! - [`context`]: the per-line [`Invocation`] and the [`Bound`] arguments handlers receive
//! - [`traits`]: the [`CommandHandler`] capability and [`Reply`]
//! - [`middleware`]: [`ReplySink`] implementations
//! - [`registry`]: the alias table

pub mod context;
pub mod middleware;
pub mod registry;
pub mod traits;

pub use context::{Bound, Extras, Invocation, NamedArgs, Value};
pub use middleware::{LogSink, ReplySink};
pub use registry::Registry;
pub use traits::{CommandHandler, HandlerResult, Reply, Signature, SyncHandler, sync_handler};

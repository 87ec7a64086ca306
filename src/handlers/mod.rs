//! Chat command handling.
//!
//! A line flows through [`extract`], a [`Registry`] lookup, the permission
//! check, the [`binder`], and finally the command's handler. The
//! [`Dispatcher`] drives that pipeline and owns the built-in [`help`] command.

pub mod binder;
pub mod command;
pub mod core;
pub mod dispatcher;
pub mod extract;
pub mod help;
pub mod scan;

pub use command::{Binding, Command, CommandBuilder, Help};
pub use self::core::{
    Bound, CommandHandler, Extras, HandlerResult, Invocation, LogSink, NamedArgs, Registry,
    Reply, ReplySink, Signature, SyncHandler, Value, sync_handler,
};
pub use dispatcher::{ACCESS_DENIED, Dispatcher, Outcome};
pub use extract::extract_command;
pub use scan::{CommandSet, CommandTag, scan};

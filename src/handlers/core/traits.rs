//! The command handler capability.
//!
//! Every handler has one asynchronous contract. Synchronous handlers are
//! closures wrapped by [`sync_handler`]; their future is ready on first poll,
//! so callers never need to test which kind they hold.

use super::context::Bound;
use crate::error::HandlerError;
use async_trait::async_trait;
use std::sync::Arc;

/// Result type for command handlers.
pub type HandlerResult = Result<Reply, HandlerError>;

/// What a handler wants sent back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Reply {
    /// Nothing; the handler replied through its own channel, or had nothing to say.
    #[default]
    None,
    /// One reply line.
    Line(String),
    /// Several reply lines, sent in order.
    Lines(Vec<String>),
}

impl Reply {
    /// Whether no reply will be emitted.
    pub fn is_none(&self) -> bool {
        matches!(self, Reply::None)
    }

    /// The reply lines, in emission order.
    pub fn into_lines(self) -> Vec<String> {
        match self {
            Reply::None => Vec::new(),
            Reply::Line(line) => vec![line],
            Reply::Lines(lines) => lines,
        }
    }
}

impl From<()> for Reply {
    fn from(_: ()) -> Self {
        Reply::None
    }
}

impl From<String> for Reply {
    fn from(line: String) -> Self {
        Reply::Line(line)
    }
}

impl From<&str> for Reply {
    fn from(line: &str) -> Self {
        Reply::Line(line.to_string())
    }
}

impl From<Vec<String>> for Reply {
    fn from(lines: Vec<String>) -> Self {
        Reply::Lines(lines)
    }
}

impl<T: Into<Reply>> From<Option<T>> for Reply {
    fn from(reply: Option<T>) -> Self {
        reply.map_or(Reply::None, Into::into)
    }
}

/// How a handler wants its arguments shaped when inspection is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    /// A single opaque argument: the whole invocation context.
    Context,
    /// The listed names, each bound if the invocation can supply it.
    Named(&'static [&'static str]),
}

/// A command callback.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// The argument shape this handler declares.
    fn signature(&self) -> Signature {
        Signature::Named(&[])
    }

    /// Run the command.
    async fn call(&self, args: Bound<'_>) -> HandlerResult;
}

/// A synchronous closure handler.
pub struct SyncHandler<F> {
    signature: Signature,
    f: F,
}

#[async_trait]
impl<F> CommandHandler for SyncHandler<F>
where
    F: Fn(Bound<'_>) -> HandlerResult + Send + Sync,
{
    fn signature(&self) -> Signature {
        self.signature
    }

    async fn call(&self, args: Bound<'_>) -> HandlerResult {
        (self.f)(args)
    }
}

/// Wrap a synchronous closure as a [`CommandHandler`].
///
/// ```ignore
/// let echo = sync_handler(Signature::Named(&["args"]), |bound| match bound {
///     Bound::Named(named) => Ok(named.args()?.join(" ").into()),
///     other => Ok(other.kind().into()),
/// });
/// ```
pub fn sync_handler<F>(signature: Signature, f: F) -> Arc<dyn CommandHandler>
where
    F: Fn(Bound<'_>) -> HandlerResult + Send + Sync + 'static,
{
    Arc::new(SyncHandler { signature, f })
}

//! Unified error handling for slirc-bot.
//!
//! Registration mistakes are fatal configuration errors raised to whoever
//! builds the dispatcher. Dispatch errors reach the host, which decides how
//! to isolate them. Access denial and unknown commands are not errors at all:
//! they are ordinary [`Outcome`](crate::handlers::Outcome)s.

use thiserror::Error;

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised while building or registering commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("command {0} already exists")]
    DuplicateCommand(String),

    #[error("command {0} has no help text")]
    MissingHelp(String),

    #[error("command has no names")]
    NoNames,

    #[error("command names must not be empty")]
    EmptyName,

    /// The same handler object was tagged twice in one command set.
    #[error("command {0} defined twice")]
    DefinedTwice(String),
}

// ============================================================================
// Handler Errors (raised by callbacks)
// ============================================================================

/// Errors a command handler can return.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A declared parameter had no value in the invocation.
    #[error("parameter {0} is not bound")]
    Unbound(String),

    /// A bound parameter did not hold the kind of value the handler asked for.
    #[error("parameter {name} is not {expected}")]
    WrongKind { name: String, expected: &'static str },

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HandlerError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unbound(_) => "unbound_parameter",
            Self::WrongKind { .. } => "wrong_kind",
            Self::Internal(_) => "internal_error",
            Self::Other(_) => "handler_error",
        }
    }
}

// ============================================================================
// Dispatch Errors
// ============================================================================

/// Errors that end a dispatch and are handed back to the host.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A command requires permissions but the dispatcher has no resolver.
    #[error("cannot check permissions for {command}: no permission resolver configured")]
    NoPermissionResolver { command: String },

    /// The command's handler failed.
    #[error("command {command} failed: {source}")]
    Handler {
        command: String,
        #[source]
        source: HandlerError,
    },
}

impl DispatchError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoPermissionResolver { .. } => "no_permission_resolver",
            Self::Handler { source, .. } => source.error_code(),
        }
    }
}

// ============================================================================
// Permission Errors
// ============================================================================

/// Errors building a permission resolver.
#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

//! Invocation context and bound handler arguments.
//!
//! An [`Invocation`] lives for exactly one dispatched line. The binder turns
//! it into a [`Bound`] value shaped by the command's binding strategy, and the
//! handler receives that.

use super::registry::Registry;
use crate::error::HandlerError;
use slirc_line::Line;
use std::collections::BTreeMap;

/// Caller-supplied key/value data made available to handlers by name.
pub type Extras = BTreeMap<String, String>;

/// Everything known about one command invocation.
pub struct Invocation<'a> {
    /// Argument text after the command token, verbatim.
    pub args_str: &'a str,
    /// `args_str` split on whitespace.
    pub args: Vec<String>,
    /// The line that carried the command.
    pub line: &'a Line,
    /// The command token as the sender typed it.
    pub command: &'a str,
    /// The bot's nickname at dispatch time, if the host supplied one.
    pub nickname: Option<&'a str>,
    /// Where replies go: the channel, or the sender for private messages.
    pub target: &'a str,
    /// Extra data supplied by the host for this dispatch.
    pub extras: &'a Extras,
    /// The registry the command was found in.
    pub registry: &'a Registry,
}

impl<'a> Invocation<'a> {
    /// Nickname of the sender.
    pub fn sender(&self) -> Option<&'a str> {
        self.line.nick()
    }

    /// Full `nick!user@host` of the sender.
    pub fn source(&self) -> Option<String> {
        self.line.source()
    }

    /// Whether the reply target is the sender rather than a channel.
    pub fn is_private(&self) -> bool {
        self.sender() == Some(self.target)
    }
}

/// One value a handler can ask for by name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// `args`: whitespace-split argument tokens.
    Args(&'a [String]),
    /// `args_str`: the raw argument text.
    ArgsStr(&'a str),
    /// `raw_line`: the originating line.
    RawLine(&'a Line),
    /// A host-supplied extra.
    Extra(&'a str),
}

impl<'a> Value<'a> {
    /// The argument tokens, if this is `Args`.
    pub fn as_args(&self) -> Option<&'a [String]> {
        match *self {
            Value::Args(args) => Some(args),
            _ => None,
        }
    }

    /// The text, if this is `ArgsStr` or an extra.
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Value::ArgsStr(s) | Value::Extra(s) => Some(s),
            _ => None,
        }
    }

    /// The line, if this is `RawLine`.
    pub fn as_line(&self) -> Option<&'a Line> {
        match *self {
            Value::RawLine(line) => Some(line),
            _ => None,
        }
    }
}

/// Named values bound for a handler.
///
/// Only names the handler declared and the invocation could supply are
/// present. Asking for anything else with [`NamedArgs::require`] is a
/// binding error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedArgs<'a> {
    values: Vec<(&'a str, Value<'a>)>,
}

impl<'a> NamedArgs<'a> {
    pub(crate) fn insert(&mut self, name: &'a str, value: Value<'a>) {
        self.values.push((name, value));
    }

    /// Look up a bound value.
    pub fn get(&self, name: &str) -> Option<Value<'a>> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    /// Whether `name` was bound.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of bound values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bound names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.values.iter().map(|(n, _)| *n)
    }

    /// Look up a value the handler cannot do without.
    pub fn require(&self, name: &str) -> Result<Value<'a>, HandlerError> {
        self.get(name)
            .ok_or_else(|| HandlerError::Unbound(name.to_string()))
    }

    /// The `args` tokens.
    pub fn args(&self) -> Result<&'a [String], HandlerError> {
        self.require("args")?
            .as_args()
            .ok_or_else(|| wrong_kind("args", "a token list"))
    }

    /// The `args_str` text.
    pub fn args_str(&self) -> Result<&'a str, HandlerError> {
        self.require("args_str")?
            .as_str()
            .ok_or_else(|| wrong_kind("args_str", "text"))
    }

    /// The `raw_line`.
    pub fn raw_line(&self) -> Result<&'a Line, HandlerError> {
        self.require("raw_line")?
            .as_line()
            .ok_or_else(|| wrong_kind("raw_line", "a line"))
    }
}

fn wrong_kind(name: &str, expected: &'static str) -> HandlerError {
    HandlerError::WrongKind {
        name: name.to_string(),
        expected,
    }
}

/// The arguments a handler is called with.
pub enum Bound<'a> {
    /// Inspection disabled: the raw argument text only.
    Raw(&'a str),
    /// Explicit override list, in list order, unknown names skipped.
    Positional(Vec<Value<'a>>),
    /// Names declared by the handler.
    Named(NamedArgs<'a>),
    /// The whole invocation context.
    Context(&'a Invocation<'a>),
}

impl<'a> Bound<'a> {
    /// Short name of the binding shape, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Bound::Raw(_) => "raw",
            Bound::Positional(_) => "positional",
            Bound::Named(_) => "named",
            Bound::Context(_) => "context",
        }
    }
}

impl std::fmt::Debug for Bound<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Raw(s) => f.debug_tuple("Raw").field(s).finish(),
            Bound::Positional(values) => f.debug_tuple("Positional").field(values).finish(),
            Bound::Named(named) => f.debug_tuple("Named").field(named).finish(),
            Bound::Context(inv) => f.debug_tuple("Context").field(&inv.command).finish(),
        }
    }
}

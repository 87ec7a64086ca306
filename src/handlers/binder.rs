//! Argument binding.
//!
//! Turns one [`Invocation`] into the [`Bound`] arguments a command's handler
//! receives, following the [`Binding`] fixed when the command was built.

use super::command::{Binding, Command};
use super::core::context::{Bound, Invocation, NamedArgs, Value};

/// Whitespace-split argument tokens.
pub const ARGS: &str = "args";
/// Raw argument text.
pub const ARGS_STR: &str = "args_str";
/// The originating line.
pub const RAW_LINE: &str = "raw_line";

/// Look up a passable value by name.
///
/// The fixed table (`args`, `args_str`, `raw_line`) is consulted before the
/// caller's extras, so an extra cannot shadow it.
pub fn passable<'a>(name: &str, invocation: &'a Invocation<'a>) -> Option<Value<'a>> {
    match name {
        ARGS => Some(Value::Args(&invocation.args)),
        ARGS_STR => Some(Value::ArgsStr(invocation.args_str)),
        RAW_LINE => Some(Value::RawLine(invocation.line)),
        _ => invocation
            .extras
            .get(name)
            .map(|value| Value::Extra(value.as_str())),
    }
}

/// Assemble the handler arguments for `command`.
pub fn bind<'a>(command: &'a Command, invocation: &'a Invocation<'a>) -> Bound<'a> {
    match command.binding() {
        Binding::Raw => Bound::Raw(invocation.args_str),
        Binding::Ordered(names) => Bound::Positional(
            names
                .iter()
                .filter_map(|name| passable(name, invocation))
                .collect(),
        ),
        Binding::Named(names) => {
            let mut named = NamedArgs::default();
            for name in names {
                if let Some(value) = passable(name, invocation) {
                    named.insert(name.as_str(), value);
                }
            }
            Bound::Named(named)
        }
        Binding::Context => Bound::Context(invocation),
    }
}

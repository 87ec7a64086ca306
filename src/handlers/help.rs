//! The built-in `help` command.

use super::command::Command;
use super::core::context::{Bound, Invocation};
use super::core::registry::Registry;
use super::core::traits::{CommandHandler, HandlerResult, Reply, Signature};
use crate::error::HandlerError;
use async_trait::async_trait;
use std::sync::Arc;

/// Help text of the help command itself.
pub const HELP_TEXT: &str = "help [command_name] -- Provides help on other commands.";

/// Bold formatting control character.
pub const BOLD: char = '\x02';

fn bold(text: &str) -> String {
    format!("{BOLD}{text}{BOLD}")
}

/// Render a help reply against `registry`.
///
/// No arguments lists every alias. With an argument, the first token is
/// looked up; extra tokens are ignored.
pub fn render(registry: &Registry, args: &[String]) -> Reply {
    let Some(token) = args.first() else {
        let listing = registry.names().map(bold).collect::<Vec<_>>().join(", ");
        return Reply::Line(listing);
    };

    let Some(command) = registry.get(token) else {
        return Reply::Line(format!("command {} not found", bold(token)));
    };

    let key = token.to_uppercase();
    let lines = command.help().lines();
    match lines.as_slice() {
        [line] => Reply::Line(format!("Help for {}: {line}", bold(&key))),
        _ => {
            let mut out = Vec::with_capacity(lines.len() + 1);
            out.push(format!("Help for {}:", bold(&key)));
            out.extend(lines.iter().map(|line| line.to_string()));
            Reply::Lines(out)
        }
    }
}

/// Handler for `help`.
pub struct HelpHandler;

#[async_trait]
impl CommandHandler for HelpHandler {
    fn signature(&self) -> Signature {
        Signature::Context
    }

    async fn call(&self, args: Bound<'_>) -> HandlerResult {
        match args {
            Bound::Context(Invocation { registry, args, .. }) => Ok(render(registry, args)),
            other => Err(HandlerError::Internal(format!(
                "help expects a context binding, got {}",
                other.kind()
            ))),
        }
    }
}

/// Build the `help` command.
pub fn help_command() -> Command {
    Command::builder(["help"], Arc::new(HelpHandler))
        .help(HELP_TEXT)
        .finish()
}

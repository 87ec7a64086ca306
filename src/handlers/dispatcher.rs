//! Line dispatcher.
//!
//! One line in, zero or more replies out: extract, look up, authorize, bind,
//! invoke, emit. The registry and the permission resolver are read-only
//! while a line is processed, so concurrent `on_line` calls need no locking.

use super::command::Command;
use super::core::context::{Extras, Invocation};
use super::core::middleware::{LogSink, ReplySink};
use super::core::registry::Registry;
use super::core::traits::Reply;
use super::extract::{MESSAGE_COMMAND, extract_command};
use super::help::help_command;
use super::scan::{CommandSet, scan};
use crate::config::{Config, ConfigError};
use crate::error::{DispatchError, RegistryError};
use crate::security::{MaskPermissions, PermissionResolver};
use crate::telemetry::{CommandTimer, spans};
use slirc_line::Line;
use std::sync::Arc;
use tracing::{Instrument, debug, info};

/// Reply sent when the sender's permissions do not match.
pub const ACCESS_DENIED: &str = "Access Denied.";

/// Default channel sigils.
pub const DEFAULT_CHANNEL_PREFIXES: &str = "#";

/// How a dispatched line ended, short of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not a command, or not one we know.
    Ignored,
    /// The sender's permissions did not match; "Access Denied." was sent.
    Denied,
    /// The handler ran and its replies were emitted.
    Completed,
}

/// Routes command lines to registered handlers.
pub struct Dispatcher {
    prefix: String,
    channel_prefixes: String,
    registry: Registry,
    permissions: Option<Arc<dyn PermissionResolver>>,
    sink: Arc<dyn ReplySink>,
}

impl Dispatcher {
    /// Create a dispatcher with the built-in `help` command registered.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            channel_prefixes: DEFAULT_CHANNEL_PREFIXES.to_string(),
            registry: Registry::seeded(Arc::new(help_command())),
            permissions: None,
            sink: Arc::new(LogSink),
        }
    }

    /// Create a dispatcher from a loaded config.
    ///
    /// A `[permissions]` section installs a [`MaskPermissions`] resolver.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut dispatcher = Self::new(config.bot.prefix.clone())
            .with_channel_prefixes(config.bot.channel_prefixes.clone());
        if let Some(perms) = &config.permissions {
            dispatcher = dispatcher.with_permissions(MaskPermissions::from_config(perms)?);
        }
        Ok(dispatcher)
    }

    /// Send replies through `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: impl ReplySink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Resolve sender permissions with `resolver`.
    #[must_use]
    pub fn with_permissions(mut self, resolver: impl PermissionResolver + 'static) -> Self {
        self.permissions = Some(Arc::new(resolver));
        self
    }

    /// Characters that mark a message target as a channel.
    #[must_use]
    pub fn with_channel_prefixes(mut self, prefixes: impl Into<String>) -> Self {
        self.channel_prefixes = prefixes.into();
        self
    }

    /// Register `command` under its own names.
    pub fn add_command(&mut self, command: Command) -> Result<(), RegistryError> {
        self.registry.register(Arc::new(command))
    }

    /// Register `command` under `alias` only.
    pub fn add_command_as(&mut self, command: Command, alias: &str) -> Result<(), RegistryError> {
        self.registry.register_as(Arc::new(command), alias)
    }

    /// Scan `set` and register everything it provides.
    pub fn add_commands<T: CommandSet + ?Sized>(
        &mut self,
        set: Arc<T>,
    ) -> Result<(), RegistryError> {
        for command in scan(set)? {
            self.add_command(command)?;
        }
        Ok(())
    }

    /// Remove every alias of the command `alias` names.
    pub fn remove_command(&mut self, alias: &str) -> Option<Arc<Command>> {
        self.registry.remove_command(alias)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Extract `(command, remainder)` from `line`.
    pub fn extract<'a>(&self, line: &'a Line, current_nick: Option<&str>) -> (&'a str, &'a str) {
        extract_command(&self.prefix, line, current_nick)
    }

    /// Where replies to `line` go: the channel it was sent to, or the sender.
    pub fn reply_target<'a>(&self, line: &'a Line) -> Option<&'a str> {
        match line.param(0) {
            Some(target) if target.starts_with(|c: char| self.channel_prefixes.contains(c)) => {
                Some(target)
            }
            _ => line.nick(),
        }
    }

    /// Dispatch one line.
    pub async fn on_line(
        &self,
        line: &Line,
        current_nick: Option<&str>,
    ) -> Result<Outcome, DispatchError> {
        self.on_line_with(line, current_nick, &Extras::new()).await
    }

    /// Dispatch one line, making `extras` available to handlers by name.
    pub async fn on_line_with(
        &self,
        line: &Line,
        current_nick: Option<&str>,
        extras: &Extras,
    ) -> Result<Outcome, DispatchError> {
        if !line.is(MESSAGE_COMMAND) {
            return Ok(Outcome::Ignored);
        }

        let (command_token, args_str) = self.extract(line, current_nick);
        if command_token.is_empty() {
            return Ok(Outcome::Ignored);
        }
        let Some(command) = self.registry.get(command_token) else {
            return Ok(Outcome::Ignored);
        };

        let Some(target) = self.reply_target(line) else {
            debug!(command = %command_token, "No reply target for private command, ignoring");
            return Ok(Outcome::Ignored);
        };

        let source = line.source().unwrap_or_default();
        let key = command_token.to_uppercase();

        if command.requires_permissions() {
            let Some(resolver) = &self.permissions else {
                crate::metrics::record_command_error(&key, "no_permission_resolver");
                return Err(DispatchError::NoPermissionResolver { command: key });
            };

            let held = resolver.resolve(line);
            if &held != command.required_set() {
                info!(
                    source = %source,
                    command = %key,
                    want = ?command.required_set(),
                    got = ?held,
                    "Denied access"
                );
                crate::metrics::record_denied(&key);
                self.sink.reply(target, ACCESS_DENIED);
                return Ok(Outcome::Denied);
            }

            info!(
                source = %source,
                command = %key,
                want = ?command.required_set(),
                got = ?held,
                "Allowed access"
            );
        }

        let invocation = Invocation {
            args_str,
            args: args_str.split_whitespace().map(str::to_owned).collect(),
            line,
            command: command_token,
            nickname: current_nick,
            target,
            extras,
            registry: &self.registry,
        };

        let result = {
            let _timer = CommandTimer::start(&key);
            command
                .fire(&invocation)
                .instrument(spans::command(&key, &source, target))
                .await
        };

        let reply = result.map_err(|source| {
            let err = DispatchError::Handler {
                command: key.clone(),
                source,
            };
            crate::metrics::record_command_error(&key, err.error_code());
            err
        })?;

        self.registry.record_use(&key);
        self.emit(target, &key, reply);
        Ok(Outcome::Completed)
    }

    fn emit(&self, target: &str, command: &str, reply: Reply) {
        if reply.is_none() {
            debug!(command = %command, "Command produced no reply");
            return;
        }
        for message in reply.into_lines() {
            self.sink.reply(target, &message);
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("prefix", &self.prefix)
            .field("channel_prefixes", &self.channel_prefixes)
            .field("registry", &self.registry)
            .field("permissions", &self.permissions.is_some())
            .finish_non_exhaustive()
    }
}

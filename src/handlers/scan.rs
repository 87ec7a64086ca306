//! Declarative command tables.
//!
//! A [`CommandSet`] lists its commands as `(CommandTag, handler)` pairs and
//! [`scan`] turns them into [`Command`]s ready for registration.

use super::command::{Command, Help};
use super::core::traits::CommandHandler;
use crate::error::RegistryError;
use std::sync::Arc;

/// Registration metadata for one handler: aliases, help, required
/// permissions and expected argument count, plus the binding options.
#[derive(Debug, Clone)]
pub struct CommandTag {
    pub names: Vec<String>,
    pub help: Help,
    pub required_permissions: Option<Vec<String>>,
    pub arg_count: Option<usize>,
    pub allow_inspection: bool,
    pub override_params: Option<Vec<String>>,
}

impl CommandTag {
    pub fn new<I, S>(names: I, help: impl Into<Help>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            help: help.into(),
            required_permissions: None,
            arg_count: None,
            allow_inspection: true,
            override_params: None,
        }
    }

    /// Require a single permission label.
    #[must_use]
    pub fn permission(self, label: impl Into<String>) -> Self {
        self.permissions([label])
    }

    /// Require these permission labels.
    #[must_use]
    pub fn permissions<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_permissions
            .get_or_insert_with(Vec::new)
            .extend(labels.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn arg_count(mut self, count: usize) -> Self {
        self.arg_count = Some(count);
        self
    }

    /// Hand the handler only the raw argument string.
    #[must_use]
    pub fn raw(mut self) -> Self {
        self.allow_inspection = false;
        self
    }

    /// Pass exactly these names, positionally.
    #[must_use]
    pub fn override_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.override_params = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Build the command this tag describes.
    pub fn into_command(self, handler: Arc<dyn CommandHandler>) -> Result<Command, RegistryError> {
        let mut builder = Command::builder(self.names, handler)
            .help(self.help)
            .permissions(self.required_permissions.unwrap_or_default())
            .allow_inspection(self.allow_inspection);
        if let Some(count) = self.arg_count {
            builder = builder.arg_count(count);
        }
        if let Some(names) = self.override_params {
            builder = builder.override_params(names);
        }
        builder.build()
    }
}

/// An object that provides a table of commands.
pub trait CommandSet: Send + Sync + 'static {
    /// Every command this set provides, paired with its handler.
    fn commands(self: Arc<Self>) -> Vec<(CommandTag, Arc<dyn CommandHandler>)>;
}

/// Build every command in `set`.
///
/// The same handler object appearing twice is an error naming the second
/// tag's first alias.
pub fn scan<T: CommandSet + ?Sized>(set: Arc<T>) -> Result<Vec<Command>, RegistryError> {
    let mut seen: Vec<*const ()> = Vec::new();
    let mut commands = Vec::new();

    for (tag, handler) in set.commands() {
        let ptr = Arc::as_ptr(&handler) as *const ();
        if seen.contains(&ptr) {
            let name = tag.names.first().cloned().unwrap_or_default();
            return Err(RegistryError::DefinedTwice(name));
        }
        seen.push(ptr);
        commands.push(tag.into_command(handler)?);
    }

    Ok(commands)
}

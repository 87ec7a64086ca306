//! Command descriptors.
//!
//! A [`Command`] is immutable once built. Its binding strategy is decided in
//! [`CommandBuilder::build`] from the inspection flag, the override list and
//! the handler's declared [`Signature`], so dispatch never has to inspect the
//! handler again.

use super::binder;
use super::core::context::Invocation;
use super::core::traits::{CommandHandler, HandlerResult, Signature};
use crate::error::RegistryError;
use crate::security::PermissionSet;
use std::sync::Arc;

// ============================================================================
// Help text
// ============================================================================

/// Help for a command: one text block or an ordered list of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Help {
    Text(String),
    Lines(Vec<String>),
}

impl Help {
    /// Lines to render. Text with embedded line breaks is split.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Help::Text(text) => text.lines().collect(),
            Help::Lines(lines) => lines.iter().map(String::as_str).collect(),
        }
    }

    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.lines().iter().all(|line| line.trim().is_empty())
    }
}

impl From<&str> for Help {
    fn from(text: &str) -> Self {
        Help::Text(text.to_string())
    }
}

impl From<String> for Help {
    fn from(text: String) -> Self {
        Help::Text(text)
    }
}

impl From<Vec<String>> for Help {
    fn from(lines: Vec<String>) -> Self {
        Help::Lines(lines)
    }
}

impl From<&[&str]> for Help {
    fn from(lines: &[&str]) -> Self {
        Help::Lines(lines.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Help {
    fn from(lines: [&str; N]) -> Self {
        Help::Lines(lines.iter().map(|s| s.to_string()).collect())
    }
}

// ============================================================================
// Binding strategy
// ============================================================================

/// How a handler's arguments are assembled for each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// The raw argument string, nothing else.
    Raw,
    /// Explicit names, passed positionally in this order.
    Ordered(Vec<String>),
    /// Declared names, passed by name when available.
    Named(Vec<String>),
    /// The whole invocation context.
    Context,
}

// ============================================================================
// Command
// ============================================================================

/// A registered chat command.
pub struct Command {
    names: Vec<String>,
    help: Help,
    required_permissions: Vec<String>,
    required_set: PermissionSet,
    arg_count: Option<usize>,
    allow_inspection: bool,
    override_params: Option<Vec<String>>,
    binding: Binding,
    handler: Arc<dyn CommandHandler>,
}

impl Command {
    /// Start building a command with the given aliases and handler.
    pub fn builder<I, S>(names: I, handler: Arc<dyn CommandHandler>) -> CommandBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandBuilder {
            names: names.into_iter().map(Into::into).collect(),
            help: None,
            required_permissions: Vec::new(),
            arg_count: None,
            allow_inspection: true,
            override_params: None,
            handler,
        }
    }

    /// Build a command in one call with inspection enabled and no override list.
    pub fn new<I, S>(
        names: I,
        help: impl Into<Help>,
        required_permissions: Option<Vec<String>>,
        arg_count: Option<usize>,
        handler: Arc<dyn CommandHandler>,
    ) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = Self::builder(names, handler).help(help);
        if let Some(perms) = required_permissions {
            builder = builder.permissions(perms);
        }
        if let Some(count) = arg_count {
            builder = builder.arg_count(count);
        }
        builder.build()
    }

    /// Aliases in declaration order, as given.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The first alias.
    pub fn name(&self) -> &str {
        &self.names[0]
    }

    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Required permission labels in declaration order.
    pub fn required_permissions(&self) -> &[String] {
        &self.required_permissions
    }

    /// Required permission labels as a set, for comparison.
    pub fn required_set(&self) -> &PermissionSet {
        &self.required_set
    }

    /// Whether a permission check is needed at all.
    pub fn requires_permissions(&self) -> bool {
        !self.required_set.is_empty()
    }

    /// Expected argument count. Informational; dispatch does not enforce it.
    pub fn arg_count(&self) -> Option<usize> {
        self.arg_count
    }

    pub fn allow_inspection(&self) -> bool {
        self.allow_inspection
    }

    pub fn override_params(&self) -> Option<&[String]> {
        self.override_params.as_deref()
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    pub fn handler(&self) -> &Arc<dyn CommandHandler> {
        &self.handler
    }

    /// Bind arguments from `invocation` and run the handler.
    pub async fn fire(&self, invocation: &Invocation<'_>) -> HandlerResult {
        let bound = binder::bind(self, invocation);
        self.handler.call(bound).await
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("names", &self.names)
            .field("required_permissions", &self.required_permissions)
            .field("arg_count", &self.arg_count)
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`Command`].
pub struct CommandBuilder {
    names: Vec<String>,
    help: Option<Help>,
    required_permissions: Vec<String>,
    arg_count: Option<usize>,
    allow_inspection: bool,
    override_params: Option<Vec<String>>,
    handler: Arc<dyn CommandHandler>,
}

impl CommandBuilder {
    #[must_use]
    pub fn help(mut self, help: impl Into<Help>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Require one more permission label.
    #[must_use]
    pub fn permission(mut self, label: impl Into<String>) -> Self {
        self.required_permissions.push(label.into());
        self
    }

    /// Require these permission labels.
    #[must_use]
    pub fn permissions<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_permissions
            .extend(labels.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn arg_count(mut self, count: usize) -> Self {
        self.arg_count = Some(count);
        self
    }

    /// When false, the handler always gets the raw argument string.
    #[must_use]
    pub fn allow_inspection(mut self, allow: bool) -> Self {
        self.allow_inspection = allow;
        self
    }

    /// Pass exactly these names, positionally, instead of the handler's signature.
    #[must_use]
    pub fn override_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.override_params = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Validate and freeze the command.
    pub fn build(self) -> Result<Command, RegistryError> {
        if self.names.is_empty() {
            return Err(RegistryError::NoNames);
        }
        if self.names.iter().any(|n| n.is_empty()) {
            return Err(RegistryError::EmptyName);
        }
        if !self.help.as_ref().is_some_and(|help| !help.is_empty()) {
            return Err(RegistryError::MissingHelp(self.names[0].clone()));
        }
        Ok(self.finish())
    }

    /// Assemble the command without validating names or help.
    ///
    /// Only for descriptors whose names and help are fixed in this crate.
    pub(crate) fn finish(self) -> Command {
        let binding = if !self.allow_inspection {
            Binding::Raw
        } else if let Some(names) = &self.override_params {
            Binding::Ordered(names.clone())
        } else {
            match self.handler.signature() {
                Signature::Context => Binding::Context,
                Signature::Named(names) => {
                    Binding::Named(names.iter().map(|n| n.to_string()).collect())
                }
            }
        };

        Command {
            required_set: self.required_permissions.iter().cloned().collect(),
            names: self.names,
            help: self.help.unwrap_or_else(|| Help::Text(String::new())),
            required_permissions: self.required_permissions,
            arg_count: self.arg_count,
            allow_inspection: self.allow_inspection,
            override_params: self.override_params,
            binding,
            handler: self.handler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::core::traits::sync_handler;

    fn noop(signature: Signature) -> Arc<dyn CommandHandler> {
        sync_handler(signature, |_| Ok(().into()))
    }

    #[test]
    fn test_help_lines() {
        assert_eq!(Help::from("one line").lines(), vec!["one line"]);
        assert_eq!(Help::from("first\nsecond").lines(), vec!["first", "second"]);
        assert_eq!(Help::from(["a", "b"]).lines(), vec!["a", "b"]);
        assert!(Help::from("").is_empty());
        assert!(Help::Lines(Vec::new()).is_empty());
    }

    #[test]
    fn test_build_rejects_bad_descriptors() {
        let err = Command::builder(Vec::<String>::new(), noop(Signature::Context))
            .help("x")
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::NoNames);

        let err = Command::builder(["ok", ""], noop(Signature::Context))
            .help("x")
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::EmptyName);

        let err = Command::builder(["nohelp"], noop(Signature::Context))
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::MissingHelp("nohelp".into()));

        let err = Command::builder(["blank"], noop(Signature::Context))
            .help("   ")
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::MissingHelp("blank".into()));
    }

    #[test]
    fn test_binding_priority() {
        let named = noop(Signature::Named(&["args", "raw_line"]));

        let raw = Command::builder(["a"], Arc::clone(&named))
            .help("x")
            .allow_inspection(false)
            .override_params(["args"])
            .build()
            .unwrap();
        assert_eq!(raw.binding(), &Binding::Raw);

        let ordered = Command::builder(["a"], Arc::clone(&named))
            .help("x")
            .override_params(["args_str", "args"])
            .build()
            .unwrap();
        assert_eq!(
            ordered.binding(),
            &Binding::Ordered(vec!["args_str".into(), "args".into()])
        );

        let by_name = Command::builder(["a"], named).help("x").build().unwrap();
        assert_eq!(
            by_name.binding(),
            &Binding::Named(vec!["args".into(), "raw_line".into()])
        );

        let ctx = Command::builder(["a"], noop(Signature::Context))
            .help("x")
            .build()
            .unwrap();
        assert_eq!(ctx.binding(), &Binding::Context);
    }

    #[test]
    fn test_single_permission_normalizes_to_list() {
        let cmd = Command::builder(["oper"], noop(Signature::Context))
            .help("x")
            .permission("oper")
            .build()
            .unwrap();
        assert_eq!(cmd.required_permissions(), ["oper".to_string()]);
        assert!(cmd.requires_permissions());

        let cmd = Command::new(["free"], "x", None, Some(2), noop(Signature::Context)).unwrap();
        assert!(!cmd.requires_permissions());
        assert_eq!(cmd.arg_count(), Some(2));
        assert_eq!(cmd.name(), "free");
    }
}

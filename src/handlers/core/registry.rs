//! Command registry.
//!
//! Maps upper-cased aliases to shared [`Command`] descriptors. Populated at
//! startup, read-only while lines are dispatched, changed only through
//! explicit add/remove calls. Keeps per-alias usage counters.

use crate::error::RegistryError;
use crate::handlers::command::Command;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Registry of commands by alias.
#[derive(Default)]
pub struct Registry {
    commands: HashMap<String, Arc<Command>>,
    /// Aliases in registration order.
    order: Vec<String>,
    /// Completed invocations per alias.
    command_counts: HashMap<String, AtomicU64>,
}

fn normalize(alias: &str) -> String {
    alias.to_uppercase()
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `command` under each of its names.
    ///
    /// Aliases are registered one at a time. If one collides, the error names
    /// it and the aliases registered before it in this call stay registered.
    pub fn register(&mut self, command: Arc<Command>) -> Result<(), RegistryError> {
        for name in command.names() {
            self.register_as(Arc::clone(&command), name)?;
        }
        Ok(())
    }

    /// Register `command` under `alias` only, ignoring its own names.
    pub fn register_as(&mut self, command: Arc<Command>, alias: &str) -> Result<(), RegistryError> {
        let key = normalize(alias);
        if key.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.commands.contains_key(&key) {
            return Err(RegistryError::DuplicateCommand(alias.to_string()));
        }

        self.insert(key, command);
        Ok(())
    }

    /// A registry holding only `command`, under each of its names.
    ///
    /// For built-in commands whose names are fixed and distinct.
    pub(crate) fn seeded(command: Arc<Command>) -> Self {
        let mut registry = Self::new();
        for name in command.names() {
            registry.insert(normalize(name), Arc::clone(&command));
        }
        registry
    }

    fn insert(&mut self, key: String, command: Arc<Command>) {
        debug!(command = %key, "Registered command");
        self.order.push(key.clone());
        self.command_counts.insert(key.clone(), AtomicU64::new(0));
        self.commands.insert(key, command);
    }

    /// Look up a command token, ignoring case.
    pub fn get(&self, token: &str) -> Option<&Arc<Command>> {
        self.commands.get(&normalize(token))
    }

    /// Whether `token` names a registered command.
    pub fn contains(&self, token: &str) -> bool {
        self.get(token).is_some()
    }

    /// Remove a single alias. Other aliases of the same command stay.
    pub fn remove(&mut self, alias: &str) -> Option<Arc<Command>> {
        let key = normalize(alias);
        let command = self.commands.remove(&key)?;
        self.order.retain(|k| *k != key);
        self.command_counts.remove(&key);
        debug!(command = %key, "Removed command");
        Some(command)
    }

    /// Remove every alias of the command `alias` resolves to.
    pub fn remove_command(&mut self, alias: &str) -> Option<Arc<Command>> {
        let command = Arc::clone(self.get(alias)?);
        let keys: Vec<String> = self
            .order
            .iter()
            .filter(|k| self.commands.get(*k).is_some_and(|c| Arc::ptr_eq(c, &command)))
            .cloned()
            .collect();
        for key in keys {
            self.remove(&key);
        }
        Some(command)
    }

    /// Registered aliases (upper-cased), in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }

    /// Number of registered aliases.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Count one completed invocation of `token`.
    pub(crate) fn record_use(&self, token: &str) {
        if let Some(counter) = self.command_counts.get(&normalize(token)) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Usage counts of aliases that have been used, most used first.
    pub fn usage_stats(&self) -> Vec<(&str, u64)> {
        let mut stats: Vec<_> = self
            .order
            .iter()
            .filter_map(|k| {
                let count = self.command_counts.get(k)?.load(Ordering::Relaxed);
                (count > 0).then_some((k.as_str(), count))
            })
            .collect();

        stats.sort_by(|a, b| b.1.cmp(&a.1));
        stats
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").field("commands", &self.order).finish()
    }
}

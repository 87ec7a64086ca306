//! Permission table configuration.

use super::defaults::default_true;
use serde::Deserialize;
use std::collections::BTreeMap;

/// The `[permissions]` section: glob pattern to granted labels.
///
/// ```toml
/// [permissions]
/// enable_oper = true
///
/// [permissions.masks]
/// "*!*@test/staff/*" = ["staff"]
///
/// [permissions.opers]
/// ad = ["dergon"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionsConfig {
    /// Consult the `oper` message tag.
    #[serde(default = "default_true")]
    pub enable_oper: bool,
    /// Hostmask (`nick!user@host`) patterns.
    #[serde(default)]
    pub masks: BTreeMap<String, Vec<String>>,
    /// Oper-name patterns, matched against the `oper` tag value.
    #[serde(default)]
    pub opers: BTreeMap<String, Vec<String>>,
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            enable_oper: true,
            masks: BTreeMap::new(),
            opers: BTreeMap::new(),
        }
    }
}

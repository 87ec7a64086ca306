//! Mask and oper based permissions.
//!
//! Two additive sources, both matched with shell globs:
//!
//! - **Masks**: patterns over the sender's full `nick!user@host` string.
//! - **Opers**: when the line carries an `oper` tag, the label `oper` is
//!   granted; a non-empty tag value is the oper name, which grants
//!   `oper.<name>` and is matched against the oper patterns.
//!
//! Every matching pattern contributes its labels. There is no first-match
//! short circuit, so declaration order never changes the result.

use super::permissions::{PermissionResolver, PermissionSet};
use crate::config::PermissionsConfig;
use crate::error::PermissionError;
use glob::Pattern;
use slirc_line::Line;
use tracing::trace;

/// Tag that marks a sender as an IRC operator.
pub const OPER_TAG: &str = "oper";

/// Label granted to every sender carrying the oper tag.
pub const OPER_LABEL: &str = "oper";

/// One pattern and the labels it grants.
#[derive(Debug, Clone)]
struct Grant {
    pattern: Pattern,
    labels: Vec<String>,
}

impl Grant {
    fn new(pattern: &str, labels: Vec<String>) -> Result<Self, PermissionError> {
        let pattern = Pattern::new(pattern).map_err(|source| PermissionError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern, labels })
    }
}

fn compile<I, S>(grants: I) -> Result<Vec<Grant>, PermissionError>
where
    I: IntoIterator<Item = (S, Vec<String>)>,
    S: AsRef<str>,
{
    grants
        .into_iter()
        .map(|(pattern, labels)| Grant::new(pattern.as_ref(), labels))
        .collect()
}

fn matching<'a>(grants: &'a [Grant], candidate: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    grants
        .iter()
        .filter(move |grant| grant.pattern.matches(candidate))
        .flat_map(|grant| grant.labels.iter().map(String::as_str))
}

/// Resolver backed by static mask and oper-name tables.
#[derive(Debug, Clone)]
pub struct MaskPermissions {
    masks: Vec<Grant>,
    opers: Vec<Grant>,
    enable_oper: bool,
}

impl MaskPermissions {
    /// Build a resolver from `(pattern, labels)` tables.
    ///
    /// Fails on the first pattern that is not a valid glob.
    pub fn new<M, O, S, T>(masks: M, opers: O, enable_oper: bool) -> Result<Self, PermissionError>
    where
        M: IntoIterator<Item = (S, Vec<String>)>,
        O: IntoIterator<Item = (T, Vec<String>)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Ok(Self {
            masks: compile(masks)?,
            opers: compile(opers)?,
            enable_oper,
        })
    }

    /// Build a resolver from the `[permissions]` config section.
    pub fn from_config(config: &PermissionsConfig) -> Result<Self, PermissionError> {
        Self::new(
            config.masks.iter().map(|(k, v)| (k.as_str(), v.clone())),
            config.opers.iter().map(|(k, v)| (k.as_str(), v.clone())),
            config.enable_oper,
        )
    }

    /// Labels granted by every mask pattern matching `hostmask`.
    pub fn check_masks<'a>(&'a self, hostmask: &'a str) -> Vec<&'a str> {
        matching(&self.masks, hostmask).collect()
    }

    /// Labels granted by every oper pattern matching `oper_name`.
    ///
    /// Empty when oper support is disabled.
    pub fn check_oper<'a>(&'a self, oper_name: &'a str) -> Vec<&'a str> {
        if !self.enable_oper {
            return Vec::new();
        }
        matching(&self.opers, oper_name).collect()
    }

    /// Whether oper tags are consulted.
    pub fn oper_enabled(&self) -> bool {
        self.enable_oper
    }
}

impl PermissionResolver for MaskPermissions {
    fn resolve(&self, line: &Line) -> PermissionSet {
        let hostmask = line.source().unwrap_or_default();
        let mut out: PermissionSet = self
            .check_masks(&hostmask)
            .into_iter()
            .map(str::to_owned)
            .collect();

        if self.enable_oper && line.has_tag(OPER_TAG) {
            out.insert(OPER_LABEL.to_string());

            if let Some(oper_name) = line.tag_value(OPER_TAG).filter(|name| !name.is_empty()) {
                out.extend(self.check_oper(oper_name).into_iter().map(str::to_owned));
                out.insert(format!("{OPER_LABEL}.{oper_name}"));
            }
        }

        trace!(hostmask = %hostmask, permissions = ?out, "Resolved permissions");
        out
    }
}

//! Default value functions for configuration.

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

/// Channel sigils used to tell channel targets from private ones.
pub fn default_channel_prefixes() -> String {
    "#".to_string()
}

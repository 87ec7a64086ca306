//! The permission resolver seam.

use slirc_line::Line;
use std::collections::BTreeSet;

/// Permission labels held by a sender. Compared as a set, order irrelevant.
pub type PermissionSet = BTreeSet<String>;

/// Computes the permission labels held by the sender of a line.
///
/// Implementations must not touch the network or a persistent store; the
/// result is a pure function of the line and the resolver's configuration.
pub trait PermissionResolver: Send + Sync {
    /// Return every permission the sender of `line` currently holds.
    fn resolve(&self, line: &Line) -> PermissionSet;
}

impl<F> PermissionResolver for F
where
    F: Fn(&Line) -> PermissionSet + Send + Sync,
{
    fn resolve(&self, line: &Line) -> PermissionSet {
        self(line)
    }
}

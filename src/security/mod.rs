//! Permission resolution for command authorization.
//!
//! A [`PermissionResolver`] turns the sender of one line into the set of
//! permission labels that sender holds right now. Nothing is cached: masks
//! and oper status can change between messages, so the set is recomputed for
//! every line that reaches a permission-gated command.
//!
//! - [`permissions`]: the resolver trait and [`PermissionSet`]
//! - [`masks`]: [`MaskPermissions`], glob masks and oper tags from config

pub mod masks;
pub mod permissions;

pub use masks::MaskPermissions;
pub use permissions::{PermissionResolver, PermissionSet};

//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, BotConfig)
//! - [`permissions`]: Mask and oper permission tables (PermissionsConfig)
//! - [`validation`]: Startup checks that collect every problem at once

mod defaults;
mod permissions;
mod types;
pub mod validation;

pub use permissions::PermissionsConfig;
pub use types::{BotConfig, Config, ConfigError};
pub use validation::{ValidationError, validate};

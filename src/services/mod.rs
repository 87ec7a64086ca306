//! Built-in command sets.
//!
//! Each service is a [`CommandSet`](crate::handlers::CommandSet) the host
//! registers at startup.

pub mod toolbox;

pub use toolbox::Toolbox;

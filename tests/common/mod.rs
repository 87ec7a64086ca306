//! Integration test common infrastructure.
//!
//! Provides a recording reply sink and a dispatcher fixture with a small set
//! of permission-gated commands.

pub mod fixture;
pub mod sink;

#[allow(unused_imports)]
pub use fixture::{Fixture, PFX, line};
#[allow(unused_imports)]
pub use sink::RecordingSink;

//! # slirc-line
//!
//! Tokenized IRC lines for bots: IRCv3 tags, the `nick!user@host` prefix,
//! the command and its ordered parameters.
//!
//! ```rust
//! use slirc_line::Line;
//!
//! let line: Line = "@oper=ad :someOper!magic@host PRIVMSG #chan :~help".parse().unwrap();
//! assert_eq!(line.command, "PRIVMSG");
//! assert_eq!(line.tag_value("oper"), Some("ad"));
//! assert_eq!(line.source().as_deref(), Some("someOper!magic@host"));
//! assert_eq!(line.last_param(), Some("~help"));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod line;
mod parse;
pub mod prefix;
mod serialize;
pub mod tags;

pub use self::error::LineParseError;
pub use self::line::{Line, Tag};
pub use self::prefix::Prefix;

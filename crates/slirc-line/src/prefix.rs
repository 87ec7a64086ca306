//! Line prefix (message source).
//!
//! The prefix identifies who sent a line: either a server name or a user's
//! `nick!user@host` mask.

use std::fmt;
use std::str::FromStr;

/// Source of a line.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum Prefix {
    /// Server name (e.g., "irc.example.com")
    ServerName(String),
    /// User prefix: (nickname, username, hostname)
    Nickname(String, String, String),
}

impl Prefix {
    /// Parse a source string leniently; components are not validated.
    ///
    /// A bare name containing a dot is a server name. Anything with a `!` or
    /// `@` part is a user mask, even when the host is dotted.
    pub fn new_from_str(s: &str) -> Self {
        let (name, rest) = s.find(['!', '@']).map_or((s, ""), |i| s.split_at(i));

        if rest.is_empty() && name.contains('.') {
            return Prefix::ServerName(name.to_owned());
        }

        let (user, host) = match rest.strip_prefix('!') {
            Some(mask) => mask.split_once('@').unwrap_or((mask, "")),
            None => ("", rest.strip_prefix('@').unwrap_or_default()),
        };
        Prefix::Nickname(name.to_owned(), user.to_owned(), host.to_owned())
    }

    /// Create a user prefix from its components.
    pub fn new(nick: impl Into<String>, user: impl Into<String>, host: impl Into<String>) -> Self {
        Prefix::Nickname(nick.into(), user.into(), host.into())
    }

    /// The nickname, if this is a user prefix with a non-empty nick.
    pub fn nick(&self) -> Option<&str> {
        match self {
            Prefix::Nickname(nick, _, _) if !nick.is_empty() => Some(nick),
            _ => None,
        }
    }

    /// The username, if present.
    pub fn user(&self) -> Option<&str> {
        match self {
            Prefix::Nickname(_, user, _) if !user.is_empty() => Some(user),
            _ => None,
        }
    }

    /// The hostname (the whole name for server prefixes).
    pub fn host(&self) -> Option<&str> {
        match self {
            Prefix::ServerName(name) => Some(name),
            Prefix::Nickname(_, _, host) if !host.is_empty() => Some(host),
            _ => None,
        }
    }

    /// The name a reply can be addressed to: the nickname, or the server name.
    pub fn name(&self) -> Option<&str> {
        match self {
            Prefix::ServerName(name) if !name.is_empty() => Some(name),
            Prefix::ServerName(_) => None,
            Prefix::Nickname(..) => self.nick(),
        }
    }
}

impl FromStr for Prefix {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Prefix::new_from_str(s))
    }
}

impl From<&str> for Prefix {
    fn from(s: &str) -> Self {
        Prefix::new_from_str(s)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::ServerName(name) => f.write_str(name),
            Prefix::Nickname(nick, user, host) => {
                f.write_str(nick)?;
                if !user.is_empty() {
                    write!(f, "!{user}")?;
                }
                if !host.is_empty() {
                    write!(f, "@{host}")?;
                }
                Ok(())
            }
        }
    }
}

use std::fmt::{self, Display, Formatter};

use crate::line::{Line, Tag};
use crate::tags::escape_tag_value;

/// The last parameter needs the `:` marker when it could not be read back as a middle parameter.
fn needs_trailing_marker(param: &str) -> bool {
    param.is_empty() || param.contains(' ') || param.starts_with(':')
}

impl Display for Line {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(ref tags) = self.tags {
            write!(f, "@")?;

            for (i, Tag(key, value)) in tags.iter().enumerate() {
                if i > 0 {
                    write!(f, ";")?;
                }

                write!(f, "{}", key)?;

                if let Some(value) = value {
                    write!(f, "=")?;
                    escape_tag_value(f, value)?;
                }
            }

            write!(f, " ")?;
        }

        if let Some(ref prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }

        write!(f, "{}", self.command)?;

        if let Some((last, middle)) = self.params.split_last() {
            for param in middle {
                write!(f, " {}", param)?;
            }
            if needs_trailing_marker(last) {
                write!(f, " :{}", last)?;
            } else {
                write!(f, " {}", last)?;
            }
        }

        write!(f, "\r\n")
    }
}

#[cfg(test)]
mod tests {
    use crate::{Line, Prefix};

    #[test]
    fn test_privmsg_reply_line() {
        let line = Line::privmsg("#chan", "a b");
        assert_eq!(line.to_string(), "PRIVMSG #chan :a b\r\n");
    }

    #[test]
    fn test_single_word_trailing_has_no_marker() {
        let line = Line::privmsg("test", "pong");
        assert_eq!(line.to_string(), "PRIVMSG test pong\r\n");
    }

    #[test]
    fn test_tags_and_prefix() {
        let line = Line::privmsg("bot", "~oper test")
            .with_tag("oper", Some("a d"))
            .with_prefix(Prefix::new("someOper", "ahh", "blarg"));
        assert_eq!(
            line.to_string(),
            "@oper=a\\sd :someOper!ahh@blarg PRIVMSG bot :~oper test\r\n"
        );
        let parsed: Line = line.to_string().parse().unwrap();
        assert_eq!(parsed, line);
    }
}

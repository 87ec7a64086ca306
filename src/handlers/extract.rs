//! Command extraction from message lines.

use slirc_line::Line;

/// Protocol command that can carry a chat command.
pub const MESSAGE_COMMAND: &str = "PRIVMSG";

const NONE: (&str, &str) = ("", "");

/// Split a message line into `(command, remainder)`.
///
/// Prefix-style invocation wins: a first word starting with `prefix` is the
/// command with the prefix stripped. Otherwise the first word may address the
/// bot by `current_nick` plus at most one trailing character (`bot:`), in
/// which case the next word is the command. Anything else, including any line
/// that is not a `PRIVMSG`, yields `("", "")`.
pub fn extract_command<'a>(
    prefix: &str,
    line: &'a Line,
    current_nick: Option<&str>,
) -> (&'a str, &'a str) {
    if !line.is(MESSAGE_COMMAND) {
        return NONE;
    }
    let Some(text) = line.last_param() else {
        return NONE;
    };

    let (first, rest) = split_first(text);

    if let Some(command) = first.strip_prefix(prefix) {
        return (command, rest);
    }

    match current_nick {
        Some(nick) if addresses(first, nick) => split_first(rest),
        _ => NONE,
    }
}

/// `word` is `nick` followed by at most one character.
fn addresses(word: &str, nick: &str) -> bool {
    word.strip_prefix(nick).is_some_and(|tail| tail.chars().count() <= 1)
}

fn split_first(text: &str) -> (&str, &str) {
    text.split_once(' ').unwrap_or((text, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn privmsg(text: &str) -> Line {
        format!(":test!test@test PRIVMSG bot :{text}").parse().unwrap()
    }

    fn extract<'a>(line: &'a Line, nick: Option<&str>) -> (&'a str, &'a str) {
        extract_command("~", line, nick)
    }

    #[test]
    fn test_prefix_style() {
        let line = privmsg("~test this is a test");
        assert_eq!(extract(&line, Some("bot")), ("test", "this is a test"));

        let line = privmsg("~ping");
        assert_eq!(extract(&line, None), ("ping", ""));
    }

    #[test]
    fn test_address_style() {
        let line = privmsg("bot: this is a test");
        assert_eq!(extract(&line, Some("bot")), ("this", "is a test"));

        let line = privmsg("bot hi");
        assert_eq!(extract(&line, Some("bot")), ("hi", ""));
    }

    #[test]
    fn test_address_style_length_boundary() {
        let line = privmsg("bot: hi");
        assert_eq!(extract(&line, Some("bot")), ("hi", ""));

        let line = privmsg("bots: hi");
        assert_eq!(extract(&line, Some("bot")), NONE);
    }

    #[test]
    fn test_address_style_counts_characters() {
        for text in ["bot\u{2026} hi", "bot\u{ff1a} hi", "bot\u{e4} hi"] {
            let line = privmsg(text);
            assert_eq!(extract(&line, Some("bot")), ("hi", ""), "{text}");
        }

        for text in ["bot\u{e4}\u{e4} hi", "bot\u{ff1a}: hi"] {
            let line = privmsg(text);
            assert_eq!(extract(&line, Some("bot")), NONE, "{text}");
        }

        let line = privmsg("b\u{f6}t\u{2026} hi");
        assert_eq!(extract(&line, Some("b\u{f6}t")), ("hi", ""));
    }

    #[test]
    fn test_not_commands() {
        for text in ["asdf", "notbot: bad", "!this shouldn't work"] {
            let line = privmsg(text);
            assert_eq!(extract(&line, Some("bot")), NONE, "{text}");
        }

        let line = privmsg("bot: hi");
        assert_eq!(extract(&line, None), NONE);
    }

    #[test]
    fn test_prefix_wins_over_address() {
        let line = privmsg("~bot: x");
        assert_eq!(extract_command("~", &line, Some("~bot")), ("bot:", "x"));
    }

    #[test]
    fn test_bare_prefix_gives_empty_token() {
        let line = privmsg("~");
        assert_eq!(extract(&line, Some("bot")), ("", ""));
    }

    #[test]
    fn test_only_privmsg_is_eligible() {
        let line: Line = ":test!test@test NOTICE bot :~test x".parse().unwrap();
        assert_eq!(extract(&line, Some("bot")), NONE);

        let line = Line::new("PRIVMSG", Vec::<String>::new());
        assert_eq!(extract(&line, Some("bot")), NONE);
    }
}

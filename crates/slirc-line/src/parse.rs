//! Nom-based line tokenizer.
//!
//! ```text
//! [@tags] [:prefix] <command> [params...] [:trailing]
//! ```

use std::str::FromStr;

use nom::{
    bytes::complete::{take_until, take_while1},
    character::complete::{char, space0},
    combinator::opt,
    sequence::preceded,
    IResult,
};
use smallvec::SmallVec;

use crate::error::LineParseError;
use crate::line::{Line, Tag};
use crate::prefix::Prefix;
use crate::tags::unescape_tag_value;

/// RFC 2812 caps a line at 15 parameters.
const MAX_PARAMS: usize = 15;

fn parse_tags(input: &str) -> IResult<&str, &str> {
    preceded(char('@'), take_until(" "))(input)
}

fn parse_prefix(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while1(|c| c != ' '))(input)
}

fn parse_command(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric())(input)
}

/// Split parameters; runs of spaces count as one separator.
fn parse_params(input: &str) -> SmallVec<[&str; MAX_PARAMS]> {
    let mut params: SmallVec<[&str; MAX_PARAMS]> = SmallVec::new();
    let mut rest = input;

    while let Some(b' ') = rest.as_bytes().first().copied() {
        if params.len() >= MAX_PARAMS {
            break;
        }

        rest = rest.trim_start_matches(' ');

        if rest.is_empty() || rest.starts_with('\r') || rest.starts_with('\n') {
            break;
        }

        if let Some(trailing) = rest.strip_prefix(':') {
            let end = trailing.find(['\r', '\n']).unwrap_or(trailing.len());
            params.push(&trailing[..end]);
            break;
        }

        let end = rest.find([' ', '\r', '\n']).unwrap_or(rest.len());
        params.push(&rest[..end]);
        rest = &rest[end..];
    }

    params
}

fn parse_tags_string(tags: &str) -> Vec<Tag> {
    tags.split(';')
        .filter(|s| !s.is_empty())
        .map(|tag| {
            let mut iter = tag.splitn(2, '=');
            let key = iter.next().unwrap_or("");
            let value = iter.next().map(unescape_tag_value);
            Tag(key.to_owned(), value)
        })
        .collect()
}

fn is_valid_command(cmd: &str) -> bool {
    let is_all_letters = cmd.chars().all(|c| c.is_ascii_alphabetic());
    let is_three_digits = cmd.len() == 3 && cmd.chars().all(|c| c.is_ascii_digit());
    is_all_letters || is_three_digits
}

impl FromStr for Line {
    type Err = LineParseError;

    fn from_str(s: &str) -> Result<Line, Self::Err> {
        let input = s.trim_end_matches(['\r', '\n']);
        if input.is_empty() {
            return Err(LineParseError::EmptyLine);
        }

        let missing = |rest: &str| LineParseError::MissingCommand {
            position: input.len() - rest.len(),
        };

        let (rest, tags) = opt(parse_tags)(input).map_err(|_| missing(input))?;
        let (rest, _) = space0::<_, nom::error::Error<&str>>(rest).map_err(|_| missing(rest))?;
        let (rest, prefix) = opt(parse_prefix)(rest).map_err(|_| missing(rest))?;
        let (rest, _) = space0::<_, nom::error::Error<&str>>(rest).map_err(|_| missing(rest))?;
        let (rest, command) = parse_command(rest).map_err(|_| missing(rest))?;

        if !is_valid_command(command) {
            return Err(LineParseError::InvalidCommand(command.to_owned()));
        }

        Ok(Line {
            tags: tags.map(parse_tags_string),
            prefix: prefix.map(Prefix::new_from_str),
            command: command.to_owned(),
            params: parse_params(rest).into_iter().map(str::to_owned).collect(),
        })
    }
}

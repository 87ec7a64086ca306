//! The tokenized line type.

/// One IRCv3 message tag: key and optional value.
///
/// A tag sent as `@oper` has no value; `@oper=` and `@oper=ad` have one.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Tag(pub String, pub Option<String>);

/// A single tokenized protocol line.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Line {
    /// IRCv3 message tags, if any were sent.
    pub tags: Option<Vec<Tag>>,
    /// Message source.
    pub prefix: Option<crate::Prefix>,
    /// Command or three digit numeric, as sent.
    pub command: String,
    /// Ordered parameters, trailing parameter included.
    pub params: Vec<String>,
}

impl Line {
    /// Create a line without tags or prefix.
    pub fn new<C, I, P>(command: C, params: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            tags: None,
            prefix: None,
            command: command.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a `PRIVMSG target :text` line.
    pub fn privmsg(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new("PRIVMSG", [target.into(), text.into()])
    }

    /// Set the source of this line.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<crate::Prefix>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Append a tag to this line.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: Option<&str>) -> Self {
        self.tags
            .get_or_insert_with(Vec::new)
            .push(Tag(key.into(), value.map(str::to_owned)));
        self
    }

    /// Whether the command matches `command`, ignoring ASCII case.
    pub fn is(&self, command: &str) -> bool {
        self.command.eq_ignore_ascii_case(command)
    }

    /// Look up a tag by key. The outer `Option` is presence, the inner one the value.
    pub fn tag(&self, key: &str) -> Option<Option<&str>> {
        self.tags
            .as_ref()?
            .iter()
            .find(|Tag(k, _)| k == key)
            .map(|Tag(_, v)| v.as_deref())
    }

    /// Whether a tag with this key was sent, valued or not.
    pub fn has_tag(&self, key: &str) -> bool {
        self.tag(key).is_some()
    }

    /// Value of a tag, if the tag was sent with one.
    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.tag(key).flatten()
    }

    /// The full source string (`nick!user@host`), if the line has a prefix.
    pub fn source(&self) -> Option<String> {
        self.prefix.as_ref().map(ToString::to_string)
    }

    /// Name of the sender a private reply would go to.
    pub fn nick(&self) -> Option<&str> {
        self.prefix.as_ref().and_then(crate::Prefix::name)
    }

    /// Parameter at `index`.
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// The last parameter, usually the message text.
    pub fn last_param(&self) -> Option<&str> {
        self.params.last().map(String::as_str)
    }
}

//! Options controlling how property files are decoded.

/// Character set used to decode `.properties` content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// UTF-8, with a leading byte order mark honored (UTF-8 or UTF-16).
    #[default]
    Utf8,
    /// ISO-8859-1, the historic encoding of Java properties files. Every byte
    /// maps to the code point of the same value.
    Latin1,
}

/// What to do with a `\u` escape that is not followed by four hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapePolicy {
    /// Fail the whole load with [`crate::Error::MalformedEscape`].
    #[default]
    Strict,
    /// Keep the characters as written, backslash included.
    Lenient,
}

/// Load behavior options for [`crate::PropertiesPropertySourceLoader`] and the
/// format parsers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadOptions {
    pub charset: Charset,
    pub escape_policy: EscapePolicy,
}

impl LoadOptions {
    /// Creates default load options (UTF-8, strict escapes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the charset used for `.properties` content.
    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Sets how malformed unicode escapes are handled.
    pub fn with_escape_policy(mut self, escape_policy: EscapePolicy) -> Self {
        self.escape_policy = escape_policy;
        self
    }

    /// Shorthand for the lenient escape policy.
    pub fn lenient(self) -> Self {
        self.with_escape_policy(EscapePolicy::Lenient)
    }
}

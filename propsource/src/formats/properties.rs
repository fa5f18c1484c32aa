//! Support for the line-oriented Java `.properties` format.
//!
//! Provides parsing with per-value origins, serialization, and conversion
//! to/from [`PropertySource`].

use std::io::{BufRead, Read, Write};

use indexmap::IndexMap;

use crate::{
    error::Error,
    options::{Charset, EscapePolicy, LoadOptions},
    origin::{Location, OriginLookup, TextResourceOrigin},
    property_source::PropertySource,
    traits::Parser,
};

/// Represents a parsed `.properties` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    /// One pair per distinct key, in order of first appearance. A repeated key
    /// keeps its first position and takes the last value.
    pub pairs: Vec<Pair>,
}

/// A single key/value pair of a `.properties` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
    /// Where the value starts in the source text, if it was parsed from one.
    pub location: Option<Location>,
}

impl Pair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            location: None,
        }
    }
}

impl Format {
    /// Parses `reader` with explicit options.
    pub fn from_reader_with_options<R: BufRead>(
        reader: R,
        options: &LoadOptions,
    ) -> Result<Self, Error> {
        let text = decode(reader, options.charset)?;
        Self::parse_text(&text, options.escape_policy)
    }

    fn parse_text(text: &str, policy: EscapePolicy) -> Result<Self, Error> {
        let mut pairs: IndexMap<String, Pair> = IndexMap::new();

        for line in logical_lines(text) {
            let pair = parse_line(&line, policy)?;
            tracing::trace!(key = %pair.key, location = ?pair.location, "parsed property");
            match pairs.get_mut(&pair.key) {
                Some(existing) => *existing = pair,
                None => {
                    pairs.insert(pair.key.clone(), pair);
                }
            }
        }

        Ok(Format {
            pairs: pairs.into_values().collect(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Builds an origin-tracked source. Every origin points into the resource
    /// described by `resource`.
    pub fn to_property_source(&self, name: &str, resource: &str) -> PropertySource {
        let mut properties = IndexMap::with_capacity(self.pairs.len());
        let mut origins = IndexMap::with_capacity(self.pairs.len());
        for pair in &self.pairs {
            properties.insert(pair.key.clone(), pair.value.clone());
            if let Some(location) = pair.location {
                origins.insert(
                    pair.key.clone(),
                    TextResourceOrigin::new(resource, location),
                );
            }
        }
        PropertySource::with_origins(name, properties, origins)
    }
}

impl Parser for Format {
    /// Parses with [`LoadOptions::default`].
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        Self::from_reader_with_options(reader, &LoadOptions::default())
    }

    /// Writes one `key=value` line per pair. Everything outside printable
    /// ASCII is written as `\uXXXX`, so the output reads back identically
    /// under either charset.
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut content = String::new();
        for pair in &self.pairs {
            content.push_str(&escape_key(&pair.key));
            content.push('=');
            content.push_str(&escape_value(&pair.value));
            content.push('\n');
        }
        writer.write_all(content.as_bytes()).map_err(Error::Io)
    }
}

impl From<&PropertySource> for Format {
    fn from(source: &PropertySource) -> Self {
        Format {
            pairs: source
                .iter()
                .map(|entry| Pair {
                    key: entry.key.to_string(),
                    value: entry.value.to_string(),
                    location: source.origin(entry.key).map(|origin| origin.location),
                })
                .collect(),
        }
    }
}

fn decode<R: BufRead>(mut reader: R, charset: Charset) -> Result<String, Error> {
    match charset {
        Charset::Utf8 => {
            // Honors a UTF-8/UTF-16 BOM; invalid sequences become U+FFFD.
            let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
                .encoding(Some(encoding_rs::UTF_8))
                .bom_override(true)
                .build(reader);
            let mut decoded = String::new();
            decoder.read_to_string(&mut decoded).map_err(Error::Io)?;
            Ok(decoded)
        }
        Charset::Latin1 => {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).map_err(Error::Io)?;
            Ok(bytes.into_iter().map(char::from).collect())
        }
    }
}

/// A logical line: the text of one or more joined physical lines, with
/// leading whitespace and continuation backslashes removed.
struct LogicalLine {
    text: String,
    /// Where each joined physical line starts within `text`.
    segments: Vec<Segment>,
    /// Position just past the last character.
    end: Location,
}

/// The part of one physical line that belongs to a logical line.
struct Segment {
    /// Offset in chars into the logical line.
    offset: usize,
    /// Position of the segment's first character in the source text.
    start: Location,
}

impl LogicalLine {
    /// Position of the char at `index` in the source text.
    fn location(&self, index: usize) -> Location {
        let segment = &self.segments[self
            .segments
            .partition_point(|s| s.offset <= index)
            .saturating_sub(1)];
        Location::new(
            segment.start.line,
            segment.start.column + (index - segment.offset),
        )
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{000C}')
}

/// Splits on `\n`, `\r\n` and `\r`.
fn physical_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn logical_lines(text: &str) -> Vec<LogicalLine> {
    let mut result = Vec::new();
    let mut current: Option<(LogicalLine, usize)> = None;

    for (index, raw) in physical_lines(text).into_iter().enumerate() {
        let line_number = index + 1;
        let body = raw.trim_start_matches(is_whitespace);
        let indent = raw[..raw.len() - body.len()].chars().count();
        let start = Location::new(line_number, indent + 1);
        let end = Location::new(line_number, raw.chars().count() + 1);

        let (mut line, mut len) = match current.take() {
            Some((mut line, len)) => {
                line.segments.push(Segment { offset: len, start });
                line.text.push_str(body);
                line.end = end;
                (line, len + body.chars().count())
            }
            None => {
                match body.chars().next() {
                    None | Some('#') | Some('!') => continue,
                    Some(_) => {}
                }
                let line = LogicalLine {
                    text: body.to_string(),
                    segments: vec![Segment { offset: 0, start }],
                    end,
                };
                (line, body.chars().count())
            }
        };

        let trailing_backslashes = line.text.chars().rev().take_while(|c| *c == '\\').count();
        if trailing_backslashes % 2 == 1 {
            line.text.pop();
            len -= 1;
            current = Some((line, len));
        } else {
            result.push(line);
        }
    }

    if let Some((line, _)) = current {
        result.push(line);
    }
    result
}

/// Decodes the escape sequence starting with the backslash at `chars[i]`.
/// Pushes the decoded text onto `out` and returns the index of the first
/// character after the sequence.
fn decode_escape(
    line: &LogicalLine,
    chars: &[char],
    i: usize,
    out: &mut String,
    policy: EscapePolicy,
) -> Result<usize, Error> {
    let Some(&next) = chars.get(i + 1) else {
        return Ok(i + 1);
    };
    match next {
        't' => out.push('\t'),
        'n' => out.push('\n'),
        'r' => out.push('\r'),
        'f' => out.push('\u{000C}'),
        'u' => return decode_unicode(line, chars, i, out, policy),
        other => out.push(other),
    }
    Ok(i + 2)
}

fn read_hex4(chars: &[char], start: usize) -> Option<u32> {
    chars
        .get(start..start + 4)?
        .iter()
        .try_fold(0u32, |acc, c| c.to_digit(16).map(|d| acc * 16 + d))
}

fn decode_unicode(
    line: &LogicalLine,
    chars: &[char],
    i: usize,
    out: &mut String,
    policy: EscapePolicy,
) -> Result<usize, Error> {
    let Some(unit) = read_hex4(chars, i + 2) else {
        return match policy {
            EscapePolicy::Strict => {
                let location = line.location(i);
                Err(Error::MalformedEscape {
                    line: location.line,
                    column: location.column,
                })
            }
            EscapePolicy::Lenient => {
                out.push_str("\\u");
                Ok(i + 2)
            }
        };
    };
    let after = i + 6;

    if (0xD800..0xDC00).contains(&unit) {
        // high surrogate, pair it with a following \uDC00-\uDFFF
        let is_low_escape = chars.get(after) == Some(&'\\') && chars.get(after + 1) == Some(&'u');
        if is_low_escape {
            if let Some(low) = read_hex4(chars, after + 2) {
                if (0xDC00..0xE000).contains(&low) {
                    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                    return Ok(after + 6);
                }
            }
        }
    }

    out.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
    Ok(after)
}

fn parse_line(line: &LogicalLine, policy: EscapePolicy) -> Result<Pair, Error> {
    let chars: Vec<char> = line.text.chars().collect();
    let mut i = 0;

    let mut key = String::new();
    while let Some(&c) = chars.get(i) {
        if c == '\\' {
            i = decode_escape(line, &chars, i, &mut key, policy)?;
        } else if c == '=' || c == ':' || is_whitespace(c) {
            break;
        } else {
            key.push(c);
            i += 1;
        }
    }

    while chars.get(i).is_some_and(|c| is_whitespace(*c)) {
        i += 1;
    }
    if matches!(chars.get(i), Some('=') | Some(':')) {
        i += 1;
    }
    while chars.get(i).is_some_and(|c| is_whitespace(*c)) {
        i += 1;
    }

    let location = if i < chars.len() {
        line.location(i)
    } else {
        line.end
    };

    let mut value = String::new();
    // Length of `value` up to and including the last escaped character;
    // trailing whitespace before that point was escaped and stays.
    let mut protected = 0;
    while let Some(&c) = chars.get(i) {
        if c == '\\' {
            i = decode_escape(line, &chars, i, &mut value, policy)?;
            protected = value.len();
        } else {
            value.push(c);
            i += 1;
        }
    }
    let trimmed = value[protected..].trim_end_matches(is_whitespace).len();
    value.truncate(protected + trimmed);

    Ok(Pair {
        key,
        value,
        location: Some(location),
    })
}

fn push_escaped_char(out: &mut String, c: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\u{000C}' => out.push_str("\\f"),
        ' '..='~' => out.push(c),
        _ => {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04X}", unit));
            }
        }
    }
}

/// Escapes a key so that it reads back unchanged.
pub fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            ' ' | '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            _ => push_escaped_char(&mut out, c),
        }
    }
    out
}

/// Escapes a value so that it reads back unchanged: leading and trailing
/// whitespace is escaped because the parser trims it otherwise.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let leading = value.chars().take_while(|c| *c == ' ').count();
    let total = value.chars().count();
    let trailing = value.chars().rev().take_while(|c| *c == ' ').count();
    for (index, c) in value.chars().enumerate() {
        if c == ' ' && (index < leading || index >= total - trailing) {
            out.push_str("\\ ");
        } else {
            push_escaped_char(&mut out, c);
        }
    }
    out
}

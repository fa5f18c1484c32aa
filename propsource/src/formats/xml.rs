//! Support for the Java properties-as-XML format.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <!DOCTYPE properties SYSTEM "http://java.sun.com/dtd/properties.dtd">
//! <properties>
//!   <comment>optional</comment>
//!   <entry key="server.port">8080</entry>
//! </properties>
//! ```
//!
//! The parser cannot report positions, so sources built from this format are
//! never origin-tracked.

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::io::{BufRead, Write};

use indexmap::IndexMap;

use crate::{error::Error, property_source::PropertySource, traits::Parser};

const PROPERTIES_DTD: &str = r#"properties SYSTEM "http://java.sun.com/dtd/properties.dtd""#;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    /// Text of the optional `<comment>` element.
    pub comment: Option<String>,
    /// Entries in document order; a repeated key keeps its first position and
    /// takes the last value.
    pub entries: IndexMap<String, String>,
}

impl Format {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_property_source(&self, name: &str) -> PropertySource {
        PropertySource::new(name, self.entries.clone())
    }
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut format = Format::default();
        let mut saw_root = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(ref e) if !saw_root => {
                    expect_root(e)?;
                    saw_root = true;
                }
                Event::Empty(ref e) if !saw_root => {
                    expect_root(e)?;
                    break;
                }
                Event::Start(ref e) => match e.name().as_ref() {
                    b"entry" => {
                        let key = entry_key(e)?;
                        let value = read_text(&mut xml_reader, b"entry")?;
                        format.entries.insert(key, value);
                    }
                    b"comment" => {
                        format.comment = Some(read_text(&mut xml_reader, b"comment")?);
                    }
                    other => return Err(unexpected_element(other)),
                },
                Event::Empty(ref e) => match e.name().as_ref() {
                    b"entry" => {
                        let key = entry_key(e)?;
                        format.entries.insert(key, String::new());
                    }
                    b"comment" => format.comment = Some(String::new()),
                    other => return Err(unexpected_element(other)),
                },
                Event::End(_) => {
                    // mismatched names are rejected by the reader itself
                    break;
                }
                Event::Text(ref e) => {
                    let text = e.unescape()?;
                    if !text.trim().is_empty() {
                        return Err(Error::InvalidResource(if saw_root {
                            format!("unexpected text in <properties>: {}", text.trim())
                        } else {
                            "content before <properties>".to_string()
                        }));
                    }
                }
                Event::CData(_) => {
                    return Err(Error::InvalidResource(if saw_root {
                        "unexpected CDATA in <properties>".to_string()
                    } else {
                        "content before <properties>".to_string()
                    }));
                }
                Event::Eof => {
                    return Err(Error::InvalidResource(if saw_root {
                        "unclosed <properties> element".to_string()
                    } else {
                        "missing <properties> root element".to_string()
                    }));
                }
                _ => {}
            }
            buf.clear();
        }

        expect_document_end(&mut xml_reader)?;
        Ok(format)
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new_with_indent(&mut writer, b' ', 2);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        xml_writer.write_event(Event::DocType(BytesText::from_escaped(PROPERTIES_DTD)))?;
        xml_writer.write_event(Event::Start(BytesStart::new("properties")))?;

        if let Some(comment) = &self.comment {
            xml_writer.write_event(Event::Start(BytesStart::new("comment")))?;
            xml_writer.write_event(Event::Text(BytesText::new(comment)))?;
            xml_writer.write_event(Event::End(BytesEnd::new("comment")))?;
        }

        for (key, value) in &self.entries {
            let mut elem = BytesStart::new("entry");
            elem.push_attribute(("key", key.as_str()));
            xml_writer.write_event(Event::Start(elem))?;
            xml_writer.write_event(Event::Text(BytesText::new(value)))?;
            xml_writer.write_event(Event::End(BytesEnd::new("entry")))?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("properties")))?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl From<&PropertySource> for Format {
    fn from(source: &PropertySource) -> Self {
        Format {
            comment: None,
            entries: source.properties().clone(),
        }
    }
}

fn expect_root(e: &BytesStart) -> Result<(), Error> {
    if e.name().as_ref() == b"properties" {
        Ok(())
    } else {
        Err(Error::InvalidResource(format!(
            "root element must be <properties>, found <{}>",
            String::from_utf8_lossy(e.name().as_ref())
        )))
    }
}

fn unexpected_element(name: &[u8]) -> Error {
    Error::InvalidResource(format!(
        "unexpected element <{}> in <properties>",
        String::from_utf8_lossy(name)
    ))
}

fn entry_key(e: &BytesStart) -> Result<String, Error> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"key" {
            return Ok(attr.unescape_value()?.to_string());
        }
    }
    Err(Error::InvalidResource("entry tag missing 'key'".to_string()))
}

/// Reads text and CDATA up to the closing tag of `element`.
fn read_text<R: BufRead>(xml_reader: &mut Reader<R>, element: &[u8]) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut value = String::new();
    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Text(e) => value.push_str(&e.unescape()?),
            Event::CData(e) => {
                let text = std::str::from_utf8(&e)
                    .map_err(|err| Error::InvalidResource(err.to_string()))?;
                value.push_str(text);
            }
            Event::End(_) => return Ok(value),
            Event::Start(e) | Event::Empty(e) => {
                return Err(Error::InvalidResource(format!(
                    "unexpected element <{}> in <{}>",
                    String::from_utf8_lossy(e.name().as_ref()),
                    String::from_utf8_lossy(element)
                )));
            }
            Event::Eof => {
                return Err(Error::InvalidResource(format!(
                    "unclosed <{}> element",
                    String::from_utf8_lossy(element)
                )));
            }
            _ => {}
        }
        buf.clear();
    }
}

/// Only comments, processing instructions and whitespace may follow the root.
fn expect_document_end<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<(), Error> {
    let mut buf = Vec::new();
    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Eof => return Ok(()),
            Event::Text(e) if e.unescape()?.trim().is_empty() => {}
            Event::Comment(_) | Event::PI(_) => {}
            _ => {
                return Err(Error::InvalidResource(
                    "content after </properties>".to_string(),
                ));
            }
        }
        buf.clear();
    }
}

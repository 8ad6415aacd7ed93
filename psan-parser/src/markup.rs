//! Raw markup events with a running character offset
//!
//! This is the bottom layer: it knows nothing about sentences or candidates. It turns the XML
//! byte stream into element starts (with decoded attributes), element ends and text runs, and
//! keeps count of how many content characters have gone by.
//!
//! Adjacent text pieces (plain text, character references, CDATA) are merged into one run, so a
//! token like `AT&amp;T` arrives as a single `AT&T` run. Self-closing elements are reported as a
//! start immediately followed by an end.

use crate::error::{MalformedInputError, ReadError};
use crate::event::{Span, TextRun};
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event as XmlEvent};
use quick_xml::Reader;
use std::collections::VecDeque;
use std::io::BufRead;

/// An element start with its attributes decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    attributes: Vec<(String, String)>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    Start(Tag),
    End(String),
    Text(TextRun),
}

/// Pull reader over an XML stream.
pub struct MarkupReader<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    pending: VecDeque<MarkupEvent>,
    text: String,
    open: Vec<String>,
    offset: usize,
    finished: bool,
}

impl<R: BufRead> MarkupReader<R> {
    pub fn new(input: R) -> Self {
        let mut reader = Reader::from_reader(input);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = true;
        Self {
            reader,
            buf: Vec::with_capacity(256),
            pending: VecDeque::new(),
            text: String::new(),
            open: Vec::new(),
            offset: 0,
            finished: false,
        }
    }

    /// Characters of text content handed out so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of elements currently open in the source.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Next event, or `None` once the document is complete.
    pub fn next_event(&mut self) -> Result<Option<MarkupEvent>, ReadError> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(Some(event));
            }
            if self.finished {
                return Ok(None);
            }
            self.fill()?;
        }
    }

    fn fill(&mut self) -> Result<(), ReadError> {
        let mut buf = std::mem::take(&mut self.buf);
        buf.clear();
        let position = self.reader.buffer_position();
        let decoder = self.reader.decoder();
        match self
            .reader
            .read_event_into(&mut buf)
            .map_err(|e| ReadError::from_xml(e, position))?
        {
            XmlEvent::Start(e) => {
                let tag = decode_tag(decoder, &e, position)?;
                self.flush_text();
                self.open.push(tag.name.clone());
                self.pending.push_back(MarkupEvent::Start(tag));
            }
            XmlEvent::Empty(e) => {
                let tag = decode_tag(decoder, &e, position)?;
                self.flush_text();
                let name = tag.name.clone();
                self.pending.push_back(MarkupEvent::Start(tag));
                self.pending.push_back(MarkupEvent::End(name));
            }
            XmlEvent::End(e) => {
                let name = decode_str(decoder, e.name().as_ref(), position)?;
                self.flush_text();
                self.open.pop();
                self.pending.push_back(MarkupEvent::End(name));
            }
            XmlEvent::Text(e) => {
                let text = e.decode().map_err(|err| syntax(position, err))?;
                self.text.push_str(&text);
            }
            XmlEvent::CData(e) => {
                let text = decode_str(decoder, &e, position)?;
                self.text.push_str(&text);
            }
            XmlEvent::GeneralRef(e) => {
                let name = e.decode().map_err(|err| syntax(position, err))?;
                let reference = format!("&{name};");
                let resolved =
                    quick_xml::escape::unescape(&reference).map_err(|err| syntax(position, err))?;
                self.text.push_str(&resolved);
            }
            XmlEvent::Eof => {
                self.flush_text();
                if let Some(element) = self.open.pop() {
                    return Err(MalformedInputError::Unterminated { element }.into());
                }
                self.finished = true;
            }
            // Declarations, comments, processing instructions and doctypes carry no content.
            _ => {}
        }

        self.buf = buf;
        Ok(())
    }

    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let content = std::mem::take(&mut self.text);
        let start = self.offset;
        self.offset += content.chars().count();
        self.pending.push_back(MarkupEvent::Text(TextRun {
            content,
            span: Span::new(start, self.offset),
        }));
    }
}

fn syntax(position: u64, err: impl std::fmt::Display) -> MalformedInputError {
    MalformedInputError::Syntax {
        position,
        message: err.to_string(),
    }
}

fn decode_str(decoder: Decoder, raw: &[u8], position: u64) -> Result<String, MalformedInputError> {
    decoder
        .decode(raw)
        .map(|s| s.into_owned())
        .map_err(|err| syntax(position, err))
}

fn decode_tag(
    decoder: Decoder,
    start: &BytesStart<'_>,
    position: u64,
) -> Result<Tag, MalformedInputError> {
    let mut tag = Tag::new(decode_str(decoder, start.name().as_ref(), position)?);
    for attr in start.attributes() {
        let attr = attr.map_err(|err| syntax(position, err))?;
        let key = decode_str(decoder, attr.key.as_ref(), position)?;
        let raw = decode_str(decoder, &attr.value, position)?;
        let value = quick_xml::escape::unescape(&raw)
            .map_err(|err| syntax(position, err))?
            .into_owned();
        tag.attributes.push((key, value));
    }
    Ok(tag)
}

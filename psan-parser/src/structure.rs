//! Typed sentence/token/candidate events
//!
//! Builds on [`MarkupReader`] and keeps only the elements the review pipeline cares about:
//!
//! | Element                   | Attributes               | Event                        |
//! |---------------------------|--------------------------|------------------------------|
//! | `sentence`                |                          | `StartSentence`/`EndSentence`|
//! | `token`                   | `id`                     | `StartToken`/`EndToken`      |
//! | `ne` / `entity-candidate` | `start`, `end`, `type`   | `StartCandidate`/`EndCandidate` |
//!
//! Any other element (the document root, recognizer bookkeeping) is checked for balance and then
//! dropped. Text is passed through untouched.

use crate::error::{MalformedInputError, ReadError};
use crate::event::{CandidateSpan, Event, Span};
use crate::markup::{MarkupEvent, MarkupReader, Tag};
use std::io::BufRead;

/// Element names the recognizer uses for entity candidates.
const CANDIDATE_ELEMENTS: &[&str] = &["ne", "entity-candidate"];

enum Open {
    Sentence,
    Token(usize),
    Candidate(CandidateSpan),
    Other,
}

pub struct StructuralReader<R> {
    markup: MarkupReader<R>,
    open: Vec<Open>,
}

impl<R: BufRead> StructuralReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            markup: MarkupReader::new(input),
            open: Vec::new(),
        }
    }

    /// Running character offset, already advanced past the last text event returned.
    pub fn offset(&self) -> usize {
        self.markup.offset()
    }

    pub fn next_event(&mut self) -> Result<Option<Event>, ReadError> {
        while let Some(raw) = self.markup.next_event()? {
            let event = match raw {
                MarkupEvent::Start(tag) => self.start(tag)?,
                MarkupEvent::End(_) => self.end(),
                MarkupEvent::Text(run) => Some(Event::Text(run)),
            };
            if event.is_some() {
                return Ok(event);
            }
        }
        Ok(None)
    }

    fn start(&mut self, tag: Tag) -> Result<Option<Event>, MalformedInputError> {
        let (open, event) = match tag.name.as_str() {
            "sentence" => (Open::Sentence, Some(Event::StartSentence)),
            "token" => {
                let id = offset_attribute(&tag, "id")?;
                (Open::Token(id), Some(Event::StartToken { id }))
            }
            name if CANDIDATE_ELEMENTS.contains(&name) => {
                let candidate = candidate(&tag)?;
                (
                    Open::Candidate(candidate.clone()),
                    Some(Event::StartCandidate(candidate)),
                )
            }
            _ => (Open::Other, None),
        };
        self.open.push(open);
        Ok(event)
    }

    fn end(&mut self) -> Option<Event> {
        // The markup layer has already matched end names, so the stack cannot underflow
        // on well-formed input.
        match self.open.pop()? {
            Open::Sentence => Some(Event::EndSentence),
            Open::Token(id) => Some(Event::EndToken { id }),
            Open::Candidate(candidate) => Some(Event::EndCandidate(candidate)),
            Open::Other => None,
        }
    }
}

impl<R: BufRead> Iterator for StructuralReader<R> {
    type Item = Result<Event, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}

fn offset_attribute(tag: &Tag, attribute: &'static str) -> Result<usize, MalformedInputError> {
    let value = tag
        .attribute(attribute)
        .ok_or_else(|| MalformedInputError::MissingAttribute {
            element: tag.name.clone(),
            attribute,
        })?;
    value
        .trim()
        .parse()
        .map_err(|_| MalformedInputError::InvalidAttribute {
            element: tag.name.clone(),
            attribute,
            value: value.to_string(),
        })
}

fn candidate(tag: &Tag) -> Result<CandidateSpan, MalformedInputError> {
    let start = offset_attribute(tag, "start")?;
    let end = offset_attribute(tag, "end")?;
    if end < start {
        return Err(MalformedInputError::InvertedSpan { start, end });
    }
    let type_code = tag
        .attribute("type")
        .ok_or_else(|| MalformedInputError::MissingAttribute {
            element: tag.name.clone(),
            attribute: "type",
        })?;
    Ok(CandidateSpan {
        span: Span::new(start, end),
        type_code: type_code.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::TextRun;
    use rstest::rstest;

    fn events(source: &str) -> Result<Vec<Event>, ReadError> {
        StructuralReader::new(source.as_bytes()).collect()
    }

    #[test]
    fn test_sentence_with_candidate() {
        let source = r#"<doc><sentence><ne start="0" end="4" type="pf"><token id="0">Anna</token></ne> <token id="5">visited</token></sentence></doc>"#;
        let candidate = CandidateSpan {
            span: Span::new(0, 4),
            type_code: "pf".to_string(),
        };
        assert_eq!(
            events(source).unwrap(),
            vec![
                Event::StartSentence,
                Event::StartCandidate(candidate.clone()),
                Event::StartToken { id: 0 },
                Event::Text(TextRun {
                    content: "Anna".to_string(),
                    span: Span::new(0, 4)
                }),
                Event::EndToken { id: 0 },
                Event::EndCandidate(candidate),
                Event::Text(TextRun {
                    content: " ".to_string(),
                    span: Span::new(4, 5)
                }),
                Event::StartToken { id: 5 },
                Event::Text(TextRun {
                    content: "visited".to_string(),
                    span: Span::new(5, 12)
                }),
                Event::EndToken { id: 5 },
                Event::EndSentence,
            ]
        );
    }

    #[test]
    fn test_offset_is_advanced_before_text_is_returned() {
        let mut reader = StructuralReader::new(r#"<s><token id="0">abc</token></s>"#.as_bytes());
        assert_eq!(reader.next_event().unwrap(), Some(Event::StartToken { id: 0 }));
        assert_eq!(reader.offset(), 0);
        assert!(matches!(reader.next_event().unwrap(), Some(Event::Text(_))));
        assert_eq!(reader.offset(), 3);
    }

    #[test]
    fn test_entity_candidate_alias() {
        let source = r#"<entity-candidate start="2" end="5" type="gu">abc</entity-candidate>"#;
        let events = events(source).unwrap();
        assert!(matches!(
            &events[0],
            Event::StartCandidate(c) if c.span == Span::new(2, 5) && c.type_code == "gu"
        ));
    }

    #[rstest]
    #[case::missing_id(r#"<token>x</token>"#)]
    #[case::non_numeric_id(r#"<token id="x1">x</token>"#)]
    #[case::missing_type(r#"<ne start="0" end="1">x</ne>"#)]
    #[case::missing_end(r#"<ne start="0" type="pf">x</ne>"#)]
    #[case::inverted(r#"<ne start="4" end="1" type="pf">x</ne>"#)]
    #[case::unterminated(r#"<doc><sentence><token id="0">x</token>"#)]
    fn test_malformed_input(#[case] source: &str) {
        let err = events(source).unwrap_err();
        assert!(matches!(err, ReadError::Malformed(_)), "{source}: {err:?}");
    }

    #[test]
    fn test_missing_attribute_names_element() {
        let err = events(r#"<token>x</token>"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "<token> is missing required attribute `id`"
        );
    }
}

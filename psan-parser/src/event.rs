//! Structural events and the offset types they carry.

use std::fmt;

/// Half-open range of character offsets, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `other` lies entirely inside this span.
    pub fn contains_span(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The overlapping part of two spans, if they share at least one offset.
    pub fn intersection(&self, other: &Span) -> Option<Span> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Span { start, end })
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A recognizer-proposed entity mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSpan {
    pub span: Span,
    /// Short category code, e.g. `pf` for first names.
    pub type_code: String,
}

/// Decoded text content together with the offsets it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub content: String,
    pub span: Span,
}

/// A single structural event, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StartSentence,
    EndSentence,
    StartToken { id: usize },
    EndToken { id: usize },
    StartCandidate(CandidateSpan),
    EndCandidate(CandidateSpan),
    Text(TextRun),
}

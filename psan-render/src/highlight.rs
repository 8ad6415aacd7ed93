//! Focus-span text collection
//!
//! Watches the text runs of a render and keeps what falls inside the focus span: the exact raw
//! text (for echoing back to the store) and the trimmed pieces (for display). The renderer tells
//! it the entity type when a candidate lines up exactly with the focus span.

use psan_parser::{Span, TextRun};
use serde::Serialize;

/// What a render found at the focus span.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Highlight {
    /// Literal document text of the focus span.
    pub text: String,
    /// Non-empty trimmed pieces of that text, in document order.
    pub fragments: Vec<String>,
    /// Type code of the candidate that matches the focus span exactly.
    pub entity_type: Option<String>,
}

impl Highlight {
    /// The fragments joined for display, e.g. `Anna Novak`.
    pub fn display_text(&self) -> String {
        self.fragments.join(" ")
    }
}

#[derive(Debug)]
pub struct HighlightCollector {
    focus: Span,
    highlight: Highlight,
}

impl HighlightCollector {
    pub fn new(focus: Span) -> Self {
        Self {
            focus,
            highlight: Highlight::default(),
        }
    }

    pub fn observe(&mut self, run: &TextRun) {
        let Some(overlap) = run.span.intersection(&self.focus) else {
            return;
        };
        let piece: String = run
            .content
            .chars()
            .skip(overlap.start - run.span.start)
            .take(overlap.len())
            .collect();
        let trimmed = piece.trim();
        if !trimmed.is_empty() {
            self.highlight.fragments.push(trimmed.to_string());
        }
        self.highlight.text.push_str(&piece);
    }

    pub fn record_entity_type(&mut self, type_code: &str) {
        self.highlight.entity_type = Some(type_code.to_string());
    }

    pub fn finish(self) -> Highlight {
        self.highlight
    }
}

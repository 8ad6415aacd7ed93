//! Per-render decision index
//!
//! Fetched with a single store query when a render starts, then consulted for every candidate
//! and top-level token inside the window. Entries are keyed by their start relative to the
//! window and then by span length:
//!
//! ```text
//! start - window.start  →  length  →  DecisionState
//! ```
//!
//! Positions outside the window are never looked up; asking for one yields nothing.

use crate::decision::{DecisionState, DocumentId, StoredDecision};
use crate::store::{DecisionStore, StoreError};
use crate::window::Window;
use psan_parser::Span;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone)]
pub struct DecisionIndex {
    window: Window,
    entries: HashMap<usize, BTreeMap<usize, DecisionState>>,
}

impl DecisionIndex {
    /// One batch query against `store` for everything the render may need.
    pub fn fetch(
        store: &dyn DecisionStore,
        document: DocumentId,
        window: Window,
    ) -> Result<Self, StoreError> {
        let decisions = store.decisions_in(document, window)?;
        Ok(Self::from_decisions(window, decisions))
    }

    pub fn from_decisions(
        window: Window,
        decisions: impl IntoIterator<Item = StoredDecision>,
    ) -> Self {
        let mut entries: HashMap<usize, BTreeMap<usize, DecisionState>> = HashMap::new();
        for decision in decisions {
            // Spans reaching into the window from the left are never looked up.
            if !window.is_in_window(decision.span.start) || decision.span.is_empty() {
                continue;
            }
            entries
                .entry(decision.span.start - window.start)
                .or_default()
                .insert(decision.span.len(), decision.state);
        }
        Self { window, entries }
    }

    /// Decision recorded for exactly `span`; undecided if there is none.
    pub fn lookup(&self, span: Span) -> DecisionState {
        self.slot(span.start)
            .and_then(|lengths| lengths.get(&span.len()))
            .copied()
            .unwrap_or(DecisionState::UNDECIDED)
    }

    /// Decisions for spans starting at `offset`, shortest first.
    pub fn starting_at(&self, offset: usize) -> impl Iterator<Item = (usize, DecisionState)> + '_ {
        self.slot(offset)
            .into_iter()
            .flat_map(|lengths| lengths.iter().map(|(&len, &state)| (len, state)))
    }

    /// The shortest span starting at `offset` that carries a public/secret decision.
    pub fn styled_at(&self, offset: usize) -> Option<(Span, DecisionState)> {
        self.starting_at(offset)
            .find(|(_, state)| state.is_styled())
            .map(|(len, state)| (Span::new(offset, offset + len), state))
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn slot(&self, offset: usize) -> Option<&BTreeMap<usize, DecisionState>> {
        if !self.window.is_in_window(offset) {
            return None;
        }
        self.entries.get(&(offset - self.window.start))
    }
}

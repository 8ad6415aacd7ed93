//! Decision store
//!
//! The renderer talks to whatever holds review decisions through [`DecisionStore`]: one range
//! query per render, nothing else. [`MemoryStore`] is the in-process implementation used by the
//! CLI and the tests; it can be seeded from a JSON export.
//!
//! JSON records look like
//!
//! ```text
//! [
//!   { "document": 7, "start": 0, "end": 4, "decision": "public" },
//!   { "document": 7, "start": 9, "end": 15, "decision": "secret", "provenance": "rule" }
//! ]
//! ```

use crate::decision::{DecisionState, DocumentId, Provenance, StoredDecision, Verdict};
use crate::window::Window;
use psan_parser::Span;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::sync::RwLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("decision store lock poisoned")]
    Poisoned,

    #[error("invalid decision records: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("decision {span} has no content")]
    EmptySpan { span: Span },

    #[error("failed to read decision records: {0}")]
    Io(#[from] std::io::Error),
}

/// Read access to recorded decisions.
pub trait DecisionStore: Send + Sync {
    /// Every decision of `document` whose span lies in or overlaps `window`, ordered by start.
    fn decisions_in(
        &self,
        document: DocumentId,
        window: Window,
    ) -> Result<Vec<StoredDecision>, StoreError>;
}

type Decisions = BTreeMap<(usize, usize), DecisionState>;

#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<DocumentId, Decisions>>,
}

#[derive(Debug, Deserialize)]
struct Record {
    document: DocumentId,
    start: usize,
    end: usize,
    decision: Verdict,
    #[serde(default)]
    provenance: Provenance,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON array of decision records.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let records: Vec<Record> = serde_json::from_reader(reader)?;
        let store = Self::new();
        for record in records {
            store.record(
                record.document,
                Span::new(record.start, record.end),
                DecisionState {
                    verdict: record.decision,
                    provenance: record.provenance,
                },
            )?;
        }
        Ok(store)
    }

    /// Insert or replace the decision for exactly `span`.
    pub fn record(
        &self,
        document: DocumentId,
        span: Span,
        state: DecisionState,
    ) -> Result<(), StoreError> {
        if span.is_empty() {
            return Err(StoreError::EmptySpan { span });
        }
        let mut documents = self.documents.write().map_err(|_| StoreError::Poisoned)?;
        documents
            .entry(document)
            .or_default()
            .insert((span.start, span.end), state);
        Ok(())
    }

    /// Mark every decision strictly inside `outer` as subsumed by it. Returns how many changed.
    pub fn subsume(&self, document: DocumentId, outer: Span) -> Result<usize, StoreError> {
        let mut documents = self.documents.write().map_err(|_| StoreError::Poisoned)?;
        let Some(decisions) = documents.get_mut(&document) else {
            return Ok(0);
        };
        let mut changed = 0;
        for (&(start, end), state) in decisions.range_mut((outer.start, 0)..(outer.end, 0)) {
            let inner = Span::new(start, end);
            if inner != outer && outer.contains_span(&inner) {
                state.provenance = Provenance::SubsumedByOuter;
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// The first span of `document` still waiting for a reviewer.
    pub fn first_undecided(&self, document: DocumentId) -> Result<Option<Span>, StoreError> {
        let documents = self.documents.read().map_err(|_| StoreError::Poisoned)?;
        Ok(documents.get(&document).and_then(|decisions| {
            decisions
                .iter()
                .find(|(_, state)| **state == DecisionState::UNDECIDED)
                .map(|(&(start, end), _)| Span::new(start, end))
        }))
    }

    pub fn len(&self) -> usize {
        self.documents
            .read()
            .map(|documents| documents.values().map(BTreeMap::len).sum())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DecisionStore for MemoryStore {
    fn decisions_in(
        &self,
        document: DocumentId,
        window: Window,
    ) -> Result<Vec<StoredDecision>, StoreError> {
        let documents = self.documents.read().map_err(|_| StoreError::Poisoned)?;
        let Some(decisions) = documents.get(&document) else {
            return Ok(Vec::new());
        };
        Ok(decisions
            .range(..=(window.end, usize::MAX))
            .filter(|(key, _)| key.1 >= window.start)
            .map(|(&(start, end), &state)| StoredDecision {
                span: Span::new(start, end),
                state,
            })
            .collect())
    }
}

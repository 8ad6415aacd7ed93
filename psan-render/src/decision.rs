//! Review decisions
//!
//! A decision has two independent parts: the verdict (is the span safe to publish?) and its
//! provenance (did a reviewer decide it, did a saved rule, or was it swallowed by a wider span a
//! reviewer marked?). Stores in the wild spell these differently; the serde aliases accept the
//! common spellings.

use psan_parser::Span;
use serde::{Deserialize, Serialize};

pub type DocumentId = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    #[default]
    Undecided,
    Public,
    Secret,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// Decided by a reviewer on this exact span.
    #[default]
    Direct,
    /// Applied from a saved word or entity-type rule.
    #[serde(alias = "rule")]
    RuleDerived,
    /// A candidate inside a wider span that a reviewer decided as a whole.
    #[serde(alias = "nested", alias = "subsumed")]
    SubsumedByOuter,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecisionState {
    pub verdict: Verdict,
    pub provenance: Provenance,
}

impl DecisionState {
    pub const UNDECIDED: DecisionState = DecisionState {
        verdict: Verdict::Undecided,
        provenance: Provenance::Direct,
    };

    pub fn direct(verdict: Verdict) -> Self {
        Self {
            verdict,
            provenance: Provenance::Direct,
        }
    }

    pub fn rule(verdict: Verdict) -> Self {
        Self {
            verdict,
            provenance: Provenance::RuleDerived,
        }
    }

    /// Public or secret in its own right, i.e. something the renderer should color.
    pub fn is_styled(&self) -> bool {
        self.provenance != Provenance::SubsumedByOuter && self.verdict != Verdict::Undecided
    }
}

/// One row of the decision store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredDecision {
    pub span: Span,
    pub state: DecisionState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsumed_decisions_are_not_styled() {
        let nested = DecisionState {
            verdict: Verdict::Secret,
            provenance: Provenance::SubsumedByOuter,
        };
        assert!(!nested.is_styled());
        assert!(DecisionState::rule(Verdict::Public).is_styled());
        assert!(!DecisionState::UNDECIDED.is_styled());
    }

    #[test]
    fn provenance_accepts_both_spellings() {
        let rule: Provenance = serde_json::from_str("\"rule\"").unwrap();
        let derived: Provenance = serde_json::from_str("\"rule-derived\"").unwrap();
        let nested: Provenance = serde_json::from_str("\"nested\"").unwrap();
        assert_eq!(rule, Provenance::RuleDerived);
        assert_eq!(derived, Provenance::RuleDerived);
        assert_eq!(nested, Provenance::SubsumedByOuter);
    }
}

//! Render options: window margin, fade tail and the class vocabulary.

use crate::decision::{DecisionState, Provenance, Verdict};
use serde::{Deserialize, Serialize};

/// Class names the presentation layer styles rendered elements by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub token: String,
    pub candidate: String,
    pub public: String,
    pub secret: String,
    /// Added next to `public`/`secret` when a saved rule made the decision.
    pub rule: String,
    pub highlight: String,
    pub fade: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            token: "token".to_string(),
            candidate: "candidate".to_string(),
            public: "candidate-public".to_string(),
            secret: "candidate-secret".to_string(),
            rule: "rule-derived".to_string(),
            highlight: "highlight".to_string(),
            fade: "small fadeout".to_string(),
        }
    }
}

impl Vocabulary {
    /// Classes for an element of `base` kind with the given decision and highlight.
    pub(crate) fn classes(&self, base: &str, state: DecisionState, highlight: bool) -> String {
        let mut classes = vec![base];
        if state.is_styled() {
            classes.push(match state.verdict {
                Verdict::Public => self.public.as_str(),
                _ => self.secret.as_str(),
            });
            if state.provenance == Provenance::RuleDerived {
                classes.push(self.rule.as_str());
            }
        }
        if highlight {
            classes.push(self.highlight.as_str());
        }
        classes.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Characters shown on either side of the focus span.
    pub margin: usize,
    /// Show the rest of the last sentence, de-emphasized.
    pub fade_tail: bool,
    pub vocabulary: Vocabulary,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margin: 100,
            fade_tail: true,
            vocabulary: Vocabulary::default(),
        }
    }
}

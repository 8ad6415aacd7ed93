//! Windowed review rendering for entity candidates
//!
//!     A reviewer looks at one candidate at a time. This crate turns the slice of the document
//!     around that candidate (the focus span) into a small markup fragment: candidates and
//!     decided token runs become `span` elements whose classes carry the recorded decisions, the
//!     focus span is highlighted, and the sentence in which the window closes trails off in a
//!     de-emphasized fade element.
//!
//!     ```text
//!     store ──decisions_in──▶ DecisionIndex ─┐
//!                                            ├─▶ Renderer ──▶ Rendered { fragment, highlight, window }
//!     document ──StructuralReader──▶ events ─┘
//!     ```
//!
//! Layout
//!
//!     - decision.rs  Verdicts, provenance and the stored decision record.
//!     - store.rs     The `DecisionStore` query contract and the in-memory store.
//!     - index.rs     Per-render decision lookup, built from one store query.
//!     - window.rs    Window bounds and the before/in/fade/done phases.
//!     - stack.rs     The explicit stack of open output elements.
//!     - fragment.rs  Escaping writer for the output markup.
//!     - highlight.rs Collects the focus text and the matching entity type.
//!     - options.rs   Margin, fade tail and the class vocabulary.
//!     - renderer.rs  The pass that ties all of the above together.
//!     - entity.rs    Entity category codes and their descriptions.
//!
//! Guarantees
//!
//!     A fragment is returned only when the whole window rendered: the focus token was shown,
//!     every element opened is closed, and any input or store failure yields an error instead of
//!     partial output. The
//!     amount of text written depends on the margin, the focus length and the length of the last
//!     sentence, never on the size of the document.

pub mod decision;
pub mod entity;
pub mod error;
pub mod fragment;
pub mod highlight;
pub mod index;
pub mod options;
pub mod renderer;
pub mod stack;
pub mod store;
pub mod window;

pub use decision::{DecisionState, DocumentId, Provenance, StoredDecision, Verdict};
pub use entity::{describe, display_name, ENTITY_CODES};
pub use error::RenderError;
pub use highlight::Highlight;
pub use index::DecisionIndex;
pub use options::{RenderOptions, Vocabulary};
pub use renderer::{Rendered, Renderer};
pub use store::{DecisionStore, MemoryStore, StoreError};
pub use window::{Phase, Window, WindowController};

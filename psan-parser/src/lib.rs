//! Offset-tracking reader for tokenized, entity-annotated documents
//!
//!     Recognized documents arrive as XML: sentences hold tokens, and the recognizer wraps the
//!     tokens it believes form a named entity in a candidate element. Every token carries its
//!     starting offset as `id`, every candidate its `start`/`end` offsets and a category `type`.
//!     All offsets count characters of text content, so they can be checked against a running
//!     counter while the document streams by.
//!
//!     ```text
//!     <doc>
//!       <sentence><ne start="0" end="4" type="pf"><token id="0">Anna</token></ne> <token id="5">visited</token></sentence>
//!     </doc>
//!     ```
//!
//! Layers
//!
//!     - markup.rs     Raw element/text events with a running character offset. Checks that the
//!                     stream is well formed, coalesces adjacent text and resolves references.
//!     - structure.rs  Typed sentence/token/candidate events on top of the raw layer, with the
//!                     required attributes parsed and validated.
//!     - features.rs   The offline reducer that flattens confirmed candidates into a
//!                     (start, end, label) table next to the plain text stream.
//!
//!     Nothing here builds a tree. Each layer is a pull iterator over a `BufRead`, so a reader
//!     can stop as soon as its consumer has seen enough of the document.
//!
//! Offsets
//!
//!     The running offset is advanced by the length of a text run *before* the run is handed out.
//!     After a token's text, [`StructuralReader::offset`] therefore equals the token's end offset,
//!     which is what token ids and candidate bounds are compared against.

pub mod error;
pub mod event;
pub mod features;
pub mod markup;
pub mod structure;

pub use error::{MalformedInputError, ReadError};
pub use event::{CandidateSpan, Event, Span, TextRun};
pub use features::{extract_features, Feature, FeatureOptions, FeatureSummary};
pub use markup::{MarkupEvent, MarkupReader, Tag};
pub use structure::StructuralReader;

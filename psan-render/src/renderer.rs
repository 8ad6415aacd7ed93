//! The windowed span renderer
//!
//! A render is one pass over the structural event stream. The window controller decides
//! whether an event is shown at all; inside the window every event is turned into writer calls
//! against an explicit stack of open elements, so that whatever the input looks like the
//! fragment is closed the moment the window ends.
//!
//! Only the outermost element at any point gets decision styling:
//!
//!     - a candidate element is always rendered, with its own decision
//!     - a token is styled only when nothing else is open, either as the start of the focus run
//!       or as the start of a decided token run, otherwise it gets a plain addressable element
//!
//! so a candidate's decision always wins over token-level decisions for the tokens inside it.
//! A focus that starts inside a wider candidate still gets a highlight run, but an unstyled one.

use crate::decision::{DecisionState, DocumentId};
use crate::error::RenderError;
use crate::fragment::FragmentWriter;
use crate::highlight::{Highlight, HighlightCollector};
use crate::index::DecisionIndex;
use crate::options::{RenderOptions, Vocabulary};
use crate::stack::{OpenSpan, OpenStack};
use crate::store::DecisionStore;
use crate::window::{Phase, Window, WindowController};
use psan_parser::{CandidateSpan, Event, MalformedInputError, Span, StructuralReader, TextRun};
use serde::Serialize;
use std::io::BufRead;
use tracing::debug;

/// Output of a successful render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    /// Balanced markup for the window.
    pub fragment: String,
    pub highlight: Highlight,
    pub window: Window,
}

/// Renders review fragments. Holds only configuration, so one renderer serves any number of
/// documents and threads.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render the window around `focus` in `document`.
    ///
    /// Decisions are fetched once, before the document is read. Reading stops as soon as the
    /// window (and its fade tail) has been written.
    pub fn render<R: BufRead>(
        &self,
        input: R,
        store: &dyn DecisionStore,
        document: DocumentId,
        focus: Span,
    ) -> Result<Rendered, RenderError> {
        if focus.is_empty() {
            return Err(RenderError::EmptyFocus { focus });
        }
        let window = Window::around(focus, self.options.margin);
        let index = DecisionIndex::fetch(store, document, window)?;
        debug!(
            document,
            %focus,
            window.start = window.start,
            window.end = window.end,
            decisions = index.len(),
            "render started"
        );

        let mut reader = StructuralReader::new(input);
        let mut pass = RenderPass::new(&self.options, index, window, focus);
        while let Some(event) = reader.next_event()? {
            pass.handle(event, reader.offset())?;
            if pass.is_done() {
                break;
            }
        }
        let rendered = pass.finish()?;
        debug!(
            document,
            bytes = rendered.fragment.len(),
            entity_type = rendered.highlight.entity_type.as_deref(),
            "render finished"
        );
        Ok(rendered)
    }
}

/// State of one render.
struct RenderPass<'a> {
    vocabulary: &'a Vocabulary,
    controller: WindowController,
    index: DecisionIndex,
    stack: OpenStack,
    writer: FragmentWriter,
    collector: HighlightCollector,
    focus: Span,
    /// Candidate elements open in the source, shown or not.
    source_candidates: usize,
    /// A token starting at the focus was reached inside the window.
    focus_seen: bool,
    /// An element carrying the highlight has been opened at the focus.
    focus_marked: bool,
}

impl<'a> RenderPass<'a> {
    fn new(options: &'a RenderOptions, index: DecisionIndex, window: Window, focus: Span) -> Self {
        Self {
            vocabulary: &options.vocabulary,
            controller: WindowController::new(window, options.fade_tail),
            index,
            stack: OpenStack::new(),
            writer: FragmentWriter::new(),
            collector: HighlightCollector::new(focus),
            focus,
            source_candidates: 0,
            focus_seen: false,
            focus_marked: false,
        }
    }

    fn is_done(&self) -> bool {
        self.controller.is_done()
    }

    fn handle(&mut self, event: Event, offset: usize) -> Result<(), RenderError> {
        match event {
            Event::StartSentence => self.start_sentence(offset),
            Event::EndSentence => self.end_sentence(),
            Event::StartToken { id } => self.start_token(id),
            Event::EndToken { id } => self.end_token(id, offset),
            Event::StartCandidate(candidate) => self.start_candidate(&candidate)?,
            Event::EndCandidate(candidate) => self.end_candidate(&candidate, offset)?,
            Event::Text(run) => self.text(&run),
        }
        Ok(())
    }

    fn start_sentence(&mut self, offset: usize) {
        match self.controller.phase() {
            Phase::BeforeWindow if self.source_candidates == 0 => {
                self.controller.sentence_started(offset);
            }
            Phase::InWindow if self.controller.window().is_past_window(offset) => {
                self.begin_fade();
            }
            _ => {}
        }
    }

    fn end_sentence(&mut self) {
        if self.controller.phase() != Phase::FadeTail {
            return;
        }
        if self.stack.pop_fade().is_some() {
            self.writer.close();
        }
        self.controller.finish();
    }

    fn start_token(&mut self, id: usize) {
        if self.controller.phase() == Phase::BeforeWindow && self.source_candidates == 0 {
            self.controller.token_started(id);
        }
        if !self.controller.is_in_window() {
            return;
        }
        if id == self.focus.start {
            self.focus_seen = true;
        }
        if !self.stack.is_empty() {
            self.open_nested_focus(id);
            return;
        }

        if id == self.focus.start {
            self.open_focus_run();
        } else if let Some((span, state)) = self.index.styled_at(id) {
            self.open_run(span, self.vocabulary.classes(&self.vocabulary.token, state, false));
        } else {
            self.writer.open(&self.vocabulary.token, &[("token", id)]);
            self.stack.push(OpenSpan::token(id));
        }
    }

    /// The focus starts inside a wider candidate. It is marked with an unstyled run so the
    /// candidate's decision still shows, provided the run closes before the element around it.
    fn open_nested_focus(&mut self, id: usize) {
        if id != self.focus.start || self.focus_marked {
            return;
        }
        let fits = self
            .stack
            .top()
            .and_then(|open| open.closes_at)
            .is_some_and(|end| end >= self.focus.end);
        if fits {
            let classes = self
                .vocabulary
                .classes(&self.vocabulary.token, DecisionState::UNDECIDED, true);
            self.open_run(self.focus, classes);
            self.focus_marked = true;
        }
    }

    fn open_focus_run(&mut self) {
        let state = self.index.lookup(self.focus);
        self.open_run(self.focus, self.vocabulary.classes(&self.vocabulary.token, state, true));
        self.focus_marked = true;
    }

    fn end_token(&mut self, id: usize, offset: usize) {
        if !self.controller.is_in_window() {
            return;
        }
        if self.stack.pop_token(id).is_some() {
            self.writer.close();
        }
        self.close_due_runs(offset);
        if self.controller.reached_end(offset) {
            self.begin_fade();
        }
    }

    fn start_candidate(&mut self, candidate: &CandidateSpan) -> Result<(), MalformedInputError> {
        let span = candidate.span;
        if self.controller.phase() == Phase::BeforeWindow && self.source_candidates == 0 {
            self.controller.candidate_started(span);
        }
        self.source_candidates += 1;
        if !self.controller.is_in_window() {
            return Ok(());
        }
        if span.is_empty() {
            return Err(MalformedInputError::EmptyCandidate { start: span.start });
        }

        // A candidate covering only the head of the focus: the focus run still has to wrap the
        // whole focus span.
        if self.stack.is_empty() && span.start == self.focus.start && span.end < self.focus.end {
            self.open_focus_run();
        }

        let state = self.index.lookup(span);
        let highlight = self.focus.contains_span(&span);
        if span == self.focus {
            self.collector.record_entity_type(&candidate.type_code);
            self.focus_marked = true;
        }
        let classes = self.vocabulary.classes(&self.vocabulary.candidate, state, highlight);
        self.writer.open(&classes, &[("start", span.start), ("end", span.end)]);
        self.stack.push(OpenSpan::candidate(span.end));
        Ok(())
    }

    fn end_candidate(
        &mut self,
        candidate: &CandidateSpan,
        offset: usize,
    ) -> Result<(), MalformedInputError> {
        self.source_candidates = self.source_candidates.saturating_sub(1);
        if !self.controller.is_in_window() {
            return Ok(());
        }
        if self.stack.pop_candidate().is_none() {
            return Err(MalformedInputError::UnbalancedCandidate {
                start: candidate.span.start,
                end: candidate.span.end,
            });
        }
        self.writer.close();
        self.close_due_runs(offset);
        Ok(())
    }

    fn text(&mut self, run: &TextRun) {
        if self.controller.is_done() {
            return;
        }
        self.collector.observe(run);
        if self.controller.is_emitting() {
            self.writer.text(&run.content);
        }
    }

    fn open_run(&mut self, span: Span, classes: String) {
        self.writer.open(&classes, &[("start", span.start), ("end", span.end)]);
        self.stack.push(OpenSpan::run(span.end));
    }

    fn close_due_runs(&mut self, offset: usize) {
        while self.stack.pop_due_run(offset).is_some() {
            self.writer.close();
        }
    }

    fn close_all(&mut self) {
        let open = self.stack.drain().count();
        for _ in 0..open {
            self.writer.close();
        }
    }

    fn begin_fade(&mut self) {
        self.close_all();
        if self.controller.leave_window() {
            self.writer.open(&self.vocabulary.fade, &[]);
            self.stack.push(OpenSpan::fade());
        }
    }

    fn finish(mut self) -> Result<Rendered, RenderError> {
        self.close_all();
        self.controller.finish();
        if !self.focus_seen {
            return Err(RenderError::FocusNotFound { focus: self.focus });
        }
        if !self.writer.is_balanced() {
            return Err(RenderError::Unbalanced {
                open: self.writer.depth(),
                stray: self.writer.stray_closes(),
            });
        }
        Ok(Rendered {
            fragment: self.writer.into_string(),
            highlight: self.collector.finish(),
            window: self.controller.window(),
        })
    }
}

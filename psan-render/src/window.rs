//! Render window and phase tracking
//!
//! A render only shows `margin` characters on either side of the focus span. The
//! [`WindowController`] owns the bounds and the phase the render is in; the renderer asks it
//! whether to start, keep, or stop emitting.
//!
//! ```text
//!   BeforeWindow ──sentence/token/candidate reaching the window──▶ InWindow
//!   InWindow ──token ends at or past window end──▶ FadeTail ──sentence ends──▶ Done
//!   InWindow ──(fade tail disabled)──────────────▶ Done
//! ```

use psan_parser::Span;
use serde::Serialize;
use tracing::trace;

/// Inclusive offset range `[start, end]` around a focus span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Window {
    pub fn around(focus: Span, margin: usize) -> Self {
        Self {
            start: focus.start.saturating_sub(margin),
            end: focus.end.saturating_add(margin),
        }
    }

    pub fn is_before_window(&self, offset: usize) -> bool {
        offset < self.start
    }

    pub fn is_in_window(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    pub fn is_past_window(&self, offset: usize) -> bool {
        offset > self.end
    }

    /// Whether any part of `span` falls inside the window.
    pub fn overlaps(&self, span: Span) -> bool {
        self.is_in_window(span.start) || (span.start < self.start && span.end > self.start)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    BeforeWindow,
    InWindow,
    FadeTail,
    Done,
}

#[derive(Debug, Clone)]
pub struct WindowController {
    window: Window,
    phase: Phase,
    fade_tail: bool,
}

impl WindowController {
    pub fn new(window: Window, fade_tail: bool) -> Self {
        Self {
            window,
            phase: Phase::BeforeWindow,
            fade_tail,
        }
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_in_window(&self) -> bool {
        self.phase == Phase::InWindow
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Whether text seen now belongs in the output.
    pub fn is_emitting(&self) -> bool {
        matches!(self.phase, Phase::InWindow | Phase::FadeTail)
    }

    /// A sentence starts at `offset`. Returns `true` if this opened the window.
    pub fn sentence_started(&mut self, offset: usize) -> bool {
        if self.phase != Phase::BeforeWindow {
            return false;
        }
        if self.window.is_in_window(offset) {
            self.set_phase(Phase::InWindow);
            true
        } else {
            if self.window.is_past_window(offset) {
                // The window lay inside a sentence that could not be entered.
                self.set_phase(Phase::Done);
            }
            false
        }
    }

    /// A token starts at `id` in a sentence that began before the window.
    /// Returns `true` if this opened the window.
    pub fn token_started(&mut self, id: usize) -> bool {
        if self.phase == Phase::BeforeWindow && self.window.is_in_window(id) {
            self.set_phase(Phase::InWindow);
            return true;
        }
        false
    }

    /// A candidate element starts outside any other candidate. One that reaches into the window
    /// opens it, even when it starts before the window, so that it is shown whole.
    /// Returns `true` if this opened the window.
    pub fn candidate_started(&mut self, span: Span) -> bool {
        if self.phase == Phase::BeforeWindow && self.window.overlaps(span) {
            self.set_phase(Phase::InWindow);
            return true;
        }
        false
    }

    /// Whether the window has run out at `offset` and the tail should begin.
    pub fn reached_end(&self, offset: usize) -> bool {
        self.phase == Phase::InWindow && offset >= self.window.end
    }

    /// Leave the window. Returns `true` if a fade tail follows.
    pub fn leave_window(&mut self) -> bool {
        if self.fade_tail {
            self.set_phase(Phase::FadeTail);
            true
        } else {
            self.set_phase(Phase::Done);
            false
        }
    }

    pub fn finish(&mut self) {
        self.set_phase(Phase::Done);
    }

    fn set_phase(&mut self, phase: Phase) {
        trace!(from = ?self.phase, to = ?phase, "window phase");
        self.phase = phase;
    }
}

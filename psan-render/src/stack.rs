//! Open-element stack
//!
//! Every element the renderer opens is pushed here and every close pops it, so the output is
//! balanced exactly when the stack is empty. Each record says what kind of element it is and
//! when it is due to close:
//!
//! | Kind        | Opened for                               | Closed by                           |
//! |-------------|------------------------------------------|-------------------------------------|
//! | `Token`     | a top-level token with nothing to show   | that token's end                    |
//! | `Run`       | a highlighted or decided run of tokens   | a token/candidate end at `closes_at`|
//! | `Candidate` | an entity candidate                      | the matching candidate end          |
//! | `Fade`      | the trailing context after the window    | the end of the fading sentence      |

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Token { id: usize },
    Run,
    Candidate,
    Fade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenSpan {
    pub kind: SpanKind,
    /// Offset at which the element is due to close, when known up front.
    pub closes_at: Option<usize>,
}

impl OpenSpan {
    pub fn token(id: usize) -> Self {
        Self {
            kind: SpanKind::Token { id },
            closes_at: None,
        }
    }

    pub fn run(closes_at: usize) -> Self {
        Self {
            kind: SpanKind::Run,
            closes_at: Some(closes_at),
        }
    }

    pub fn candidate(closes_at: usize) -> Self {
        Self {
            kind: SpanKind::Candidate,
            closes_at: Some(closes_at),
        }
    }

    pub fn fade() -> Self {
        Self {
            kind: SpanKind::Fade,
            closes_at: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct OpenStack {
    spans: Vec<OpenSpan>,
}

impl OpenStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn top(&self) -> Option<&OpenSpan> {
        self.spans.last()
    }

    pub fn push(&mut self, span: OpenSpan) {
        self.spans.push(span);
    }

    /// Pop the top element if it is the plain element of token `id`.
    pub fn pop_token(&mut self, id: usize) -> Option<OpenSpan> {
        self.pop_if(|span| span.kind == SpanKind::Token { id })
    }

    /// Pop the top element if it is a candidate.
    pub fn pop_candidate(&mut self) -> Option<OpenSpan> {
        self.pop_if(|span| span.kind == SpanKind::Candidate)
    }

    /// Pop the top element if it is a run that is due at `offset`.
    pub fn pop_due_run(&mut self, offset: usize) -> Option<OpenSpan> {
        self.pop_if(|span| {
            span.kind == SpanKind::Run && span.closes_at.is_some_and(|end| end <= offset)
        })
    }

    pub fn pop_fade(&mut self) -> Option<OpenSpan> {
        self.pop_if(|span| span.kind == SpanKind::Fade)
    }

    /// Pop everything, innermost first.
    pub fn drain(&mut self) -> impl Iterator<Item = OpenSpan> + '_ {
        self.spans.drain(..).rev()
    }

    fn pop_if(&mut self, due: impl FnOnce(&OpenSpan) -> bool) -> Option<OpenSpan> {
        if self.spans.last().is_some_and(due) {
            self.spans.pop()
        } else {
            None
        }
    }
}

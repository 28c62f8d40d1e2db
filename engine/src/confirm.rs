//! Yes/no confirmations that suspend normal dispatch for one turn.

use mosis_rewrite::parse_bool;

/// What the machine does once a confirmation is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Keep waiting for input in the current stage.
    Stay,
    /// Fire the current stage's forward trigger.
    Advance,
    /// Export the problem under the configured user name.
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub query: String,
    pub on_yes: Continuation,
    pub on_no: Continuation,
    /// Forward non-boolean answers to the stage handler instead of re-prompting.
    pub pass_through: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Continue(Continuation),
    /// Not a yes/no answer; hand the line to the stage handler.
    PassThrough,
    /// Not a yes/no answer; ask again.
    Repeat,
}

impl ConfirmationRequest {
    #[must_use]
    pub fn new(query: impl Into<String>, on_yes: Continuation, on_no: Continuation) -> Self {
        Self {
            query: query.into(),
            on_yes,
            on_no,
            pass_through: false,
        }
    }

    #[must_use]
    pub fn passing_through(mut self) -> Self {
        self.pass_through = true;
        self
    }

    #[must_use]
    pub fn prompt(&self) -> String {
        format!("{} [y/n]? ", self.query)
    }

    /// Interpret one line. A blank line means yes.
    #[must_use]
    pub fn answer(&self, input: &str) -> Answer {
        let parsed = if input.trim().is_empty() {
            Some(true)
        } else {
            parse_bool(input)
        };
        match parsed {
            Some(true) => Answer::Continue(self.on_yes),
            Some(false) => Answer::Continue(self.on_no),
            None if self.pass_through => Answer::PassThrough,
            None => Answer::Repeat,
        }
    }
}

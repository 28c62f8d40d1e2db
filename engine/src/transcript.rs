//! Text the interview says back, in order, tagged with its stream.
//!
//! The engine never writes to the terminal itself. The front end drains the
//! transcript after every turn and decides where each line goes.

use std::mem;

use crate::TurnError;

const REPHRASE: &str = "I did not catch that. Could you please rephrase?";
const MAX_DETAIL_CHARS: usize = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub stream: Stream,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct Transcript {
    lines: Vec<OutputLine>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn say(&mut self, text: impl Into<String>) {
        self.push(Stream::Stdout, text.into());
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.push(Stream::Stderr, text.into());
    }

    pub fn blank(&mut self) {
        self.push(Stream::Stdout, String::new());
    }

    pub fn subheading(&mut self, heading: &str) {
        self.say(format!("## {heading}"));
        self.blank();
    }

    /// The uniform "please rephrase" message for a recovered error.
    pub fn please_repeat(&mut self, err: &TurnError) {
        let mut text = format!("{REPHRASE}\nDetails: {err}");
        if let Some(detail) = err.detail() {
            text.push_str(". ");
            text.push_str(&truncate_detail(detail));
        }
        self.warn(text);
    }

    #[must_use]
    pub fn lines(&self) -> &[OutputLine] {
        &self.lines
    }

    pub fn drain(&mut self) -> Vec<OutputLine> {
        mem::take(&mut self.lines)
    }

    fn push(&mut self, stream: Stream, text: String) {
        self.lines.push(OutputLine { stream, text });
    }
}

fn truncate_detail(detail: &str) -> String {
    let detail = detail.trim();
    if detail.chars().count() <= MAX_DETAIL_CHARS {
        return detail.to_owned();
    }
    let mut truncated: String = detail.chars().take(MAX_DETAIL_CHARS).collect();
    truncated.push('…');
    truncated
}

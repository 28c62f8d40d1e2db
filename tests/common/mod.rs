//! Shared test utilities and fixtures
//!
//! A scripted theory store that answers like the real one for a single
//! 1D Poisson problem, and a session wrapper around the interview.

#![allow(dead_code)]

use mosis_engine::{Interview, InterviewSettings, JsonExporter, OutputLine, Stream};
use mosis_store::{RecordingStore, StoreReply};
use tempfile::TempDir;

/// `Ω = [0;1]` as the store presents `ephdomain`.
pub const DOMAIN_REPLY: &str = r#"<omdoc xmlns:om="http://www.openmath.org/OpenMath">
  <theory name="ephdomain">
    <constant name="Ω">
      <type><om:OMOBJ><om:OMS name="type"/></om:OMOBJ></type>
      <definition><om:OMOBJ><om:OMA>
        <om:OMS name="interval"/>
        <om:OMLIT value="0" type="real"/>
        <om:OMLIT value="1" type="real"/>
      </om:OMA></om:OMOBJ></definition>
    </constant>
  </theory>
</omdoc>"#;

/// Every answer up to the export offer, in order.
pub const UP_TO_SOLVE: &[&str] = &[
    "Ω = [0;1]",
    "u : Ω → ℝ",
    "c : ℝ = 2",
    "n",
    "Δu = 0.0",
    "u(0) = 0",
    "u(1) = 0",
    "linear",
    "no",
];

/// Type inference as the store answers it for the Poisson problem.
pub fn infer(theory: &str, term: &str) -> String {
    let inferred = if term == "Ω" {
        "type"
    } else if theory.ends_with("_to_go_to_trash") {
        "Ω → ℝ"
    } else if term == "mylhs" {
        "(Ω → ℝ) → Ω → ℝ"
    } else if term.matches("anyu").count() > 1 {
        if term.contains('(') {
            "(Ω → ℝ) → ℝ"
        } else {
            "(Ω → ℝ) → Ω → ℝ"
        }
    } else {
        "ℝ"
    };
    inferred.to_owned()
}

pub fn scripted_store() -> RecordingStore {
    RecordingStore::new()
        .on_infer(|theory, term| Ok(infer(theory, term)))
        .on_query(|name| {
            if name == "ephdomain" {
                StoreReply::parse(DOMAIN_REPLY)
            } else {
                Ok(StoreReply::empty())
            }
        })
}

pub struct Session {
    pub interview: Interview<RecordingStore>,
    pub export_dir: TempDir,
}

impl Session {
    pub fn new(store: RecordingStore) -> Self {
        let export_dir = tempfile::tempdir().unwrap();
        let interview = Interview::new(
            store,
            InterviewSettings::new("ada"),
            JsonExporter::new(export_dir.path()),
        );
        Self {
            interview,
            export_dir,
        }
    }

    pub fn scripted() -> Self {
        Self::new(scripted_store())
    }

    pub fn start(&mut self) -> Vec<OutputLine> {
        self.interview.start().unwrap();
        self.interview.take_output()
    }

    /// Hand one line to the interview and return everything it said.
    pub fn say(&mut self, line: &str) -> Vec<OutputLine> {
        self.interview.handle_input(line).unwrap();
        self.interview.take_output()
    }

    pub fn say_all(&mut self, lines: &[&str]) {
        for line in lines {
            self.say(line);
        }
    }
}

pub fn stdout_texts(lines: &[OutputLine]) -> Vec<&str> {
    lines
        .iter()
        .filter(|line| line.stream == Stream::Stdout)
        .map(|line| line.text.as_str())
        .collect()
}

pub fn error_texts(lines: &[OutputLine]) -> Vec<&str> {
    lines
        .iter()
        .filter(|line| line.stream == Stream::Stderr)
        .map(|line| line.text.as_str())
        .collect()
}

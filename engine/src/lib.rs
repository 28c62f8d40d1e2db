//! Core engine for MoSIS - the interview state machine and its stages.
//!
//! This crate contains the [`Interview`] state machine without terminal
//! dependencies. Every turn reads one line, talks to a [`TheoryStore`] and
//! leaves the text for the user in a [`Transcript`].
//!
//! [`TheoryStore`]: mosis_store::TheoryStore

mod commands;
mod confirm;
mod context;
mod error;
mod export;
mod machine;
pub mod mpd;
pub mod scope;
mod settings;
mod stages;
pub mod theories;
mod transcript;

#[cfg(test)]
mod test_support;

pub use commands::{CommandSpec, command_specs};
pub use confirm::{Answer, ConfirmationRequest, Continuation};
pub use context::StageCtx;
pub use error::TurnError;
pub use export::{ExportReceipt, ExportSnapshot, ExportTarget, JsonExporter};
pub use machine::Interview;
pub use settings::InterviewSettings;
pub use stages::{Direction, StageOutcome};
pub use transcript::{OutputLine, Stream, Transcript};

// Re-export the domain types front ends need alongside the machine.
pub use mosis_types::{ProblemModel, Stage, Trigger};

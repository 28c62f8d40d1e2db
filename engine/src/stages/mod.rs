//! One handler per interview stage.
//!
//! Every handler gets the whole problem model plus a [`StageCtx`] and reports
//! what the machine should do next through a [`StageOutcome`]. Handlers never
//! fire transitions themselves.

mod boundary;
mod dimensions;
mod domain;
mod parameters;
mod pdes;
mod properties;
pub(crate) mod solve;
mod unknowns;

use mosis_types::{ProblemModel, Stage};

use crate::confirm::ConfirmationRequest;
use crate::transcript::Transcript;
use crate::{StageCtx, TurnError};

/// How a stage was entered or left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    /// Left and entered again through a self-transition.
    Reentry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// Wait for more input in this stage.
    Stay,
    /// The exit criterion holds; fire the forward trigger.
    Advance,
    /// Ask a yes/no question before the next ordinary input.
    Confirm(ConfirmationRequest),
}

pub(crate) trait StageHandler {
    /// Introduce the stage and reset its part of the model.
    fn begin(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        entered: Direction,
    ) -> Result<StageOutcome, TurnError>;

    fn handle_input(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        input: &str,
    ) -> Result<StageOutcome, TurnError>;

    /// Raised errors cancel the transition.
    fn exit(
        &self,
        _model: &mut ProblemModel,
        _ctx: &mut StageCtx<'_>,
        _leaving: Direction,
    ) -> Result<(), TurnError> {
        Ok(())
    }
}

pub(crate) fn handler(stage: Stage) -> &'static dyn StageHandler {
    match stage {
        Stage::Dimensions => &dimensions::Dimensions,
        Stage::Domain => &domain::DomainStage,
        Stage::Unknowns => &unknowns::Unknowns,
        Stage::Parameters => &parameters::Parameters,
        Stage::Pdes => &pdes::Pdes,
        Stage::BoundaryConditions => &boundary::BoundaryConditionsStage,
        Stage::Properties => &properties::Properties,
        Stage::Solve => &solve::Solve,
    }
}

/// Names of every view built so far, in stage order.
fn former_views(model: &ProblemModel) -> Vec<String> {
    model.view_refs().into_iter().map(str::to_owned).collect()
}

/// One summary line per stage up to and including `current`.
pub(crate) fn recap(model: &ProblemModel, current: Stage, out: &mut Transcript) {
    out.say("These are the things we know so far about your problem:");
    for stage in Stage::ALL.into_iter().take_while(|stage| *stage <= current) {
        if let Some(summary) = model.stage_summary(stage) {
            out.say(format!("{stage}: {summary}"));
        }
    }
    out.blank();
}

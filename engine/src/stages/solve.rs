use mosis_types::{ProblemModel, SolveConfig, SolveMethod, Stage};

use super::{Direction, StageHandler, StageOutcome, recap};
use crate::confirm::{ConfirmationRequest, Continuation};
use crate::export::ExportSnapshot;
use crate::mpd::{self, ModelParts};
use crate::{StageCtx, TurnError, scope};

const OFFER: &str = "Would you like to try and solve the PDE using the Finite Difference Method \
                     in ExaStencils? If yes, you can provide a configuration name, or we'll just \
                     use your name.";

pub(super) struct Solve;

impl StageHandler for Solve {
    /// Re-entry after an export keeps the method the export chose.
    fn begin(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        entered: Direction,
    ) -> Result<StageOutcome, TurnError> {
        if entered != Direction::Reentry {
            model.solve_config = SolveConfig::default();
        }
        recap(model, Stage::Solve, ctx.out);
        ctx.out.subheading("Solving");
        let offer = ConfirmationRequest::new(OFFER, Continuation::Export, Continuation::Stay)
            .passing_through();
        Ok(StageOutcome::Confirm(offer))
    }

    /// Any answer that is not yes/no names the configuration.
    fn handle_input(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        input: &str,
    ) -> Result<StageOutcome, TurnError> {
        export(model, ctx, Some(input))
    }
}

/// Hand the finished model to the session's export target.
///
/// A blank or missing `problem_name` falls back to the configured user name.
pub(crate) fn export(
    model: &mut ProblemModel,
    ctx: &mut StageCtx<'_>,
    problem_name: Option<&str>,
) -> Result<StageOutcome, TurnError> {
    model.solve_config.method = Some(SolveMethod::FiniteDifferences);

    if ctx.settings.publish_model_theories {
        let ProblemModel {
            unknowns,
            parameters,
            pdes,
            boundary_conditions,
            solve_config,
            ..
        } = model;
        let parts = ModelParts {
            unknowns,
            parameters,
            pdes,
            boundary_conditions,
        };
        let published = scope::outermost(solve_config, ctx, |_, ctx| Ok(mpd::publish(parts, ctx)?))?;
        if published.is_none() {
            return Ok(StageOutcome::Stay);
        }
    }

    let user = ctx.settings.user_name.clone();
    let problem_name = problem_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(&user);
    let snapshot = ExportSnapshot::capture(model, problem_name, &user);
    let receipt = ctx.exporter.export(&snapshot).map_err(TurnError::Export)?;
    ctx.out.say(format!("Exported your problem to {}", receipt.location));
    Ok(StageOutcome::Advance)
}

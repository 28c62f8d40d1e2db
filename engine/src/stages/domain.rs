use mosis_rewrite::{BOUND_VARIABLE, first_word};
use mosis_types::{Domain, InterviewError, ProblemModel, Stage};

use super::{Direction, StageHandler, StageOutcome, former_views};
use crate::theories::{DOMAIN_THEORY, DOMAIN_VIEW};
use crate::{StageCtx, TurnError, scope};

const QUESTION: &str =
    "What is the domain in your model?     Ω : type ❘ = [?;?], e.g. `\\\\Omega = [0.0;1.0]`";

pub(super) struct DomainStage;

impl StageHandler for DomainStage {
    fn begin(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        _entered: Direction,
    ) -> Result<StageOutcome, TurnError> {
        ctx.out.say(QUESTION);
        model.domain = Domain {
            store_ref: Some(DOMAIN_THEORY.to_owned()),
            ..Domain::default()
        };
        scope::outermost(&mut model.domain, ctx, |_, ctx| {
            ctx.new_theory(Stage::Domain, DOMAIN_THEORY)?;
            Ok(())
        })?;
        Ok(StageOutcome::Stay)
    }

    fn handle_input(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        input: &str,
    ) -> Result<StageOutcome, TurnError> {
        let name = first_word(input.trim());
        let outcome = scope::outermost(&mut model.domain, ctx, |domain, ctx| {
            if name.is_empty() {
                return Err(InterviewError::new("Please start with the name of the domain.").into());
            }
            ctx.declare(DOMAIN_THEORY, input)?;
            if ctx.infer_type(DOMAIN_THEORY, name)? != "type" {
                return Err(InterviewError::new("This seems to not be a type. It should be!").into());
            }
            let reply = ctx.query(DOMAIN_THEORY)?;
            let (lower, upper) = reply.interval_boundaries(name).ok_or_else(|| {
                InterviewError::new(format!("{name} does not look like an interval [a;b]."))
            })?;

            domain.name = Some(name.to_owned());
            domain.set_interval(BOUND_VARIABLE, format!("[{lower};{upper}]"));
            domain.lower_bound = Some(lower);
            domain.upper_bound = Some(upper);
            ctx.out.say(format!(
                "we will just assume that the variable is called {BOUND_VARIABLE} for now."
            ));
            Ok(StageOutcome::Advance)
        })?;
        Ok(outcome.unwrap_or(StageOutcome::Stay))
    }

    /// Name the boundary and tie the domain into the view ladder.
    ///
    /// On failure the domain is left without a boundary and the error is
    /// raised, so the machine stays in this stage.
    fn exit(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        leaving: Direction,
    ) -> Result<(), TurnError> {
        if leaving == Direction::Backward {
            return Ok(());
        }
        let former = former_views(model);
        scope::nested(&mut model.domain, ctx, |domain, ctx| {
            let name = domain.declared_name()?.to_owned();
            domain.boundary_name = Some(name.clone());

            let view = ctx.new_view(DOMAIN_VIEW, DOMAIN_THEORY, &former)?;
            ctx.declare(&view, &format!("domain = {name}"))?;
            ctx.declare(&view, &format!("boundary = {name}"))?;
            domain.view_ref = Some(view);
            Ok(())
        })
    }
}

use mosis_rewrite::{
    OBJECT_DELIMITER, add_object_delimiter, first_word, functionize, means_no,
    remove_apply_brackets,
};
use mosis_types::{InterviewError, Parameter, ProblemModel, Stage};

use super::{Direction, StageHandler, StageOutcome, former_views};
use crate::confirm::{ConfirmationRequest, Continuation};
use crate::theories::PARAMETER_VIEW;
use crate::{StageCtx, TurnError, scope};

const QUESTION: &str = "Would you like to name additional parameters like constants or functions \
                        (that are independent of your unknowns)?  c : ℝ = ? or f : Ω ⟶ ℝ = ?";
const MORE: &str = "Would you like to declare more parameters?";

pub(super) struct Parameters;

/// Object delimiter, application brackets of a function head, then the
/// binder over the domain.
fn normalize(input: &str, name: &str, domain: &str) -> String {
    let mut normalized = add_object_delimiter(input);
    let applied =
        normalized.starts_with(&format!("{name}(")) || normalized.starts_with(&format!("{name} ("));
    if applied && let Some(without) = remove_apply_brackets(&normalized) {
        normalized = without;
    }
    functionize(&normalized, domain)
}

impl StageHandler for Parameters {
    fn begin(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        _entered: Direction,
    ) -> Result<StageOutcome, TurnError> {
        ctx.out.blank();
        ctx.out.say(QUESTION);
        model.parameters.clear();
        Ok(StageOutcome::Stay)
    }

    fn handle_input(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        input: &str,
    ) -> Result<StageOutcome, TurnError> {
        if means_no(input) {
            return Ok(StageOutcome::Advance);
        }
        let input = input.trim();
        let name = first_word(input);
        let former = former_views(model);
        let ProblemModel {
            domain, parameters, ..
        } = model;

        let outcome = scope::outermost(parameters, ctx, |parameters, ctx| {
            let domain_name = domain.declared_name()?;
            if name.is_empty() {
                return Err(InterviewError::new("Please start with the name of the parameter.").into());
            }
            if parameters.iter().any(|parameter| parameter.name == name) {
                return Err(InterviewError::new(format!("{name} is already a parameter.")).into());
            }
            let earlier: Vec<String> = parameters
                .iter()
                .map(|parameter| parameter.store_ref.clone())
                .collect();

            parameters.push(Parameter {
                name: name.to_owned(),
                ..Parameter::default()
            });
            let at = parameters.len() - 1;
            scope::nested(&mut parameters[at], ctx, |parameter, ctx| {
                ctx.new_theory(Stage::Parameters, name)?;
                for other in earlier.iter().filter(|other| input.contains(other.as_str())) {
                    ctx.include_in(name, other)?;
                }

                let normalized = normalize(input, name, domain_name);
                ctx.declare(name, &format!("{normalized}{OBJECT_DELIMITER} role Quantity"))?;
                let inferred = ctx.infer_type(name, name)?;

                let view = ctx.new_view(PARAMETER_VIEW, name, &former)?;
                ctx.declare(&view, &format!("ptype = {inferred}"))?;
                ctx.declare(&view, &format!("param = {name}"))?;

                ctx.out.say(format!("Ok, {normalized}"));
                ctx.out.blank();
                *parameter = Parameter {
                    name: name.to_owned(),
                    store_ref: name.to_owned(),
                    view_ref: Some(view),
                    raw_string: input.to_owned(),
                    normalized_string: normalized,
                    inferred_type: inferred,
                };
                Ok(())
            })?;

            let more = ConfirmationRequest::new(MORE, Continuation::Stay, Continuation::Advance)
                .passing_through();
            Ok(StageOutcome::Confirm(more))
        })?;
        Ok(outcome.unwrap_or(StageOutcome::Stay))
    }

    fn exit(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        leaving: Direction,
    ) -> Result<(), TurnError> {
        if leaving == Direction::Forward {
            for parameter in &model.parameters {
                ctx.out.say(parameter.raw_string.clone());
            }
            ctx.out.blank();
        }
        Ok(())
    }
}

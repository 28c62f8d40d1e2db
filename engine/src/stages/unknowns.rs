use mosis_rewrite::{codomain_after, first_word, type_is_function_from};
use mosis_types::{InterviewError, ProblemModel, Stage, Unknown};

use super::{Direction, StageHandler, StageOutcome, former_views};
use crate::theories::UNKNOWN_VIEW;
use crate::{StageCtx, TurnError, scope};

pub(super) struct Unknowns;

/// Scratch theory used only to read back the unknown's inferred type.
fn trash_theory(name: &str) -> String {
    format!("{name}_to_go_to_trash")
}

impl StageHandler for Unknowns {
    fn begin(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        _entered: Direction,
    ) -> Result<StageOutcome, TurnError> {
        let domain = model.domain.name.as_deref().unwrap_or("Ω");
        ctx.out.say(format!(
            "Which variable(s) are you looking for? / What are the unknowns in your model?  \
             u : {domain} ⟶ ??,  e.g., u : {domain} ⟶ ℝ ?"
        ));
        model.unknowns.clear();
        Ok(StageOutcome::Stay)
    }

    fn handle_input(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        input: &str,
    ) -> Result<StageOutcome, TurnError> {
        let input = input.trim();
        let name = first_word(input);
        let former = former_views(model);
        let ProblemModel {
            domain, unknowns, ..
        } = model;

        let outcome = scope::outermost(unknowns, ctx, |unknowns, ctx| {
            let domain_name = domain.declared_name()?;
            if name.is_empty() {
                return Err(InterviewError::new("Please start with the name of the unknown.").into());
            }
            if unknowns.iter().any(|unknown| unknown.name == name) {
                return Err(InterviewError::new(format!("{name} is already an unknown.")).into());
            }

            ctx.new_theory(Stage::Unknowns, name)?;
            let trash = trash_theory(name);
            ctx.new_theory(Stage::Unknowns, &trash)?;
            ctx.declare(&trash, input)?;
            let inferred = ctx.infer_type(&trash, name)?;

            unknowns.push(Unknown {
                name: name.to_owned(),
                store_ref: name.to_owned(),
                view_ref: None,
                declaration_string: input.to_owned(),
                codomain: codomain_after(&inferred, domain_name),
                inferred_type: inferred,
            });
            let at = unknowns.len() - 1;
            scope::nested(&mut unknowns[at], ctx, |unknown, ctx| {
                if ctx.query(&trash)?.has_definition(name) {
                    return Err(InterviewError::new("Unknowns cannot be defined!").into());
                }
                if !type_is_function_from(&unknown.inferred_type, domain_name) {
                    return Err(InterviewError::new(format!(
                        "Unknown should be a function on {domain_name}!"
                    ))
                    .into());
                }

                ctx.declare(name, &format!("myUnkType = {}", unknown.inferred_type))?;
                let view = ctx.new_view(UNKNOWN_VIEW, name, &former)?;
                ctx.declare(&view, &format!("ucodomain = {}", unknown.codomain))?;
                ctx.declare(&view, "unknowntype = myUnkType")?;
                unknown.view_ref = Some(view);
                ctx.out.say(format!("Ok, {input}"));
                Ok(())
            })?;
            Ok(StageOutcome::Advance)
        })?;
        Ok(outcome.unwrap_or(StageOutcome::Stay))
    }
}

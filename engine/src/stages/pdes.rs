use mosis_rewrite::{
    BOUND_VARIABLE, EquationKind, bind_variable, binder, genericize, last_type, split_equation,
    try_expand, type_is_function_from,
};
use mosis_types::{InterviewError, Parameter, Pde, ProblemModel, Stage, Unknown};

use super::{Direction, StageHandler, StageOutcome, former_views};
use crate::theories::PDE_VIEW;
use crate::{StageCtx, TurnError, scope};

const QUESTION: &str = "Let's talk about your partial differential equation(s). \
                        What do they look like? Δu = 0.0, or laplace_operator Ω ℝ u = f ?";
const TOO_MANY: &str = "now that's too many PDEs. Please go back and add more unknowns.";

pub(super) struct Pdes;

fn pde_theory(number: usize) -> String {
    format!("ephemeral_pde{number}")
}

impl StageHandler for Pdes {
    fn begin(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        _entered: Direction,
    ) -> Result<StageOutcome, TurnError> {
        ctx.out.say(QUESTION);
        model.pdes.clear();
        Ok(StageOutcome::Stay)
    }

    fn handle_input(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        input: &str,
    ) -> Result<StageOutcome, TurnError> {
        let former = former_views(model);
        let ProblemModel {
            domain,
            unknowns,
            parameters,
            pdes,
            ..
        } = model;
        let unknowns: &[Unknown] = unknowns;
        let parameters: &[Parameter] = parameters;

        let outcome = scope::outermost(pdes, ctx, |pdes, ctx| {
            if pdes.len() >= unknowns.len() {
                return Err(InterviewError::new(TOO_MANY).into());
            }
            let domain_name = domain.declared_name()?;

            pdes.push(Pde::default());
            let at = pdes.len() - 1;
            let theory = pde_theory(pdes.len());
            scope::nested(&mut pdes[at], ctx, |pde, ctx| {
                ctx.new_theory(Stage::Pdes, &theory)?;
                for unknown in unknowns {
                    ctx.include_in(&theory, &unknown.store_ref)?;
                }
                for parameter in parameters {
                    ctx.include_in(&theory, &parameter.store_ref)?;
                }

                let sides = split_equation(input, EquationKind::Pde)?;
                let lhs = sides.lhs.trim();
                let rhs = sides.rhs.trim();
                let rhs_expanded = try_expand(rhs, parameters)?;

                let mut lhs_normalized = bind_variable(sides.lhs, BOUND_VARIABLE, domain_name);
                let mut rhs_normalized = sides.rhs.to_owned();
                let rhs_type = ctx.infer_type(&theory, sides.rhs)?;
                if !type_is_function_from(&rhs_type, domain_name) {
                    rhs_normalized = format!("{}{rhs_normalized}", binder(BOUND_VARIABLE, domain_name));
                }
                for unknown in unknowns {
                    lhs_normalized = genericize(&lhs_normalized, &unknown.name, &unknown.inferred_type);
                }

                ctx.declare(&theory, &format!(" mylhs = {lhs_normalized}"))?;
                ctx.declare(&theory, &format!(" myrhs = {rhs_normalized}"))?;

                let view = ctx.new_view(PDE_VIEW, &theory, &former)?;
                let equation_type = ctx.infer_type(&theory, "mylhs")?;
                ctx.declare_all(
                    &view,
                    &[
                        format!("eqtype = {}", last_type(&equation_type)),
                        "lhs = mylhs".to_owned(),
                        "rhs = myrhs".to_owned(),
                        "pde = [u](mylhs u) ≐ myrhs".to_owned(),
                    ],
                )?;
                let reply = ctx.query(&theory)?;

                let operator = unknowns
                    .iter()
                    .fold(lhs.to_owned(), |operator, unknown| operator.replace(&unknown.name, ""));
                *pde = Pde {
                    store_ref: theory.clone(),
                    view_ref: Some(view),
                    raw_string: input.to_owned(),
                    lhs: lhs.to_owned(),
                    rhs: rhs.to_owned(),
                    rhs_expanded,
                    differential_operator: operator.trim().to_owned(),
                    lhs_normalized,
                    rhs_normalized,
                };
                ctx.out.say(format!(
                    "Ok, this is what this looks like in omdoc: {}",
                    reply.raw()
                ));
                Ok(())
            })?;

            if pdes.len() == unknowns.len() {
                Ok(StageOutcome::Advance)
            } else {
                ctx.out.say("More PDEs, please!");
                Ok(StageOutcome::Stay)
            }
        })?;
        Ok(outcome.unwrap_or(StageOutcome::Stay))
    }

    fn exit(
        &self,
        _model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        leaving: Direction,
    ) -> Result<(), TurnError> {
        if leaving == Direction::Forward {
            ctx.out.say("These are all the PDEs needed.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Fixture, model_with_pde, model_with_unknown};
    use mosis_store::RecordingStore;

    fn pde_store() -> RecordingStore {
        RecordingStore::new().on_infer(|_, term| {
            let inferred = if term == "mylhs" { "(Ω → ℝ) → Ω → ℝ" } else { "ℝ" };
            Ok(inferred.to_owned())
        })
    }

    #[test]
    fn one_pde_per_unknown_advances() {
        let mut fixture = Fixture::with_store(pde_store());
        let mut model = model_with_unknown();

        let outcome = Pdes
            .handle_input(&mut model, &mut fixture.ctx(), "Δu = 0.0")
            .unwrap();

        assert_eq!(outcome, StageOutcome::Advance);
        let pde = &model.pdes[0];
        assert_eq!(pde.store_ref, "ephemeral_pde1");
        assert_eq!(pde.lhs, "Δu");
        assert_eq!(pde.rhs, "0.0");
        assert_eq!(pde.differential_operator, "Δ");
        assert_eq!(pde.lhs_normalized, " [ anyu : Ω → ℝ ] Δ anyu ");
        assert_eq!(pde.rhs_normalized, " [ x : Ω ]  0.0");
        assert_eq!(
            fixture.store.declarations_in("ephemeral_pde1ASmPDE")[2..],
            [
                "eqtype = ℝ❙",
                "lhs = mylhs❙",
                "rhs = myrhs❙",
                "pde = [u](mylhs u) ≐ myrhs❙",
            ]
        );
    }

    #[test]
    fn fewer_pdes_than_unknowns_asks_for_more() {
        let mut fixture = Fixture::with_store(pde_store());
        let mut model = model_with_unknown();
        model.unknowns.push(Unknown {
            name: "v".into(),
            store_ref: "v".into(),
            inferred_type: "Ω → ℝ".into(),
            ..Unknown::default()
        });

        let outcome = Pdes
            .handle_input(&mut model, &mut fixture.ctx(), "Δu = 0.0")
            .unwrap();

        assert_eq!(outcome, StageOutcome::Stay);
        assert_eq!(model.pdes.len(), 1);
        assert_eq!(fixture.said().last(), Some(&"More PDEs, please!"));
    }

    #[test]
    fn overshoot_is_rejected_without_touching_the_list() {
        let mut fixture = Fixture::with_store(pde_store());
        let mut model = model_with_pde();
        let before = model.pdes.clone();

        let outcome = Pdes
            .handle_input(&mut model, &mut fixture.ctx(), "Δu = 1.0")
            .unwrap();

        assert_eq!(outcome, StageOutcome::Stay);
        assert_eq!(model.pdes, before);
        assert_eq!(fixture.transcript.lines().len(), 1);
        assert!(fixture.said()[0].contains(TOO_MANY));
    }

    #[test]
    fn malformed_equation_rolls_back() {
        let mut fixture = Fixture::with_store(pde_store());
        let mut model = model_with_unknown();

        let outcome = Pdes
            .handle_input(&mut model, &mut fixture.ctx(), "Δu = 0 = 1")
            .unwrap();

        assert_eq!(outcome, StageOutcome::Stay);
        assert!(model.pdes.is_empty());
        assert!(fixture.said()[0].contains("This does not look like an equation."));
    }
}

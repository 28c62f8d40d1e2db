use mosis_rewrite::{add_object_delimiter, means_no};
use mosis_types::{
    AssertedProperty, InterviewError, OperatorProperties, Parameter, Pde, ProblemModel,
    PropertyKind, QualitativeProperties, Stage, Unknown,
};

use super::{Direction, StageHandler, StageOutcome, former_views};
use crate::theories::{BCS_THEORY, DIFFERENTIAL_OPERATORS, LINEARITY, PROBLEM_THEORY, PROPERTIES_VIEW};
use crate::{StageCtx, TurnError, scope};

pub(super) struct Properties;

/// `user_linear : ⊦ <statement> mylhs ❘= sketch "user knowledge"`.
fn user_claim(kind: PropertyKind, statement: &str) -> String {
    add_object_delimiter(&format!(
        "user_{} : ⊦ {statement} mylhs = sketch \"user knowledge\" ",
        kind.keyword()
    ))
}

/// Create the problem theory and its view, then ask about every operator.
fn set_up(
    properties: &mut QualitativeProperties,
    ctx: &mut StageCtx<'_>,
    unknowns: &[Unknown],
    parameters: &[Parameter],
    pdes: &[Pde],
    bcs_theory: &str,
    former: &[String],
) -> Result<(), TurnError> {
    ctx.new_theory(Stage::Properties, PROBLEM_THEORY)?;
    let includes = unknowns
        .iter()
        .map(|unknown| unknown.store_ref.as_str())
        .chain(parameters.iter().map(|parameter| parameter.store_ref.as_str()))
        .chain(pdes.iter().map(|pde| pde.store_ref.as_str()))
        .chain([bcs_theory]);
    for theory in includes {
        ctx.include_in(PROBLEM_THEORY, theory)?;
    }
    let view = ctx.new_view(PROPERTIES_VIEW, PROBLEM_THEORY, former)?;
    ctx.include_trivial_assignment(&view, DIFFERENTIAL_OPERATORS)?;
    ctx.include_trivial_assignment(&view, LINEARITY)?;
    properties.view_ref = Some(view);

    for pde in pdes {
        ctx.out.say(format!(
            "Do you know something about the operator {}? Is it e.g. linear, or not elliptic ? ",
            pde.differential_operator
        ));
        properties.operators.push(OperatorProperties {
            operator: pde.differential_operator.clone(),
            properties: Vec::new(),
        });
    }
    Ok(())
}

impl StageHandler for Properties {
    fn begin(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        _entered: Direction,
    ) -> Result<StageOutcome, TurnError> {
        let former = former_views(model);
        let ProblemModel {
            unknowns,
            parameters,
            pdes,
            boundary_conditions,
            qualitative_properties,
            ..
        } = model;
        let (unknowns, parameters, pdes): (&[Unknown], &[Parameter], &[Pde]) =
            (unknowns, parameters, pdes);
        let bcs_theory = boundary_conditions.store_ref.as_deref().unwrap_or(BCS_THEORY);
        *qualitative_properties = QualitativeProperties {
            store_ref: Some(PROBLEM_THEORY.to_owned()),
            ..QualitativeProperties::default()
        };

        scope::outermost(qualitative_properties, ctx, |properties, ctx| {
            set_up(properties, ctx, unknowns, parameters, pdes, bcs_theory, &former)
        })?;
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
        let statement = input.trim().replace("not", "¬");
        let negated = statement.contains('¬');

        let pending_setup = model
            .qualitative_properties
            .view_ref
            .is_none()
            .then(|| former_views(model));
        let ProblemModel {
            unknowns,
            parameters,
            pdes,
            boundary_conditions,
            qualitative_properties,
            ..
        } = model;
        let (unknowns, parameters, pdes): (&[Unknown], &[Parameter], &[Pde]) =
            (unknowns, parameters, pdes);
        if let Some(former) = pending_setup {
            let bcs_theory = boundary_conditions.store_ref.as_deref().unwrap_or(BCS_THEORY);
            let ready = scope::outermost(qualitative_properties, ctx, |properties, ctx| {
                set_up(properties, ctx, unknowns, parameters, pdes, bcs_theory, &former)
            })?;
            if ready.is_none() {
                return Ok(StageOutcome::Stay);
            }
        }

        scope::outermost(qualitative_properties, ctx, |properties, ctx| {
            let view = properties
                .view_ref
                .clone()
                .ok_or_else(|| InterviewError::new("The problem theory is not set up yet."))?;
            let Some(operator) = properties.operators.last_mut() else {
                return Err(InterviewError::new("There is no operator to talk about.").into());
            };

            for kind in PropertyKind::ALL {
                if !statement.contains(kind.keyword()) {
                    continue;
                }
                ctx.declare(PROBLEM_THEORY, &user_claim(kind, &statement))?;
                if !negated {
                    ctx.declare(&view, &format!("{} = user_{}", kind.view_constant(), kind.keyword()))?;
                }
                operator.properties.push(AssertedProperty {
                    kind,
                    negated,
                    statement: statement.clone(),
                });
                ctx.out.say("OK!");
            }
            ctx.out.say("do you know anything else?");
            Ok(())
        })?;
        Ok(StageOutcome::Stay)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::test_support::{Fixture, model_with_pde};
    use mosis_store::{RecordingStore, StoreReply};
    use mosis_types::StoreError;

    fn begun(fixture: &mut Fixture) -> ProblemModel {
        let mut model = model_with_pde();
        model.boundary_conditions.store_ref = Some(BCS_THEORY.into());
        Properties
            .begin(&mut model, &mut fixture.ctx(), Direction::Forward)
            .unwrap();
        model
    }

    #[test]
    fn begin_asks_about_every_operator() {
        let mut fixture = Fixture::new();
        let model = begun(&mut fixture);

        let properties = &model.qualitative_properties;
        assert_eq!(properties.operators.len(), 1);
        assert_eq!(properties.operators[0].operator, "Δ");
        assert_eq!(
            properties.view_ref.as_deref(),
            Some("ephBoundaryValueProblemASmEllipticLinearDirichletBoundaryValueProblem")
        );
        let includes = fixture.store.declarations_in(PROBLEM_THEORY);
        assert!(includes.contains(&"include ?ephbcs❙".to_owned()));
        assert!(includes.contains(&"include ?ephemeral_pde1❙".to_owned()));
    }

    #[test]
    fn linear_claims_are_assigned_in_the_view() {
        let mut fixture = Fixture::new();
        let mut model = begun(&mut fixture);
        fixture.store.clear();

        let outcome = Properties
            .handle_input(&mut model, &mut fixture.ctx(), "linear")
            .unwrap();

        assert_eq!(outcome, StageOutcome::Stay);
        let recorded = &model.qualitative_properties.operators[0].properties;
        assert_eq!(recorded[0].kind, PropertyKind::Linear);
        assert!(!recorded[0].negated);
        assert_eq!(
            fixture.store.declarations_in(PROBLEM_THEORY),
            vec!["user_linear : ⊦ linear mylhs ❘= sketch \"user knowledge\" ❙"]
        );
        let view = model.qualitative_properties.view_ref.clone().unwrap();
        assert_eq!(fixture.store.declarations_in(&view), vec!["isLinear = user_linear❙"]);
    }

    #[test]
    fn negated_claims_are_recorded_but_not_assigned() {
        let mut fixture = Fixture::new();
        let mut model = begun(&mut fixture);
        fixture.store.clear();

        Properties
            .handle_input(&mut model, &mut fixture.ctx(), "not elliptic")
            .unwrap();

        let recorded = &model.qualitative_properties.operators[0].properties;
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].kind, PropertyKind::Elliptic);
        assert!(recorded[0].negated);
        assert_eq!(recorded[0].statement, "¬ elliptic");
        let view = model.qualitative_properties.view_ref.clone().unwrap();
        assert!(fixture.store.declarations_in(&view).is_empty());
    }

    #[test]
    fn failed_setup_is_retried_by_the_next_claim() {
        let failed_once = Rc::new(Cell::new(false));
        let flag = Rc::clone(&failed_once);
        let store = RecordingStore::new().on_declaration(move |theory, declaration| {
            if theory == PROBLEM_THEORY && declaration.starts_with("include ?ephbcs") && !flag.replace(true) {
                Err(StoreError::new("unknown theory"))
            } else {
                Ok(StoreReply::empty())
            }
        });
        let mut fixture = Fixture::with_store(store);
        let mut model = begun(&mut fixture);
        assert!(failed_once.get());
        assert_eq!(model.qualitative_properties.view_ref, None);
        assert!(model.qualitative_properties.operators.is_empty());

        Properties
            .handle_input(&mut model, &mut fixture.ctx(), "linear")
            .unwrap();

        let properties = &model.qualitative_properties;
        assert!(properties.view_ref.is_some());
        assert_eq!(properties.operators.len(), 1);
        assert_eq!(properties.operators[0].properties[0].kind, PropertyKind::Linear);
        assert!(fixture.said().contains(&"OK!"));
    }

    #[test]
    fn no_moves_on() {
        let mut fixture = Fixture::new();
        let mut model = begun(&mut fixture);
        let outcome = Properties
            .handle_input(&mut model, &mut fixture.ctx(), "n")
            .unwrap();
        assert_eq!(outcome, StageOutcome::Advance);
    }
}

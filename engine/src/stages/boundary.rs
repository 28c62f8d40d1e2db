use mosis_rewrite::{
    BOUND_VARIABLE, DECLARATION_DELIMITER, EquationKind, MODULE_DELIMITER, bind_variable, binder,
    evaluation_point, genericize, split_equation, try_expand, type_is_function_from,
    type_is_function_to,
};
use mosis_types::{
    BoundaryCondition, BoundaryConditions, BoundaryKind, Domain, InterviewError, Parameter, Pde,
    ProblemModel, Stage, Unknown,
};

use super::{Direction, StageHandler, StageOutcome, former_views};
use crate::theories::{BC_TYPES, BCS_THEORY, BCS_VIEW, DIFFERENTIAL_OPERATORS, UNKNOWN_VIEW};
use crate::{StageCtx, TurnError, scope};

const TOO_MANY: &str = "now that's too many boundary conditions. ignoring last input.";
const NOT_A_CONDITION: &str = "This does not look like a boundary condition.";
/// View constants a point condition may be assigned to, in order.
const POINT_SLOTS: [&str; 2] = ["firstBC", "secondBC"];

pub(super) struct BoundaryConditionsStage;

/// `structure u_boundary_types : ?mBCTypes = …`, the boundary condition
/// types specialised to one unknown.
fn boundary_types(unknown: &Unknown) -> Result<String, InterviewError> {
    let view = unknown
        .view_ref
        .as_deref()
        .ok_or_else(|| InterviewError::new(format!("{} has not been set up yet.", unknown.name)))?;
    Ok(format!(
        "structure {name}_boundary_types : ?{BC_TYPES} =\
         include ?{UNKNOWN_VIEW} = ?{view}{DECLARATION_DELIMITER}\
         include ?{DIFFERENTIAL_OPERATORS} = ?{DIFFERENTIAL_OPERATORS}{DECLARATION_DELIMITER}\
         {MODULE_DELIMITER}",
        name = unknown.name,
    ))
}

/// Create the boundary condition theory and its view.
fn set_up(
    bcs: &mut BoundaryConditions,
    ctx: &mut StageCtx<'_>,
    unknowns: &[Unknown],
    parameters: &[Parameter],
    pdes: &[Pde],
    former: &[String],
) -> Result<(), TurnError> {
    ctx.new_theory(Stage::BoundaryConditions, BCS_THEORY)?;
    for unknown in unknowns {
        ctx.include_in(BCS_THEORY, &unknown.store_ref)?;
    }
    for unknown in unknowns {
        ctx.declare(BCS_THEORY, &boundary_types(unknown)?)?;
    }
    for parameter in parameters {
        ctx.include_in(BCS_THEORY, &parameter.store_ref)?;
    }
    for pde in pdes {
        ctx.include_in(BCS_THEORY, &pde.store_ref)?;
    }
    bcs.view_ref = Some(ctx.new_view(BCS_VIEW, BCS_THEORY, former)?);
    bcs.measure_given = 0;
    Ok(())
}

impl StageHandler for BoundaryConditionsStage {
    fn begin(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        _entered: Direction,
    ) -> Result<StageOutcome, TurnError> {
        let upper = model.domain.upper_bound.as_deref().unwrap_or("1");
        ctx.out.say(format!(
            "Let's discuss your boundary conditions. What do they look like? \
             u(x) = f(x) or u({upper}) = \\alpha ?"
        ));

        let former = former_views(model);
        let ProblemModel {
            unknowns,
            parameters,
            pdes,
            boundary_conditions,
            ..
        } = model;
        let (unknowns, parameters, pdes): (&[Unknown], &[Parameter], &[Pde]) =
            (unknowns, parameters, pdes);
        *boundary_conditions = BoundaryConditions {
            store_ref: Some(BCS_THEORY.to_owned()),
            ..BoundaryConditions::default()
        };

        scope::outermost(boundary_conditions, ctx, |bcs, ctx| {
            set_up(bcs, ctx, unknowns, parameters, pdes, &former)
        })?;
        Ok(StageOutcome::Stay)
    }

    fn handle_input(
        &self,
        model: &mut ProblemModel,
        ctx: &mut StageCtx<'_>,
        input: &str,
    ) -> Result<StageOutcome, TurnError> {
        let required = model.required_boundary_measure();
        let pending_setup = model
            .boundary_conditions
            .view_ref
            .is_none()
            .then(|| former_views(model));
        let ProblemModel {
            domain,
            unknowns,
            parameters,
            pdes,
            boundary_conditions,
            ..
        } = model;
        let domain: &Domain = domain;
        let (unknowns, parameters, pdes): (&[Unknown], &[Parameter], &[Pde]) =
            (unknowns, parameters, pdes);

        if let Some(former) = pending_setup {
            let ready = scope::outermost(boundary_conditions, ctx, |bcs, ctx| {
                set_up(bcs, ctx, unknowns, parameters, pdes, &former)
            })?;
            if ready.is_none() {
                return Ok(StageOutcome::Stay);
            }
        }

        let outcome = scope::outermost(boundary_conditions, ctx, |bcs, ctx| {
            let domain_name = domain.declared_name()?;
            let boundary = domain.boundary()?;
            let first_pde = pdes
                .first()
                .map(|pde| pde.store_ref.as_str())
                .ok_or_else(|| InterviewError::new("Please enter a PDE first."))?;
            let view = bcs
                .view_ref
                .clone()
                .ok_or_else(|| InterviewError::new("The boundary conditions are not set up yet."))?;

            let sides = split_equation(input, EquationKind::BoundaryCondition)?;
            let mut condition = BoundaryCondition {
                name: format!("bc{}", bcs.conditions.len()),
                raw_string: input.to_owned(),
                lhs: sides.lhs.trim().to_owned(),
                rhs: sides.rhs.trim().to_owned(),
                rhs_expanded: try_expand(sides.rhs.trim(), parameters)?,
                ..BoundaryCondition::default()
            };

            let mut lhs = bind_variable(sides.lhs, BOUND_VARIABLE, boundary);
            let mut rhs = bind_variable(sides.rhs, BOUND_VARIABLE, boundary);
            let mut classified = false;
            for unknown in unknowns {
                lhs = genericize(&lhs, &unknown.name, &unknown.inferred_type);
                let lhs_type = ctx.infer_type(first_pde, &lhs)?;

                if type_is_function_to(&lhs_type, &unknown.inferred_type) {
                    let rhs_type = ctx.infer_type(first_pde, &rhs)?;
                    if !type_is_function_from(&rhs_type, domain_name)
                        && !type_is_function_from(&rhs_type, boundary)
                    {
                        rhs = format!("{}{rhs}", binder(BOUND_VARIABLE, boundary));
                    }
                    for slot in POINT_SLOTS {
                        let declaration =
                            format!("{slot} = {}_boundary_types/DirichletBCfun {rhs}", unknown.name);
                        if let Err(err) = ctx.declare(&view, &declaration) {
                            tracing::debug!(slot, "boundary function not accepted: {err}");
                        }
                    }
                    condition.location = Some(BOUND_VARIABLE.to_owned());
                    condition.measure_weight = 2;
                } else if type_is_function_to(&lhs_type, &unknown.codomain) {
                    let point = evaluation_point(&condition.lhs)
                        .ok_or_else(|| InterviewError::new(NOT_A_CONDITION))?;
                    if !domain.is_bound(point) {
                        return Err(InterviewError::new(format!("{point} is not on the boundary!")).into());
                    }
                    let slot = POINT_SLOTS
                        .get(bcs.conditions.len())
                        .ok_or_else(|| InterviewError::new("too many boundary conditions saved"))?;
                    ctx.declare(&view, &format!("{slot} = solutionat {point} is {rhs}"))?;
                    condition.location = Some(point.to_owned());
                    condition.measure_weight = 1;
                } else {
                    continue;
                }
                condition.kind = Some(BoundaryKind::Dirichlet);
                classified = true;
                break;
            }
            if !classified {
                return Err(InterviewError::new(NOT_A_CONDITION).into());
            }

            bcs.measure_given += condition.measure_weight;
            bcs.conditions.push(condition);
            if bcs.measure_given > required {
                return Err(InterviewError::new(TOO_MANY).into());
            }
            ctx.out.say("Ok ");
            if bcs.measure_given == required {
                Ok(StageOutcome::Advance)
            } else {
                ctx.out.say("Please enter more boundary conditions");
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
            ctx.out.say("These are all the boundary conditions needed.");
            ctx.out.blank();
        }
        Ok(())
    }
}

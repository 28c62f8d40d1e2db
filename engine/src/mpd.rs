//! Model theories (`MPD_*`): the elicited problem restated as quantities and
//! laws, published before export when the session asks for it.

use mosis_rewrite::OBJECT_DELIMITER;
use mosis_types::{BoundaryConditions, Parameter, Pde, StoreError, Unknown};

use crate::StageCtx;
use crate::theories::BCS_THEORY;

pub const MODEL_THEORY: &str = "MPD_Model";
const BCS_MODEL_THEORY: &str = "MPD_bcs";

fn quantity_theory(name: &str) -> String {
    format!("MPD_{name}")
}

fn pde_theory(index: usize) -> String {
    format!("MPD_pde{index}")
}

/// Read-only view of the parts of the model the laws are built from.
#[derive(Clone, Copy)]
pub struct ModelParts<'a> {
    pub unknowns: &'a [Unknown],
    pub parameters: &'a [Parameter],
    pub pdes: &'a [Pde],
    pub boundary_conditions: &'a BoundaryConditions,
}

impl ModelParts<'_> {
    fn parameters_in<'s>(&'s self, text: &'s str) -> impl Iterator<Item = &'s Parameter> + 's {
        self.parameters
            .iter()
            .filter(move |parameter| text.contains(parameter.store_ref.as_str()))
    }
}

/// Publish every `MPD_*` theory and return the name of the model theory.
pub fn publish(parts: ModelParts<'_>, ctx: &StageCtx<'_>) -> Result<&'static str, StoreError> {
    for unknown in parts.unknowns {
        let theory = quantity_theory(&unknown.name);
        ctx.store.create_theory(&theory)?;
        ctx.include_in(&theory, &unknown.store_ref)?;
        ctx.declare(
            &theory,
            &format!("{} : {}{OBJECT_DELIMITER} role Quantity", unknown.name, unknown.inferred_type),
        )?;
    }

    for parameter in parts.parameters {
        let theory = quantity_theory(&parameter.name);
        ctx.store.create_theory(&theory)?;
        ctx.include_in(&theory, &parameter.store_ref)?;
        if ctx.query(&parameter.store_ref)?.has_definition(&parameter.name) {
            ctx.declare(
                &theory,
                &format!(
                    "proof_{} : ⊦ {}{OBJECT_DELIMITER} role Law",
                    parameter.name,
                    parameter.normalized_string.replace('=', "≐")
                ),
            )?;
        }
    }

    for (index, pde) in parts.pdes.iter().enumerate() {
        let theory = pde_theory(index);
        ctx.store.create_theory(&theory)?;
        ctx.include_in(&theory, &pde.store_ref)?;
        for parameter in parts.parameters_in(&pde.raw_string) {
            ctx.include_in(&theory, &parameter.store_ref)?;
        }
        for unknown in parts.unknowns {
            ctx.include_in(&theory, &quantity_theory(&unknown.name))?;
            ctx.declare(
                &theory,
                &format!(
                    "proof_{index} : ⊦ {} ≐ {}{OBJECT_DELIMITER} role Law",
                    pde.lhs.replace(&unknown.name, &format!(" {}", unknown.name)),
                    pde.rhs_normalized
                ),
            )?;
        }
    }

    ctx.store.create_theory(BCS_MODEL_THEORY)?;
    for unknown in parts.unknowns {
        ctx.include_in(BCS_MODEL_THEORY, &quantity_theory(&unknown.name))?;
    }
    let bcs_theory = parts
        .boundary_conditions
        .store_ref
        .as_deref()
        .unwrap_or(BCS_THEORY);
    ctx.include_in(BCS_MODEL_THEORY, bcs_theory)?;
    for condition in &parts.boundary_conditions.conditions {
        for parameter in parts.parameters_in(&condition.raw_string) {
            ctx.include_in(BCS_MODEL_THEORY, &parameter.store_ref)?;
        }
        ctx.declare(
            BCS_MODEL_THEORY,
            &format!(
                "proof_{} : ⊦ {} ≐ {}{OBJECT_DELIMITER} role BoundaryCondition",
                condition.name, condition.lhs, condition.rhs
            ),
        )?;
    }

    ctx.store.create_theory(MODEL_THEORY)?;
    for parameter in parts.parameters {
        ctx.include_in(MODEL_THEORY, &quantity_theory(&parameter.name))?;
    }
    for index in 0..parts.pdes.len() {
        ctx.include_in(MODEL_THEORY, &pde_theory(index))?;
    }
    ctx.include_in(MODEL_THEORY, BCS_MODEL_THEORY)?;
    tracing::info!(theory = MODEL_THEORY, "published model theories");
    Ok(MODEL_THEORY)
}

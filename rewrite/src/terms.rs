//! Equation-level rewrites: splitting, binders and genericizing.

use mosis_types::InterviewError;

/// Name of the domain's bound variable in the 1-D baseline.
pub const BOUND_VARIABLE: &str = "x";

/// What an utterance was supposed to be, for the rejection message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquationKind {
    Pde,
    BoundaryCondition,
}

impl EquationKind {
    const fn rejection(self) -> &'static str {
        match self {
            EquationKind::Pde => "This does not look like an equation.",
            EquationKind::BoundaryCondition => "This does not look like a boundary condition.",
        }
    }
}

/// Both sides of an `lhs = rhs` utterance, untrimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sides<'a> {
    pub lhs: &'a str,
    pub rhs: &'a str,
}

/// Split on `=`. Exactly one `=` is required.
pub fn split_equation(utterance: &str, kind: EquationKind) -> Result<Sides<'_>, InterviewError> {
    let mut parts = utterance.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(lhs), Some(rhs), None) => Ok(Sides { lhs, rhs }),
        _ => Err(InterviewError::new(kind.rejection())),
    }
}

/// ` [ var : ty ] `, the binder placed in front of a term to make it a function.
#[must_use]
pub fn binder(variable: &str, type_name: &str) -> String {
    format!(" [ {variable} : {type_name} ] ")
}

/// Prefix `term` with a binder over `type_name` when it mentions `variable`.
#[must_use]
pub fn bind_variable(term: &str, variable: &str, type_name: &str) -> String {
    if term.contains(variable) {
        format!("{}{term}", binder(variable, type_name))
    } else {
        term.to_owned()
    }
}

/// Turn the definition of a declaration into a function over `domain` when
/// it mentions the bound variable and is not a binder already.
#[must_use]
pub fn functionize(declaration: &str, domain: &str) -> String {
    let Some(eq) = declaration.find('=') else {
        return declaration.to_owned();
    };
    let (head, definition) = declaration.split_at(eq + 1);
    if !definition.contains(BOUND_VARIABLE) || definition.trim_start().starts_with('[') {
        return declaration.to_owned();
    }
    format!("{head} [ {BOUND_VARIABLE} : {domain}]{definition}")
}

/// Replace the concrete unknown `name` by a fresh `any<name>` and bind it.
///
/// `Δu` with `u : Ω → ℝ` becomes ` [ anyu : Ω → ℝ ] Δ anyu`.
#[must_use]
pub fn genericize(lhs: &str, name: &str, type_name: &str) -> String {
    let placeholder = format!("any{name}");
    let replaced = lhs.replace(name, &format!(" {placeholder}"));
    format!("{}{replaced}", binder(&placeholder, type_name))
}

/// Drop the application brackets of a definition head: `f(x) = x` → `f= x`.
#[must_use]
pub fn remove_apply_brackets(declaration: &str) -> Option<String> {
    let (head, _) = declaration.split_once('(')?;
    let (_, rest) = declaration.split_once(')')?;
    Some(format!("{head}{}", rest.trim()))
}

/// The argument of the first application in `lhs`: `u(0)` → `0`.
#[must_use]
pub fn evaluation_point(lhs: &str) -> Option<&str> {
    let (_, after) = lhs.split_once('(')?;
    let point = after.split(')').next().unwrap_or(after);
    Some(point.trim())
}

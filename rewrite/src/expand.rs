//! Inline parameter expansion.

use mosis_types::{InterviewError, Parameter};

/// Substitute each parameter's definition wherever its name occurs in `term`.
///
/// Parameters are visited latest first, one textual pass each. A referenced
/// parameter whose raw declaration is not `head = definition` is a modeling
/// error.
pub fn try_expand(term: &str, parameters: &[Parameter]) -> Result<String, InterviewError> {
    let mut expanded = term.to_owned();
    for parameter in parameters.iter().rev() {
        if parameter.name.is_empty() || !expanded.contains(&parameter.name) {
            continue;
        }
        let parts: Vec<&str> = parameter.raw_string.split('=').collect();
        let [_, definition] = parts.as_slice() else {
            return Err(InterviewError::new(format!(
                "no definition for {} given",
                parameter.name
            )));
        };
        expanded = expanded.replace(&parameter.name, definition.trim());
    }
    Ok(expanded)
}

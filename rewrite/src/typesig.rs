//! Structural checks on type strings returned by type inference.
//!
//! Inferred types come back either as plain arrow types (`Ω → ℝ`) or in a
//! dependent-record style (`{ : Ω } ℝ`). Both forms are compared either by a
//! literal prefix/suffix or by their ordered list of symbols.

const ARROWS: [&str; 2] = ["→", "⟶"];

/// Ordered symbols of a type, with round and curly brackets, colons and
/// arrows removed.
fn symbols(type_string: &str) -> Vec<&str> {
    type_string
        .split(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | '{' | '}' | ':' | '→' | '⟶'))
        .filter(|symbol| !symbol.is_empty())
        .collect()
}

/// Whether `type_string` denotes a function out of `from`.
#[must_use]
pub fn type_is_function_from(type_string: &str, from: &str) -> bool {
    if ARROWS
        .iter()
        .any(|arrow| type_string.starts_with(&format!("{from} {arrow}")))
    {
        return true;
    }
    if type_string.starts_with(&format!("{{ : {from}")) {
        return true;
    }
    let wanted = symbols(from);
    let actual = symbols(type_string);
    wanted.len() <= actual.len() && wanted.iter().zip(&actual).all(|(w, a)| w == a)
}

/// Whether `type_string` denotes a function into `to`.
#[must_use]
pub fn type_is_function_to(type_string: &str, to: &str) -> bool {
    if ARROWS
        .iter()
        .any(|arrow| type_string.ends_with(&format!("{arrow} {to}")))
    {
        return true;
    }
    if type_string.ends_with(&format!("}} {to}")) {
        return true;
    }
    let wanted = symbols(to);
    let actual = symbols(type_string);
    wanted.len() <= actual.len()
        && wanted
            .iter()
            .rev()
            .zip(actual.iter().rev())
            .all(|(w, a)| w == a)
}

/// The final result type of a (possibly curried) function type.
#[must_use]
pub fn last_type(type_string: &str) -> &str {
    let trimmed = type_string.trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '(' | ')'));
    trimmed
        .rsplit(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | '→' | '⟶'))
        .next()
        .unwrap_or(trimmed)
}

/// What remains of a function type once the first `domain →` is removed.
#[must_use]
pub fn codomain_after(type_string: &str, domain: &str) -> String {
    for arrow in ARROWS {
        let head = format!("{domain} {arrow}");
        if let Some(at) = type_string.find(&head) {
            let rest = format!("{}{}", &type_string[..at], &type_string[at + head.len()..]);
            return rest.trim().to_owned();
        }
    }
    type_string.trim().to_owned()
}

//! Surface syntax of declarations sent to the theory store.

use std::sync::OnceLock;

use regex::Regex;

/// Separates the components (type, definition, notation) of one declaration.
pub const OBJECT_DELIMITER: char = '❘';
/// Terminates a declaration.
pub const DECLARATION_DELIMITER: char = '❙';
/// Terminates a module (theory, view, structure).
pub const MODULE_DELIMITER: char = '❚';

/// Prefix a theory reference with `?` unless it already is qualified.
#[must_use]
pub fn qualify(name: &str) -> String {
    if name.contains('?') {
        name.to_owned()
    } else {
        format!("?{name}")
    }
}

/// Append the declaration delimiter unless a delimiter already ends the text.
#[must_use]
pub fn terminate_declaration(declaration: &str) -> String {
    if declaration.ends_with(DECLARATION_DELIMITER) || declaration.ends_with(MODULE_DELIMITER) {
        declaration.to_owned()
    } else {
        format!("{declaration}{DECLARATION_DELIMITER}")
    }
}

#[must_use]
pub fn include(what: &str) -> String {
    format!("include {}", qualify(what))
}

/// `?T = ?T`, mapping a theory onto itself inside a view.
#[must_use]
pub fn trivial_assignment(theory: &str) -> String {
    let qualified = qualify(theory);
    format!("{qualified} = {qualified}")
}

#[must_use]
pub fn view_name(theory: &str, template: &str) -> String {
    format!("{theory}AS{template}")
}

/// The template theory a view name was built from.
#[must_use]
pub fn view_template_of(view: &str) -> &str {
    view.rsplit("AS").next().unwrap_or(view)
}

/// `?Template = ?View`, reusing an earlier view inside a later one.
#[must_use]
pub fn view_assignment(view: &str) -> String {
    format!("?{} = ?{view}", view_template_of(view))
}

fn non_word() -> &'static Regex {
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    NON_WORD.get_or_init(|| Regex::new(r"\W").expect("valid non-word regex"))
}

/// Insert the object delimiter before the second `:` or `=` of a declaration.
///
/// `f : Ω → ℝ = x` becomes `f : Ω → ℝ ❘= x`. A separator directly after the
/// first word is not counted. Text with fewer than two markers is unchanged.
#[must_use]
pub fn add_object_delimiter(declaration: &str) -> String {
    let mut seen_marker = false;
    for found in non_word().find_iter(declaration).skip(1) {
        if !matches!(found.as_str(), ":" | "=") {
            continue;
        }
        if seen_marker {
            let at = found.start();
            return format!(
                "{}{OBJECT_DELIMITER}{}",
                &declaration[..at],
                &declaration[at..]
            );
        }
        seen_marker = true;
    }
    declaration.to_owned()
}

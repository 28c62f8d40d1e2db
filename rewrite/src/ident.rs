//! Identifiers and yes/no answers.

/// The first identifier-like token of `text`.
///
/// Returns the empty string when `text` does not start with a word character.
#[must_use]
pub fn first_word(text: &str) -> &str {
    text.split(|c: char| !is_word_char(c))
        .next()
        .unwrap_or_default()
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Parse a yes/no style answer: `y yes t true on 1` and `n no f false off 0`,
/// case-insensitive, surrounding whitespace ignored.
#[must_use]
pub fn parse_bool(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Some(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Whether `answer` is unambiguously a "no". Unparsable input is not a no.
#[must_use]
pub fn means_no(answer: &str) -> bool {
    parse_bool(answer) == Some(false)
}

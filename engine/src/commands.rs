//! Keywords that work in every stage.

use mosis_rewrite::first_word;

#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub palette_label: &'static str,
    pub help_label: &'static str,
    pub description: &'static str,
}

const COMMAND_SPECS: &[CommandSpec] = &[
    CommandSpec {
        palette_label: "undo",
        help_label: "undo",
        description: "Go back to the previous question",
    },
    CommandSpec {
        palette_label: "recap",
        help_label: "recap",
        description: "Show everything we know about your problem so far",
    },
    CommandSpec {
        palette_label: "explain [name]",
        help_label: "explain",
        description: "Ask the theory store about a theory or symbol",
    },
    CommandSpec {
        palette_label: "help",
        help_label: "help",
        description: "List these keywords",
    },
];

#[must_use]
pub fn command_specs() -> &'static [CommandSpec] {
    COMMAND_SPECS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommandKind {
    Undo,
    Recap,
    Explain,
    Help,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct CommandAlias {
    pub name: &'static str,
    pub kind: CommandKind,
}

const COMMAND_ALIASES: &[CommandAlias] = &[
    CommandAlias {
        name: "undo",
        kind: CommandKind::Undo,
    },
    CommandAlias {
        name: "recap",
        kind: CommandKind::Recap,
    },
    CommandAlias {
        name: "explain",
        kind: CommandKind::Explain,
    },
    CommandAlias {
        name: "help",
        kind: CommandKind::Help,
    },
];

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command<'a> {
    Undo,
    Recap,
    Explain(Option<&'a str>),
    Help,
}

impl<'a> Command<'a> {
    /// A keyword is recognized by the first word of the line, case-insensitive.
    pub(crate) fn parse(raw: &'a str) -> Option<Self> {
        let raw = raw.trim();
        let word = first_word(raw);
        if word.is_empty() {
            return None;
        }
        let kind = COMMAND_ALIASES
            .iter()
            .find(|alias| alias.name.eq_ignore_ascii_case(word))
            .map(|alias| alias.kind)?;

        let rest = raw[word.len()..].trim();
        Some(match kind {
            CommandKind::Undo => Command::Undo,
            CommandKind::Recap => Command::Recap,
            CommandKind::Explain => Command::Explain((!rest.is_empty()).then_some(rest)),
            CommandKind::Help => Command::Help,
        })
    }
}

//! LaTeX macros the interview understands, resolved to the symbols the
//! store's surface syntax uses.

use std::sync::OnceLock;

use aho_corasick::{AhoCorasick, MatchKind};

const MACROS: &[(&str, &str)] = &[
    (r"\mathbb{R}", "ℝ"),
    (r"\mathbb{N}", "ℕ"),
    (r"\mathbb{Z}", "ℤ"),
    (r"\mathbb{C}", "ℂ"),
    (r"\rightarrow", "→"),
    (r"\to", "→"),
    (r"\mapsto", "↦"),
    (r"\forall", "∀"),
    (r"\exists", "∃"),
    (r"\neg", "¬"),
    (r"\lnot", "¬"),
    (r"\vdash", "⊦"),
    (r"\doteq", "≐"),
    (r"\Omega", "Ω"),
    (r"\Delta", "Δ"),
    (r"\Gamma", "Γ"),
    (r"\nabla", "∇"),
    (r"\partial", "∂"),
    (r"\alpha", "α"),
    (r"\beta", "β"),
    (r"\gamma", "γ"),
    (r"\delta", "δ"),
    (r"\epsilon", "ε"),
    (r"\lambda", "λ"),
    (r"\mu", "μ"),
    (r"\nu", "ν"),
    (r"\pi", "π"),
    (r"\rho", "ρ"),
    (r"\sigma", "σ"),
    (r"\tau", "τ"),
    (r"\phi", "φ"),
    (r"\omega", "ω"),
    (r"\cdot", "⋅"),
    (r"\times", "×"),
    (r"\leq", "≤"),
    (r"\geq", "≥"),
    (r"\neq", "≠"),
    (r"\infty", "∞"),
    (r"\in", "∈"),
];

fn matcher() -> &'static AhoCorasick {
    static MATCHER: OnceLock<AhoCorasick> = OnceLock::new();
    MATCHER.get_or_init(|| {
        AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(MACROS.iter().map(|(name, _)| *name))
            .expect("valid LaTeX macro table")
    })
}

/// Replace every known macro in `line`, longest match first.
pub fn resolve(line: &str) -> String {
    let symbols: Vec<&str> = MACROS.iter().map(|(_, symbol)| *symbol).collect();
    matcher().replace_all(line, &symbols)
}

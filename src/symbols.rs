// SPDX: CC0-1.0

use core::fmt;
use std::{collections::HashMap, sync::LazyLock};

pub const X: &str = "x";
pub const Y: &str = "y";
pub const Z: &str = "z";
pub const T: &str = "t";

/// Independent variables a plot ranges over.
pub const RESERVED_VARIABLES: &[&str] = &[X, Y, Z, T];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Function,
    Constant,
    Variable,
    Latex,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Function => "function",
            Self::Constant => "constant",
            Self::Variable => "variable",
            Self::Latex => "LaTeX command",
        })
    }
}

const FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "cot", "sec", "csc", //
    "asin", "acos", "atan", "atan2", //
    "sinh", "cosh", "tanh", //
    "exp", "log", "log10", "sqrt", "cbrt", //
    "abs", "sign", "floor", "ceil", "round", "fix", //
    "mod", "rem", //
    // plotting builtins
    "linspace", "meshgrid", "plot", "surf", "mesh", "figure", "grid", "hold",
];

const CONSTANTS: &[&str] = &["pi", "e", "inf", "nan", "i", "j"];

const LATEX: &[&str] = &[
    "frac", "text", "mathrm", "mathbf", "mathit", "mathcal", "mathbb", //
    "left", "right", "big", "Big", "bigg", "Bigg", //
    "cdot", "times", "div", "pm", "mp", //
    "sum", "prod", "int", "oint", "partial", "nabla", "infty", //
    "hat", "bar", "vec", "dot", "ddot", "tilde", "check", "breve", //
    "sim", "approx", "equiv", "propto", "leq", "geq", "neq", "ll", "gg", //
    "quad", "qquad", "space", "limits", "begin", "end",
];

static KNOWN_SYMBOLS: LazyLock<HashMap<&'static str, SymbolKind>> =
    LazyLock::new(standard_symbols);

/// Names never reported as parameters. Lookups are case-sensitive.
pub fn standard_symbols() -> HashMap<&'static str, SymbolKind> {
    let mut ret = HashMap::new();

    for (names, kind) in [
        (FUNCTIONS, SymbolKind::Function),
        (CONSTANTS, SymbolKind::Constant),
        (RESERVED_VARIABLES, SymbolKind::Variable),
        (LATEX, SymbolKind::Latex),
    ] {
        for name in names {
            ret.insert(*name, kind);
        }
    }
    ret
}

pub fn known_symbol(name: &str) -> Option<SymbolKind> {
    KNOWN_SYMBOLS.get(name).copied()
}

pub fn is_known_symbol(name: &str) -> bool {
    KNOWN_SYMBOLS.contains_key(name)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimilarSymbol {
    pub name: &'static str,
    pub kind: SymbolKind,
    pub similarity: f64,
}

/// Finds the known symbol closest to `name`, ignoring case, if it is more
/// similar than `min_similarity`.
pub fn similar_symbol(name: &str, min_similarity: f64) -> Option<SimilarSymbol> {
    let name = name.to_ascii_lowercase();
    KNOWN_SYMBOLS
        .iter()
        .map(|(&key, &kind)| SimilarSymbol {
            name: key,
            kind,
            similarity: strsim::normalized_damerau_levenshtein(
                &name,
                &key.to_ascii_lowercase(),
            ),
        })
        // ties go to the lexicographically smaller name so the hint is stable
        .reduce(|acc, elem| {
            if elem.similarity > acc.similarity
                || (elem.similarity == acc.similarity && elem.name < acc.name)
            {
                elem
            } else {
                acc
            }
        })
        .filter(|best| best.similarity > min_similarity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(known_symbol("sin"), Some(SymbolKind::Function));
        assert_eq!(known_symbol("pi"), Some(SymbolKind::Constant));
        assert_eq!(known_symbol("t"), Some(SymbolKind::Variable));
        assert_eq!(known_symbol("frac"), Some(SymbolKind::Latex));
        assert_eq!(known_symbol("omega"), None);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(is_known_symbol("x"));
        assert!(!is_known_symbol("X"));
        assert!(!is_known_symbol("Sin"));
        assert!(is_known_symbol("Big"));
    }

    #[test]
    fn similar_ignores_case() {
        let hint = similar_symbol("Sin", 0.7).unwrap();
        assert_eq!(hint.name, "sin");
        assert_eq!(hint.kind, SymbolKind::Function);
        assert_eq!(hint.similarity, 1.0);
    }

    #[test]
    fn similar_finds_typo() {
        let hint = similar_symbol("sqrtt", 0.7).unwrap();
        assert_eq!(hint.name, "sqrt");
    }

    #[test]
    fn dissimilar_names_have_no_hint() {
        assert_eq!(similar_symbol("omega", 0.7), None);
    }
}

// SPDX: CC0-1.0

use crate::{
    lex::{self, is_ident_continue, is_ident_start},
    symbols::{is_known_symbol, X, Y, Z},
};
use std::collections::BTreeSet;

/// The assignment target of `formula`, if the text before the first `=` is a
/// single bare identifier.
///
/// Left sides such as `f(x)` or `a + b` are not assignment targets, and in
/// that case nothing is excluded.
pub fn lhs_variable(formula: &str) -> Option<&str> {
    let (lhs, _) = formula.split_once('=')?;
    let lhs = lhs.trim();
    let mut chrs = lhs.chars();
    match chrs.next() {
        Some(first) if is_ident_start(first) && chrs.all(is_ident_continue) => Some(lhs),
        _ => None,
    }
}

fn is_underscores(tok: &str) -> bool {
    tok.chars().all(|chr| chr == '_')
}

/// Free parameters of `formula`, de-duplicated and sorted by byte order.
///
/// A parameter is any identifier token that is not a known symbol (exact
/// case), not the [`lhs_variable`], and not made only of underscores.
pub fn extract_parameters(formula: &str) -> Vec<String> {
    if formula.is_empty() {
        return Vec::new();
    }

    let lhs = lhs_variable(formula);

    // BTreeSet iterates in `str` order, which is the ordinal order we want
    let params: BTreeSet<&str> = lex::idents(formula)
        .map(|tok| tok.text)
        .filter(|&tok| !is_known_symbol(tok) && Some(tok) != lhs && !is_underscores(tok))
        .collect();

    params.into_iter().map(String::from).collect()
}

/// Whether the formula mentions at least two of `x`, `y`, `z` as whole words,
/// ignoring case, and so probably describes a surface.
///
/// Unlike [`extract_parameters`] this is case-insensitive: `X + Y` counts.
pub fn suggests_3d(formula: &str) -> bool {
    let mut seen = [false; 3];
    for word in lex::words(formula) {
        for (axis, name) in [X, Y, Z].into_iter().enumerate() {
            if word.eq_ignore_ascii_case(name) {
                seen[axis] = true;
            }
        }
    }
    seen.into_iter().filter(|&hit| hit).count() >= 2
}

// SPDX: CC0-1.0

use crate::lex::{Bracket, Lexer, TokTyp};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FormulaErrTyp {
    #[error("Syntax Error: Unexpected closing bracket '{0}'")]
    UnexpectedClose(char),
    #[error("Syntax Error: Missing closing bracket for '{0}'")]
    Unclosed(char),
    #[error("Syntax Error: Multiple '=' signs found. Only one assignment is allowed.")]
    MultipleEquals,
    #[error("Syntax Error: Formula cannot end with an operator.")]
    TrailingOperator,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{typ}")]
pub struct FormulaErr {
    pub typ: FormulaErrTyp,
    /// Byte offset of the offending character.
    pub loc: usize,
}

/// Checks bracket balance, then that there is at most one `=`, then that the
/// formula does not end in an operator. The first failing check is reported.
pub fn validate_formula(formula: &str) -> Result<(), FormulaErr> {
    let mut open: Vec<(Bracket, usize)> = Vec::new();
    let mut equals: Vec<usize> = Vec::new();
    let mut last = None;

    for tok in Lexer::new(formula) {
        match tok.typ {
            TokTyp::Open(bracket) => open.push((bracket, tok.start)),
            TokTyp::Close(bracket) => match open.pop() {
                Some((opener, _)) if opener == bracket => {}
                _ => {
                    return Err(FormulaErr {
                        typ: FormulaErrTyp::UnexpectedClose(bracket.close()),
                        loc: tok.start,
                    })
                }
            },
            TokTyp::Equal => equals.push(tok.start),
            TokTyp::Ident | TokTyp::Number | TokTyp::Op(_) | TokTyp::Other => {}
        }
        last = Some(tok);
    }

    if let Some(&(bracket, loc)) = open.last() {
        return Err(FormulaErr {
            typ: FormulaErrTyp::Unclosed(bracket.open()),
            loc,
        });
    }

    if let [_, second, ..] = equals[..] {
        return Err(FormulaErr {
            typ: FormulaErrTyp::MultipleEquals,
            loc: second,
        });
    }

    // the lexer skips whitespace, so this is the last non-blank character
    if let Some(tok) = last.filter(|tok| matches!(tok.typ, TokTyp::Op(_))) {
        return Err(FormulaErr {
            typ: FormulaErrTyp::TrailingOperator,
            loc: tok.start,
        });
    }

    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum ValueErr {
    #[error("Required")]
    Required,
    #[error("Invalid symbol")]
    InvalidSymbol,
    #[error("No strings")]
    NoStrings,
    #[error("Unbalanced ( )")]
    UnbalancedParens,
    #[error("Unbalanced [ ]")]
    UnbalancedSquare,
}

fn balanced(value: &str, bracket: Bracket) -> bool {
    let count = |target: char| value.chars().filter(|&chr| chr == target).count();
    count(bracket.open()) == count(bracket.close())
}

/// Checks a free-text parameter value. Only bracket counts are compared, so
/// `)(` passes.
pub fn validate_parameter_value(value: &str) -> Result<(), ValueErr> {
    if value.trim().is_empty() {
        Err(ValueErr::Required)
    } else if value.contains(&['=', ';', '%', '#'][..]) {
        Err(ValueErr::InvalidSymbol)
    } else if value.contains(&['\'', '"'][..]) {
        Err(ValueErr::NoStrings)
    } else if !balanced(value, Bracket::Paren) {
        Err(ValueErr::UnbalancedParens)
    } else if !balanced(value, Bracket::Square) {
        Err(ValueErr::UnbalancedSquare)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formula_err(formula: &str) -> FormulaErr {
        validate_formula(formula).unwrap_err()
    }

    #[test]
    fn valid_formulas() {
        for formula in [
            "",
            "y = A * sin(omega*t + phi)",
            r"f(x) = a e^{-\frac{(x-b)^2}{2c^2}}",
            "[1, 2] + {3}",
            "y = -x  ",
            "x^2",
        ] {
            assert_eq!(validate_formula(formula), Ok(()), "{formula}");
        }
    }

    #[test]
    fn unclosed_paren() {
        let err = formula_err("y = sin(x");
        assert_eq!(err.typ, FormulaErrTyp::Unclosed('('));
        assert_eq!(err.loc, 7);
        assert_eq!(
            err.to_string(),
            "Syntax Error: Missing closing bracket for '('"
        );
    }

    #[test]
    fn innermost_unclosed_is_reported() {
        assert_eq!(formula_err("{ ( [").typ, FormulaErrTyp::Unclosed('['));
        assert_eq!(formula_err("(a + [b]").typ, FormulaErrTyp::Unclosed('('));
    }

    #[test]
    fn unexpected_close() {
        let err = formula_err("y = x)");
        assert_eq!(err.typ, FormulaErrTyp::UnexpectedClose(')'));
        assert_eq!(err.loc, 5);
        assert_eq!(
            formula_err("(a]").to_string(),
            "Syntax Error: Unexpected closing bracket ']'"
        );

        let err = formula_err("(}");
        assert_eq!(err.typ, FormulaErrTyp::UnexpectedClose('}'));
        assert_eq!(err.loc, 1);
        assert_eq!(formula_err("a }").typ, FormulaErrTyp::UnexpectedClose('}'));

        let err = formula_err("] = x");
        assert_eq!(err.typ, FormulaErrTyp::UnexpectedClose(']'));
        assert_eq!(err.loc, 0);
    }

    #[test]
    fn multiple_equals() {
        let err = formula_err("a=1=2");
        assert_eq!(err.typ, FormulaErrTyp::MultipleEquals);
        assert_eq!(err.loc, 3);
        assert_eq!(
            err.to_string(),
            "Syntax Error: Multiple '=' signs found. Only one assignment is allowed."
        );
    }

    #[test]
    fn trailing_operator() {
        for formula in ["y = x +", "y = x -  \n", "x*", "x/", "x^\t"] {
            assert_eq!(
                formula_err(formula).typ,
                FormulaErrTyp::TrailingOperator,
                "{formula}"
            );
        }
        assert_eq!(formula_err("y = 2 *  ").loc, 6);
    }

    #[test]
    fn bracket_errors_come_first() {
        assert_eq!(formula_err("a = b = (c +").typ, FormulaErrTyp::Unclosed('('));
        assert_eq!(formula_err("a = b = c +").typ, FormulaErrTyp::MultipleEquals);
    }

    #[test]
    fn parameter_values() {
        assert_eq!(validate_parameter_value("3*x"), Ok(()));
        assert_eq!(validate_parameter_value("[1 2 3]"), Ok(()));
        assert_eq!(validate_parameter_value(" 8/3 "), Ok(()));
        assert_eq!(validate_parameter_value(""), Err(ValueErr::Required));
        assert_eq!(validate_parameter_value(" \t"), Err(ValueErr::Required));
        assert_eq!(validate_parameter_value("3;x"), Err(ValueErr::InvalidSymbol));
        assert_eq!(validate_parameter_value("a=1"), Err(ValueErr::InvalidSymbol));
        assert_eq!(validate_parameter_value("50%"), Err(ValueErr::InvalidSymbol));
        assert_eq!(validate_parameter_value("'1'"), Err(ValueErr::NoStrings));
        assert_eq!(validate_parameter_value("(1"), Err(ValueErr::UnbalancedParens));
        assert_eq!(validate_parameter_value("[1"), Err(ValueErr::UnbalancedSquare));
        assert_eq!(validate_parameter_value(")("), Ok(()));
    }

    #[test]
    fn value_checks_are_ordered() {
        assert_eq!(validate_parameter_value("\"(#"), Err(ValueErr::InvalidSymbol));
        assert_eq!(validate_parameter_value("'(["), Err(ValueErr::NoStrings));
        assert_eq!(validate_parameter_value("(["), Err(ValueErr::UnbalancedParens));
    }

    #[test]
    fn value_messages() {
        assert_eq!(ValueErr::Required.to_string(), "Required");
        assert_eq!(ValueErr::UnbalancedParens.to_string(), "Unbalanced ( )");
        assert_eq!(ValueErr::UnbalancedSquare.to_string(), "Unbalanced [ ]");
    }
}

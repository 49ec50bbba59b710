// SPDX: CC0-1.0

//! Free parameters of a typed formula: which identifiers the user still has
//! to give values to, what they probably mean, and whether the formula and
//! the values are well formed.
//!
//! The formula is only scanned as text, never parsed or evaluated.

pub mod config;
pub mod describe;
pub mod draft;
pub mod extract;
pub mod lex;
pub mod sheet;
pub mod shell;
pub mod symbols;
pub mod validate;

pub use describe::describe_parameter;
pub use extract::{extract_parameters, lhs_variable, suggests_3d};
pub use sheet::ParamSheet;
pub use validate::{validate_formula, validate_parameter_value, FormulaErr, ValueErr};

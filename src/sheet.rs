// SPDX: CC0-1.0

use crate::{
    extract::{extract_parameters, suggests_3d},
    validate::{validate_formula, validate_parameter_value, FormulaErr, ValueErr},
};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CheckErr {
    #[error("no formula is set")]
    Empty,
    #[error(transparent)]
    Formula(#[from] FormulaErr),
    #[error("{}", count_invalid(.0))]
    Params(BTreeMap<String, ValueErr>),
}

fn count_invalid(failed: &BTreeMap<String, ValueErr>) -> String {
    match failed.len() {
        1 => "1 parameter value is invalid".to_string(),
        n => format!("{n} parameter values are invalid"),
    }
}

/// Derived state of a formula being edited.
///
/// Parameters are recomputed from scratch whenever the formula changes.
/// Values are keyed by parameter name and outlive the parameters, so they come
/// back when a name reappears.
#[derive(Clone, Debug, Default)]
pub struct ParamSheet {
    formula: String,
    params: Vec<String>,
    values: BTreeMap<String, String>,
    errors: BTreeMap<String, ValueErr>,
    is_3d: bool,
}

impl ParamSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn error(&self, name: &str) -> Option<ValueErr> {
        self.errors.get(name).copied()
    }

    pub fn is_3d(&self) -> bool {
        self.is_3d
    }

    pub fn set_3d(&mut self, is_3d: bool) {
        self.is_3d = is_3d;
    }

    /// Replaces the formula and recomputes its parameters. A formula that
    /// looks like a surface turns 3D mode on; nothing here turns it off.
    pub fn set_formula(&mut self, formula: impl Into<String>) {
        self.formula = formula.into();
        self.params = extract_parameters(&self.formula);
        if suggests_3d(&self.formula) {
            self.is_3d = true;
        }
        debug!(params = ?self.params, is_3d = self.is_3d, "recomputed parameters");
    }

    /// Stores a value and re-validates it, even for names not in the current
    /// formula.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), ValueErr> {
        let value = value.into();
        let res = validate_parameter_value(&value);
        match res {
            Ok(()) => {
                self.errors.remove(name);
            }
            Err(err) => {
                self.errors.insert(name.to_string(), err);
            }
        }
        self.values.insert(name.to_string(), value);
        res
    }

    /// Values of the detected parameters that are not empty.
    pub fn relevant_values(&self) -> BTreeMap<String, String> {
        self.params
            .iter()
            .filter_map(|name| {
                self.values
                    .get(name)
                    .filter(|value| !value.is_empty())
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect()
    }

    /// Whether the sheet is ready for code generation: the formula must be
    /// non-blank and valid, and every detected parameter needs a valid value.
    ///
    /// All failing parameters are recorded in the sheet's errors, not only
    /// the first.
    pub fn check(&mut self) -> Result<(), CheckErr> {
        if self.formula.trim().is_empty() {
            return Err(CheckErr::Empty);
        }
        validate_formula(&self.formula)?;

        let failed: BTreeMap<String, ValueErr> = self
            .params
            .iter()
            .filter_map(|name| {
                let value = self.values.get(name).map_or("", String::as_str);
                validate_parameter_value(value)
                    .err()
                    .map(|err| (name.clone(), err))
            })
            .collect();

        if failed.is_empty() {
            Ok(())
        } else {
            debug!(failed = failed.len(), "parameter check failed");
            self.errors = failed.clone();
            Err(CheckErr::Params(failed))
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// SPDX: CC0-1.0

use crate::{
    describe::{decompose, describe_parameter, lookup, Qualifier},
    sheet::ParamSheet,
    symbols::similar_symbol,
};
use anyhow::Context;
use core::fmt;
use std::io::{self, BufRead, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    SetFormula,
    Params,
    SetValue,
    Check,
    Save,
    Load,
    Clear,
}

impl Command {
    pub const fn exhaustive() -> &'static [Command] {
        &[
            Self::Help,
            Self::Quit,
            Self::SetFormula,
            Self::Params,
            Self::SetValue,
            Self::Check,
            Self::Save,
            Self::Load,
            Self::Clear,
        ]
    }

    pub const fn help(&self) -> &'static str {
        match self {
            Self::Help => "display help for each command",
            Self::Quit => "quit the shell",
            Self::SetFormula => "set the formula to inspect",
            Self::Params => "list detected parameters with their values and descriptions",
            Self::SetValue => "give a value to a parameter",
            Self::Check => "check that the formula and every parameter value are valid",
            Self::Save => "save formula and parameter values to a new draft file",
            Self::Load => "load a draft file",
            Self::Clear => "forget the formula, its values and 3D mode",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Quit => "quit",
            Self::SetFormula => "set",
            Self::Params => "params",
            Self::SetValue => "value",
            Self::Check => "check",
            Self::Save => "save",
            Self::Load => "load",
            Self::Clear => "clear",
        }
    }
}

impl core::str::FromStr for Command {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for c in Self::exhaustive() {
            if s == c.name() {
                return Ok(*c);
            }
        }
        Err(())
    }
}

/// Prompts for one line of input. Returns `None` at end of input.
pub fn input<R: BufRead, W: Write>(
    inp: R,
    out: W,
    prompt: impl fmt::Display,
) -> anyhow::Result<Option<String>> {
    fn inner<R: BufRead, W: Write>(
        mut inp: R,
        mut out: W,
        prompt: impl fmt::Display,
    ) -> io::Result<Option<String>> {
        write!(out, "{prompt}")?;
        out.flush()?;
        let mut s = String::new();
        if inp.read_line(&mut s)? == 0 {
            return Ok(None);
        }
        Ok(Some(s.trim().to_string()))
    }

    let s = inner(inp, out, prompt).context("read from standard input failed")?;
    Ok(s)
}

/// Prints an error the shell recovers from, with its chain of sources.
pub fn report<W: Write>(mut out: W, err: &dyn std::error::Error) -> io::Result<()> {
    writeln!(out, "error: {err}")?;
    let mut source = err.source();
    while let Some(cause) = source {
        writeln!(out, "  {cause}")?;
        source = cause.source();
    }
    Ok(())
}

/// Prints `src` with a caret under the character at byte offset `loc`.
pub fn underline<W: Write>(mut out: W, src: &str, loc: usize) -> io::Result<()> {
    writeln!(out, "{src}")?;
    let col = src.get(..loc).map_or(0, |before| before.chars().count());
    writeln!(out, "{}^", " ".repeat(col))?;
    Ok(())
}

/// One line of the parameter listing, explaining where a subscripted
/// description came from.
fn explain(name: &str) -> Option<String> {
    if lookup(name).is_some() {
        return None;
    }
    let (base, suffix) = decompose(name)?;
    lookup(base)?;
    Some(format!(
        "'{name}' reads as '{base}' with {}",
        Qualifier::classify(suffix)
    ))
}

pub fn dump_params<W: Write>(
    mut out: W,
    sheet: &ParamSheet,
    min_similarity: Option<f64>,
) -> io::Result<()> {
    writeln!(out, "params: ")?;
    if sheet.params().is_empty() {
        writeln!(out, "  (none)")?;
    }

    let width = sheet.params().iter().map(String::len).max().unwrap_or(0);
    for name in sheet.params() {
        let value = sheet.value(name).unwrap_or("");
        write!(out, "  {name:width$} = {value}")?;
        if let Some(err) = sheet.error(name) {
            write!(out, " (error: {err})")?;
        }
        writeln!(out)?;

        match describe_parameter(name) {
            Some(desc) => {
                writeln!(out, "    {desc}")?;
                if let Some(how) = explain(name) {
                    writeln!(out, "    note: {how}")?;
                }
            }
            None => {
                if let Some(hint) = min_similarity.and_then(|min| similar_symbol(name, min)) {
                    writeln!(
                        out,
                        "    note: {kind} '{sym}' has a similar name",
                        kind = hint.kind,
                        sym = hint.name
                    )?;
                }
            }
        }
    }

    writeln!(out, "3D mode: {}", if sheet.is_3d() { "on" } else { "off" })?;
    Ok(())
}

pub fn formula_undefined<W: Write>(mut out: W) -> io::Result<()> {
    writeln!(out, "error: no formula is defined")
}

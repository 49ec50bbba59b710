// SPDX: CC0-1.0

use chrono::Local;
use clap::Parser;
use formula_params::{
    config::{self, Config},
    draft::{self, Draft},
    sheet::{CheckErr, ParamSheet},
    shell::{self, Command},
};
use std::{
    io::{stdin, stdout, BufRead, BufWriter, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Detect, annotate and validate the free parameters of a formula.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Config file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Formula to start with.
    #[arg(long)]
    formula: Option<String>,

    /// Draft file to load at startup.
    #[arg(long)]
    draft: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    match try_main(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("unexpected error: {err}");
            let chain = err.chain();
            if chain.len() > 1 {
                eprintln!();
                eprintln!("context:");
                for it in chain.skip(1) {
                    eprintln!("  {it}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

/// Directives from `RUST_LOG`, or warnings only when it is unset or invalid.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

#[derive(Debug)]
struct State {
    config: Config,
    sheet: ParamSheet,
    draft_name: String,
}

impl State {
    fn min_similarity(&self) -> Option<f64> {
        self.config
            .hints
            .enabled
            .then_some(self.config.hints.min_similarity)
    }
}

fn try_main(cli: Cli) -> anyhow::Result<()> {
    let config = config::load_config(cli.config.as_deref())?;
    let mut state = State {
        sheet: ParamSheet::new(),
        draft_name: String::new(),
        config,
    };

    let mut stdout = BufWriter::new(stdout());

    if let Some(ref path) = cli.draft {
        load_from(&mut stdout, &mut state, path)?;
    }
    if let Some(formula) = cli.formula.or_else(|| state.config.shell.formula.clone()) {
        state.sheet.set_formula(formula);
    }

    run(stdin().lock(), &mut stdout, &mut state)?;
    stdout.flush()?;
    Ok(())
}

/// Runs commands until `quit` or the end of input.
fn run<R: BufRead, W: Write>(mut inp: R, mut out: W, state: &mut State) -> anyhow::Result<()> {
    loop {
        if state.sheet.formula().is_empty() {
            writeln!(out, "formula is not set")?;
        } else {
            writeln!(out, "formula: {}", state.sheet.formula())?;
        }

        let Some(mut try_cmd) = shell::input(&mut inp, &mut out, &state.config.shell.prompt)?
        else {
            writeln!(out)?;
            break;
        };
        try_cmd.make_ascii_lowercase();
        writeln!(out)?;

        if let Ok(cmd) = try_cmd.parse::<Command>() {
            match cmd {
                Command::Help => {
                    for c in Command::exhaustive() {
                        writeln!(out, "{name}: {help}", name = c.name(), help = c.help())?;
                    }
                }

                Command::Quit => break,

                Command::SetFormula => set_formula(&mut inp, &mut out, state)?,

                Command::Params => {
                    shell::dump_params(&mut out, &state.sheet, state.min_similarity())?
                }

                Command::SetValue => set_value(&mut inp, &mut out, state)?,

                Command::Check => check(&mut out, state)?,

                Command::Save => save(&mut inp, &mut out, state)?,

                Command::Load => {
                    let input = shell::input(&mut inp, &mut out, "draft file = ")?;
                    if let Some(input) = input.filter(|input| !input.is_empty()) {
                        load_from(&mut out, state, Path::new(&input))?;
                    }
                }

                Command::Clear => {
                    state.sheet.clear();
                    state.draft_name.clear();
                }
            }
        } else {
            writeln!(out, r#"Unknown command, try "help" for help"#)?;
        }

        writeln!(out)?;
    }
    Ok(())
}

fn set_formula<R: BufRead, W: Write>(
    inp: R,
    mut out: W,
    state: &mut State,
) -> anyhow::Result<()> {
    let input = shell::input(inp, &mut out, "formula = ")?.unwrap_or_default();
    if input.is_empty() {
        return Ok(());
    }

    state.sheet.set_formula(input);
    shell::dump_params(&mut out, &state.sheet, state.min_similarity())?;
    Ok(())
}

fn set_value<R: BufRead, W: Write>(
    mut inp: R,
    mut out: W,
    state: &mut State,
) -> anyhow::Result<()> {
    if state.sheet.params().is_empty() {
        writeln!(out, "error: the formula has no parameters")?;
        return Ok(());
    }

    writeln!(out, "note: leave blank to skip")?;
    let names = state.sheet.params().to_vec();
    for name in names {
        let cur = state.sheet.value(&name).unwrap_or("").to_string();
        let prompt = format!("?{name} (is {cur:?}) = ");
        let Some(input) = shell::input(&mut inp, &mut out, prompt)? else {
            break;
        };
        if input.is_empty() {
            continue;
        }
        if let Err(err) = state.sheet.set_value(&name, input) {
            writeln!(out, "error: {name}: {err}")?;
        }
    }
    Ok(())
}

fn check<W: Write>(mut out: W, state: &mut State) -> anyhow::Result<()> {
    let res = state.sheet.check();
    match &res {
        Ok(()) => writeln!(out, "ok: formula and all parameter values are valid")?,

        Err(CheckErr::Empty) => shell::formula_undefined(&mut out)?,

        Err(CheckErr::Formula(err)) => {
            shell::underline(&mut out, state.sheet.formula(), err.loc)?;
            writeln!(out, "{err}")?;
        }

        Err(err @ CheckErr::Params(failed)) => {
            writeln!(out, "error: {err}")?;
            for (name, reason) in failed {
                writeln!(out, "  {name}: {reason}")?;
            }
            writeln!(out, r#"note: use "value" to fill them in"#)?;
        }
    }
    Ok(())
}

fn save<R: BufRead, W: Write>(inp: R, mut out: W, state: &mut State) -> anyhow::Result<()> {
    if state.sheet.formula().trim().is_empty() {
        shell::formula_undefined(&mut out)?;
        return Ok(());
    }

    let prompt = format!("?name (is {:?}) = ", state.draft_name);
    let name = shell::input(inp, &mut out, prompt)?.unwrap_or_default();
    if !name.is_empty() {
        state.draft_name = name;
    }

    let now = Local::now();
    let draft = Draft::from_sheet(&state.sheet, state.draft_name.as_str(), now);
    let skipped = state
        .sheet
        .params()
        .iter()
        .filter(|name| !draft.param_values.contains_key(*name))
        .count();
    if skipped > 0 {
        warn!(skipped, "saving draft with parameters that have no value");
    }

    match draft::save_draft(state.config.draft.dir(), &draft, now) {
        Ok(path) => writeln!(out, "saved {}", path.display())?,
        Err(err) => shell::report(&mut out, &err)?,
    }
    Ok(())
}

fn load_from<W: Write>(mut out: W, state: &mut State, path: &Path) -> anyhow::Result<()> {
    let draft = match draft::load_draft(path) {
        Ok(draft) => draft,
        Err(err) => {
            // the shell keeps running on unreadable drafts
            shell::report(&mut out, &err)?;
            return Ok(());
        }
    };

    draft.apply(&mut state.sheet);
    state.draft_name = draft.name.clone();
    info!(name = %draft.name, saved_at = %draft.saved_at, "restored draft");

    let invalid = draft
        .param_values
        .keys()
        .filter(|name| state.sheet.error(name).is_some())
        .count();
    writeln!(out, "loaded {}", path.display())?;
    if invalid > 0 {
        writeln!(
            out,
            r#"note: {invalid} stored value{s} failed validation, see "params""#,
            s = if invalid == 1 { "" } else { "s" }
        )?;
    }
    Ok(())
}

// SPDX: CC0-1.0

use crate::sheet::ParamSheet;
use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DraftErr {
    #[error("failed to access draft file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read draft file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to encode draft")]
    Encode(#[from] toml::ser::Error),
}

/// A formula together with the values given to its parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    #[serde(default)]
    pub name: String,
    pub formula: String,
    #[serde(default)]
    pub is_3d: bool,
    pub saved_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub param_values: BTreeMap<String, String>,
}

impl Draft {
    /// Captures the sheet, keeping only values of parameters the formula
    /// still uses.
    pub fn from_sheet(sheet: &ParamSheet, name: impl Into<String>, now: DateTime<Local>) -> Self {
        Self {
            name: name.into(),
            formula: sheet.formula().to_string(),
            is_3d: sheet.is_3d(),
            saved_at: now.fixed_offset(),
            param_values: sheet.relevant_values(),
        }
    }

    /// Loads the draft into a cleared sheet. Stored values are validated
    /// again, and invalid ones are kept with their error.
    pub fn apply(&self, sheet: &mut ParamSheet) {
        sheet.clear();
        sheet.set_formula(self.formula.as_str());
        for (name, value) in &self.param_values {
            let _ = sheet.set_value(name, value.as_str());
        }
        if self.is_3d {
            sheet.set_3d(true);
        }
    }
}

/// Name of the `n`th draft saved within the same second. The first one has
/// no counter.
pub fn draft_filename(now: DateTime<Local>, n: u32) -> String {
    let stamp = now.format("%Y-%m-%d_%H-%M-%S");
    match n {
        0 => format!("{}_draft-{stamp}.toml", env!("CARGO_PKG_NAME")),
        n => format!("{}_draft-{stamp}-{n}.toml", env!("CARGO_PKG_NAME")),
    }
}

const MAX_SAME_SECOND: u32 = 100;

/// Writes `draft` to a new timestamped file in `dir`. Existing files are
/// never overwritten: a name already taken gets a counter appended.
pub fn save_draft(dir: &Path, draft: &Draft, now: DateTime<Local>) -> Result<PathBuf, DraftErr> {
    let text = toml::to_string_pretty(draft)?;

    let mut n = 0;
    let (mut file, path) = loop {
        let path = dir.join(draft_filename(now, n));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => break (file, path),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists && n < MAX_SAME_SECOND => {
                n += 1;
            }
            Err(source) => return Err(DraftErr::Io { path, source }),
        }
    };

    let io_err = |source| DraftErr::Io {
        path: path.clone(),
        source,
    };
    file.write_all(text.as_bytes()).map_err(io_err)?;
    file.sync_data().map_err(io_err)?;

    info!(path = %path.display(), "saved draft");
    Ok(path)
}

pub fn load_draft(path: &Path) -> Result<Draft, DraftErr> {
    let text = fs::read_to_string(path).map_err(|source| DraftErr::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let draft = toml::from_str(&text).map_err(|source| DraftErr::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "loaded draft");
    Ok(draft)
}

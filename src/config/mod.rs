mod imports;
mod prop_types;
mod styles;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

pub use crate::config::imports::{CustomImportRule, ImportsConfig};
pub use crate::config::prop_types::PropTypesConfig;
pub use crate::config::styles::StylesConfig;

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub mode: Mode,
    pub imports: ImportsConfig,
    pub styles: StylesConfig,
    pub prop_types: PropTypesConfig,
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Compiles the per-category filename filters once per run. Invalid
    /// patterns surface here instead of deep inside a file walk.
    pub fn compile_filters(&self) -> Result<IgnoreFilters> {
        Ok(IgnoreFilters {
            imports: compile_ignore_filenames(&self.imports.ignore_filenames)?,
            styles: compile_ignore_filenames(&self.styles.ignore_filenames)?,
            prop_types: compile_ignore_filenames(&self.prop_types.ignore_filenames)?,
        })
    }
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    pub fn is_prod(&self) -> bool {
        matches!(self, Mode::Production)
    }
}

#[derive(Debug, Default)]
pub struct IgnoreFilters {
    pub imports: Option<Regex>,
    pub styles: Option<Regex>,
    pub prop_types: Option<Regex>,
}

fn compile_ignore_filenames(patterns: &[String]) -> Result<Option<Regex>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let pattern = format!("(?i){}", patterns.join("|"));
    Ok(Some(Regex::new(&pattern)?))
}

/// A file with no known path is always exempt; a category with no filter
/// never exempts a known path.
pub(crate) fn is_exempt(filename: Option<&str>, filter: Option<&Regex>) -> bool {
    match (filename, filter) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(filename), Some(filter)) => filter.is_match(filename),
    }
}

pub(crate) fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        One(T),
        Many(Vec<T>),
    }
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

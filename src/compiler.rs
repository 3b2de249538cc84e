use anyhow::Result;
use swc_core::common::sync::Lrc;
use swc_core::common::{Globals, SourceMap};

use crate::config::{Config, IgnoreFilters};

/// Per-run state shared by every pass: the normalized configuration, the
/// filename filters compiled from it, and the swc source map / globals.
pub struct Context {
    pub config: Config,
    pub filters: IgnoreFilters,
    pub meta: Meta,
}

impl Context {
    pub fn new(config: Config) -> Result<Self> {
        let filters = config.compile_filters()?;
        Ok(Self {
            config,
            filters,
            meta: Meta::new(),
        })
    }
}

impl Default for Context {
    fn default() -> Self {
        Self {
            config: Config::default(),
            filters: IgnoreFilters::default(),
            meta: Meta::new(),
        }
    }
}

pub struct Meta {
    pub script: ScriptMeta,
}

impl Meta {
    pub fn new() -> Self {
        Self {
            script: ScriptMeta::new(),
        }
    }
}

impl Default for Meta {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ScriptMeta {
    pub cm: Lrc<SourceMap>,
    pub globals: Globals,
}

impl ScriptMeta {
    pub fn new() -> Self {
        Self {
            cm: Default::default(),
            globals: Globals::default(),
        }
    }
}

impl Default for ScriptMeta {
    fn default() -> Self {
        Self::new()
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportsConfig {
    pub remove: bool,
    #[serde(deserialize_with = "crate::config::one_or_many")]
    pub ignore_libraries: Vec<String>,
    #[serde(deserialize_with = "crate::config::one_or_many")]
    pub ignore_filenames: Vec<String>,
    #[serde(deserialize_with = "crate::config::one_or_many")]
    pub custom_imports: Vec<CustomImportRule>,
}

impl Default for ImportsConfig {
    fn default() -> Self {
        Self {
            remove: true,
            ignore_libraries: vec!["react".to_string()],
            ignore_filenames: vec![],
            custom_imports: vec![],
        }
    }
}

/// Rewrites named imports of a library into one default import per symbol,
/// e.g. `import {Button} from 'antd'` -> `import Button from 'antd/lib/Button'`.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CustomImportRule {
    pub library_name: String,
    #[serde(default)]
    pub library_directory: Option<String>,
    #[serde(default)]
    pub custom_mapping: HashMap<String, String>,
}

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct PropTypesConfig {
    pub remove: bool,
    pub only_production: bool,
    #[serde(deserialize_with = "crate::config::one_or_many")]
    pub ignore_filenames: Vec<String>,
}

impl Default for PropTypesConfig {
    fn default() -> Self {
        Self {
            remove: true,
            only_production: true,
            ignore_filenames: vec![],
        }
    }
}

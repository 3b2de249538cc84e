use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct StylesConfig {
    pub remove: bool,
    #[serde(deserialize_with = "crate::config::one_or_many")]
    pub ignore_filenames: Vec<String>,
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            remove: true,
            ignore_filenames: vec![],
        }
    }
}

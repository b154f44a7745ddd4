//! Extraction settings: marker prefix and duplicate handling.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_prefix() -> String {
    "comp_".to_string()
}

/// What to do when two different fragments derive the same component name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    #[default]
    Overwrite,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExtractConfig {
    /// Class token prefix marking an element for extraction.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl ExtractConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.prefix.is_empty() {
            return Err(ConfigError::invalid("extract.prefix", "must not be empty"));
        }
        if self.prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::invalid(
                "extract.prefix",
                "class tokens cannot contain whitespace",
            ));
        }
        Ok(())
    }
}

//! Output settings: where components go and how they are laid out.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_out_dir() -> String {
    "build".to_string()
}

fn default_input_extension() -> String {
    "html".to_string()
}

fn default_fragment_extension() -> String {
    "svelte".to_string()
}

fn default_entry_name() -> String {
    "index".to_string()
}

fn default_app_root_name() -> String {
    "App".to_string()
}

const fn default_indent_width() -> usize {
    2
}

const fn default_print_width() -> usize {
    80
}

const fn default_validate() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory components are written to.
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Extension of source documents picked up by bulk conversion.
    #[serde(default = "default_input_extension")]
    pub input_extension: String,

    /// Extension of emitted components (also used in import paths).
    #[serde(default = "default_fragment_extension")]
    pub fragment_extension: String,

    /// Document name whose root component is renamed to `app_root_name`.
    #[serde(default = "default_entry_name")]
    pub entry_name: String,

    #[serde(default = "default_app_root_name")]
    pub app_root_name: String,

    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    #[serde(default = "default_print_width")]
    pub print_width: usize,

    /// Re-parse every emitted component with the Svelte grammar.
    #[serde(default = "default_validate")]
    pub validate_svelte: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            input_extension: default_input_extension(),
            fragment_extension: default_fragment_extension(),
            entry_name: default_entry_name(),
            app_root_name: default_app_root_name(),
            indent_width: default_indent_width(),
            print_width: default_print_width(),
            validate_svelte: default_validate(),
        }
    }
}

impl OutputConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.out_dir.trim().is_empty() {
            return Err(ConfigError::invalid("output.out_dir", "must not be empty"));
        }
        check_extension("output.input_extension", &self.input_extension)?;
        check_extension("output.fragment_extension", &self.fragment_extension)?;
        if self.entry_name.is_empty() {
            return Err(ConfigError::invalid("output.entry_name", "must not be empty"));
        }
        if self.app_root_name.is_empty() {
            return Err(ConfigError::invalid("output.app_root_name", "must not be empty"));
        }
        if self.indent_width == 0 {
            return Err(ConfigError::invalid("output.indent_width", "must be at least 1"));
        }
        if self.print_width == 0 {
            return Err(ConfigError::invalid("output.print_width", "must be at least 1"));
        }
        Ok(())
    }
}

fn check_extension(field: &str, extension: &str) -> Result<(), ConfigError> {
    if extension.is_empty() {
        return Err(ConfigError::invalid(field, "must not be empty"));
    }
    if extension.starts_with('.') {
        return Err(ConfigError::invalid(
            field,
            format!("write '{}' without the leading dot", &extension[1..]),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = OutputConfig::default();
        assert_eq!(config.out_dir, "build");
        assert_eq!(config.input_extension, "html");
        assert_eq!(config.fragment_extension, "svelte");
        assert_eq!(config.entry_name, "index");
        assert_eq!(config.app_root_name, "App");
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.print_width, 80);
        assert!(config.validate_svelte);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn dotted_extension_is_rejected() {
        let config = OutputConfig {
            fragment_extension: ".svelte".to_string(),
            ..OutputConfig::default()
        };
        let err = config.validate().expect_err("dotted extension");
        assert!(err.to_string().contains("without the leading dot"));
    }

    #[test]
    fn zero_indent_is_rejected() {
        let config = OutputConfig {
            indent_width: 0,
            ..OutputConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

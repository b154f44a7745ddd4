//! Engine options.

/// How the engine reacts when two different fragments derive the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep the later fragment and log a warning.
    #[default]
    Overwrite,
    /// Abort the conversion with `ParserError::DuplicateComponent`.
    Fail,
}

/// Layout options for the markup formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Spaces per nesting level.
    pub indent_width: usize,
    /// Elements whose one-line form is wider than this are broken up.
    pub print_width: usize,
    /// Re-parse each formatted component with the Svelte grammar.
    pub validate_svelte: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            print_width: 80,
            validate_svelte: true,
        }
    }
}

/// Everything the engine needs to convert one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Class token prefix marking an element for extraction.
    pub prefix: String,
    /// Extension used in synthesized import paths, without the dot.
    pub fragment_extension: String,
    /// Document name that is renamed to `app_root_name` when it is the root.
    pub entry_name: String,
    pub app_root_name: String,
    pub duplicate_policy: DuplicatePolicy,
    pub format: FormatOptions,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            prefix: "comp_".to_string(),
            fragment_extension: "svelte".to_string(),
            entry_name: "index".to_string(),
            app_root_name: "App".to_string(),
            duplicate_policy: DuplicatePolicy::default(),
            format: FormatOptions::default(),
        }
    }
}

impl ExtractOptions {
    /// Default options with a custom class prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }
}

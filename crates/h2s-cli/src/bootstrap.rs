use anyhow::Context;
use h2s_config::H2sConfig;
use h2s_parser::{DuplicatePolicy, ExtractOptions, FormatOptions};

pub fn load_config() -> anyhow::Result<H2sConfig> {
    H2sConfig::load_with_dotenv().context("failed to load h2s configuration")
}

/// Apply per-command flag overrides on top of the loaded config.
pub fn with_overrides(
    config: &H2sConfig,
    out_dir: Option<&str>,
    prefix: Option<&str>,
) -> anyhow::Result<H2sConfig> {
    let mut config = config.clone();
    if let Some(out_dir) = out_dir {
        config.output.out_dir = out_dir.to_string();
    }
    if let Some(prefix) = prefix {
        config.extract.prefix = prefix.to_string();
    }
    config
        .validate()
        .context("invalid command-line override")?;
    Ok(config)
}

/// Engine options derived from the effective config.
pub fn extract_options(config: &H2sConfig) -> ExtractOptions {
    let duplicate_policy = match config.extract.duplicate_policy {
        h2s_config::DuplicatePolicy::Overwrite => DuplicatePolicy::Overwrite,
        h2s_config::DuplicatePolicy::Fail => DuplicatePolicy::Fail,
    };

    ExtractOptions {
        prefix: config.extract.prefix.clone(),
        fragment_extension: config.output.fragment_extension.clone(),
        entry_name: config.output.entry_name.clone(),
        app_root_name: config.output.app_root_name.clone(),
        duplicate_policy,
        format: FormatOptions {
            indent_width: config.output.indent_width,
            print_width: config.output.print_width,
            validate_svelte: config.output.validate_svelte,
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_maps_to_default_options() {
        assert_eq!(extract_options(&H2sConfig::default()), ExtractOptions::default());
    }

    #[test]
    fn overrides_replace_prefix_and_out_dir() {
        let config = with_overrides(&H2sConfig::default(), Some("dist"), Some("ui-"))
            .expect("overrides apply");
        assert_eq!(config.output.out_dir, "dist");
        assert_eq!(config.extract.prefix, "ui-");
    }

    #[test]
    fn empty_prefix_override_is_rejected() {
        let err = with_overrides(&H2sConfig::default(), None, Some("")).expect_err("empty prefix");
        assert!(format!("{err:#}").contains("extract.prefix"));
    }

    #[test]
    fn fail_policy_is_carried_through() {
        let mut config = H2sConfig::default();
        config.extract.duplicate_policy = h2s_config::DuplicatePolicy::Fail;
        config.output.indent_width = 4;
        let options = extract_options(&config);
        assert_eq!(options.duplicate_policy, DuplicatePolicy::Fail);
        assert_eq!(options.format.indent_width, 4);
    }
}

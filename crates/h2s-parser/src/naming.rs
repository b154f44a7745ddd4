//! Component name derivation from class tokens and root document names.

/// Derive a `PascalCase` component name from a prefixed class token.
///
/// The prefix is stripped, the remainder split on `-`, and each segment's
/// first character uppercased: `comp_nav-bar-item` becomes `NavBarItem`.
/// Returns `None` when the token lacks the prefix, or when the result is not
/// an identifier starting with an uppercase letter (`comp_2col` would render
/// as `<2col />`, which Svelte reads as text).
#[must_use]
pub fn derive_component_name(class_token: &str, prefix: &str) -> Option<String> {
    let stem = class_token.strip_prefix(prefix)?;
    let name: String = stem.split('-').map(capitalize).collect();
    is_component_identifier(&name).then_some(name)
}

fn is_component_identifier(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Name the root component after its source document.
///
/// The conventional entry document (`index`) maps to the application root
/// name (`App`); any other name is kept as is. Extracted fragments never go
/// through this mapping.
#[must_use]
pub fn root_component_name(document_name: &str, entry_name: &str, app_root_name: &str) -> String {
    if document_name == entry_name {
        app_root_name.to_string()
    } else {
        document_name.to_string()
    }
}

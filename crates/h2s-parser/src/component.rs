//! Component finalization: import synthesis, script wrapping, formatting.

use std::fmt::Write;

use ast_grep_core::Node;

use crate::error::ParserError;
use crate::format::format_markup;
use crate::markup::{is_component_tag, tag_name};
use crate::options::ExtractOptions;
use crate::parser::{first_syntax_error, parse_html, parse_svelte};

/// Turn reduced markup into a finished Svelte component.
///
/// # Errors
/// Returns `ParserError::ParseFailed` if `markup` has syntax errors, or
/// `ParserError::FormatFailed` if the wrapped component cannot be formatted
/// or does not parse as Svelte.
pub fn finalize_component(markup: &str, options: &ExtractOptions) -> Result<String, ParserError> {
    let tree = parse_html(markup);
    let root = tree.root();
    if let Some(message) = first_syntax_error(&root) {
        return Err(ParserError::parse_failed("component", message));
    }

    let references = collect_component_refs(&root);
    let wrapped = wrap_component(&references, markup, &options.fragment_extension);
    let formatted = format_markup(&wrapped, &options.format)?;

    if options.format.validate_svelte {
        validate_svelte(&formatted)?;
    }
    Ok(formatted)
}

/// Distinct component reference tags (`<Name ... />`) in first-appearance order.
pub fn collect_component_refs<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<String> {
    let mut names = Vec::new();
    collect_refs(node, &mut names);
    names
}

fn collect_refs<D: ast_grep_core::Doc>(node: &Node<D>, names: &mut Vec<String>) {
    if node.kind().as_ref() == "self_closing_tag" {
        if let Some(name) = tag_name(node) {
            if is_component_tag(&name) && !names.contains(&name) {
                names.push(name);
            }
        }
        return;
    }
    for child in node.children() {
        collect_refs(&child, names);
    }
}

/// Wrap markup with a `<script>` block importing each referenced component.
///
/// With no references the script block is left out entirely.
#[must_use]
pub fn wrap_component(references: &[String], markup: &str, extension: &str) -> String {
    if references.is_empty() {
        return markup.to_string();
    }

    let mut out = String::from("<script>\n");
    for name in references {
        let _ = writeln!(out, "import {name} from './{name}.{extension}';");
    }
    out.push_str("</script>\n");
    out.push_str(markup);
    out
}

fn validate_svelte(component: &str) -> Result<(), ParserError> {
    let tree = parse_svelte(component);
    match first_syntax_error(&tree.root()) {
        Some(message) => Err(ParserError::FormatFailed(format!(
            "component is not valid Svelte: {message}"
        ))),
        None => Ok(()),
    }
}

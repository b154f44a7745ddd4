//! Single-block extraction: render one block as a component and splice the
//! document so the block is replaced by its reference tag.

use ast_grep_core::Node;

use crate::component::finalize_component;
use crate::error::ParserError;
use crate::markup::{attribute_value_node, class_attribute, is_element_kind, opening_tag, tag_name};
use crate::options::ExtractOptions;
use crate::parser::{first_syntax_error, parse_html};
use crate::types::{Block, Fragment};

/// Output of extracting one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub fragment: Fragment,
    /// The document with the block replaced by its reference tag.
    pub document: String,
    pub length_delta: isize,
}

/// Extract `block` from `document`.
///
/// # Errors
/// Returns `ParserError::ExtractionFailed` if the block range does not fit
/// the document, or any parse/format error raised while finalizing the
/// fragment.
pub fn extract_block(
    document: &str,
    block: &Block,
    options: &ExtractOptions,
) -> Result<Extraction, ParserError> {
    let markup = document.get(block.start..block.end).ok_or_else(|| {
        ParserError::ExtractionFailed(format!(
            "block {} range {}..{} is outside the document ({} bytes)",
            block.component_name,
            block.start,
            block.end,
            document.len()
        ))
    })?;

    let markup = strip_prefix_from_div_classes(markup, &options.prefix)?;
    let content = finalize_component(&markup, options)?;

    tracing::debug!(
        component = %block.component_name,
        start = block.start,
        end = block.end,
        "extractor: extracted block"
    );

    Ok(Extraction {
        fragment: Fragment::new(block.component_name.clone(), content),
        document: splice(document, block),
        length_delta: block.length_delta,
    })
}

/// Replace the block's range in `document` with its reference tag.
#[must_use]
pub fn splice(document: &str, block: &Block) -> String {
    let mut next = String::with_capacity(document.len());
    next.push_str(&document[..block.start]);
    next.push_str(&block.reference_tag);
    next.push_str(&document[block.end..]);
    next
}

/// Strip `prefix` from every class token that carries it on `div` elements.
///
/// Other elements keep their class attribute as written.
///
/// # Errors
/// Returns `ParserError::ParseFailed` if the fragment markup has syntax errors.
pub fn strip_prefix_from_div_classes(markup: &str, prefix: &str) -> Result<String, ParserError> {
    let tree = parse_html(markup);
    let root = tree.root();
    if let Some(message) = first_syntax_error(&root) {
        return Err(ParserError::parse_failed("fragment", message));
    }

    let mut edits = Vec::new();
    collect_class_edits(&root, prefix, &mut edits);
    if edits.is_empty() {
        return Ok(markup.to_string());
    }

    let mut out = markup.to_string();
    edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));
    for (range, replacement) in edits {
        out.replace_range(range, &replacement);
    }
    Ok(out)
}

type Edit = (std::ops::Range<usize>, String);

fn collect_class_edits<D: ast_grep_core::Doc>(node: &Node<D>, prefix: &str, edits: &mut Vec<Edit>) {
    if node.kind().as_ref() == "element" {
        if let Some(edit) = div_class_edit(node, prefix) {
            edits.push(edit);
        }
    }

    let children: Vec<_> = node.children().collect();
    for child in &children {
        if is_element_kind(&child.kind()) || child.kind().as_ref() == "document" {
            collect_class_edits(child, prefix, edits);
        }
    }
}

fn div_class_edit<D: ast_grep_core::Doc>(element: &Node<D>, prefix: &str) -> Option<Edit> {
    let tag = opening_tag(element)?;
    if !tag_name(&tag)?.eq_ignore_ascii_case("div") {
        return None;
    }
    let value = attribute_value_node(&class_attribute(&tag)?)?;
    let text = value.text();
    if !text.split_whitespace().any(|token| token.starts_with(prefix)) {
        return None;
    }

    let stripped = text
        .split_whitespace()
        .map(|token| token.strip_prefix(prefix).unwrap_or(token))
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Some((value.range(), stripped))
}

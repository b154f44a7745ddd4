//! Extraction planner: finds qualifying elements and orders them bottom-up.
//!
//! An element qualifies when the *first* token of its `class` attribute
//! starts with the configured prefix. The walk is post-order, so a nested
//! qualifying element always precedes the qualifying element that encloses
//! it, and siblings appear in document order.

use ast_grep_core::Node;

use crate::error::ParserError;
use crate::markup::{class_tokens, extract_tag_info, is_element_kind};
use crate::naming::derive_component_name;
use crate::parser::{first_syntax_error, parse_html};
use crate::types::Block;

/// Plan the extraction blocks for the current document.
///
/// # Errors
/// Returns `ParserError::ParseFailed` if the document has syntax errors.
pub fn plan(document: &str, prefix: &str) -> Result<Vec<Block>, ParserError> {
    let tree = parse_html(document);
    let root = tree.root();
    if let Some(message) = first_syntax_error(&root) {
        return Err(ParserError::parse_failed("document", message));
    }

    let mut blocks = Vec::new();
    collect_blocks(&root, prefix, 0, &mut blocks);
    tracing::debug!(count = blocks.len(), "planner: collected blocks");
    Ok(blocks)
}

fn collect_blocks<D: ast_grep_core::Doc>(
    node: &Node<D>,
    prefix: &str,
    level: i32,
    blocks: &mut Vec<Block>,
) {
    let children: Vec<_> = node.children().collect();
    for child in &children {
        if is_element_kind(&child.kind()) {
            collect_blocks(child, prefix, level + 1, blocks);
        }
    }

    if !is_element_kind(&node.kind()) {
        return;
    }
    if let Some(component_name) = qualifying_name(node, prefix) {
        blocks.push(Block::new(node.range(), component_name, level));
    }
}

/// The component name for `node` if its first class token carries the prefix.
fn qualifying_name<D: ast_grep_core::Doc>(node: &Node<D>, prefix: &str) -> Option<String> {
    let (_, attrs) = extract_tag_info(node)?;
    let tokens = class_tokens(&attrs);
    let first = tokens.first()?;
    derive_component_name(first, prefix)
}

//! Tree helpers for tree-sitter-html elements: tag names, attributes, classes.

use ast_grep_core::Node;

/// An HTML attribute: `(name, optional_value)`.
pub type HtmlAttr = (String, Option<String>);

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Node kinds that represent an element with a tag.
pub fn is_element_kind(kind: &str) -> bool {
    matches!(kind, "element" | "script_element" | "style_element")
}

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// The `start_tag` or `self_closing_tag` child of an element.
pub fn opening_tag<'r, D: ast_grep_core::Doc>(node: &Node<'r, D>) -> Option<Node<'r, D>> {
    node.children()
        .find(|c| matches!(c.kind().as_ref(), "start_tag" | "self_closing_tag"))
}

/// Tag name of an opening/closing tag node.
pub fn tag_name<D: ast_grep_core::Doc>(tag_node: &Node<D>) -> Option<String> {
    tag_node
        .children()
        .find(|c| c.kind().as_ref() == "tag_name")
        .map(|n| n.text().to_string())
}

/// Extract tag name and attributes from an element's opening tag.
pub fn extract_tag_info<D: ast_grep_core::Doc>(
    node: &Node<D>,
) -> Option<(String, Vec<HtmlAttr>)> {
    let tag = opening_tag(node)?;
    let name = tag_name(&tag)?;
    Some((name, extract_attrs(&tag)))
}

fn extract_attrs<D: ast_grep_core::Doc>(tag_node: &Node<D>) -> Vec<HtmlAttr> {
    tag_node
        .children()
        .filter(|c| c.kind().as_ref() == "attribute")
        .filter_map(|attr| {
            let name = attr
                .children()
                .find(|c| c.kind().as_ref() == "attribute_name")?;
            let value = attribute_value_node(&attr).map(|v| v.text().to_string());
            Some((name.text().to_string(), value))
        })
        .collect()
}

/// The value node of an attribute, quoted or not.
pub fn attribute_value_node<'r, D: ast_grep_core::Doc>(
    attr: &Node<'r, D>,
) -> Option<Node<'r, D>> {
    for child in attr.children() {
        match child.kind().as_ref() {
            "attribute_value" => return Some(child),
            "quoted_attribute_value" => {
                return child
                    .children()
                    .find(|c| c.kind().as_ref() == "attribute_value");
            }
            _ => {}
        }
    }
    None
}

/// The `class` attribute node on an opening tag.
pub fn class_attribute<'r, D: ast_grep_core::Doc>(tag_node: &Node<'r, D>) -> Option<Node<'r, D>> {
    tag_node.children().find(|attr| {
        attr.kind().as_ref() == "attribute"
            && attr
                .children()
                .find(|c| c.kind().as_ref() == "attribute_name")
                .is_some_and(|name| name.text().eq_ignore_ascii_case("class"))
    })
}

pub fn attr_value(attrs: &[HtmlAttr], name: &str) -> Option<String> {
    attrs
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .and_then(|(_, v)| v.clone())
}

/// Whitespace-separated class tokens of an element, in source order.
pub fn class_tokens(attrs: &[HtmlAttr]) -> Vec<String> {
    attr_value(attrs, "class")
        .map(|c| c.split_whitespace().map(String::from).collect())
        .unwrap_or_default()
}

/// Whether a tag name follows the component convention (leading uppercase).
pub fn is_component_tag(tag: &str) -> bool {
    tag.chars().next().is_some_and(char::is_uppercase)
}

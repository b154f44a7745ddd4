//! ast-grep wrapper: HTML and Svelte parsing plus syntax error detection.

mod svelte_lang;

use ast_grep_core::Node;
use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::SupportLang;

pub use svelte_lang::SvelteLang;

/// The concrete AST tree type returned by [`parse_html`].
pub type HtmlTree = ast_grep_core::AstGrep<StrDoc<SupportLang>>;

/// The concrete AST tree type returned by [`parse_svelte`].
pub type SvelteTree = ast_grep_core::AstGrep<StrDoc<SvelteLang>>;

/// Whether a file path carries the given extension (without the dot).
#[must_use]
pub fn has_extension(file_path: &str, extension: &str) -> bool {
    std::path::Path::new(file_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Parse markup into an ast-grep tree using the tree-sitter-html grammar.
#[must_use]
pub fn parse_html(source: &str) -> HtmlTree {
    use ast_grep_language::LanguageExt;
    SupportLang::Html.ast_grep(source)
}

/// Parse a Svelte component using the tree-sitter-svelte grammar.
#[must_use]
pub fn parse_svelte(source: &str) -> SvelteTree {
    use ast_grep_core::tree_sitter::LanguageExt;
    SvelteLang.ast_grep(source)
}

/// Describe the first syntax error under `node`, if any.
///
/// Walks in document order so the reported location is the earliest one.
/// Stray end tags (`erroneous_end_tag`) are not errors.
pub fn first_syntax_error<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<String> {
    let line = node.start_pos().line() + 1;
    if node.is_error() {
        let text = node.text();
        let snippet: String = text.chars().take(40).collect();
        return Some(format!("unexpected `{}` at line {line}", snippet.trim()));
    }
    if node.is_missing() {
        return Some(format!("missing `{}` at line {line}", node.kind()));
    }
    node.children().find_map(|child| first_syntax_error(&child))
}

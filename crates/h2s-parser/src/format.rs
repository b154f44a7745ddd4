//! Deterministic markup formatter for emitted components.
//!
//! Layout rules:
//!
//! - an element whose one-line rendering fits the print width (indent
//!   included) stays on one line, otherwise its children go on their own
//!   lines one level deeper
//! - `<script>` and `<style>` bodies are always broken out and re-indented
//!   line by line
//! - runs of whitespace in text collapse to one space; whether siblings were
//!   separated by whitespace in the source is preserved
//! - attributes, comments and the doctype are copied verbatim
//! - `<pre>` and `<textarea>` elements are copied byte for byte
//! - stray end tags the parser could not match are dropped
//! - the output ends with a single newline

use ast_grep_core::Node;

use crate::error::ParserError;
use crate::markup::{is_void_element, opening_tag, tag_name};
use crate::options::FormatOptions;
use crate::parser::{first_syntax_error, parse_html};

/// Format `source` as indented markup.
///
/// # Errors
/// Returns `ParserError::FormatFailed` if `source` has syntax errors.
pub fn format_markup(source: &str, options: &FormatOptions) -> Result<String, ParserError> {
    let tree = parse_html(source);
    let root = tree.root();
    if let Some(message) = first_syntax_error(&root) {
        return Err(ParserError::FormatFailed(message));
    }

    let items = build_items(&root, root.range().start, source);
    let mut printer = Printer::new(options);
    for item in &items {
        printer.block(&item.markup, 0);
    }
    Ok(printer.finish())
}

#[derive(Debug)]
enum Markup {
    Element {
        open: String,
        close: Option<String>,
        children: Vec<Item>,
    },
    Raw {
        open: String,
        body: String,
        close: String,
    },
    Text(String),
    Verbatim(String),
    /// Whitespace-significant element, printed exactly as written.
    Preformatted(String),
}

#[derive(Debug)]
struct Item {
    markup: Markup,
    /// Whitespace separated this item from its previous sibling in the source.
    spaced: bool,
}

/// Convert the content children of `node` (everything but its own tags).
fn build_items<D: ast_grep_core::Doc>(
    node: &Node<D>,
    content_start: usize,
    source: &str,
) -> Vec<Item> {
    let mut items = Vec::new();
    let mut previous_end = content_start;

    let children: Vec<_> = node.children().collect();
    for child in &children {
        let kind = child.kind();
        if matches!(
            kind.as_ref(),
            "start_tag" | "end_tag" | "self_closing_tag" | "erroneous_end_tag"
        ) {
            continue;
        }

        let range = child.range();
        let spaced = source
            .get(previous_end..range.start)
            .is_some_and(|gap| gap.chars().any(char::is_whitespace));
        previous_end = range.end;

        let markup = match kind.as_ref() {
            "element" => element_markup(child, source),
            "script_element" | "style_element" => raw_markup(child),
            "text" => Markup::Text(collapse_whitespace(&child.text())),
            "comment" | "doctype" => Markup::Verbatim(child.text().trim().to_string()),
            _ => Markup::Text(child.text().trim().to_string()),
        };
        if matches!(&markup, Markup::Text(text) if text.is_empty()) {
            continue;
        }
        items.push(Item { markup, spaced });
    }
    items
}

fn element_markup<D: ast_grep_core::Doc>(element: &Node<D>, source: &str) -> Markup {
    let Some(tag) = opening_tag(element) else {
        return Markup::Verbatim(element.text().trim().to_string());
    };
    let name = tag_name(&tag).unwrap_or_default();
    if is_preformatted(&name) {
        return Markup::Preformatted(element.text().to_string());
    }
    let attrs = render_attributes(&tag);

    if tag.kind().as_ref() == "self_closing_tag" {
        return Markup::Element {
            open: format!("<{name}{attrs} />"),
            close: None,
            children: Vec::new(),
        };
    }

    let close = if is_void_element(&name) {
        None
    } else {
        Some(format!("</{name}>"))
    };
    Markup::Element {
        open: format!("<{name}{attrs}>"),
        close,
        children: build_items(element, tag.range().end, source),
    }
}

fn is_preformatted(name: &str) -> bool {
    name.eq_ignore_ascii_case("pre") || name.eq_ignore_ascii_case("textarea")
}

fn raw_markup<D: ast_grep_core::Doc>(element: &Node<D>) -> Markup {
    let (name, open) = opening_tag(element).map_or_else(
        || ("script".to_string(), "<script>".to_string()),
        |tag| {
            let name = tag_name(&tag).unwrap_or_else(|| "script".to_string());
            let open = format!("<{name}{}>", render_attributes(&tag));
            (name, open)
        },
    );
    let body = element
        .children()
        .find(|c| c.kind().as_ref() == "raw_text")
        .map(|c| c.text().to_string())
        .unwrap_or_default();
    Markup::Raw {
        open,
        body,
        close: format!("</{name}>"),
    }
}

fn render_attributes<D: ast_grep_core::Doc>(tag: &Node<D>) -> String {
    tag.children()
        .filter(|c| c.kind().as_ref() == "attribute")
        .map(|attr| format!(" {}", attr.text()))
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Markup {
    /// One-line rendering, or `None` if this item must be broken out.
    fn flat(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Verbatim(text) | Self::Preformatted(text) => {
                (!text.contains('\n')).then(|| text.clone())
            }
            Self::Raw { .. } => None,
            Self::Element {
                open,
                close,
                children,
            } => {
                let mut line = open.clone();
                for (i, child) in children.iter().enumerate() {
                    if i > 0 && child.spaced {
                        line.push(' ');
                    }
                    line.push_str(&child.markup.flat()?);
                }
                if let Some(close) = close {
                    line.push_str(close);
                }
                Some(line)
            }
        }
    }
}

struct Printer<'a> {
    options: &'a FormatOptions,
    out: String,
}

impl<'a> Printer<'a> {
    const fn new(options: &'a FormatOptions) -> Self {
        Self {
            options,
            out: String::new(),
        }
    }

    fn line(&mut self, depth: usize, text: &str) {
        if !text.is_empty() {
            for _ in 0..depth * self.options.indent_width {
                self.out.push(' ');
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn block(&mut self, markup: &Markup, depth: usize) {
        let indent = depth * self.options.indent_width;
        if let Some(flat) = markup.flat() {
            if indent + flat.len() <= self.options.print_width {
                self.line(depth, &flat);
                return;
            }
        }

        match markup {
            Markup::Element {
                open,
                close,
                children,
            } => {
                self.line(depth, open);
                for child in children {
                    self.block(&child.markup, depth + 1);
                }
                if let Some(close) = close {
                    self.line(depth, close);
                }
            }
            Markup::Raw { open, body, close } => {
                let lines = dedent(body);
                if lines.is_empty() {
                    self.line(depth, &format!("{open}{close}"));
                } else {
                    self.line(depth, open);
                    for line in &lines {
                        self.line(depth + 1, line);
                    }
                    self.line(depth, close);
                }
            }
            Markup::Text(text) | Markup::Verbatim(text) => {
                for line in text.lines() {
                    self.line(depth, line.trim());
                }
            }
            Markup::Preformatted(text) => self.line(depth, text),
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Strip the common leading indentation and surrounding blank lines.
fn dedent(body: &str) -> Vec<&str> {
    let lines: Vec<&str> = body.lines().map(str::trim_end).collect();
    let Some(first) = lines.iter().position(|l| !l.is_empty()) else {
        return Vec::new();
    };
    let last = lines.iter().rposition(|l| !l.is_empty()).unwrap_or(first);
    let kept = &lines[first..=last];

    let margin = kept
        .iter()
        .copied()
        .filter(|l| !l.is_empty())
        .map(leading_indent)
        .min()
        .unwrap_or(0);
    kept.iter()
        .copied()
        .map(|l| if l.is_empty() { l } else { &l[margin..] })
        .collect()
}

fn leading_indent(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

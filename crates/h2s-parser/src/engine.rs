//! Orchestration loop: plan, extract one block, reconcile, repeat, finalize.
//!
//! ```text
//! planning → extracting → reconciling → planning …
//!          → finalizing → done
//! ```
//!
//! Each extracting step removes exactly one qualifying element from the
//! document, so a document with `k` qualifying elements drains after `k`
//! steps.

use std::collections::HashMap;
use std::fmt;

use crate::component::finalize_component;
use crate::error::ParserError;
use crate::extractor::extract_block;
use crate::naming::root_component_name;
use crate::options::{DuplicatePolicy, ExtractOptions};
use crate::planner::plan;
use crate::reconciler::reconcile;
use crate::types::{Block, Conversion, Fragment};

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// State of the orchestration loop for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Planning,
    Extracting,
    Reconciling,
    Finalizing,
    Done,
}

impl Phase {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Planning => &[Self::Extracting, Self::Finalizing],
            Self::Extracting => &[Self::Reconciling],
            Self::Reconciling => &[Self::Planning],
            Self::Finalizing => &[Self::Done],
            Self::Done => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Extracting => "extracting",
            Self::Reconciling => "reconciling",
            Self::Finalizing => "finalizing",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Single step
// ---------------------------------------------------------------------------

/// Result of one plan/extract/reconcile cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The document after the splice (unchanged if nothing qualified).
    pub document: String,
    /// The fragment extracted by this step, if any block was planned.
    pub fragment: Option<Fragment>,
    /// Blocks not yet extracted, with offsets valid for `document`.
    pub pending: Vec<Block>,
}

impl Step {
    #[must_use]
    pub const fn remaining_qualifying_count(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub const fn is_drained(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Run exactly one cycle against `document`: plan, pop the first block,
/// extract it, and reconcile the rest of the plan.
///
/// # Errors
/// Propagates planner and extractor failures.
pub fn convert_step(document: &str, options: &ExtractOptions) -> Result<Step, ParserError> {
    let mut blocks = plan(document, &options.prefix)?;
    if blocks.is_empty() {
        return Ok(Step {
            document: document.to_string(),
            fragment: None,
            pending: Vec::new(),
        });
    }

    let popped = blocks.remove(0);
    let extraction = extract_block(document, &popped, options)?;
    reconcile(&popped, &mut blocks);

    Ok(Step {
        document: extraction.document,
        fragment: Some(extraction.fragment),
        pending: blocks,
    })
}

// ---------------------------------------------------------------------------
// Name registry
// ---------------------------------------------------------------------------

/// Per-document record of emitted component names.
#[derive(Debug)]
pub struct NameRegistry {
    policy: DuplicatePolicy,
    fragments: Vec<Fragment>,
    by_name: HashMap<String, usize>,
}

impl NameRegistry {
    #[must_use]
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            fragments: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Record a fragment.
    ///
    /// A repeat of an identical fragment is dropped. A different fragment
    /// under a taken name replaces the earlier one or fails, per policy.
    ///
    /// # Errors
    /// Returns `ParserError::DuplicateComponent` under `DuplicatePolicy::Fail`.
    pub fn register(&mut self, fragment: Fragment) -> Result<(), ParserError> {
        let Some(&index) = self.by_name.get(&fragment.name) else {
            self.by_name.insert(fragment.name.clone(), self.fragments.len());
            self.fragments.push(fragment);
            return Ok(());
        };

        if self.fragments[index].content == fragment.content {
            tracing::debug!(component = %fragment.name, "registry: identical fragment, skipping");
            return Ok(());
        }

        match self.policy {
            DuplicatePolicy::Overwrite => {
                tracing::warn!(
                    component = %fragment.name,
                    "registry: different markup derived the same component name; overwriting"
                );
                self.fragments[index] = fragment;
                Ok(())
            }
            DuplicatePolicy::Fail => Err(ParserError::DuplicateComponent {
                name: fragment.name,
            }),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    #[must_use]
    pub fn into_fragments(self) -> Vec<Fragment> {
        self.fragments
    }
}

// ---------------------------------------------------------------------------
// Converter
// ---------------------------------------------------------------------------

/// Drives [`convert_step`] until the document is drained, then finalizes the
/// root component.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ExtractOptions,
}

impl Converter {
    #[must_use]
    pub const fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Convert `document` into a root component named after `document_name`
    /// plus every extracted fragment.
    ///
    /// # Errors
    /// Any parse, format, or duplicate-name failure aborts the conversion.
    pub fn convert(&self, document: &str, document_name: &str) -> Result<Conversion, ParserError> {
        let mut phase = Phase::Planning;
        let mut current = document.to_string();
        let mut registry = NameRegistry::new(self.options.duplicate_policy);
        let mut last_remaining: Option<usize> = None;

        loop {
            let step = convert_step(&current, &self.options)?;
            let Some(fragment) = step.fragment else {
                advance(&mut phase, Phase::Finalizing);
                break;
            };
            advance(&mut phase, Phase::Extracting);

            let remaining = step.pending.len();
            if last_remaining.is_some_and(|last| remaining >= last) {
                return Err(ParserError::ExtractionStalled {
                    name: fragment.name,
                });
            }
            last_remaining = Some(remaining);

            tracing::debug!(component = %fragment.name, remaining, "engine: emitted fragment");
            registry.register(fragment)?;
            current = step.document;

            advance(&mut phase, Phase::Reconciling);
            advance(&mut phase, Phase::Planning);
        }

        let root_name = root_component_name(
            document_name,
            &self.options.entry_name,
            &self.options.app_root_name,
        );
        let root = Fragment::new(root_name, finalize_component(&current, &self.options)?);
        advance(&mut phase, Phase::Done);

        Ok(Conversion {
            root,
            fragments: registry.into_fragments(),
        })
    }
}

fn advance(phase: &mut Phase, next: Phase) {
    debug_assert!(
        phase.can_transition_to(next),
        "invalid engine transition {phase} -> {next}"
    );
    tracing::trace!(from = %phase, to = %next, "engine: phase transition");
    *phase = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options() -> ExtractOptions {
        ExtractOptions::default()
    }

    // ── phase ──────────────────────────────────────────────────────

    #[test]
    fn phase_transitions() {
        assert!(Phase::Planning.can_transition_to(Phase::Extracting));
        assert!(Phase::Planning.can_transition_to(Phase::Finalizing));
        assert!(Phase::Extracting.can_transition_to(Phase::Reconciling));
        assert!(Phase::Reconciling.can_transition_to(Phase::Planning));
        assert!(Phase::Finalizing.can_transition_to(Phase::Done));
        assert!(!Phase::Extracting.can_transition_to(Phase::Finalizing));
        assert!(Phase::Done.allowed_next_states().is_empty());
    }

    #[test]
    fn phase_display() {
        assert_eq!(Phase::Reconciling.to_string(), "reconciling");
    }

    // ── single step ────────────────────────────────────────────────

    #[test]
    fn no_match_step_is_identity() {
        let source = "<main><div class=\"card\"><p>Hello</p></div></main>";
        let step = convert_step(source, &options()).expect("step");
        assert_eq!(step.remaining_qualifying_count(), 0);
        assert_eq!(step.fragment, None);
        assert_eq!(step.document, source);
    }

    #[test]
    fn single_card_scenario() {
        let source = "<div class=\"comp_card\"><span>Hi</span></div>";
        let step = convert_step(source, &options()).expect("step");
        assert!(step.is_drained());
        assert_eq!(step.document, "<Card />");

        let fragment = step.fragment.expect("fragment");
        assert_eq!(fragment.name, "Card");
        assert!(!fragment.content.contains("<script"));
        assert_eq!(fragment.content, "<div class=\"card\"><span>Hi</span></div>\n");
    }

    #[test]
    fn drains_within_qualifying_count_steps() {
        let source = include_str!("../tests/fixtures/landing.html");
        let k = plan(source, "comp_").expect("plan").len();
        assert!(k > 0);

        let mut document = source.to_string();
        let mut steps = 0;
        loop {
            let step = convert_step(&document, &options()).expect("step");
            steps += 1;
            let drained = step.is_drained();
            document = step.document;
            if drained {
                break;
            }
            assert!(steps < k, "should drain within {k} steps");
        }
        assert!(steps <= k);
        assert!(plan(&document, "comp_").expect("replan").is_empty());
    }

    #[test]
    fn sibling_extraction_preserves_remaining_content() {
        let source = concat!(
            "<div class=\"comp_a\">1</div>",
            "<div class=\"comp_bb\"><em>two</em></div>",
            "<div class=\"comp_ccc\"><ol><li>three</li></ol></div>"
        );
        let first = convert_step(source, &options()).expect("first");
        assert_eq!(first.remaining_qualifying_count(), 2);
        assert!(first.document.starts_with("<A /><div class=\"comp_bb\">"));
        assert_eq!(
            &first.document[first.pending[0].start..first.pending[0].end],
            "<div class=\"comp_bb\"><em>two</em></div>"
        );

        let second = convert_step(&first.document, &options()).expect("second");
        assert_eq!(
            second.fragment.expect("Bb").content,
            "<div class=\"bb\"><em>two</em></div>\n"
        );
        let third = convert_step(&second.document, &options()).expect("third");
        assert_eq!(
            third.fragment.expect("Ccc").content,
            "<div class=\"ccc\"><ol><li>three</li></ol></div>\n"
        );
        assert_eq!(third.document, "<A /><Bb /><Ccc />");
    }

    // ── registry ───────────────────────────────────────────────────

    #[test]
    fn registry_skips_identical_fragments() {
        let mut registry = NameRegistry::new(DuplicatePolicy::Fail);
        registry.register(Fragment::new("Card", "<div>x</div>\n")).expect("first");
        registry.register(Fragment::new("Card", "<div>x</div>\n")).expect("repeat");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registry_overwrites_by_default() {
        let mut registry = NameRegistry::new(DuplicatePolicy::default());
        registry.register(Fragment::new("Card", "<div>x</div>\n")).expect("first");
        registry.register(Fragment::new("Nav", "<nav></nav>\n")).expect("nav");
        registry.register(Fragment::new("Card", "<div>y</div>\n")).expect("overwrite");
        let fragments = registry.into_fragments();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0], Fragment::new("Card", "<div>y</div>\n"));
    }

    #[test]
    fn registry_fail_policy_rejects_conflicts() {
        let mut registry = NameRegistry::new(DuplicatePolicy::Fail);
        registry.register(Fragment::new("Card", "<div>x</div>\n")).expect("first");
        let result = registry.register(Fragment::new("Card", "<div>y</div>\n"));
        assert!(matches!(
            result,
            Err(ParserError::DuplicateComponent { ref name }) if name == "Card"
        ));
    }

    // ── converter ──────────────────────────────────────────────────

    #[test]
    fn converter_emits_descendants_before_ancestors() {
        let source = concat!(
            "<div class=\"comp_page\">",
            "<div class=\"comp_header\"><div class=\"comp_logo\">L</div></div>",
            "<div class=\"comp_footer\">F</div>",
            "</div>"
        );
        let conversion = Converter::default().convert(source, "home").expect("convert");
        assert_eq!(
            conversion.fragment_names(),
            vec!["Logo", "Header", "Footer", "Page"]
        );
        assert_eq!(conversion.root.name, "home");
        assert_eq!(
            conversion.root.content,
            concat!(
                "<script>\n",
                "  import Page from './Page.svelte';\n",
                "</script>\n",
                "<Page />\n"
            )
        );

        let header = conversion.fragment("Header").expect("Header");
        assert_eq!(
            header.content,
            concat!(
                "<script>\n",
                "  import Logo from './Logo.svelte';\n",
                "</script>\n",
                "<div class=\"header\"><Logo /></div>\n"
            )
        );
        let page = conversion.fragment("Page").expect("Page");
        assert!(page.content.contains("import Header from './Header.svelte';"));
        assert!(page.content.contains("import Footer from './Footer.svelte';"));
        assert!(!page.content.contains("import Logo"));
    }

    #[test]
    fn converter_renames_entry_root_only() {
        let source = "<main><div class=\"comp_index\">home</div></main>";
        let conversion = Converter::default().convert(source, "index").expect("convert");
        assert_eq!(conversion.root.name, "App");
        assert_eq!(conversion.fragment_names(), vec!["Index"]);
        assert!(conversion.root.content.contains("<main><Index /></main>"));
    }

    #[test]
    fn converter_without_matches_emits_only_root() {
        let source = "<p>plain</p>";
        let conversion = Converter::default().convert(source, "plain").expect("convert");
        assert!(conversion.fragments.is_empty());
        assert_eq!(conversion.root, Fragment::new("plain", "<p>plain</p>\n"));
    }

    #[test]
    fn converter_respects_custom_prefix() {
        let converter = Converter::new(ExtractOptions::with_prefix("ui-"));
        let conversion = converter
            .convert("<div class=\"ui-site-header\">x</div>", "page")
            .expect("convert");
        assert_eq!(conversion.fragment_names(), vec!["SiteHeader"]);
        assert_eq!(
            conversion.fragments[0].content,
            "<div class=\"site-header\">x</div>\n"
        );
    }

    #[test]
    fn converter_duplicate_names_fail_under_fail_policy() {
        let converter = Converter::new(ExtractOptions {
            duplicate_policy: DuplicatePolicy::Fail,
            ..ExtractOptions::default()
        });
        let source = "<div class=\"comp_item\">a</div><div class=\"comp_item\">b</div>";
        let result = converter.convert(source, "list");
        assert!(matches!(result, Err(ParserError::DuplicateComponent { .. })));
    }

    #[test]
    fn converter_identical_duplicates_are_emitted_once() {
        let source = "<ul><li class=\"comp_item\">a</li><li class=\"comp_item\">a</li></ul>";
        let conversion = Converter::default().convert(source, "list").expect("convert");
        assert_eq!(conversion.fragment_names(), vec!["Item"]);
        assert!(conversion.root.content.contains("<ul><Item /><Item /></ul>"));
    }

    #[test]
    fn converter_propagates_parse_failures() {
        let result = Converter::default().convert("<div class=\"comp_a\">1 < 2</div>", "bad");
        assert!(matches!(result, Err(ParserError::ParseFailed { .. })));
    }

    #[test]
    fn converter_tolerates_implicitly_closed_paragraph() {
        let source = "<div class=\"comp_a\"><p>one<div>two</div></p></div>";
        let conversion = Converter::default().convert(source, "index").expect("convert");
        assert_eq!(conversion.fragment_names(), vec!["A"]);
        assert!(conversion.root.content.contains("<A />"));
        let fragment = &conversion.fragments[0];
        assert_eq!(
            fragment.content,
            "<div class=\"a\"><p>one</p><div>two</div></div>\n"
        );
        assert!(!fragment.content.contains("</p></p>"));
    }

    #[test]
    fn converter_keeps_preformatted_content_exact() {
        let source = concat!(
            "<div class=\"comp_code\"><pre>line1\n    indented\n\nline4</pre>",
            "<textarea>a\n  b</textarea></div>"
        );
        let conversion = Converter::default().convert(source, "docs").expect("convert");
        let code = conversion.fragment("Code").expect("Code");
        assert!(
            code.content.contains("<pre>line1\n    indented\n\nline4</pre>"),
            "content: {}",
            code.content
        );
        assert!(code.content.contains("<textarea>a\n  b</textarea>"));
    }

    #[test]
    fn converter_handles_landing_fixture() {
        let source = include_str!("../tests/fixtures/landing.html");
        let conversion = Converter::default().convert(source, "index").expect("convert");
        assert_eq!(conversion.root.name, "App");
        assert!(!conversion.fragments.is_empty());
        for fragment in &conversion.fragments {
            assert!(
                !fragment.content.contains("comp_"),
                "{} still carries the marker prefix",
                fragment.name
            );
        }
        assert!(!conversion.root.content.contains("class=\"comp_"));
    }
}

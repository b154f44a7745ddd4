//! # h2s-parser
//!
//! ast-grep-based component extraction engine for html2svelte.
//!
//! Elements whose first class token carries a marker prefix (`comp_` by
//! default) are lifted out of an HTML document, innermost first, and each is
//! replaced by a self-closing reference tag. Every lifted fragment becomes a
//! Svelte component that imports the components it references.
//!
//! ```text
//! plan ─► extract one block ─► reconcile pending offsets ─► plan …
//!                                                  └─► finalize root
//! ```
//!
//! [`Converter`] drives the whole loop; [`convert_step`] exposes a single
//! cycle for callers that want to inspect intermediate documents.

pub mod component;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod format;
pub mod markup;
pub mod naming;
pub mod options;
pub mod parser;
pub mod planner;
pub mod reconciler;
pub mod types;

pub use engine::{Converter, NameRegistry, Phase, Step, convert_step};
pub use error::ParserError;
pub use extractor::{Extraction, extract_block};
pub use format::format_markup;
pub use options::{DuplicatePolicy, ExtractOptions, FormatOptions};
pub use parser::has_extension;
pub use planner::plan;
pub use reconciler::reconcile;
pub use types::{Block, Conversion, Fragment};

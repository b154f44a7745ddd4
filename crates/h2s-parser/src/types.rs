//! Core data types shared by the planner, extractor, and orchestration loop.

mod block;
mod fragment;

pub use block::Block;
pub use fragment::{Conversion, Fragment};

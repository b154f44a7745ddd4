use std::path::Path;

use h2s_parser::Conversion;
use serde::Serialize;

use crate::writer::PlannedWrite;

/// Outcome of converting one document.
#[derive(Debug, Serialize)]
pub struct ConversionReport {
    pub source: String,
    pub root: String,
    pub components: Vec<String>,
    pub files: Vec<String>,
    pub written: bool,
}

impl ConversionReport {
    pub fn new(source: &Path, conversion: &Conversion, writes: &[PlannedWrite], written: bool) -> Self {
        Self {
            source: source.display().to_string(),
            root: conversion.root.name.clone(),
            components: conversion
                .fragment_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            files: writes.iter().map(|w| w.path.display().to_string()).collect(),
            written,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FailedDocument {
    pub source: String,
    pub error: String,
}

#[derive(Debug, Default, Serialize)]
pub struct BulkReport {
    pub converted: Vec<ConversionReport>,
    pub failed: Vec<FailedDocument>,
}

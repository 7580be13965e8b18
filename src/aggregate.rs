//! Accumulation of per-file matches into one extraction result

use crate::extract::{ClientFieldMatch, HttpAnnotationMatch};
use serde::Serialize;

/// Everything extracted from one scan, in traversal order then match order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub annotations: Vec<HttpAnnotationMatch>,
    pub client_fields: Vec<ClientFieldMatch>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty() && self.client_fields.is_empty()
    }
}

/// Appends matches as files are visited. No deduplication, sorting, or
/// filtering: two identical occurrences stay two entries.
#[derive(Debug, Default)]
pub struct Aggregator {
    result: ExtractionResult,
    files_scanned: usize,
    files_skipped: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(
        &mut self,
        annotations: Vec<HttpAnnotationMatch>,
        client_fields: Vec<ClientFieldMatch>,
    ) {
        self.files_scanned += 1;
        self.result.annotations.extend(annotations);
        self.result.client_fields.extend(client_fields);
    }

    pub fn record_skipped(&mut self) {
        self.files_skipped += 1;
    }

    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    pub fn files_skipped(&self) -> usize {
        self.files_skipped
    }

    pub fn finish(self) -> ExtractionResult {
        self.result
    }
}

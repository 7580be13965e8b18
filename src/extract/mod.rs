//! Text extractors for smali disassembly
//!
//! Each extractor is a pure function from file text to an ordered list of
//! matches. Compiled patterns live inside the extractor value, so one instance
//! is built per scan and handed to the analyzer.

pub mod annotation;
pub mod client_field;
pub mod verb;

pub use annotation::{AnnotationExtractor, HttpAnnotationMatch};
pub use client_field::{ClientFieldExtractor, ClientFieldMatch};
pub use verb::{HttpVerb, UnknownVerb};

/// Extracts matches from one file's content, in order of appearance.
pub trait Extractor {
    type Match;

    fn extract(&self, content: &str) -> Vec<Self::Match>;
}

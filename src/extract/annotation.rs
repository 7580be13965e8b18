//! Retrofit HTTP verb annotation extractor
//!
//! Matches smali annotation blocks of the form
//!
//! ```text
//! .annotation runtime Lretrofit2/http/GET;
//!     value = "/api/v1/users"
//! .end annotation
//! ```
//!
//! Match semantics:
//! - the type token between `Lretrofit2/http/` and `;` must be uppercase ASCII
//!   letters and one of [`HttpVerb`]; other types are skipped
//! - the body runs to the *nearest* `.end annotation` (shortest match), so a
//!   nested block truncates at its first end marker
//! - a block with no end marker never matches

use super::verb::HttpVerb;
use super::Extractor;
use regex::Regex;
use serde::Serialize;
use tracing::trace;

const ANNOTATION_PATTERN: &str =
    r"(?s)\.annotation runtime Lretrofit2/http/([A-Z]+);(.*?)\.end annotation";

/// One Retrofit verb annotation occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpAnnotationMatch {
    pub method: HttpVerb,
    /// Untouched text between the annotation header and `.end annotation`.
    pub raw_body: String,
}

impl HttpAnnotationMatch {
    pub fn new(method: HttpVerb, raw_body: impl Into<String>) -> Self {
        Self {
            method,
            raw_body: raw_body.into(),
        }
    }

    /// The body with surrounding whitespace removed.
    pub fn value(&self) -> &str {
        self.raw_body.trim()
    }
}

pub struct AnnotationExtractor {
    pattern: Regex,
}

impl AnnotationExtractor {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(ANNOTATION_PATTERN).expect("valid regex"),
        }
    }
}

impl Default for AnnotationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for AnnotationExtractor {
    type Match = HttpAnnotationMatch;

    fn extract(&self, content: &str) -> Vec<HttpAnnotationMatch> {
        let mut matches = Vec::new();

        for cap in self.pattern.captures_iter(content) {
            let (Some(verb), Some(body)) = (cap.get(1), cap.get(2)) else {
                continue;
            };

            match verb.as_str().parse::<HttpVerb>() {
                Ok(method) => matches.push(HttpAnnotationMatch::new(method, body.as_str())),
                Err(err) => trace!(error = %err, "Skipping annotation block"),
            }
        }

        matches
    }
}

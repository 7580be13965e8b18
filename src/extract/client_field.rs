//! OkHttp3 field reference extractor
//!
//! A deliberately shallow, single-line match: from the `.field ` keyword up to
//! and including the first `Lokhttp3/` type reference on the same line. The
//! reference may follow a space or the `name:` colon of smali field syntax.

use super::Extractor;
use regex::Regex;
use serde::Serialize;

const CLIENT_FIELD_PATTERN: &str = r"\.field .*?[ :]Lokhttp3/";

/// Opaque declaration fragment referencing the OkHttp3 namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClientFieldMatch(pub String);

impl ClientFieldMatch {
    pub fn text(&self) -> &str {
        self.0.trim()
    }
}

pub struct ClientFieldExtractor {
    pattern: Regex,
}

impl ClientFieldExtractor {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(CLIENT_FIELD_PATTERN).expect("valid regex"),
        }
    }
}

impl Default for ClientFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for ClientFieldExtractor {
    type Match = ClientFieldMatch;

    fn extract(&self, content: &str) -> Vec<ClientFieldMatch> {
        self.pattern
            .find_iter(content)
            .map(|m| ClientFieldMatch(m.as_str().to_string()))
            .collect()
    }
}

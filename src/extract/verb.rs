//! The closed set of Retrofit HTTP verb annotations

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An HTTP verb carried by a `Lretrofit2/http/<VERB>;` annotation type.
///
/// Parsing is case-sensitive: only the uppercase spelling used by the
/// annotation type names is recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpVerb {
    pub const ALL: [HttpVerb; 7] = [
        HttpVerb::Get,
        HttpVerb::Post,
        HttpVerb::Put,
        HttpVerb::Delete,
        HttpVerb::Patch,
        HttpVerb::Head,
        HttpVerb::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Head => "HEAD",
            HttpVerb::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not a Retrofit HTTP verb: {0}")]
pub struct UnknownVerb(pub String);

impl FromStr for HttpVerb {
    type Err = UnknownVerb;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpVerb::ALL
            .into_iter()
            .find(|verb| verb.as_str() == s)
            .ok_or_else(|| UnknownVerb(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        get = { "GET", HttpVerb::Get },
        post = { "POST", HttpVerb::Post },
        put = { "PUT", HttpVerb::Put },
        delete = { "DELETE", HttpVerb::Delete },
        patch = { "PATCH", HttpVerb::Patch },
        head = { "HEAD", HttpVerb::Head },
        options = { "OPTIONS", HttpVerb::Options },
    )]
    fn test_parses_uppercase_verbs(token: &str, expected: HttpVerb) {
        assert_eq!(token.parse::<HttpVerb>(), Ok(expected));
        assert_eq!(expected.to_string(), token);
    }

    #[parameterized(
        lowercase = { "get" },
        mixed_case = { "Post" },
        generic_http = { "HTTP" },
        headers = { "HEADERS" },
        empty = { "" },
    )]
    fn test_rejects_unrecognized_tokens(token: &str) {
        assert_eq!(token.parse::<HttpVerb>(), Err(UnknownVerb(token.to_string())));
    }

    #[test]
    fn test_unknown_verb_is_an_error() {
        let err: Box<dyn std::error::Error> = Box::new("get".parse::<HttpVerb>().unwrap_err());
        assert_eq!(err.to_string(), "not a Retrofit HTTP verb: get");
    }

    #[test]
    fn test_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&HttpVerb::Delete).unwrap(), "\"DELETE\"");
    }
}

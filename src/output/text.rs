//! Plain-text report

use crate::aggregate::ExtractionResult;

pub const ANNOTATIONS_HEADER: &str = "HTTP Method Annotations:";
pub const CLIENT_FIELDS_HEADER: &str = "OkHttp3 Variables:";

/// Renders the two-section report. A section appears only when it has
/// entries; an empty result renders as an empty string.
pub fn render(result: &ExtractionResult) -> String {
    let mut output = String::new();

    if !result.annotations.is_empty() {
        output.push_str(ANNOTATIONS_HEADER);
        output.push('\n');
        for annotation in &result.annotations {
            output.push_str(&format!("HTTP Method: {}\n", annotation.method));
            output.push_str(&format!("Value: {}\n\n", annotation.value()));
        }
    }

    if !result.client_fields.is_empty() {
        output.push_str(CLIENT_FIELDS_HEADER);
        output.push('\n');
        for field in &result.client_fields {
            output.push_str(&format!("OkHttp3 Variable: {}\n\n", field.text()));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{ClientFieldMatch, HttpAnnotationMatch, HttpVerb};

    #[test]
    fn test_empty_result_renders_empty_string() {
        assert_eq!(render(&ExtractionResult::default()), "");
    }

    #[test]
    fn test_full_report() {
        let result = ExtractionResult {
            annotations: vec![
                HttpAnnotationMatch::new(HttpVerb::Get, "\n    value = \"/users\"\n"),
                HttpAnnotationMatch::new(HttpVerb::Post, " /login "),
            ],
            client_fields: vec![ClientFieldMatch(
                ".field private client:Lokhttp3/".to_string(),
            )],
        };

        let expected = "HTTP Method Annotations:\n\
                        HTTP Method: GET\n\
                        Value: value = \"/users\"\n\n\
                        HTTP Method: POST\n\
                        Value: /login\n\n\
                        OkHttp3 Variables:\n\
                        OkHttp3 Variable: .field private client:Lokhttp3/\n\n";

        assert_eq!(render(&result), expected);
    }

    #[test]
    fn test_only_client_fields() {
        let result = ExtractionResult {
            annotations: vec![],
            client_fields: vec![ClientFieldMatch(".field a:Lokhttp3/".to_string())],
        };

        let output = render(&result);

        assert!(!output.contains(ANNOTATIONS_HEADER));
        assert!(output.starts_with(CLIENT_FIELDS_HEADER));
    }

    #[test]
    fn test_only_annotations() {
        let result = ExtractionResult {
            annotations: vec![HttpAnnotationMatch::new(HttpVerb::Delete, "/item")],
            client_fields: vec![],
        };

        let output = render(&result);

        assert_eq!(output, "HTTP Method Annotations:\nHTTP Method: DELETE\nValue: /item\n\n");
    }
}

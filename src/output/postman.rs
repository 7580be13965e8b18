//! Postman collection rendering
//!
//! Only annotation matches become requests. OkHttp3 field references are not
//! invokable requests and are left out of the collection.

use super::schema::{
    Folder, PostmanCollection, Request, RequestItem, ANNOTATION_FOLDER_NAME,
    BASE_URL_PLACEHOLDER,
};
use crate::aggregate::ExtractionResult;
use crate::extract::HttpAnnotationMatch;
use anyhow::{Context, Result};

/// Builds the collection. With no annotations the top-level `item` list is
/// empty rather than holding an empty folder.
pub fn build_collection(result: &ExtractionResult) -> PostmanCollection {
    let mut collection = PostmanCollection::new();

    if !result.annotations.is_empty() {
        collection.item.push(Folder {
            name: ANNOTATION_FOLDER_NAME.to_string(),
            item: result.annotations.iter().map(request_item).collect(),
        });
    }

    collection
}

/// Pretty-printed JSON with two-space indentation.
pub fn render(result: &ExtractionResult) -> Result<String> {
    serde_json::to_string_pretty(&build_collection(result))
        .context("Failed to serialize Postman collection to JSON")
}

fn request_item(annotation: &HttpAnnotationMatch) -> RequestItem {
    let method = annotation.method.as_str();
    RequestItem {
        name: format!("HTTP Method: {}", method),
        request: Request {
            method: method.to_string(),
            // The body is an opaque path suffix; nothing checks that it is a path.
            url: format!("{}{}", BASE_URL_PLACEHOLDER, annotation.value()),
        },
    }
}

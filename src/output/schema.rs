//! Postman collection v2.1 data structures
//!
//! Only the subset of the collection format needed to describe a folder of
//! requests with a method and a raw URL string.

use serde::{Deserialize, Serialize};

pub const COLLECTION_NAME: &str = "Retrofit Analysis";
pub const COLLECTION_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";
pub const ANNOTATION_FOLDER_NAME: &str = "HTTP Method Annotations";
/// Postman variable prefixed to every extracted path.
pub const BASE_URL_PLACEHOLDER: &str = "{{base_url}}";

/// Root of an importable collection document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanCollection {
    pub info: CollectionInfo,
    /// Top-level folders; empty when nothing was extracted.
    pub item: Vec<Folder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub schema: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,
    pub item: Vec<RequestItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestItem {
    pub name: String,
    pub request: Request,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    pub url: String,
}

impl PostmanCollection {
    pub fn new() -> Self {
        Self {
            info: CollectionInfo {
                name: COLLECTION_NAME.to_string(),
                schema: COLLECTION_SCHEMA.to_string(),
            },
            item: Vec::new(),
        }
    }
}

impl Default for PostmanCollection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection_shape() {
        let json = serde_json::to_value(PostmanCollection::new()).unwrap();

        assert_eq!(json["info"]["name"], COLLECTION_NAME);
        assert_eq!(json["info"]["schema"], COLLECTION_SCHEMA);
        assert_eq!(json["item"], serde_json::json!([]));
    }

    #[test]
    fn test_deserialize_collection() {
        let json = r#"{
            "info": {"name": "Retrofit Analysis", "schema": "s"},
            "item": [{"name": "f", "item": [
                {"name": "HTTP Method: GET", "request": {"method": "GET", "url": "{{base_url}}/x"}}
            ]}]
        }"#;

        let collection: PostmanCollection = serde_json::from_str(json).unwrap();

        assert_eq!(collection.item.len(), 1);
        assert_eq!(collection.item[0].item[0].request.url, "{{base_url}}/x");
    }
}

//! Wire-facing models.
//!
//! Field names on the wire (`imageUrl`, `imgloc`) are part of the public
//! contract and are preserved via serde renames; Rust-side names stay
//! idiomatic.

use serde::{Deserialize, Serialize};

/// Body of a successful upload response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// Body of a meaning-record request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeaningRequest {
    pub word: String,
    pub meaning: String,
    #[serde(rename = "imgloc")]
    pub image_location: String,
}

/// One stored meaning record. Never mutated after creation; the timestamp
/// is stamped by the record store at write time, independent of any
/// timestamp embedded in the image location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeaningRecord {
    pub word: String,
    pub timestamp: String,
    pub meaning: String,
    #[serde(rename = "imgloc")]
    pub image_location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_wire_name() {
        let response = UploadResponse {
            image_url: "https://bucket.s3.us-east-2.amazonaws.com/123-cat.png".to_string(),
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn test_meaning_request_wire_names() {
        let request: MeaningRequest = serde_json::from_str(
            r#"{"word":"gato","meaning":"cat","imgloc":"https://example.test/1-cat.png"}"#,
        )
        .expect("deserialize");
        assert_eq!(request.word, "gato");
        assert_eq!(request.image_location, "https://example.test/1-cat.png");
    }

    #[test]
    fn test_meaning_record_roundtrip() {
        let record = MeaningRecord {
            word: "gato".to_string(),
            timestamp: "1700000000000".to_string(),
            meaning: "cat".to_string(),
            image_location: "https://example.test/1-cat.png".to_string(),
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert!(json.get("imgloc").is_some());
        let back: MeaningRecord = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, record);
    }
}

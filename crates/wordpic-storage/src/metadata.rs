//! Object metadata assembly.

use crate::traits::ObjectMetadata;

/// Build the metadata attached to a stored object: caller-supplied request
/// fields first, then the derived `content_type` and `filename` fields.
///
/// The merge is an explicit two-step overwrite so the derived values always
/// win a name collision; untrusted request fields can never masquerade as
/// the file's real content type or name.
pub fn merge_object_metadata(
    caller_fields: &ObjectMetadata,
    content_type: &str,
    filename: &str,
) -> ObjectMetadata {
    let mut metadata = caller_fields.clone();
    metadata.insert("content_type".to_string(), content_type.to_string());
    metadata.insert("filename".to_string(), filename.to_string());
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_fields_pass_through() {
        let mut caller = ObjectMetadata::new();
        caller.insert("word".to_string(), "gato".to_string());
        caller.insert("meaning".to_string(), "cat".to_string());

        let merged = merge_object_metadata(&caller, "image/png", "cat.png");
        assert_eq!(merged.get("word").map(String::as_str), Some("gato"));
        assert_eq!(merged.get("meaning").map(String::as_str), Some("cat"));
        assert_eq!(merged.get("content_type").map(String::as_str), Some("image/png"));
        assert_eq!(merged.get("filename").map(String::as_str), Some("cat.png"));
    }

    #[test]
    fn test_derived_fields_win_collisions() {
        let mut caller = ObjectMetadata::new();
        caller.insert("content_type".to_string(), "application/x-evil".to_string());
        caller.insert("filename".to_string(), "spoofed.exe".to_string());

        let merged = merge_object_metadata(&caller, "image/jpeg", "dog.jpg");
        assert_eq!(merged.get("content_type").map(String::as_str), Some("image/jpeg"));
        assert_eq!(merged.get("filename").map(String::as_str), Some("dog.jpg"));
    }

    #[test]
    fn test_empty_caller_fields() {
        let merged = merge_object_metadata(&ObjectMetadata::new(), "image/png", "cat.png");
        assert_eq!(merged.len(), 2);
    }
}

//! Storage key derivation.
//!
//! Key formats: `{epoch_millis}-{filename}` for untargeted uploads,
//! `uploads/{ref_type}/{ref_id}/{epoch_millis}-{filename}` for uploads
//! scoped to a reference. The millisecond prefix gives monotonic-enough
//! uniqueness under the assumption that no two uploads of the identical
//! filename complete within the same millisecond on a single process; the
//! residual collision risk is accepted at this scale.

use chrono::Utc;

/// Flat key for an untargeted upload.
pub fn flat_key(filename: &str) -> String {
    format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        sanitize_component(filename)
    )
}

/// Reference-scoped key for an upload tied to a specific entity. Keys for
/// the same reference share the `uploads/{ref_type}/{ref_id}/` prefix.
pub fn reference_key(ref_type: &str, ref_id: &str, filename: &str) -> String {
    format!(
        "uploads/{}/{}/{}-{}",
        sanitize_component(ref_type),
        sanitize_component(ref_id),
        Utc::now().timestamp_millis(),
        sanitize_component(filename)
    )
}

/// Restrict a key component to `[A-Za-z0-9._-]` so request-supplied values
/// cannot introduce separators or traversal sequences into the key
/// namespace.
fn sanitize_component(component: &str) -> String {
    if component.contains("..") {
        return "file".to_string();
    }
    let sanitized: String = component
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches(|c| c == '.' || c == '_').is_empty() {
        "file".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_key_shape() {
        let key = flat_key("cat.png");
        assert!(key.ends_with("-cat.png"));
        let prefix = key.strip_suffix("-cat.png").unwrap();
        assert!(prefix.parse::<i64>().is_ok(), "prefix must be epoch millis");
    }

    #[test]
    fn test_reference_key_shape() {
        let key = reference_key("animal", "42", "dog.jpg");
        assert!(key.starts_with("uploads/animal/42/"));
        assert!(key.ends_with("-dog.jpg"));
        let middle = key
            .strip_prefix("uploads/animal/42/")
            .and_then(|rest| rest.strip_suffix("-dog.jpg"))
            .unwrap();
        assert!(middle.parse::<i64>().is_ok());
    }

    #[test]
    fn test_reference_keys_share_prefix() {
        let a = reference_key("animal", "42", "dog.jpg");
        let b = reference_key("animal", "42", "cat.png");
        assert!(a.starts_with("uploads/animal/42/"));
        assert!(b.starts_with("uploads/animal/42/"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_sanitize_component_passthrough() {
        assert_eq!(sanitize_component("cat.png"), "cat.png");
        assert_eq!(sanitize_component("my-file_2.jpg"), "my-file_2.jpg");
    }

    #[test]
    fn test_sanitize_component_separators() {
        assert_eq!(sanitize_component("a/b"), "a_b");
        assert_eq!(sanitize_component("hello world.png"), "hello_world.png");
    }

    #[test]
    fn test_sanitize_component_traversal() {
        assert_eq!(sanitize_component("../../etc/passwd"), "file");
        assert_eq!(sanitize_component(".."), "file");
    }

    #[test]
    fn test_sanitize_component_degenerate() {
        assert_eq!(sanitize_component(""), "file");
        assert_eq!(sanitize_component("???"), "file");
        assert_eq!(sanitize_component("."), "file");
    }
}

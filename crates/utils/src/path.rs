use chrono::Utc;

/// Sanitize a storage object path segment-by-segment, keeping only
/// `[A-Za-z0-9._-]` within each segment.
pub fn sanitize_object_path(path: &str) -> String {
    path.split('/')
        .map(sanitize_segment)
        .collect::<Vec<_>>()
        .join("/")
}

fn sanitize_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Build the conventional `{entity_id}/{timestamp}_{filename}` object path.
pub fn object_path_for(entity_id: &str, file_name: &str) -> String {
    let path = format!("{}/{}_{}", entity_id, Utc::now().timestamp_millis(), file_name);
    sanitize_object_path(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_disallowed_characters_per_segment() {
        assert_eq!(
            sanitize_object_path("abc 123/receipt (final).pdf"),
            "abc_123/receipt__final_.pdf"
        );
    }

    #[test]
    fn keeps_clean_paths_untouched() {
        assert_eq!(
            sanitize_object_path("9f1c/1700000000_logo.png"),
            "9f1c/1700000000_logo.png"
        );
    }

    #[test]
    fn object_path_contains_entity_prefix_and_filename() {
        let path = object_path_for("inv-42", "receipt.pdf");
        assert!(path.starts_with("inv-42/"));
        assert!(path.ends_with("_receipt.pdf"));
    }
}

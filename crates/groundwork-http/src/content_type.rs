//! Media types understood by the communicator.

/// JSON bodies and replies.
pub const APPLICATION_JSON: &str = "application/json";
/// Multipart forms; the boundary is appended by the client.
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";
/// Plain text.
pub const TEXT_PLAIN: &str = "text/plain";
/// HTML text.
pub const TEXT_HTML: &str = "text/html";

/// The media type of a `Content-Type` value, without parameters, lowercased.
pub fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// `application/json` or any `+json` structured suffix.
pub fn is_json(content_type: &str) -> bool {
    let media = media_type(content_type);
    media == APPLICATION_JSON || media.ends_with("+json")
}

/// Whether the media type is `text/*`.
pub fn is_text(content_type: &str) -> bool {
    media_type(content_type).starts_with("text/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_strips_parameters() {
        assert_eq!(media_type("Application/JSON; charset=utf-8"), "application/json");
    }

    #[test]
    fn test_is_json() {
        assert!(is_json("application/json"));
        assert!(is_json("application/problem+json"));
        assert!(!is_json("text/plain"));
    }

    #[test]
    fn test_is_text() {
        assert!(is_text(TEXT_HTML));
        assert!(!is_text(APPLICATION_JSON));
    }
}

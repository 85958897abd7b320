//! URL encoding utilities for constructing safe API paths.
//!
//! Dashboard ids come from user-supplied resource ids, so they are
//! percent-encoded before being interpolated into a path.
//!
//! ```
//! use cloudlogs_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("dash/1"), "dash%2F1");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in URL path segments.
///
/// RFC 3986 section 3.3 plus characters reserved in URI templates.
/// Slash and percent are always encoded.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'~')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for use as a single URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ids_pass_through() {
        assert_eq!(encode_path_segment("dash-1"), "dash-1");
        assert_eq!(encode_path_segment("AbC123xyz_0.9"), "AbC123xyz_0.9");
    }

    #[test]
    fn test_slash_is_encoded() {
        assert_eq!(encode_path_segment("a/b/c"), "a%2Fb%2Fc");
    }

    #[test]
    fn test_percent_is_encoded() {
        assert_eq!(encode_path_segment("id%20x"), "id%2520x");
    }

    #[test]
    fn test_query_and_fragment_are_encoded() {
        assert_eq!(encode_path_segment("id?x#y"), "id%3Fx%23y");
    }

    #[test]
    fn test_unicode_is_encoded_as_utf8() {
        assert_eq!(encode_path_segment("\u{00e9}"), "%C3%A9");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(encode_path_segment(""), "");
    }
}

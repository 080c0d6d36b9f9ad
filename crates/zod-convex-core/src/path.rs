//! Node paths for diagnostics.
//!
//! Paths are JSON Pointers (RFC 6901) rooted at `#`, whose segments are the
//! Zod definition field names walked to reach a node: `#/shape/user/innerType`,
//! `#/options/1`, `#/items/0`. They appear in errors, in tracing events and in
//! the conversion report.

use std::borrow::Cow;

/// Root path of a conversion.
pub const ROOT: &str = "#";

/// Escape a single path segment per RFC 6901.
///
/// - `~` → `~0`
/// - `/` → `~1`
///
/// Returns `Cow::Borrowed` when no escaping is needed (the common case).
pub fn escape_pointer_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains('~') || segment.contains('/') {
        Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Build a path by appending escaped segments to a parent path.
///
/// # Example
/// ```
/// use zod_convex_core::build_path;
/// assert_eq!(build_path("#", &["shape", "a/b"]), "#/shape/a~1b");
/// ```
pub fn build_path(parent: &str, segments: &[&str]) -> String {
    let mut path = parent.to_string();
    for segment in segments {
        path.push('/');
        path.push_str(&escape_pointer_segment(segment));
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_plain_segment_borrows() {
        assert!(matches!(escape_pointer_segment("name"), Cow::Borrowed("name")));
    }

    #[test]
    fn test_escape_tilde_before_slash() {
        assert_eq!(escape_pointer_segment("a~/b"), "a~0~1b");
    }

    #[test]
    fn test_build_nested_path() {
        let shape = build_path(ROOT, &["shape", "tags"]);
        assert_eq!(build_path(&shape, &["element"]), "#/shape/tags/element");
    }
}

//! Endpoint path expansion.

/// Placeholder replaced by the user identifier.
pub const UID_PLACEHOLDER: &str = "{uid}";

/// A request path as a list of unencoded segments.
///
/// Segments are percent-encoded individually when appended to the base URL,
/// so a uid containing `/`, `?` or spaces always stays one segment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiPath {
    segments: Vec<String>,
}

impl ApiPath {
    /// Builds a path from a template with no placeholders.
    #[must_use]
    pub fn new(template: &str) -> Self {
        Self::expand(template, None)
    }

    /// Builds a path from a template, substituting `{uid}` in every segment.
    ///
    /// Without a uid the placeholder is left as-is.
    #[must_use]
    pub fn expand(template: &str, uid: Option<&str>) -> Self {
        let segments = template
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match uid {
                Some(uid) => segment.replace(UID_PLACEHOLDER, uid),
                None => segment.to_string(),
            })
            .collect();
        Self { segments }
    }

    /// Builds a path for a specific user.
    #[must_use]
    pub fn for_user(template: &str, uid: &str) -> Self {
        Self::expand(template, Some(uid))
    }

    /// Returns the first segment that is `.` or `..`, if any.
    ///
    /// URL parsing drops such segments even when percent-encoded, so a path
    /// carrying one cannot address the intended resource.
    #[must_use]
    pub fn dot_segment(&self) -> Option<&str> {
        self.segments
            .iter()
            .map(String::as_str)
            .find(|segment| matches!(*segment, "." | ".."))
    }

    /// Returns the unencoded segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl From<&str> for ApiPath {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl std::fmt::Display for ApiPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_uid() {
        let path = ApiPath::for_user("/users/{uid}/trash", "john_doe");
        assert_eq!(path.segments(), ["users", "john_doe", "trash"]);
        assert_eq!(path.to_string(), "/users/john_doe/trash");
    }

    #[test]
    fn test_uid_with_slash_stays_one_segment() {
        let path = ApiPath::for_user("/users/{uid}", "a/b");
        assert_eq!(path.segments(), ["users", "a/b"]);
    }

    #[test]
    fn test_dot_segment() {
        assert_eq!(ApiPath::for_user("/users/{uid}", "..").dot_segment(), Some(".."));
        assert_eq!(ApiPath::for_user("/users/{uid}/trash", ".").dot_segment(), Some("."));
        assert_eq!(ApiPath::for_user("/users/{uid}", "...").dot_segment(), None);
        assert_eq!(ApiPath::for_user("/users/{uid}", "a.b").dot_segment(), None);
    }

    #[test]
    fn test_plain_template() {
        let path = ApiPath::from("/users/me");
        assert_eq!(path.segments(), ["users", "me"]);
        assert_eq!(ApiPath::new("/").segments().len(), 0);
    }
}

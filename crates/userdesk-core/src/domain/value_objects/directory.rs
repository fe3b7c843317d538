//! Directory value object.

use crate::DirectoryId;
use serde::{Deserialize, Serialize};

/// Server-side directory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRef {
    /// Server id of the directory.
    pub id: DirectoryId,
    /// Directory name.
    pub name: String,
}

/// The directory a user belongs to.
///
/// Clients author a plain name; the server answers with a structured record.
/// Only the name is ever transmitted on a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Directory {
    /// Client-authored directory name.
    Name(String),
    /// Directory record returned by the server.
    Reference(DirectoryRef),
}

impl Directory {
    /// Returns the canonical directory name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Reference(reference) => &reference.name,
        }
    }
}

impl From<&str> for Directory {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Directory {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name_from_either_shape() {
        let plain: Directory = serde_json::from_value(json!("eng")).unwrap();
        assert_eq!(plain, Directory::Name("eng".to_string()));
        assert_eq!(plain.name(), "eng");

        let reference: Directory = serde_json::from_value(json!({"id": 1, "name": "eng"})).unwrap();
        assert!(matches!(reference, Directory::Reference(_)));
        assert_eq!(reference.name(), "eng");
    }
}

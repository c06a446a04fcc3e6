//! Document Store Handle
//!
//! Addresses documents in the project's default database. The client never
//! talks to the store directly; it only hands out resource paths.

use crate::error::{ClientError, ClientResult};

pub const DEFAULT_DATABASE: &str = "(default)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStore {
    project_id: String,
    database: String,
}

impl DocumentStore {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// `projects/{project}/databases/{database}/documents`
    pub fn root(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.project_id, self.database
        )
    }

    /// Path of a collection; segments alternate collection / document id
    /// and must end on a collection (odd count)
    pub fn collection(&self, segments: &[&str]) -> ClientResult<String> {
        if segments.len() % 2 == 0 {
            return Err(ClientError::InvalidPath(format!(
                "collection path needs an odd number of segments, got {}",
                segments.len()
            )));
        }
        self.join(segments)
    }

    /// Path of a document; needs an even, non-zero segment count
    pub fn document(&self, segments: &[&str]) -> ClientResult<String> {
        if segments.is_empty() || segments.len() % 2 != 0 {
            return Err(ClientError::InvalidPath(format!(
                "document path needs an even number of segments, got {}",
                segments.len()
            )));
        }
        self.join(segments)
    }

    fn join(&self, segments: &[&str]) -> ClientResult<String> {
        let mut path = self.root();
        for segment in segments {
            if segment.trim().is_empty() || segment.contains('/') {
                return Err(ClientError::InvalidPath(format!(
                    "invalid path segment `{segment}`"
                )));
            }
            path.push('/');
            path.push_str(segment);
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let store = DocumentStore::new("todo-app");
        assert_eq!(
            store.root(),
            "projects/todo-app/databases/(default)/documents"
        );
        assert_eq!(
            store.collection(&["users", "u-1", "tasks"]).unwrap(),
            "projects/todo-app/databases/(default)/documents/users/u-1/tasks"
        );
        assert_eq!(
            store.document(&["users", "u-1"]).unwrap(),
            "projects/todo-app/databases/(default)/documents/users/u-1"
        );
    }

    #[test]
    fn test_invalid_paths() {
        let store = DocumentStore::new("todo-app");
        assert!(store.collection(&["users", "u-1"]).is_err());
        assert!(store.document(&[]).is_err());
        assert!(store.document(&["users"]).is_err());
        assert!(store.document(&["users", "a/b"]).is_err());
        assert!(store.document(&["users", " "]).is_err());
    }
}

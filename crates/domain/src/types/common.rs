//! Wrapper records shared by every resource kind.

use serde::{Deserialize, Serialize};

/// Singleton reference record `{"id": "..."}`.
///
/// The array rejects bare string references; every pointer to another
/// resource travels in this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: String,
}

impl IdRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl From<&str> for IdRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Single-instance response envelope: `{"content": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance<T> {
    pub content: T,
}

/// Collection response envelope: `{"entries": [{"content": {...}}, ...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub entries: Vec<Instance<T>>,
}

impl<T> Collection<T> {
    /// Unwrap the entry envelopes, preserving page order.
    pub fn into_contents(self) -> Vec<T> {
        self.entries.into_iter().map(|e| e.content).collect()
    }
}

/// Health descriptor attached to most resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    #[serde(default)]
    pub value: i32,
    #[serde(default)]
    pub description_ids: Vec<String>,
    #[serde(default)]
    pub descriptions: Vec<String>,
}

/// Response to the type-level storage-resource create actions:
/// `{"content": {"storageResource": {"id": "..."}}}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageResourceCreated {
    pub storage_resource: IdRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_ref_serializes_as_singleton_record() {
        let json = serde_json::to_string(&IdRef::new("pool_1")).expect("json");
        assert_eq!(json, r#"{"id":"pool_1"}"#);
    }

    #[test]
    fn collection_defaults_to_empty_entries() {
        let coll: Collection<IdRef> = serde_json::from_str("{}").expect("collection");
        assert!(coll.entries.is_empty());
    }

    #[test]
    fn collection_preserves_entry_order() {
        let body = r#"{"entries":[{"content":{"id":"a"}},{"content":{"id":"b"}}]}"#;
        let coll: Collection<IdRef> = serde_json::from_str(body).expect("collection");
        let ids: Vec<String> = coll.into_contents().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}

//! Grants dataset — the static permission-delegation records the chat
//! context is built from.
//!
//! The dataset file has an externally defined shape:
//!
//! ```json
//! {
//!   "granterGrants": [{ "granter": "...", "permission": "...", "expiration": "..." }],
//!   "granteeGrants": [{ "grantee": "...", "permission": "...", "expiration": "..." }]
//! }
//! ```
//!
//! No schema validation happens on load. Individual entries are kept as raw
//! JSON and only checked for the keys they need when the context is rendered.

pub mod context;
pub mod loader;
pub mod store;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Raised when an individual grant cannot be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("{collection}[{index}] is missing field `{field}`")]
    MissingField {
        collection: &'static str,
        index: usize,
        field: &'static str,
    },
}

/// The dataset could not be loaded (missing, unreadable, or empty).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("grants dataset unavailable at {}", path.display())]
pub struct DatasetUnavailable {
    pub path: PathBuf,
}

/// One grant entry, kept as the raw JSON value from the dataset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantRecord(Value);

impl GrantRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Builds a record with the three fields a rendered grant line needs.
    pub fn from_parts(address_key: &str, address: &str, permission: &str, expiration: &str) -> Self {
        let mut map = Map::new();
        map.insert(address_key.to_string(), Value::String(address.to_string()));
        map.insert("permission".into(), Value::String(permission.to_string()));
        map.insert("expiration".into(), Value::String(expiration.to_string()));
        Self(Value::Object(map))
    }

    /// Look up a field as display text.
    ///
    /// Strings render verbatim; any other JSON value renders as its JSON
    /// text. Returns `None` when the key is absent or the entry is not an
    /// object.
    pub fn field(&self, name: &str) -> Option<String> {
        match self.0.as_object()?.get(name)? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// In-memory copy of the grants dataset file.
///
/// Either collection may be absent from the source document; accessors
/// treat an absent collection as empty. Keys other than the two
/// collections are preserved but otherwise ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantsDataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    granter_grants: Option<Vec<GrantRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    grantee_grants: Option<Vec<GrantRecord>>,
    #[serde(flatten)]
    other: Map<String, Value>,
}

impl GrantsDataset {
    pub fn new(granter_grants: Vec<GrantRecord>, grantee_grants: Vec<GrantRecord>) -> Self {
        Self {
            granter_grants: Some(granter_grants),
            grantee_grants: Some(grantee_grants),
            other: Map::new(),
        }
    }

    /// Grants issued by the actor.
    pub fn granter_grants(&self) -> &[GrantRecord] {
        self.granter_grants.as_deref().unwrap_or_default()
    }

    /// Grants received by the actor.
    pub fn grantee_grants(&self) -> &[GrantRecord] {
        self.grantee_grants.as_deref().unwrap_or_default()
    }

    /// True when the source document had no top-level keys at all.
    ///
    /// A document with both collections present but empty is *not* empty.
    pub fn is_empty(&self) -> bool {
        self.granter_grants.is_none() && self.grantee_grants.is_none() && self.other.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn default_dataset_is_empty() {
        assert!(GrantsDataset::default().is_empty());
    }

    #[test]
    fn empty_collections_are_not_an_empty_dataset() {
        let dataset: GrantsDataset =
            serde_json::from_value(json!({"granterGrants": [], "granteeGrants": []})).unwrap();
        assert!(!dataset.is_empty());
        assert!(dataset.granter_grants().is_empty());
        assert!(dataset.grantee_grants().is_empty());
    }

    #[test]
    fn unrelated_keys_count_as_loaded() {
        let dataset: GrantsDataset = serde_json::from_value(json!({"version": 2})).unwrap();
        assert!(!dataset.is_empty());
        assert!(dataset.granter_grants().is_empty());
    }

    #[test]
    fn null_collection_counts_as_absent() {
        let dataset: GrantsDataset = serde_json::from_value(json!({"granterGrants": null})).unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.granter_grants().is_empty());
    }

    #[test]
    fn missing_collection_reads_as_empty() {
        let dataset: GrantsDataset = serde_json::from_value(json!({
            "granterGrants": [{"granter": "addr1", "permission": "Vote", "expiration": "2025-01-01"}]
        }))
        .unwrap();
        assert_eq!(dataset.granter_grants().len(), 1);
        assert!(dataset.grantee_grants().is_empty());
    }

    #[test]
    fn field_renders_strings_verbatim_and_scalars_as_json() {
        let record = GrantRecord::new(json!({"permission": "Vote", "expiration": 1735689600}));
        assert_eq!(record.field("permission").as_deref(), Some("Vote"));
        assert_eq!(record.field("expiration").as_deref(), Some("1735689600"));
        assert_eq!(record.field("granter"), None);
    }

    #[test]
    fn field_on_non_object_entry_is_none() {
        let record = GrantRecord::new(json!("not a grant"));
        assert_eq!(record.field("permission"), None);
    }

    #[test]
    fn serializes_back_to_source_shape() {
        let source = json!({
            "granterGrants": [{"granter": "addr1", "permission": "Vote", "expiration": "2025-01-01"}],
            "granteeGrants": [],
            "updatedAt": "2024-06-01"
        });
        let dataset: GrantsDataset = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(serde_json::to_value(&dataset).unwrap(), source);
    }
}

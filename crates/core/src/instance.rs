//! Compute-instance metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::InstanceId;

/// Tag key holding the human-readable instance name.
pub const NAME_TAG: &str = "Name";

/// Name used when an instance carries no `Name` tag.
pub const UNNAMED: &str = "Unnamed";

/// Read-only view of an instance as returned by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceDescriptor {
    pub id: InstanceId,
    pub tags: BTreeMap<String, String>,
}

impl InstanceDescriptor {
    pub fn new(id: impl Into<InstanceId>) -> Self {
        Self {
            id: id.into(),
            tags: BTreeMap::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Build from the key/value pairs the service returns.
    ///
    /// When a key repeats, the first occurrence wins.
    pub fn from_pairs<I, K, V>(id: impl Into<InstanceId>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut tags = BTreeMap::new();
        for (k, v) in pairs {
            tags.entry(k.into()).or_insert_with(|| v.into());
        }
        Self { id: id.into(), tags }
    }

    pub fn name(&self) -> &str {
        self.tags.get(NAME_TAG).map(String::as_str).unwrap_or(UNNAMED)
    }
}

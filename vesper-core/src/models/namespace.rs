use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registry row backing `list_namespaces`/`namespace_stats`.
///
/// Every record in the data model is namespace-scoped; something has to own
/// the authoritative list of namespaces that have ever been written to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamespaceRecord {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl NamespaceRecord {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            created_at: now,
            last_active: now,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An audit record of a `share_context` copy between namespaces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Handoff {
    pub id: uuid::Uuid,
    pub from_namespace: String,
    pub to_namespace: String,
    pub filter: Option<String>,
    pub copied_count: u64,
    pub created_at: DateTime<Utc>,
}

impl Handoff {
    pub fn new(
        from_namespace: impl Into<String>,
        to_namespace: impl Into<String>,
        filter: Option<String>,
        copied_count: u64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            from_namespace: from_namespace.into(),
            to_namespace: to_namespace.into(),
            filter,
            copied_count,
            created_at: Utc::now(),
        }
    }
}

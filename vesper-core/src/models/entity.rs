use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A node in the semantic-tier knowledge graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    pub id: uuid::Uuid,
    pub namespace: String,
    /// Unique per (namespace, type).
    pub name: String,
    pub entity_type: EntityType,
    pub description: Option<String>,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
    pub access_count: u64,
}

impl Entity {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, entity_type: EntityType) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4(),
            namespace: namespace.into(),
            name: name.into(),
            entity_type,
            description: None,
            confidence: 1.0,
            created_at: now,
            last_accessed: now,
            access_count: 0,
        }
    }

    /// Record a read: bump `access_count` and refresh `last_accessed`.
    pub fn touch(&mut self) {
        self.access_count += 1;
        self.last_accessed = Utc::now();
    }
}

/// Entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Person,
    Project,
    Concept,
    Preference,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EntityType::Person => "person",
            EntityType::Project => "project",
            EntityType::Concept => "concept",
            EntityType::Preference => "preference",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "person" => Ok(EntityType::Person),
            "project" => Ok(EntityType::Project),
            "concept" => Ok(EntityType::Concept),
            "preference" => Ok(EntityType::Preference),
            other => Err(format!("invalid entity type: {other}")),
        }
    }
}

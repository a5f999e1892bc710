use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A temporally-scoped property value on an entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fact {
    pub id: uuid::Uuid,
    pub namespace: String,
    pub entity_id: uuid::Uuid,
    pub property: String,
    pub value: String,
    pub confidence: f64,
    pub valid_from: Option<DateTime<Utc>>,
    /// `None` means unbounded (valid_until = ∞).
    pub valid_until: Option<DateTime<Utc>>,
    pub source_conversation: Option<String>,
}

impl Fact {
    pub fn new(
        namespace: impl Into<String>,
        entity_id: uuid::Uuid,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            namespace: namespace.into(),
            entity_id,
            property: property.into(),
            value: value.into(),
            confidence: 1.0,
            valid_from: Some(Utc::now()),
            valid_until: None,
            source_conversation: None,
        }
    }

    /// Whether this fact's validity interval is still open (`valid_until` is `None`
    /// or in the future relative to `at`).
    pub fn is_open_ended(&self) -> bool {
        self.valid_until.is_none()
    }

    /// Whether `self` and `other`'s validity intervals overlap in time.
    pub fn overlaps(&self, other: &Fact) -> bool {
        let self_start = self.valid_from.unwrap_or(DateTime::<Utc>::MIN_UTC);
        let self_end = self.valid_until.unwrap_or(DateTime::<Utc>::MAX_UTC);
        let other_start = other.valid_from.unwrap_or(DateTime::<Utc>::MIN_UTC);
        let other_end = other.valid_until.unwrap_or(DateTime::<Utc>::MAX_UTC);
        self_start <= other_end && other_start <= self_end
    }
}

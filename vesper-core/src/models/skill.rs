use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reusable procedure in the Procedural Tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Skill {
    pub id: uuid::Uuid,
    pub namespace: String,
    pub name: String,
    /// ≤ ~50 tokens, for lazy injection.
    pub summary: String,
    pub description: String,
    pub category: String,
    /// Ordered, ≤5.
    pub triggers: Vec<String>,
    pub success_count: u64,
    pub failure_count: u64,
    pub avg_user_satisfaction: f64,
    pub code: Option<String>,
    pub code_type: CodeType,
    pub prerequisites: Vec<uuid::Uuid>,
    pub uses_skills: Vec<uuid::Uuid>,
    pub used_by_skills: Vec<uuid::Uuid>,
    /// 1024-dim unit vector, `None` until first embedded.
    pub embedding: Option<Vec<f32>>,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub last_used: Option<DateTime<Utc>>,
    pub version: u32,
}

impl Skill {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        summary: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4(),
            namespace: namespace.into(),
            name: name.into(),
            summary: summary.into(),
            description: description.into(),
            category: category.into(),
            triggers: Vec::new(),
            success_count: 0,
            failure_count: 0,
            avg_user_satisfaction: 0.0,
            code: None,
            code_type: CodeType::Reference,
            prerequisites: Vec::new(),
            uses_skills: Vec::new(),
            used_by_skills: Vec::new(),
            embedding: None,
            is_archived: false,
            created_at: now,
            last_modified: now,
            last_used: None,
            version: 1,
        }
    }

    /// `quality_score = avg_satisfaction × (success / (success+failure))`,
    /// with a 0.5× penalty when untested.
    pub fn quality_score(&self) -> f64 {
        let total = self.success_count + self.failure_count;
        if total == 0 {
            return self.avg_user_satisfaction * 0.5;
        }
        let success_ratio = self.success_count as f64 / total as f64;
        self.avg_user_satisfaction * success_ratio
    }

    pub fn record_success(&mut self, satisfaction: Option<f64>) {
        self.success_count += 1;
        if let Some(s) = satisfaction {
            self.rebase_satisfaction(s);
        }
        self.last_used = Some(Utc::now());
        self.last_modified = Utc::now();
    }

    pub fn record_failure(&mut self) {
        self.failure_count += 1;
        self.last_used = Some(Utc::now());
        self.last_modified = Utc::now();
    }

    fn rebase_satisfaction(&mut self, new_sample: f64) {
        let total = (self.success_count + self.failure_count).max(1) as f64;
        self.avg_user_satisfaction =
            ((self.avg_user_satisfaction * (total - 1.0)) + new_sample) / total;
    }

    /// Build the embedding source text: `name | description | category |
    /// triggers`. The concatenation order is fixed so embeddings stay
    /// stable across runs.
    pub fn embedding_text(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.name,
            self.description,
            self.category,
            self.triggers.join(", ")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeType {
    Inline,
    Reference,
}

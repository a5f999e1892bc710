use serde::{Deserialize, Serialize};

/// The query classification produced by the Smart Router's regex-first
/// classifier. The five-way split is a closed enum — the
/// router's dispatch table must handle every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryClass {
    Skill,
    Factual,
    Temporal,
    Preference,
    Project,
    Complex,
}

/// Where a merged result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Working,
    Semantic,
    Skill,
    Hybrid,
}

/// One merged, deduplicated result returned to the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedResult {
    pub id: String,
    pub content: String,
    pub score: f64,
    pub source: Provenance,
    /// Ordered relationship-type hops for PPR-with-facts results.
    pub path: Option<Vec<String>>,
    /// The trigger that matched, for skill-invocation results.
    pub matched_trigger: Option<String>,
}

/// The full router decision, returned alongside results for observability
/// and for the façade's `retrieve` response as its `route` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDecision {
    pub query_class: QueryClass,
    pub fast_path: bool,
}

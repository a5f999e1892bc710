/// Vesper system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Embedding vector dimensionality.
pub const EMBEDDING_DIM: usize = 1024;

/// Acceptable deviation from unit length for an embedding vector.
pub const UNIT_NORM_EPSILON: f64 = 1e-3;

/// Default namespace used when none is supplied.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Working Tier: max records retained per namespace.
pub const WORKING_TIER_CAPACITY: usize = 5;

/// Working Tier: TTL in seconds (7 days).
pub const WORKING_TIER_TTL_SECS: u64 = 604_800;

/// Fast-path similarity threshold for the router.
pub const ROUTER_FAST_PATH_THRESHOLD: f64 = 0.85;

/// Default deadline for a `retrieve` call, in milliseconds. Threaded through
/// the router and PPR as a `Deadline`, checked between iterations and at
/// I/O boundaries.
pub const RETRIEVE_DEADLINE_MS: u64 = 2_000;

/// PPR damping factor.
pub const PPR_DAMPING: f64 = 0.85;

/// PPR convergence threshold (L1 delta).
pub const PPR_CONVERGENCE_EPSILON: f64 = 1e-6;

/// PPR maximum iterations.
pub const PPR_MAX_ITERATIONS: usize = 50;

/// PPR maximum seed-to-result hop depth.
pub const PPR_MAX_DEPTH: usize = 2;

/// Weight multiplier applied to reverse edges during PPR traversal.
pub const PPR_REVERSE_EDGE_WEIGHT: f64 = 0.5;

/// Relationship decay half-life base, in days.
pub const DECAY_HALF_LIFE_DAYS: f64 = 30.0;

/// Reinforcement bump applied to relationship strength on new evidence.
pub const REINFORCEMENT_BUMP: f64 = 0.2;

/// Pruning rule thresholds.
pub const PRUNE_STRENGTH_THRESHOLD: f64 = 0.05;
pub const PRUNE_ACCESS_COUNT_THRESHOLD: u64 = 3;
pub const PRUNE_AGE_DAYS: i64 = 90;

/// Confidence ceiling applied to both facts in a detected conflict.
pub const CONFLICT_CONFIDENCE_CEILING: f64 = 0.5;

/// Co-occurrence count required before a skill pair's relational vector is materialized.
pub const SKILL_COOCCURRENCE_THRESHOLD: u32 = 2;

/// Maximum triggers retained per skill.
pub const MAX_SKILL_TRIGGERS: usize = 5;

/// Reciprocal rank fusion smoothing constant.
pub const RRF_K: u32 = 60;

/// Backup metadata default expiry, in days.
pub const BACKUP_EXPIRY_DAYS: i64 = 7;

/// Default daily consolidation trigger (local wall clock, 24h format).
pub const CONSOLIDATION_HOUR_UTC_LOCAL: u32 = 3;

/// Maximum batch size for bulk storage operations.
pub const MAX_BULK_BATCH_SIZE: usize = 1000;

/// Retry attempts for the embedding client transport.
pub const EMBEDDING_RETRY_ATTEMPTS: u32 = 3;

/// Collection name validation pattern, enforced in `vesper-vector`.
pub const COLLECTION_NAME_MAX_LEN: usize = 64;

/// The single Vector Index collection every namespace's memories are upserted
/// into (payload carries `namespace` for filtering at the façade).
pub const MEMORY_COLLECTION: &str = "vesper_memories";

//! # vesper-observability
//!
//! The ambient logging/health/metrics layer: `tracing` setup, structured
//! health reports, and consolidation metrics aggregation. Distinct from
//! distributed-deployment concerns like Prometheus scraping, TLS, or rate
//! limiting — this is local observability that ships alongside the engines
//! it instruments, not a peripheral policy layer bolted on from outside.

pub mod degradation;
pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use degradation::{DegradationEvent, DegradationTracker};
pub use health::{HealthReport, HealthReporter, HealthSnapshot, HealthStatus, SubsystemHealth};
pub use metrics::ConsolidationMetricsCollector;

//! # vesper-conflict
//!
//! The Conflict Detector: temporal, contradiction, and
//! preference-shift detection over entity facts, idempotent by unordered
//! fact pair and conflict type. A small registry of pattern-matching
//! strategies is tried in order of specificity; the first match wins.

mod detector;
mod strategies;

pub use detector::ConflictDetector;
pub use strategies::Detection;

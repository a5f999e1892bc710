use serde::{Deserialize, Serialize};

/// The error taxonomy surfaced to every caller of the memory service.
///
/// Every fallible operation in the system ultimately reports one of these
/// kinds so the transport layer can decide whether to retry, surface a
/// validation message, or treat the failure as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Conflict,
    Unavailable,
    Timeout,
    Cancelled,
    Internal,
}

impl ErrorKind {
    /// Whether a caller should retry an operation that failed with this kind.
    pub fn retryable(self) -> bool {
        matches!(self, ErrorKind::Unavailable | ErrorKind::Timeout)
    }
}

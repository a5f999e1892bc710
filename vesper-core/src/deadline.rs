//! Cooperative cancellation. A `Deadline` is threaded into long-running
//! operations (PPR, hybrid search) and checked between iterations and at
//! I/O boundaries rather than enforced by a background timer or a spawned
//! watchdog task.

use std::time::{Duration, Instant};

use crate::errors::{VesperError, VesperResult};

#[derive(Debug, Clone, Copy)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// No deadline: `check` always succeeds.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn after(duration: Duration) -> Self {
        Self(Some(Instant::now() + duration))
    }

    pub fn is_expired(&self) -> bool {
        matches!(self.0, Some(at) if Instant::now() >= at)
    }

    /// `Err(VesperError::Cancelled)` once the deadline has passed, `Ok(())`
    /// otherwise. Call at the top of each iteration/I-O boundary in a
    /// long-running operation.
    pub fn check(&self) -> VesperResult<()> {
        if self.is_expired() {
            Err(VesperError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_deadline_never_expires() {
        assert!(Deadline::none().check().is_ok());
    }

    #[test]
    fn a_deadline_already_in_the_past_is_expired() {
        let deadline = Deadline::after(Duration::from_millis(0));
        std::thread::sleep(Duration::from_millis(5));
        assert!(deadline.is_expired());
        assert!(matches!(deadline.check(), Err(VesperError::Cancelled)));
    }

    #[test]
    fn a_future_deadline_has_not_expired() {
        let deadline = Deadline::after(Duration::from_secs(60));
        assert!(deadline.check().is_ok());
    }
}

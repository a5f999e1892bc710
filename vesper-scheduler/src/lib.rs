//! # vesper-scheduler
//!
//! The Scheduler: triggers consolidation once, non-blocking,
//! at process start, and again every time local wall-clock crosses the
//! configured daily boundary (03:00 by default). Missed ticks — the process
//! was asleep or busy past the boundary — are coalesced into a single run.
//!
//! The scheduler never talks to storage or the graph directly; it drives an
//! injected [`ConsolidationRunner`] handle rather than a process-wide
//! global, so it can be unit-tested against a stub and wired to
//! `vesper-service::MemoryService` in the binary.

mod runner;
mod trigger;

pub use runner::ConsolidationRunner;
pub use trigger::DailyTrigger;

use std::sync::Arc;
use std::time::Duration;

use vesper_core::config::ConsolidationConfig;

/// Owns the background consolidation loop. Constructed once at startup and
/// handed a [`ConsolidationRunner`] implementation; `spawn` returns a
/// `JoinHandle` the caller can abort on shutdown.
pub struct Scheduler {
    runner: Arc<dyn ConsolidationRunner>,
    config: ConsolidationConfig,
    /// How often the background loop wakes to check the wall clock.
    poll_interval: Duration,
}

impl Scheduler {
    pub fn new(runner: Arc<dyn ConsolidationRunner>, config: ConsolidationConfig) -> Self {
        Self { runner, config, poll_interval: Duration::from_secs(60) }
    }

    #[cfg(test)]
    fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Spawn the background task. Non-blocking: returns immediately, the
    /// startup consolidation pass (if enabled) runs inside the spawned task.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        if self.config.run_on_startup {
            tracing::info!("vesper-scheduler: running startup consolidation pass");
            self.run_all_namespaces().await;
        }

        let mut trigger = DailyTrigger::new(self.config.daily_trigger_hour);
        loop {
            tokio::time::sleep(self.poll_interval).await;
            if trigger.check_and_arm(chrono::Local::now()) {
                tracing::info!(hour = self.config.daily_trigger_hour, "vesper-scheduler: daily trigger fired");
                self.run_all_namespaces().await;
            }
        }
    }

    async fn run_all_namespaces(&self) {
        let namespaces = match self.runner.namespaces().await {
            Ok(ns) => ns,
            Err(err) => {
                tracing::warn!(error = %err, "vesper-scheduler: failed to list namespaces, skipping this tick");
                return;
            }
        };
        for namespace in namespaces {
            match self.runner.run_consolidation(&namespace).await {
                Ok(stats) => {
                    tracing::info!(
                        namespace = %namespace,
                        memories_processed = stats.memories_processed,
                        entities_extracted = stats.entities_extracted,
                        conflicts_detected = stats.conflicts_detected,
                        duration_ms = stats.duration_ms,
                        "vesper-scheduler: consolidation complete"
                    );
                }
                Err(err) => {
                    tracing::warn!(namespace = %namespace, error = %err, "vesper-scheduler: consolidation failed for namespace");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use vesper_consolidation::ConsolidationStats;
    use vesper_core::VesperResult;

    struct StubRunner {
        namespaces: Vec<String>,
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl ConsolidationRunner for StubRunner {
        async fn namespaces(&self) -> VesperResult<Vec<String>> {
            Ok(self.namespaces.clone())
        }

        async fn run_consolidation(&self, namespace: &str) -> VesperResult<ConsolidationStats> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(namespace.to_string());
            Ok(ConsolidationStats::default())
        }
    }

    #[tokio::test]
    async fn startup_pass_runs_once_per_namespace() {
        let runner = Arc::new(StubRunner {
            namespaces: vec!["default".to_string(), "work".to_string()],
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        });
        let mut config = ConsolidationConfig::default();
        config.run_on_startup = true;

        let scheduler = Scheduler::new(runner.clone(), config);
        scheduler.run_all_namespaces().await;

        assert_eq!(runner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(*runner.seen.lock().unwrap(), vec!["default".to_string(), "work".to_string()]);
    }

    #[tokio::test]
    async fn a_namespace_error_does_not_abort_the_remaining_namespaces() {
        struct FlakyRunner {
            calls: AtomicUsize,
        }

        #[async_trait::async_trait]
        impl ConsolidationRunner for FlakyRunner {
            async fn namespaces(&self) -> VesperResult<Vec<String>> {
                Ok(vec!["broken".to_string(), "fine".to_string()])
            }

            async fn run_consolidation(&self, namespace: &str) -> VesperResult<ConsolidationStats> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                if namespace == "broken" {
                    return Err(vesper_core::VesperError::Internal("boom".to_string()));
                }
                Ok(ConsolidationStats::default())
            }
        }

        let runner = Arc::new(FlakyRunner { calls: AtomicUsize::new(0) });
        let scheduler = Scheduler::new(runner.clone(), ConsolidationConfig::default());
        scheduler.run_all_namespaces().await;

        assert_eq!(runner.calls.load(Ordering::SeqCst), 2);
    }
}

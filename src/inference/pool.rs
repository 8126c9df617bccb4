//! Bounded worker pool for model invocations.
//!
//! Model calls are slow and the host (or a local runtime) can only serve a
//! few at a time. Every caller goes through [`InferencePool::generate`], which
//! waits for one of `workers` slots, runs the call on its own task under a
//! deadline and hands the result back. Page-fetch concurrency is tuned
//! separately by the batch orchestrator.

use super::{GenerationParams, ModelError, SummarizationModel};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

/// Process-wide handle to the model. Cheap to clone.
#[derive(Debug, Clone)]
pub struct InferencePool {
    model: Arc<dyn SummarizationModel>,
    slots: Arc<Semaphore>,
    workers: usize,
    call_timeout: Duration,
}

impl InferencePool {
    pub fn new(model: Arc<dyn SummarizationModel>, workers: usize, call_timeout: Duration) -> Self {
        let workers = workers.max(1);
        Self {
            model,
            slots: Arc::new(Semaphore::new(workers)),
            workers,
            call_timeout,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run one generation on a pool worker.
    #[instrument(level = "debug", skip_all, fields(model = %self.model.name(), max_length = params.max_length))]
    pub async fn generate(&self, input: &str, params: GenerationParams) -> Result<String, ModelError> {
        let queued = Instant::now();
        let permit = Arc::clone(&self.slots)
            .acquire_owned()
            .await
            .map_err(|e| ModelError::Worker(e.to_string()))?;
        debug!(queued_ms = queued.elapsed().as_millis() as u64, "Acquired inference slot");

        let model = Arc::clone(&self.model);
        let input = input.to_string();
        let call_timeout = self.call_timeout;

        let mut call = AbortOnDrop(tokio::spawn(async move {
            let _permit = permit;
            match timeout(call_timeout, model.generate(&input, params)).await {
                Ok(result) => result,
                Err(_) => Err(ModelError::Timeout),
            }
        }));

        match (&mut call.0).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Inference worker task failed");
                Err(ModelError::Worker(e.to_string()))
            }
        }
    }
}

/// Aborts the worker task, and with it the slot it holds, when the caller
/// stops waiting.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records the highest number of overlapping calls.
    #[derive(Debug, Default)]
    struct Gauge {
        active: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl SummarizationModel for Gauge {
        fn name(&self) -> &str {
            "gauge"
        }

        async fn generate(&self, input: &str, _params: GenerationParams) -> Result<String, ModelError> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);
            Ok(input.to_uppercase())
        }
    }

    #[derive(Debug)]
    struct Stuck;

    #[async_trait]
    impl SummarizationModel for Stuck {
        fn name(&self) -> &str {
            "stuck"
        }

        async fn generate(&self, _input: &str, _params: GenerationParams) -> Result<String, ModelError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn test_pool_bounds_concurrency() {
        let gauge = Arc::new(Gauge::default());
        let pool = InferencePool::new(gauge.clone(), 2, Duration::from_secs(5));

        let calls = (0..8).map(|i| {
            let pool = pool.clone();
            async move { pool.generate(&format!("item {}", i), GenerationParams::SUMMARY).await }
        });
        let results = futures::future::join_all(calls).await;

        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(results[3], Ok("ITEM 3".to_string()));
        assert!(gauge.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pool_times_out_stuck_call() {
        let pool = InferencePool::new(Arc::new(Stuck), 1, Duration::from_secs(1));
        let out = pool.generate("x", GenerationParams::SUMMARY).await;
        assert_eq!(out, Err(ModelError::Timeout));
    }

    /// Sleeps for a long time on `"slow"`, echoes anything else.
    #[derive(Debug)]
    struct SlowOnce;

    #[async_trait]
    impl SummarizationModel for SlowOnce {
        fn name(&self) -> &str {
            "slow-once"
        }

        async fn generate(&self, input: &str, _params: GenerationParams) -> Result<String, ModelError> {
            if input == "slow" {
                tokio::time::sleep(Duration::from_secs(100)).await;
            }
            Ok(input.to_string())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_call_frees_its_slot() {
        let pool = InferencePool::new(Arc::new(SlowOnce), 1, Duration::from_secs(240));

        let abandoned = timeout(Duration::from_secs(1), pool.generate("slow", GenerationParams::SUMMARY)).await;
        assert!(abandoned.is_err());

        let started = tokio::time::Instant::now();
        let next = pool.generate("fast", GenerationParams::SUMMARY).await;
        assert_eq!(next, Ok("fast".to_string()));
        assert!(started.elapsed() < Duration::from_secs(1), "waited {:?}", started.elapsed());
    }

    #[test]
    fn test_zero_workers_rounds_up() {
        let pool = InferencePool::new(Arc::new(Stuck), 0, Duration::from_secs(1));
        assert_eq!(pool.workers(), 1);
    }
}

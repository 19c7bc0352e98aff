//! Supervised, bounded pool for fire-and-forget propagation.
//!
//! Request handlers submit [`PropagationJob`]s without waiting. A single
//! dispatcher drains a bounded channel and runs each job on its own task, with a
//! semaphore capping the number of outbound calls in flight. Every job is
//! bounded by the per-call deadline; failures are logged and counted, never
//! retried.
//!
//! The queue tracks outstanding jobs so that shutdown and tests can wait for
//! propagation to finish ([`PropagationQueue::wait_idle`],
//! [`PropagationQueue::shutdown`]).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{Notify, Semaphore, mpsc};
use tracing::{debug, info, warn};

use crate::domain::propagation_job::PropagationJob;
use crate::domain::repositories::UrlRepository;
use crate::error::DownstreamError;
use crate::infrastructure::cache::CacheService;
use crate::utils::deadline::{CACHE_TIER, DURABLE_TIER, with_deadline};

/// Sizing of the propagation pool.
#[derive(Debug, Clone, Copy)]
pub struct PropagationSettings {
    /// Maximum number of queued jobs; submissions beyond this are dropped.
    pub queue_capacity: usize,
    /// Maximum number of outbound calls in flight.
    pub concurrency: usize,
    /// Deadline applied to each outbound call.
    pub call_timeout: Duration,
}

/// Counters describing what the pool has done so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationStats {
    pub submitted: u64,
    pub completed: u64,
    pub failed: u64,
    pub dropped: u64,
}

#[derive(Default)]
struct JobTracker {
    pending: AtomicUsize,
    submitted: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
    dropped: AtomicU64,
    closed: AtomicBool,
    idle: Notify,
}

impl JobTracker {
    fn begin(&self) {
        self.pending.fetch_add(1, Ordering::SeqCst);
    }

    fn finish(&self) {
        if self.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.idle.notify_waiters();
        }
    }
}

/// Marks a job finished when dropped, including when its task panics.
struct PendingGuard(Arc<JobTracker>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.finish();
    }
}

/// Handle for submitting propagation jobs. Cheap to clone.
#[derive(Clone)]
pub struct PropagationQueue {
    tx: mpsc::Sender<PropagationJob>,
    tracker: Arc<JobTracker>,
}

impl PropagationQueue {
    /// Creates the queue and spawns its dispatcher on the current tokio runtime.
    pub fn start(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        settings: PropagationSettings,
    ) -> Self {
        let (tx, rx) = mpsc::channel(settings.queue_capacity.max(1));
        let tracker = Arc::new(JobTracker::default());

        tokio::spawn(run_propagation_worker(
            rx,
            repository,
            cache,
            settings,
            tracker.clone(),
        ));

        info!(
            queue_capacity = settings.queue_capacity,
            concurrency = settings.concurrency,
            call_timeout_ms = settings.call_timeout.as_millis() as u64,
            "Propagation worker started"
        );

        Self { tx, tracker }
    }

    /// Enqueues a job without waiting.
    ///
    /// Returns `false` if the job was dropped because the queue is full or shut
    /// down. A dropped job is lost; the local write it mirrors is unaffected.
    pub fn submit(&self, job: PropagationJob) -> bool {
        if self.tracker.closed.load(Ordering::SeqCst) {
            self.tracker.dropped.fetch_add(1, Ordering::Relaxed);
            warn!(
                job = job.kind(),
                short_code = job.short_code(),
                "Propagation queue is shut down, dropping job"
            );
            return false;
        }

        self.tracker.begin();

        match self.tx.try_send(job) {
            Ok(()) => {
                self.tracker.submitted.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(TrySendError::Full(job)) => {
                self.tracker.finish();
                self.tracker.dropped.fetch_add(1, Ordering::Relaxed);
                warn!(
                    job = job.kind(),
                    short_code = job.short_code(),
                    "Propagation queue full, dropping job"
                );
                false
            }
            Err(TrySendError::Closed(job)) => {
                self.tracker.finish();
                self.tracker.dropped.fetch_add(1, Ordering::Relaxed);
                warn!(
                    job = job.kind(),
                    short_code = job.short_code(),
                    "Propagation worker stopped, dropping job"
                );
                false
            }
        }
    }

    /// Number of jobs queued or running.
    pub fn pending(&self) -> usize {
        self.tracker.pending.load(Ordering::SeqCst)
    }

    pub fn stats(&self) -> PropagationStats {
        PropagationStats {
            submitted: self.tracker.submitted.load(Ordering::Relaxed),
            completed: self.tracker.completed.load(Ordering::Relaxed),
            failed: self.tracker.failed.load(Ordering::Relaxed),
            dropped: self.tracker.dropped.load(Ordering::Relaxed),
        }
    }

    /// Waits until every accepted job has finished, successfully or not.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.tracker.idle.notified();
            if self.pending() == 0 {
                return;
            }
            notified.await;
        }
    }

    /// Stops accepting jobs and waits up to `grace` for outstanding ones.
    ///
    /// Returns `true` if the queue drained in time.
    pub async fn shutdown(&self, grace: Duration) -> bool {
        self.tracker.closed.store(true, Ordering::SeqCst);

        match tokio::time::timeout(grace, self.wait_idle()).await {
            Ok(()) => {
                info!("Propagation queue drained");
                true
            }
            Err(_) => {
                warn!(
                    pending = self.pending(),
                    grace_ms = grace.as_millis() as u64,
                    "Propagation queue did not drain before shutdown deadline"
                );
                false
            }
        }
    }
}

async fn run_propagation_worker(
    mut rx: mpsc::Receiver<PropagationJob>,
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    settings: PropagationSettings,
    tracker: Arc<JobTracker>,
) {
    let semaphore = Arc::new(Semaphore::new(settings.concurrency.max(1)));

    while let Some(job) = rx.recv().await {
        let guard = PendingGuard(tracker.clone());

        let permit = match semaphore.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Propagation semaphore closed, stopping worker");
                break;
            }
        };

        let repository = repository.clone();
        let cache = cache.clone();
        let tracker = tracker.clone();

        tokio::spawn(async move {
            let _permit = permit;
            let _guard = guard;

            match execute(
                &job,
                repository.as_ref(),
                cache.as_ref(),
                settings.call_timeout,
            )
            .await
            {
                Ok(()) => {
                    tracker.completed.fetch_add(1, Ordering::Relaxed);
                    debug!(
                        job = job.kind(),
                        short_code = job.short_code(),
                        "Propagation job done"
                    );
                }
                Err(e) => {
                    tracker.failed.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        job = job.kind(),
                        short_code = job.short_code(),
                        error = %e,
                        "Propagation job failed"
                    );
                }
            }
        });
    }

    debug!("Propagation worker exiting");
}

async fn execute(
    job: &PropagationJob,
    repository: &dyn UrlRepository,
    cache: &dyn CacheService,
    call_timeout: Duration,
) -> Result<(), DownstreamError> {
    match job {
        PropagationJob::SaveUrl {
            short_code,
            original_url,
        } => {
            with_deadline(
                DURABLE_TIER,
                call_timeout,
                repository.save_url(short_code, original_url),
            )
            .await
        }
        PropagationJob::CacheUrl {
            short_code,
            original_url,
            ttl_seconds,
        } => {
            with_deadline(
                CACHE_TIER,
                call_timeout,
                cache.set_url(short_code, original_url, *ttl_seconds),
            )
            .await
        }
        PropagationJob::IncrementClick { short_code } => {
            with_deadline(
                DURABLE_TIER,
                call_timeout,
                repository.increment_click(short_code),
            )
            .await
        }
    }
}

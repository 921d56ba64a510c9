//! Background rasterization with a latest-wins delivery policy.
//!
//! The controller records a [`DisplayList`] on its own thread and submits it
//! here; a worker task rasterizes it off-thread and publishes the pixels into
//! a shared slot the controller polls. Only the newest submission per render
//! mode matters: superseded jobs are skipped before rasterizing when possible
//! and their frames dropped instead of published when not.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, mpsc};

use super::{DisplayList, ImageRenderer, RasterImage, RenderMode};

/// One unit of background work: a finished list plus the bookkeeping needed
/// to tell whether it is still worth rasterizing.
#[derive(Debug)]
pub struct RenderJob {
    pub list: DisplayList,
    pub mode: RenderMode,
    /// Monotonic per-controller counter; higher supersedes lower.
    pub generation: u64,
}

/// A rasterized frame waiting to be collected by the controller.
#[derive(Debug)]
pub struct CompletedRender {
    pub image: RasterImage,
    pub mode: RenderMode,
    pub generation: u64,
}

/// Seam between the controller and whatever executes its render jobs.
///
/// The production implementation is [`RenderScheduler`]; tests substitute a
/// queue that holds jobs until the test decides to complete them.
pub trait RenderQueue: Send {
    fn submit(&self, job: RenderJob);

    /// Non-blocking poll for a finished frame. Returns `None` when nothing
    /// has completed or the slot is momentarily held by the worker.
    fn try_take_completed(&self) -> Option<CompletedRender>;
}

/// Newest generation submitted for each render mode.
#[derive(Debug, Default)]
struct LatestGenerations {
    full_canvas: AtomicU64,
    viewport_only: AtomicU64,
}

impl LatestGenerations {
    fn cell(&self, mode: RenderMode) -> &AtomicU64 {
        match mode {
            RenderMode::FullCanvas => &self.full_canvas,
            RenderMode::ViewportOnly => &self.viewport_only,
        }
    }

    fn record(&self, mode: RenderMode, generation: u64) {
        self.cell(mode).fetch_max(generation, Ordering::SeqCst);
    }

    fn is_superseded(&self, mode: RenderMode, generation: u64) -> bool {
        self.cell(mode).load(Ordering::SeqCst) > generation
    }
}

/// Tokio-backed render queue.
///
/// Jobs flow through an unbounded channel to one worker task, which runs the
/// actual rasterization on the blocking pool. Finished frames land in a
/// single shared slot; a newer frame overwrites an unclaimed older one, so
/// the controller always picks up the freshest completed render.
#[derive(Clone)]
pub struct RenderScheduler {
    job_tx: mpsc::UnboundedSender<RenderJob>,
    completed: Arc<Mutex<Option<CompletedRender>>>,
    latest: Arc<LatestGenerations>,
}

impl RenderScheduler {
    /// Spawns the worker task on the given runtime.
    pub fn new(runtime_handle: &tokio::runtime::Handle, renderer: Arc<dyn ImageRenderer>) -> Self {
        let (job_tx, mut job_rx) = mpsc::unbounded_channel::<RenderJob>();
        let completed = Arc::new(Mutex::new(None));
        let latest = Arc::new(LatestGenerations::default());

        let completed_clone = completed.clone();
        let latest_clone = latest.clone();

        runtime_handle.spawn(async move {
            while let Some(job) = job_rx.recv().await {
                let RenderJob {
                    list,
                    mode,
                    generation,
                } = job;

                if latest_clone.is_superseded(mode, generation) {
                    log::debug!("skipping superseded {mode:?} render (generation {generation})");
                    continue;
                }

                let renderer = renderer.clone();
                let rendered =
                    tokio::task::spawn_blocking(move || renderer.render(&list)).await;

                let image = match rendered {
                    Ok(Ok(image)) => image,
                    Ok(Err(e)) => {
                        log::warn!("render failed: {e}");
                        continue;
                    }
                    Err(e) => {
                        log::warn!("render worker panicked: {e}");
                        continue;
                    }
                };

                // A newer job may have been submitted while this one was
                // rasterizing; its frame must not be overwritten by ours.
                if latest_clone.is_superseded(mode, generation) {
                    log::debug!(
                        "discarding finished {mode:?} render (generation {generation})"
                    );
                    continue;
                }

                *completed_clone.lock().await = Some(CompletedRender {
                    image,
                    mode,
                    generation,
                });
            }
        });

        Self {
            job_tx,
            completed,
            latest,
        }
    }
}

impl RenderQueue for RenderScheduler {
    fn submit(&self, job: RenderJob) {
        self.latest.record(job.mode, job.generation);
        if self.job_tx.send(job).is_err() {
            log::warn!("render worker is gone; dropping submitted job");
        }
    }

    fn try_take_completed(&self) -> Option<CompletedRender> {
        self.completed.try_lock().ok().and_then(|mut slot| slot.take())
    }
}

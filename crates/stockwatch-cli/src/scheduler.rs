//! Periodic crawling.
//!
//! One cycle runs immediately, then a repeated [`JobScheduler`] job fires
//! every `update_interval_minutes`. The context sits behind a mutex; a tick
//! that finds the previous cycle still running is skipped, so cycles never
//! overlap.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use stockwatch_core::AppConfig;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::cycle::{run_cycle, CrawlContext};

/// Crawl until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if startup configuration cannot be loaded or the
/// scheduler cannot be started or stopped.
pub(crate) async fn run_scheduled(
    config: AppConfig,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    let ctx = CrawlContext::load(config)?;
    let interval = Duration::from_secs(ctx.watchlist.update_interval_minutes.saturating_mul(60));
    let ctx = Arc::new(Mutex::new(ctx));

    tokio::pin!(shutdown);

    tokio::select! {
        _ = async {
            let mut guard = ctx.lock().await;
            run_cycle(&mut guard).await
        } => {},
        () = &mut shutdown => {
            tracing::info!("shutdown requested during the initial cycle");
            return Ok(());
        }
    }

    let mut scheduler = build_scheduler(Arc::clone(&ctx), interval).await?;
    tracing::info!(
        interval_secs = interval.as_secs(),
        "scheduler started; waiting for next cycle"
    );

    shutdown.await;

    scheduler.shutdown().await?;
    // Let an in-flight cycle finish its writes before the process exits.
    let _guard = ctx.lock().await;
    tracing::info!("scheduler stopped");
    Ok(())
}

/// Builds and starts a scheduler with the repeated crawl job registered.
///
/// The returned handle must be kept alive; dropping it stops the job.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the job cannot be registered, or the scheduler fails to start.
pub(crate) async fn build_scheduler(
    ctx: Arc<Mutex<CrawlContext>>,
    interval: Duration,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let ctx = Arc::clone(&ctx);

        Box::pin(async move {
            let Ok(mut guard) = ctx.try_lock() else {
                tracing::warn!("scheduler: previous cycle still running; skipping this tick");
                return;
            };
            run_cycle(&mut guard).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    Ok(scheduler)
}

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod tests;

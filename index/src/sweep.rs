use crate::MediaIndex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::info;
use tracing::warn;

/// Starts the periodic sweep with a delay in minutes. Returns `None` when the
/// delay is zero or negative, which disables sweeping.
pub fn spawn_sweeper(
    index: MediaIndex,
    delay_minutes: i64,
    shutdown: CancellationToken,
) -> Option<JoinHandle<()>> {
    if delay_minutes <= 0 {
        info!("index sweep disabled (delay {delay_minutes} min)");
        return None;
    }
    let minutes = delay_minutes.unsigned_abs();
    info!("index sweep every {minutes} min");
    Some(spawn_sweeper_every(
        index,
        Duration::from_secs(minutes.saturating_mul(60)),
        shutdown,
    ))
}

/// Runs [`MediaIndex::clean`] with a fixed `delay` between the end of one
/// sweep and the start of the next. The first sweep waits one full delay.
pub fn spawn_sweeper_every(
    index: MediaIndex,
    delay: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
            let index = index.clone();
            match tokio::task::spawn_blocking(move || index.clean()).await {
                Ok(report) => {
                    if report.removed() > 0 {
                        info!(
                            "index sweep removed {} entries ({} missing, {} orphaned)",
                            report.removed(),
                            report.missing,
                            report.orphaned
                        );
                    } else {
                        debug!("index sweep removed nothing");
                    }
                }
                Err(err) => warn!("index sweep failed: {err}"),
            }
        }
        debug!("index sweeper stopped");
    })
}

//! Background removal of idle sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use nova_core::session::SessionStore;

/// How often expired sessions are swept.
pub const PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Spawn a task that purges sessions idle longer than `ttl` every
/// `interval`, until `cancel` fires.
pub fn spawn_session_purge<S>(
    sessions: Arc<S>,
    ttl: chrono::Duration,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    S: SessionStore + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("session purge stopped");
                    break;
                }
                _ = ticker.tick() => {
                    match sessions.purge_expired(ttl).await {
                        Ok(0) => {}
                        Ok(removed) => tracing::info!(removed, "purged expired sessions"),
                        Err(e) => tracing::warn!(error = %e, "session purge failed"),
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_infra::session::memory::MemorySessionStore;

    #[tokio::test]
    async fn stops_on_cancel() {
        let sessions = Arc::new(MemorySessionStore::new());
        let cancel = CancellationToken::new();
        let handle = spawn_session_purge(
            sessions,
            chrono::Duration::hours(1),
            Duration::from_millis(10),
            cancel.clone(),
        );

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("purge task did not stop")
            .unwrap();
    }

    #[tokio::test]
    async fn keeps_live_sessions() {
        let sessions = Arc::new(MemorySessionStore::new());
        sessions.create(None).await.unwrap();
        let cancel = CancellationToken::new();
        let handle = spawn_session_purge(
            sessions.clone(),
            chrono::Duration::hours(1),
            Duration::from_millis(5),
            cancel.clone(),
        );

        tokio::time::sleep(Duration::from_millis(30)).await;
        cancel.cancel();
        handle.await.unwrap();
        assert_eq!(sessions.len(), 1);
    }

    #[tokio::test]
    async fn removes_idle_sessions() {
        let sessions = Arc::new(MemorySessionStore::new());
        sessions.create(None).await.unwrap();
        let cancel = CancellationToken::new();

        tokio::time::sleep(Duration::from_millis(20)).await;
        let handle = spawn_session_purge(
            sessions.clone(),
            chrono::Duration::milliseconds(1),
            Duration::from_millis(5),
            cancel.clone(),
        );

        tokio::time::sleep(Duration::from_millis(30)).await;
        cancel.cancel();
        handle.await.unwrap();
        assert!(sessions.is_empty());
    }
}

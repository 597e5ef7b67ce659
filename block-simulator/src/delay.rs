use async_trait::async_trait;
use std::time::Duration;

/// Suspends the current request for a simulated amount of work
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Delay: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Async timer backed by tokio; other requests keep running while it waits
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn pause(&self, _duration: Duration) {}
}

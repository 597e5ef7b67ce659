use async_trait::async_trait;
use block_simulator::{
    blocks_client::BlocksClient,
    delay::Delay,
    error::ServiceError,
    models::{block::BlockRequest, quote::PriceQuote},
    random::RandomSource,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Returns the same raw draw every time, wrapped into the requested bound
pub struct FixedRandom(pub u64);

impl RandomSource for FixedRandom {
    fn below(&self, bound: u64) -> u64 {
        self.0 % bound
    }
}

/// Delay that announces it has started and then waits to be released
///
/// Lets a test hold the processing gate for exactly as long as it needs.
pub struct HeldDelay {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl HeldDelay {
    pub fn new() -> Self {
        Self {
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }
}

#[async_trait]
impl Delay for HeldDelay {
    async fn pause(&self, _duration: Duration) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

/// Block simulator stand-in with a fixed quote
///
/// With `quote` unset every price request fails.
pub struct FakeBlocks {
    pub quote: Option<PriceQuote>,
    pub submitted: AtomicUsize,
}

impl FakeBlocks {
    pub fn quoting(gas_price: u64, fee: u64) -> Self {
        Self {
            quote: Some(PriceQuote { gas_price, fee }),
            submitted: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            quote: None,
            submitted: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl BlocksClient for FakeBlocks {
    async fn get_current_price(&self) -> Result<PriceQuote, ServiceError> {
        self.quote
            .ok_or_else(|| ServiceError::Upstream("connection refused".to_string()))
    }

    async fn simulate_block(&self, request: &BlockRequest) -> Result<(), ServiceError> {
        self.submitted
            .fetch_add(request.transactions.len(), Ordering::SeqCst);
        Ok(())
    }
}

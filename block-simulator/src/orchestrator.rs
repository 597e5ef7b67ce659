use crate::{
    blocks_client::BlocksClient,
    delay::Delay,
    error::ServiceError,
    models::{
        block::{BlockRequest, Transaction},
        mempool::Stats,
    },
    simulator::GAS_LIMIT,
};
use parking_lot::Mutex;
use std::{cmp::Reverse, sync::Arc, time::Duration};
use tracing::{debug, info, warn};

/// Submit attempts per batch before it goes back to the mempool
pub const MAX_SUBMIT_ATTEMPTS: u32 = 8;

/// Wait after the first failed submit; doubles on each further failure
pub const INITIAL_BACKOFF: Duration = Duration::from_millis(200);

/// Ceiling for the doubling backoff
pub const MAX_BACKOFF: Duration = Duration::from_millis(1_500);

/// Default pause between scheduler ticks
pub const DEFAULT_TICK: Duration = Duration::from_millis(250);

#[derive(Debug, Default)]
struct MempoolState {
    pending: Vec<Transaction>,
    stats: Stats,
}

/// Holds pending transactions and feeds the best batches to the block simulator
///
/// Batches are picked greedily: highest fee first, cheaper gas breaking
/// ties, skipping anything that would push the batch over [`GAS_LIMIT`].
pub struct Orchestrator {
    client: Arc<dyn BlocksClient>,
    backoff: Arc<dyn Delay>,
    state: Mutex<MempoolState>,
    // one batch in flight at a time
    submit_lock: tokio::sync::Mutex<()>,
}

impl Orchestrator {
    pub fn new(client: Arc<dyn BlocksClient>, backoff: Arc<dyn Delay>) -> Self {
        Self {
            client,
            backoff,
            state: Mutex::new(MempoolState::default()),
            submit_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Price a new transaction with a fresh quote and queue it
    pub async fn accept(&self, id: String) -> Result<Transaction, ServiceError> {
        let quote = self.client.get_current_price().await?;
        let tx = Transaction {
            id,
            gas_price: i64::try_from(quote.gas_price)
                .map_err(|e| ServiceError::Upstream(e.to_string()))?,
            fee: i64::try_from(quote.fee).map_err(|e| ServiceError::Upstream(e.to_string()))?,
        };
        self.add_transaction(tx.clone());
        Ok(tx)
    }

    /// Queue a transaction as-is
    pub fn add_transaction(&self, tx: Transaction) {
        let mut state = self.state.lock();
        state.pending.push(tx);
        state.stats.mempool_size = state.pending.len();
        state.stats.accepted += 1;
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> Stats {
        self.state.lock().stats.clone()
    }

    /// Pending transactions in their current order
    pub fn pending(&self) -> Vec<Transaction> {
        self.state.lock().pending.clone()
    }

    /// Remove and return the best batch that fits the gas limit
    ///
    /// What does not fit stays queued, in the sorted order.
    pub fn take_best_batch(&self) -> Vec<Transaction> {
        let mut state = self.state.lock();
        if state.pending.is_empty() {
            return Vec::new();
        }

        state
            .pending
            .sort_by_key(|tx| (Reverse(tx.fee), tx.gas_price));

        let mut gas: i64 = 0;
        let (batch, leftover): (Vec<_>, Vec<_>) =
            state.pending.drain(..).partition(|tx| {
                let next = gas.wrapping_add(tx.gas_price);
                if next <= GAS_LIMIT {
                    gas = next;
                    true
                } else {
                    false
                }
            });

        state.pending = leftover;
        state.stats.mempool_size = state.pending.len();
        batch
    }

    /// One scheduler pass: take a batch and submit it with retries
    ///
    /// # Returns
    ///
    /// * `true` if a batch was taken, whether or not it was accepted
    pub async fn tick(&self) -> bool {
        let batch = self.take_best_batch();
        if batch.is_empty() {
            return false;
        }

        let _submitting = self.submit_lock.lock().await;
        let request = BlockRequest { transactions: batch };
        let mut backoff = INITIAL_BACKOFF;

        for attempt in 1..=MAX_SUBMIT_ATTEMPTS {
            match self.client.simulate_block(&request).await {
                Ok(()) => {
                    let mut state = self.state.lock();
                    let stats = &mut state.stats;
                    stats.submitted_batches += 1;
                    stats.submitted_txs += request.transactions.len() as u64;
                    stats.total_fees = stats.total_fees.wrapping_add(request.total_fees());
                    stats.total_gas = stats.total_gas.wrapping_add(request.total_gas());
                    info!(
                        txs = request.transactions.len(),
                        gas = request.total_gas(),
                        fees = request.total_fees(),
                        attempt,
                        "Batch submitted"
                    );
                    return true;
                }
                Err(e) => {
                    debug!(attempt, error = %e, "Batch submit failed, backing off");
                    self.backoff.pause(backoff).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                }
            }
        }

        warn!(
            txs = request.transactions.len(),
            "Batch submit failed {} times, returning it to the mempool", MAX_SUBMIT_ATTEMPTS
        );
        let mut state = self.state.lock();
        state.stats.failed_submits += 1;
        state.pending.extend(request.transactions);
        state.stats.mempool_size = state.pending.len();
        true
    }

    /// Run the scheduler forever, waiting `every` after each pass
    pub async fn run(self: Arc<Self>, every: Duration) {
        loop {
            self.tick().await;
            tokio::time::sleep(every).await;
        }
    }
}

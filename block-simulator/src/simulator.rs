use crate::{
    delay::Delay,
    error::ServiceError,
    gate::ProcessingGate,
    models::block::{BlockRequest, BlockResult},
    random::{biased_draw, RandomSource},
};
use std::{sync::Arc, time::Duration};
use tracing::{debug, info, warn};

/// Aggregate gas a block may carry
pub const GAS_LIMIT: i64 = 10_000;

/// Exclusive upper bound of the raw processing time draw, in milliseconds
pub const PROCESSING_BOUND_MS: u64 = 3_000;

/// Processing time draws below this many milliseconds are lifted by it
pub const PROCESSING_FLOOR_MS: u64 = 1_000;

/// Simulates building a block from a submitted transaction batch
///
/// Only one simulation may run at a time across all callers sharing the
/// same [`ProcessingGate`]. Callers arriving while it is held are rejected
/// with [`ServiceError::Busy`] without waiting.
#[derive(Clone)]
pub struct BlockSimulator {
    gate: Arc<ProcessingGate>,
    random: Arc<dyn RandomSource>,
    delay: Arc<dyn Delay>,
}

impl BlockSimulator {
    /// Creates a simulator bound to the given gate
    pub fn new(
        gate: Arc<ProcessingGate>,
        random: Arc<dyn RandomSource>,
        delay: Arc<dyn Delay>,
    ) -> Self {
        Self { gate, random, delay }
    }

    /// The gate this simulator contends on
    pub fn gate(&self) -> &ProcessingGate {
        &self.gate
    }

    /// Run one simulation over a raw JSON request body
    ///
    /// The body is decoded only after the gate is taken and the simulated
    /// work has elapsed. The gate is released on every return path.
    ///
    /// # Arguments
    ///
    /// * `body` - Raw bytes expected to hold a [`BlockRequest`]
    ///
    /// # Returns
    ///
    /// * `Result<BlockResult, ServiceError>` - Totals for the batch, or the rejection reason
    pub async fn simulate(&self, body: &[u8]) -> Result<BlockResult, ServiceError> {
        let _permit = self.gate.try_acquire().ok_or_else(|| {
            warn!("Rejecting block simulation, gate is held");
            ServiceError::Busy
        })?;

        let millis = biased_draw(self.random.as_ref(), PROCESSING_BOUND_MS, PROCESSING_FLOOR_MS);
        let processing_time = Duration::from_millis(millis);
        debug!(millis, "Simulating block processing");
        self.delay.pause(processing_time).await;

        let request = BlockRequest::from_first_value(body).map_err(|e| {
            debug!(error = %e, "Failed to decode block request");
            ServiceError::InvalidPayload
        })?;

        let total_gas = request.total_gas();
        let total_fees = request.total_fees();

        if total_gas > GAS_LIMIT {
            warn!(total_gas, gas_limit = GAS_LIMIT, "Gas limit exceeded");
            return Err(ServiceError::GasLimitExceeded);
        }

        let processing_time_seconds = processing_time.as_secs_f64();
        info!(
            total_gas,
            total_fees,
            gas_limit = GAS_LIMIT,
            processing_time_seconds,
            "Block processed successfully"
        );

        Ok(BlockResult {
            transactions: request,
            total_gas,
            total_fees,
            gas_limit: GAS_LIMIT,
            processing_time_seconds,
        })
    }
}

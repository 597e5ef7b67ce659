use super::block::Transaction;
use serde::{Deserialize, Serialize};

/// Body of a `POST /transactions` request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitTxRequest {
    /// Identifier for the new transaction; required and non-blank
    #[serde(default)]
    pub id: Option<String>,
}

/// Body of a successful `POST /transactions` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTxResponse {
    pub accepted: bool,

    /// The transaction as priced and queued
    pub tx: Transaction,
}

/// Running counters of the mempool and its block submissions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Transactions currently waiting
    pub mempool_size: usize,

    /// Transactions accepted since start
    pub accepted: u64,

    /// Batches the block simulator accepted
    pub submitted_batches: u64,

    /// Transactions across all accepted batches
    pub submitted_txs: u64,

    pub total_fees: i64,

    pub total_gas: i64,

    /// Batches that ran out of submit attempts and were requeued
    pub failed_submits: u64,
}

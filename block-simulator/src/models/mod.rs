//! Data models used throughout the application
//!
//! This module contains the request and response bodies exchanged over HTTP
//! by the price quote, block simulation and mempool endpoints.

// Transaction batches and simulation results
pub mod block;
// Mempool submissions and counters
pub mod mempool;
// Gas price quotes
pub mod quote;

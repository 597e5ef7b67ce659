use eyre::Result;
use serde::Deserialize;
use std::{env, time::Duration};

/// Service configuration structure
///
/// Values come from environment variables, optionally seeded from a `.env`
/// file, with defaults matching a local single-node deployment.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host address to bind the server to (default: 0.0.0.0)
    pub host: String,

    /// Port to listen on (default: 8080)
    pub port: u16,

    /// Number of HTTP worker threads (default: 4)
    pub workers: usize,

    /// Block simulator base URL the mempool talks to (default: http://blocks:8080)
    pub blocks_base_url: String,

    /// Milliseconds the mempool scheduler waits between passes (default: 250)
    pub batch_tick_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables
    ///
    /// * `HOST` - Server host address (default: "0.0.0.0")
    /// * `PORT` - Server port (default: 8080)
    /// * `WORKERS` - HTTP worker threads (default: 4)
    /// * `BLOCKS_BASE_URL` - Block simulator URL for the mempool (default: "http://blocks:8080")
    /// * `BATCH_TICK_MS` - Mempool scheduler pause (default: 250)
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (useful for development)
        let _ = dotenv::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()?,
            workers: lookup("WORKERS")
                .unwrap_or_else(|| "4".to_string())
                .parse::<usize>()?,
            blocks_base_url: lookup("BLOCKS_BASE_URL")
                .unwrap_or_else(|| "http://blocks:8080".to_string()),
            batch_tick_ms: lookup("BATCH_TICK_MS")
                .unwrap_or_else(|| "250".to_string())
                .parse::<u64>()?,
        })
    }

    /// Pause between mempool scheduler passes
    pub fn batch_tick(&self) -> Duration {
        Duration::from_millis(self.batch_tick_ms)
    }

    /// Address string suitable for binding a listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

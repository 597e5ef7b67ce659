use serde::{Deserialize, Serialize};

/// A randomized gas price and fee pair
///
/// Produced fresh for every `/getCurrentPrice` call and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Quoted gas price, at least 100
    #[serde(rename = "gasPrice")]
    pub gas_price: u64,

    /// Quoted fee, at least 10
    pub fee: u64,
}

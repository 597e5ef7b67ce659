use crate::{
    models::quote::PriceQuote,
    random::{biased_draw, RandomSource},
};
use std::sync::Arc;
use tracing::debug;

/// Exclusive upper bound of the raw gas price draw
pub const GAS_PRICE_BOUND: u64 = 1_000;

/// Draws below this are lifted by the same amount
pub const GAS_PRICE_FLOOR: u64 = 100;

/// Exclusive upper bound of the raw fee draw
pub const FEE_BOUND: u64 = 100;

/// Draws below this are lifted by the same amount
pub const FEE_FLOOR: u64 = 10;

/// Stateless generator of randomized price quotes
#[derive(Clone)]
pub struct PriceQuoteService {
    random: Arc<dyn RandomSource>,
}

impl PriceQuoteService {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Produce a fresh quote
    ///
    /// Gas price is drawn first, then the fee, each following the biased
    /// floor rule of [`biased_draw`].
    pub fn quote(&self) -> PriceQuote {
        let gas_price = biased_draw(self.random.as_ref(), GAS_PRICE_BOUND, GAS_PRICE_FLOOR);
        let fee = biased_draw(self.random.as_ref(), FEE_BOUND, FEE_FLOOR);
        debug!(gas_price, fee, "Generated price quote");
        PriceQuote { gas_price, fee }
    }
}

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{TradePage, TradeRequest};

/// Remote feed of DEX trades, paged by the caller.
#[async_trait]
pub trait TradesSource: Send + Sync {
    /// Fetch one page of trades matching `request`.
    async fn fetch_trades(&self, request: &TradeRequest) -> Result<TradePage>;
}

use serde::Deserialize;

/// Token identity as reported by the trade feed
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrencyInfo {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
}

/// One row from the trade feed. In pair-discovery mode a row aggregates a
/// trading pair; in transaction mode a row is a single trade, with block time
/// and transaction hash populated.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexTrade {
    /// Number of trades aggregated into this row
    #[serde(default)]
    pub count: Option<u64>,
    /// Trade volume in USD
    #[serde(default)]
    pub trade_amount: Option<f64>,
    #[serde(default)]
    pub base_currency: CurrencyInfo,
    #[serde(default)]
    pub quote_currency: CurrencyInfo,
    #[serde(default)]
    pub quote_price: Option<f64>,
    #[serde(default)]
    pub block: Option<BlockInfo>,
    #[serde(default)]
    pub transaction: Option<TransactionInfo>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlockInfo {
    pub timestamp: BlockTimestamp,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlockTimestamp {
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionInfo {
    pub hash: String,
}

/// One page of rows from the trade feed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradePage {
    pub trades: Vec<DexTrade>,
}

impl TradePage {
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

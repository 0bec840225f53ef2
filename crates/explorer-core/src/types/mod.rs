mod query;
mod trade;

pub use query::{Pagination, Protocol, TradeQuery, TradeRequest};
pub use trade::{BlockInfo, BlockTimestamp, CurrencyInfo, DexTrade, TradePage, TransactionInfo};

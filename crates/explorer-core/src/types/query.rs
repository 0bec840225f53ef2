use std::fmt;

/// DEX protocol the trade feed is filtered to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    UniswapV2,
    UniswapV3,
    PancakeSwap,
}

impl Protocol {
    /// Protocol filter string understood by the trade feed
    pub fn as_filter(&self) -> &'static str {
        match self {
            Protocol::UniswapV2 => "Uniswap v2",
            Protocol::UniswapV3 => "Uniswap v3",
            Protocol::PancakeSwap => "PancakeSwap v2",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter())
    }
}

/// Page selection. `page` is 1-based and never drops below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub per_page: u32,
    pub page: u32,
}

impl Pagination {
    /// Row offset the feed expects for the current page
    pub fn offset(&self) -> u64 {
        u64::from(self.per_page) * u64::from(self.page.saturating_sub(1))
    }
}

/// The user's current filter intent. Every mutation goes through the methods
/// below so the page/currency reset rules hold no matter how the fields are
/// driven.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeQuery {
    pub protocol: Protocol,
    pub base_currency: String,
    pub quote_currency: String,
    pub pagination: Pagination,
}

impl TradeQuery {
    /// Fresh query: default protocol, no currency filters, first page
    pub fn new(per_page: u32) -> Self {
        Self {
            protocol: Protocol::default(),
            base_currency: String::new(),
            quote_currency: String::new(),
            pagination: Pagination { per_page, page: 1 },
        }
    }

    /// Switching protocol drops both currency filters and returns to page 1
    pub fn set_protocol(&mut self, protocol: Protocol) {
        self.protocol = protocol;
        self.base_currency.clear();
        self.quote_currency.clear();
        self.pagination.page = 1;
    }

    /// Setting the base currency drops the quote filter and returns to
    /// page 1. An empty address switches back to pair-discovery mode.
    pub fn set_base_currency(&mut self, address: impl Into<String>) {
        self.base_currency = address.into();
        self.quote_currency.clear();
        self.pagination.page = 1;
    }

    /// Setting the quote currency returns to page 1
    pub fn set_quote_currency(&mut self, address: impl Into<String>) {
        self.quote_currency = address.into();
        self.pagination.page = 1;
    }

    /// Adjust the page by `delta`, clamped to a minimum of 1
    pub fn change_page(&mut self, delta: i32) {
        let page = i64::from(self.pagination.page) + i64::from(delta);
        self.pagination.page = page.clamp(1, i64::from(u32::MAX)) as u32;
    }

    /// Snapshot the query into the wire-level request shape
    pub fn to_request(&self) -> TradeRequest {
        TradeRequest {
            protocol: self.protocol,
            per_page: self.pagination.per_page,
            offset: self.pagination.offset(),
            base_currency: self.base_currency.clone(),
            quote_currency: self.quote_currency.clone(),
        }
    }
}

/// One outbound request to the trade feed: pagination already translated to
/// limit/offset, currencies captured at snapshot time.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRequest {
    pub protocol: Protocol,
    pub per_page: u32,
    pub offset: u64,
    pub base_currency: String,
    pub quote_currency: String,
}

impl TradeRequest {
    /// True when no base currency is set and the results describe trading
    /// pairs rather than individual transactions
    pub fn is_pair_discovery(&self) -> bool {
        self.base_currency.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_per_page_times_zero_based_page() {
        let pagination = Pagination { per_page: 100, page: 1 };
        assert_eq!(pagination.offset(), 0);

        let pagination = Pagination { per_page: 100, page: 3 };
        assert_eq!(pagination.offset(), 200);

        let pagination = Pagination { per_page: 25, page: 5 };
        assert_eq!(pagination.offset(), 100);
    }

    #[test]
    fn change_page_clamps_at_one() {
        let mut query = TradeQuery::new(100);
        query.change_page(-1);
        assert_eq!(query.pagination.page, 1);

        query.change_page(5);
        assert_eq!(query.pagination.page, 6);

        query.change_page(-100);
        assert_eq!(query.pagination.page, 1);
    }

    #[test]
    fn change_page_zero_is_a_noop() {
        let mut query = TradeQuery::new(100);
        query.change_page(2);
        let before = query.clone();

        query.change_page(0);
        assert_eq!(query, before);
        assert_eq!(query.to_request(), before.to_request());
    }

    #[test]
    fn set_protocol_clears_currencies_and_resets_page() {
        let mut query = TradeQuery::new(100);
        query.set_base_currency("0xAAA");
        query.set_quote_currency("0xBBB");
        query.change_page(3);

        query.set_protocol(Protocol::UniswapV3);
        assert_eq!(query.protocol, Protocol::UniswapV3);
        assert!(query.base_currency.is_empty());
        assert!(query.quote_currency.is_empty());
        assert_eq!(query.pagination.page, 1);
    }

    #[test]
    fn set_base_currency_clears_quote_and_resets_page() {
        let mut query = TradeQuery::new(100);
        query.set_base_currency("0xAAA");
        query.set_quote_currency("0xBBB");
        query.change_page(2);

        query.set_base_currency("0xCCC");
        assert_eq!(query.base_currency, "0xCCC");
        assert!(query.quote_currency.is_empty());
        assert_eq!(query.pagination.page, 1);
    }

    #[test]
    fn set_quote_currency_keeps_base_and_resets_page() {
        let mut query = TradeQuery::new(100);
        query.set_base_currency("0xAAA");
        query.change_page(4);

        query.set_quote_currency("0xBBB");
        assert_eq!(query.base_currency, "0xAAA");
        assert_eq!(query.quote_currency, "0xBBB");
        assert_eq!(query.pagination.page, 1);
    }

    #[test]
    fn to_request_snapshots_currencies_and_offset() {
        let mut query = TradeQuery::new(50);
        query.set_base_currency("0xAAA");
        query.change_page(2);

        let request = query.to_request();
        assert_eq!(request.per_page, 50);
        assert_eq!(request.offset, 100);
        assert_eq!(request.base_currency, "0xAAA");
        assert!(!request.is_pair_discovery());

        let empty = TradeQuery::new(50).to_request();
        assert!(empty.is_pair_discovery());
    }
}

use explorer_core::types::TradeRequest;
use serde::Serialize;
use serde_json::{json, Value};

/// GraphQL request body: document plus variables
#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest {
    pub query: String,
    pub variables: Value,
}

/// Build the dexTrades document for `request`.
///
/// Currency filters are only part of the document when the corresponding
/// address is set; the feed treats an explicit null filter differently from
/// an absent one.
pub fn trades_request(request: &TradeRequest, network: &str) -> GraphqlRequest {
    let mut params = vec![
        "$network: EthereumNetwork!",
        "$protocol: String!",
        "$limit: Int!",
        "$offset: Int!",
    ];
    let mut filters = vec![
        "options: {desc: \"tradeAmount\", limit: $limit, offset: $offset}",
        "protocol: {is: $protocol}",
    ];

    if !request.base_currency.is_empty() {
        params.push("$baseCurrency: String!");
        filters.push("baseCurrency: {is: $baseCurrency}");
    }
    if !request.quote_currency.is_empty() {
        params.push("$quoteCurrency: String!");
        filters.push("quoteCurrency: {is: $quoteCurrency}");
    }

    let query = format!(
        r#"query ({params}) {{
  ethereum(network: $network) {{
    dexTrades({filters}) {{
      count
      tradeAmount(in: USD)
      baseCurrency {{ address symbol name }}
      quoteCurrency {{ address symbol name }}
      quotePrice
      block {{ timestamp {{ time(format: "%Y-%m-%d %H:%M:%S") }} }}
      transaction {{ hash }}
    }}
  }}
}}"#,
        params = params.join(", "),
        filters = filters.join(", "),
    );

    let mut variables = json!({
        "network": network,
        "protocol": request.protocol.as_filter(),
        "limit": request.per_page,
        "offset": request.offset,
    });
    if !request.base_currency.is_empty() {
        variables["baseCurrency"] = Value::String(request.base_currency.clone());
    }
    if !request.quote_currency.is_empty() {
        variables["quoteCurrency"] = Value::String(request.quote_currency.clone());
    }

    GraphqlRequest { query, variables }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_core::types::Protocol;

    fn request(base: &str, quote: &str) -> TradeRequest {
        TradeRequest {
            protocol: Protocol::UniswapV2,
            per_page: 100,
            offset: 200,
            base_currency: base.to_string(),
            quote_currency: quote.to_string(),
        }
    }

    #[test]
    fn pair_discovery_document_has_no_currency_filters() {
        let body = trades_request(&request("", ""), "ethereum");

        assert!(!body.query.contains("baseCurrency: {is:"));
        assert!(!body.query.contains("quoteCurrency: {is:"));
        assert!(body.query.contains("protocol: {is: $protocol}"));
        assert!(body.variables.get("baseCurrency").is_none());
        assert!(body.variables.get("quoteCurrency").is_none());
    }

    #[test]
    fn base_currency_filter_appears_when_set() {
        let body = trades_request(&request("0xAAA", ""), "ethereum");

        assert!(body.query.contains("baseCurrency: {is: $baseCurrency}"));
        assert!(!body.query.contains("quoteCurrency: {is:"));
        assert_eq!(body.variables["baseCurrency"], "0xAAA");
        assert!(body.variables.get("quoteCurrency").is_none());
    }

    #[test]
    fn both_currency_filters_appear_when_set() {
        let body = trades_request(&request("0xAAA", "0xBBB"), "ethereum");

        assert!(body.query.contains("baseCurrency: {is: $baseCurrency}"));
        assert!(body.query.contains("quoteCurrency: {is: $quoteCurrency}"));
        assert_eq!(body.variables["baseCurrency"], "0xAAA");
        assert_eq!(body.variables["quoteCurrency"], "0xBBB");
    }

    #[test]
    fn variables_carry_pagination_and_protocol() {
        let body = trades_request(&request("", ""), "ethereum");

        assert_eq!(body.variables["network"], "ethereum");
        assert_eq!(body.variables["protocol"], "Uniswap v2");
        assert_eq!(body.variables["limit"], 100);
        assert_eq!(body.variables["offset"], 200);
    }
}

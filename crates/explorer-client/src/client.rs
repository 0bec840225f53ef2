use std::time::Duration;

use async_trait::async_trait;
use explorer_core::types::{DexTrade, TradePage, TradeRequest};
use explorer_core::TradesSource;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::BitqueryConfig;
use crate::graphql::{trades_request, GraphqlRequest};
use crate::{ClientError, Result};

/// HTTP client for the BitQuery dexTrades feed
pub struct BitqueryClient {
    http: Client,
    config: BitqueryConfig,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(default)]
    ethereum: Option<NetworkData>,
}

#[derive(Debug, Deserialize)]
struct NetworkData {
    #[serde(rename = "dexTrades", default)]
    dex_trades: Vec<DexTrade>,
}

impl BitqueryClient {
    pub fn new(config: BitqueryConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    async fn execute(&self, body: &GraphqlRequest) -> Result<TradePage> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .header("X-API-KEY", self.config.api_key.as_str())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        decode_trades(&text)
    }
}

/// Decode a raw GraphQL response body into a page of trades
fn decode_trades(body: &str) -> Result<TradePage> {
    let parsed: GraphqlResponse = serde_json::from_str(body)?;

    if let Some(err) = parsed.errors.first() {
        return Err(ClientError::Graphql(err.message.clone()));
    }

    let trades = parsed
        .data
        .and_then(|data| data.ethereum)
        .map(|network| network.dex_trades)
        .unwrap_or_default();

    Ok(TradePage { trades })
}

#[async_trait]
impl TradesSource for BitqueryClient {
    async fn fetch_trades(&self, request: &TradeRequest) -> explorer_core::Result<TradePage> {
        let body = trades_request(request, &self.config.network);
        debug!(
            protocol = request.protocol.as_filter(),
            limit = request.per_page,
            offset = request.offset,
            base_currency = %request.base_currency,
            quote_currency = %request.quote_currency,
            "Requesting dexTrades page"
        );

        match self.execute(&body).await {
            Ok(page) => {
                debug!(rows = page.len(), "dexTrades page received");
                Ok(page)
            }
            Err(e) => {
                warn!(error = %e, "dexTrades request failed");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_pair_discovery_rows() {
        let body = r#"{
            "data": {
                "ethereum": {
                    "dexTrades": [
                        {
                            "count": 4213,
                            "tradeAmount": 1250000.5,
                            "baseCurrency": {"address": "0xaaa", "symbol": "WETH", "name": "Wrapped Ether"},
                            "quoteCurrency": {"address": "0xbbb", "symbol": "USDC", "name": "USD Coin"},
                            "quotePrice": 1843.21
                        }
                    ]
                }
            }
        }"#;

        let page = decode_trades(body).unwrap();
        assert_eq!(page.len(), 1);

        let row = &page.trades[0];
        assert_eq!(row.count, Some(4213));
        assert_eq!(row.base_currency.symbol, "WETH");
        assert_eq!(row.quote_currency.address, "0xbbb");
        assert!(row.block.is_none());
        assert!(row.transaction.is_none());
    }

    #[test]
    fn decodes_transaction_rows_with_block_and_hash() {
        let body = r#"{
            "data": {
                "ethereum": {
                    "dexTrades": [
                        {
                            "tradeAmount": 532.75,
                            "baseCurrency": {"address": "0xaaa", "symbol": "WETH", "name": "Wrapped Ether"},
                            "quoteCurrency": {"address": "0xbbb", "symbol": "USDC", "name": "USD Coin"},
                            "quotePrice": 1843.21,
                            "block": {"timestamp": {"time": "2022-03-01 12:00:00"}},
                            "transaction": {"hash": "0xdeadbeef"}
                        }
                    ]
                }
            }
        }"#;

        let page = decode_trades(body).unwrap();
        let row = &page.trades[0];
        assert_eq!(row.count, None);
        assert_eq!(
            row.block.as_ref().map(|b| b.timestamp.time.as_str()),
            Some("2022-03-01 12:00:00")
        );
        assert_eq!(
            row.transaction.as_ref().map(|t| t.hash.as_str()),
            Some("0xdeadbeef")
        );
    }

    #[test]
    fn graphql_errors_become_failures() {
        let body = r#"{"data": null, "errors": [{"message": "rate limited"}]}"#;

        match decode_trades(body) {
            Err(ClientError::Graphql(message)) => assert_eq!(message, "rate limited"),
            other => panic!("expected GraphQL error, got {other:?}"),
        }
    }

    #[test]
    fn missing_data_decodes_to_empty_page() {
        let page = decode_trades(r#"{"data": {"ethereum": null}}"#).unwrap();
        assert!(page.is_empty());

        let page = decode_trades(r#"{"data": null}"#).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        match decode_trades("not json") {
            Err(ClientError::Decode(_)) => {}
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}

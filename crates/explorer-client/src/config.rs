use explorer_core::ExplorerError;

/// Connection settings for the trade feed
#[derive(Debug, Clone)]
pub struct BitqueryConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// API key sent in the X-API-KEY header
    pub api_key: String,
    /// Network argument for the query (e.g. "ethereum", "bsc")
    pub network: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://graphql.bitquery.io".to_string()
}

fn default_network() -> String {
    "ethereum".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl BitqueryConfig {
    pub fn from_env() -> explorer_core::Result<Self> {
        let api_key = std::env::var("BITQUERY_API_KEY")
            .map_err(|_| ExplorerError::MissingEnvVar("BITQUERY_API_KEY".to_string()))?;

        Ok(Self {
            endpoint: std::env::var("BITQUERY_URL").unwrap_or_else(|_| default_endpoint()),
            api_key,
            network: std::env::var("BITQUERY_NETWORK").unwrap_or_else(|_| default_network()),
            timeout_secs: std::env::var("BITQUERY_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_timeout_secs),
        })
    }
}

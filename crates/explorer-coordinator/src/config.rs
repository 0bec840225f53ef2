/// Coordinator tuning knobs
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Quiet period between the last state change and the fetch, in
    /// milliseconds
    pub debounce_ms: u64,
    /// Rows requested per page
    pub per_page: u32,
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_per_page() -> u32 {
    100
}

impl CoordinatorConfig {
    pub fn from_env() -> Self {
        Self {
            debounce_ms: std::env::var("QUERY_DEBOUNCE_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_debounce_ms),
            per_page: std::env::var("TRADES_PER_PAGE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_per_page),
        }
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

use std::sync::Arc;

use explorer_client::{BitqueryClient, BitqueryConfig};
use explorer_coordinator::{
    CoordinatorConfig, CoordinatorHandle, CoordinatorState, LogNotifier, QueryCoordinator,
};
use explorer_core::types::Protocol;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (ignore if not found)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    info!("DEX explorer starting...");

    let client_config = match BitqueryConfig::from_env() {
        Ok(config) => {
            info!(
                endpoint = %config.endpoint,
                network = %config.network,
                "Trade feed configured"
            );
            config
        }
        Err(e) => {
            error!(error = %e, "Failed to load trade feed configuration");
            std::process::exit(1);
        }
    };

    let coordinator_config = CoordinatorConfig::from_env();
    info!(
        debounce_ms = coordinator_config.debounce_ms,
        per_page = coordinator_config.per_page,
        "Coordinator configured"
    );

    let source = match BitqueryClient::new(client_config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client");
            std::process::exit(1);
        }
    };

    let handle = QueryCoordinator::spawn(coordinator_config, source, Arc::new(LogNotifier));

    // Re-render whenever the coordinator publishes a state change
    let mut updates = handle.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow().clone();
            render(&state);
        }
    });

    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if !handle_line(&handle, line.trim()).await {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    error!(error = %e, "Failed to read input");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received (Ctrl+C)");
                break;
            }
        }
    }

    info!("DEX explorer shutdown complete");
    Ok(())
}

/// Dispatch one console line into the coordinator. Returns false to exit.
async fn handle_line(handle: &CoordinatorHandle, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    match parts.next() {
        None => {}
        Some("quit") | Some("exit") => return false,
        Some("help") => print_help(),
        Some("show") => render(&handle.state()),
        Some("protocol") => match parts.next().and_then(parse_protocol) {
            Some(protocol) => handle.set_protocol(protocol).await,
            None => println!("usage: protocol <v2|v3|ps>"),
        },
        Some("base") => handle.set_base_currency(parts.next().unwrap_or("")).await,
        Some("quote") => handle.set_quote_currency(parts.next().unwrap_or("")).await,
        Some("next") => handle.change_page(1).await,
        Some("prev") => handle.change_page(-1).await,
        Some("select") => match parts.next().and_then(|s| s.parse::<usize>().ok()) {
            Some(row) => select_row(handle, row).await,
            None => println!("usage: select <row>"),
        },
        Some(other) => println!("unknown command: {other} (try: help)"),
    }
    true
}

/// Row selection mirrors the two events the result views emit: a pair row
/// selects its base token, a transaction row selects its quote token.
async fn select_row(handle: &CoordinatorHandle, row: usize) {
    let state = handle.state();
    if state.is_pair_discovery() {
        let Some(page) = state.pair_results.as_ref() else {
            println!("no pairs loaded yet");
            return;
        };
        match page.trades.get(row) {
            Some(trade) => {
                handle
                    .set_base_currency(trade.base_currency.address.clone())
                    .await
            }
            None => println!("row {row} out of range"),
        }
    } else {
        let Some(page) = state.transaction_results.as_ref() else {
            println!("no transactions loaded yet");
            return;
        };
        match page.trades.get(row) {
            Some(trade) => {
                handle
                    .set_quote_currency(trade.quote_currency.address.clone())
                    .await
            }
            None => println!("row {row} out of range"),
        }
    }
}

fn parse_protocol(s: &str) -> Option<Protocol> {
    match s.to_ascii_lowercase().as_str() {
        "v2" | "us2" | "uniswap-v2" => Some(Protocol::UniswapV2),
        "v3" | "us3" | "uniswap-v3" => Some(Protocol::UniswapV3),
        "ps" | "pancakeswap" => Some(Protocol::PancakeSwap),
        _ => None,
    }
}

fn render(state: &CoordinatorState) {
    let query = &state.query;
    println!();
    println!(
        "== {} | page {} | base: {} | quote: {} | {}",
        query.protocol,
        query.pagination.page,
        label(&query.base_currency),
        label(&query.quote_currency),
        if state.loading { "loading..." } else { "idle" },
    );

    if state.is_pair_discovery() {
        match &state.pair_results {
            Some(page) if !page.is_empty() => {
                println!(
                    "{:>3}  {:<10} {:<10} {:>10} {:>18}",
                    "#", "base", "quote", "trades", "volume (USD)"
                );
                for (i, trade) in page.trades.iter().enumerate() {
                    println!(
                        "{:>3}  {:<10} {:<10} {:>10} {:>18.2}",
                        i,
                        trade.base_currency.symbol,
                        trade.quote_currency.symbol,
                        trade.count.unwrap_or(0),
                        trade.trade_amount.unwrap_or(0.0),
                    );
                }
            }
            Some(_) => println!("(no pairs)"),
            None => println!("(waiting for first page)"),
        }
    } else {
        match &state.transaction_results {
            Some(page) if !page.is_empty() => {
                println!(
                    "{:>3}  {:<20} {:<10} {:>16} {:>18}",
                    "#", "time", "quote", "price", "volume (USD)"
                );
                for (i, trade) in page.trades.iter().enumerate() {
                    let time = trade
                        .block
                        .as_ref()
                        .map(|b| b.timestamp.time.as_str())
                        .unwrap_or("-");
                    println!(
                        "{:>3}  {:<20} {:<10} {:>16.8} {:>18.2}",
                        i,
                        time,
                        trade.quote_currency.symbol,
                        trade.quote_price.unwrap_or(0.0),
                        trade.trade_amount.unwrap_or(0.0),
                    );
                }
            }
            Some(_) => println!("(no transactions)"),
            None => println!("(waiting for transactions)"),
        }
    }
}

fn label(currency: &str) -> &str {
    if currency.is_empty() {
        "-"
    } else {
        currency
    }
}

fn print_help() {
    println!("commands:");
    println!("  protocol <v2|v3|ps>   switch DEX protocol (clears filters)");
    println!("  base [address]        set or clear the base token filter");
    println!("  quote [address]       set or clear the quote token filter");
    println!("  select <row>          pick a row (base token in pair view, quote token in transaction view)");
    println!("  next | prev           page through results");
    println!("  show                  reprint the current view");
    println!("  quit                  exit");
}

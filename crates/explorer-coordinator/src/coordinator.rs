use std::sync::Arc;
use std::time::Duration;

use explorer_core::types::{Protocol, TradePage, TradeQuery, TradeRequest};
use explorer_core::TradesSource;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::config::CoordinatorConfig;
use crate::notify::{NotificationKind, Notifier};

/// State-changing inputs accepted from the presentation layer
#[derive(Debug, Clone)]
enum Command {
    SetProtocol(Protocol),
    SetBaseCurrency(String),
    SetQuoteCurrency(String),
    ChangePage(i32),
}

/// Outcome of one spawned fetch, tagged with the request snapshot it used
struct Settled {
    request: TradeRequest,
    outcome: explorer_core::Result<TradePage>,
}

/// Observable coordinator state. Cloned out through a watch channel so the
/// presentation layer never holds a reference into the actor's own state.
#[derive(Debug, Clone)]
pub struct CoordinatorState {
    pub query: TradeQuery,
    pub loading: bool,
    pub pair_results: Option<TradePage>,
    pub transaction_results: Option<TradePage>,
}

impl CoordinatorState {
    /// True while no base currency is set and the pair list is the active
    /// view
    pub fn is_pair_discovery(&self) -> bool {
        self.query.base_currency.is_empty()
    }
}

/// Handle for feeding events into the coordinator and observing its state
#[derive(Clone)]
pub struct CoordinatorHandle {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<CoordinatorState>,
}

impl CoordinatorHandle {
    /// Replace the protocol, clearing both currency filters
    pub async fn set_protocol(&self, protocol: Protocol) {
        self.send(Command::SetProtocol(protocol)).await;
    }

    /// Set the base currency; an empty address returns to pair discovery
    pub async fn set_base_currency(&self, address: impl Into<String>) {
        self.send(Command::SetBaseCurrency(address.into())).await;
    }

    /// Set the quote currency for the transaction view
    pub async fn set_quote_currency(&self, address: impl Into<String>) {
        self.send(Command::SetQuoteCurrency(address.into())).await;
    }

    /// Move `delta` pages forward or back, clamped at page 1
    pub async fn change_page(&self, delta: i32) {
        self.send(Command::ChangePage(delta)).await;
    }

    /// Subscribe to state snapshots; the receiver wakes on every change
    pub fn subscribe(&self) -> watch::Receiver<CoordinatorState> {
        self.state.clone()
    }

    /// Read the latest published state
    pub fn state(&self) -> CoordinatorState {
        self.state.borrow().clone()
    }

    async fn send(&self, command: Command) {
        if self.commands.send(command).await.is_err() {
            debug!("Coordinator stopped, dropping command");
        }
    }
}

/// Debounce-and-fetch coordinator.
///
/// Owns the current query and both result slots. Every state-changing
/// command re-arms a single deadline; when the quiet period elapses the
/// coordinator snapshots the query into a request, marks itself loading and
/// spawns the fetch. A settled fetch routes its page by the snapshot's base
/// currency (pair slot when empty, transaction slot otherwise), or emits one
/// error notification, and clears the loading flag either way.
pub struct QueryCoordinator {
    source: Arc<dyn TradesSource>,
    notifier: Arc<dyn Notifier>,
    quiet_period: Duration,
    commands: mpsc::Receiver<Command>,
    settled_tx: mpsc::Sender<Settled>,
    settled_rx: mpsc::Receiver<Settled>,
    state: CoordinatorState,
    state_tx: watch::Sender<CoordinatorState>,
}

impl QueryCoordinator {
    /// Spawn the coordinator task and return its handle. The debounce
    /// deadline starts armed so the first page loads without user input.
    pub fn spawn(
        config: CoordinatorConfig,
        source: Arc<dyn TradesSource>,
        notifier: Arc<dyn Notifier>,
    ) -> CoordinatorHandle {
        let (command_tx, command_rx) = mpsc::channel(64);
        let (settled_tx, settled_rx) = mpsc::channel(16);

        let state = CoordinatorState {
            query: TradeQuery::new(config.per_page),
            loading: false,
            pair_results: None,
            transaction_results: None,
        };
        let (state_tx, state_rx) = watch::channel(state.clone());

        let coordinator = Self {
            source,
            notifier,
            quiet_period: Duration::from_millis(config.debounce_ms),
            commands: command_rx,
            settled_tx,
            settled_rx,
            state,
            state_tx,
        };
        tokio::spawn(coordinator.run());

        CoordinatorHandle {
            commands: command_tx,
            state: state_rx,
        }
    }

    async fn run(mut self) {
        // Armed at startup: the initial query fetches after one quiet period
        let mut deadline = Some(Instant::now() + self.quiet_period);

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => {
                        self.apply(command);
                        deadline = Some(Instant::now() + self.quiet_period);
                        self.publish();
                    }
                    None => break,
                },

                Some(settled) = self.settled_rx.recv() => {
                    self.settle(settled);
                    self.publish();
                }

                _ = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    deadline = None;
                    self.dispatch_fetch();
                    self.publish();
                }
            }
        }
    }

    fn apply(&mut self, command: Command) {
        let query = &mut self.state.query;
        match command {
            Command::SetProtocol(protocol) => query.set_protocol(protocol),
            Command::SetBaseCurrency(address) => query.set_base_currency(address),
            Command::SetQuoteCurrency(address) => query.set_quote_currency(address),
            Command::ChangePage(delta) => query.change_page(delta),
        }
    }

    /// Snapshot the current query and launch the fetch for it.
    ///
    /// Fetches are fire-and-forget: nothing cancels or sequence-checks them,
    /// so a slow response from a superseded request can still land in a slot
    /// after a newer response, and it clears the loading flag when it
    /// settles.
    fn dispatch_fetch(&mut self) {
        let request = self.state.query.to_request();
        self.state.loading = true;

        info!(
            protocol = request.protocol.as_filter(),
            page = self.state.query.pagination.page,
            offset = request.offset,
            pair_discovery = request.is_pair_discovery(),
            "Dispatching trade fetch"
        );

        let source = self.source.clone();
        let settled_tx = self.settled_tx.clone();
        tokio::spawn(async move {
            let outcome = source.fetch_trades(&request).await;
            if settled_tx.send(Settled { request, outcome }).await.is_err() {
                debug!("Coordinator stopped before fetch settled");
            }
        });
    }

    fn settle(&mut self, settled: Settled) {
        self.state.loading = false;

        match settled.outcome {
            Ok(page) => {
                debug!(
                    rows = page.len(),
                    pair_discovery = settled.request.is_pair_discovery(),
                    "Trade fetch settled"
                );
                if settled.request.is_pair_discovery() {
                    self.state.pair_results = Some(page);
                } else {
                    self.state.transaction_results = Some(page);
                }
            }
            Err(e) => {
                warn!(error = %e, "Trade fetch failed");
                self.notifier.notify(
                    NotificationKind::Error,
                    "Something went wrong",
                    "Please check your internet connection.",
                );
            }
        }
    }

    fn publish(&self) {
        let _ = self.state_tx.send(self.state.clone());
    }
}

//! Panel state machine: Idle → Loading → {Success, Failed}.
//!
//! Each panel owns one `PanelSource` and tracks at most one current request
//! through a generation counter. A completion whose generation is no longer
//! current is discarded, so the most recent selection always wins. Panels whose
//! category caches results keep every successful fetch per stock for the life
//! of the panel and serve revisits straight from that map.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::bus::EventBus;
use crate::catalog::Stock;
use crate::category::Category;
use crate::error::FetchError;
use crate::events::{Event, PanelPhase, PanelTransition};

/// Something that can produce a panel's content for one stock.
#[async_trait]
pub trait PanelSource: Send + Sync + 'static {
    type Output: Clone + Serialize + Send + Sync + 'static;

    fn category(&self) -> Category;

    /// Fixed text rendered in the `Failed` state
    fn failure_text(&self) -> &'static str;

    async fn fetch(&self, stock: &Stock) -> Result<Self::Output, FetchError>;
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelState<T> {
    Idle,
    Loading {
        stock_id: u32,
        placeholders: usize,
    },
    Success {
        stock_id: u32,
        content: T,
        fetched_at: DateTime<Utc>,
        from_cache: bool,
    },
    Failed {
        stock_id: u32,
        message: String,
    },
}

impl<T> PanelState<T> {
    pub fn stock_id(&self) -> Option<u32> {
        match self {
            PanelState::Idle => None,
            PanelState::Loading { stock_id, .. }
            | PanelState::Success { stock_id, .. }
            | PanelState::Failed { stock_id, .. } => Some(*stock_id),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PanelState::Loading { .. })
    }
}

#[derive(Clone, Debug)]
pub struct CachedResult<T> {
    pub content: T,
    pub fetched_at: DateTime<Utc>,
}

/// Identifies one request; only the current generation may update the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub stock_id: u32,
    pub generation: u64,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Begin {
    /// A request must be issued with this ticket
    Fetch(LoadTicket),
    /// Served from the per-stock cache; no request
    Cached,
    /// The same stock is already loading
    InFlight,
}

struct PanelInner<T> {
    state: PanelState<T>,
    generation: u64,
}

pub struct Panel<S: PanelSource> {
    source: S,
    cache: Option<DashMap<u32, CachedResult<S::Output>>>,
    inner: Mutex<PanelInner<S::Output>>,
    bus: EventBus,
}

impl<S: PanelSource> Panel<S> {
    pub fn new(source: S, bus: EventBus) -> Self {
        let cache = source.category().caches_results().then(DashMap::new);
        Self {
            source,
            cache,
            inner: Mutex::new(PanelInner {
                state: PanelState::Idle,
                generation: 0,
            }),
            bus,
        }
    }

    pub fn category(&self) -> Category {
        self.source.category()
    }

    pub fn state(&self) -> PanelState<S::Output> {
        self.inner.lock().unwrap().state.clone()
    }

    pub fn cached(&self, stock_id: u32) -> Option<CachedResult<S::Output>> {
        self.cache
            .as_ref()
            .and_then(|c| c.get(&stock_id).map(|entry| entry.value().clone()))
    }

    /// True when the panel holds nothing for `stock` yet.
    pub fn needs_load(&self, stock: &Stock) -> bool {
        self.inner.lock().unwrap().state.stock_id() != Some(stock.id)
    }

    fn publish(&self, stock_id: u32, phase: PanelPhase, generation: u64, from_cache: bool) {
        self.bus.publish(Event::Panel(PanelTransition {
            category: self.category(),
            stock_id,
            phase,
            generation,
            from_cache,
        }));
    }

    /// Enter `Loading` for `stock`, unless the cache or an in-flight request
    /// already covers it.
    pub fn begin(&self, stock: &Stock) -> Begin {
        let mut inner = self.inner.lock().unwrap();

        if let Some(hit) = self.cached(stock.id) {
            // Invalidate whatever was loading for another stock.
            inner.generation += 1;
            inner.state = PanelState::Success {
                stock_id: stock.id,
                content: hit.content,
                fetched_at: hit.fetched_at,
                from_cache: true,
            };
            info!("🗂️ [PANEL] {} cache hit for {}", self.category(), stock.ticker);
            self.publish(stock.id, PanelPhase::Success, inner.generation, true);
            return Begin::Cached;
        }

        if let PanelState::Loading { stock_id, .. } = inner.state {
            if stock_id == stock.id {
                debug!("🗂️ [PANEL] {} already loading {}", self.category(), stock.ticker);
                return Begin::InFlight;
            }
        }

        inner.generation += 1;
        inner.state = PanelState::Loading {
            stock_id: stock.id,
            placeholders: self.category().placeholder_count(),
        };
        info!(
            "🗂️ [PANEL] {} loading {} (generation {})",
            self.category(),
            stock.ticker,
            inner.generation
        );
        self.publish(stock.id, PanelPhase::Loading, inner.generation, false);

        Begin::Fetch(LoadTicket {
            stock_id: stock.id,
            generation: inner.generation,
        })
    }

    /// Apply a completed request. Returns false when the ticket was stale and
    /// the displayed state was left untouched.
    pub fn finish(&self, ticket: LoadTicket, result: Result<S::Output, FetchError>) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let fetched_at = Utc::now();

        if ticket.generation != inner.generation {
            // Still a valid answer for its own stock.
            if let (Ok(content), Some(cache)) = (&result, &self.cache) {
                cache.insert(
                    ticket.stock_id,
                    CachedResult { content: content.clone(), fetched_at },
                );
            }
            debug!(
                "🗂️ [PANEL] {} discarding stale result for stock {} (generation {} < {})",
                self.category(),
                ticket.stock_id,
                ticket.generation,
                inner.generation
            );
            self.publish(ticket.stock_id, PanelPhase::Discarded, ticket.generation, false);
            return false;
        }

        match result {
            Ok(content) => {
                if let Some(cache) = &self.cache {
                    cache.insert(
                        ticket.stock_id,
                        CachedResult { content: content.clone(), fetched_at },
                    );
                }
                inner.state = PanelState::Success {
                    stock_id: ticket.stock_id,
                    content,
                    fetched_at,
                    from_cache: false,
                };
                info!("✅ [PANEL] {} ready for stock {}", self.category(), ticket.stock_id);
                self.publish(ticket.stock_id, PanelPhase::Success, ticket.generation, false);
            }
            Err(e) => {
                warn!(
                    "❌ [PANEL] {} failed for stock {} ({}): {}",
                    self.category(),
                    ticket.stock_id,
                    e.kind(),
                    e
                );
                inner.state = PanelState::Failed {
                    stock_id: ticket.stock_id,
                    message: self.source.failure_text().to_string(),
                };
                self.publish(ticket.stock_id, PanelPhase::Failed, ticket.generation, false);
            }
        }
        true
    }

    /// Fetch for a ticket obtained from `begin` and apply the result.
    pub async fn run(&self, ticket: LoadTicket, stock: Stock) -> bool {
        let result = self.source.fetch(&stock).await;
        self.finish(ticket, result)
    }

    /// `begin` + `run` in one call; returns the resulting state.
    pub async fn load(&self, stock: &Stock) -> PanelState<S::Output> {
        if let Begin::Fetch(ticket) = self.begin(stock) {
            self.run(ticket, stock.clone()).await;
        }
        self.state()
    }
}

/// Object-safe view of a panel, so the dashboard can route by category
/// without knowing each panel's content type.
pub trait PanelHandle: Send + Sync {
    fn category(&self) -> Category;

    fn snapshot(&self) -> serde_json::Result<serde_json::Value>;

    /// Trigger the panel for `stock`. With `force == false` this only starts
    /// a request when the panel holds nothing for `stock`. Returns the spawned
    /// fetch, if any.
    fn activate(self: Arc<Self>, stock: &Stock, force: bool) -> Option<JoinHandle<bool>>;
}

impl<S: PanelSource> PanelHandle for Panel<S> {
    fn category(&self) -> Category {
        Panel::category(self)
    }

    fn snapshot(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.state())
    }

    fn activate(self: Arc<Self>, stock: &Stock, force: bool) -> Option<JoinHandle<bool>> {
        if !force && !self.needs_load(stock) {
            return None;
        }
        match self.begin(stock) {
            Begin::Fetch(ticket) => {
                let stock = stock.clone();
                Some(tokio::spawn(async move { self.run(ticket, stock).await }))
            }
            Begin::Cached | Begin::InFlight => None,
        }
    }
}

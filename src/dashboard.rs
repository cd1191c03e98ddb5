//! Selection shell: the selected stock, the selected tab, and routing of the
//! selection into the active panel.
//!
//! Panels never talk to each other. A failure in one stays in that panel's
//! state; the shell only decides which panel to trigger and when.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::info;

use crate::analytics::AnalyticsClient;
use crate::bus::EventBus;
use crate::catalog::{Catalog, Stock};
use crate::category::Category;
use crate::charts::{ChartKind, ChartPanel};
use crate::config::ChartsConfig;
use crate::error::DashboardError;
use crate::events::Event;
use crate::llm::TextModel;
use crate::panel::{Panel, PanelHandle};
use crate::sources::{DeepAnalyzeSource, NewsSource, RedditSource, StreamLitSource, TwitterSource};

#[derive(Clone, Debug, Serialize)]
pub struct Selection {
    pub stock: Stock,
    pub category: Category,
}

#[derive(Clone, Debug, Serialize)]
pub struct PanelSnapshot {
    pub category: Category,
    pub title: String,
    pub stock: Stock,
    pub state: serde_json::Value,
}

/// Result of triggering a panel: what it shows now, plus the spawned fetch
/// when one was started.
pub struct Activation {
    pub snapshot: PanelSnapshot,
    pub task: Option<JoinHandle<bool>>,
}

pub struct Dashboard {
    catalog: Catalog,
    selection: Mutex<Selection>,
    panels: HashMap<Category, Arc<dyn PanelHandle>>,
    charts: ChartPanel,
    bus: EventBus,
}

impl Dashboard {
    pub fn new(
        catalog: Catalog,
        initial_stock: Stock,
        model: Arc<dyn TextModel>,
        analytics: AnalyticsClient,
        charts: ChartsConfig,
        bus: EventBus,
    ) -> Self {
        let mut panels: HashMap<Category, Arc<dyn PanelHandle>> = HashMap::new();
        panels.insert(
            Category::News,
            Arc::new(Panel::new(NewsSource::new(model.clone()), bus.clone())),
        );
        panels.insert(
            Category::Reddit,
            Arc::new(Panel::new(RedditSource::new(model.clone()), bus.clone())),
        );
        panels.insert(
            Category::Twitter,
            Arc::new(Panel::new(TwitterSource::new(model.clone()), bus.clone())),
        );
        panels.insert(
            Category::DeepAnalyze,
            Arc::new(Panel::new(DeepAnalyzeSource::new(model), bus.clone())),
        );
        panels.insert(
            Category::StreamLit,
            Arc::new(Panel::new(StreamLitSource::new(analytics), bus.clone())),
        );

        Self {
            catalog,
            selection: Mutex::new(Selection {
                stock: initial_stock,
                category: Category::News,
            }),
            panels,
            charts: ChartPanel::new(charts),
            bus,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> Selection {
        self.selection.lock().unwrap().clone()
    }

    /// Select a stock and trigger the active panel when the stock changed.
    /// The selection stays locked until the panel has begun, so panels see
    /// selections in the order they were made.
    pub fn select_stock(&self, stock_id: u32) -> Result<Activation, DashboardError> {
        let stock = self
            .catalog
            .find(stock_id)
            .cloned()
            .ok_or(DashboardError::UnknownStock(stock_id))?;

        let mut selection = self.selection.lock().unwrap();
        let changed = selection.stock.id != stock.id;
        selection.stock = stock.clone();

        if changed {
            info!("📌 [SHELL] Selected {} ({})", stock.name, stock.ticker);
            self.bus.publish(Event::StockSelected {
                stock_id: stock.id,
                ticker: stock.ticker.clone(),
            });
        }

        self.activate(selection.category, &stock, changed)
    }

    /// Switch tabs. Entering a tab mounts its panel afresh, so non-caching
    /// panels refetch while caching panels serve their cache.
    pub fn select_category(&self, category: Category) -> Result<Activation, DashboardError> {
        let mut selection = self.selection.lock().unwrap();
        selection.category = category;

        info!("📌 [SHELL] Tab {} for {}", category, selection.stock.ticker);
        self.bus.publish(Event::CategorySelected { category });

        self.activate(category, &selection.stock, true)
    }

    /// The active panel as it stands. Only starts a request when the panel
    /// has nothing for the selected stock yet.
    pub fn current_panel(&self) -> Result<Activation, DashboardError> {
        let selection = self.selection.lock().unwrap();
        self.activate(selection.category, &selection.stock, false)
    }

    /// A chart embed reported it finished loading for `stock_id`. Stale
    /// signals for a previously shown stock leave the embeds untouched.
    pub fn mark_chart_loaded(
        &self,
        kind: ChartKind,
        stock_id: u32,
    ) -> Result<PanelSnapshot, DashboardError> {
        let selection = self.selection.lock().unwrap();
        self.charts.show(&selection.stock);
        self.charts.mark_loaded(stock_id, kind);
        self.snapshot(Category::Data, &selection.stock)
    }

    fn activate(
        &self,
        category: Category,
        stock: &Stock,
        force: bool,
    ) -> Result<Activation, DashboardError> {
        let task = match self.panels.get(&category) {
            Some(panel) => panel.clone().activate(stock, force),
            None => {
                self.charts.show(stock);
                None
            }
        };
        Ok(Activation {
            snapshot: self.snapshot(category, stock)?,
            task,
        })
    }

    pub fn snapshot(&self, category: Category, stock: &Stock) -> Result<PanelSnapshot, DashboardError> {
        let state = match self.panels.get(&category) {
            Some(panel) => panel.snapshot()?,
            None => serde_json::to_value(self.charts.snapshot())?,
        };
        Ok(PanelSnapshot {
            category,
            title: format!("{} - {}", stock.name, category.label()),
            stock: stock.clone(),
            state,
        })
    }
}

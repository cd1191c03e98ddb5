//! Data tab: two third-party chart embeds keyed by ticker.
//!
//! Nothing is fetched here; the front end embeds the URLs and reports back
//! when each frame has loaded. Until then the embed shows a placeholder.

use serde::Serialize;
use std::sync::Mutex;
use tracing::debug;
use url::Url;

use crate::catalog::Stock;
use crate::config::ChartsConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    HistoricalPrices,
    PricesChange,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::HistoricalPrices, ChartKind::PricesChange];

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::HistoricalPrices => "Financial Chart",
            ChartKind::PricesChange => "Price Change Chart",
        }
    }

    fn path(&self) -> &'static str {
        match self {
            ChartKind::HistoricalPrices => "HistoricalPrices",
            ChartKind::PricesChange => "PricesChange",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().replace('-', "_").as_str() {
            "historical_prices" | "historicalprices" => Some(ChartKind::HistoricalPrices),
            "prices_change" | "priceschange" => Some(ChartKind::PricesChange),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ChartEmbed {
    pub kind: ChartKind,
    pub title: &'static str,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub loaded: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ChartsView {
    pub stock_id: Option<u32>,
    pub embeds: Vec<ChartEmbed>,
}

pub fn embed_url(config: &ChartsConfig, kind: ChartKind, ticker: &str) -> Option<String> {
    let base = format!("{}/{}", config.base_url.trim_end_matches('/'), kind.path());
    let mut params: Vec<(&str, &str)> = Vec::new();
    if let Some(key) = config.app_key.as_deref() {
        params.push(("app-key", key));
    }
    params.push(("symbol", ticker));
    match kind {
        ChartKind::HistoricalPrices => {
            params.push(("dividends", "true"));
            params.push(("splits", "true"));
            params.push(("palette", config.palette.as_str()));
        }
        ChartKind::PricesChange => {
            params.push(("palette", config.palette.as_str()));
            params.push(("showLogo", "Title"));
        }
    }
    Url::parse_with_params(&base, &params).ok().map(String::from)
}

pub struct ChartPanel {
    config: ChartsConfig,
    view: Mutex<ChartsView>,
}

impl ChartPanel {
    pub fn new(config: ChartsConfig) -> Self {
        Self {
            config,
            view: Mutex::new(ChartsView { stock_id: None, embeds: Vec::new() }),
        }
    }

    /// Point the embeds at `stock`. Load flags reset only when the stock changes.
    pub fn show(&self, stock: &Stock) -> ChartsView {
        let mut view = self.view.lock().unwrap();
        if view.stock_id != Some(stock.id) {
            view.stock_id = Some(stock.id);
            view.embeds = ChartKind::ALL
                .iter()
                .filter_map(|&kind| {
                    embed_url(&self.config, kind, &stock.ticker).map(|url| ChartEmbed {
                        kind,
                        title: kind.title(),
                        url,
                        width: self.config.width,
                        height: self.config.height,
                        loaded: false,
                    })
                })
                .collect();
        }
        view.clone()
    }

    /// Record that one embed finished loading for `stock_id`; the other keeps
    /// its placeholder. Signals for a stock no longer shown are ignored.
    pub fn mark_loaded(&self, stock_id: u32, kind: ChartKind) -> ChartsView {
        let mut view = self.view.lock().unwrap();
        if view.stock_id != Some(stock_id) {
            debug!("📈 [CHARTS] Ignoring {:?} load for stock {}", kind, stock_id);
            return view.clone();
        }
        if let Some(embed) = view.embeds.iter_mut().find(|e| e.kind == kind) {
            embed.loaded = true;
        }
        view.clone()
    }

    pub fn snapshot(&self) -> ChartsView {
        self.view.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(id: u32, ticker: &str) -> Stock {
        Stock { id, ticker: ticker.into(), name: ticker.into(), description: String::new() }
    }

    fn config() -> ChartsConfig {
        ChartsConfig { app_key: Some("KEY".into()), ..ChartsConfig::default() }
    }

    #[test]
    fn test_embed_urls() {
        let url = embed_url(&config(), ChartKind::HistoricalPrices, "AAPL").unwrap();
        assert_eq!(
            url,
            "https://api.stockdio.com/visualization/financial/charts/v1/HistoricalPrices?app-key=KEY&symbol=AAPL&dividends=true&splits=true&palette=Financial-Light"
        );
        let url = embed_url(&config(), ChartKind::PricesChange, "AAPL").unwrap();
        assert!(url.ends_with("PricesChange?app-key=KEY&symbol=AAPL&palette=Financial-Light&showLogo=Title"));
    }

    #[test]
    fn test_embeds_load_independently() {
        let panel = ChartPanel::new(config());
        let view = panel.show(&stock(1, "AAPL"));
        assert_eq!(view.embeds.len(), 2);
        assert!(view.embeds.iter().all(|e| !e.loaded));

        let view = panel.mark_loaded(1, ChartKind::PricesChange);
        assert!(!view.embeds[0].loaded);
        assert!(view.embeds[1].loaded);
    }

    #[test]
    fn test_stock_change_resets_load_flags() {
        let panel = ChartPanel::new(config());
        panel.show(&stock(1, "AAPL"));
        panel.mark_loaded(1, ChartKind::HistoricalPrices);

        // same stock keeps the flag
        assert!(panel.show(&stock(1, "AAPL")).embeds[0].loaded);

        let view = panel.show(&stock(2, "MSFT"));
        assert!(view.embeds.iter().all(|e| !e.loaded));
        assert!(view.embeds[0].url.contains("symbol=MSFT"));
    }

    #[test]
    fn test_load_signal_for_previous_stock_ignored() {
        let panel = ChartPanel::new(config());
        panel.show(&stock(1, "AAPL"));
        panel.show(&stock(2, "MSFT"));

        let view = panel.mark_loaded(1, ChartKind::HistoricalPrices);
        assert_eq!(view.stock_id, Some(2));
        assert!(view.embeds.iter().all(|e| !e.loaded));

        let view = panel.mark_loaded(2, ChartKind::HistoricalPrices);
        assert!(view.embeds[0].loaded);
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(ChartKind::parse("historical-prices"), Some(ChartKind::HistoricalPrices));
        assert_eq!(ChartKind::parse("prices_change"), Some(ChartKind::PricesChange));
        assert_eq!(ChartKind::parse("candles"), None);
    }
}

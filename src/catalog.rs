//! Selectable stocks, grouped into bins for the navigation drawer.
//!
//! The catalog is data, not code: it arrives through `AppConfig` and is
//! immutable for the life of the process.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: u32,
    pub ticker: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StockBin {
    pub label: String,
    pub stocks: Vec<Stock>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Catalog {
    bins: Vec<StockBin>,
}

impl Catalog {
    /// Build a catalog, rejecting empty catalogs and duplicate ids.
    /// Tickers may repeat across bins (the same company can sit in two lists).
    pub fn new(bins: Vec<StockBin>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        let mut count = 0usize;
        for bin in &bins {
            for stock in &bin.stocks {
                if !seen.insert(stock.id) {
                    return Err(ConfigError::Invalid(format!(
                        "duplicate stock id {} ({})",
                        stock.id, stock.ticker
                    )));
                }
                count += 1;
            }
        }
        if count == 0 {
            return Err(ConfigError::Invalid("stock catalog is empty".to_string()));
        }
        Ok(Self { bins })
    }

    pub fn bins(&self) -> &[StockBin] {
        &self.bins
    }

    pub fn stocks(&self) -> impl Iterator<Item = &Stock> {
        self.bins.iter().flat_map(|b| b.stocks.iter())
    }

    pub fn find(&self, id: u32) -> Option<&Stock> {
        self.stocks().find(|s| s.id == id)
    }

    /// First stock of the first non-empty bin
    pub fn first(&self) -> Option<&Stock> {
        self.stocks().next()
    }

    pub fn len(&self) -> usize {
        self.stocks().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

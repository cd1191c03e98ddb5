//! Stock Pulse - AI-assisted stock dashboard service
//!
//! This library provides the dashboard core: prompt construction, reply
//! normalization, per-panel state with per-stock caching, and the HTTP
//! surface that exposes it to a front end.

pub mod analytics;
pub mod api;
pub mod bus;
pub mod catalog;
pub mod category;
pub mod charts;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod llm;
pub mod normalize;
pub mod panel;
pub mod prompts;
pub mod sentiment;
pub mod sources;

// Re-export commonly used types
pub use bus::EventBus;
pub use catalog::{Catalog, Stock};
pub use category::Category;
pub use config::AppConfig;
pub use dashboard::Dashboard;
pub use error::{ConfigError, FetchError};
pub use events::{Event, PanelPhase};

#[cfg(test)]
mod bus_tests;

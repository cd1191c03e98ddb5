//! Fixed vocabularies and default values
//!
//! Everything the dashboard shows verbatim (links, icons, failure texts) lives
//! here so the panels and the normalizer agree on one table.

/// Generative text API defaults
pub mod llm {
    /// Model used when the configuration does not name one
    pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

    /// OpenAI-compatible endpoint of the default model provider
    pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

    /// Environment variables checked (in order) for the API credential
    pub const API_KEY_ENV_VARS: [&str; 2] = ["LLM_API_KEY", "GEMINI_API_KEY"];
}

/// News publishers the model is allowed to cite, and where "Read more" points
pub mod sources {
    pub const NEWS_SOURCE_LINKS: [(&str, &str); 4] = [
        ("Wall Street Journal", "https://www.wsj.com"),
        ("Financial Times", "https://www.ft.com"),
        ("New York Times", "https://www.nytimes.com"),
        ("Bloomberg", "https://www.bloomberg.com"),
    ];

    /// Link used when a source is not in the table
    pub const UNKNOWN_SOURCE_LINK: &str = "#";

    pub const SUBREDDITS: [&str; 4] = [
        "r/wallstreetbets",
        "r/investing",
        "r/stocks",
        "r/stockmarket",
    ];
}

/// Sentiment chip icons
pub mod icons {
    pub const THUMBS_UP: &str = "👍";
    pub const THUMBS_DOWN: &str = "👎";
    pub const SHRUG: &str = "🤷‍♂️";
}

/// Texts rendered when a panel lands in `Failed`
pub mod failure {
    pub const NEWS: &str = "Unable to fetch news.";
    pub const REDDIT: &str = "Unable to fetch Reddit summary.";
    pub const TWITTER: &str = "Unable to fetch tweets.";
    pub const DEEP_ANALYZE: &str = "Unable to fetch recommendation. Please try again later.";
    pub const STREAMLIT: &str = "Unable to load StreamLit data.";
}

/// Third-party chart embeds
pub mod charts {
    pub const DEFAULT_BASE_URL: &str = "https://api.stockdio.com/visualization/financial/charts/v1";
    pub const DEFAULT_PALETTE: &str = "Financial-Light";
    pub const DEFAULT_WIDTH: u32 = 800;
    pub const DEFAULT_HEIGHT: u32 = 420;
}

/// Misc server defaults
pub mod server {
    pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
    pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
    pub const CONFIG_PATH_ENV: &str = "STOCK_PULSE_CONFIG";
    pub const EVENT_BUS_CAPACITY: usize = 256;
}

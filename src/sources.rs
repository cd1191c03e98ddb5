//! Content sources behind each fetching panel.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::analytics::{AnalyticsClient, StreamLitReport};
use crate::catalog::Stock;
use crate::category::Category;
use crate::constants::failure;
use crate::error::FetchError;
use crate::llm::TextModel;
use crate::normalize::{
    normalize_news, normalize_recommendation, normalize_threads, normalize_tweets, NewsArticle,
    Recommendation, RedditThread, Tweet,
};
use crate::panel::PanelSource;
use crate::prompts::{build_prompt, Intent};

async fn ask(model: &dyn TextModel, stock: &Stock, intent: Intent) -> Result<String, FetchError> {
    info!("🧾 [{:?}] Prompting model about {} ({})", intent, stock.name, stock.ticker);
    model.generate(&build_prompt(&stock.name, intent)).await
}

pub struct NewsSource {
    model: Arc<dyn TextModel>,
}

impl NewsSource {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl PanelSource for NewsSource {
    type Output = Vec<NewsArticle>;

    fn category(&self) -> Category {
        Category::News
    }

    fn failure_text(&self) -> &'static str {
        failure::NEWS
    }

    async fn fetch(&self, stock: &Stock) -> Result<Self::Output, FetchError> {
        let reply = ask(self.model.as_ref(), stock, Intent::News).await?;
        normalize_news(&reply)
    }
}

pub struct RedditSource {
    model: Arc<dyn TextModel>,
}

impl RedditSource {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl PanelSource for RedditSource {
    type Output = Vec<RedditThread>;

    fn category(&self) -> Category {
        Category::Reddit
    }

    fn failure_text(&self) -> &'static str {
        failure::REDDIT
    }

    async fn fetch(&self, stock: &Stock) -> Result<Self::Output, FetchError> {
        let reply = ask(self.model.as_ref(), stock, Intent::RedditThreads).await?;
        normalize_threads(&reply)
    }
}

pub struct TwitterSource {
    model: Arc<dyn TextModel>,
}

impl TwitterSource {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl PanelSource for TwitterSource {
    type Output = Vec<Tweet>;

    fn category(&self) -> Category {
        Category::Twitter
    }

    fn failure_text(&self) -> &'static str {
        failure::TWITTER
    }

    async fn fetch(&self, stock: &Stock) -> Result<Self::Output, FetchError> {
        let reply = ask(self.model.as_ref(), stock, Intent::Tweets).await?;
        normalize_tweets(&reply)
    }
}

pub struct DeepAnalyzeSource {
    model: Arc<dyn TextModel>,
}

impl DeepAnalyzeSource {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl PanelSource for DeepAnalyzeSource {
    type Output = Recommendation;

    fn category(&self) -> Category {
        Category::DeepAnalyze
    }

    fn failure_text(&self) -> &'static str {
        failure::DEEP_ANALYZE
    }

    async fn fetch(&self, stock: &Stock) -> Result<Self::Output, FetchError> {
        let reply = ask(self.model.as_ref(), stock, Intent::Recommendation).await?;
        normalize_recommendation(&reply)
    }
}

pub struct StreamLitSource {
    client: AnalyticsClient,
}

impl StreamLitSource {
    pub fn new(client: AnalyticsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PanelSource for StreamLitSource {
    type Output = StreamLitReport;

    fn category(&self) -> Category {
        Category::StreamLit
    }

    fn failure_text(&self) -> &'static str {
        failure::STREAMLIT
    }

    async fn fetch(&self, stock: &Stock) -> Result<Self::Output, FetchError> {
        self.client.fetch_report(&stock.ticker).await
    }
}

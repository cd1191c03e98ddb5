//! Turns a raw model reply into validated records.
//!
//! Replies are expected to hold a single JSON object, optionally wrapped in a
//! markdown code fence. Anything that does not parse, or lacks the expected
//! top-level field, is a `MalformedResponse`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::constants::sources::{NEWS_SOURCE_LINKS, UNKNOWN_SOURCE_LINK};
use crate::error::FetchError;
use crate::sentiment::{recommendation_color, ChipColor, SentimentTag};

/// Remove a surrounding ```json ... ``` (or bare ```) fence. The label is
/// matched without regard to case.
pub fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();
    let text = match text.strip_prefix("```") {
        Some(rest) => match rest.get(..4) {
            Some(label) if label.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        },
        None => text,
    };
    let text = text.trim();
    text.strip_suffix("```").unwrap_or(text).trim()
}

/// Strip the fence and deserialize. Empty replies count as malformed.
pub fn parse_reply<T: DeserializeOwned>(raw: &str) -> Result<T, FetchError> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(FetchError::MalformedResponse("empty reply".to_string()));
    }
    Ok(serde_json::from_str(body)?)
}

// ============= News =============

#[derive(Debug, Deserialize)]
struct NewsReply {
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    #[serde(default)]
    heading: String,
    #[serde(default)]
    brief_summary: String,
    #[serde(default)]
    sentiment: String,
    #[serde(default)]
    source: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewsArticle {
    pub title: String,
    pub snippet: String,
    pub url: String,
    pub sentiment: SentimentTag,
    pub source: String,
}

/// Link for a publisher name, `#` when unknown
pub fn source_link(source: &str) -> &'static str {
    NEWS_SOURCE_LINKS
        .iter()
        .find(|(name, _)| *name == source.trim())
        .map(|(_, url)| *url)
        .unwrap_or(UNKNOWN_SOURCE_LINK)
}

pub fn normalize_news(raw: &str) -> Result<Vec<NewsArticle>, FetchError> {
    let reply: NewsReply = parse_reply(raw)?;
    Ok(reply
        .articles
        .into_iter()
        .map(|a| NewsArticle {
            url: source_link(&a.source).to_string(),
            sentiment: SentimentTag::from_label(&a.sentiment),
            title: a.heading,
            snippet: a.brief_summary,
            source: a.source,
        })
        .collect())
}

// ============= Reddit =============

#[derive(Debug, Deserialize)]
struct ThreadsReply {
    threads: Vec<RawThread>,
}

#[derive(Debug, Deserialize)]
struct RawThread {
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    sentiment: String,
    #[serde(default)]
    investment_recommendation: String,
    #[serde(default)]
    sentiment_for_display: String,
    #[serde(default)]
    source: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RedditThread {
    pub title: String,
    pub summary: String,
    pub sentiment: SentimentTag,
    pub investment_recommendation: String,
    pub source: String,
}

pub fn normalize_threads(raw: &str) -> Result<Vec<RedditThread>, FetchError> {
    let reply: ThreadsReply = parse_reply(raw)?;
    Ok(reply
        .threads
        .into_iter()
        .map(|t| RedditThread {
            sentiment: SentimentTag::new(&t.sentiment, &t.sentiment_for_display),
            title: t.title,
            summary: t.summary,
            investment_recommendation: t.investment_recommendation,
            source: t.source,
        })
        .collect())
}

// ============= Twitter =============

#[derive(Debug, Deserialize)]
struct TweetsReply {
    tweets: Vec<RawTweet>,
}

#[derive(Debug, Deserialize)]
struct RawTweet {
    #[serde(default)]
    tweet: String,
    #[serde(default)]
    user: String,
    #[serde(default)]
    sentiment: String,
    #[serde(default)]
    sentiment_for_display: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tweet {
    pub user: String,
    pub text: String,
    pub sentiment: SentimentTag,
}

fn handle(user: &str) -> String {
    let user = user.trim();
    if user.starts_with('@') {
        user.to_string()
    } else {
        format!("@{}", user)
    }
}

pub fn normalize_tweets(raw: &str) -> Result<Vec<Tweet>, FetchError> {
    let reply: TweetsReply = parse_reply(raw)?;
    Ok(reply
        .tweets
        .into_iter()
        .map(|t| Tweet {
            user: handle(&t.user),
            sentiment: SentimentTag::new(&t.sentiment, &t.sentiment_for_display),
            text: t.tweet,
        })
        .collect())
}

// ============= DeepAnalyze =============

#[derive(Debug, Deserialize)]
struct RecommendationReply {
    recommendation: String,
    justification: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recommendation {
    pub verdict: String,
    pub color: ChipColor,
    pub justification: String,
}

pub fn normalize_recommendation(raw: &str) -> Result<Recommendation, FetchError> {
    let reply: RecommendationReply = parse_reply(raw)?;
    Ok(Recommendation {
        color: recommendation_color(&reply.recommendation),
        verdict: reply.recommendation,
        justification: reply.justification,
    })
}

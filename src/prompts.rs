//! Prompt construction for the generative text model.
//!
//! Prompts are a pure function of (stock name, intent). Each one names the
//! exact JSON shape expected back and forbids any extra commentary.

use crate::constants::sources::{NEWS_SOURCE_LINKS, SUBREDDITS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    News,
    Recommendation,
    RedditThreads,
    Tweets,
}

impl Intent {
    /// Top-level field the reply must carry
    pub fn expected_field(&self) -> &'static str {
        match self {
            Intent::News => "articles",
            Intent::Recommendation => "recommendation",
            Intent::RedditThreads => "threads",
            Intent::Tweets => "tweets",
        }
    }
}

const JSON_ONLY: &str = "Return only a valid JSON object without any warnings or disclaimers.";

pub fn build_prompt(stock_name: &str, intent: Intent) -> String {
    match intent {
        Intent::News => {
            let sources = NEWS_SOURCE_LINKS
                .iter()
                .map(|(name, _)| format!("\"{}\"", name))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                r#"Get 5 news articles about {stock} in the last 3 months. Provide a JSON object with an array field "articles" where each article includes:
"heading" (the article's title),
"brief_summary" (a concise summary of the article),
"sentiment" (either "positive", "negative", or "neutral"),
"source" (one of {sources}).
{json_only}"#,
                stock = stock_name,
                sources = sources,
                json_only = JSON_ONLY,
            )
        }
        Intent::Recommendation => format!(
            r#"What is your overall recommendation for {stock}? Provide a JSON object with the field "recommendation" (which can be "Buy", "Hold", or "Sell") and a field "justification" with a concise explanation. {json_only}"#,
            stock = stock_name,
            json_only = JSON_ONLY,
        ),
        Intent::RedditThreads => format!(
            r#"Summarize a few recent Reddit discussion threads about {stock}. Limit the search to threads from {subs}. Return 5 threads. Provide a JSON object with an array field "threads" where each thread includes a "summary", "title", "sentiment", "investment_recommendation", "sentiment_for_display" (which returns only "positive" or "negative"), and "source". {json_only}"#,
            stock = stock_name,
            subs = SUBREDDITS.join(", "),
            json_only = JSON_ONLY,
        ),
        Intent::Tweets => format!(
            r#"Generate 5 imaginary tweets about {stock} reflecting recent market sentiment from fictional twitter accounts. Provide a JSON object with an array field "tweets" where each tweet includes "tweet", "user", "sentiment" (non numerical), and "sentiment_for_display" (which returns only "positive" or "negative"). {json_only}"#,
            stock = stock_name,
            json_only = JSON_ONLY,
        ),
    }
}

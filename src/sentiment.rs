//! Display mapping for sentiment and recommendation labels.
//!
//! Both mappings are total: any input yields a valid chip.

use serde::Serialize;

use crate::constants::icons;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Chip colors understood by the front end
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipColor {
    Success,
    Warning,
    Error,
    Default,
}

impl Sentiment {
    /// Case-insensitive match on "positive" / "negative"; everything else is neutral.
    pub fn classify(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    pub fn color(self) -> ChipColor {
        match self {
            Sentiment::Positive => ChipColor::Success,
            Sentiment::Negative => ChipColor::Error,
            Sentiment::Neutral => ChipColor::Default,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Sentiment::Positive => icons::THUMBS_UP,
            Sentiment::Negative => icons::THUMBS_DOWN,
            Sentiment::Neutral => icons::SHRUG,
        }
    }
}

/// (color, icon) pair for a free-text sentiment value
pub fn map_sentiment(value: &str) -> (ChipColor, &'static str) {
    let sentiment = Sentiment::classify(value);
    (sentiment.color(), sentiment.icon())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SentimentTag {
    pub label: String,
    pub category: Sentiment,
    pub icon: &'static str,
    pub color: ChipColor,
}

impl SentimentTag {
    /// `label` is shown on the chip; `display` decides color and icon.
    /// They differ for social posts, where the model gives a free-text mood
    /// plus a separate positive/negative verdict.
    pub fn new(label: &str, display: &str) -> Self {
        let category = Sentiment::classify(display);
        Self {
            label: label.to_string(),
            category,
            icon: category.icon(),
            color: category.color(),
        }
    }

    pub fn from_label(label: &str) -> Self {
        Self::new(label, label)
    }
}

/// Buy / Hold / Sell chip color; unknown verdicts fall back to default
pub fn recommendation_color(verdict: &str) -> ChipColor {
    match verdict.trim().to_lowercase().as_str() {
        "buy" => ChipColor::Success,
        "hold" => ChipColor::Warning,
        "sell" => ChipColor::Error,
        _ => ChipColor::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_sentiment_case_insensitive() {
        assert_eq!(map_sentiment("Positive"), (ChipColor::Success, icons::THUMBS_UP));
        assert_eq!(map_sentiment("NEGATIVE"), (ChipColor::Error, icons::THUMBS_DOWN));
        assert_eq!(map_sentiment("mixed"), (ChipColor::Default, icons::SHRUG));
    }

    #[test]
    fn test_map_sentiment_is_total() {
        for input in ["", "   ", "neutral", "😀", "positively"] {
            let (color, icon) = map_sentiment(input);
            assert_eq!(color, ChipColor::Default);
            assert_eq!(icon, icons::SHRUG);
        }
    }

    #[test]
    fn test_tag_keeps_label_but_uses_display_for_color() {
        let tag = SentimentTag::new("Cautiously bullish", "positive");
        assert_eq!(tag.label, "Cautiously bullish");
        assert_eq!(tag.category, Sentiment::Positive);
        assert_eq!(tag.color, ChipColor::Success);
    }

    #[test]
    fn test_recommendation_color() {
        assert_eq!(recommendation_color("Buy"), ChipColor::Success);
        assert_eq!(recommendation_color("HOLD"), ChipColor::Warning);
        assert_eq!(recommendation_color("sell"), ChipColor::Error);
        assert_eq!(recommendation_color("Strong Buy"), ChipColor::Default);
    }
}

use serde::{Deserialize, Serialize};

/// Dashboard tab; selects which panel is active
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    News,
    Data,
    Reddit,
    Twitter,
    DeepAnalyze,
    StreamLit,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::News,
        Category::Data,
        Category::Reddit,
        Category::Twitter,
        Category::DeepAnalyze,
        Category::StreamLit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::News => "News",
            Category::Data => "Data",
            Category::Reddit => "Reddit",
            Category::Twitter => "Twitter",
            Category::DeepAnalyze => "DeepAnalyze",
            Category::StreamLit => "StreamLit",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::News => "article",
            Category::Data => "assessment",
            Category::Reddit => "forum",
            Category::Twitter => "twitter",
            Category::DeepAnalyze => "insights",
            Category::StreamLit => "bar_chart",
        }
    }

    /// Skeleton cards shown while loading
    pub fn placeholder_count(&self) -> usize {
        match self {
            Category::News | Category::Twitter => 5,
            Category::Reddit => 3,
            Category::Data => 2,
            Category::DeepAnalyze | Category::StreamLit => 1,
        }
    }

    /// Only the social panels keep results per stock
    pub fn caches_results(&self) -> bool {
        matches!(self, Category::Reddit | Category::Twitter)
    }

    /// Case-insensitive label lookup
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(value.trim()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CategoryInfo {
    pub category: Category,
    pub label: &'static str,
    pub icon: &'static str,
}

pub fn category_list() -> Vec<CategoryInfo> {
    Category::ALL
        .iter()
        .map(|&category| CategoryInfo {
            category,
            label: category.label(),
            icon: category.icon(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!(Category::parse("deepanalyze"), Some(Category::DeepAnalyze));
        assert_eq!(Category::parse(" Twitter "), Some(Category::Twitter));
        assert_eq!(Category::parse("Charts"), None);
    }

    #[test]
    fn test_only_social_panels_cache() {
        let cached: Vec<_> = Category::ALL.into_iter().filter(|c| c.caches_results()).collect();
        assert_eq!(cached, vec![Category::Reddit, Category::Twitter]);
    }

    #[test]
    fn test_category_list_order() {
        let labels: Vec<_> = category_list().into_iter().map(|c| c.label).collect();
        assert_eq!(labels, ["News", "Data", "Reddit", "Twitter", "DeepAnalyze", "StreamLit"]);
    }
}

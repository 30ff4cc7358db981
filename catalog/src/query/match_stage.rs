use common::catalog_item::CatalogItem;

use super::traits::Stage;

/// Keeps items whose searchable text contains every whitespace-separated
/// token of the query, case-insensitively.
pub(crate) struct MatchStage {
    tokens: Vec<String>,
}

impl MatchStage {
    pub(crate) fn new(query: &str) -> Self {
        let tokens = query
            .trim()
            .to_lowercase()
            .split_whitespace()
            .map(String::from)
            .collect();

        Self { tokens }
    }

    fn haystack(item: &CatalogItem) -> String {
        let classification = item.classification();
        let components = item
            .components_count
            .map(|count| count.to_string())
            .unwrap_or_default();

        let mut parts: Vec<&str> = vec![
            item.name.as_str(),
            item.authors.as_str(),
            item.description.as_str(),
            item.category.as_str(),
            classification.sub.as_str(),
            item.version.as_str(),
            item.release_date.as_str(),
            components.as_str(),
        ];
        parts.extend(item.tags.iter().map(String::as_str));

        parts
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<&str>>()
            .join(" ")
            .trim()
            .to_lowercase()
    }

    pub(crate) fn matches(&self, item: &CatalogItem) -> bool {
        if self.tokens.is_empty() {
            return true;
        }

        let haystack = Self::haystack(item);

        self.tokens
            .iter()
            .all(|token| haystack.contains(token.as_str()))
    }
}

impl Stage for MatchStage {
    fn apply<'a>(&self, items: Vec<&'a CatalogItem>) -> Vec<&'a CatalogItem> {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}

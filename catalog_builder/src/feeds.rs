use std::{
    collections::HashMap,
    fmt::{Display, Formatter, Result},
};

use common::deserialize_validators::disallow_empty_string;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Addons,
    Marketplace,
}

impl Display for FeedKind {
    fn fmt(&self, format: &mut Formatter) -> Result {
        match self {
            Self::Addons => write!(format, "addons"),
            Self::Marketplace => write!(format, "marketplace"),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct AddonFeed {
    pub index: Vec<Addon>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Addon {
    #[serde(deserialize_with = "disallow_empty_string")]
    pub name: String,
    #[serde(deserialize_with = "disallow_empty_string")]
    pub author_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "disallow_empty_string")]
    pub download_link: String,
    #[serde(deserialize_with = "disallow_empty_string")]
    pub help_link: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub components: Components,
    #[serde(default)]
    pub is_system: bool,
}

/// Older feed revisions list component names, newer ones carry a bare count.
/// Both shapes are still served.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Components {
    List(Vec<String>),
    Count(u64),
}

impl Default for Components {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl Components {
    pub fn count(&self) -> u64 {
        match self {
            Self::List(names) => names.len() as u64,
            Self::Count(count) => *count,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct MarketplaceFeed {
    pub index: Vec<MarketplaceEntry>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MarketplaceEntry {
    #[serde(deserialize_with = "disallow_empty_string")]
    pub id: String,
    /// Matches an addon's `helpLink`.
    #[serde(deserialize_with = "disallow_empty_string")]
    pub link: String,
    #[serde(default)]
    pub verified: Option<bool>,
}

/// Lookup tables over the marketplace feed. Later entries overwrite earlier
/// ones for the same link or id.
pub struct MarketplaceIndex<'a> {
    id_by_link: HashMap<&'a str, &'a str>,
    verified_by_id: HashMap<&'a str, bool>,
}

impl<'a> MarketplaceIndex<'a> {
    pub fn new(feed: &'a MarketplaceFeed) -> Self {
        let mut id_by_link = HashMap::with_capacity(feed.index.len());
        let mut verified_by_id = HashMap::with_capacity(feed.index.len());

        for entry in &feed.index {
            id_by_link.insert(entry.link.as_str(), entry.id.as_str());
            verified_by_id.insert(entry.id.as_str(), entry.verified == Some(true));
        }

        Self {
            id_by_link,
            verified_by_id,
        }
    }

    pub fn id_for_link(&self, help_link: &str) -> Option<&'a str> {
        self.id_by_link.get(help_link).copied()
    }

    pub fn is_verified(&self, id: &str) -> bool {
        self.verified_by_id.get(id).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addon_defaults() {
        let feed: AddonFeed = serde_json::from_str(
            r#"{"index":[{
                "name":"Pufferfish",
                "authorName":"Michael Pryor",
                "downloadLink":"https://example.com/dl",
                "helpLink":"https://www.grasshopperdocs.com/addons/pufferfish.html"
            }]}"#,
        )
        .unwrap();

        let addon = &feed.index[0];
        assert_eq!(addon.description, "");
        assert_eq!(addon.category, "");
        assert_eq!(addon.components, Components::List(Vec::new()));
        assert!(!addon.is_system);
    }

    #[test]
    fn components_accept_both_shapes() {
        let list: Components = serde_json::from_str(r#"["Deform","Twist","Bend"]"#).unwrap();
        let count: Components = serde_json::from_str("17").unwrap();

        assert_eq!(list.count(), 3);
        assert_eq!(count.count(), 17);
        assert!(serde_json::from_str::<Components>("-2").is_err());
        assert!(serde_json::from_str::<Components>(r#""many""#).is_err());
    }

    #[test]
    fn addon_requires_non_empty_links() {
        let result = serde_json::from_str::<AddonFeed>(
            r#"{"index":[{"name":"A","authorName":"B","downloadLink":"x","helpLink":""}]}"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn marketplace_index_last_entry_wins() {
        let feed: MarketplaceFeed = serde_json::from_str(
            r#"{"index":[
                {"id":"old-slug","link":"https://docs/a.html","verified":true},
                {"id":"new-slug","link":"https://docs/a.html"},
                {"id":"other","link":"https://docs/b.html","verified":true}
            ]}"#,
        )
        .unwrap();
        let index = MarketplaceIndex::new(&feed);

        assert_eq!(index.id_for_link("https://docs/a.html"), Some("new-slug"));
        assert!(!index.is_verified("new-slug"));
        assert!(index.is_verified("other"));
        assert_eq!(index.id_for_link("https://docs/c.html"), None);
    }
}

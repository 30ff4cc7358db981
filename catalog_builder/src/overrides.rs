use std::{collections::BTreeMap, io::ErrorKind, path::Path};

use common::{
    catalog_item::CatalogItem,
    deserialize_validators::{
        optional_absolute_url, optional_non_empty_string, optional_non_empty_string_vec,
    },
};
use serde::{
    Deserialize,
    de::{self, IgnoredAny},
};
use tokio::fs;
use tracing::{debug, info, warn};

/// Hand-curated patch for one item. Every field is optional and only present
/// fields are applied. An `id` key is tolerated but never applied.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CatalogOverride {
    #[serde(default, rename = "id")]
    _ignored_id: Option<IgnoredAny>,
    #[serde(default, deserialize_with = "optional_non_empty_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "optional_non_empty_string")]
    pub authors: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_absolute_url")]
    pub thumbnail_url: Option<String>,
    #[serde(default, deserialize_with = "optional_absolute_url")]
    pub plugin_page_url: Option<String>,
    #[serde(default, deserialize_with = "optional_absolute_url")]
    pub download_url: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub components_count: Option<u64>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "optional_non_empty_string")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub download_count: Option<u64>,
    #[serde(default, deserialize_with = "optional_non_empty_string")]
    pub rating: Option<String>,
    #[serde(default, deserialize_with = "optional_non_empty_string")]
    pub license: Option<String>,
    #[serde(default, deserialize_with = "optional_non_empty_string")]
    pub cost: Option<String>,
    #[serde(default, deserialize_with = "optional_non_empty_string_vec")]
    pub tags: Option<Vec<String>>,
}

fn patch<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

fn patch_optional<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        target.clone_from(value);
    }
}

impl CatalogOverride {
    pub fn apply_to(&self, item: &mut CatalogItem) {
        patch(&mut item.name, &self.name);
        patch(&mut item.authors, &self.authors);
        patch(&mut item.description, &self.description);
        patch(&mut item.thumbnail_url, &self.thumbnail_url);
        patch(&mut item.plugin_page_url, &self.plugin_page_url);
        patch(&mut item.download_url, &self.download_url);
        patch(&mut item.version, &self.version);
        patch(&mut item.release_date, &self.release_date);
        patch(&mut item.category, &self.category);
        patch(&mut item.tags, &self.tags);
        patch_optional(&mut item.components_count, &self.components_count);
        patch_optional(&mut item.verified, &self.verified);
        patch_optional(&mut item.updated_at, &self.updated_at);
        patch_optional(&mut item.download_count, &self.download_count);
        patch_optional(&mut item.rating, &self.rating);
        patch_optional(&mut item.license, &self.license);
        patch_optional(&mut item.cost, &self.cost);
    }
}

#[derive(Debug, Default, Clone)]
pub struct Overrides {
    by_id: BTreeMap<String, CatalogOverride>,
}

impl Overrides {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let by_id: BTreeMap<String, CatalogOverride> = serde_json::from_str(raw)?;

        if by_id.contains_key("") {
            return Err(de::Error::custom("override keyed by an empty id"));
        }

        Ok(Self { by_id })
    }

    /// Best effort: a missing or invalid file means no overrides at all.
    pub async fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No overrides file at {}", path.display());
                return Self::default();
            }
            Err(err) => {
                warn!("Ignoring unreadable overrides {}: {}", path.display(), err);
                return Self::default();
            }
        };

        match Self::parse(&raw) {
            Ok(overrides) => {
                info!("Loaded {} overrides from {}", overrides.len(), path.display());
                overrides
            }
            Err(err) => {
                warn!("Ignoring invalid overrides {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogOverride> {
        self.by_id.get(id)
    }

    /// Patches matching items in place. Ids are never touched.
    pub fn apply(&self, items: &mut [CatalogItem]) {
        let mut applied = 0;

        for item in items.iter_mut() {
            if let Some(item_override) = self.by_id.get(&item.id) {
                item_override.apply_to(item);
                applied += 1;
            }
        }

        if applied < self.by_id.len() {
            debug!(
                "{} overrides did not match any item",
                self.by_id.len() - applied
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn base(id: &str) -> CatalogItem {
        CatalogItem {
            id: id.into(),
            name: "Kangaroo".into(),
            authors: "Daniel Piker".into(),
            description: "Physics".into(),
            thumbnail_url: "https://grasshopperdocs.com/images/search.png".into(),
            plugin_page_url: "https://www.food4rhino.com/en/app/kangaroo".into(),
            download_url: "https://www.food4rhino.com/en/app/kangaroo".into(),
            version: "2.5".into(),
            release_date: "2025-02-02".into(),
            components_count: Some(40),
            verified: Some(false),
            category: "Math - Solvers".into(),
            updated_at: None,
            download_count: None,
            rating: None,
            license: None,
            cost: None,
            tags: vec!["math".into(), "solvers".into()],
        }
    }

    #[test]
    fn present_fields_win_absent_fields_keep_base() {
        let overrides = Overrides::parse(r#"{"x":{"rating":"4.5","verified":true}}"#).unwrap();
        let mut items = vec![base("x")];

        overrides.apply(&mut items);

        assert_eq!(items[0].rating.as_deref(), Some("4.5"));
        assert_eq!(items[0].verified, Some(true));
        assert_eq!(items[0].name, "Kangaroo");
        assert_eq!(items[0].components_count, Some(40));
    }

    #[test]
    fn id_in_override_is_ignored() {
        let overrides =
            Overrides::parse(r#"{"x":{"id":"hijacked","name":"Kangaroo 2"}}"#).unwrap();
        let mut items = vec![base("x")];

        overrides.apply(&mut items);

        assert_eq!(items[0].id, "x");
        assert_eq!(items[0].name, "Kangaroo 2");
    }

    #[test]
    fn unmatched_overrides_change_nothing() {
        let overrides = Overrides::parse(r#"{"nope":{"name":"Other"}}"#).unwrap();
        let mut items = vec![base("x")];

        overrides.apply(&mut items);

        assert_eq!(items[0], base("x"));
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        assert!(Overrides::parse(r#"{"x":{"featured":true}}"#).is_err());
        assert!(Overrides::parse(r#"{"x":{"name":""}}"#).is_err());
        assert!(Overrides::parse(r#"{"x":{"downloadUrl":"relative/path"}}"#).is_err());
        assert!(Overrides::parse(r#"{"x":{"tags":["ok",""]}}"#).is_err());
        assert!(Overrides::parse(r#"{"":{"name":"x"}}"#).is_err());
        assert!(Overrides::parse(r#"[]"#).is_err());
    }

    #[tokio::test]
    async fn missing_file_means_no_overrides() {
        let dir = tempdir().unwrap();

        let overrides = Overrides::load(&dir.path().join("plugins.overrides.json")).await;

        assert!(overrides.is_empty());
    }

    #[tokio::test]
    async fn malformed_file_means_no_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plugins.overrides.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(Overrides::load(&path).await.is_empty());

        std::fs::write(&path, r#"{"a":{"rating":"5"},"b":{"bogus":1}}"#).unwrap();

        assert!(Overrides::load(&path).await.is_empty());
    }

    #[tokio::test]
    async fn valid_file_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plugins.overrides.json");
        std::fs::write(&path, r#"{"a":{"rating":"5"},"b":{"license":"MIT"}}"#).unwrap();

        let overrides = Overrides::load(&path).await;

        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.get("b").unwrap().license.as_deref(), Some("MIT"));
    }
}

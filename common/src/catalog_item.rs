use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    categories::{Classification, classify},
    deserialize_validators::{
        absolute_url, disallow_empty_string, non_empty_string_vec, optional_non_empty_string,
    },
};

/// One plugin entry of the catalog artifact.
///
/// Deserialization enforces the artifact schema: a value that parses is a
/// valid item. Unknown keys are ignored, absent optionals are never written back.
#[skip_serializing_none]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(deserialize_with = "disallow_empty_string")]
    pub id: String,
    #[serde(deserialize_with = "disallow_empty_string")]
    pub name: String,
    #[serde(deserialize_with = "disallow_empty_string")]
    pub authors: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "absolute_url")]
    pub thumbnail_url: String,
    #[serde(deserialize_with = "absolute_url")]
    pub plugin_page_url: String,
    #[serde(deserialize_with = "absolute_url")]
    pub download_url: String,
    #[serde(default)]
    pub version: String,
    // ISO date, some other date format, or the literal "Unknown"
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub components_count: Option<u64>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub download_count: Option<u64>,
    #[serde(default, deserialize_with = "optional_non_empty_string")]
    pub rating: Option<String>,
    #[serde(default, deserialize_with = "optional_non_empty_string")]
    pub license: Option<String>,
    #[serde(default, deserialize_with = "optional_non_empty_string")]
    pub cost: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string_vec")]
    pub tags: Vec<String>,
}

impl CatalogItem {
    pub fn classification(&self) -> Classification {
        classify(&self.category)
    }

    pub fn is_verified(&self) -> bool {
        self.verified == Some(true)
    }
}

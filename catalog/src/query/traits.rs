use common::catalog_item::CatalogItem;
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};

#[serde_as]
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct ListingParams {
    #[serde(default)]
    pub q: String,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub sort: Sort,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Sort {
    #[default]
    #[serde(rename = "a-z")]
    Alphabetical,
    New,
    Updated,
    Components,
    Verified,
}

pub(crate) trait Stage {
    fn apply<'a>(&self, items: Vec<&'a CatalogItem>) -> Vec<&'a CatalogItem>;
}

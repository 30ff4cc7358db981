use std::collections::{BTreeMap, HashMap};

use common::{
    catalog_item::CatalogItem,
    categories::{Bucket, TopCategory},
};
use serde::Serialize;

const ALL_SLUG: &str = "all";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub name: &'static str,
    pub slug: &'static str,
    pub count: usize,
}

#[derive(Serialize, Debug)]
pub struct BucketGroup<'a> {
    pub bucket: Bucket,
    pub items: Vec<&'a CatalogItem>,
}

/// What a bucket slug in a URL addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketSelection {
    All,
    Top(TopCategory),
}

impl BucketSelection {
    pub fn from_slug(slug: &str) -> Option<Self> {
        if slug.trim().eq_ignore_ascii_case(ALL_SLUG) {
            return Some(Self::All);
        }

        TopCategory::from_slug(slug).map(Self::Top)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Top(category) => category.name(),
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::All => ALL_SLUG,
            Self::Top(category) => category.slug(),
        }
    }
}

/// Items per whitelisted bucket in canonical order. Empty buckets and
/// `Other` are left out.
pub fn category_counts(items: &[CatalogItem]) -> Vec<CategoryCount> {
    let mut counts: HashMap<TopCategory, usize> = HashMap::new();

    for item in items {
        if let Bucket::Top(category) = item.classification().top {
            *counts.entry(category).or_default() += 1;
        }
    }

    TopCategory::ordered()
        .filter_map(|category| {
            let count = counts.get(&category).copied().unwrap_or_default();

            (count > 0).then_some(CategoryCount {
                name: category.name(),
                slug: category.slug(),
                count,
            })
        })
        .collect()
}

pub fn items_in_bucket(items: &[CatalogItem], selection: BucketSelection) -> Vec<&CatalogItem> {
    match selection {
        BucketSelection::All => items.iter().collect(),
        BucketSelection::Top(category) => items
            .iter()
            .filter(|item| item.classification().top == Bucket::Top(category))
            .collect(),
    }
}

/// Groups keep the incoming item order; groups follow the canonical bucket order.
pub fn group_by_bucket<'a>(
    items: impl IntoIterator<Item = &'a CatalogItem>,
) -> Vec<BucketGroup<'a>> {
    let mut groups: BTreeMap<Bucket, Vec<&'a CatalogItem>> = BTreeMap::new();

    for item in items {
        groups
            .entry(item.classification().top)
            .or_default()
            .push(item);
    }

    groups
        .into_iter()
        .map(|(bucket, items)| BucketGroup { bucket, items })
        .collect()
}

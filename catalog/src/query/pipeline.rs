use common::catalog_item::CatalogItem;
use serde::Serialize;
use tracing::trace;

use super::{
    match_stage::MatchStage,
    page_stage::{PAGE_SIZE, PageStage},
    sort_stage::SortStage,
    traits::{ListingParams, Sort, Stage},
};

#[derive(Serialize, Debug)]
pub struct ListingPage<'a> {
    pub items: Vec<&'a CatalogItem>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub sort: Sort,
}

/// Search, then sort, then cut one page. `total_count` counts every match,
/// not just the returned page.
pub fn run_listing<'a>(
    items: impl IntoIterator<Item = &'a CatalogItem>,
    params: &ListingParams,
) -> ListingPage<'a> {
    let matched = MatchStage::new(&params.q).apply(items.into_iter().collect());
    let total_count = matched.len();

    let sorted = SortStage::new(params.sort).apply(matched);
    let page = PageStage::new(params.page).apply(sorted);

    trace!(
        "Listing q={:?} sort={:?} page={:?}: {} of {}",
        params.q,
        params.sort,
        params.page,
        page.len(),
        total_count
    );

    ListingPage {
        items: page,
        total_count,
        page: params.page.unwrap_or(0),
        page_size: PAGE_SIZE,
        sort: params.sort,
    }
}

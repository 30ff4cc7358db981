use common::catalog_item::CatalogItem;

use super::traits::Stage;

pub const PAGE_SIZE: usize = 60;

pub(crate) struct PageStage {
    page: usize,
}

impl PageStage {
    pub(crate) fn new(page: Option<usize>) -> Self {
        Self {
            page: page.unwrap_or(0),
        }
    }
}

impl Stage for PageStage {
    fn apply<'a>(&self, items: Vec<&'a CatalogItem>) -> Vec<&'a CatalogItem> {
        let skip = self.page.saturating_mul(PAGE_SIZE);

        items.into_iter().skip(skip).take(PAGE_SIZE).collect()
    }
}

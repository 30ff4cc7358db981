use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use catalog::{
    buckets::{BucketGroup, BucketSelection, category_counts, group_by_bucket, items_in_bucket},
    query::{ListingPage, ListingParams, Sort, run_listing},
};
use serde::Serialize;
use tracing::debug;

use crate::{ServerState, routes::error_message_erasure::ApiError};

#[derive(Serialize, Debug)]
struct CategoryListing<'a> {
    name: &'static str,
    slug: &'static str,
    #[serde(flatten)]
    listing: ListingPage<'a>,
}

/// One listing page split by top bucket, in canonical bucket order.
#[derive(Serialize, Debug)]
struct GroupedListing<'a> {
    groups: Vec<BucketGroup<'a>>,
    total_count: usize,
    page: usize,
    page_size: usize,
    sort: Sort,
}

pub(crate) async fn categories_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<impl IntoResponse, StatusCode> {
    let catalog = state.catalog().await?;

    Ok(Json(category_counts(catalog.items())))
}

pub(crate) async fn category_listing_handler(
    State(state): State<Arc<ServerState>>,
    WithRejection(Path(slug), _): WithRejection<Path<String>, ApiError>,
    WithRejection(Query(params), _): WithRejection<Query<ListingParams>, ApiError>,
) -> Result<impl IntoResponse, StatusCode> {
    let Some(selection) = BucketSelection::from_slug(&slug) else {
        debug!("Unknown category slug {}", slug);
        return Err(StatusCode::NOT_FOUND);
    };

    let catalog = state.catalog().await?;
    let items = items_in_bucket(catalog.items(), selection);

    Ok(Json(CategoryListing {
        name: selection.name(),
        slug: selection.slug(),
        listing: run_listing(items, &params),
    }))
}

pub(crate) async fn grouped_plugins_handler(
    State(state): State<Arc<ServerState>>,
    WithRejection(Query(params), _): WithRejection<Query<ListingParams>, ApiError>,
) -> Result<impl IntoResponse, StatusCode> {
    let catalog = state.catalog().await?;
    let listing = run_listing(catalog.items(), &params);

    Ok(Json(GroupedListing {
        groups: group_by_bucket(listing.items),
        total_count: listing.total_count,
        page: listing.page,
        page_size: listing.page_size,
        sort: listing.sort,
    }))
}

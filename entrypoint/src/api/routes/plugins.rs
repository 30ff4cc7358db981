use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::WithRejection;
use catalog::query::{ListingParams, run_listing};
use common::{catalog_item::CatalogItem, categories::Classification};
use serde::Serialize;
use tokio::time::Instant;
use tracing::debug;

use crate::{ServerState, routes::error_message_erasure::ApiError};

#[derive(Serialize, Debug)]
struct PluginDetail<'a> {
    #[serde(flatten)]
    item: &'a CatalogItem,
    classification: Classification,
}

pub(crate) async fn list_plugins_handler(
    State(state): State<Arc<ServerState>>,
    WithRejection(Query(params), _): WithRejection<Query<ListingParams>, ApiError>,
) -> Result<impl IntoResponse, StatusCode> {
    let start_time = Instant::now();

    let catalog = state.catalog().await?;
    let listing = run_listing(catalog.items(), &params);

    let response = Json(listing);

    debug!("Request time: {}ms", start_time.elapsed().as_millis());

    Ok(response)
}

pub(crate) async fn plugin_handler(
    State(state): State<Arc<ServerState>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, ApiError>,
) -> Result<impl IntoResponse, StatusCode> {
    let catalog = state.catalog().await?;

    let Some(item) = catalog.lookup_by_id(&id) else {
        debug!("No plugin with id {}", id);
        return Err(StatusCode::NOT_FOUND);
    };

    Ok(Json(PluginDetail {
        item,
        classification: item.classification(),
    }))
}

pub(crate) async fn plugin_download_handler(
    State(state): State<Arc<ServerState>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, ApiError>,
) -> Result<impl IntoResponse, StatusCode> {
    let catalog = state.catalog().await?;

    let Some(item) = catalog.lookup_by_id(&id) else {
        debug!("No plugin with id {} to download", id);
        return Err(StatusCode::NOT_FOUND);
    };

    Ok(Redirect::temporary(&item.download_url))
}

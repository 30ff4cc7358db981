use std::{
    env,
    process::ExitCode,
    sync::{Arc, LazyLock},
};

use axum::{
    Router,
    http::{HeaderValue, StatusCode},
    routing::get,
};
use catalog::{Catalog, CatalogCache, catalog_cache};
use mimalloc::MiMalloc;
use routes::{
    categories::{categories_handler, category_listing_handler, grouped_plugins_handler},
    plugins::{list_plugins_handler, plugin_download_handler, plugin_handler},
};
use service_layers::build_service_layers;
use tokio::{net::TcpListener, task};
use tracing::{error, info, warn};
use utils::logger::configure_logger;

mod routes;
mod service_layers;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

static API_HOST: LazyLock<String> =
    LazyLock::new(|| env::var("API_HOST").unwrap_or("0.0.0.0".into()));
static API_PORT: LazyLock<String> =
    LazyLock::new(|| env::var("API_PORT").unwrap_or("8080".into()));
static API_ALLOWED_ORIGIN: LazyLock<String> = LazyLock::new(|| {
    env::var("API_ALLOWED_ORIGIN").unwrap_or("http://localhost:3000".into())
});

pub(crate) struct ServerState {
    catalog: &'static CatalogCache,
}

impl ServerState {
    fn new(catalog: &'static CatalogCache) -> Self {
        Self { catalog }
    }

    /// A failed load surfaces as 500 on every request until one succeeds.
    /// Loading reads and parses the file, so it runs off the async workers.
    pub(crate) async fn catalog(&self) -> Result<&'static Catalog, StatusCode> {
        if let Some(catalog) = self.catalog.loaded() {
            return Ok(catalog);
        }

        let cache = self.catalog;

        let loaded = match task::spawn_blocking(move || cache.get()).await {
            Ok(loaded) => loaded,
            Err(err) => {
                error!("Catalog load task failed: {}", err);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };

        loaded.map_err(|err| {
            error!(
                "Failed to load catalog from {}: {}",
                cache.path().display(),
                err
            );

            StatusCode::INTERNAL_SERVER_ERROR
        })
    }
}

fn build_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/plugins", get(list_plugins_handler))
        .route("/plugins/{id}", get(plugin_handler))
        .route("/plugins/{id}/download", get(plugin_download_handler))
        .route("/categories", get(categories_handler))
        .route("/categories/{slug}", get(category_listing_handler))
        .route("/groups", get(grouped_plugins_handler))
        .with_state(state)
}

#[tokio::main]
async fn main() -> ExitCode {
    configure_logger();

    let Ok(allowed_origin) = API_ALLOWED_ORIGIN.parse::<HeaderValue>() else {
        error!("Invalid API_ALLOWED_ORIGIN: {}", *API_ALLOWED_ORIGIN);
        return ExitCode::FAILURE;
    };

    let state = Arc::new(ServerState::new(catalog_cache()));

    if state.catalog().await.is_err() {
        warn!("Catalog unavailable at startup, retrying per request");
    }

    let app = build_router(state).layer(build_service_layers(allowed_origin));

    let bind_addr = format!("{}:{}", *API_HOST, *API_PORT);

    let listener = match TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind {}: {}", bind_addr, err);
            return ExitCode::FAILURE;
        }
    };

    info!("Listening on {}", bind_addr);

    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

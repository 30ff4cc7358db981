use std::{path::PathBuf, process::ExitCode};

use catalog_builder::{
    BuildPaths, CatalogBuilder, HttpFeedSource,
    sources::{DEFAULT_ADDONS_FEED_URL, DEFAULT_MARKETPLACE_FEED_URL},
};
use clap::Parser;
use tracing::{error, info};
use utils::logger::configure_logger;

/// Rebuilds the plugin catalog artifact from the upstream feeds.
#[derive(Parser, Debug)]
#[command(name = "sync")]
struct Args {
    #[arg(long, env = "ADDONS_FEED_URL", default_value = DEFAULT_ADDONS_FEED_URL)]
    addons_feed_url: String,

    #[arg(long, env = "MARKETPLACE_FEED_URL", default_value = DEFAULT_MARKETPLACE_FEED_URL)]
    marketplace_feed_url: String,

    /// Holds the artifact, its backup and the overrides file
    #[arg(long, env = "CATALOG_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long)]
    backup: Option<PathBuf>,

    #[arg(long)]
    overrides: Option<PathBuf>,
}

impl Args {
    fn build_paths(&self) -> BuildPaths {
        let mut paths = BuildPaths::in_dir(&self.data_dir);

        if let Some(output) = &self.output {
            paths.output = output.clone();
        }

        if let Some(backup) = &self.backup {
            paths.backup = backup.clone();
        }

        if let Some(overrides) = &self.overrides {
            paths.overrides = overrides.clone();
        }

        paths
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    configure_logger();

    let paths = args.build_paths();

    info!("Syncing catalog into {}", paths.output.display());

    let source = HttpFeedSource::new(args.addons_feed_url, args.marketplace_feed_url);
    let builder = CatalogBuilder::new(source, paths);

    match builder.build().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Catalog sync failed: {}", err);
            ExitCode::FAILURE
        }
    }
}

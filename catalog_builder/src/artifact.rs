use std::{io, path::Path};

use common::catalog_item::CatalogItem;
use tokio::fs;
use tracing::warn;

use crate::errors::BuilderError;

#[derive(Debug)]
pub enum BackupOutcome {
    Created,
    AlreadyPresent,
    NoPriorArtifact,
    Failed(io::Error),
}

/// Pretty JSON, two-space indent, trailing newline.
pub fn render_catalog(items: &[CatalogItem]) -> Result<String, serde_json::Error> {
    let mut rendered = serde_json::to_string_pretty(items)?;
    rendered.push('\n');

    Ok(rendered)
}

/// Copies the current artifact aside once. An existing backup is never
/// refreshed, and a missing artifact or failed copy is not an error.
pub async fn backup_once(target: &Path, backup: &Path) -> BackupOutcome {
    if fs::try_exists(backup).await.unwrap_or(false) {
        return BackupOutcome::AlreadyPresent;
    }

    if !fs::try_exists(target).await.unwrap_or(false) {
        return BackupOutcome::NoPriorArtifact;
    }

    match fs::copy(target, backup).await {
        Ok(_) => BackupOutcome::Created,
        Err(err) => BackupOutcome::Failed(err),
    }
}

/// Replaces the artifact as a whole: the new content is written next to it
/// and renamed over the old file. A failed write leaves no staging file.
pub async fn write_artifact(target: &Path, items: &[CatalogItem]) -> Result<(), BuilderError> {
    let rendered = render_catalog(items)?;

    let write_error = |source: io::Error| BuilderError::WriteArtifact {
        path: target.to_path_buf(),
        source,
    };

    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await.map_err(write_error)?;
    }

    let staging = target.with_extension("json.tmp");

    let written = match fs::write(&staging, rendered).await {
        Ok(()) => fs::rename(&staging, target).await,
        Err(err) => Err(err),
    };

    if let Err(err) = written {
        if let Err(cleanup) = fs::remove_file(&staging).await
            && cleanup.kind() != io::ErrorKind::NotFound
        {
            warn!("Failed to remove {}: {}", staging.display(), cleanup);
        }

        return Err(write_error(err));
    }

    Ok(())
}

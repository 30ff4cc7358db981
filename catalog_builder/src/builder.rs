use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use common::{catalog_item::CatalogItem, utils::locale_compare};
use tracing::{debug, info, warn};

use crate::{
    artifact::{BackupOutcome, backup_once, write_artifact},
    derive::{
        PLACEHOLDER_THUMBNAIL_URL, derive_id, marketplace_app_url, marketplace_search_url,
        tags_from_category,
    },
    errors::BuilderError,
    feeds::{Addon, AddonFeed, MarketplaceFeed, MarketplaceIndex},
    overrides::Overrides,
    sources::FeedSource,
};

pub const OUTPUT_FILE: &str = "plugins.json";
pub const BACKUP_FILE: &str = "plugins.manual.backup.json";
pub const OVERRIDES_FILE: &str = "plugins.overrides.json";

#[derive(Debug, Clone)]
pub struct BuildPaths {
    pub output: PathBuf,
    pub backup: PathBuf,
    pub overrides: PathBuf,
}

impl BuildPaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();

        Self {
            output: dir.join(OUTPUT_FILE),
            backup: dir.join(BACKUP_FILE),
            overrides: dir.join(OVERRIDES_FILE),
        }
    }
}

pub struct CatalogBuilder<S: FeedSource> {
    source: S,
    paths: BuildPaths,
}

impl<S: FeedSource> CatalogBuilder<S> {
    pub fn new(source: S, paths: BuildPaths) -> Self {
        Self { source, paths }
    }

    pub fn paths(&self) -> &BuildPaths {
        &self.paths
    }

    /// One full sync. Nothing is written to disk unless both feeds were
    /// fetched and every addon produced an id. Returns the entry count.
    pub async fn build(&self) -> Result<usize, BuilderError> {
        let addons = self.source.fetch_addons().await?;
        let marketplace = self.source.fetch_marketplace().await?;
        let overrides = Overrides::load(&self.paths.overrides).await;

        let items = reconcile(&addons, &marketplace, &overrides)?;

        match backup_once(&self.paths.output, &self.paths.backup).await {
            BackupOutcome::Created => info!(
                "Backed up {} to {}",
                self.paths.output.display(),
                self.paths.backup.display()
            ),
            BackupOutcome::AlreadyPresent => {
                debug!("Keeping existing backup {}", self.paths.backup.display())
            }
            BackupOutcome::NoPriorArtifact => {
                debug!("No artifact at {} to back up", self.paths.output.display())
            }
            BackupOutcome::Failed(err) => warn!(
                "Failed to back up {}: {}",
                self.paths.output.display(),
                err
            ),
        }

        write_artifact(&self.paths.output, &items).await?;

        info!(
            "Wrote {} entries to {}",
            items.len(),
            self.paths.output.display()
        );

        Ok(items.len())
    }
}

fn assemble(addon: &Addon, marketplace: &MarketplaceIndex) -> Result<CatalogItem, BuilderError> {
    let Some(id) = derive_id(&addon.help_link) else {
        return Err(BuilderError::IdentifierDerivation {
            help_link: addon.help_link.clone(),
        });
    };

    let (download_url, verified) = match marketplace.id_for_link(&addon.help_link) {
        Some(slug) => (marketplace_app_url(slug), marketplace.is_verified(slug)),
        None => (marketplace_search_url(&addon.name), false),
    };

    Ok(CatalogItem {
        id,
        name: addon.name.clone(),
        authors: addon.author_name.clone(),
        description: addon.description.clone(),
        thumbnail_url: PLACEHOLDER_THUMBNAIL_URL.to_string(),
        plugin_page_url: download_url.clone(),
        download_url,
        version: addon.version.clone(),
        release_date: addon.release_date.clone(),
        components_count: Some(addon.components.count()),
        verified: Some(verified),
        category: addon.category.clone(),
        updated_at: None,
        download_count: None,
        rating: None,
        license: None,
        cost: None,
        tags: tags_from_category(&addon.category),
    })
}

/// Joins the two feeds into sorted catalog entries with overrides applied.
/// System addons are skipped and a repeated id keeps its first occurrence.
pub fn reconcile(
    addons: &AddonFeed,
    marketplace: &MarketplaceFeed,
    overrides: &Overrides,
) -> Result<Vec<CatalogItem>, BuilderError> {
    let marketplace = MarketplaceIndex::new(marketplace);

    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(addons.index.len());

    for addon in addons.index.iter().filter(|addon| !addon.is_system) {
        let item = assemble(addon, &marketplace)?;

        if !seen.insert(item.id.clone()) {
            warn!("Dropping duplicate id {} from {}", item.id, addon.help_link);
            continue;
        }

        items.push(item);
    }

    overrides.apply(&mut items);

    items.sort_by(|left, right| locale_compare(&left.name, &right.name));

    Ok(items)
}

#[cfg(test)]
mod tests {
    use crate::feeds::{Components, MarketplaceEntry};

    use super::*;

    fn addon(name: &str, help_link: &str) -> Addon {
        Addon {
            name: name.into(),
            author_name: "Someone".into(),
            description: String::new(),
            download_link: "https://example.com/download".into(),
            help_link: help_link.into(),
            category: String::new(),
            version: String::new(),
            release_date: String::new(),
            components: Components::default(),
            is_system: false,
        }
    }

    fn feeds(addons: Vec<Addon>, entries: Vec<MarketplaceEntry>) -> (AddonFeed, MarketplaceFeed) {
        (
            AddonFeed { index: addons },
            MarketplaceFeed { index: entries },
        )
    }

    #[test]
    fn matched_addon_links_to_its_app_page() {
        let mut plugin = addon("MyPlugin", "https://x/y/MyPlugin.html");
        plugin.category = "Geometry - Mesh".into();
        plugin.components = Components::List(vec!["A".into(), "B".into()]);

        let (addons, marketplace) = feeds(
            vec![plugin],
            vec![MarketplaceEntry {
                id: "myplugin".into(),
                link: "https://x/y/MyPlugin.html".into(),
                verified: Some(true),
            }],
        );

        let items = reconcile(&addons, &marketplace, &Overrides::default()).unwrap();

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.id, "MyPlugin");
        assert_eq!(item.download_url, "https://www.food4rhino.com/en/app/myplugin");
        assert_eq!(item.plugin_page_url, item.download_url);
        assert_eq!(item.thumbnail_url, PLACEHOLDER_THUMBNAIL_URL);
        assert_eq!(item.verified, Some(true));
        assert_eq!(item.components_count, Some(2));
        assert_eq!(item.tags, vec!["geometry", "mesh"]);
    }

    #[test]
    fn unmatched_addon_falls_back_to_search() {
        let (addons, marketplace) =
            feeds(vec![addon("Human UI", "https://x/y/HumanUI.html")], vec![]);

        let items = reconcile(&addons, &marketplace, &Overrides::default()).unwrap();

        assert_eq!(
            items[0].download_url,
            "https://www.food4rhino.com/en/search?search_api_fulltext=Human%20UI"
        );
        assert_eq!(items[0].verified, Some(false));
        assert_eq!(items[0].components_count, Some(0));
    }

    #[test]
    fn system_addons_are_skipped() {
        let mut system = addon("Params", "https://x/y/Params.html");
        system.is_system = true;

        let (addons, marketplace) =
            feeds(vec![system, addon("Lunchbox", "https://x/y/Lunchbox.html")], vec![]);

        let items = reconcile(&addons, &marketplace, &Overrides::default()).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "Lunchbox");
    }

    #[test]
    fn system_addon_with_bad_link_is_not_fatal() {
        let mut system = addon("Params", "https://x/");
        system.is_system = true;

        let (addons, marketplace) = feeds(vec![system], vec![]);

        assert!(reconcile(&addons, &marketplace, &Overrides::default()).unwrap().is_empty());
    }

    #[test]
    fn underivable_id_aborts() {
        let (addons, marketplace) = feeds(
            vec![
                addon("Fine", "https://x/y/Fine.html"),
                addon("Broken", "https://x/y/"),
            ],
            vec![],
        );

        let result = reconcile(&addons, &marketplace, &Overrides::default());

        match result {
            Err(BuilderError::IdentifierDerivation { help_link }) => {
                assert_eq!(help_link, "https://x/y/")
            }
            other => panic!("expected id failure, got {other:?}"),
        }
    }

    #[test]
    fn repeated_id_keeps_first_occurrence() {
        let (addons, marketplace) = feeds(
            vec![
                addon("First", "https://x/a/Same.html"),
                addon("Second", "https://x/b/Same.html"),
            ],
            vec![],
        );

        let items = reconcile(&addons, &marketplace, &Overrides::default()).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "First");
    }

    #[test]
    fn overrides_apply_before_sorting() {
        let (addons, marketplace) = feeds(
            vec![
                addon("Alpha", "https://x/y/Alpha.html"),
                addon("Beta", "https://x/y/Beta.html"),
            ],
            vec![],
        );
        let overrides =
            Overrides::parse(r#"{"Alpha":{"name":"Zeta","rating":"4.5"}}"#).unwrap();

        let items = reconcile(&addons, &marketplace, &overrides).unwrap();

        let names: Vec<_> = items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Zeta"]);
        assert_eq!(items[1].id, "Alpha");
        assert_eq!(items[1].rating.as_deref(), Some("4.5"));
    }

    #[test]
    fn sorted_case_insensitively_by_name() {
        let (addons, marketplace) = feeds(
            vec![
                addon("kangaroo", "https://x/y/k.html"),
                addon("Anemone", "https://x/y/a.html"),
                addon("Bifocals", "https://x/y/b.html"),
            ],
            vec![],
        );

        let items = reconcile(&addons, &marketplace, &Overrides::default()).unwrap();

        let names: Vec<_> = items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Anemone", "Bifocals", "kangaroo"]);
    }

    #[test]
    fn accented_names_sort_next_to_their_base_letter() {
        let (addons, marketplace) = feeds(
            vec![
                addon("Zebra", "https://x/y/zebra.html"),
                addon("Élan", "https://x/y/elan.html"),
                addon("Ant", "https://x/y/ant.html"),
                addon("Öko", "https://x/y/oko.html"),
            ],
            vec![],
        );

        let items = reconcile(&addons, &marketplace, &Overrides::default()).unwrap();

        let names: Vec<_> = items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Ant", "Élan", "Öko", "Zebra"]);
    }

    #[test]
    fn paths_in_dir() {
        let paths = BuildPaths::in_dir("data");

        assert_eq!(paths.output, Path::new("data/plugins.json"));
        assert_eq!(paths.backup, Path::new("data/plugins.manual.backup.json"));
        assert_eq!(paths.overrides, Path::new("data/plugins.overrides.json"));
    }
}

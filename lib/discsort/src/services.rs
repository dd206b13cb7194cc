use shared::library::{RenameDecision, RouteOutcome};
use shared::release::ResolutionOutcome;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::{Result, RouteError, SortError},
    rename::advise_rename,
    resolver::{CatalogAttempt, Resolution, TrackResolver},
    router::{DestinationRouter, LibraryRoots},
    CatalogClient, TagReader,
};

/// Everything that happened to one file.
#[derive(Debug)]
pub struct SortReport {
    pub outcome: ResolutionOutcome,
    pub attempts: Vec<CatalogAttempt>,
    pub rename: RenameDecision,
    pub route: RouteOutcome,
    /// Health check result, taken only when a catalog failure left the
    /// file unresolved.
    pub catalog_healthy: Option<bool>,
}

/// The resolution pipeline wired to its collaborators.
///
/// Built once per invocation; holds no per-file state.
pub struct Sorter {
    catalog: Arc<dyn CatalogClient>,
    tags: Arc<dyn TagReader>,
    router: DestinationRouter,
}

impl Sorter {
    pub fn catalog(&self) -> &Arc<dyn CatalogClient> {
        &self.catalog
    }

    pub fn router(&self) -> &DestinationRouter {
        &self.router
    }

    /// Resolves, names and routes a single file, in that order.
    pub async fn sort_file(&self, path: &Path) -> Result<SortReport> {
        let original = path
            .file_name()
            .ok_or_else(|| RouteError::NoFileName(path.to_path_buf()))?;

        let resolution = TrackResolver::new(self.catalog.as_ref(), self.tags.as_ref())
            .resolve(path)
            .await;

        let catalog_healthy = if self.catalog_failed(&resolution) {
            let healthy = self.catalog.health_check().await;
            if !healthy {
                warn!(
                    "{} does not answer authenticated requests, check the token",
                    self.catalog.name()
                );
            }
            Some(healthy)
        } else {
            None
        };

        let rename = advise_rename(path, self.tags.as_ref());
        let filename = rename.filename(original);

        let route = self
            .router
            .route(path, &resolution.outcome, filename)
            .await?;

        info!("Sorted {:?} -> {:?}", path, route.path());
        Ok(SortReport {
            outcome: resolution.outcome,
            attempts: resolution.attempts,
            rename,
            route,
            catalog_healthy,
        })
    }

    fn catalog_failed(&self, resolution: &Resolution) -> bool {
        !resolution.outcome.is_resolved()
            && resolution
                .attempts
                .iter()
                .any(|attempt| matches!(attempt.result, Err(SortError::Catalog(_))))
    }
}

#[derive(Default)]
pub struct SorterBuilder {
    catalog: Option<Arc<dyn CatalogClient>>,
    tags: Option<Arc<dyn TagReader>>,
    roots: Option<LibraryRoots>,
}

impl SorterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(mut self, catalog: impl CatalogClient + 'static) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    pub fn tag_reader(mut self, tags: impl TagReader + 'static) -> Self {
        self.tags = Some(Arc::new(tags));
        self
    }

    pub fn roots(mut self, roots: LibraryRoots) -> Self {
        self.roots = Some(roots);
        self
    }

    pub fn build(self) -> std::result::Result<Sorter, &'static str> {
        let catalog = self.catalog.ok_or("a catalog client is required")?;
        let tags = self.tags.ok_or("a tag reader is required")?;
        let roots = self.roots.ok_or("library roots are required")?;

        Ok(Sorter {
            catalog,
            tags,
            router: DestinationRouter::new(roots),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::tests::{single_release, ScriptedCatalog, ScriptedTags};
    use crate::tags::FileTagReader;
    use tempfile::TempDir;

    fn library(dir: &TempDir) -> LibraryRoots {
        let roots = LibraryRoots {
            destination: dir.path().join("sorted"),
            duplicates: dir.path().join("duplicates"),
            review: dir.path().join("review"),
        };
        for path in [&roots.destination, &roots.duplicates, &roots.review] {
            std::fs::create_dir(path).unwrap();
        }
        roots
    }

    fn roots() -> LibraryRoots {
        LibraryRoots {
            destination: "/music".into(),
            duplicates: "/dupes".into(),
            review: "/review".into(),
        }
    }

    #[test]
    fn test_builder_requires_every_collaborator() {
        assert_eq!(
            SorterBuilder::new().build().err(),
            Some("a catalog client is required")
        );
        assert_eq!(
            SorterBuilder::new()
                .catalog(ScriptedCatalog::default())
                .build()
                .err(),
            Some("a tag reader is required")
        );
        assert_eq!(
            SorterBuilder::new()
                .catalog(ScriptedCatalog::default())
                .tag_reader(FileTagReader::new())
                .build()
                .err(),
            Some("library roots are required")
        );
    }

    #[test]
    fn test_builder_wires_router_roots() {
        let sorter = SorterBuilder::new()
            .catalog(ScriptedCatalog::default())
            .tag_reader(ScriptedTags(None))
            .roots(roots())
            .build()
            .unwrap();
        assert_eq!(sorter.router().roots(), &roots());
        assert_eq!(sorter.catalog().id(), "scripted");
    }

    #[tokio::test]
    async fn test_catalog_failure_triggers_health_check() {
        let dir = TempDir::new().unwrap();
        let sorter = SorterBuilder::new()
            .catalog(ScriptedCatalog::default())
            .tag_reader(ScriptedTags(None))
            .roots(library(&dir))
            .build()
            .unwrap();
        let source = dir.path().join("Air - Kelly Watch the Stars.mp3");
        std::fs::write(&source, b"audio").unwrap();

        let report = sorter.sort_file(&source).await.unwrap();

        assert_eq!(report.catalog_healthy, Some(true));
        assert!(matches!(report.route, RouteOutcome::Review(_)));
    }

    #[tokio::test]
    async fn test_resolved_file_skips_health_check() {
        let dir = TempDir::new().unwrap();
        let catalog = ScriptedCatalog::default()
            .with("Air Kelly Watch the Stars", single_release(5, &["Downtempo"], 1998));
        let sorter = SorterBuilder::new()
            .catalog(catalog)
            .tag_reader(ScriptedTags(None))
            .roots(library(&dir))
            .build()
            .unwrap();
        let source = dir.path().join("Air - Kelly Watch the Stars.mp3");
        std::fs::write(&source, b"audio").unwrap();

        let report = sorter.sort_file(&source).await.unwrap();

        assert_eq!(report.catalog_healthy, None);
        assert!(matches!(report.route, RouteOutcome::Sorted(_)));
    }

    #[tokio::test]
    async fn test_path_without_file_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        let sorter = SorterBuilder::new()
            .catalog(ScriptedCatalog::default())
            .tag_reader(ScriptedTags(None))
            .roots(library(&dir))
            .build()
            .unwrap();

        let err = sorter.sort_file(Path::new("/")).await.unwrap_err();
        assert!(matches!(err, SortError::Route(RouteError::NoFileName(_))));
    }
}

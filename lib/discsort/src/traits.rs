use async_trait::async_trait;
use shared::release::{RawIdentity, SearchPage};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{CatalogError, TagError};

/// A release catalog that answers free-text queries with ranked releases.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;

    async fn search(&self, query: &str) -> Result<SearchPage, CatalogError>;

    async fn health_check(&self) -> bool;
}

/// Reads artist and title from the tags embedded in an audio file.
pub trait TagReader: Send + Sync {
    fn read_tags(&self, path: &Path) -> Result<RawIdentity, TagError>;

    /// Tags are an optional source: any failure means "no metadata available".
    fn read_identity(&self, path: &Path) -> Option<RawIdentity> {
        match self.read_tags(path) {
            Ok(identity) => Some(identity),
            Err(TagError::UnsupportedFormat(ext)) => {
                debug!("No tag support for {:?} ({})", path, ext);
                None
            }
            Err(e) => {
                warn!("Could not read tags from {:?}: {}", path, e);
                None
            }
        }
    }
}

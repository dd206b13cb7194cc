use shared::library::RouteOutcome;
use shared::release::ResolutionOutcome;
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{disambiguate::NO_STYLE, error::RouteError};

/// The three filesystem roots a file can be routed into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryRoots {
    /// Sorted files land under `destination/style/decade/`
    pub destination: PathBuf,
    /// Files whose sorted target already exists
    pub duplicates: PathBuf,
    /// Files that could not be identified
    pub review: PathBuf,
}

/// Creates one directory level; an existing directory is fine.
async fn ensure_dir(path: &Path) -> Result<(), RouteError> {
    match tokio::fs::create_dir(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(source) => Err(RouteError::CreateDir {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Moves a file, falling back to copy + remove when a plain rename fails
/// (e.g. across filesystems).
async fn move_file(from: &Path, to: &Path) -> Result<(), RouteError> {
    let rename_err = match tokio::fs::rename(from, to).await {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    if tokio::fs::copy(from, to).await.is_err() {
        return Err(RouteError::Move {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source: rename_err,
        });
    }

    tokio::fs::remove_file(from)
        .await
        .map_err(|source| RouteError::Move {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })
}

/// Replaces path separators so `text` stays a single path component.
pub(crate) fn path_component(text: &str) -> String {
    text.replace(['/', '\\'], "-")
}

/// A style directory directly below the destination root.
fn style_dir_name(style: &str) -> String {
    match path_component(style).trim() {
        "" | "." | ".." => NO_STYLE.to_string(),
        _ => path_component(style),
    }
}

#[derive(Debug, Clone)]
pub struct DestinationRouter {
    roots: LibraryRoots,
}

impl DestinationRouter {
    pub fn new(roots: LibraryRoots) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &LibraryRoots {
        &self.roots
    }

    /// Moves `source` to where `outcome` says it belongs, under `filename`.
    pub async fn route(
        &self,
        source: &Path,
        outcome: &ResolutionOutcome,
        filename: impl AsRef<OsStr>,
    ) -> Result<RouteOutcome, RouteError> {
        let filename = filename.as_ref();
        let release = match outcome {
            ResolutionOutcome::Resolved(release) => release,
            ResolutionOutcome::Unresolved => {
                let target = self.roots.review.join(filename);
                move_file(source, &target).await?;
                info!("Moved {:?} to review: {:?}", source, target);
                return Ok(RouteOutcome::Review(target));
            }
        };

        let style_dir = self.roots.destination.join(style_dir_name(&release.style));
        ensure_dir(&style_dir).await?;
        let decade_dir = style_dir.join(&release.decade);
        ensure_dir(&decade_dir).await?;

        let target = decade_dir.join(filename);
        let exists = tokio::fs::try_exists(&target)
            .await
            .map_err(|source| RouteError::Stat {
                path: target.clone(),
                source,
            })?;
        if exists {
            let duplicate = self.roots.duplicates.join(filename);
            warn!(
                "{:?} already exists, moving {:?} to duplicates",
                target, source
            );
            move_file(source, &duplicate).await?;
            return Ok(RouteOutcome::Duplicate(duplicate));
        }

        move_file(source, &target).await?;
        info!("Moved {:?} to {:?}", source, target);
        Ok(RouteOutcome::Sorted(target))
    }
}

//! Track resolution: filename first, embedded tags as the last resort.
//!
//! ```text
//! ParsingFilename ──ok──▶ Querying(Filename) ──resolved──▶ Done(Resolved)
//!        │                      │
//!        └──no identity──┐      └──not resolved──┐
//!                        ▼                       ▼
//!                  FallbackToTags ◀──────────────┘
//!                        │
//!           tags ─▶ Querying(Tags) ──▶ Done(Resolved | Unresolved)
//!        no tags ─▶ Done(Unresolved)
//! ```

use shared::release::{IdentitySource, RawIdentity, ResolutionOutcome, ResolvedRelease};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::{
    disambiguate::select_release,
    error::SortError,
    filename::{normalize_identity, parse_filename},
    CatalogClient, TagReader,
};

/// What a single catalog round trip produced.
#[derive(Debug)]
pub struct CatalogAttempt {
    pub source: IdentitySource,
    pub query: String,
    pub result: Result<ResolvedRelease, SortError>,
}

/// The outcome together with every catalog attempt made on the way.
#[derive(Debug)]
pub struct Resolution {
    pub outcome: ResolutionOutcome,
    pub attempts: Vec<CatalogAttempt>,
}

#[derive(Debug)]
enum State {
    ParsingFilename,
    Querying {
        identity: RawIdentity,
        source: IdentitySource,
    },
    FallbackToTags,
    Done(ResolutionOutcome),
}

pub struct TrackResolver<'a> {
    catalog: &'a dyn CatalogClient,
    tags: &'a dyn TagReader,
}

impl<'a> TrackResolver<'a> {
    pub fn new(catalog: &'a dyn CatalogClient, tags: &'a dyn TagReader) -> Self {
        Self { catalog, tags }
    }

    async fn query(&self, identity: &RawIdentity, source: IdentitySource) -> CatalogAttempt {
        let query = identity.query();
        info!(
            "Querying {} with {:?} identity: '{}'",
            self.catalog.name(),
            source,
            query
        );

        let result = match self.catalog.search(&query).await {
            Ok(page) => select_release(&page).map_err(SortError::from),
            Err(e) => {
                warn!("{} query failed: {}", self.catalog.name(), e);
                Err(e.into())
            }
        };

        CatalogAttempt {
            source,
            query,
            result,
        }
    }

    /// Advances the machine by one transition.
    async fn step(&self, state: State, path: &Path, attempts: &mut Vec<CatalogAttempt>) -> State {
        match state {
            State::ParsingFilename => {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_default();
                match parse_filename(&filename) {
                    Ok(identity) => State::Querying {
                        identity: normalize_identity(identity),
                        source: IdentitySource::Filename,
                    },
                    Err(e) => {
                        info!("{}: {:?}", e, filename);
                        State::FallbackToTags
                    }
                }
            }
            State::Querying { identity, source } => {
                let attempt = self.query(&identity, source).await;
                let next = match (&attempt.result, source) {
                    (Ok(release), _) => State::Done(ResolutionOutcome::Resolved(release.clone())),
                    (Err(_), IdentitySource::Filename) => State::FallbackToTags,
                    (Err(_), IdentitySource::Tags) => State::Done(ResolutionOutcome::Unresolved),
                };
                attempts.push(attempt);
                next
            }
            State::FallbackToTags => match self.tags.read_identity(path) {
                Some(identity) => State::Querying {
                    identity: normalize_identity(identity),
                    source: IdentitySource::Tags,
                },
                None => {
                    info!("No usable tags in {:?}", path);
                    State::Done(ResolutionOutcome::Unresolved)
                }
            },
            done @ State::Done(_) => done,
        }
    }

    pub async fn resolve(&self, path: &Path) -> Resolution {
        let mut attempts = Vec::new();
        let mut state = State::ParsingFilename;

        let outcome = loop {
            state = match state {
                State::Done(outcome) => break outcome,
                state => {
                    debug!("Resolver state: {:?}", state);
                    self.step(state, path, &mut attempts).await
                }
            };
        };

        match &outcome {
            ResolutionOutcome::Resolved(release) => info!(
                "Resolved {:?} as {} - {} [{} / {} / {}]",
                path,
                release.artist,
                release.release_title,
                release.label,
                release.style,
                release.decade
            ),
            ResolutionOutcome::Unresolved => info!("Could not resolve {:?}", path),
        }

        Resolution { outcome, attempts }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Best-effort artist/title guess, read from a filename or from embedded tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIdentity {
    pub artist: String,
    pub title: String,
}

impl RawIdentity {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
        }
    }

    /// Catalog query text: artist first, then title, joined by a single space.
    pub fn query(&self) -> String {
        format!("{} {}", self.artist, self.title)
    }
}

impl fmt::Display for RawIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}

/// Where a [`RawIdentity`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentitySource {
    Filename,
    Tags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistCredit {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCredit {
    pub name: String,
}

/// A physical or digital format of a release, e.g. `CD` with `["Album", "Compilation"]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReleaseFormat {
    pub name: String,
    pub descriptions: Vec<String>,
}

/// One search result from the catalog, as delivered by the service.
///
/// Credits and formats are kept as lists; picking the first entry of each is
/// left to the disambiguator, which treats an empty list as an unusable
/// candidate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CandidateRelease {
    pub id: u64,
    pub title: String,
    pub year: Option<i32>,
    pub country: Option<String>,
    pub artists: Vec<ArtistCredit>,
    pub labels: Vec<LabelCredit>,
    pub formats: Vec<ReleaseFormat>,
    pub styles: Vec<String>,
}

/// A page of catalog results together with the total match count reported
/// by the service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchPage {
    pub count: usize,
    pub results: Vec<CandidateRelease>,
}

/// Canonical classification of a track, built from an accepted candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRelease {
    pub id: u64,
    pub release_title: String,
    pub year: i32,
    pub decade: String,
    pub country: Option<String>,
    pub artist: String,
    pub label: String,
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionOutcome {
    Resolved(ResolvedRelease),
    Unresolved,
}

impl ResolutionOutcome {
    pub fn release(&self) -> Option<&ResolvedRelease> {
        match self {
            ResolutionOutcome::Resolved(release) => Some(release),
            ResolutionOutcome::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved(_))
    }
}

use serde::Deserialize;
use shared::release::{ArtistCredit, CandidateRelease, LabelCredit, ReleaseFormat, SearchPage};

// Internal structs for deserializing raw API responses
#[derive(Deserialize, Debug)]
pub(crate) struct SearchResponse {
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct Pagination {
    pub items: usize,
}

#[derive(Deserialize, Debug)]
pub(crate) struct SearchResult {
    pub id: u64,
    pub title: String,
    pub year: Option<String>,
    pub country: Option<String>,
    #[serde(default)]
    pub label: Vec<String>,
    #[serde(default)]
    pub style: Vec<String>,
    #[serde(default)]
    pub format: Vec<String>,
    pub formats: Option<Vec<FormatResponse>>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct FormatResponse {
    pub name: String,
    #[serde(default)]
    pub descriptions: Vec<String>,
}

/// Splits a search title of the form `"Artist - Release"`.
fn split_title(title: &str) -> (Option<&str>, &str) {
    match title.split_once(" - ") {
        Some((artist, release)) => (Some(artist.trim()), release.trim()),
        None => (None, title.trim()),
    }
}

/// Reads the flat `format` list as one format: first entry is the name,
/// the rest are its descriptions.
fn flat_format(format: Vec<String>) -> Vec<ReleaseFormat> {
    let mut entries = format.into_iter();
    match entries.next() {
        Some(name) => vec![ReleaseFormat {
            name,
            descriptions: entries.collect(),
        }],
        None => vec![],
    }
}

impl From<SearchResult> for CandidateRelease {
    fn from(result: SearchResult) -> Self {
        let (artist, release_title) = split_title(&result.title);

        let formats = match result.formats {
            Some(formats) if !formats.is_empty() => formats
                .into_iter()
                .map(|f| ReleaseFormat {
                    name: f.name,
                    descriptions: f.descriptions,
                })
                .collect(),
            _ => flat_format(result.format),
        };

        CandidateRelease {
            id: result.id,
            title: release_title.to_string(),
            year: result.year.as_deref().and_then(|y| y.trim().parse().ok()),
            country: result.country.filter(|c| !c.is_empty()),
            artists: artist
                .map(|name| ArtistCredit {
                    name: name.to_string(),
                })
                .into_iter()
                .collect(),
            labels: result
                .label
                .into_iter()
                .map(|name| LabelCredit { name })
                .collect(),
            formats,
            styles: result.style,
        }
    }
}

impl From<SearchResponse> for SearchPage {
    fn from(response: SearchResponse) -> Self {
        let count = response
            .pagination
            .map(|p| p.items)
            .unwrap_or(response.results.len());

        SearchPage {
            count,
            results: response.results.into_iter().map(Into::into).collect(),
        }
    }
}

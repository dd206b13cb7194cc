use shared::release::{CandidateRelease, ResolvedRelease, SearchPage};
use tracing::{debug, info};

use crate::error::{CandidateError, SelectionError};

/// Format description marking a release as a compilation.
pub const COMPILATION: &str = "Compilation";

/// Style used when a release lists none.
pub const NO_STYLE: &str = "no_style";

/// Derives the decade folder name from a year.
///
/// Textual truncation: the first three characters of the decimal year
/// followed by `"0"`, so 1999 gives `"1990"` and 0 gives `"00"`.
pub fn decade_for_year(year: i32) -> String {
    let year = year.to_string();
    let prefix: String = year.chars().take(3).collect();
    format!("{prefix}0")
}

/// Picks the style used for routing.
///
/// The second listed style tends to be the more specific one, so it wins
/// when there are several.
pub fn select_style(styles: &[String]) -> String {
    match styles {
        [] => NO_STYLE.to_string(),
        [only] => only.clone(),
        [_, second, ..] => second.clone(),
    }
}

fn is_compilation(candidate: &CandidateRelease) -> Result<bool, CandidateError> {
    let format = candidate
        .formats
        .first()
        .ok_or(CandidateError::MissingFormat(candidate.id))?;
    Ok(format.descriptions.iter().any(|d| d == COMPILATION))
}

/// Builds the classification for an accepted candidate.
pub fn resolve_candidate(candidate: &CandidateRelease) -> Result<ResolvedRelease, CandidateError> {
    let year = candidate
        .year
        .ok_or(CandidateError::MissingYear(candidate.id))?;
    let artist = candidate
        .artists
        .first()
        .ok_or(CandidateError::MissingArtist(candidate.id))?;
    let label = candidate
        .labels
        .first()
        .ok_or(CandidateError::MissingLabel(candidate.id))?;

    Ok(ResolvedRelease {
        id: candidate.id,
        release_title: candidate.title.clone(),
        year,
        decade: decade_for_year(year),
        country: candidate.country.clone(),
        artist: artist.name.clone(),
        label: label.name.clone(),
        style: select_style(&candidate.styles),
    })
}

/// Chooses the release to classify a track with.
///
/// A single match is trusted even when it is a compilation. With several
/// matches the first non-compilation wins. Candidates missing the fields
/// needed for classification are skipped.
pub fn select_release(page: &SearchPage) -> Result<ResolvedRelease, SelectionError> {
    if page.count == 0 || page.results.is_empty() {
        info!("Catalog returned no results");
        return Err(SelectionError::NoResults);
    }

    if page.count == 1 {
        let candidate = &page.results[0];
        return resolve_candidate(candidate).map_err(|e| {
            info!("Only match is unusable: {}", e);
            SelectionError::NoAcceptableCandidate { count: page.count }
        });
    }

    for candidate in &page.results {
        let accepted = is_compilation(candidate).and_then(|compilation| {
            if compilation {
                Ok(None)
            } else {
                resolve_candidate(candidate).map(Some)
            }
        });

        match accepted {
            Ok(Some(release)) => {
                info!(
                    "Selected release {} '{}' ({}, {})",
                    release.id, release.release_title, release.year, release.style
                );
                return Ok(release);
            }
            Ok(None) => debug!("Skipping compilation {} '{}'", candidate.id, candidate.title),
            Err(e) => debug!("Skipping unusable candidate: {}", e),
        }
    }

    info!(
        "No acceptable release among {} result(s)",
        page.results.len()
    );
    Err(SelectionError::NoAcceptableCandidate { count: page.count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::release::{ArtistCredit, LabelCredit, ReleaseFormat};

    fn candidate(id: u64, descriptions: &[&str], styles: &[&str]) -> CandidateRelease {
        CandidateRelease {
            id,
            title: format!("Release {id}"),
            year: Some(1997),
            country: Some("France".to_string()),
            artists: vec![ArtistCredit {
                name: "Daft Punk".to_string(),
            }],
            labels: vec![LabelCredit {
                name: "Virgin".to_string(),
            }],
            formats: vec![ReleaseFormat {
                name: "CD".to_string(),
                descriptions: descriptions.iter().map(|s| s.to_string()).collect(),
            }],
            styles: styles.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn page(count: usize, results: Vec<CandidateRelease>) -> SearchPage {
        SearchPage { count, results }
    }

    #[test]
    fn test_decade_is_textual_truncation() {
        assert_eq!(decade_for_year(1994), "1990");
        assert_eq!(decade_for_year(2005), "2000");
        assert_eq!(decade_for_year(1999), "1990");
        assert_eq!(decade_for_year(0), "00");
        assert_eq!(decade_for_year(12345), "1230");
    }

    #[test]
    fn test_style_selection() {
        let styles: Vec<String> = ["Disco", "House", "Funk"].map(String::from).to_vec();
        assert_eq!(select_style(&styles), "House");
        assert_eq!(select_style(&["Techno".to_string()]), "Techno");
        assert_eq!(select_style(&[]), NO_STYLE);
    }

    #[test]
    fn test_single_compilation_is_accepted() {
        let result = select_release(&page(1, vec![candidate(1, &[COMPILATION], &[])])).unwrap();
        assert_eq!(result.id, 1);
        assert_eq!(result.style, NO_STYLE);
    }

    #[test]
    fn test_first_non_compilation_wins() {
        let results = vec![
            candidate(1, &["Album", COMPILATION], &["House"]),
            candidate(2, &[COMPILATION], &["House"]),
            candidate(3, &["Album"], &["Disco", "House"]),
        ];
        let release = select_release(&page(3, results)).unwrap();
        assert_eq!(release.id, 3);
        assert_eq!(release.style, "House");
        assert_eq!(release.decade, "1990");
        assert_eq!(release.artist, "Daft Punk");
        assert_eq!(release.label, "Virgin");
    }

    #[test]
    fn test_all_compilations_fail() {
        let results = vec![
            candidate(1, &[COMPILATION], &[]),
            candidate(2, &[COMPILATION], &[]),
        ];
        assert_eq!(
            select_release(&page(2, results)),
            Err(SelectionError::NoAcceptableCandidate { count: 2 })
        );
    }

    #[test]
    fn test_no_results() {
        assert_eq!(
            select_release(&page(0, vec![])),
            Err(SelectionError::NoResults)
        );
    }

    #[test]
    fn test_unusable_candidate_is_skipped() {
        let mut broken = candidate(1, &["Album"], &["House"]);
        broken.labels.clear();
        let mut no_format = candidate(2, &[], &[]);
        no_format.formats.clear();
        let results = vec![broken, no_format, candidate(3, &["Single"], &["Garage"])];

        let release = select_release(&page(3, results)).unwrap();
        assert_eq!(release.id, 3);
        assert_eq!(release.style, "Garage");
    }

    #[test]
    fn test_single_unusable_candidate_fails() {
        let mut lone = candidate(1, &[], &[]);
        lone.year = None;
        assert_eq!(
            select_release(&page(1, vec![lone])),
            Err(SelectionError::NoAcceptableCandidate { count: 1 })
        );
    }

    #[test]
    fn test_missing_country_is_tolerated() {
        let mut lone = candidate(1, &["Album"], &[]);
        lone.country = None;
        let release = select_release(&page(1, vec![lone])).unwrap();
        assert_eq!(release.country, None);
    }
}

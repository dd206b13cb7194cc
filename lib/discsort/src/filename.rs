use regex::Regex;
use shared::release::RawIdentity;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::ParseError;

const SEPARATOR: &str = " - ";

// Innermost group only; nested groups go from the inside out.
static RE_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^()]*\)").expect("valid parenthetical regex"));

/// Strips the extension from a bare filename.
fn stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}

/// Drops a two-digit track number prefix, e.g. `"02 Artist - Title"`.
fn strip_track_number(stem: &str) -> &str {
    let mut chars = stem.chars();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if a.is_ascii_digit() && b.is_ascii_digit() => &stem[2..],
        _ => stem,
    }
}

/// Parses `"[NN]Artist - Title.ext"` into an artist/title pair.
///
/// Only the first two `" - "` separated segments are used; anything after a
/// second separator is dropped.
pub fn parse_filename(filename: &str) -> Result<RawIdentity, ParseError> {
    let name = strip_track_number(stem(filename));

    let mut parts = name.split(SEPARATOR);
    match (parts.next(), parts.next()) {
        (Some(artist), Some(title)) => Ok(RawIdentity::new(artist.trim(), title.trim())),
        _ => Err(ParseError::NoIdentity),
    }
}

/// Removes parenthetical annotations such as `(Remix)` or `(Radio Edit)`.
///
/// Surrounding whitespace is left as produced by the removal.
pub fn normalize_title(title: &str) -> String {
    let mut title = title.to_string();
    while let Some(m) = RE_PARENTHETICAL.find(&title) {
        title.replace_range(m.range(), "");
    }
    title
}

/// Applies [`normalize_title`] to the title of an identity.
pub fn normalize_identity(identity: RawIdentity) -> RawIdentity {
    RawIdentity {
        title: normalize_title(&identity.title),
        artist: identity.artist,
    }
}

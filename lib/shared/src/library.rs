use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::PathBuf;

/// Whether the file should land under a new name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenameDecision {
    Rename(String),
    KeepOriginal,
}

impl RenameDecision {
    /// The filename to use at the destination.
    pub fn filename<'a>(&'a self, original: &'a OsStr) -> &'a OsStr {
        match self {
            RenameDecision::Rename(name) => OsStr::new(name),
            RenameDecision::KeepOriginal => original,
        }
    }
}

/// Where a file ended up after routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteOutcome {
    /// Moved into `destination/style/decade/`
    Sorted(PathBuf),
    /// Target already existed; moved into the duplicates root instead
    Duplicate(PathBuf),
    /// Could not be identified; moved into the review root
    Review(PathBuf),
}

impl RouteOutcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            RouteOutcome::Sorted(path)
            | RouteOutcome::Duplicate(path)
            | RouteOutcome::Review(path) => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_decision_picks_filename() {
        let keep = RenameDecision::KeepOriginal;
        assert_eq!(keep.filename(OsStr::new("a.mp3")), "a.mp3");

        let rename = RenameDecision::Rename("Artist - Title.mp3".to_string());
        assert_eq!(rename.filename(OsStr::new("a.mp3")), "Artist - Title.mp3");
    }

    #[test]
    fn route_outcome_serializes_with_variant_tag() {
        let outcome = RouteOutcome::Review(PathBuf::from("/review/x.mp3"));
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"Review":"/review/x.mp3"}"#);
    }
}

use shared::library::RenameDecision;
use std::path::Path;
use tracing::info;

use crate::{
    filename::{normalize_title, parse_filename},
    router::path_component,
    TagReader,
};

/// Proposes `"{artist} - {title}.{ext}"` for files whose name does not
/// parse, using embedded tags and the normalized title.
///
/// Separators inside tag values are replaced so the name stays one path
/// component.
pub fn advise_rename(path: &Path, tags: &dyn TagReader) -> RenameDecision {
    let Some(filename) = path.file_name().map(|n| n.to_string_lossy()) else {
        return RenameDecision::KeepOriginal;
    };

    if parse_filename(&filename).is_ok() {
        return RenameDecision::KeepOriginal;
    }

    let Some(identity) = tags.read_identity(path) else {
        return RenameDecision::KeepOriginal;
    };

    let artist = path_component(&identity.artist);
    let title = path_component(&normalize_title(&identity.title));
    let new_name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{} - {}.{}", artist, title, ext),
        None => format!("{} - {}", artist, title),
    };

    info!("Renaming {:?} to {:?}", filename, new_name);
    RenameDecision::Rename(new_name)
}

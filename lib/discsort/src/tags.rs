use id3::TagLike;
use lofty::file::TaggedFileExt;
use lofty::prelude::*;
use lofty::probe::Probe;
use shared::release::RawIdentity;
use std::path::Path;

use crate::{error::TagError, TagReader};

/// Tag store families, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFormat {
    Id3,
    Mp4,
}

impl TagFormat {
    pub fn from_path(path: &Path) -> Result<Self, TagError> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "mp3" => Ok(TagFormat::Id3),
            "m4a" | "mp4" => Ok(TagFormat::Mp4),
            _ => Err(TagError::UnsupportedFormat(ext)),
        }
    }
}

fn require(value: Option<String>, field: &'static str) -> Result<String, TagError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(TagError::MissingField(field))
}

/// Reads MP3 artist/title from the ID3 `TPE1`/`TIT2` frames.
fn read_id3(path: &Path) -> Result<RawIdentity, TagError> {
    let tag = id3::Tag::read_from_path(path)?;
    let artist = require(tag.artist().map(str::to_string), "artist")?;
    let title = require(tag.title().map(str::to_string), "title")?;
    Ok(RawIdentity { artist, title })
}

/// Reads MP4 artist/name atoms from the `ilst` tag.
fn read_mp4(path: &Path) -> Result<RawIdentity, TagError> {
    let tagged_file = Probe::open(path)?.read()?;
    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
        .ok_or(TagError::MissingField("tags"))?;

    let artist = require(tag.artist().map(|s| s.to_string()), "artist")?;
    let title = require(tag.title().map(|s| s.to_string()), "title")?;
    Ok(RawIdentity { artist, title })
}

/// Reads tags straight from audio files on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTagReader;

impl FileTagReader {
    pub fn new() -> Self {
        Self
    }
}

impl TagReader for FileTagReader {
    fn read_tags(&self, path: &Path) -> Result<RawIdentity, TagError> {
        match TagFormat::from_path(path)? {
            TagFormat::Id3 => read_id3(path),
            TagFormat::Mp4 => read_mp4(path),
        }
    }
}

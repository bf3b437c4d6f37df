//! Media input.
//!
//! A [`MediaSource`] turns what the user typed (a local path or a remote URL)
//! into a stable content URL for an image or video element.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::ElementKind;

/// Image or video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Still image.
    Image,
    /// Video clip.
    Video,
}

impl MediaKind {
    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// Classify a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "avif" | "bmp" | "svg" => Some(Self::Image),
            "mp4" | "webm" | "mov" | "m4v" | "ogv" => Some(Self::Video),
            _ => None,
        }
    }
}

/// A resolved media reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    /// What the URL points at.
    pub kind: MediaKind,
    /// Content URL stored on the element.
    pub url: String,
}

impl MediaRef {
    /// Element payload for this media.
    pub fn into_kind(self) -> ElementKind {
        match self.kind {
            MediaKind::Image => ElementKind::Image { url: self.url },
            MediaKind::Video => ElementKind::Video { url: self.url },
        }
    }
}

/// Produces content URLs from user input.
pub trait MediaSource {
    /// Resolve `input` as media of `kind`.
    fn resolve(&self, input: &str, kind: MediaKind) -> Result<MediaRef>;
}

/// Resolves local files to `file://` URLs and passes remote URLs through.
#[derive(Debug, Clone, Default)]
pub struct LocalMedia {
    base_dir: Option<PathBuf>,
}

impl LocalMedia {
    /// Resolve relative paths against the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: Some(base_dir.into()) }
    }

    fn absolute(&self, input: &str) -> PathBuf {
        let expanded = shellexpand::tilde(input).to_string();
        let path = PathBuf::from(expanded);
        match (&self.base_dir, path.is_absolute()) {
            (Some(base), false) => base.join(path),
            _ => path,
        }
    }
}

fn is_remote(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://") || input.starts_with("file://")
}

fn file_url(path: &Path) -> String {
    let mut url = String::from("file://");
    for c in path.to_string_lossy().chars() {
        match c {
            ' ' => url.push_str("%20"),
            '#' => url.push_str("%23"),
            '?' => url.push_str("%3F"),
            '\\' => url.push('/'),
            c => url.push(c),
        }
    }
    url
}

impl MediaSource for LocalMedia {
    fn resolve(&self, input: &str, kind: MediaKind) -> Result<MediaRef> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::media(PathBuf::new(), "no file given"));
        }
        if is_remote(input) {
            return Ok(MediaRef { kind, url: input.to_string() });
        }

        let path = self.absolute(input);
        if !path.is_file() {
            return Err(Error::media(path, "file not found"));
        }
        let detected = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(MediaKind::from_extension);
        match detected {
            None => Err(Error::media(path, "unrecognized media type")),
            Some(found) if found != kind => Err(Error::media(
                path,
                format!("expected a {}, found a {}", kind.name(), found.name()),
            )),
            Some(_) => {
                let absolute = fs_err::canonicalize(&path).map_err(|e| Error::media(&path, e.to_string()))?;
                tracing::debug!(path = %absolute.display(), kind = kind.name(), "Media resolved");
                Ok(MediaRef { kind, url: file_url(&absolute) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn remote_urls_pass_through() {
        let m = LocalMedia::new().resolve("https://picsum.photos/200", MediaKind::Image).unwrap();
        assert_eq!(m.url, "https://picsum.photos/200");
        assert!(matches!(m.into_kind(), ElementKind::Image { .. }));
    }

    #[test]
    fn local_files_become_file_urls() {
        let dir = tempfile::tempdir().unwrap();
        fs_err::write(dir.path().join("my clip.MP4"), b"x").unwrap();
        let media = LocalMedia::with_base_dir(dir.path());
        let m = media.resolve("my clip.MP4", MediaKind::Video).unwrap();
        assert!(m.url.starts_with("file://"));
        assert!(m.url.ends_with("my%20clip.MP4"));
    }

    #[test]
    fn mismatches_and_missing_files_are_media_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs_err::write(dir.path().join("a.png"), b"x").unwrap();
        fs_err::write(dir.path().join("notes.txt"), b"x").unwrap();
        let media = LocalMedia::with_base_dir(dir.path());
        assert!(matches!(media.resolve("a.png", MediaKind::Video), Err(Error::Media { .. })));
        assert!(matches!(media.resolve("notes.txt", MediaKind::Image), Err(Error::Media { .. })));
        assert!(matches!(media.resolve("gone.png", MediaKind::Image), Err(Error::Media { .. })));
    }
}

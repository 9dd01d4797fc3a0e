//! Background media playlist
//!
//! The playlist loops forever: each end-of-playback advances to the next
//! entry modulo the list length and starts it once it reports ready. A
//! source that fails to start is logged and leaves the backdrop stalled;
//! nothing is retried and the weather view is unaffected.
//!
//! Readiness and playback run as tasks under one key, so starting the next
//! entry aborts whatever was still attached to the previous one.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Task key shared by every backdrop task.
pub const BACKDROP_TASK: &str = "backdrop";

pub const DEFAULT_VIDEO: &str = "assets/background.mp4";
pub const DEFAULT_VIDEO_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaylistError {
    #[error("playlist needs at least one source")]
    Empty,
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("{path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}: not a regular file")]
    NotAFile(PathBuf),

    #[error("{0}: zero-length clip")]
    ZeroLength(PathBuf),
}

/// One clip in the playlist
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaSource {
    pub path: PathBuf,
    /// How long one play-through lasts
    pub duration: Duration,
}

impl MediaSource {
    pub fn new(path: impl Into<PathBuf>, duration: Duration) -> Self {
        Self {
            path: path.into(),
            duration,
        }
    }

    /// File name for display, falling back to the full path.
    pub fn label(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Non-empty, ordered list of sources with a current position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playlist {
    entries: Vec<MediaSource>,
    index: usize,
}

impl Playlist {
    pub fn new(entries: Vec<MediaSource>) -> Result<Self, PlaylistError> {
        if entries.is_empty() {
            return Err(PlaylistError::Empty);
        }
        Ok(Self { entries, index: 0 })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current(&self) -> &MediaSource {
        &self.entries[self.index]
    }

    /// Move to the next entry, wrapping to the first. Returns the new index.
    pub fn advance(&mut self) -> usize {
        self.index = (self.index + 1) % self.entries.len();
        self.index
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self {
            entries: vec![MediaSource::new(
                DEFAULT_VIDEO,
                Duration::from_secs(DEFAULT_VIDEO_SECS),
            )],
            index: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum BackdropStatus {
    /// Waiting for the current source to report ready
    #[default]
    Loading,
    Playing,
    /// The current source failed to start; the loop has stopped
    Stalled { reason: String },
}

impl fmt::Display for BackdropStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackdropStatus::Loading => f.write_str("loading"),
            BackdropStatus::Playing => f.write_str("playing"),
            BackdropStatus::Stalled { reason } => write!(f, "stalled: {}", reason),
        }
    }
}

/// Playlist plus what the current entry is doing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Backdrop {
    pub playlist: Playlist,
    pub status: BackdropStatus,
}

impl Backdrop {
    pub fn new(playlist: Playlist) -> Self {
        Self {
            playlist,
            status: BackdropStatus::Loading,
        }
    }

    /// Signals carry the index they were issued for; anything else is stale.
    pub fn is_current(&self, index: usize) -> bool {
        self.playlist.index() == index
    }
}

/// Resolves once `source` can be played.
pub async fn prepare(source: &MediaSource) -> Result<(), MediaError> {
    let metadata = tokio::fs::metadata(&source.path)
        .await
        .map_err(|e| unavailable(&source.path, e))?;
    if !metadata.is_file() {
        return Err(MediaError::NotAFile(source.path.clone()));
    }
    if source.duration.is_zero() {
        return Err(MediaError::ZeroLength(source.path.clone()));
    }
    Ok(())
}

/// Start `source` and resolve when the clip reaches its end.
pub async fn play(source: &MediaSource) -> Result<(), MediaError> {
    let file = tokio::fs::File::open(&source.path)
        .await
        .map_err(|e| unavailable(&source.path, e))?;
    tokio::time::sleep(source.duration).await;
    drop(file);
    Ok(())
}

fn unavailable(path: &Path, source: io::Error) -> MediaError {
    MediaError::Unavailable {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(name: &str) -> MediaSource {
        MediaSource::new(name, Duration::from_secs(1))
    }

    #[test]
    fn test_empty_playlist_rejected() {
        assert_eq!(Playlist::new(vec![]), Err(PlaylistError::Empty));
    }

    #[test]
    fn test_advance_wraps() {
        let clips = vec![clip("a.mp4"), clip("b.mp4"), clip("c.mp4")];
        let mut playlist = Playlist::new(clips).unwrap();
        assert_eq!(playlist.index(), 0);
        assert_eq!(playlist.advance(), 1);
        assert_eq!(playlist.advance(), 2);
        assert_eq!(playlist.advance(), 0);
        assert_eq!(playlist.current().label(), "a.mp4");
    }

    #[test]
    fn test_single_entry_loops_on_itself() {
        let mut playlist = Playlist::new(vec![clip("only.mp4")]).unwrap();
        assert_eq!(playlist.advance(), 0);
        assert_eq!(playlist.advance(), 0);
    }

    #[test]
    fn test_stale_index() {
        let mut backdrop = Backdrop::new(Playlist::new(vec![clip("a"), clip("b")]).unwrap());
        assert!(backdrop.is_current(0));
        backdrop.playlist.advance();
        assert!(!backdrop.is_current(0));
        assert!(backdrop.is_current(1));
    }

    #[tokio::test]
    async fn test_prepare_missing_file() {
        let source = clip("/definitely/not/here.mp4");
        let err = prepare(&source).await.unwrap_err();
        assert!(matches!(err, MediaError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_prepare_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = MediaSource::new(dir.path(), Duration::from_secs(1));
        let err = prepare(&source).await.unwrap_err();
        assert!(matches!(err, MediaError::NotAFile(_)));
    }

    #[tokio::test]
    async fn test_prepare_and_play_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let source = MediaSource::new(file.path(), Duration::from_millis(10));
        prepare(&source).await.unwrap();
        play(&source).await.unwrap();
    }

    #[tokio::test]
    async fn test_zero_length_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let source = MediaSource::new(file.path(), Duration::ZERO);
        let err = prepare(&source).await.unwrap_err();
        assert!(matches!(err, MediaError::ZeroLength(_)));
    }
}

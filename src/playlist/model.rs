use super::source::SourceHandle;

/// Whether a track could be opened by the playback handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TrackStatus {
    #[default]
    Ready,
    /// The handle reported an open or decode failure for this track.
    Failed(String),
}

/// One playable item. Display metadata comes from the file name only.
#[derive(Debug, Clone)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub source: SourceHandle,
    pub status: TrackStatus,
}

impl Track {
    /// Build a track for `source`: the title is the file name (extension
    /// included) and the artist is the given placeholder.
    pub fn from_source(source: SourceHandle, artist: &str) -> Self {
        let title = source
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.path().display().to_string());

        Self {
            title,
            artist: artist.to_string(),
            source,
            status: TrackStatus::Ready,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, TrackStatus::Failed(_))
    }
}

//! Audio-related small types and handles.
//!
//! Commands flow from `RodioHandle` to the audio thread, events flow back,
//! and `MediaInfo` is the state both sides share.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

use crate::playlist::SourceId;

#[derive(Debug)]
pub(crate) enum MediaCmd {
    /// Replace the current source (or unload with `None`) and prepare it paused.
    Load(Option<(SourceId, PathBuf)>),
    /// Start or resume playback; restarts from the top after the end.
    Play,
    /// Pause playback, keeping the position.
    Pause,
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Notifications from the playback handle, tagged with the source they concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// The position advanced while playing.
    TimeUpdate(SourceId),
    /// The source was opened and its length (if any) is known.
    MetadataLoaded(SourceId),
    /// Playback reached the end of the source.
    Ended(SourceId),
    /// The source could not be opened or decoded.
    Error(SourceId, String),
}

impl MediaEvent {
    pub fn source(&self) -> SourceId {
        match self {
            Self::TimeUpdate(id) | Self::MetadataLoaded(id) | Self::Ended(id) => *id,
            Self::Error(id, _) => *id,
        }
    }
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("no audio output device: {0}")]
    NoOutput(String),
    #[error("audio thread is gone")]
    Disconnected,
}

/// Playback state published by the audio thread.
#[derive(Debug, Clone, Default)]
pub(crate) struct MediaInfo {
    /// Position within the loaded source.
    pub position: Duration,
    /// Total length, once known.
    pub duration: Option<Duration>,
}

pub(crate) type InfoHandle = Arc<Mutex<MediaInfo>>;

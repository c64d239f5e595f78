//! Application model types: `App`, `PlaybackState` and the playback `Phase`.
//!
//! `App` is the transport controller. Every mutation of the playlist or the
//! current index goes through it and ends in `sync_source`, which rebinds the
//! playback handle exactly when the current track changes.

use std::path::PathBuf;

use log::{debug, info, warn};

use crate::audio::{MediaEvent, MediaHandle};
use crate::playlist::{Playlist, SourceId, SourceRegistry, Track, TrackStatus};

use super::time::progress_percent;

/// Where the per-track state machine currently is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No track bound to the handle.
    Idle,
    Paused,
    Playing,
}

/// What to do when the current track plays to its end.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OnTrackEnd {
    /// Stay on the track, paused.
    #[default]
    Stop,
    /// Wrap to the next track and keep playing.
    Advance,
}

/// Playback state mirrored from the handle. Times are in seconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current_time: f64,
    pub duration: f64,
    /// `current_time / duration` as a percentage in `[0, 100]`.
    pub progress: f64,
}

impl PlaybackState {
    fn rewind(&mut self) {
        self.current_time = 0.0;
        self.progress = 0.0;
    }
}

/// The session: playlist, playback state and the handle they drive.
pub struct App<H: MediaHandle> {
    pub playlist: Playlist,
    pub playback: PlaybackState,
    /// Cursor in the track list.
    pub selected: usize,
    /// Text of the add prompt while it is open.
    pub prompt: Option<String>,
    pub default_artist: String,
    pub on_track_end: OnTrackEnd,

    registry: SourceRegistry,
    handle: H,
    bound: Option<SourceId>,
}

impl<H: MediaHandle> App<H> {
    pub fn new(handle: H) -> Self {
        Self {
            playlist: Playlist::new(),
            playback: PlaybackState::default(),
            selected: 0,
            prompt: None,
            default_artist: "Unknown".to_string(),
            on_track_end: OnTrackEnd::default(),

            registry: SourceRegistry::new(),
            handle,
            bound: None,
        }
    }

    #[cfg(test)]
    pub fn handle(&self) -> &H {
        &self.handle
    }

    #[cfg(test)]
    pub fn handle_mut(&mut self) -> &mut H {
        &mut self.handle
    }

    #[cfg(test)]
    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub fn phase(&self) -> Phase {
        match (self.bound, self.playback.is_playing) {
            (None, _) => Phase::Idle,
            (Some(_), false) => Phase::Paused,
            (Some(_), true) => Phase::Playing,
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.current_track()
    }

    pub fn has_tracks(&self) -> bool {
        !self.playlist.is_empty()
    }

    /// Append one track per file. The first upload into an empty playlist
    /// binds the first new track.
    pub fn add_tracks(&mut self, files: &[PathBuf]) -> usize {
        if files.is_empty() {
            return 0;
        }
        let added = self
            .playlist
            .add_tracks(&self.registry, files, &self.default_artist);
        info!("added {added} tracks ({} total)", self.playlist.len());
        self.sync_source();
        added
    }

    pub fn next(&mut self) {
        if self.playlist.next() {
            self.sync_source();
        }
    }

    pub fn prev(&mut self) {
        if self.playlist.prev() {
            self.sync_source();
        }
    }

    /// Make `index` the current track. Out-of-range indices are ignored.
    pub fn select_track(&mut self, index: usize) -> bool {
        if !self.playlist.select(index) {
            return false;
        }
        self.sync_source();
        true
    }

    /// Remove the track at `index`; its source is released immediately.
    pub fn remove_track(&mut self, index: usize) -> bool {
        let Some(track) = self.playlist.remove(index) else {
            return false;
        };
        info!("removed {} ({} left)", track.title, self.playlist.len());
        drop(track);

        self.clamp_selected();
        self.sync_source();
        true
    }

    /// Bind the handle to the current track if it is not bound already.
    ///
    /// A change of source resets time and progress, and playback resumes on
    /// the new source only if it was playing before.
    pub fn sync_source(&mut self) {
        let target = self.playlist.current_track().map(|t| t.source.clone());
        let target_id = target.as_ref().map(|s| s.id());
        if target_id == self.bound {
            return;
        }

        self.handle.set_source(target.as_ref());
        if let Err(e) = self.handle.load() {
            warn!("failed to load source: {e}");
        }
        self.bound = target_id;
        self.playback.rewind();
        self.playback.duration = 0.0;

        match target_id {
            None => {
                debug!("playback handle unbound");
                self.playback.is_playing = false;
            }
            Some(id) => {
                debug!("bound {id} at index {}", self.playlist.current_index());
                if self.playback.is_playing {
                    self.start();
                }
            }
        }
    }

    pub fn toggle_play_pause(&mut self) {
        if self.bound.is_none() {
            return;
        }
        if self.playback.is_playing {
            if let Err(e) = self.handle.pause() {
                warn!("pause failed: {e}");
            }
            self.playback.is_playing = false;
        } else {
            self.start();
        }
    }

    fn start(&mut self) {
        match self.handle.play() {
            Ok(()) => self.playback.is_playing = true,
            Err(e) => {
                warn!("play failed: {e}");
                self.playback.is_playing = false;
            }
        }
    }

    /// Dispatch an event from the handle. Events about a source that is no
    /// longer bound are dropped.
    pub fn handle_event(&mut self, event: MediaEvent) {
        if Some(event.source()) != self.bound {
            debug!("ignoring stale {event:?}");
            return;
        }
        match event {
            MediaEvent::TimeUpdate(_) => self.on_time_update(),
            MediaEvent::MetadataLoaded(_) => self.on_metadata_loaded(),
            MediaEvent::Ended(_) => self.on_ended(),
            MediaEvent::Error(_, reason) => self.on_error(reason),
        }
    }

    pub fn on_time_update(&mut self) {
        if self.bound.is_none() {
            return;
        }
        self.playback.current_time = self.handle.current_time();
        let duration = self.handle.duration().unwrap_or(self.playback.duration);
        self.playback.progress = progress_percent(self.playback.current_time, duration);
    }

    pub fn on_metadata_loaded(&mut self) {
        if self.bound.is_none() {
            return;
        }
        self.playback.duration = self
            .handle
            .duration()
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(0.0);
        let index = self.playlist.current_index();
        self.playlist.set_status(index, TrackStatus::Ready);
    }

    pub fn on_ended(&mut self) {
        self.playback.is_playing = false;
        self.playback.current_time = self.playback.duration;
        self.playback.progress =
            progress_percent(self.playback.current_time, self.playback.duration);

        if self.on_track_end == OnTrackEnd::Advance {
            self.playback.is_playing = true;
            let before = self.bound;
            self.next();
            if self.bound == before {
                // Single track: nothing to rebind, play it again from the top.
                self.playback.rewind();
                self.start();
            }
        }
    }

    /// The bound source failed to open or decode: mark it and stop.
    pub fn on_error(&mut self, reason: String) {
        let index = self.playlist.current_index();
        if let Some(track) = self.playlist.get(index) {
            warn!("cannot play {}: {reason}", track.title);
        }
        self.playlist.set_status(index, TrackStatus::Failed(reason));
        self.playback.is_playing = false;
    }

    pub fn cursor_down(&mut self) {
        if self.has_tracks() {
            self.selected = (self.selected + 1) % self.playlist.len();
        }
    }

    pub fn cursor_up(&mut self) {
        if self.has_tracks() {
            let len = self.playlist.len();
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn cursor_top(&mut self) {
        self.selected = 0;
    }

    pub fn cursor_bottom(&mut self) {
        self.selected = self.playlist.len().saturating_sub(1);
    }

    /// Select the track under the cursor and make sure it is playing.
    pub fn play_selected(&mut self) {
        if self.select_track(self.selected) && !self.playback.is_playing {
            self.toggle_play_pause();
        }
    }

    pub fn remove_selected(&mut self) -> bool {
        self.remove_track(self.selected)
    }

    fn clamp_selected(&mut self) {
        self.selected = self.selected.min(self.playlist.len().saturating_sub(1));
    }

    pub fn open_prompt(&mut self) {
        self.prompt = Some(String::new());
    }

    pub fn push_prompt_char(&mut self, c: char) {
        if let Some(p) = self.prompt.as_mut() {
            p.push(c);
        }
    }

    pub fn pop_prompt_char(&mut self) {
        if let Some(p) = self.prompt.as_mut() {
            p.pop();
        }
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    /// Close the prompt and return what was typed, if anything.
    pub fn take_prompt(&mut self) -> Option<String> {
        self.prompt
            .take()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
    }

    /// End the session: drop every track, release their sources and hand the
    /// playback handle back to the caller. The handle forgets its source but
    /// keeps whatever is loaded, so the caller can still fade it out.
    pub fn teardown(mut self) -> H {
        let removed = self.playlist.clear();
        self.handle.set_source(None);
        self.bound = None;
        self.playback = PlaybackState::default();
        info!(
            "released {removed} tracks, {} sources still live",
            self.registry.live()
        );
        self.handle
    }
}

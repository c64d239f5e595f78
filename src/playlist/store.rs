use std::path::PathBuf;

use super::model::{Track, TrackStatus};
use super::source::SourceRegistry;

/// Ordered tracks plus the index of the current one.
///
/// `current` stays inside `0..max(1, len)`: it is `0` for an empty playlist
/// and wraps on `next`/`prev`.
#[derive(Debug, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    current: usize,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current)
    }

    /// Append one track per file, in input order. Every file gets a freshly
    /// minted source; duplicates are kept.
    pub fn add_tracks(
        &mut self,
        registry: &SourceRegistry,
        files: &[PathBuf],
        artist: &str,
    ) -> usize {
        self.tracks.extend(
            files
                .iter()
                .map(|path| Track::from_source(registry.mint(path), artist)),
        );
        files.len()
    }

    /// Advance with wraparound. Returns `false` (and does nothing) when empty.
    pub fn next(&mut self) -> bool {
        if self.tracks.is_empty() {
            return false;
        }
        self.current = (self.current + 1) % self.tracks.len();
        true
    }

    /// Step back with wraparound. Returns `false` (and does nothing) when empty.
    pub fn prev(&mut self) -> bool {
        if self.tracks.is_empty() {
            return false;
        }
        let len = self.tracks.len();
        self.current = (self.current + len - 1) % len;
        true
    }

    /// Make `index` current. Out-of-range indices are rejected.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.tracks.len() {
            return false;
        }
        self.current = index;
        true
    }

    /// Remove the track at `index`, releasing its source once the returned
    /// value is dropped.
    ///
    /// Removing a track before the current one shifts `current` down so the
    /// same track stays current. Removing the current track leaves the index
    /// in place (clamped), so the following track becomes current.
    pub fn remove(&mut self, index: usize) -> Option<Track> {
        if index >= self.tracks.len() {
            return None;
        }

        let track = self.tracks.remove(index);
        if index < self.current {
            self.current -= 1;
        } else if self.current >= self.tracks.len() {
            self.current = self.tracks.len().saturating_sub(1);
        }
        Some(track)
    }

    /// Drop every track and reset the index. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let n = self.tracks.len();
        self.tracks.clear();
        self.current = 0;
        n
    }

    pub fn set_status(&mut self, index: usize, status: TrackStatus) {
        if let Some(track) = self.tracks.get_mut(index) {
            track.status = status;
        }
    }
}

use std::path::PathBuf;

use crate::app::{App, OnTrackEnd};
use crate::audio::MediaHandle;
use crate::config;
use crate::playlist::collect_files;

/// Copy playback-related settings into `app` and upload the paths given on
/// the command line. Returns how many tracks were added.
pub fn apply_defaults<H: MediaHandle>(
    app: &mut App<H>,
    settings: &config::Settings,
    paths: &[PathBuf],
) -> usize {
    app.default_artist = settings.upload.default_artist.clone();
    app.on_track_end = match settings.playback.on_track_end {
        config::TrackEndSetting::Stop => OnTrackEnd::Stop,
        config::TrackEndSetting::Advance => OnTrackEnd::Advance,
    };

    let files = collect_files(paths, &settings.upload);
    app.add_tracks(&files)
}

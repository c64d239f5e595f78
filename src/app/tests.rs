use super::*;
use crate::audio::MediaEvent;
use crate::audio::fake::{Call, FakeHandle};
use crate::playlist::TrackStatus;
use std::path::PathBuf;

fn files(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|n| PathBuf::from(format!("/tmp/music/{n}"))).collect()
}

fn app_with(names: &[&str]) -> App<FakeHandle> {
    let mut app = App::new(FakeHandle::default());
    app.add_tracks(&files(names));
    app
}

fn current_id(app: &App<FakeHandle>) -> crate::playlist::SourceId {
    app.current_track().unwrap().source.id()
}

#[test]
fn starts_idle_and_ignores_transport_without_tracks() {
    let mut app = App::new(FakeHandle::default());
    assert_eq!(app.phase(), Phase::Idle);

    app.toggle_play_pause();
    app.next();
    app.prev();

    assert_eq!(app.phase(), Phase::Idle);
    assert_eq!(app.playlist.current_index(), 0);
    assert!(app.handle().calls.is_empty());
}

#[test]
fn first_upload_binds_the_first_track_paused() {
    let app = app_with(&["a.mp3", "b.wav"]);
    assert_eq!(app.phase(), Phase::Paused);
    assert_eq!(
        app.handle().calls,
        vec![Call::SetSource(Some(current_id(&app))), Call::Load]
    );
}

#[test]
fn later_uploads_append_without_rebinding() {
    let mut app = app_with(&["a.mp3", "b.wav"]);
    app.handle_mut().take_calls();

    app.add_tracks(&files(&["c.flac"]));

    let titles: Vec<&str> = app.playlist.tracks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["a.mp3", "b.wav", "c.flac"]);
    assert!(app.handle().calls.is_empty());
    assert!(app.playlist.tracks().iter().all(|t| t.artist == "Unknown"));
}

#[test]
fn toggle_play_pause_drives_the_handle() {
    let mut app = app_with(&["a.mp3"]);
    app.handle_mut().take_calls();

    app.toggle_play_pause();
    assert_eq!(app.phase(), Phase::Playing);
    app.toggle_play_pause();
    assert_eq!(app.phase(), Phase::Paused);

    assert_eq!(app.handle().calls, vec![Call::Play, Call::Pause]);
}

#[test]
fn switching_tracks_while_playing_rewinds_and_resumes() {
    let mut app = app_with(&["x.mp3", "y.mp3", "z.mp3"]);
    app.toggle_play_pause();
    app.handle_mut().position = 42.0;
    app.handle_mut().duration = Some(100.0);
    app.on_time_update();
    assert_eq!(app.playback.current_time, 42.0);
    app.handle_mut().take_calls();

    app.next();

    assert_eq!(app.playlist.current_index(), 1);
    assert_eq!(app.playback.current_time, 0.0);
    assert_eq!(app.playback.progress, 0.0);
    assert_eq!(app.phase(), Phase::Playing);
    assert_eq!(
        app.handle().calls,
        vec![
            Call::SetSource(Some(current_id(&app))),
            Call::Load,
            Call::Play
        ]
    );
}

#[test]
fn switching_tracks_while_paused_does_not_start_playback() {
    let mut app = app_with(&["x.mp3", "y.mp3"]);
    app.handle_mut().take_calls();

    app.prev();

    assert_eq!(app.playlist.current_index(), 1);
    assert_eq!(app.phase(), Phase::Paused);
    assert_eq!(app.handle().count(&Call::Play), 0);
    assert_eq!(app.handle().count(&Call::Load), 1);
}

#[test]
fn rebinding_fires_once_per_change() {
    let mut app = app_with(&["x.mp3", "y.mp3", "z.mp3"]);
    app.handle_mut().take_calls();

    app.select_track(2);
    app.sync_source();
    app.sync_source();
    app.select_track(2);

    assert_eq!(app.handle().count(&Call::Load), 1);
}

#[test]
fn wraparound_scenario_through_the_controller() {
    let mut app = app_with(&["x.mp3", "y.mp3", "z.mp3"]);
    let mut seen = Vec::new();
    for _ in 0..3 {
        app.next();
        seen.push(app.playlist.current_index());
    }
    assert_eq!(seen, vec![1, 2, 0]);
}

#[test]
fn select_track_rejects_out_of_range() {
    let mut app = app_with(&["x.mp3"]);
    app.handle_mut().take_calls();
    assert!(!app.select_track(3));
    assert!(app.handle().calls.is_empty());
}

#[test]
fn time_update_tracks_position_and_guards_zero_duration() {
    let mut app = app_with(&["x.mp3"]);
    app.handle_mut().position = 30.0;
    app.handle_mut().duration = None;
    app.on_time_update();
    assert_eq!(app.playback.current_time, 30.0);
    assert_eq!(app.playback.progress, 0.0);

    app.handle_mut().duration = Some(120.0);
    app.on_time_update();
    assert_eq!(app.playback.progress, 25.0);
}

#[test]
fn metadata_loaded_captures_duration() {
    let mut app = app_with(&["x.mp3"]);
    app.handle_mut().duration = Some(215.5);
    app.handle_event(MediaEvent::MetadataLoaded(current_id(&app)));
    assert_eq!(app.playback.duration, 215.5);

    app.handle_mut().duration = Some(f64::INFINITY);
    app.on_metadata_loaded();
    assert_eq!(app.playback.duration, 0.0);
}

#[test]
fn stale_events_are_ignored() {
    let mut app = app_with(&["x.mp3", "y.mp3"]);
    let old = current_id(&app);
    app.toggle_play_pause();
    app.next();

    app.handle_event(MediaEvent::Ended(old));
    assert_eq!(app.phase(), Phase::Playing);
    assert_eq!(app.playlist.current_index(), 1);
}

#[test]
fn end_of_track_stops_by_default() {
    let mut app = app_with(&["x.mp3", "y.mp3"]);
    app.toggle_play_pause();
    app.handle_mut().duration = Some(10.0);
    app.on_metadata_loaded();

    app.handle_event(MediaEvent::Ended(current_id(&app)));

    assert_eq!(app.phase(), Phase::Paused);
    assert_eq!(app.playlist.current_index(), 0);
    assert_eq!(app.playback.progress, 100.0);
}

#[test]
fn end_of_track_can_advance_and_keep_playing() {
    let mut app = app_with(&["x.mp3", "y.mp3"]);
    app.on_track_end = OnTrackEnd::Advance;
    app.toggle_play_pause();
    app.handle_mut().take_calls();

    app.handle_event(MediaEvent::Ended(current_id(&app)));

    assert_eq!(app.playlist.current_index(), 1);
    assert_eq!(app.phase(), Phase::Playing);
    assert_eq!(app.handle().count(&Call::Play), 1);
}

#[test]
fn advancing_a_single_track_replays_it() {
    let mut app = app_with(&["only.mp3"]);
    app.on_track_end = OnTrackEnd::Advance;
    app.toggle_play_pause();
    app.handle_mut().take_calls();

    app.on_ended();

    assert_eq!(app.phase(), Phase::Playing);
    assert_eq!(app.playback.current_time, 0.0);
    assert_eq!(app.handle().calls, vec![Call::Play]);
}

#[test]
fn errors_mark_the_track_and_stop_playback() {
    let mut app = app_with(&["broken.mp3", "fine.mp3"]);
    app.toggle_play_pause();

    app.handle_event(MediaEvent::Error(current_id(&app), "unsupported format".into()));

    assert_eq!(app.phase(), Phase::Paused);
    assert_eq!(
        app.playlist.get(0).unwrap().status,
        TrackStatus::Failed("unsupported format".into())
    );

    // A later successful load clears the mark.
    app.handle_event(MediaEvent::MetadataLoaded(current_id(&app)));
    assert!(!app.playlist.get(0).unwrap().is_failed());
}

#[test]
fn play_after_a_failed_load_falls_back_to_paused_on_the_next_error() {
    let mut app = app_with(&["x.mp3"]);
    let id = current_id(&app);
    app.handle_event(MediaEvent::Error(id, "no audio output device".into()));
    assert_eq!(app.phase(), Phase::Paused);

    app.toggle_play_pause();
    assert_eq!(app.phase(), Phase::Playing);
    app.handle_event(MediaEvent::Error(id, "no audio output device".into()));
    assert_eq!(app.phase(), Phase::Paused);
    assert!(app.playlist.get(0).unwrap().is_failed());
}

#[test]
fn a_dead_handle_never_reports_playing() {
    let mut app = app_with(&["x.mp3"]);
    app.handle_mut().disconnected = true;
    app.toggle_play_pause();
    assert_eq!(app.phase(), Phase::Paused);
}

#[test]
fn removing_the_current_track_rebinds_and_releases() {
    let mut app = app_with(&["x.mp3", "y.mp3", "z.mp3"]);
    app.toggle_play_pause();
    app.handle_mut().take_calls();
    assert_eq!(app.registry().live(), 3);

    assert!(app.remove_track(0));

    assert_eq!(app.registry().live(), 2);
    assert_eq!(app.current_track().unwrap().title, "y.mp3");
    assert_eq!(app.phase(), Phase::Playing);
    assert_eq!(
        app.handle().calls,
        vec![
            Call::SetSource(Some(current_id(&app))),
            Call::Load,
            Call::Play
        ]
    );
}

#[test]
fn removing_another_track_keeps_the_binding() {
    let mut app = app_with(&["x.mp3", "y.mp3", "z.mp3"]);
    app.select_track(2);
    app.handle_mut().take_calls();

    app.selected = 0;
    assert!(app.remove_selected());

    assert_eq!(app.playlist.current_index(), 1);
    assert_eq!(app.current_track().unwrap().title, "z.mp3");
    assert!(app.handle().calls.is_empty());
}

#[test]
fn removing_the_last_track_goes_idle() {
    let mut app = app_with(&["x.mp3"]);
    app.toggle_play_pause();

    assert!(app.remove_track(0));

    assert_eq!(app.phase(), Phase::Idle);
    assert_eq!(app.handle().source, None);
    assert_eq!(app.registry().live(), 0);
    assert!(!app.remove_track(0));
}

#[test]
fn play_selected_selects_and_starts() {
    let mut app = app_with(&["x.mp3", "y.mp3", "z.mp3"]);
    app.cursor_down();
    app.cursor_down();
    app.play_selected();
    assert_eq!(app.playlist.current_index(), 2);
    assert_eq!(app.phase(), Phase::Playing);

    // Already playing: selecting again does not pause.
    app.play_selected();
    assert_eq!(app.phase(), Phase::Playing);
}

#[test]
fn cursor_wraps_and_jumps() {
    let mut app = app_with(&["x.mp3", "y.mp3", "z.mp3"]);
    app.cursor_up();
    assert_eq!(app.selected, 2);
    app.cursor_down();
    assert_eq!(app.selected, 0);
    app.cursor_bottom();
    assert_eq!(app.selected, 2);
    app.cursor_top();
    assert_eq!(app.selected, 0);
}

#[test]
fn prompt_collects_and_trims_input() {
    let mut app = App::new(FakeHandle::default());
    app.open_prompt();
    for c in " ~/a.mp3 ".chars() {
        app.push_prompt_char(c);
    }
    app.pop_prompt_char();
    assert_eq!(app.take_prompt().as_deref(), Some("~/a.mp3"));
    assert!(app.prompt.is_none());

    app.open_prompt();
    app.push_prompt_char(' ');
    assert_eq!(app.take_prompt(), None);

    app.open_prompt();
    app.cancel_prompt();
    assert!(app.prompt.is_none());
}

#[test]
fn teardown_releases_every_source() {
    let mut app = app_with(&["x.mp3", "y.mp3"]);
    let registry = app.registry().clone();
    assert_eq!(registry.live(), 2);

    let handle = app.teardown();
    assert_eq!(registry.live(), 0);
    assert_eq!(handle.source, None);
    assert_eq!(handle.calls.last(), Some(&Call::SetSource(None)));
}

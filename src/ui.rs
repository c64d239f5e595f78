//! UI rendering helpers for the terminal user interface.
//!
//! Everything here is derived from `App` on each frame; the UI keeps no
//! state of its own.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Phase, PlaybackState, format_time};
use crate::audio::MediaHandle;
use crate::config::UiSettings;
use crate::playlist::{Track, TrackStatus};

/// Render the controls help text. The play/pause label follows the state.
fn controls_text(phase: Phase) -> String {
    let toggle = if phase == Phase::Playing {
        "pause"
    } else {
        "play"
    };
    [
        ("h/←".to_string(), "prev".to_string()),
        ("space/p".to_string(), toggle.to_string()),
        ("l/→".to_string(), "next".to_string()),
        ("j/k".to_string(), "up/down".to_string()),
        ("enter".to_string(), "play selected".to_string()),
        ("a".to_string(), "add files".to_string()),
        ("d".to_string(), "remove".to_string()),
        ("q".to_string(), "quit".to_string()),
    ]
    .iter()
    .map(|(k, v)| format!("[{}] {}", k, v))
    .collect::<Vec<String>>()
    .join(" | ")
}

/// `elapsed / total` for the progress bar label.
fn time_label(playback: &PlaybackState) -> String {
    format!(
        "{} / {}",
        format_time(playback.current_time),
        format_time(playback.duration)
    )
}

/// Title, artist and status lines for the now-playing box.
fn now_playing_lines(track: &Track, phase: Phase) -> Vec<String> {
    let state = match (&track.status, phase) {
        (TrackStatus::Failed(reason), _) => format!("Cannot play: {reason}"),
        (_, Phase::Playing) => "Playing".to_string(),
        (_, Phase::Paused) => "Paused".to_string(),
        (_, Phase::Idle) => "Stopped".to_string(),
    };
    vec![track.title.clone(), track.artist.clone(), state]
}

/// One row of the track list.
fn track_row(position: usize, track: &Track, is_current: bool) -> String {
    let marker = if is_current { "♪" } else { " " };
    let mut row = format!("{marker} {:>3}. {} - {}", position + 1, track.artist, track.title);
    if track.is_failed() {
        row.push_str("  [failed]");
    }
    row
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame` from `app` state.
pub fn draw<H: MediaHandle>(frame: &mut Frame, app: &App<H>, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(format!("{} tracks", app.playlist.len()))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(ui_settings.header_text.as_str())
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let phase = app.phase();
    match app.current_track() {
        Some(track) => {
            draw_now_playing(frame, chunks[1], track, phase);
            draw_progress(frame, chunks[2], &app.playback);
        }
        None => {
            let empty = Paragraph::new(ui_settings.empty_message.as_str())
                .alignment(Alignment::Center)
                .italic()
                .block(bordered(" now playing "));
            frame.render_widget(empty, chunks[1]);
        }
    }

    if ui_settings.show_track_list {
        draw_track_list(frame, chunks[3], app);
    }

    // Upload affordance: the prompt while open, a hint otherwise.
    let upload = match app.prompt.as_deref() {
        Some(text) => Paragraph::new(format!("{text}▏"))
            .block(bordered(" add file or directory (enter to add, esc to cancel) ")),
        None => Paragraph::new("Press [a] to add audio files or a directory.")
            .dim()
            .block(bordered(" upload ")),
    };
    frame.render_widget(upload, chunks[4]);

    let footer = Paragraph::new(controls_text(phase))
        .block(bordered(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);
}

fn draw_now_playing(frame: &mut Frame, area: Rect, track: &Track, phase: Phase) {
    let mut lines = now_playing_lines(track, phase).into_iter();
    let title = lines.next().unwrap_or_default();
    let rest: Vec<Line> = lines.map(Line::from).collect();

    let mut text = vec![Line::from(title).bold()];
    text.extend(rest);
    let par = Paragraph::new(text)
        .block(bordered(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(par, area);
}

fn draw_progress(frame: &mut Frame, area: Rect, playback: &PlaybackState) {
    let percent = if playback.progress.is_finite() {
        playback.progress.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .ratio(percent / 100.0)
        .label(time_label(playback));
    frame.render_widget(gauge, area);
}

fn draw_track_list<H: MediaHandle>(frame: &mut Frame, area: Rect, app: &App<H>) {
    let current = app.playlist.current_index();

    // Only build items for the visible window, keeping the cursor centered.
    let total = app.playlist.len();
    let height = area.height.saturating_sub(2) as usize;
    let (start, end) = if total <= height || height == 0 {
        (0, total)
    } else {
        let half = height / 2;
        let start = app.selected.saturating_sub(half).min(total - height);
        (start, start + height)
    };

    let items: Vec<ListItem> = app.playlist.tracks()[start..end]
        .iter()
        .enumerate()
        .map(|(offset, track)| {
            let i = start + offset;
            let item = ListItem::new(track_row(i, track, i == current));
            if i == current {
                item.bold()
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" playlist "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(app.selected.saturating_sub(start)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

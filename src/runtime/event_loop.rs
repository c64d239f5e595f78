use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{MediaEvent, MediaHandle};
use crate::config;
use crate::playlist::{collect_files, expand_user};
use crate::ui;

/// Main terminal event loop: drains playback events, draws the UI and
/// handles input. Returns `Ok(())` when the user quits.
pub fn run<H: MediaHandle>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<H>,
    events: &Receiver<MediaEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(ev) = events.try_recv() {
            app.handle_event(ev);
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns `true` when the user asked to quit.
fn handle_key_event<H: MediaHandle>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<H>,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if app.prompt.is_some() {
        match key.code {
            KeyCode::Esc => app.cancel_prompt(),
            KeyCode::Backspace => app.pop_prompt_char(),
            KeyCode::Enter => {
                if let Some(input) = app.take_prompt() {
                    let files = collect_files(&[expand_user(&input)], &settings.upload);
                    if files.is_empty() {
                        info!("nothing to add from {input}");
                    }
                    app.add_tracks(&files);
                }
            }
            KeyCode::Char(c) if !c.is_control() => app.push_prompt_char(c),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char(' ') | KeyCode::Char('p') => app.toggle_play_pause(),
        KeyCode::Char('l') | KeyCode::Right => app.next(),
        KeyCode::Char('h') | KeyCode::Left => app.prev(),
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Char('g') | KeyCode::Home => app.cursor_top(),
        KeyCode::Char('G') | KeyCode::End => app.cursor_bottom(),
        KeyCode::Enter => app.play_selected(),
        KeyCode::Char('a') => app.open_prompt(),
        KeyCode::Char('d') | KeyCode::Delete => {
            app.remove_selected();
        }
        _ => {}
    }

    false
}

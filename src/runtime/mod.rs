use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::RodioHandle;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, fallback) = settings::load_settings();
    logging::init(&settings.log);
    if let Some(msg) = fallback {
        warn!("{msg}");
        eprintln!("spindle: {msg}");
    }

    let paths: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();

    let (handle, events) = RodioHandle::spawn(&settings.audio);
    let mut app = App::new(handle);
    let added = startup::apply_defaults(&mut app, &settings, &paths);
    info!("starting with {added} tracks");

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let mut handle = app.teardown();
    handle.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));

    run_result
}

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use log::{debug, warn};
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::playlist::SourceId;

use super::sink::{fade_out_sink, open_sink, probe_duration};
use super::types::{InfoHandle, MediaCmd, MediaError, MediaEvent, MediaInfo};

fn update_info(info: &InfoHandle, f: impl FnOnce(&mut MediaInfo)) {
    if let Ok(mut i) = info.lock() {
        f(&mut i);
    }
}

/// What the audio thread has loaded right now.
struct Loaded {
    id: SourceId,
    path: PathBuf,
    sink: Sink,
    ended: bool,
}

struct AudioThread {
    stream: OutputStream,
    events: Sender<MediaEvent>,
    info: InfoHandle,
    current: Option<Loaded>,
}

impl AudioThread {
    fn emit(&self, event: MediaEvent) {
        // The receiver only goes away during shutdown.
        let _ = self.events.send(event);
    }

    fn load(&mut self, source: Option<(SourceId, PathBuf)>) {
        if let Some(old) = self.current.take() {
            old.sink.stop();
        }
        update_info(&self.info, |i| *i = MediaInfo::default());

        let Some((id, path)) = source else {
            debug!("audio thread unloaded");
            return;
        };

        match open_sink(&self.stream, &path) {
            Ok((sink, total)) => {
                let duration = total.or_else(|| probe_duration(&path));
                update_info(&self.info, |i| i.duration = duration);
                debug!("loaded {id} from {} ({duration:?})", path.display());
                self.current = Some(Loaded {
                    id,
                    path,
                    sink,
                    ended: false,
                });
                self.emit(MediaEvent::MetadataLoaded(id));
            }
            Err(e) => {
                warn!("{e}");
                self.current = Some(Loaded {
                    id,
                    path,
                    sink: Sink::connect_new(self.stream.mixer()),
                    ended: true,
                });
                self.emit(MediaEvent::Error(id, e.to_string()));
            }
        }
    }

    fn play(&mut self) {
        let Some(loaded) = self.current.as_mut() else {
            return;
        };

        if loaded.ended || loaded.sink.empty() {
            // Playing after the end starts over, like a media element does.
            match open_sink(&self.stream, &loaded.path) {
                Ok((sink, _)) => {
                    loaded.sink.stop();
                    loaded.sink = sink;
                    loaded.ended = false;
                }
                Err(e) => {
                    warn!("{e}");
                    let id = loaded.id;
                    self.emit(MediaEvent::Error(id, e.to_string()));
                    return;
                }
            }
        }

        loaded.sink.play();
    }

    fn pause(&mut self) {
        if let Some(loaded) = self.current.as_ref() {
            loaded.sink.pause();
            let pos = loaded.sink.get_pos();
            update_info(&self.info, |i| i.position = pos);
        }
    }

    /// Periodic bookkeeping: publish the position and detect the end of a source.
    fn tick(&mut self) {
        let Some(loaded) = self.current.as_mut() else {
            return;
        };
        if loaded.ended || loaded.sink.is_paused() {
            return;
        }

        let id = loaded.id;
        if loaded.sink.empty() {
            loaded.ended = true;
            update_info(&self.info, |i| {
                if let Some(d) = i.duration {
                    i.position = d;
                }
            });
            self.emit(MediaEvent::Ended(id));
        } else {
            let pos = loaded.sink.get_pos();
            update_info(&self.info, |i| i.position = pos);
            self.emit(MediaEvent::TimeUpdate(id));
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(loaded) = self.current.take() {
            if !loaded.sink.is_paused() && !loaded.sink.empty() {
                fade_out_sink(&loaded.sink, fade_out_ms);
            }
            loaded.sink.stop();
        }
        update_info(&self.info, |i| *i = MediaInfo::default());
    }
}

/// Command loop for when no output device could be opened. Every load, and
/// every play of a loaded source, is answered with an error.
pub(super) fn serve_without_output(
    rx: &Receiver<MediaCmd>,
    events: &Sender<MediaEvent>,
    reason: &str,
) {
    let mut loaded: Option<SourceId> = None;
    while let Ok(cmd) = rx.recv() {
        let failed = match cmd {
            MediaCmd::Load(source) => {
                loaded = source.map(|(id, _)| id);
                loaded
            }
            MediaCmd::Play => loaded,
            MediaCmd::Pause => None,
            MediaCmd::Quit { .. } => break,
        };
        if let Some(id) = failed {
            let _ = events.send(MediaEvent::Error(id, reason.to_string()));
        }
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<MediaCmd>,
    events: Sender<MediaEvent>,
    info: InfoHandle,
    tick: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                let reason = MediaError::NoOutput(e.to_string()).to_string();
                warn!("{reason}");
                serve_without_output(&rx, &events, &reason);
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped, which would land
        // on top of the TUI.
        stream.log_on_drop(false);

        let mut audio = AudioThread {
            stream,
            events,
            info,
            current: None,
        };

        loop {
            match rx.recv_timeout(tick) {
                Ok(MediaCmd::Load(source)) => audio.load(source),
                Ok(MediaCmd::Play) => audio.play(),
                Ok(MediaCmd::Pause) => audio.pause(),
                Ok(MediaCmd::Quit { fade_out_ms }) => {
                    audio.quit(fade_out_ms);
                    break;
                }
                Err(RecvTimeoutError::Timeout) => audio.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;
use crate::playlist::{SourceHandle, SourceId};

use super::handle::MediaHandle;
use super::thread::spawn_audio_thread;
use super::types::{InfoHandle, MediaCmd, MediaError, MediaEvent, MediaInfo};

/// `MediaHandle` backed by a `rodio` output stream on its own thread.
pub struct RodioHandle {
    tx: Sender<MediaCmd>,
    info: InfoHandle,
    source: Option<(SourceId, PathBuf)>,
    join: Option<JoinHandle<()>>,
}

impl RodioHandle {
    /// Start the audio thread. Events arrive on the returned receiver.
    pub fn spawn(settings: &AudioSettings) -> (Self, Receiver<MediaEvent>) {
        let (tx, rx) = mpsc::channel::<MediaCmd>();
        let (event_tx, event_rx) = mpsc::channel::<MediaEvent>();
        let info: InfoHandle = Arc::new(Mutex::new(MediaInfo::default()));

        let join = spawn_audio_thread(
            rx,
            event_tx,
            info.clone(),
            Duration::from_millis(settings.tick_ms),
        );

        let mut handle = Self::detached(tx, info);
        handle.join = Some(join);
        (handle, event_rx)
    }

    pub(crate) fn detached(tx: Sender<MediaCmd>, info: InfoHandle) -> Self {
        Self {
            tx,
            info,
            source: None,
            join: None,
        }
    }

    fn send(&self, cmd: MediaCmd) -> Result<(), MediaError> {
        self.tx.send(cmd).map_err(|_| MediaError::Disconnected)
    }

    /// Fade out, stop the audio thread and wait for it.
    pub fn quit_softly(&mut self, fade_out: Duration) {
        let _ = self.send(MediaCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl MediaHandle for RodioHandle {
    fn set_source(&mut self, source: Option<&SourceHandle>) {
        self.source = source.map(|s| (s.id(), s.path().to_path_buf()));
    }

    fn load(&mut self) -> Result<(), MediaError> {
        // Reset right away so readers never see the previous source's position.
        if let Ok(mut info) = self.info.lock() {
            *info = MediaInfo::default();
        }
        self.send(MediaCmd::Load(self.source.clone()))
    }

    fn play(&mut self) -> Result<(), MediaError> {
        if self.source.is_none() {
            return Ok(());
        }
        self.send(MediaCmd::Play)
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        if self.source.is_none() {
            return Ok(());
        }
        self.send(MediaCmd::Pause)
    }

    fn current_time(&self) -> f64 {
        self.info
            .lock()
            .map(|i| i.position.as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration(&self) -> Option<f64> {
        self.info
            .lock()
            .ok()
            .and_then(|i| i.duration)
            .map(|d| d.as_secs_f64())
    }
}

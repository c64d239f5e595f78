//! A recording `MediaHandle` for controller and runtime tests.

use crate::playlist::{SourceHandle, SourceId};

use super::handle::MediaHandle;
use super::types::MediaError;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetSource(Option<SourceId>),
    Load,
    Play,
    Pause,
}

#[derive(Debug, Default)]
pub struct FakeHandle {
    pub calls: Vec<Call>,
    pub source: Option<SourceId>,
    pub position: f64,
    pub duration: Option<f64>,
    /// When set, every command fails as if the audio thread had died.
    pub disconnected: bool,
}

impl FakeHandle {
    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    fn command(&mut self, call: Call) -> Result<(), MediaError> {
        if self.disconnected {
            return Err(MediaError::Disconnected);
        }
        self.calls.push(call);
        Ok(())
    }
}

impl MediaHandle for FakeHandle {
    fn set_source(&mut self, source: Option<&SourceHandle>) {
        self.source = source.map(SourceHandle::id);
        self.calls.push(Call::SetSource(self.source));
    }

    fn load(&mut self) -> Result<(), MediaError> {
        self.position = 0.0;
        self.duration = None;
        self.command(Call::Load)
    }

    fn play(&mut self) -> Result<(), MediaError> {
        self.command(Call::Play)
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        self.command(Call::Pause)
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }
}

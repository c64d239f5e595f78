use crate::playlist::SourceHandle;

use super::MediaError;

/// A platform playback primitive the controller drives but does not implement.
///
/// Calls never block on decoding: `load` only schedules it, and the outcome
/// is reported later as `MediaEvent::MetadataLoaded` or `MediaEvent::Error`.
pub trait MediaHandle {
    /// Bind `source` as the next thing to load, or clear the binding.
    fn set_source(&mut self, source: Option<&SourceHandle>);
    /// Drop any decode state and (re)open the bound source, paused at zero.
    fn load(&mut self) -> Result<(), MediaError>;
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self) -> Result<(), MediaError>;
    /// Current position in seconds.
    fn current_time(&self) -> f64;
    /// Total length in seconds, `None` while unknown.
    fn duration(&self) -> Option<f64>;
}

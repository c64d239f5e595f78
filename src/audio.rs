//! The native playback handle.
//!
//! `MediaHandle` is the seam between the transport controller and whatever
//! actually decodes and outputs audio. `RodioHandle` implements it with a
//! dedicated audio thread; playback progress comes back as `MediaEvent`s.

mod handle;
mod player;
mod sink;
mod thread;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use handle::MediaHandle;
pub use player::RodioHandle;
pub use types::{MediaError, MediaEvent};

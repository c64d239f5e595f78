//! Application module: the transport controller and the session state the
//! UI renders.
//!
//! `App` lives in `app::model` and owns the playlist, the playback state and
//! the native playback handle. Time formatting helpers live in `app::time`.

mod model;
mod time;

pub use model::*;
pub use time::{format_time, progress_percent};

#[cfg(test)]
mod tests;

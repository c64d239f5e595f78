//! Playlist store: the uploaded tracks, the source handles backing them and
//! the index of the current track.
//!
//! Tracks are appended in upload order. Each track owns a `SourceHandle`
//! minted by a `SourceRegistry`; dropping the track releases its source.

mod model;
mod scan;
mod source;
mod store;

pub use model::{Track, TrackStatus};
pub use scan::{collect_files, expand_user};
pub use source::{SourceHandle, SourceId, SourceRegistry};
pub use store::Playlist;

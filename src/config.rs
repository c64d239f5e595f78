//! Configuration loader and schema types.
//!
//! This module exposes the settings schema used to drive the player and
//! helpers to load it from the environment and disk.

mod load;
mod schema;

pub use load::default_state_dir;
pub use schema::*;

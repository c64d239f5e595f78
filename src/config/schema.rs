use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/spindle/config.toml` or `~/.config/spindle/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SPINDLE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub playback: PlaybackSettings,
    pub upload: UploadSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
    /// How often the audio thread reports the playback position (milliseconds).
    pub tick_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 500,
            tick_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Title of the top header box.
    pub header_text: String,
    /// Shown in place of the player while the playlist is empty.
    pub empty_message: String,
    /// Whether to render the list of uploaded tracks under the player.
    pub show_track_list: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " Audio Player ".to_string(),
            empty_message: "No audio uploaded yet.".to_string(),
            show_track_list: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// What happens when the current track plays to the end.
    pub on_track_end: TrackEndSetting,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackEndSetting {
    /// Stay on the finished track, paused.
    #[default]
    #[serde(alias = "pause")]
    Stop,
    /// Move to the next track (wrapping) and keep playing.
    #[serde(alias = "next", alias = "auto-advance", alias = "auto_advance")]
    Advance,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Extensions treated as audio when a directory is added
    /// (case-insensitive, without dot). Files named explicitly are always accepted.
    pub extensions: Vec<String>,
    /// Whether to recurse into subdirectories of an added directory.
    pub recursive: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to follow symlinks while expanding directories.
    pub follow_links: bool,
    /// Artist shown for every uploaded track.
    pub default_artist: String,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            extensions: ["mp3", "flac", "wav", "ogg", "m4a", "aac", "opus"]
                .into_iter()
                .map(String::from)
                .collect(),
            recursive: true,
            include_hidden: false,
            follow_links: true,
            default_artist: "Unknown".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Filter directives for `env_logger` (`RUST_LOG` wins when set).
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/spindle/spindle.log`.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

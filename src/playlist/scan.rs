use std::env;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::config::UploadSettings;

fn has_audio_extension(path: &Path, settings: &UploadSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn expand_dir(dir: &Path, settings: &UploadSettings) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);
    // Non-recursive = only the directory itself.
    if !settings.recursive {
        walker = walker.max_depth(1);
    }

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| has_audio_extension(p, settings))
        .collect();

    files.sort_by_key(|p| p.to_string_lossy().to_lowercase());
    files
}

/// Turn user-supplied paths into the list of files to upload, in input order.
///
/// A file path is taken as-is: the extension list is only an advisory filter
/// and applies when a directory is expanded. Directories contribute their
/// audio-like files sorted by path. Paths that do not exist are skipped.
pub fn collect_files(paths: &[PathBuf], settings: &UploadSettings) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let found = expand_dir(path, settings);
            debug!("{} audio files under {}", found.len(), path.display());
            files.extend(found);
        } else {
            warn!("skipping {}: no such file or directory", path.display());
        }
    }
    files
}

/// Expand a leading `~` to `$HOME` in a path typed at the add prompt.
pub fn expand_user(input: &str) -> PathBuf {
    let input = input.trim();
    let home = env::var_os("HOME").map(PathBuf::from);
    match (input, home) {
        ("~", Some(home)) => home,
        (s, Some(home)) if s.starts_with("~/") => home.join(&s[2..]),
        (s, _) => PathBuf::from(s),
    }
}

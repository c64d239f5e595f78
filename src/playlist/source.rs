//! Scoped references to uploaded byte streams.
//!
//! A `SourceHandle` is the terminal counterpart of a browser object URL: an
//! opaque, cloneable reference to a file the user added. The registry records
//! every live handle; the entry is released when the last clone is dropped.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Identity of a minted source. Never reused within a registry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(u64);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source#{}", self.0)
    }
}

#[derive(Debug, Default)]
struct LiveSources {
    next_id: u64,
    entries: HashMap<SourceId, PathBuf>,
}

type SharedLive = Arc<Mutex<LiveSources>>;

fn lock(live: &Mutex<LiveSources>) -> MutexGuard<'_, LiveSources> {
    live.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mints and tracks source handles for one session.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    live: SharedLive,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh handle for `path`. Every call yields a new identity, even
    /// for a path that is already registered.
    pub fn mint(&self, path: &Path) -> SourceHandle {
        let id = {
            let mut live = lock(&self.live);
            let id = SourceId(live.next_id);
            live.next_id += 1;
            live.entries.insert(id, path.to_path_buf());
            id
        };

        SourceHandle {
            inner: Arc::new(SourceInner {
                id,
                path: path.to_path_buf(),
                registry: Arc::downgrade(&self.live),
            }),
        }
    }

    /// Number of sources minted and not yet released.
    pub fn live(&self) -> usize {
        lock(&self.live).entries.len()
    }
}

#[derive(Debug)]
struct SourceInner {
    id: SourceId,
    path: PathBuf,
    registry: Weak<Mutex<LiveSources>>,
}

impl Drop for SourceInner {
    fn drop(&mut self) {
        if let Some(live) = self.registry.upgrade() {
            lock(&live).entries.remove(&self.id);
        }
    }
}

/// Reference to one uploaded file. Clones share the same identity.
#[derive(Debug, Clone)]
pub struct SourceHandle {
    inner: Arc<SourceInner>,
}

impl SourceHandle {
    pub fn id(&self) -> SourceId {
        self.inner.id
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }
}

impl PartialEq for SourceHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for SourceHandle {}

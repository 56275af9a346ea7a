//! Substitution engine
//!
//! A [`Reloader`] owns the current [`Snapshot`] plus the little mutable state
//! resolving needs (the reply ring and the pointer cache). Every method takes
//! `&self`, so one reloader can be shared between hooked threads.

pub mod dialog;
pub mod mask;
pub mod reply;
pub mod snapshot;
pub mod table;
pub mod text;

pub use dialog::{DEFAULT_DENY_LIST, DialogFilter, is_dialog};
pub use mask::{Mask, WILDCARD};
pub use reply::{REPLY_SLOTS, ReplyRing};
pub use snapshot::{EngineOptions, Snapshot, Translation};
pub use table::{StringTable, TableBuilder};
pub use text::{CharRange, ReplaceList, TextRules};

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use crate::config::Settings;
use crate::dump::WorkspaceLayout;
use crate::error::{Error, Result};
use crate::loader::LoadReport;

/// Pointer cache entries kept before the cache starts over
pub const POINTER_CACHE_LIMIT: usize = 4096;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug)]
pub struct Reloader {
    snapshot: RwLock<Arc<Snapshot>>,
    replies: Mutex<ReplyRing>,
    /// input address → output address, emptied on reload or when full
    pointers: Mutex<HashMap<usize, usize>>,
    source: Option<(WorkspaceLayout, Settings)>,
}

impl Reloader {
    /// Wrap an already loaded snapshot. Such a reloader cannot [`reload`](Self::reload).
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
            replies: Mutex::new(ReplyRing::new()),
            pointers: Mutex::new(HashMap::new()),
            source: None,
        }
    }

    /// Bring the workspace's database up to date and load it
    ///
    /// # Errors
    /// Returns an error if migration, compilation or loading fails.
    pub fn initialize(layout: WorkspaceLayout, settings: Settings) -> Result<Self> {
        let (snapshot, _) = crate::pipeline::initialize(&layout, &settings)?;
        let mut reloader = Self::from_snapshot(snapshot);
        reloader.source = Some((layout, settings));
        Ok(reloader)
    }

    /// Re-run the initialization pipeline and swap in the new snapshot.
    ///
    /// The old snapshot stays in place if anything fails.
    ///
    /// # Errors
    /// Returns [`Error::Config`] for a reloader built from a bare snapshot,
    /// and any pipeline error.
    pub fn reload(&self) -> Result<LoadReport> {
        let Some((layout, settings)) = &self.source else {
            return Err(Error::Config("no workspace to reload from".to_string()));
        };
        let (snapshot, report) = crate::pipeline::initialize(layout, settings)?;

        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(snapshot);
        lock(&self.pointers).clear();
        lock(&self.replies).clear();
        tracing::info!("Database Reloaded");
        Ok(report)
    }

    /// The current snapshot
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Whether `normalized` is one of the recent outputs
    #[must_use]
    pub fn is_recent_reply(&self, normalized: &str) -> bool {
        lock(&self.replies).contains(normalized)
    }

    pub(crate) fn cache_reply(&self, reply_key: String) {
        lock(&self.replies).push(reply_key);
    }

    pub(crate) fn cached_pointer(&self, input: usize) -> Option<usize> {
        lock(&self.pointers).get(&input).copied()
    }

    pub(crate) fn remember_pointer(&self, input: usize, output: usize) {
        let mut pointers = lock(&self.pointers);
        if pointers.len() >= POINTER_CACHE_LIMIT {
            tracing::debug!("Pointer cache full, clearing {} entries", pointers.len());
            pointers.clear();
        }
        pointers.insert(input, output);
    }

    /// Translate `raw`, or return it unchanged
    #[must_use]
    pub fn resolve(&self, raw: &str) -> String {
        self.resolve_with(&self.snapshot(), raw)
            .map_or_else(|| raw.to_string(), |t| t.text)
    }

    /// Resolve, recording the output in the reply ring on a hit
    pub(crate) fn resolve_with(&self, snapshot: &Snapshot, raw: &str) -> Option<Translation> {
        let normalized = snapshot.normalize(raw);
        if self.is_recent_reply(&normalized) {
            tracing::trace!("Recent reply passed through: {:?}", normalized);
            return None;
        }

        let translation = snapshot.translate_normalized(raw, &normalized)?;
        tracing::debug!("Reloaded {:?} -> {:?}", raw, translation.text);
        self.cache_reply(translation.reply_key.clone());
        Some(translation)
    }

    #[must_use]
    pub fn remap_char(&self, code: u16) -> u16 {
        self.snapshot().remap_char(code)
    }
}

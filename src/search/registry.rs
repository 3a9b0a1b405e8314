use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use super::{SearchMode, SearchSource};
use crate::error::QueryError;

/// Prefijos que el registro conoce desde el arranque
const DEFAULT_ENTRIES: [(&str, SearchMode, SearchSource); 8] = [
    ("jfsearch", SearchMode::JELLYFIN, SearchSource::Jellyfin),
    ("ytsearch", SearchMode::YOUTUBE, SearchSource::YouTube),
    ("ytmsearch", SearchMode::YOUTUBE_MUSIC, SearchSource::YouTubeMusic),
    ("scsearch", SearchMode::SOUNDCLOUD, SearchSource::SoundCloud),
    ("spsearch", SearchMode::SPOTIFY, SearchSource::Spotify),
    ("amsearch", SearchMode::APPLE_MUSIC, SearchSource::AppleMusic),
    ("dzsearch", SearchMode::DEEZER, SearchSource::Deezer),
    ("ymsearch", SearchMode::YANDEX_MUSIC, SearchSource::YandexMusic),
];

#[derive(Debug, Clone)]
struct RegistryEntry {
    mode: SearchMode,
    source: SearchSource,
    // Orden de inserción; se conserva al sobrescribir
    seq: u64,
}

/// Tabla concurrente de prefijos de búsqueda.
///
/// Keys are stored lower-cased so every lookup is case-insensitive. The table
/// is safe to share between threads (wrap it in an `Arc`); writers and readers
/// never block each other for longer than a shard lock.
#[derive(Debug)]
pub struct PrefixRegistry {
    entries: DashMap<String, RegistryEntry>,
    next_seq: AtomicU64,
}

impl PrefixRegistry {
    /// Registry pre-populated with the default prefixes.
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.reset_defaults();
        registry
    }

    /// Registry without any entry.
    pub fn empty() -> Self {
        Self {
            entries: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Re-inserts the default prefixes, overwriting them if they were changed.
    /// Custom entries are left alone.
    pub fn reset_defaults(&self) {
        for (prefix, mode, source) in DEFAULT_ENTRIES {
            self.upsert(prefix.to_string(), mode, source);
        }
    }

    /// Registers `prefix` with a [`SearchSource::Custom`] classification.
    pub fn register_custom(&self, prefix: &str, mode: SearchMode) -> Result<(), QueryError> {
        self.register(prefix, mode, SearchSource::Custom)
    }

    /// Inserts or overwrites the entry for `prefix`. Last write wins.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidArgument`] if `prefix` is empty or only whitespace.
    pub fn register(
        &self,
        prefix: &str,
        mode: SearchMode,
        source: SearchSource,
    ) -> Result<(), QueryError> {
        if prefix.trim().is_empty() {
            return Err(QueryError::empty_prefix());
        }

        debug!("🔖 Registrando prefijo '{}' -> {} ({})", prefix, mode, source);
        self.upsert(normalize(prefix), mode, source);
        Ok(())
    }

    fn upsert(&self, key: String, mode: SearchMode, source: SearchSource) {
        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                entry.mode = mode;
                entry.source = source;
            }
            Entry::Vacant(vacant) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                vacant.insert(RegistryEntry { mode, source, seq });
            }
        }
    }

    /// Removes `prefix`. Returns whether something was removed.
    pub fn unregister(&self, prefix: &str) -> bool {
        let removed = self.entries.remove(&normalize(prefix)).is_some();
        if removed {
            debug!("🗑️ Prefijo '{}' eliminado", prefix);
        }
        removed
    }

    pub fn is_registered(&self, prefix: &str) -> bool {
        self.entries.contains_key(&normalize(prefix))
    }

    pub fn lookup(&self, prefix: &str) -> Option<(SearchMode, SearchSource)> {
        self.entries
            .get(&normalize(prefix))
            .map(|entry| (entry.mode.clone(), entry.source))
    }

    /// Snapshot of the registered prefixes (lower-cased). Order is unspecified.
    pub fn list_prefixes(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Source of the earliest-inserted entry whose mode equals `mode`.
    ///
    /// Overwriting a prefix keeps its original position; unregistering and
    /// registering it again moves it to the end. Returns
    /// [`SearchSource::None`] when nothing matches.
    pub fn reverse_lookup_source(&self, mode: &SearchMode) -> SearchSource {
        self.entries
            .iter()
            .filter(|entry| entry.value().mode == *mode)
            .min_by_key(|entry| entry.value().seq)
            .map(|entry| entry.value().source)
            .unwrap_or(SearchSource::None)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PrefixRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(prefix: &str) -> String {
    prefix.to_lowercase()
}

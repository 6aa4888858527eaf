use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

struct Snapshot<R> {
    records: Arc<Vec<R>>,
    locations: Arc<HashMap<String, PathBuf>>,
}

/// Thread-safe snapshot of a directory's records.
///
/// Readers get a cheap `Arc` clone of the current snapshot. The only way to
/// change the contents is [`RecordCache::replace`], which swaps the whole
/// snapshot and bumps the generation. Alongside the records the cache keeps
/// the file each id was loaded from, which is not always `{id}.{ext}` for
/// files written or renamed by hand.
pub struct RecordCache<R> {
    snapshot: RwLock<Snapshot<R>>,
    generation: AtomicU64,
}

impl<R> RecordCache<R> {
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Snapshot {
                records: Arc::new(Vec::new()),
                locations: Arc::new(HashMap::new()),
            }),
            generation: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> Arc<Vec<R>> {
        // Contents are always a whole snapshot, so a poisoned lock is still consistent.
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .clone()
    }

    /// File the record with `id` was loaded from, if the last load saw it.
    pub fn location(&self, id: &str) -> Option<PathBuf> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .locations
            .get(id)
            .cloned()
    }

    /// Swaps in a new snapshot and returns the new generation.
    pub fn replace(&self, records: Vec<R>, locations: HashMap<String, PathBuf>) -> u64 {
        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Snapshot {
            records: Arc::new(records),
            locations: Arc::new(locations),
        };
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Number of swaps so far. Zero means the cache was never loaded.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

impl<R> Default for RecordCache<R> {
    fn default() -> Self {
        Self::new()
    }
}

//! Directory-backed record store.
//!
//! Each kind lives in its own directory as `{id}.{ext}` files. `list` and
//! `is_duplicate_name` answer from an in-memory snapshot; `get` always reads
//! the file. Every mutation rescans the directory before returning so the
//! snapshot reflects the write.
//!
//! A file edited by hand may no longer be named after its record's id. The
//! refresh remembers where each id was loaded from, so such a record can
//! still be read, updated or deleted. The next write moves it to `{id}.{ext}`.

pub mod cache;
pub mod codec;
pub mod slug;

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::records::{Activity, Kind, Record};
use crate::shared::errors::{StoreError, StoreResult};
use crate::shared::paths::record_path;
use cache::RecordCache;

pub const DEFAULT_EXTENSION: &str = "md";

/// A file the last refresh could not load.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of one directory scan.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedFile>,
    pub generation: u64,
}

pub struct RecordStore<R: Record> {
    dir: PathBuf,
    extension: String,
    cache: RecordCache<R>,
    mutation: Mutex<()>,
}

impl<R: Record> RecordStore<R> {
    /// Creates a store with an empty cache. Call [`RecordStore::refresh`] to load it.
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
            cache: RecordCache::new(),
            mutation: Mutex::new(()),
        }
    }

    /// Creates a store and loads its cache once.
    pub fn open(dir: impl Into<PathBuf>, extension: impl Into<String>) -> StoreResult<Self> {
        let store = Self::new(dir, extension);
        let report = store.refresh()?;
        tracing::info!(
            target: "store",
            kind = %R::KIND,
            dir = %store.dir.display(),
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "Store opened"
        );
        Ok(store)
    }

    pub fn kind(&self) -> Kind {
        R::KIND
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Canonical file for `id`: `{dir}/{id}.{ext}`.
    pub fn path_for(&self, id: &str) -> PathBuf {
        record_path(&self.dir, id, &self.extension)
    }

    /// Cached records in no particular order.
    pub fn list(&self) -> Arc<Vec<R>> {
        self.cache.snapshot()
    }

    pub fn cache_generation(&self) -> u64 {
        self.cache.generation()
    }

    /// Looks up a record in the cache only.
    pub fn find_cached(&self, id: &str) -> Option<R> {
        self.list().iter().find(|r| r.id() == id).cloned()
    }

    /// Reads a record straight from its file, bypassing the cache.
    pub fn get(&self, id: &str) -> StoreResult<R> {
        if !is_safe_id(id) {
            return Err(StoreError::not_found(R::KIND, id));
        }
        self.read_record(id, &self.locate(id))
    }

    pub fn create(&self, record: R) -> StoreResult<R> {
        record.validate().map_err(StoreError::Invalid)?;
        let id = record.id();
        let path = self.path_for(&id);

        let _guard = self.lock_mutations();
        if path.exists() || self.find_cached(&id).is_some() {
            return Err(StoreError::conflict(R::KIND, id));
        }

        self.write_record(&id, &path, &record)?;
        tracing::info!(target: "store", kind = %R::KIND, id = %id, "Record created");

        self.refresh()?;
        self.read_record(&id, &path)
    }

    /// Replaces the record stored under `old_id`. When the identity fields
    /// change, the file is renamed to the new id.
    pub fn update(&self, old_id: &str, record: R) -> StoreResult<R> {
        record.validate().map_err(StoreError::Invalid)?;
        if !is_safe_id(old_id) {
            return Err(StoreError::not_found(R::KIND, old_id));
        }

        let _guard = self.lock_mutations();
        self.update_locked(old_id, record)
    }

    /// Read-modify-write of one record under the mutation lock, so two
    /// concurrent edits of the same record cannot lose each other's changes.
    pub fn modify(&self, id: &str, edit: impl FnOnce(&mut R)) -> StoreResult<R> {
        if !is_safe_id(id) {
            return Err(StoreError::not_found(R::KIND, id));
        }

        let _guard = self.lock_mutations();
        let mut record = self.read_record(id, &self.locate(id))?;
        edit(&mut record);
        record.validate().map_err(StoreError::Invalid)?;
        self.update_locked(id, record)
    }

    pub fn delete(&self, id: &str) -> StoreResult<()> {
        if !is_safe_id(id) {
            return Err(StoreError::not_found(R::KIND, id));
        }

        let _guard = self.lock_mutations();
        let path = self.locate(id);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::not_found(R::KIND, id));
            }
            Err(e) => return Err(StoreError::io(path, e)),
        }
        tracing::info!(target: "store", kind = %R::KIND, id = %id, "Record deleted");

        self.refresh()?;
        Ok(())
    }

    /// True when another cached record's name slugs to the same value as `name`.
    ///
    /// Only meaningful for kinds identified by name alone; kinds without a
    /// [`Record::name`] never match. Linear scan of the cache. Fine for a
    /// personal collection, not for large ones.
    pub fn is_duplicate_name(&self, name: &str, exclude_id: Option<&str>) -> bool {
        let wanted = slug::slugify(name);
        self.list().iter().any(|record| {
            record.name().map_or(false, |n| slug::slugify(n) == wanted)
                && exclude_id.map_or(true, |ex| record.id() != ex)
        })
    }

    /// True when a cached record other than `exclude_id` already has `id`.
    pub fn is_duplicate_id(&self, id: &str, exclude_id: Option<&str>) -> bool {
        exclude_id != Some(id) && self.list().iter().any(|record| record.id() == id)
    }

    /// Rescans the directory and swaps the cache.
    ///
    /// Files that fail to read or decode are skipped and reported. If the
    /// directory itself cannot be listed the cache is left untouched.
    pub fn refresh(&self) -> StoreResult<RefreshReport> {
        let paths = match self.scan_dir() {
            Ok(paths) => paths,
            Err(e) => {
                tracing::error!(
                    target: "store",
                    kind = %R::KIND,
                    dir = %self.dir.display(),
                    error = %e,
                    "Failed to scan directory, keeping cached records"
                );
                return Err(StoreError::io(&self.dir, e));
            }
        };

        let mut records: Vec<(R, PathBuf)> = Vec::with_capacity(paths.len());
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut skipped = Vec::new();

        for path in paths {
            let record = match fs::read(&path) {
                Ok(bytes) => codec::decode::<R>(&bytes).map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            let record = match record {
                Ok(record) => record,
                Err(reason) => {
                    tracing::warn!(
                        target: "store",
                        kind = %R::KIND,
                        path = %path.display(),
                        error = %reason,
                        "Skipping unreadable record"
                    );
                    skipped.push(SkippedFile { path, reason });
                    continue;
                }
            };

            let id = record.id();
            let stem_matches = file_stem(&path) == Some(id.as_str());
            if !stem_matches {
                tracing::warn!(
                    target: "store",
                    kind = %R::KIND,
                    path = %path.display(),
                    id = %id,
                    "File name does not match record id"
                );
            }

            match index.get(&id).copied() {
                None => {
                    index.insert(id, records.len());
                    records.push((record, path));
                }
                Some(existing) => {
                    let existing_matches = file_stem(&records[existing].1) == Some(id.as_str());
                    let loser = if stem_matches && !existing_matches {
                        std::mem::replace(&mut records[existing], (record, path)).1
                    } else {
                        path
                    };
                    tracing::warn!(
                        target: "store",
                        kind = %R::KIND,
                        path = %loser.display(),
                        id = %id,
                        "Skipping record with duplicate id"
                    );
                    skipped.push(SkippedFile {
                        path: loser,
                        reason: format!("duplicate id {}", id),
                    });
                }
            }
        }

        let loaded = records.len();
        let mut locations = HashMap::with_capacity(loaded);
        let records: Vec<R> = records
            .into_iter()
            .map(|(record, path)| {
                locations.insert(record.id(), path);
                record
            })
            .collect();
        let generation = self.cache.replace(records, locations);

        tracing::debug!(
            target: "store",
            kind = %R::KIND,
            loaded = loaded,
            skipped = skipped.len(),
            generation = generation,
            "Cache refreshed"
        );

        Ok(RefreshReport {
            loaded,
            skipped,
            generation,
        })
    }

    fn lock_mutations(&self) -> MutexGuard<'_, ()> {
        self.mutation.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// File holding `id`: the canonical path when it exists, otherwise the
    /// file the last refresh loaded that id from.
    fn locate(&self, id: &str) -> PathBuf {
        let canonical = self.path_for(id);
        if canonical.is_file() {
            return canonical;
        }
        self.cache.location(id).unwrap_or(canonical)
    }

    fn update_locked(&self, old_id: &str, record: R) -> StoreResult<R> {
        let old_path = self.locate(old_id);
        if !old_path.is_file() {
            return Err(StoreError::not_found(R::KIND, old_id));
        }

        let new_id = record.id();
        let new_path = self.path_for(&new_id);

        if new_path == old_path {
            self.write_record(&new_id, &new_path, &record)?;
            tracing::info!(target: "store", kind = %R::KIND, id = %new_id, "Record updated");
        } else {
            if new_id != old_id && (new_path.exists() || self.find_cached(&new_id).is_some()) {
                return Err(StoreError::conflict(R::KIND, new_id));
            }

            self.write_record(&new_id, &new_path, &record)?;
            commit_rename(&old_path, &new_path, |path| fs::remove_file(path))?;
            tracing::info!(
                target: "store",
                kind = %R::KIND,
                old_id = %old_id,
                id = %new_id,
                from = %old_path.display(),
                "Record renamed"
            );
        }

        self.refresh()?;
        self.read_record(&new_id, &new_path)
    }

    /// Regular files with the store's extension, sorted by path. Dot-files,
    /// including in-flight temp files, are ignored.
    fn scan_dir(&self) -> io::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let hidden = path
                .file_name()
                .and_then(|n| n.to_str())
                .map_or(true, |n| n.starts_with('.'));
            let matches_ext = path
                .extension()
                .map_or(false, |ext| ext == self.extension.as_str());
            if !hidden && matches_ext && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn read_record(&self, id: &str, path: &Path) -> StoreResult<R> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::not_found(R::KIND, id));
            }
            Err(e) => return Err(StoreError::io(path, e)),
        };

        codec::decode(&bytes).map_err(|source| {
            tracing::warn!(
                target: "store",
                kind = %R::KIND,
                path = %path.display(),
                error = %source,
                "Failed to parse record"
            );
            StoreError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    fn write_record(&self, id: &str, path: &Path, record: &R) -> StoreResult<()> {
        let text = codec::encode(record).map_err(|source| StoreError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        write_atomic(&self.dir, id, path, text.as_bytes())
    }
}

impl RecordStore<Activity> {
    /// Activities are one per name per day, so duplicates are judged by the
    /// dated id rather than by name alone.
    pub fn is_duplicate_activity(
        &self,
        name: &str,
        date: NaiveDate,
        exclude_id: Option<&str>,
    ) -> bool {
        self.is_duplicate_id(&slug::dated_slug(date, name), exclude_id)
    }
}

/// Removes the old file of a renamed record. If that fails the freshly
/// written `new_path` is removed again so the record never exists twice.
fn commit_rename(
    old_path: &Path,
    new_path: &Path,
    remove_old: impl FnOnce(&Path) -> io::Result<()>,
) -> StoreResult<()> {
    let Err(e) = remove_old(old_path) else {
        return Ok(());
    };

    if let Err(cleanup) = fs::remove_file(new_path) {
        tracing::error!(
            target: "store",
            path = %new_path.display(),
            error = %cleanup,
            "Failed to roll back renamed record"
        );
    }
    Err(StoreError::io(old_path, e))
}

/// Writes to a hidden temp file in the same directory, then renames it over `path`.
fn write_atomic(dir: &Path, id: &str, path: &Path, contents: &[u8]) -> StoreResult<()> {
    let tmp = dir.join(format!(".{}.{}.tmp", id, Uuid::new_v4()));

    let written = fs::File::create(&tmp).and_then(|mut file| {
        file.write_all(contents)?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::io(path, e));
    }

    tracing::trace!(target: "store", path = %path.display(), "Wrote record file");
    Ok(())
}

fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

/// Ids are file stems. Anything that could escape the directory or name a
/// hidden file cannot belong to a record.
fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('.')
        && !id.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Media, Preset};

    fn store_in(dir: &Path) -> RecordStore<Media> {
        RecordStore::open(dir, DEFAULT_EXTENSION).unwrap()
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_is_safe_id() {
        assert!(is_safe_id("parasite"));
        assert!(is_safe_id("20240301-073000"));
        assert!(!is_safe_id(""));
        assert!(!is_safe_id("../etc/passwd"));
        assert!(!is_safe_id(".hidden"));
        assert!(!is_safe_id("a\\b"));
    }

    #[test]
    fn test_open_empty_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        assert!(store.list().is_empty());
        assert_eq!(store.cache_generation(), 1);
        assert_eq!(store.kind(), Kind::Media);
    }

    #[test]
    fn test_open_missing_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let result = RecordStore::<Media>::open(tmp.path().join("nope"), DEFAULT_EXTENSION);
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_create_writes_file_and_refreshes() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());

        let created = store.create(Media::new("Parasite")).unwrap();
        assert_eq!(created.id(), "parasite");
        assert!(tmp.path().join("parasite.md").is_file());
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.cache_generation(), 2);
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        let err = store.create(Media::new("  ?? ")).unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_refresh_skips_dot_files_and_other_extensions() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("yoga.md"), "---\nname: Yoga\n---\n").unwrap();
        fs::write(tmp.path().join(".yoga.1234.tmp"), "---\nname: Tmp\n---\n").unwrap();
        fs::write(tmp.path().join(".hidden.md"), "---\nname: Hidden\n---\n").unwrap();
        fs::write(tmp.path().join("notes.txt"), "---\nname: Notes\n---\n").unwrap();
        fs::create_dir(tmp.path().join("sub.md")).unwrap();

        let store: RecordStore<Preset> = RecordStore::new(tmp.path(), "md");
        let report = store.refresh().unwrap();
        assert_eq!(report.loaded, 1);
        assert!(report.skipped.is_empty());
        assert_eq!(store.list()[0].name, "Yoga");
    }

    #[test]
    fn test_refresh_skips_bad_files() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("good.md"), "---\nname: Good\n---\n").unwrap();
        fs::write(tmp.path().join("broken.md"), "---\nname: [oops\n---\n").unwrap();
        fs::write(tmp.path().join("nameless.md"), "---\ncountry: korea\n---\n").unwrap();

        let store: RecordStore<Media> = RecordStore::new(tmp.path(), "md");
        let report = store.refresh().unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(store.list()[0].id(), "good");
    }

    #[test]
    fn test_refresh_prefers_file_named_after_id() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a-copy.md"), "---\nname: Yoga\n---\n").unwrap();
        fs::write(tmp.path().join("yoga.md"), "---\nname: yoga\n---\n").unwrap();

        let store: RecordStore<Preset> = RecordStore::new(tmp.path(), "md");
        let report = store.refresh().unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped[0].path, tmp.path().join("a-copy.md"));
        assert_eq!(store.list()[0].name, "yoga");
    }

    #[test]
    fn test_mismatched_file_name_is_reachable_by_id() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("dont-look-up.md"),
            "---\nname: Don't Look Up\n---\n",
        )
        .unwrap();
        let store = store_in(tmp.path());

        let ids: Vec<String> = store.list().iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec!["don-t-look-up"]);
        assert_eq!(store.get("don-t-look-up").unwrap().name, "Don't Look Up");
        assert!(store.create(Media::new("Don't Look Up")).unwrap_err().is_conflict());

        store.delete("don-t-look-up").unwrap();
        assert!(file_names(tmp.path()).is_empty());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_update_moves_mismatched_file_to_canonical_name() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("old-title.md"), "---\nname: New Title\n---\n").unwrap();
        let store = store_in(tmp.path());

        let mut media = store.get("new-title").unwrap();
        media.review = "Edited by hand, then in the app.".to_string();
        store.update("new-title", media).unwrap();

        assert_eq!(file_names(tmp.path()), vec!["new-title.md"]);
        assert_eq!(
            store.get("new-title").unwrap().review,
            "Edited by hand, then in the app."
        );
    }

    #[test]
    fn test_failed_refresh_keeps_cache() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("presets");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("yoga.md"), "---\nname: Yoga\n---\n").unwrap();

        let store: RecordStore<Preset> = RecordStore::open(&dir, "md").unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert!(store.refresh().is_err());
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.cache_generation(), 1);
    }

    #[test]
    fn test_get_unsafe_id_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        assert!(store.get("../parasite").unwrap_err().is_not_found());
        assert!(store.delete("").unwrap_err().is_not_found());
    }

    #[test]
    fn test_get_reports_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("broken.md"), "---\nname: x\n").unwrap();
        let store = store_in(tmp.path());
        assert!(matches!(
            store.get("broken"),
            Err(StoreError::Parse { .. })
        ));
    }

    #[test]
    fn test_is_duplicate_name() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        store.create(Media::new("Show A")).unwrap();

        assert!(store.is_duplicate_name("show   a", None));
        assert!(store.is_duplicate_name("SHOW-A", Some("other")));
        assert!(!store.is_duplicate_name("Show A", Some("show-a")));
        assert!(!store.is_duplicate_name("Show B", None));
    }

    #[test]
    fn test_duplicate_activity_is_judged_per_day() {
        let tmp = tempfile::tempdir().unwrap();
        let store: RecordStore<Activity> = RecordStore::open(tmp.path(), "md").unwrap();
        let first = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let second = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        store
            .create(Activity {
                name: "Run".to_string(),
                date: first,
            })
            .unwrap();

        assert!(store.is_duplicate_activity("run", first, None));
        assert!(!store.is_duplicate_activity("Run", first, Some("20240301-run")));
        assert!(!store.is_duplicate_activity("Run", second, None));
        assert!(!store.is_duplicate_name("Run", None));

        store
            .create(Activity {
                name: "Run".to_string(),
                date: second,
            })
            .unwrap();
        assert!(store.is_duplicate_activity("Run", second, None));
    }

    #[test]
    fn test_modify_applies_edit_under_lock() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        store.create(Media::new("Parasite")).unwrap();

        let edited = store
            .modify("parasite", |m| m.rating = "9".to_string())
            .unwrap();
        assert_eq!(edited.rating, "9");
        assert_eq!(store.get("parasite").unwrap().rating, "9");
        assert!(store.modify("ghost", |_| {}).unwrap_err().is_not_found());
    }

    #[test]
    fn test_modify_rejects_invalid_edit() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        store.create(Media::new("Parasite")).unwrap();

        let err = store.modify("parasite", |m| m.name = "  ".to_string()).unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
        assert_eq!(file_names(tmp.path()), vec!["parasite.md"]);
    }

    #[test]
    fn test_commit_rename_rolls_back_new_file() {
        let tmp = tempfile::tempdir().unwrap();
        let old_path = tmp.path().join("old.md");
        let new_path = tmp.path().join("new.md");
        fs::write(&old_path, "old").unwrap();
        fs::write(&new_path, "new").unwrap();

        let err = commit_rename(&old_path, &new_path, |_| {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        })
        .unwrap_err();

        assert!(matches!(err, StoreError::Io { ref path, .. } if *path == old_path));
        assert!(old_path.is_file());
        assert!(!new_path.exists());
    }

    #[test]
    fn test_commit_rename_removes_old_file() {
        let tmp = tempfile::tempdir().unwrap();
        let old_path = tmp.path().join("old.md");
        let new_path = tmp.path().join("new.md");
        fs::write(&old_path, "old").unwrap();
        fs::write(&new_path, "new").unwrap();

        commit_rename(&old_path, &new_path, |p| fs::remove_file(p)).unwrap();
        assert!(!old_path.exists());
        assert!(new_path.is_file());
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        store.create(Media::new("Parasite")).unwrap();
        let mut media = store.get("parasite").unwrap();
        media.review = "Again.".to_string();
        store.update("parasite", media).unwrap();

        assert_eq!(file_names(tmp.path()), vec!["parasite.md".to_string()]);
    }
}

//! Durable gallery store.
//!
//! The store owns the gallery: an in-memory value behind a single writer
//! lock, flushed whole to a JSON file on every append. Readers take cheap
//! immutable snapshots and never block behind a flush.
//!
//! Whole-file-rewrite persistence is intentionally simple for the
//! interactive enrollment write rate; the atomic-visibility contract (the
//! persisted file never reflects a partial append) is what matters and
//! would have to survive any replacement flush strategy.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::model::{Gallery, IdentityRecord};

/// Lock-guarded owner of the gallery and its durable copy.
#[derive(Debug)]
pub struct GalleryStore {
    path: PathBuf,
    gallery: RwLock<Arc<Gallery>>,
}

impl GalleryStore {
    /// Open a store backed by the given file, loading any prior state.
    ///
    /// A missing file is the first-run case and yields an empty gallery.
    ///
    /// # Errors
    /// Returns [`Error::StoreUnavailable`] if the file exists but cannot
    /// be read, and [`Error::StoreCorrupt`] if its contents are not a
    /// well-formed record sequence with uniform dimensionality.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let gallery = Self::load(&path)?;

        log::info!(
            "gallery store opened at {} ({} records)",
            path.display(),
            gallery.len()
        );

        Ok(Self {
            path,
            gallery: RwLock::new(Arc::new(gallery)),
        })
    }

    /// Path of the durable gallery file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record and flush the updated gallery to disk.
    ///
    /// The write lock is held for the in-memory update and the flush, so
    /// appends serialize against each other. The new gallery value is
    /// published only after the flush succeeds; on failure the in-memory
    /// state is left exactly as it was before the call.
    ///
    /// # Errors
    /// Returns [`Error::PersistFailed`] if the flush fails, or a record
    /// validation error from [`Gallery::push`].
    pub async fn append(&self, record: IdentityRecord) -> Result<()> {
        let mut guard = self.gallery.write().await;

        let mut next = Gallery::clone(&guard);
        next.push(record)?;
        Self::flush(&self.path, &next)?;

        log::debug!("gallery flushed ({} records)", next.len());
        *guard = Arc::new(next);
        Ok(())
    }

    /// Immutable snapshot of the current gallery.
    ///
    /// Holds the read lock only long enough to clone the `Arc`; a search
    /// over the snapshot sees the gallery as of before or after any
    /// concurrent append, never a torn intermediate state.
    pub async fn snapshot(&self) -> Arc<Gallery> {
        let guard = self.gallery.read().await;
        Arc::clone(&guard)
    }

    /// Number of records currently enrolled.
    pub async fn len(&self) -> usize {
        self.gallery.read().await.len()
    }

    fn load(path: &Path) -> Result<Gallery> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Gallery::new());
            }
            Err(e) => return Err(Error::StoreUnavailable(e)),
        };

        let records: Vec<IdentityRecord> =
            serde_json::from_str(&data).map_err(|e| Error::StoreCorrupt(e.to_string()))?;

        // Rebuild through push so the gallery invariants are re-checked;
        // a file that violates them is corrupt, whatever its JSON shape.
        let mut gallery = Gallery::new();
        for record in records {
            gallery
                .push(record)
                .map_err(|e| Error::StoreCorrupt(e.to_string()))?;
        }
        Ok(gallery)
    }

    fn flush(path: &Path, gallery: &Gallery) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(Error::PersistFailed)?;
            }
        }

        let json = serde_json::to_vec_pretty(gallery)
            .map_err(|e| Error::PersistFailed(io::Error::from(e)))?;

        // Write a sibling temp file and rename it into place so the store
        // path always holds either the old or the new gallery, never a
        // partial write.
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, &json).map_err(Error::PersistFailed)?;
        std::fs::rename(&tmp, path).map_err(Error::PersistFailed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Embedding;
    use tempfile::TempDir;

    fn record(label: &str, values: Vec<f32>) -> IdentityRecord {
        IdentityRecord::new(label, Embedding::new(values).unwrap()).unwrap()
    }

    #[test]
    fn test_open_missing_file_yields_empty_gallery() {
        let dir = TempDir::new().unwrap();
        let store = GalleryStore::open(dir.path().join("gallery.json")).unwrap();
        assert_eq!(store.gallery.blocking_read().len(), 0);
    }

    #[test]
    fn test_open_unreadable_path_is_unavailable() {
        let dir = TempDir::new().unwrap();
        // A directory at the store path cannot be read as a file.
        let result = GalleryStore::open(dir.path());
        assert!(matches!(result, Err(Error::StoreUnavailable(_))));
    }

    #[test]
    fn test_open_malformed_json_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gallery.json");
        std::fs::write(&path, "not json").unwrap();

        let result = GalleryStore::open(&path);
        assert!(matches!(result, Err(Error::StoreCorrupt(_))));
    }

    #[test]
    fn test_open_mixed_dimensions_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gallery.json");
        std::fs::write(
            &path,
            r#"[{"label":"alice","vector":[1.0,0.0]},{"label":"bob","vector":[1.0]}]"#,
        )
        .unwrap();

        let result = GalleryStore::open(&path);
        assert!(matches!(result, Err(Error::StoreCorrupt(_))));
    }

    #[tokio::test]
    async fn test_append_then_reload_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gallery.json");

        let store = GalleryStore::open(&path).unwrap();
        store.append(record("alice", vec![1.0, 0.0, 0.5])).await.unwrap();
        store.append(record("bob", vec![0.0, 1.0, -0.25])).await.unwrap();

        let reloaded = GalleryStore::open(&path).unwrap();
        let gallery = reloaded.snapshot().await;
        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery.records()[0].label, "alice");
        assert_eq!(gallery.records()[0].embedding.as_slice(), &[1.0, 0.0, 0.5]);
        assert_eq!(gallery.records()[1].label, "bob");
        assert_eq!(gallery.records()[1].embedding.as_slice(), &[0.0, 1.0, -0.25]);
    }

    #[tokio::test]
    async fn test_append_dimension_mismatch_rejected() {
        let dir = TempDir::new().unwrap();
        let store = GalleryStore::open(dir.path().join("gallery.json")).unwrap();

        store.append(record("alice", vec![1.0, 0.0])).await.unwrap();
        let result = store.append(record("bob", vec![1.0, 0.0, 0.0])).await;
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_flush_failure_rolls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gallery.json");

        let store = GalleryStore::open(&path).unwrap();
        store.append(record("alice", vec![1.0, 0.0])).await.unwrap();

        // Block the temp file with a directory so the next flush fails.
        std::fs::create_dir(path.with_extension("tmp")).unwrap();

        let result = store.append(record("bob", vec![0.0, 1.0])).await;
        assert!(matches!(result, Err(Error::PersistFailed(_))));
        assert_eq!(store.len().await, 1);

        // The durable copy still holds the pre-failure state.
        let reloaded = GalleryStore::open(&path).unwrap();
        assert_eq!(reloaded.len().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_lose_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gallery.json");
        let store = Arc::new(GalleryStore::open(&path).unwrap());

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.append(record(&format!("person-{i}"), vec![i as f32, 1.0])).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let gallery = store.snapshot().await;
        assert_eq!(gallery.len(), 16);
        for i in 0..16 {
            let label = format!("person-{i}");
            assert!(gallery.iter().any(|r| r.label == label));
        }

        // Every append reached disk as well.
        let reloaded = GalleryStore::open(&path).unwrap();
        assert_eq!(reloaded.len().await, 16);
    }

    #[tokio::test]
    async fn test_snapshot_is_decoupled_from_later_appends() {
        let dir = TempDir::new().unwrap();
        let store = GalleryStore::open(dir.path().join("gallery.json")).unwrap();

        store.append(record("alice", vec![1.0, 0.0])).await.unwrap();
        let snapshot = store.snapshot().await;

        store.append(record("bob", vec![0.0, 1.0])).await.unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.snapshot().await.len(), 2);
    }
}

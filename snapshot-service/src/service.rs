//! High-level snapshot operations on top of a [`VolumeStore`].

use std::sync::Arc;

use uuid::Uuid;

use crate::error::Result;
use crate::inventory::filter_test_snapshots;
use crate::store::BoxedStore;

/// Where test snapshots live on the volume.
#[derive(Debug, Clone)]
pub struct SnapshotLayout {
    /// Mount point of the btrfs volume.
    pub root: String,
    /// The subvolume every snapshot is taken from.
    pub source_subvolume: String,
    /// Path token identifying test snapshots, relative to the root.
    pub snapshot_prefix: String,
}

impl Default for SnapshotLayout {
    fn default() -> Self {
        Self {
            root: "/data".to_owned(),
            source_subvolume: "/data/@meta".to_owned(),
            snapshot_prefix: "@data/test/".to_owned(),
        }
    }
}

/// A freshly created snapshot.
#[derive(Debug, Clone)]
pub struct CreatedSnapshot {
    /// The identifier embedded in the snapshot path.
    pub uuid: Uuid,
    /// Full path of the snapshot on the volume.
    pub path: String,
}

/// Result of a delete-all sweep.
///
/// Individual deletions can fail without aborting the sweep, so the outcome
/// carries both the reclaimed and the surviving paths.
#[derive(Debug, Default)]
pub struct DeleteOutcome {
    /// Paths that were deleted.
    pub deleted: Vec<String>,
    /// Paths whose deletion failed.
    pub failed: Vec<String>,
}

impl DeleteOutcome {
    /// Returns `true` when every deletion succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// High-level asynchronous service for managing test snapshots.
#[derive(Clone, Debug)]
pub struct SnapshotService(Arc<SnapshotServiceInner>);

#[derive(Debug)]
struct SnapshotServiceInner {
    store: BoxedStore,
    layout: SnapshotLayout,
}

impl SnapshotService {
    /// Creates a new service over the given store and layout.
    pub fn new(store: BoxedStore, layout: SnapshotLayout) -> Self {
        Self(Arc::new(SnapshotServiceInner { store, layout }))
    }

    /// Snapshots the source subvolume into a fresh test snapshot path.
    ///
    /// The destination is derived from the layout as
    /// `<root>/<snapshot_prefix>@<uuid>`, with a new v4 UUID per call.
    pub async fn create_snapshot(&self) -> Result<CreatedSnapshot> {
        let layout = &self.0.layout;
        let uuid = Uuid::new_v4();
        let path = format!(
            "{}/{}@{uuid}",
            layout.root.trim_end_matches('/'),
            layout.snapshot_prefix
        );

        tracing::debug!(source = %layout.source_subvolume, dest = %path, "creating snapshot");
        self.0.store.snapshot(&layout.source_subvolume, &path).await?;

        Ok(CreatedSnapshot { uuid, path })
    }

    /// Lists the full paths of all test snapshots.
    pub async fn list_test_snapshots(&self) -> Result<Vec<String>> {
        let layout = &self.0.layout;
        let entries = self.0.store.list(&layout.root).await?;

        Ok(filter_test_snapshots(
            &entries,
            &layout.snapshot_prefix,
            &layout.root,
        ))
    }

    /// Deletes all test snapshots, continuing past individual failures.
    ///
    /// Only a failure of the initial listing is an error; per-path delete
    /// failures are recorded in the returned [`DeleteOutcome`].
    pub async fn delete_all_test_snapshots(&self) -> Result<DeleteOutcome> {
        let snapshots = self.list_test_snapshots().await?;
        tracing::info!(count = snapshots.len(), "deleting test snapshots");

        let mut outcome = DeleteOutcome::default();
        for path in snapshots {
            match self.0.store.delete(&path).await {
                Ok(()) => outcome.deleted.push(path),
                Err(err) => {
                    tracing::error!(
                        path = %path,
                        error = &err as &dyn std::error::Error,
                        "failed to delete snapshot"
                    );
                    outcome.failed.push(path);
                }
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn make_service(store: InMemoryStore) -> SnapshotService {
        SnapshotService::new(Box::new(store), SnapshotLayout::default())
    }

    #[tokio::test]
    async fn created_snapshots_show_up_in_the_listing() {
        let store = InMemoryStore::new();
        let service = make_service(store.clone());

        let created = service.create_snapshot().await.unwrap();
        assert!(created.path.starts_with("/data/@data/test/@"));
        assert!(created.path.ends_with(&created.uuid.to_string()));

        let snapshots = service.list_test_snapshots().await.unwrap();
        assert_eq!(snapshots, vec![created.path]);
    }

    #[tokio::test]
    async fn each_snapshot_gets_a_unique_path() {
        let service = make_service(InMemoryStore::new());

        let first = service.create_snapshot().await.unwrap();
        let second = service.create_snapshot().await.unwrap();

        assert_ne!(first.uuid, second.uuid);
        assert_ne!(first.path, second.path);
    }

    #[tokio::test]
    async fn listing_ignores_unrelated_subvolumes() {
        let store = InMemoryStore::new();
        store.insert("/data/@home");
        store.insert("/data/@var");
        let service = make_service(store);

        let snapshots = service.list_test_snapshots().await.unwrap();
        assert!(snapshots.is_empty());
    }

    #[tokio::test]
    async fn delete_all_reports_partial_failures() {
        let store = InMemoryStore::new();
        store.insert("/data/@data/test/@a");
        store.insert("/data/@data/test/@b");
        store.insert("/data/@data/test/@c");
        store.fail_delete("/data/@data/test/@b");

        let service = make_service(store.clone());
        let outcome = service.delete_all_test_snapshots().await.unwrap();

        assert!(!outcome.is_complete());
        assert_eq!(
            outcome.deleted,
            vec!["/data/@data/test/@a", "/data/@data/test/@c"]
        );
        assert_eq!(outcome.failed, vec!["/data/@data/test/@b"]);
        assert_eq!(store.paths(), vec!["/data/@data/test/@b"]);
    }

    #[tokio::test]
    async fn delete_all_with_no_snapshots_is_complete() {
        let service = make_service(InMemoryStore::new());

        let outcome = service.delete_all_test_snapshots().await.unwrap();
        assert!(outcome.is_complete());
        assert!(outcome.deleted.is_empty());
    }
}

use std::fmt::Debug;

use crate::error::Result;

mod btrfs;
mod in_memory;

pub use btrfs::BtrfsStore;
pub use in_memory::InMemoryStore;

/// A boxed [`VolumeStore`] as held by the service.
pub type BoxedStore = Box<dyn VolumeStore>;

/// The subvolume operations the snapshot service is built on.
#[async_trait::async_trait]
pub trait VolumeStore: Debug + Send + Sync + 'static {
    /// Creates a new subvolume at `path`.
    async fn create(&self, path: &str) -> Result<()>;

    /// Snapshots the `source` subvolume into `dest`.
    async fn snapshot(&self, source: &str, dest: &str) -> Result<()>;

    /// Deletes the subvolume at `path`.
    async fn delete(&self, path: &str) -> Result<()>;

    /// Lists all subvolume paths under `root`, relative to the volume.
    async fn list(&self, root: &str) -> Result<Vec<String>>;
}
